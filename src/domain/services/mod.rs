// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含编排核心的业务逻辑服务：
/// - 模式解析（mode_resolver）：决定内联执行还是队列执行
/// - 任务分发（dispatch_service）：构造任务规格并提交队列
/// - 状态查询（status_service）：按任务ID组合状态与进度快照
pub mod dispatch_service;
pub mod mode_resolver;
pub mod status_service;
