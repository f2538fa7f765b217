// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含请求编排用例和传输层DTO
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和协作方接口
pub mod domain;

/// 引擎模块
///
/// 定义抓取引擎边界及其默认HTTP实现
pub mod engines;

/// 基础设施模块
///
/// 提供协作方接口的进程内默认实现
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和中间件
pub mod presentation;

/// 队列模块
///
/// 定义爬取任务队列边界及内存队列实现
pub mod queue;

/// 工具模块
///
/// 提供URL封锁名单和遥测初始化等辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现后台爬取任务处理
pub mod workers;
