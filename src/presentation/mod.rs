// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 错误映射
pub mod errors;

/// 请求处理器
pub mod handlers;

/// 中间件
pub mod middleware;

/// 路由
pub mod routes;
