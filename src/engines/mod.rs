// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP抓取引擎实现
pub mod http_engine;

/// 引擎边界定义
pub mod traits;
