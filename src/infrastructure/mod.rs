// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 内存信用账本实现
pub mod credits;

/// 结果日志实现
pub mod outcome_log;
