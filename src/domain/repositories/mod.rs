// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 信用账本接口
pub mod credit_repository;

/// 结果日志接口
pub mod outcome_repository;
