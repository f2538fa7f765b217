// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 传输层DTO
pub mod dto;

/// 用例
pub mod use_cases;
