// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 爬取领域模型
///
/// 包含爬取规格、任务、进度和结果等核心实体
pub mod crawl;
