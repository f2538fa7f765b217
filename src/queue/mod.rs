// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 爬取队列边界
pub mod crawl_queue;

/// 内存队列实现
pub mod memory_queue;
