// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// URL封锁名单
pub mod blocklist;

/// 遥测初始化
pub mod telemetry;
