// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// 信用账本错误类型
#[derive(Error, Debug)]
pub enum CreditError {
    /// 余额不足
    #[error("Insufficient credits")]
    Insufficient,

    /// 账本访问错误
    #[error("Ledger error: {0}")]
    Ledger(String),
}

/// 信用账本特质
///
/// 团队级信用核算的协作方边界。本核心只做额度检查，
/// 计费和扣费由账本的实现方负责。
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// 检查团队是否有足够的信用额度
    ///
    /// # 参数
    ///
    /// * `team_id` - 团队ID
    /// * `cost` - 本次请求的额度成本
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 额度充足
    /// * `Err(CreditError)` - 额度不足或账本访问失败
    async fn check_credits(&self, team_id: Uuid, cost: u32) -> Result<(), CreditError>;
}
