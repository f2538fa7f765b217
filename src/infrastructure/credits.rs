// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::credit_repository::{CreditError, CreditLedger};
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

/// 内存信用账本
///
/// 进程内的信用账本实现。未知团队按默认余额处理；
/// 本实现只支持额度检查，不做扣费。
pub struct InMemoryCreditLedger {
    balances: DashMap<Uuid, i64>,
    default_balance: i64,
}

impl InMemoryCreditLedger {
    /// 创建新的内存信用账本实例
    ///
    /// # 参数
    ///
    /// * `default_balance` - 未单独设置余额的团队的默认额度
    pub fn new(default_balance: i64) -> Self {
        Self {
            balances: DashMap::new(),
            default_balance,
        }
    }

    /// 设置某个团队的余额
    pub fn set_balance(&self, team_id: Uuid, balance: i64) {
        self.balances.insert(team_id, balance);
    }
}

#[async_trait]
impl CreditLedger for InMemoryCreditLedger {
    async fn check_credits(&self, team_id: Uuid, cost: u32) -> Result<(), CreditError> {
        let balance = self
            .balances
            .get(&team_id)
            .map(|b| *b)
            .unwrap_or(self.default_balance);

        if balance >= i64::from(cost) {
            Ok(())
        } else {
            Err(CreditError::Insufficient)
        }
    }
}
