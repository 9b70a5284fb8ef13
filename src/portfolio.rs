//! 内存持仓存储与估值
//!
//! 仅保存在进程内，重启即丢失。读写通过 `RwLock` 串行化，同一用户的并发写入不会互相覆盖中间状态。

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::error::{ApiError, ApiResult};
use crate::providers::PriceProvider;

/// 固定税率，只做粗略估算（无成本基础、无持有期概念）
pub const TAX_RATE: f64 = 0.15;

pub const DEFAULT_USER_ID: &str = "default_user";

/// 代币符号 → 持仓数量
pub type Holdings = BTreeMap<String, f64>;

#[derive(Debug, Default)]
pub struct PortfolioStore {
    users: RwLock<HashMap<String, Holdings>>,
}

impl PortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入（覆盖）某个用户某个代币的持仓数量
    pub fn upsert(&self, user_id: &str, symbol: &str, amount: f64) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users
            .entry(user_id.to_string())
            .or_default()
            .insert(symbol.to_string(), amount);
    }

    /// 返回持仓快照；用户不存在或无持仓时返回 `None`
    pub fn holdings(&self, user_id: &str) -> Option<Holdings> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        users.get(user_id).filter(|h| !h.is_empty()).cloned()
    }
}

/// 单个代币的估值
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub amount: f64,
    pub price_usd: f64,
    pub value_usd: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub positions: Vec<Position>,
    pub total_value: f64,
}

impl Valuation {
    /// 形如 `BTC: 2 × $100.00 = $200.00; ETH: ...`
    pub fn details(&self) -> String {
        self.positions
            .iter()
            .map(|p| {
                format!(
                    "{}: {} × ${:.2} = ${:.2}",
                    p.symbol, p.amount, p.price_usd, p.value_usd
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn estimated_tax(&self) -> f64 {
        TAX_RATE * self.total_value
    }
}

/// 逐个代币查询报价，计算 数量 × 价格 并求和
///
/// 任一代币查不到报价时返回 `NotFound`；乘积或合计溢出为非有限值时返回下游错误。
pub async fn valuate(holdings: &Holdings, prices: &dyn PriceProvider) -> ApiResult<Valuation> {
    let mut positions = Vec::with_capacity(holdings.len());
    let mut total_value = 0.0;

    for (symbol, &amount) in holdings {
        let price_usd = prices
            .quote_usd(symbol)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Price for {symbol} not found")))?;
        let value_usd = amount * price_usd;
        total_value += value_usd;
        if !total_value.is_finite() {
            return Err(ApiError::external(
                "Price API",
                format!("portfolio value for {symbol} is not a finite number"),
            ));
        }
        positions.push(Position {
            symbol: symbol.clone(),
            amount,
            price_usd,
            value_usd,
        });
    }

    Ok(Valuation {
        positions,
        total_value,
    })
}
