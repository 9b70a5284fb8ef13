//! 纯计算工具
//!
//! 与 I/O 无关的小函数：补全文本整理、均线交易信号、巨鲸转账筛选。

use serde::Serialize;
use serde_json::Value;

/// 未提供 `token_decimals` 时按 lamports 处理
const DEFAULT_TOKEN_DECIMALS: i32 = 9;

/// 整理补全文本：去掉空行，其余各行原样按顺序以空行分隔
pub fn normalize_completion(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSignal {
    Buy,
    Sell,
}

impl TradeSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSignal::Buy => "BUY",
            TradeSignal::Sell => "SELL",
        }
    }
}

/// 简单均线比较：最新收盘价低于窗口均值则 SELL，否则（含相等）BUY
///
/// 返回 `(信号, 均值)`；窗口为空时返回 `None`。
pub fn moving_average_signal(closes: &[f64]) -> Option<(TradeSignal, f64)> {
    let latest = *closes.last()?;
    let avg = closes.iter().sum::<f64>() / closes.len() as f64;
    let signal = if latest < avg {
        TradeSignal::Sell
    } else {
        TradeSignal::Buy
    };
    Some((signal, avg))
}

/// 计算一笔转账的代币数量（`amount / 10^decimals`）
///
/// `amount` 可以是数字或数字字符串；无法解析时视为 0。
pub fn transfer_value(tx: &Value) -> f64 {
    let amount = match tx.get("amount") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    };
    let decimals = tx
        .get("token_decimals")
        .and_then(Value::as_i64)
        .map(|d| d as i32)
        .unwrap_or(DEFAULT_TOKEN_DECIMALS);

    amount / 10f64.powi(decimals)
}

/// 取前 `limit` 笔数量达到阈值的转账，保持原有顺序
pub fn whale_transfers(transfers: Vec<Value>, threshold: f64, limit: usize) -> Vec<Value> {
    transfers
        .into_iter()
        .filter(|tx| transfer_value(tx) >= threshold)
        .take(limit)
        .collect()
}
