//! 交易所 K 线客户端（Binance `/api/v3/klines` 格式）

use reqwest::Client;
use serde_json::Value;

use super::{fetch_json, trim_base};
use crate::config::ServicesConfig;
use crate::error::{ApiError, ApiResult};

const SERVICE: &str = "Exchange API";
const CANDLE_INTERVAL: &str = "1h";
/// K 线数组中收盘价的位置: [open_time, open, high, low, close, ...]
const CLOSE_INDEX: usize = 4;

pub struct ExchangeProvider {
    client: Client,
    base_url: String,
}

impl ExchangeProvider {
    pub fn new(client: Client, config: &ServicesConfig) -> Self {
        Self {
            client,
            base_url: trim_base(&config.exchange_api_url),
        }
    }

    /// 最近 `window` 根 K 线的收盘价，按时间从旧到新
    pub async fn recent_closes(&self, pair: &str, window: usize) -> ApiResult<Vec<f64>> {
        let limit = window.to_string();
        let request = self
            .client
            .get(format!("{}/api/v3/klines", self.base_url))
            .query(&[
                ("symbol", pair),
                ("interval", CANDLE_INTERVAL),
                ("limit", limit.as_str()),
            ]);

        let payload = fetch_json(SERVICE, request).await?;
        let candles = payload
            .as_array()
            .ok_or_else(|| ApiError::external(SERVICE, format!("unexpected candle payload: {payload}")))?;

        candles.iter().map(close_price).collect()
    }
}

fn close_price(candle: &Value) -> ApiResult<f64> {
    let close = candle.get(CLOSE_INDEX);
    let parsed = match close {
        Some(Value::String(s)) => s.parse().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|c: &f64| c.is_finite())
        .ok_or_else(|| ApiError::external(SERVICE, format!("candle without close price: {candle}")))
}
