//! 报价 API 客户端
//!
//! 请求 `{PRICE_API_URL}?fsyms=BTC&tsyms=USD`，响应以代币符号为键，值可以是
//! 数字，也可以是包含 `USD` 字段的对象（CryptoCompare `pricemulti` 格式）。

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{fetch_json, require, PriceProvider};
use crate::config::ServicesConfig;
use crate::error::{ApiError, ApiResult};

const SERVICE: &str = "Price API";
const QUOTE_CURRENCY: &str = "USD";

pub struct QuoteApiProvider {
    client: Client,
    base_url: Option<String>,
}

impl QuoteApiProvider {
    pub fn new(client: Client, config: &ServicesConfig) -> Self {
        Self {
            client,
            base_url: config.price_api_url.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }
}

/// 键不存在时返回 `Ok(None)`；键存在但值不可用视为下游载荷错误
fn extract_quote(payload: &Value, symbol: &str) -> ApiResult<Option<f64>> {
    let Some(entry) = payload.get(symbol) else {
        return Ok(None);
    };
    let price = match entry {
        Value::Number(n) => n.as_f64(),
        Value::Object(quotes) => quotes.get(QUOTE_CURRENCY).and_then(Value::as_f64),
        _ => None,
    };
    price.map(Some).ok_or_else(|| {
        ApiError::external(
            SERVICE,
            format!("unexpected quote payload for {symbol}: {entry}"),
        )
    })
}

#[async_trait]
impl PriceProvider for QuoteApiProvider {
    async fn quote_usd(&self, symbol: &str) -> ApiResult<Option<f64>> {
        let base_url = require(self.base_url.as_deref(), "PRICE_API_URL")?;

        let request = self
            .client
            .get(base_url)
            .query(&[("fsyms", symbol), ("tsyms", QUOTE_CURRENCY)]);

        let payload = fetch_json(SERVICE, request).await?;
        extract_quote(&payload, symbol)
    }
}
