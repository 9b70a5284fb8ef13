//! Solscan 账户转账记录客户端

use reqwest::Client;
use serde_json::Value;

use super::{fetch_json, require, trim_base};
use crate::config::ServicesConfig;
use crate::error::{ApiError, ApiResult};

const SERVICE: &str = "Solscan";

pub struct SolscanProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl SolscanProvider {
    pub fn new(client: Client, config: &ServicesConfig) -> Self {
        Self {
            client,
            base_url: trim_base(&config.solscan_api_url),
            api_key: config.solscan_api_key.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// 获取地址最近的 `page_size` 笔转账（`data` 数组原样返回）
    pub async fn recent_transfers(&self, address: &str, page_size: usize) -> ApiResult<Vec<Value>> {
        let api_key = require(self.api_key.as_deref(), "SOLSCAN_API_KEY")?;
        let page_size = page_size.to_string();

        let request = self
            .client
            .get(format!("{}/account/transfer", self.base_url))
            .header("token", api_key)
            .query(&[
                ("address", address),
                ("page", "1"),
                ("page_size", page_size.as_str()),
            ]);

        let mut payload = fetch_json(SERVICE, request).await?;
        match payload.get_mut("data").map(Value::take) {
            Some(Value::Array(transfers)) => Ok(transfers),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(ApiError::external(
                SERVICE,
                format!("unexpected transfer payload: {other}"),
            )),
        }
    }
}
