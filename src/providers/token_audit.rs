//! 代币审计 API 客户端

use reqwest::Client;
use serde_json::Value;

use super::{fetch_json, require};
use crate::config::ServicesConfig;
use crate::error::ApiResult;

const SERVICE: &str = "Token Audit API";

pub struct TokenAuditProvider {
    client: Client,
    base_url: Option<String>,
}

impl TokenAuditProvider {
    pub fn new(client: Client, config: &ServicesConfig) -> Self {
        Self {
            client,
            base_url: config.token_audit_api_url.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// 合约地址直接拼接在 base URL 之后
    pub async fn audit(&self, contract_address: &str) -> ApiResult<Value> {
        let base_url = require(self.base_url.as_deref(), "TOKEN_AUDIT_API_URL")?;
        let url = format!("{}{}", base_url, urlencoding::encode(contract_address));
        fetch_json(SERVICE, self.client.get(url)).await
    }
}
