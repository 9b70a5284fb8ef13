//! OpenAI 兼容的 Chat Completions 客户端

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::{fetch_json, require, trim_base, CompletionProvider};
use crate::config::ServicesConfig;
use crate::error::{ApiError, ApiResult};

const SERVICE: &str = "OpenAI";

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiProvider {
    pub fn new(client: Client, config: &ServicesConfig) -> Self {
        Self {
            client,
            base_url: trim_base(&config.openai_base_url),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// 取出 `choices[0].message.content`
fn extract_content(response: &Value) -> ApiResult<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ApiError::external(SERVICE, "completion payload has no message content"))
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        SERVICE
    }

    async fn complete(&self, system: &str, prompt: &str) -> ApiResult<String> {
        let api_key = require(self.api_key.as_deref(), "OPENAI_API_KEY")?;

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt},
            ],
        });

        tracing::debug!(model = %self.model, "completion request");

        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body);

        let response = fetch_json(SERVICE, request).await?;
        extract_content(&response)
    }
}
