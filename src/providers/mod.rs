//! 外部服务抽象层
//!
//! 每个 handler 只通过这里的客户端访问第三方 API。补全服务和报价服务
//! 以 trait 形式注入，便于在测试中替换；其余客户端只需指向 mock 地址即可。

pub mod exchange;
pub mod openai;
pub mod quotes;
pub mod solscan;
pub mod token_audit;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

pub use exchange::ExchangeProvider;
pub use openai::OpenAiProvider;
pub use quotes::QuoteApiProvider;
pub use solscan::SolscanProvider;
pub use token_audit::TokenAuditProvider;

/// 补全服务：给定系统指令和用户输入，返回生成文本
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// 服务名称（用于日志和错误信息）
    fn name(&self) -> &'static str;
    async fn complete(&self, system: &str, prompt: &str) -> ApiResult<String>;
}

/// 报价服务：查询单个代币的美元价格
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// 下游数据中没有该代币时返回 `Ok(None)`
    async fn quote_usd(&self, symbol: &str) -> ApiResult<Option<f64>>;
}

/// 发送请求并解析 JSON 响应
///
/// 网络错误、非 2xx 状态和非法 JSON 都转换为 `ExternalService` 错误，
/// 错误信息包含下游状态码和响应文本。
pub(crate) async fn fetch_json(service: &'static str, request: RequestBuilder) -> ApiResult<Value> {
    let response = request.send().await.map_err(|e| {
        tracing::warn!(service, "upstream request failed: {e}");
        ApiError::external(service, format!("request failed: {e}"))
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(service, status = status.as_u16(), "upstream returned error");
        return Err(ApiError::external(
            service,
            format!("HTTP {}: {}", status.as_u16(), body),
        ));
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::external(service, format!("invalid JSON payload: {e}")))
}

/// 缺少必需配置时的统一错误
pub(crate) fn require<'a>(value: Option<&'a str>, name: &str) -> ApiResult<&'a str> {
    value.ok_or_else(|| ApiError::configuration(format!("{name} is not set")))
}

/// 去掉 base URL 末尾的 `/`，便于拼接路径
pub(crate) fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
