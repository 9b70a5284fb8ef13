//! HTTP 请求处理器
//!
//! 每个 handler 只做三件事：校验参数、调用外部服务、重组 JSON。
//! 错误统一以 `ApiError` 返回，由其 `IntoResponse` 实现转换为 `{"error": ...}`。

pub mod anti_rug;
pub mod chat;
pub mod home;
pub mod market;
pub mod portfolio;
pub mod price;
pub mod whale;

#[cfg(test)]
pub(crate) mod test_support;

pub use anti_rug::handle_anti_rug;
pub use chat::handle_chat;
pub use home::{handle_health, handle_home, handle_not_found};
pub use market::{handle_predict, handle_sentiment, handle_sentiment_for};
pub use portfolio::{handle_crypto_taxes, handle_portfolio_add, handle_portfolio_value};
pub use price::{handle_price, handle_trade_signal};
pub use whale::handle_whale_tracking;

use axum::extract::{FromRequestParts, Path, Query};

use crate::error::ApiError;

/// `Query` 的包装，解析失败时返回 `{"error": ...}` 而不是纯文本
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `Path` 的包装，拒绝处理同 `ApiQuery`
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// 可选的字符串参数：去掉首尾空白，空串视为未提供
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 代币符号参数，缺省为 BTC；大小写原样保留
fn symbol_or_default(symbol: Option<String>) -> String {
    non_empty(symbol).unwrap_or_else(|| "BTC".to_string())
}
