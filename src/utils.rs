use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;

/// 外部 API 请求超时（秒）
const UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// 获取共享的 HTTP 客户端，所有外部服务调用共用同一个连接池
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

pub fn get_shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .user_agent(concat!("area69/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client")
    })
}

/// 交易对/代币符号统一为大写
#[inline]
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}
