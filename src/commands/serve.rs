//! Serve 命令 - 启动 API 服务器

use anyhow::Result;

use crate::config::Config;
use crate::gateway;

/// 启动 HTTP 服务器，直到收到 Ctrl+C 或 SIGTERM 后优雅关闭
pub async fn serve_command(config: Config) -> Result<()> {
    tracing::info!(
        model = %config.services.openai_model,
        "Area69 AI Crypto API v{}",
        env!("CARGO_PKG_VERSION")
    );
    gateway::serve(config).await
}
