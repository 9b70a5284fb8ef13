//! Area69 - AI 加密货币 API
//!
//! 一个薄薄的 HTTP 门面：每个端点校验少量参数，调用一个第三方服务，
//! 再把结果整理成 JSON 返回。
//!
//! # 外部服务
//!
//! - OpenAI 兼容的补全服务（chat、情绪分析、预测、巨鲸报告）
//! - Solscan 转账记录（巨鲸追踪）
//! - 报价 API（价格、持仓估值、税费估算）
//! - 交易所 K 线（均线交易信号）
//! - 代币审计 API（Anti-Rug 检查）
//!
//! # 命令行接口
//!
//! - `serve`: 启动 API 服务器
//! - `test`: 向本地服务器发送一条 chat 测试消息

mod analysis;
mod commands;
mod config;
mod error;
mod gateway;
mod portfolio;
mod providers;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Area69 CLI
#[derive(Parser)]
#[command(name = "area69")]
#[command(about = "Area69 AI Crypto API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 可用的命令
#[derive(Subcommand)]
enum Commands {
    /// 启动 API 服务器
    Serve,
    /// 向本地服务器发送 chat 测试消息
    Test {
        /// 要发送的消息
        #[arg(short, long, default_value = commands::test::DEFAULT_TEST_MESSAGE)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件（如果存在）
    if let Ok(dotenv_path) = std::env::var("AREA69_ENV_FILE") {
        dotenvy::from_path(&dotenv_path).ok();
    } else {
        dotenvy::dotenv().ok();
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "area69=info,tower_http=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Serve => commands::serve_command(config).await,
        Commands::Test { message } => commands::test_command(config, message).await,
    }
}
