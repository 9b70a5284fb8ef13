//! Gateway 应用层
//!
//! HTTP 服务器、路由表和请求处理

mod handlers;
mod middleware;
mod prompts;
mod state;
mod wallets;

pub use state::AppState;

use anyhow::Result;
use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub async fn serve(config: Config) -> Result<()> {
    config.warn_missing();

    let state = AppState::from_config(&config.services);
    let app = build_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 路由表：每个 (方法, 路径) 对应唯一 handler，未匹配的请求统一返回 404
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_home))
        .route("/health", get(handlers::handle_health))
        .route("/chat", post(handlers::handle_chat))
        .route("/whale-tracking", get(handlers::handle_whale_tracking))
        .route("/sentiment", get(handlers::handle_sentiment))
        .route("/sentiment/{symbol}", get(handlers::handle_sentiment_for))
        .route("/predict", get(handlers::handle_predict))
        .route("/anti-rug", get(handlers::handle_anti_rug))
        .route("/price/{symbol}", get(handlers::handle_price))
        .route("/trade-signal/{pair}", get(handlers::handle_trade_signal))
        .route("/portfolio/add", post(handlers::handle_portfolio_add))
        .route("/portfolio/value", get(handlers::handle_portfolio_value))
        .route("/crypto-taxes", get(handlers::handle_crypto_taxes))
        .fallback(handlers::handle_not_found)
        .method_not_allowed_fallback(handlers::handle_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_logger))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
                )),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    tokio::select! {
        _ = ctrl_c => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
