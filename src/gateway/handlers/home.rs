//! 首页、健康检查和 404 处理器

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::ApiError;
use crate::gateway::state::{AppState, ServiceStatus};

const HOME_BANNER: &str = "🚀 Area69 AI Crypto API is Running";

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    services: ServiceStatus,
}

/// GET /
pub async fn handle_home() -> &'static str {
    HOME_BANNER
}

/// GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        services: state.service_status(),
    })
}

/// 未匹配的路径或方法
pub async fn handle_not_found() -> ApiError {
    ApiError::not_found("Not found")
}
