//! 错误类型
//!
//! 所有 handler 的失败都收敛到 `ApiError`，在 handler 边界转换为 JSON 错误对象：
//!
//! - `Validation`：调用方输入缺失或非法 → 400
//! - `Configuration`：缺少外部服务凭据或地址 → 500
//! - `ExternalService`：下游 API 网络错误、非 2xx 状态或载荷格式错误 → 500
//! - `NotFound`：下游数据中不存在请求的资源 → 404

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{service} error: {message}")]
    ExternalService {
        service: &'static str,
        message: String,
    },

    #[error("{0}")]
    NotFound(String),

    /// 带前缀的错误，状态码沿用内部错误
    #[error("{context}: {source}")]
    Context {
        context: &'static str,
        source: Box<ApiError>,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn external(service: &'static str, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// 为错误加上面向调用方的前缀，例如 "Whale Tracking Failed"
    pub fn context(self, context: &'static str) -> Self {
        Self::Context {
            context,
            source: Box::new(self),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Configuration(_) | Self::ExternalService { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Context { source, .. } => source.status(),
        }
    }
}

/// 查询参数无法解析时同样以 JSON 错误返回
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{error}");
        } else {
            tracing::warn!(status = status.as_u16(), "{error}");
        }

        (status, Json(ErrorBody { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_taxonomy() {
        assert_eq!(
            ApiError::validation("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("gone").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::configuration("missing key").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::external("Solscan", "HTTP 502").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn context_keeps_inner_status_and_prefixes_message() {
        let err = ApiError::external("Solscan", "HTTP 503: busy").context("Whale Tracking Failed");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Whale Tracking Failed: Solscan error: HTTP 503: busy"
        );

        let err = ApiError::validation("Invalid threshold").context("Whale Tracking Failed");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
