//! Gateway 中间件

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::Instrument;

/// 全局请求计数器，用于生成 request_id
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

const REQUEST_ID_HEADER: &str = "x-request-id";

/// 请求日志中间件
///
/// 每个请求一个 span，结束时记录状态码和耗时，并在响应头中回写 request_id。
pub async fn request_logger(request: Request, next: Next) -> Response {
    let request_id = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!("req", id = request_id, %method, %path);

    async move {
        let start = Instant::now();
        let mut response = next.run(request).await;
        let latency_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), latency_ms, "failed");
        } else {
            tracing::info!(status = status.as_u16(), latency_ms, "done");
        }

        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, HeaderValue::from(request_id));
        response
    }
    .instrument(span)
    .await
}
