//! Chat 处理器

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::gateway::{prompts::SYSTEM_PROMPT, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    response: String,
}

/// POST /chat
///
/// 补全文本原样返回；消息缺失或为空时不会调用补全服务。
pub async fn handle_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let message = body
        .ok()
        .and_then(|Json(request)| request.message)
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::validation("No message provided"))?;

    let completion = state.completion();
    tracing::info!(provider = completion.name(), chars = message.len(), "chat");

    let response = completion
        .complete(SYSTEM_PROMPT, &message)
        .await
        .map_err(|e| e.context("Server Error"))?;

    Ok(Json(ChatResponse { response }))
}
