//! handler 测试共用的假实现和请求工具

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::ServicesConfig;
use crate::error::{ApiError, ApiResult};
use crate::gateway::state::AppState;
use crate::gateway::wallets::WalletPicker;
use crate::gateway::build_router;
use crate::providers::{CompletionProvider, PriceProvider};

/// 记录调用次数和最后一次 prompt 的补全服务
pub struct FakeCompletion {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeCompletion {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeCompletion {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn complete(&self, _system: &str, prompt: &str) -> ApiResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply
            .clone()
            .map_err(|message| ApiError::external("fake", message))
    }
}

/// 固定报价表
pub struct FakePrices(pub HashMap<&'static str, f64>);

#[async_trait]
impl PriceProvider for FakePrices {
    async fn quote_usd(&self, symbol: &str) -> ApiResult<Option<f64>> {
        Ok(self.0.get(symbol).copied())
    }
}

/// 总是选择第 n 个候选
pub struct FixedPicker(pub usize);

impl WalletPicker for FixedPicker {
    fn pick(&self, candidates: &[&'static str]) -> &'static str {
        candidates[self.0]
    }
}

pub fn base_state() -> AppState {
    AppState::from_config(&ServicesConfig::default())
}

pub fn state_with(config: ServicesConfig) -> AppState {
    AppState::from_config(&config)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// 经由完整路由发送请求；非 JSON 响应体以字符串形式返回
pub async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = build_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}
