//! 巨鲸追踪处理器

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{non_empty, ApiQuery};
use crate::analysis::{normalize_completion, whale_transfers};
use crate::error::{ApiError, ApiResult};
use crate::gateway::{
    prompts::{self, SYSTEM_PROMPT},
    state::AppState,
    wallets::EXAMPLE_WALLETS,
};

const DEFAULT_THRESHOLD: f64 = 10_000.0;
/// 每次只看最近的 10 笔转账
const TRANSFER_PAGE_SIZE: usize = 10;
const MAX_REPORTED: usize = 5;
const NO_ACTIVITY_MESSAGE: &str = "No whale activity detected within the galactic threshold.";

#[derive(Debug, Deserialize)]
pub struct WhaleQuery {
    threshold: Option<String>,
    address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WhaleReport {
    Quiet {
        message: &'static str,
    },
    Detected {
        wallet: String,
        whale_transactions: Vec<Value>,
        analysis: String,
    },
}

/// GET /whale-tracking
pub async fn handle_whale_tracking(
    State(state): State<AppState>,
    query: Result<ApiQuery<WhaleQuery>, ApiError>,
) -> ApiResult<Json<WhaleReport>> {
    let report = match query {
        Ok(ApiQuery(query)) => track(&state, query).await,
        Err(e) => Err(e),
    };
    report
        .map(Json)
        .map_err(|e| e.context("Whale Tracking Failed"))
}

async fn track(state: &AppState, query: WhaleQuery) -> ApiResult<WhaleReport> {
    let threshold = parse_threshold(query.threshold)?;
    let wallet = non_empty(query.address)
        .unwrap_or_else(|| state.wallet_picker().pick(EXAMPLE_WALLETS).to_string());

    tracing::info!(wallet = %wallet, threshold, "whale tracking");

    let transfers = state
        .transfers()
        .recent_transfers(&wallet, TRANSFER_PAGE_SIZE)
        .await?;
    let whales = whale_transfers(transfers, threshold, MAX_REPORTED);

    if whales.is_empty() {
        return Ok(WhaleReport::Quiet {
            message: NO_ACTIVITY_MESSAGE,
        });
    }

    let analysis = state
        .completion()
        .complete(SYSTEM_PROMPT, &prompts::whale_report(&whales))
        .await?;

    Ok(WhaleReport::Detected {
        wallet,
        whale_transactions: whales,
        analysis: normalize_completion(&analysis),
    })
}

fn parse_threshold(raw: Option<String>) -> ApiResult<f64> {
    let Some(raw) = non_empty(raw) else {
        return Ok(DEFAULT_THRESHOLD);
    };
    raw.parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| ApiError::validation(format!("Invalid threshold: {raw}")))
}
