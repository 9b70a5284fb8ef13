//! 市场情绪与预测处理器
//!
//! 两者都只是把主题化的 prompt 交给补全服务，再整理返回文本。

use std::str::FromStr;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{symbol_or_default, ApiPath, ApiQuery};
use crate::analysis::normalize_completion;
use crate::error::{ApiError, ApiResult};
use crate::gateway::{
    prompts::{self, SYSTEM_PROMPT},
    state::AppState,
};

const INVALID_PREDICTION_TYPE: &str = "Invalid prediction type. Use short-term or long-term.";

#[derive(Debug, Deserialize)]
pub struct SymbolQuery {
    symbol: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SentimentResponse {
    symbol: String,
    sentiment_analysis: String,
}

/// GET /sentiment?symbol=
pub async fn handle_sentiment(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SymbolQuery>,
) -> ApiResult<Json<SentimentResponse>> {
    sentiment(&state, symbol_or_default(query.symbol)).await
}

/// GET /sentiment/{symbol}
pub async fn handle_sentiment_for(
    State(state): State<AppState>,
    ApiPath(symbol): ApiPath<String>,
) -> ApiResult<Json<SentimentResponse>> {
    sentiment(&state, symbol_or_default(Some(symbol))).await
}

async fn sentiment(state: &AppState, symbol: String) -> ApiResult<Json<SentimentResponse>> {
    tracing::info!(symbol = %symbol, "sentiment");

    let analysis = state
        .completion()
        .complete(SYSTEM_PROMPT, &prompts::sentiment(&symbol))
        .await?;

    Ok(Json(SentimentResponse {
        symbol,
        sentiment_analysis: normalize_completion(&analysis),
    }))
}

/// 预测周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredictionType {
    #[default]
    ShortTerm,
    LongTerm,
}

impl PredictionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionType::ShortTerm => "short-term",
            PredictionType::LongTerm => "long-term",
        }
    }
}

impl FromStr for PredictionType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short-term" => Ok(PredictionType::ShortTerm),
            "long-term" => Ok(PredictionType::LongTerm),
            _ => Err(ApiError::validation(INVALID_PREDICTION_TYPE)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    symbol: Option<String>,
    #[serde(rename = "type")]
    prediction_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    symbol: String,
    prediction_type: PredictionType,
    prediction: String,
}

/// GET /predict
///
/// `type` 非法时在任何外部调用之前返回 400。
pub async fn handle_predict(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PredictQuery>,
) -> ApiResult<Json<PredictionResponse>> {
    let prediction_type = match query.prediction_type.as_deref() {
        Some(raw) => raw.parse()?,
        None => PredictionType::default(),
    };
    let symbol = symbol_or_default(query.symbol);

    tracing::info!(symbol = %symbol, horizon = prediction_type.as_str(), "prediction");

    let prediction = state
        .completion()
        .complete(
            SYSTEM_PROMPT,
            &prompts::prediction(&symbol, prediction_type.as_str()),
        )
        .await?;

    Ok(Json(PredictionResponse {
        symbol,
        prediction_type,
        prediction: normalize_completion(&prediction),
    }))
}
