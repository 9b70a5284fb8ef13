//! 持仓与税费估算处理器
//!
//! 用户没有持仓时仍返回 200，响应体为 `{"error": ...}` 提示对象。

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{non_empty, ApiQuery};
use crate::error::{ApiError, ApiResult};
use crate::gateway::state::AppState;
use crate::portfolio::{valuate, Valuation, DEFAULT_USER_ID, TAX_RATE};
use crate::utils::normalize_symbol;

const NO_PORTFOLIO: &str = "No portfolio found for this user.";

#[derive(Debug, Deserialize)]
pub struct AddHoldingRequest {
    user_id: Option<String>,
    crypto_symbol: Option<String>,
    amount: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PortfolioReply<T> {
    Found(T),
    Missing { error: &'static str },
}

#[derive(Debug, Serialize)]
pub struct ValueResponse {
    total_value: f64,
    details: String,
}

#[derive(Debug, Serialize)]
pub struct TaxResponse {
    estimated_tax: f64,
    tax_rate: f64,
}

fn user_or_default(user_id: Option<String>) -> String {
    non_empty(user_id).unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}

/// POST /portfolio/add
pub async fn handle_portfolio_add(
    State(state): State<AppState>,
    body: Result<Json<AddHoldingRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) =
        body.map_err(|e| ApiError::validation(format!("Invalid request body: {}", e.body_text())))?;

    let symbol = non_empty(request.crypto_symbol)
        .map(|s| normalize_symbol(&s))
        .ok_or_else(|| ApiError::validation("No crypto_symbol provided"))?;
    let amount = request
        .amount
        .filter(|a| a.is_finite() && *a >= 0.0)
        .ok_or_else(|| ApiError::validation("amount must be a non-negative number"))?;
    let user_id = user_or_default(request.user_id);

    state.portfolios().upsert(&user_id, &symbol, amount);
    tracing::info!(user_id = %user_id, symbol = %symbol, amount, "portfolio updated");

    Ok(Json(MessageResponse {
        message: format!("Set {symbol} holding to {amount} for {user_id}."),
    }))
}

/// 读取并估值用户持仓；无持仓时返回 `None`
async fn valuate_user(state: &AppState, user_id: Option<String>) -> ApiResult<Option<Valuation>> {
    let user_id = user_or_default(user_id);
    let Some(holdings) = state.portfolios().holdings(&user_id) else {
        return Ok(None);
    };

    let valuation = valuate(&holdings, state.prices()).await?;
    tracing::info!(
        user_id = %user_id,
        positions = valuation.positions.len(),
        total_value = valuation.total_value,
        "portfolio valued"
    );
    Ok(Some(valuation))
}

/// GET /portfolio/value
pub async fn handle_portfolio_value(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> ApiResult<Json<PortfolioReply<ValueResponse>>> {
    let reply = match valuate_user(&state, query.user_id).await? {
        Some(valuation) => PortfolioReply::Found(ValueResponse {
            total_value: valuation.total_value,
            details: valuation.details(),
        }),
        None => PortfolioReply::Missing {
            error: NO_PORTFOLIO,
        },
    };
    Ok(Json(reply))
}

/// GET /crypto-taxes
pub async fn handle_crypto_taxes(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> ApiResult<Json<PortfolioReply<TaxResponse>>> {
    let reply = match valuate_user(&state, query.user_id).await? {
        Some(valuation) => PortfolioReply::Found(TaxResponse {
            estimated_tax: valuation.estimated_tax(),
            tax_rate: TAX_RATE,
        }),
        None => PortfolioReply::Missing {
            error: NO_PORTFOLIO,
        },
    };
    Ok(Json(reply))
}
