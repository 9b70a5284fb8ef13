//! Anti-Rug 代币风险检查

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{non_empty, ApiQuery};
use crate::error::{ApiError, ApiResult};
use crate::gateway::state::AppState;

const DEFAULT_REPORT: &str = "No report available.";

#[derive(Debug, Deserialize)]
pub struct AntiRugQuery {
    contract_address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AntiRugResponse {
    contract_address: String,
    risk_score: Value,
    report: Value,
}

/// GET /anti-rug?contract_address=
pub async fn handle_anti_rug(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AntiRugQuery>,
) -> ApiResult<Json<AntiRugResponse>> {
    let contract_address = non_empty(query.contract_address)
        .ok_or_else(|| ApiError::validation("No contract address provided"))?;

    tracing::info!(contract_address = %contract_address, "token audit");

    let mut audit = state.audits().audit(&contract_address).await?;
    let risk_score = audit.get_mut("risk_score").map(Value::take).unwrap_or(Value::Null);
    let report = audit
        .get_mut("report")
        .map(Value::take)
        .filter(|r| !r.is_null())
        .unwrap_or_else(|| Value::String(DEFAULT_REPORT.to_string()));

    Ok(Json(AntiRugResponse {
        contract_address,
        risk_score,
        report,
    }))
}

#[cfg(test)]
mod tests {
    use crate::config::ServicesConfig;
    use crate::gateway::handlers::test_support::{get, send, state_with};
    use axum::http::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn audit_config(server: &MockServer) -> ServicesConfig {
        ServicesConfig {
            token_audit_api_url: Some(format!("{}/v1/audit/", server.uri())),
            ..ServicesConfig::default()
        }
    }

    #[tokio::test]
    async fn missing_address_is_400_without_outbound_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        for uri in ["/anti-rug", "/anti-rug?contract_address="] {
            let (status, body) = send(state_with(audit_config(&server)), get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({"error": "No contract address provided"}));
        }
    }

    #[tokio::test]
    async fn passes_through_score_and_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/audit/0xabc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "risk_score": 87,
                "report": "Mint authority not renounced."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) =
            send(state_with(audit_config(&server)), get("/anti-rug?contract_address=0xabc")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "contract_address": "0xabc",
                "risk_score": 87,
                "report": "Mint authority not renounced."
            })
        );
    }

    #[tokio::test]
    async fn missing_report_gets_default_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/audit/0xdef"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"risk_score": 3})))
            .mount(&server)
            .await;

        let (_, body) =
            send(state_with(audit_config(&server)), get("/anti-rug?contract_address=0xdef")).await;
        assert_eq!(body["risk_score"], 3);
        assert_eq!(body["report"], "No report available.");
    }

    #[tokio::test]
    async fn upstream_error_is_500_with_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("gateway down"))
            .mount(&server)
            .await;

        let (status, body) =
            send(state_with(audit_config(&server)), get("/anti-rug?contract_address=0x1")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Token Audit API error: HTTP 502: gateway down");
    }
}
