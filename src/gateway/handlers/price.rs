//! 价格与交易信号处理器

use axum::{extract::State, Json};
use serde::Serialize;

use super::ApiPath;
use crate::analysis::{moving_average_signal, TradeSignal};
use crate::error::{ApiError, ApiResult};
use crate::gateway::state::AppState;
use crate::utils::normalize_symbol;

/// 均线窗口：最近 14 根 K 线
const SIGNAL_WINDOW: usize = 14;

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    crypto: String,
    price_usd: f64,
}

/// GET /price/{symbol}
pub async fn handle_price(
    State(state): State<AppState>,
    ApiPath(symbol): ApiPath<String>,
) -> ApiResult<Json<PriceResponse>> {
    let symbol = normalize_symbol(&symbol);
    tracing::info!(symbol = %symbol, "price");

    let price_usd = state
        .prices()
        .quote_usd(&symbol)
        .await?
        .ok_or_else(|| ApiError::not_found("Crypto not found"))?;

    Ok(Json(PriceResponse {
        crypto: symbol,
        price_usd,
    }))
}

#[derive(Debug, Serialize)]
pub struct TradeSignalResponse {
    crypto_pair: String,
    trade_signal: TradeSignal,
    avg_price: f64,
}

/// GET /trade-signal/{pair}
pub async fn handle_trade_signal(
    State(state): State<AppState>,
    ApiPath(pair): ApiPath<String>,
) -> ApiResult<Json<TradeSignalResponse>> {
    let pair = normalize_symbol(&pair);

    let closes = state.candles().recent_closes(&pair, SIGNAL_WINDOW).await?;
    let (trade_signal, avg_price) = moving_average_signal(&closes).ok_or_else(|| {
        ApiError::external("Exchange API", format!("no candle data for {pair}"))
    })?;

    tracing::info!(pair = %pair, signal = trade_signal.as_str(), avg_price, "trade signal");

    Ok(Json(TradeSignalResponse {
        crypto_pair: pair,
        trade_signal,
        avg_price,
    }))
}

#[cfg(test)]
mod tests {
    use crate::config::ServicesConfig;
    use crate::gateway::handlers::test_support::{get, send, state_with};
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn quote_server(payload: Value) -> (MockServer, ServicesConfig) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/pricemulti"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&server)
            .await;
        let config = ServicesConfig {
            price_api_url: Some(format!("{}/data/pricemulti", server.uri())),
            ..ServicesConfig::default()
        };
        (server, config)
    }

    #[tokio::test]
    async fn price_is_exact_downstream_value() {
        let (_server, config) = quote_server(json!({"BTC": {"USD": 64123.45}})).await;

        let (status, body) = send(state_with(config), get("/price/btc")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"crypto": "BTC", "price_usd": 64123.45}));
    }

    #[tokio::test]
    async fn unknown_symbol_is_404() {
        let (_server, config) = quote_server(json!({})).await;

        let (status, body) = send(state_with(config), get("/price/NOPE")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Crypto not found"}));
    }

    #[tokio::test]
    async fn non_numeric_quote_is_500() {
        let (_server, config) = quote_server(json!({"BTC": "x"})).await;

        let (status, body) = send(state_with(config), get("/price/BTC")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Price API error: unexpected quote payload for BTC: \"x\""})
        );
    }

    #[tokio::test]
    async fn undecodable_path_is_json_400() {
        let (status, body) = send(state_with(ServicesConfig::default()), get("/price/%FF")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn unconfigured_price_api_is_500() {
        let (status, body) = send(state_with(ServicesConfig::default()), get("/price/BTC")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Configuration error: PRICE_API_URL is not set");
    }

    fn klines(closes: &[f64]) -> Value {
        Value::Array(
            closes
                .iter()
                .map(|c| json!([0, "0", "0", "0", c.to_string(), "0"]))
                .collect(),
        )
    }

    async fn signal_for(closes: &[f64]) -> (StatusCode, Value) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/klines"))
            .and(query_param("symbol", "BTCUSDT"))
            .and(query_param("limit", "14"))
            .respond_with(ResponseTemplate::new(200).set_body_json(klines(closes)))
            .expect(1)
            .mount(&server)
            .await;
        let config = ServicesConfig {
            exchange_api_url: server.uri(),
            ..ServicesConfig::default()
        };
        send(state_with(config), get("/trade-signal/btcusdt")).await
    }

    #[tokio::test]
    async fn latest_below_average_is_sell() {
        let mut closes = vec![110.0; 13];
        closes.push(100.0);
        let (status, body) = signal_for(&closes).await;

        let avg = (110.0 * 13.0 + 100.0) / 14.0;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["crypto_pair"], "BTCUSDT");
        assert_eq!(body["trade_signal"], "SELL");
        assert!((body["avg_price"].as_f64().unwrap() - avg).abs() < 1e-9);
    }

    #[tokio::test]
    async fn latest_equal_to_average_is_buy() {
        let (status, body) = signal_for(&[250.0; 14]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["trade_signal"], "BUY");
        assert_eq!(body["avg_price"], 250.0);
    }

    #[tokio::test]
    async fn nan_close_is_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/klines"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([[0, "0", "0", "0", "NaN", "0"]])),
            )
            .mount(&server)
            .await;
        let config = ServicesConfig {
            exchange_api_url: server.uri(),
            ..ServicesConfig::default()
        };

        let (status, body) = send(state_with(config), get("/trade-signal/BTCUSDT")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Exchange API error: candle without close price"));
    }

    #[tokio::test]
    async fn empty_candles_is_500() {
        let (status, body) = signal_for(&[]).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Exchange API error: no candle data for BTCUSDT");
    }
}
