//! 补全服务的提示词

use serde_json::Value;

pub const SYSTEM_PROMPT: &str = "You are an AI crypto expert with an alien theme.";

pub fn whale_report(transactions: &[Value]) -> String {
    let listing = serde_json::to_string(transactions).unwrap_or_default();
    format!("Analyze these Solana whale transactions and provide an alien-themed report: {listing}")
}

pub fn sentiment(symbol: &str) -> String {
    format!(
        "Analyze the market sentiment for {symbol}. Provide insights on social media sentiment, \
         recent news impact, and trading sentiment."
    )
}

pub fn prediction(symbol: &str, horizon: &str) -> String {
    format!(
        "You are an alien financial oracle from Area69. Provide a {horizon} prediction for {symbol}. \
         Use cosmic foresight to determine price movement, risk levels, and interstellar market sentiment."
    )
}
