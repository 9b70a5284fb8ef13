//! 应用配置模块
//!
//! 配置来源按优先级从低到高：
//! - 内置默认值
//! - `AREA69_CONFIG` 指向的 TOML 文件（`[server]` 与 `[services]` 两节）
//! - 环境变量
//!
//! 外部服务的凭据和地址在启动时只做格式校验；缺失时由用到它们的 handler
//! 在调用时报告配置错误，而不是静默使用默认值。

use anyhow::{Context, Result};
use reqwest::Url;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo";
const DEFAULT_SOLSCAN_API_URL: &str = "https://pro-api.solscan.io/v2.0";
const DEFAULT_EXCHANGE_API_URL: &str = "https://api.binance.com";

/// 应用配置
#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器监听地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 外部服务配置
    pub services: ServicesConfig,
}

/// 外部服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub solscan_api_key: Option<String>,
    pub solscan_api_url: String,
    pub price_api_url: Option<String>,
    pub token_audit_api_url: Option<String>,
    pub exchange_api_url: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            solscan_api_key: None,
            solscan_api_url: DEFAULT_SOLSCAN_API_URL.to_string(),
            price_api_url: None,
            token_audit_api_url: None,
            exchange_api_url: DEFAULT_EXCHANGE_API_URL.to_string(),
        }
    }
}

/// TOML 文件结构
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    server: ServerSection,
    services: ServicesConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

impl Config {
    /// 从 TOML 文件（可选）和环境变量加载配置
    ///
    /// # 环境变量
    ///
    /// - `AREA69_CONFIG`: TOML 配置文件路径（可选）
    /// - `AREA69_HOST` / `AREA69_PORT`: 监听地址和端口（默认 0.0.0.0:5000）
    /// - `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL`
    /// - `SOLSCAN_API_KEY`, `SOLSCAN_API_URL`
    /// - `PRICE_API_URL`, `TOKEN_AUDIT_API_URL`, `EXCHANGE_API_URL`
    pub fn load() -> Result<Self> {
        let file = match std::env::var("AREA69_CONFIG") {
            Ok(path) => Some(read_file(Path::new(&path))?),
            Err(_) => None,
        };
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    fn from_sources(
        file: Option<FileConfig>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();
        // 空字符串视为未设置
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = env("AREA69_HOST")
            .or(file.server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match env("AREA69_PORT") {
            Some(raw) => raw
                .parse()
                .context("AREA69_PORT must be a valid port number")?,
            None => file.server.port.unwrap_or(DEFAULT_PORT),
        };

        let mut services = file.services;
        override_opt(&mut services.openai_api_key, env("OPENAI_API_KEY"));
        override_val(&mut services.openai_base_url, env("OPENAI_BASE_URL"));
        override_val(&mut services.openai_model, env("OPENAI_MODEL"));
        override_opt(&mut services.solscan_api_key, env("SOLSCAN_API_KEY"));
        override_val(&mut services.solscan_api_url, env("SOLSCAN_API_URL"));
        override_opt(&mut services.price_api_url, env("PRICE_API_URL"));
        override_opt(&mut services.token_audit_api_url, env("TOKEN_AUDIT_API_URL"));
        override_val(&mut services.exchange_api_url, env("EXCHANGE_API_URL"));

        let config = Self {
            host,
            port,
            services: services.normalized(),
        };
        config.validate()?;
        Ok(config)
    }

    /// 校验所有已配置的 URL
    fn validate(&self) -> Result<()> {
        let s = &self.services;
        let urls = [
            ("OPENAI_BASE_URL", Some(&s.openai_base_url)),
            ("SOLSCAN_API_URL", Some(&s.solscan_api_url)),
            ("EXCHANGE_API_URL", Some(&s.exchange_api_url)),
            ("PRICE_API_URL", s.price_api_url.as_ref()),
            ("TOKEN_AUDIT_API_URL", s.token_audit_api_url.as_ref()),
        ];

        for (name, value) in urls {
            if let Some(value) = value {
                Url::parse(value).with_context(|| format!("{name} is not a valid URL: {value}"))?;
            }
        }
        Ok(())
    }

    /// 对缺失的可选配置给出提示
    pub fn warn_missing(&self) {
        let s = &self.services;
        let missing = [
            ("OPENAI_API_KEY", s.openai_api_key.is_none(), "/chat, /whale-tracking, /sentiment, /predict"),
            ("SOLSCAN_API_KEY", s.solscan_api_key.is_none(), "/whale-tracking"),
            ("PRICE_API_URL", s.price_api_url.is_none(), "/price, /portfolio/value, /crypto-taxes"),
            ("TOKEN_AUDIT_API_URL", s.token_audit_api_url.is_none(), "/anti-rug"),
        ];

        for (name, is_missing, endpoints) in missing {
            if is_missing {
                tracing::warn!("{name} is not set; {endpoints} will fail until it is configured");
            }
        }
    }
}

impl ServicesConfig {
    fn normalized(mut self) -> Self {
        for opt in [
            &mut self.openai_api_key,
            &mut self.solscan_api_key,
            &mut self.price_api_url,
            &mut self.token_audit_api_url,
        ] {
            if opt.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *opt = None;
            }
        }
        self
    }
}

fn override_opt(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

fn override_val(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
}
