#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::UpstreamConfig;
use crate::utils::error::{AppError, Result};
use std::time::Duration;
use toml_config::TomlConfig;
use url::Url;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://echo-serv.tbxnet.com";
pub const DEFAULT_UPSTREAM_TOKEN: &str = "aSuperSecretKey";

/// 命令列或環境變數提供的值，未提供者為 `None`
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub port: Option<u16>,
    pub environment: Option<String>,
    pub upstream_base_url: Option<String>,
    pub upstream_token: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

/// 解析完成的服務設定，啟動後不再變動
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub port: u16,
    pub environment: String,
    pub upstream_base_url: String,
    pub upstream_token: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_token: DEFAULT_UPSTREAM_TOKEN.to_string(),
            request_timeout_secs: None,
        }
    }
}

// token 不印出
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("upstream_base_url", &self.upstream_base_url)
            .field("upstream_token", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Settings {
    /// 優先順序：命令列/環境變數 > TOML > 預設值
    pub fn resolve(overrides: SettingsOverrides, file: Option<TomlConfig>) -> Self {
        let defaults = Settings::default();
        let (server, upstream) = match file {
            Some(file) => (file.server.unwrap_or_default(), file.upstream.unwrap_or_default()),
            None => Default::default(),
        };

        Self {
            port: overrides.port.or(server.port).unwrap_or(defaults.port),
            environment: overrides
                .environment
                .or(server.environment)
                .unwrap_or(defaults.environment),
            upstream_base_url: overrides
                .upstream_base_url
                .or(upstream.base_url)
                .unwrap_or(defaults.upstream_base_url),
            upstream_token: overrides
                .upstream_token
                .or(upstream.token)
                .unwrap_or(defaults.upstream_token),
            request_timeout_secs: overrides.request_timeout_secs.or(upstream.timeout_seconds),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(
            self.environment.to_ascii_lowercase().as_str(),
            "production" | "prod"
        )
    }

    pub fn upstream_config(&self) -> Result<UpstreamConfig> {
        Ok(UpstreamConfig {
            base_url: self.base_url()?,
            token: self.upstream_token.clone(),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        })
    }

    /// 啟動前檢查；任何一項不合法都不啟動服務
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        require_non_empty("upstream.token", &self.upstream_token)?;
        require_non_empty("server.environment", &self.environment)?;

        if self.request_timeout_secs == Some(0) {
            return Err(invalid_value(
                "upstream.timeout_seconds",
                "0",
                "Value must be at least 1",
            ));
        }

        Ok(())
    }

    /// 上游位址只接受 http/https
    fn base_url(&self) -> Result<Url> {
        const FIELD: &str = "upstream.base_url";
        let raw = self.upstream_base_url.as_str();

        if raw.is_empty() {
            return Err(invalid_value(FIELD, raw, "URL cannot be empty"));
        }

        let url = Url::parse(raw)
            .map_err(|e| invalid_value(FIELD, raw, format!("Invalid URL format: {}", e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(invalid_value(
                FIELD,
                raw,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        }
    }
}

fn invalid_value(field: &str, value: &str, reason: impl Into<String>) -> AppError {
    AppError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        // 不把原值（可能是憑證）寫進錯誤訊息
        return Err(invalid_value(
            field,
            "<empty>",
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}
