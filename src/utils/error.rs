use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("responded with status: {status}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Invalid file listing: {message}")]
    InvalidListing { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

impl AppError {
    /// 上游相關錯誤（連線失敗、非 2xx 狀態、清單格式不符）
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::Http(_) | AppError::UpstreamStatus { .. } | AppError::InvalidListing { .. }
        )
    }

    /// 給操作人員的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::Http(_) => "Check network connectivity to the upstream API",
            AppError::UpstreamStatus { status, .. } if *status == 401 || *status == 403 => {
                "Check the upstream bearer token (--upstream-token / UPSTREAM_TOKEN)"
            }
            AppError::UpstreamStatus { .. } => "The upstream API rejected the request; retry later",
            AppError::InvalidListing { .. } => {
                "The upstream listing format changed; verify the base URL"
            }
            AppError::Io(_) => "Check file paths and permissions (config file, bind address)",
            AppError::Serialization(_) => "Report this as a bug",
            AppError::ConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::ConfigValidationError { .. } => {
                "Review the command line flags, environment variables and TOML config"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
