use crate::config::toml_config::TomlConfig;
use crate::config::{Settings, SettingsOverrides};
use crate::utils::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "csv-relay")]
#[command(about = "Relays CSV files from the upstream file API as parsed JSON")]
pub struct CliArgs {
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "APP_ENV")]
    pub environment: Option<String>,

    #[arg(long, env = "UPSTREAM_BASE_URL")]
    pub upstream_base_url: Option<String>,

    #[arg(long, env = "UPSTREAM_TOKEN", hide_env_values = true)]
    pub upstream_token: Option<String>,

    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            port: self.port,
            environment: self.environment.clone(),
            upstream_base_url: self.upstream_base_url.clone(),
            upstream_token: self.upstream_token.clone(),
            request_timeout_secs: self.request_timeout_secs,
        }
    }

    pub fn load_settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading config file {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };
        Ok(Settings::resolve(self.overrides(), file))
    }
}
