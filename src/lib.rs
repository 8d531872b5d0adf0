pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::http::{UpstreamClient, UpstreamConfig};
pub use config::Settings;
pub use crate::core::{
    aggregator::FilesAggregator, file_parser::parse_file_response, line_parser::parse_line,
};
pub use server::{create_router, AppState};
pub use utils::error::{AppError, Result};
