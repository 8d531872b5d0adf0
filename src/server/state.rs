use crate::adapters::http::UpstreamClient;
use crate::config::Settings;
use crate::core::aggregator::FilesAggregator;
use crate::core::file_parser::TracingDiagnostics;
use crate::domain::ports::FileSource;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Instant;

/// 各請求共用的唯讀狀態
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn FileSource>,
    pub aggregator: FilesAggregator,
    pub environment: String,
    pub production: bool,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(source: Arc<dyn FileSource>, settings: &Settings) -> Self {
        let aggregator = FilesAggregator::new(source.clone(), Arc::new(TracingDiagnostics));
        Self {
            source,
            aggregator,
            environment: settings.environment.clone(),
            production: settings.is_production(),
            started_at: Instant::now(),
        }
    }

    /// 以上游 HTTP 客戶端建立狀態
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = UpstreamClient::new(settings.upstream_config()?)?;
        Ok(Self::new(Arc::new(client), settings))
    }
}
