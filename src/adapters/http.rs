use crate::domain::ports::FileSource;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// 上游 API 連線設定，啟動時建立後不再變動
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: Url,
    pub token: String,
    pub timeout: Option<Duration>,
}

/// 上游檔案服務的 HTTP 客戶端。
///
/// 每次呼叫只嘗試一次，不重試；逾時由 `reqwest` 傳輸層處理。
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    config: UpstreamConfig,
    client: Client,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::ConfigError {
                message: format!("Upstream base URL cannot be a base: {}", self.config.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Response> {
        tracing::debug!("📡 GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.config.token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("fetch error for {}: {}", url, e);
                AppError::Http(e)
            })?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            tracing::error!("fetch error for {}: responded with status {}", url, status);
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl FileSource for UpstreamClient {
    async fn list_files(&self) -> Result<serde_json::Value> {
        let url = self.endpoint(&["v1", "secret", "files"])?;
        let body = self.get(url).await?.json::<serde_json::Value>().await?;
        Ok(body)
    }

    async fn fetch_file(&self, name: &str) -> Result<String> {
        let url = self.endpoint(&["v1", "secret", "file", name])?;
        let body = self.get(url).await?.text().await?;
        Ok(body)
    }
}
