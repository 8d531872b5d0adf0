use crate::core::file_parser::parse_file_response;
use crate::domain::model::{AggregateOutcome, AggregateResponse, FileListing, FileResult};
use crate::domain::ports::{DiagnosticSink, FileSource};
use crate::utils::error::{AppError, Result};
use std::sync::Arc;

const CSV_SUFFIX: &str = ".csv";

/// 補上 `.csv` 副檔名（已存在則不變）
pub fn normalize_filter(name: &str) -> String {
    if name.ends_with(CSV_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, CSV_SUFFIX)
    }
}

/// 取得清單、下載每個 CSV 檔並組合成單一回應。
///
/// 檔案依清單順序逐一處理；單一檔案下載失敗只會記錄在該檔的 `error`
/// 與回應層級的 `errors`，不會中斷整個請求。只有清單取得失敗才回傳 `Err`。
#[derive(Clone)]
pub struct FilesAggregator {
    source: Arc<dyn FileSource>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl FilesAggregator {
    pub fn new(source: Arc<dyn FileSource>, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            source,
            diagnostics,
        }
    }

    pub async fn aggregate(&self, filter: Option<&str>) -> Result<AggregateOutcome> {
        let filter = filter.filter(|f| !f.is_empty());

        let listing = self.fetch_listing().await?;
        let all_files = listing.files;
        tracing::debug!("📡 Upstream listed {} files", all_files.len());

        let mut targets: Vec<&String> = all_files
            .iter()
            .filter(|name| name.ends_with(CSV_SUFFIX))
            .collect();

        if let Some(requested) = filter {
            let target = normalize_filter(requested);
            targets.retain(|name| **name == target);

            if targets.is_empty() {
                tracing::info!("🔍 Requested file '{}' not found in listing", requested);
                return Ok(AggregateOutcome::FileNotFound {
                    requested: requested.to_string(),
                    available_files: all_files,
                });
            }
        }

        let mut files = Vec::with_capacity(targets.len());
        let mut errors = Vec::new();

        for name in targets {
            match self.source.fetch_file(name).await {
                Ok(content) => {
                    let parsed = parse_file_response(name, &content, self.diagnostics.as_ref());
                    tracing::debug!("📄 {}: {} valid lines", name, parsed.lines.len());
                    files.push(parsed);
                }
                Err(e) => {
                    tracing::error!("❌ Failed to process file {}: {}", name, e);
                    errors.push(format!("{}: {}", name, e));
                    files.push(FileResult::failed(
                        name.as_str(),
                        format!("Download failed: {}", e),
                    ));
                }
            }
        }

        tracing::info!(
            "✅ Processed {}/{} files ({} failed)",
            files.len(),
            all_files.len(),
            errors.len()
        );

        Ok(AggregateOutcome::Completed(AggregateResponse {
            filter: filter.map(str::to_string),
            total_files: all_files.len(),
            processed_files: files.len(),
            files,
            errors: if errors.is_empty() { None } else { Some(errors) },
        }))
    }

    async fn fetch_listing(&self) -> Result<FileListing> {
        let raw = self.source.list_files().await?;
        serde_json::from_value(raw).map_err(|e| AppError::InvalidListing {
            message: e.to_string(),
        })
    }
}
