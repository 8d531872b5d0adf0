use crate::core::line_parser::parse_line;
use crate::domain::model::{FileResult, LineRejection};
use crate::domain::ports::DiagnosticSink;

/// 將被丟棄的行寫入 tracing 日誌
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn on_rejection(&self, rejection: &LineRejection) {
        tracing::warn!("⚠️ Dropped {}", rejection);
    }

    fn on_empty_file(&self, file: &str) {
        tracing::debug!("📭 Empty file: {}", file);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl DiagnosticSink for NoopDiagnostics {
    fn on_rejection(&self, _rejection: &LineRejection) {}
}

/// 解析單一檔案的 CSV 內容。
///
/// 第一行一律視為標題列丟棄，不檢查其內容；其餘各行交給 [`parse_line`]。
/// 此函式不會失敗，下載錯誤由呼叫端處理。
pub fn parse_file_response(
    file: &str,
    content: &str,
    diagnostics: &dyn DiagnosticSink,
) -> FileResult {
    if content.trim().is_empty() {
        diagnostics.on_empty_file(file);
        return FileResult::empty(file);
    }

    let mut lines = Vec::new();
    for (index, line) in content.split('\n').enumerate().skip(1) {
        match parse_line(file, index, line) {
            Ok(Some(record)) => lines.push(record),
            Ok(None) => {}
            Err(rejection) => diagnostics.on_rejection(&rejection),
        }
    }

    FileResult {
        file: file.to_string(),
        lines,
        error: None,
    }
}
