use crate::domain::model::LineRejection;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 檔案來源（上游 API 或測試用的假資料）
#[async_trait]
pub trait FileSource: Send + Sync {
    /// 原始清單 JSON，`/files/list` 直接轉發
    async fn list_files(&self) -> Result<serde_json::Value>;
    async fn fetch_file(&self, name: &str) -> Result<String>;
}

/// 解析過程的診斷輸出，讓解析器維持純函式
pub trait DiagnosticSink: Send + Sync {
    fn on_rejection(&self, rejection: &LineRejection);
    fn on_empty_file(&self, _file: &str) {}
}
