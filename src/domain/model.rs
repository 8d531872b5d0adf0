use serde::{Deserialize, Deserializer, Serialize};

/// 上游 `/v1/secret/files` 回傳的檔案清單
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListing {
    /// 缺少或為 `null` 時視為空清單
    #[serde(default, deserialize_with = "null_as_empty")]
    pub files: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// 一筆通過驗證的資料列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub text: String,
    pub number: i64,
    pub hex: String,
}

/// 單一檔案的處理結果；`error` 存在時 `lines` 一定為空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    pub file: String,
    pub lines: Vec<ParsedRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    pub fn empty(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            lines: Vec::new(),
            error: None,
        }
    }

    pub fn failed(file: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            lines: Vec::new(),
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    pub filter: Option<String>,
    pub total_files: usize,
    pub processed_files: usize,
    pub files: Vec<FileResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// 欄位數少於 4
    InsufficientData { fields: usize },
    /// text 為空或 number 無法解析
    InvalidLine,
}

/// 被丟棄的資料列，只用於診斷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRejection {
    pub file: String,
    /// 從 1 開始的行號（含標題列）
    pub line_number: usize,
    pub line: String,
    pub reason: RejectionReason,
}

impl std::fmt::Display for LineRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.reason {
            RejectionReason::InsufficientData { .. } => "insufficient data",
            RejectionReason::InvalidLine => "invalid line",
        };
        write!(
            f,
            "{} in {} (line {}): {}",
            label, self.file, self.line_number, self.line
        )
    }
}

/// 彙整結果：找不到指定檔案不是錯誤，而是一種結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateOutcome {
    Completed(AggregateResponse),
    FileNotFound {
        requested: String,
        available_files: Vec<String>,
    },
}
