use crate::utils::error::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

const GENERIC_INTERNAL_MESSAGE: &str = "Something went wrong";

/// 轉換成 HTTP 回應的錯誤
#[derive(Debug)]
pub enum ApiError {
    /// 取得上游清單失敗，整個請求失敗
    Listing(AppError),
    /// 指定的檔案不在 `.csv` 清單中
    FileNotFound {
        requested: String,
        available_files: Vec<String>,
    },
    /// 非預期錯誤；正式環境不回傳細節
    Internal { message: String, expose: bool },
}

impl ApiError {
    pub fn from_app_error(err: AppError, production: bool) -> Self {
        if err.is_upstream() {
            ApiError::Listing(err)
        } else {
            ApiError::Internal {
                message: err.to_string(),
                expose: !production,
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Listing(err) => {
                tracing::error!("❌ Failed to fetch file list: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to fetch the file list",
                        "message": err.to_string(),
                    })),
                )
                    .into_response()
            }
            ApiError::FileNotFound {
                requested,
                available_files,
            } => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "File not found",
                    "message": format!(
                        "The file '{}' does not exist in the list of available files",
                        requested
                    ),
                    "availableFiles": available_files,
                })),
            )
                .into_response(),
            ApiError::Internal { message, expose } => {
                tracing::error!("❌ Internal error: {}", message);
                let message = if expose {
                    message
                } else {
                    GENERIC_INTERNAL_MESSAGE.to_string()
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal server error",
                        "message": message,
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_listing_failure_is_500_with_message() {
        let err = ApiError::from_app_error(
            AppError::UpstreamStatus {
                status: 502,
                url: "http://upstream/v1/secret/files".to_string(),
            },
            true,
        );
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to fetch the file list");
        assert_eq!(body["message"], "responded with status: 502");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail_in_production() {
        let err = ApiError::from_app_error(
            AppError::ConfigError {
                message: "secret detail".to_string(),
            },
            true,
        );
        let body = body_json(err.into_response()).await;

        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["message"], GENERIC_INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_internal_error_shows_detail_outside_production() {
        let err = ApiError::from_app_error(
            AppError::ConfigError {
                message: "secret detail".to_string(),
            },
            false,
        );
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Configuration error: secret detail");
    }

    #[tokio::test]
    async fn test_file_not_found_lists_available_files() {
        let response = ApiError::FileNotFound {
            requested: "b".to_string(),
            available_files: vec!["a.csv".to_string(), "b.txt".to_string()],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["availableFiles"], json!(["a.csv", "b.txt"]));
        assert!(body["message"].as_str().unwrap().contains("'b'"));
    }
}
