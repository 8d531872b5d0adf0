use crate::domain::model::{AggregateOutcome, AggregateResponse};
use crate::server::error::ApiError;
use crate::server::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const API_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: f64,
    pub environment: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilesDataQuery {
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.environment.clone(),
    })
}

pub async fn api_info() -> Json<serde_json::Value> {
    Json(json!({
        "message": "csv relay api",
        "version": API_VERSION,
        "endpoints": {
            "health": "/health",
            "filesList": "/files/list",
            "filesData": "/files/data",
            "filesDataFilter": "/files/data?fileName=<filename>",
        },
        "description": {
            "filesList": "Returns the list of available files from the upstream API",
            "filesData": "Downloads and parses CSV files (all, or one selected by fileName)",
            "filesDataFilter": "Restricts processing to one file via the fileName query parameter",
        },
    }))
}

pub async fn files_list(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let listing = state
        .source
        .list_files()
        .await
        .map_err(|e| ApiError::from_app_error(e, state.production))?;
    Ok(Json(listing))
}

pub async fn files_data(
    State(state): State<AppState>,
    query: Result<Query<FilesDataQuery>, QueryRejection>,
) -> Result<Json<AggregateResponse>, ApiError> {
    // 查詢字串無法解析（例如重複的 fileName）視為內部錯誤
    let Query(query) = query.map_err(|rejection| ApiError::Internal {
        message: rejection.body_text(),
        expose: !state.production,
    })?;

    let outcome = state
        .aggregator
        .aggregate(query.file_name.as_deref())
        .await
        .map_err(|e| ApiError::from_app_error(e, state.production))?;

    match outcome {
        AggregateOutcome::Completed(response) => Ok(Json(response)),
        AggregateOutcome::FileNotFound {
            requested,
            available_files,
        } => Err(ApiError::FileNotFound {
            requested,
            available_files,
        }),
    }
}

pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": path,
        })),
    )
}
