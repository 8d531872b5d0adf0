//! HTTP surface of the relay.
//!
//! Routes:
//! - `GET /health`
//! - `GET /api`
//! - `GET /files/list` (raw upstream listing)
//! - `GET /files/data[?fileName=]` (parsed CSV content)
//!
//! Anything else answers 404 with the requested path. CORS is open to any
//! origin, and a panicking handler answers a JSON 500 instead of dropping
//! the connection.

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use crate::utils::error::Result;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::any::Any;
use std::future::Future;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

pub fn create_router(state: AppState) -> Router {
    let production = state.production;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api", get(handlers::api_info))
        .route("/files/list", get(handlers::files_list))
        .route("/files/data", get(handlers::files_data))
        .fallback(handlers::route_not_found)
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| panic_response(panic, production),
        ))
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, production: bool) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal {
        message,
        expose: !production,
    }
    .into_response()
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %uri,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );
    response
}

/// 在指定 listener 上提供服務，直到 `shutdown` 完成
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // 無法監聽訊號時不主動關閉
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown signal received");
}
