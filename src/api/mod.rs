//! API 模块
//!
//! HTTP handlers 和路由组装

pub mod health;
pub mod stats;

use axum::{http::Uri, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::state::AppState;

/// 构建完整的 API 路由
///
/// 仪表盘运行在其他端口，CORS 对所有来源放行
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Stats
        .merge(stats::router())
        // Health
        .merge(health::router())
        .fallback(not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(uri.path())
}
