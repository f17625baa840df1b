//! 状态快照 API
//!
//! 包含 /api/stats 端点

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::domain::stats::StatsSnapshot;
use crate::error::ApiResult;
use crate::state::AppState;

/// 创建状态快照路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats", get(get_stats))
}

/// 获取当前状态快照
///
/// GET /api/stats
/// 无需认证，约 1 秒后返回（CPU 采样窗口）
async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatsSnapshot>> {
    let snapshot = state.collector.collect(state.source.as_ref()).await?;
    Ok(Json(snapshot))
}
