//! Ping Handler
//!
//! 健康检查，同时探测上游是否可达

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub upstream: &'static str,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let upstream = if state.provider.health_check().await {
        "reachable"
    } else {
        "unreachable"
    };

    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        upstream,
    })
}
