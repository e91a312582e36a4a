//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping           GET   健康检查
//! - /api/create-voice   POST  混合音色并注册为新音色

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/create-voice", post(handlers::create_voice))
}
