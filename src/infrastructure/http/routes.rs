//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                          GET   健康检查
//! - /api/bots                          GET   列出 bot 身份
//! - /api/bots/{bot}/clips              GET   列出音效名称
//! - /api/bots/{bot}/clips/{name}       GET   获取音效详情
//! - /api/bots/{bot}/play               POST  播放音效（播放结束后返回）
//! - /api/bots/{bot}/sessions           GET   列出活跃语音会话

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
        .route("/bots", get(handlers::list_bots))
        .nest("/bots/:bot", bot_routes())
}

/// 单个 bot 的路由
fn bot_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clips", get(handlers::list_clips))
        .route("/clips/:name", get(handlers::get_clip))
        .route("/play", post(handlers::play))
        .route("/sessions", get(handlers::list_sessions))
}
