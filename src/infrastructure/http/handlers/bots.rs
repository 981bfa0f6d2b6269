//! Bot HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{ApiResponse, BotDto};
use crate::infrastructure::http::state::AppState;

/// 列出所有 bot 身份
pub async fn list_bots(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<BotDto>>> {
    let bots = state
        .soundboards()
        .map(|board| BotDto {
            name: board.name().to_string(),
            clip_count: board.catalog().len(),
            active_sessions: board.active_sessions().len(),
        })
        .collect();

    Json(ApiResponse::success(bots))
}
