//! Session HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::{ApiResponse, SessionDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出 bot 当前正在播放的语音会话
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Path(bot): Path<String>,
) -> Result<Json<ApiResponse<Vec<SessionDto>>>, ApiError> {
    let sessions = state
        .soundboard(&bot)?
        .active_sessions()
        .into_iter()
        .map(SessionDto::from)
        .collect();

    Ok(Json(ApiResponse::success(sessions)))
}
