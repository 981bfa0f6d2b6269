//! Play HTTP Handler

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::PlayClip;
use crate::infrastructure::http::dto::{ApiResponse, PlayRequest, PlayResponseDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 播放音效到指定语音频道，播放结束后返回
pub async fn play(
    State(state): State<Arc<AppState>>,
    Path(bot): Path<String>,
    Json(req): Json<PlayRequest>,
) -> Result<Json<ApiResponse<PlayResponseDto>>, ApiError> {
    let board = state.soundboard(&bot)?;

    if req.name.is_empty() {
        return Err(ApiError::BadRequest("Clip name is required".to_string()));
    }

    // 名称按原样查找，不去除空白
    let target = req.target();
    let command = PlayClip::new(req.name, target);
    let report = board.play_by_name(command).await?;

    Ok(Json(ApiResponse::success(PlayResponseDto::from(report))))
}
