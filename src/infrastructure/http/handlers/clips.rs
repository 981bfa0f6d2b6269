//! Clip HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::{ApiResponse, ClipDto, ClipListDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出 bot 的全部音效名称
pub async fn list_clips(
    State(state): State<Arc<AppState>>,
    Path(bot): Path<String>,
) -> Result<Json<ApiResponse<ClipListDto>>, ApiError> {
    let board = state.soundboard(&bot)?;

    Ok(Json(ApiResponse::success(ClipListDto {
        bot: board.name().to_string(),
        names: board.list_names(),
    })))
}

/// 获取单个音效详情
pub async fn get_clip(
    State(state): State<Arc<AppState>>,
    Path((bot, name)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ClipDto>>, ApiError> {
    let info = state.soundboard(&bot)?.clip_info(name)?;
    Ok(Json(ApiResponse::success(ClipDto::from(info))))
}
