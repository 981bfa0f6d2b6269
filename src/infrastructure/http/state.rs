//! Application State
//!
//! 每个 bot 身份对应一个 Soundboard 上下文

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::Soundboard;
use crate::infrastructure::http::error::ApiError;

/// 应用状态
pub struct AppState {
    /// bot 名称 -> Soundboard
    soundboards: BTreeMap<String, Arc<Soundboard>>,
}

impl AppState {
    /// 创建应用状态，同名 bot 以后出现的为准
    pub fn new(soundboards: impl IntoIterator<Item = Arc<Soundboard>>) -> Self {
        Self {
            soundboards: soundboards
                .into_iter()
                .map(|board| (board.name().to_string(), board))
                .collect(),
        }
    }

    /// 按名称获取 Soundboard
    pub fn soundboard(&self, bot: &str) -> Result<&Arc<Soundboard>, ApiError> {
        self.soundboards
            .get(bot)
            .ok_or_else(|| ApiError::NotFound(format!("Bot not found: {}", bot)))
    }

    /// 所有 Soundboard，按名称排序
    pub fn soundboards(&self) -> impl Iterator<Item = &Arc<Soundboard>> {
        self.soundboards.values()
    }

    pub fn bot_count(&self) -> usize {
        self.soundboards.len()
    }
}
