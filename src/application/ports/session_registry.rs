//! Session Registry Port - 活跃语音会话登记
//!
//! 记录当前正在进行的播放请求，具体实现在 infrastructure/memory 层

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::voice::VoiceTarget;

/// 播放状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Idle,
    Connecting,
    Priming,
    Streaming,
    Draining,
    Disconnected,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Priming => "priming",
            Self::Streaming => "streaming",
            Self::Draining => "draining",
            Self::Disconnected => "disconnected",
        };
        write!(f, "{}", s)
    }
}

/// 活跃会话记录
#[derive(Debug, Clone, Serialize)]
pub struct ActiveSession {
    pub id: Uuid,
    pub target: VoiceTarget,
    pub clip_name: String,
    pub state: PlaybackState,
    pub frames_sent: usize,
    pub started_at: DateTime<Utc>,
}

impl ActiveSession {
    pub fn new(target: VoiceTarget, clip_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            clip_name: clip_name.into(),
            state: PlaybackState::Idle,
            frames_sent: 0,
            started_at: Utc::now(),
        }
    }
}

/// Session Registry Port
pub trait SessionRegistryPort: Send + Sync {
    /// 登记新会话
    fn register(&self, session: ActiveSession);

    /// 更新状态
    fn set_state(&self, id: Uuid, state: PlaybackState);

    /// 更新已发送帧数
    fn set_frames_sent(&self, id: Uuid, frames_sent: usize);

    /// 移除会话
    fn remove(&self, id: Uuid) -> Option<ActiveSession>;

    /// 获取会话
    fn get(&self, id: Uuid) -> Option<ActiveSession>;

    /// 列出所有活跃会话
    fn list(&self) -> Vec<ActiveSession>;
}
