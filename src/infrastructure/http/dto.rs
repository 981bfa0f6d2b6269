//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{ActiveSession, ClipInfo, PlaybackReport};
use crate::domain::voice::{ChannelId, GuildId, VoiceTarget};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Bot DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct BotDto {
    pub name: String,
    pub clip_count: usize,
    pub active_sessions: usize,
}

// ============================================================================
// Clip DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ClipListDto {
    pub bot: String,
    pub names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ClipDto {
    pub name: String,
    pub frame_count: usize,
    pub total_bytes: usize,
}

impl From<ClipInfo> for ClipDto {
    fn from(info: ClipInfo) -> Self {
        Self {
            name: info.name,
            frame_count: info.frame_count,
            total_bytes: info.total_bytes,
        }
    }
}

// ============================================================================
// Play DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub name: String,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
}

impl PlayRequest {
    pub fn target(&self) -> VoiceTarget {
        VoiceTarget::new(self.guild_id, self.channel_id)
    }
}

#[derive(Debug, Serialize)]
pub struct PlayResponseDto {
    pub session_id: Uuid,
    pub name: String,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub frames_sent: usize,
    pub elapsed_ms: u64,
}

impl From<PlaybackReport> for PlayResponseDto {
    fn from(report: PlaybackReport) -> Self {
        Self {
            session_id: report.session_id,
            name: report.clip_name,
            guild_id: report.target.guild_id,
            channel_id: report.target.channel_id,
            frames_sent: report.frames_sent,
            elapsed_ms: report.elapsed.as_millis() as u64,
        }
    }
}

// ============================================================================
// Session DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SessionDto {
    pub session_id: Uuid,
    pub clip: String,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub state: String,
    pub frames_sent: usize,
    pub started_at: String,
}

impl From<ActiveSession> for SessionDto {
    fn from(session: ActiveSession) -> Self {
        Self {
            session_id: session.id,
            clip: session.clip_name,
            guild_id: session.target.guild_id,
            channel_id: session.target.channel_id,
            state: session.state.to_string(),
            frames_sent: session.frames_sent,
            started_at: session.started_at.to_rfc3339(),
        }
    }
}
