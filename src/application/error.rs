//! 应用层错误定义
//!
//! 播放请求的错误只影响该请求本身，不影响目录或其他并发请求

use thiserror::Error;

use crate::application::ports::VoiceError;
use crate::domain::voice::VoiceTarget;

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// 音效不存在（在任何连接尝试之前报告）
    #[error("Clip not found: {0}")]
    NotFound(String),

    /// 加入语音频道失败，没有发送任何帧
    #[error("Failed to connect to {target}: {source}")]
    Connection {
        target: VoiceTarget,
        #[source]
        source: VoiceError,
    },

    /// 连接建立后发送失败，剩余帧被放弃
    #[error("Streaming failed at frame {frame_index}: {source}")]
    Streaming {
        frame_index: usize,
        #[source]
        source: VoiceError,
    },

    /// 播放任务异常终止
    #[error("Playback aborted: {0}")]
    Aborted(String),
}

impl PlaybackError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn aborted(message: impl Into<String>) -> Self {
        Self::Aborted(message.into())
    }
}
