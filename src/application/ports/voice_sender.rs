//! Voice Sender Port - 语音传输抽象
//!
//! 定义向语音频道发送音频帧的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::clip::Frame;
use crate::domain::voice::VoiceTarget;

/// 语音传输错误
#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Voice channel unreachable: {0}")]
    Unreachable(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Voice session closed")]
    Closed,
}

/// Voice Sender Port
///
/// 负责建立到语音频道的连接
#[async_trait]
pub trait VoiceSenderPort: Send + Sync {
    /// 加入目标语音频道，返回独占的语音会话
    async fn connect(&self, target: VoiceTarget) -> Result<Box<dyn VoiceSessionPort>, VoiceError>;
}

/// Voice Session Port
///
/// 一次播放请求独占的语音连接
#[async_trait]
pub trait VoiceSessionPort: Send {
    /// 设置说话状态
    async fn set_speaking(&mut self, speaking: bool);

    /// 发送一帧
    ///
    /// 在传输层接收该帧之前不返回，播放节奏由传输层决定
    async fn send(&mut self, frame: &Frame) -> Result<(), VoiceError>;

    /// 断开连接并释放资源
    async fn disconnect(&mut self);
}
