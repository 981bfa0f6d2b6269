//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（VoiceSender、ClipLibrary、SessionRegistry）
//! - playback: 播放时序器
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - soundboard: 单个 bot 身份的上下文对象
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod playback;
pub mod ports;
pub mod queries;
pub mod soundboard;

// Re-exports
pub use commands::{handlers::PlayClipHandler, PlayClip};

pub use error::PlaybackError;

pub use playback::{PlaybackConfig, PlaybackReport, PlaybackSequencer};

pub use ports::{
    // Clip library
    ClipLibraryPort,
    LoadError,
    // Session registry
    ActiveSession,
    PlaybackState,
    SessionRegistryPort,
    // Voice sender
    VoiceError,
    VoiceSenderPort,
    VoiceSessionPort,
};

pub use queries::{
    handlers::{ClipInfo, GetClipHandler, ListClipsHandler, ListSessionsHandler},
    GetClip, ListClips, ListSessions,
};

pub use soundboard::Soundboard;
