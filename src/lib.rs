//! Soundbot - 语音频道音效播放服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Clip: 音效帧容器格式、Clip 聚合、只读音效目录
//! - Voice: 语音频道目标
//!
//! 应用层 (application/):
//! - Ports: 端口定义（VoiceSender, ClipLibrary, SessionRegistry）
//! - Playback: 连接 → 稳定 → 逐帧发送 → 收尾 → 断开 的播放时序
//! - Commands / Queries: CQRS 处理器
//! - Soundboard: 单个 bot 身份的上下文
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: SessionRegistry 内存实现
//! - Adapters: 文件系统音效库, Ogg Opus 录制传输

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod testing;

pub use application::Soundboard;
pub use config::{load_config, AppConfig};
