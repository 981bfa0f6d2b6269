//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Clip Context: 帧容器、音效与音效目录
//! - Voice Context: 语音频道标识

pub mod clip;
pub mod voice;
