//! Voice Context - 语音频道限界上下文
//!
//! 职责:
//! - Guild / Channel 标识
//! - 播放目标

mod value_objects;

pub use value_objects::{ChannelId, GuildId, VoiceTarget};
