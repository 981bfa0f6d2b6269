//! Play Commands - 播放相关命令

use crate::domain::voice::VoiceTarget;

/// 按名称播放音效命令
#[derive(Debug, Clone)]
pub struct PlayClip {
    pub name: String,
    pub target: VoiceTarget,
}

impl PlayClip {
    pub fn new(name: impl Into<String>, target: VoiceTarget) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}
