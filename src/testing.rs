//! 测试辅助：记录调用顺序的语音传输

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::application::ports::{VoiceError, VoiceSenderPort, VoiceSessionPort};
use crate::domain::clip::{Clip, ClipName, Frame};
use crate::domain::voice::{ChannelId, GuildId, VoiceTarget};

/// 传输层收到的调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    Connect(VoiceTarget),
    SetSpeaking(bool),
    Send(Vec<u8>),
    Disconnect,
}

/// 记录所有调用的假传输
#[derive(Clone, Default)]
pub struct RecordingVoiceSender {
    events: Arc<Mutex<Vec<VoiceEvent>>>,
    refuse_connect: bool,
    fail_at_frame: Option<usize>,
    panic_at_frame: Option<usize>,
}

impl RecordingVoiceSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// connect 总是失败
    pub fn refusing() -> Self {
        Self {
            refuse_connect: true,
            ..Self::default()
        }
    }

    /// 第 index 次 send 失败（从 0 开始）
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at_frame: Some(index),
            ..Self::default()
        }
    }

    /// 第 index 次 send 直接 panic（从 0 开始）
    pub fn panicking_at(index: usize) -> Self {
        Self {
            panic_at_frame: Some(index),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<VoiceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn connect_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, VoiceEvent::Connect(_)))
            .count()
    }
}

#[async_trait]
impl VoiceSenderPort for RecordingVoiceSender {
    async fn connect(&self, target: VoiceTarget) -> Result<Box<dyn VoiceSessionPort>, VoiceError> {
        self.events.lock().unwrap().push(VoiceEvent::Connect(target));
        if self.refuse_connect {
            return Err(VoiceError::PermissionDenied("refused by test".to_string()));
        }
        Ok(Box::new(RecordingSession {
            events: self.events.clone(),
            fail_at_frame: self.fail_at_frame,
            panic_at_frame: self.panic_at_frame,
            sent: 0,
        }))
    }
}

struct RecordingSession {
    events: Arc<Mutex<Vec<VoiceEvent>>>,
    fail_at_frame: Option<usize>,
    panic_at_frame: Option<usize>,
    sent: usize,
}

#[async_trait]
impl VoiceSessionPort for RecordingSession {
    async fn set_speaking(&mut self, speaking: bool) {
        self.events
            .lock()
            .unwrap()
            .push(VoiceEvent::SetSpeaking(speaking));
    }

    async fn send(&mut self, frame: &Frame) -> Result<(), VoiceError> {
        if self.panic_at_frame == Some(self.sent) {
            panic!("transport blew up");
        }
        if self.fail_at_frame == Some(self.sent) {
            return Err(VoiceError::Transport("send failed in test".to_string()));
        }
        self.sent += 1;
        self.events
            .lock()
            .unwrap()
            .push(VoiceEvent::Send(frame.as_bytes().to_vec()));
        Ok(())
    }

    async fn disconnect(&mut self) {
        self.events.lock().unwrap().push(VoiceEvent::Disconnect);
    }
}

pub fn target() -> VoiceTarget {
    VoiceTarget::new(GuildId::new(100), ChannelId::new(200))
}

pub fn clip(name: &str, frames: &[&[u8]]) -> Clip {
    Clip::new(
        ClipName::new(name).unwrap(),
        frames.iter().map(|f| Frame::new(f.to_vec())).collect(),
    )
}

/// 写入一个 DCA 容器文件
pub fn write_container(path: &std::path::Path, frames: &[&[u8]]) {
    let frames: Vec<Frame> = frames.iter().map(|f| Frame::new(f.to_vec())).collect();
    let mut data = Vec::new();
    crate::domain::clip::encode_frames(&frames, &mut data).unwrap();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, data).unwrap();
}
