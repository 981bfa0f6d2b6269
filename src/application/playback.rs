//! Playback Sequencer - 播放时序控制
//!
//! 状态机: Idle -> Connecting -> Priming -> Streaming -> Draining -> Disconnected
//!
//! - Connecting: 加入语音频道，失败直接进入 Disconnected，不发送任何帧
//! - Priming: 等待固定的稳定延迟后再发送
//! - Streaming: 开启说话状态，按顺序逐帧发送，每帧被传输层接收后才发送下一帧
//! - Draining: 关闭说话状态，再等待一次稳定延迟让最后一帧发出
//! - Disconnected: 无论成功失败都断开连接，传输层 panic 也不例外

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::FutureExt;
use uuid::Uuid;

use crate::application::error::PlaybackError;
use crate::application::ports::{
    ActiveSession, PlaybackState, SessionRegistryPort, VoiceSenderPort, VoiceSessionPort,
};
use crate::domain::clip::Clip;
use crate::domain::voice::VoiceTarget;

/// 播放配置
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// 连接后、断开前的稳定延迟
    pub settle_delay: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(250),
        }
    }
}

/// 播放结果
#[derive(Debug, Clone)]
pub struct PlaybackReport {
    pub session_id: Uuid,
    pub clip_name: String,
    pub target: VoiceTarget,
    pub frames_sent: usize,
    pub elapsed: Duration,
}

/// 播放时序器
///
/// 每个播放请求在独立的 tokio 任务中执行，调用方 future 被丢弃也不会跳过断开连接
#[derive(Clone)]
pub struct PlaybackSequencer {
    config: PlaybackConfig,
    voice_sender: Arc<dyn VoiceSenderPort>,
    session_registry: Arc<dyn SessionRegistryPort>,
}

impl PlaybackSequencer {
    pub fn new(
        config: PlaybackConfig,
        voice_sender: Arc<dyn VoiceSenderPort>,
        session_registry: Arc<dyn SessionRegistryPort>,
    ) -> Self {
        Self {
            config,
            voice_sender,
            session_registry,
        }
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// 将 clip 播放到目标语音频道
    pub async fn play(
        &self,
        clip: Arc<Clip>,
        target: VoiceTarget,
    ) -> Result<PlaybackReport, PlaybackError> {
        let sequencer = self.clone();
        tokio::spawn(async move { sequencer.run(clip, target).await })
            .await
            .map_err(|e| PlaybackError::aborted(e.to_string()))?
    }

    async fn run(&self, clip: Arc<Clip>, target: VoiceTarget) -> Result<PlaybackReport, PlaybackError> {
        let started = Instant::now();
        let registration = Registration::new(
            self.session_registry.clone(),
            ActiveSession::new(target, clip.name().as_str()),
        );
        let session_id = registration.id;

        let result = self.sequence(session_id, &clip, target).await;
        drop(registration);

        let elapsed = started.elapsed();
        match &result {
            Ok(frames_sent) => tracing::info!(
                session_id = %session_id,
                clip = %clip.name(),
                target = %target,
                frames_sent = frames_sent,
                elapsed_ms = elapsed.as_millis() as u64,
                "Playback finished"
            ),
            Err(e) => tracing::warn!(
                session_id = %session_id,
                clip = %clip.name(),
                target = %target,
                error = %e,
                "Playback failed"
            ),
        }

        result.map(|frames_sent| PlaybackReport {
            session_id,
            clip_name: clip.name().to_string(),
            target,
            frames_sent,
            elapsed,
        })
    }

    async fn sequence(
        &self,
        session_id: Uuid,
        clip: &Clip,
        target: VoiceTarget,
    ) -> Result<usize, PlaybackError> {
        self.transition(session_id, PlaybackState::Connecting);
        let mut session = match self.voice_sender.connect(target).await {
            Ok(session) => session,
            Err(source) => {
                self.transition(session_id, PlaybackState::Disconnected);
                return Err(PlaybackError::Connection { target, source });
            }
        };

        self.transition(session_id, PlaybackState::Priming);
        tokio::time::sleep(self.config.settle_delay).await;

        self.transition(session_id, PlaybackState::Streaming);
        let streamed = AssertUnwindSafe(async {
            session.set_speaking(true).await;
            self.stream(session_id, clip, session.as_mut()).await
        })
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(PlaybackError::aborted(panic_message(panic.as_ref()))));

        self.transition(session_id, PlaybackState::Draining);
        let drained = AssertUnwindSafe(async {
            session.set_speaking(false).await;
            tokio::time::sleep(self.config.settle_delay).await;
        })
        .catch_unwind()
        .await;
        if let Err(panic) = drained {
            tracing::error!(
                session_id = %session_id,
                error = %panic_message(panic.as_ref()),
                "Transport panicked while draining"
            );
        }

        session.disconnect().await;
        self.transition(session_id, PlaybackState::Disconnected);

        streamed
    }

    async fn stream(
        &self,
        session_id: Uuid,
        clip: &Clip,
        session: &mut dyn VoiceSessionPort,
    ) -> Result<usize, PlaybackError> {
        for (frame_index, frame) in clip.frames().iter().enumerate() {
            session
                .send(frame)
                .await
                .map_err(|source| PlaybackError::Streaming {
                    frame_index,
                    source,
                })?;
            self.session_registry
                .set_frames_sent(session_id, frame_index + 1);
        }
        Ok(clip.frame_count())
    }

    fn transition(&self, session_id: Uuid, state: PlaybackState) {
        tracing::debug!(session_id = %session_id, state = %state, "Playback state");
        self.session_registry.set_state(session_id, state);
    }
}

/// 活跃会话登记，离开作用域时移除（包括 panic 展开）
struct Registration {
    registry: Arc<dyn SessionRegistryPort>,
    id: Uuid,
}

impl Registration {
    fn new(registry: Arc<dyn SessionRegistryPort>, record: ActiveSession) -> Self {
        let id = record.id;
        registry.register(record);
        Self { registry, id }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.remove(self.id);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("transport panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("transport panicked: {}", message)
    } else {
        "transport panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemorySessionRegistry;
    use crate::testing::{clip, target, RecordingVoiceSender, VoiceEvent};

    fn sequencer(
        sender: &RecordingVoiceSender,
        registry: Arc<InMemorySessionRegistry>,
        settle_delay: Duration,
    ) -> PlaybackSequencer {
        PlaybackSequencer::new(
            PlaybackConfig { settle_delay },
            Arc::new(sender.clone()),
            registry,
        )
    }

    #[tokio::test]
    async fn test_call_order() {
        let sender = RecordingVoiceSender::new();
        let registry = Arc::new(InMemorySessionRegistry::new());
        let sequencer = sequencer(&sender, registry.clone(), Duration::ZERO);

        let clip = Arc::new(clip("air-horn", &[b"f0", b"f1", b"f2"]));
        let report = sequencer.play(clip, target()).await.unwrap();

        assert_eq!(report.frames_sent, 3);
        assert_eq!(report.clip_name, "air-horn");
        assert_eq!(
            sender.events(),
            vec![
                VoiceEvent::Connect(target()),
                VoiceEvent::SetSpeaking(true),
                VoiceEvent::Send(b"f0".to_vec()),
                VoiceEvent::Send(b"f1".to_vec()),
                VoiceEvent::Send(b"f2".to_vec()),
                VoiceEvent::SetSpeaking(false),
                VoiceEvent::Disconnect,
            ]
        );
        assert!(registry.list().is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_still_disconnects() {
        let sender = RecordingVoiceSender::failing_at(1);
        let registry = Arc::new(InMemorySessionRegistry::new());
        let sequencer = sequencer(&sender, registry.clone(), Duration::ZERO);

        let clip = Arc::new(clip("air-horn", &[b"f0", b"f1", b"f2"]));
        let err = sequencer.play(clip, target()).await.unwrap_err();

        assert!(matches!(
            err,
            PlaybackError::Streaming { frame_index: 1, .. }
        ));
        assert_eq!(
            sender.events(),
            vec![
                VoiceEvent::Connect(target()),
                VoiceEvent::SetSpeaking(true),
                VoiceEvent::Send(b"f0".to_vec()),
                VoiceEvent::SetSpeaking(false),
                VoiceEvent::Disconnect,
            ]
        );
        assert!(registry.list().is_empty());
    }

    #[tokio::test]
    async fn test_connect_failure_sends_nothing() {
        let sender = RecordingVoiceSender::refusing();
        let registry = Arc::new(InMemorySessionRegistry::new());
        let sequencer = sequencer(&sender, registry.clone(), Duration::ZERO);

        let clip = Arc::new(clip("air-horn", &[b"f0"]));
        let err = sequencer.play(clip, target()).await.unwrap_err();

        assert!(matches!(err, PlaybackError::Connection { .. }));
        assert_eq!(sender.events(), vec![VoiceEvent::Connect(target())]);
        assert!(registry.list().is_empty());
    }

    #[tokio::test]
    async fn test_empty_clip_still_cycles_session() {
        let sender = RecordingVoiceSender::new();
        let registry = Arc::new(InMemorySessionRegistry::new());
        let sequencer = sequencer(&sender, registry, Duration::ZERO);

        let report = sequencer
            .play(Arc::new(clip("silence", &[])), target())
            .await
            .unwrap();

        assert_eq!(report.frames_sent, 0);
        assert_eq!(
            sender.events(),
            vec![
                VoiceEvent::Connect(target()),
                VoiceEvent::SetSpeaking(true),
                VoiceEvent::SetSpeaking(false),
                VoiceEvent::Disconnect,
            ]
        );
    }

    #[tokio::test]
    async fn test_settle_delay_applied_before_and_after() {
        let sender = RecordingVoiceSender::new();
        let registry = Arc::new(InMemorySessionRegistry::new());
        let delay = Duration::from_millis(30);
        let sequencer = sequencer(&sender, registry, delay);

        let report = sequencer
            .play(Arc::new(clip("air-horn", &[b"f0"])), target())
            .await
            .unwrap();

        assert!(report.elapsed >= delay * 2);
    }

    #[tokio::test]
    async fn test_dropped_caller_still_disconnects() {
        let sender = RecordingVoiceSender::new();
        let registry = Arc::new(InMemorySessionRegistry::new());
        let sequencer = sequencer(&sender, registry.clone(), Duration::from_millis(50));

        let clip = Arc::new(clip("air-horn", &[b"f0"]));
        // 调用方在 Priming 阶段放弃等待
        let _ = tokio::time::timeout(Duration::from_millis(10), sequencer.play(clip, target())).await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(sender.events().last(), Some(&VoiceEvent::Disconnect));
        assert!(registry.list().is_empty());
    }

    #[tokio::test]
    async fn test_transport_panic_still_disconnects() {
        let sender = RecordingVoiceSender::panicking_at(1);
        let registry = Arc::new(InMemorySessionRegistry::new());
        let sequencer = sequencer(&sender, registry.clone(), Duration::ZERO);

        let clip = Arc::new(clip("air-horn", &[b"f0", b"f1", b"f2"]));
        let err = sequencer.play(clip, target()).await.unwrap_err();

        match err {
            PlaybackError::Aborted(message) => assert!(message.contains("transport blew up")),
            other => panic!("expected Aborted, got {:?}", other),
        }
        assert_eq!(
            sender.events(),
            vec![
                VoiceEvent::Connect(target()),
                VoiceEvent::SetSpeaking(true),
                VoiceEvent::Send(b"f0".to_vec()),
                VoiceEvent::SetSpeaking(false),
                VoiceEvent::Disconnect,
            ]
        );
        assert!(registry.list().is_empty());
    }

    #[test]
    fn test_registration_removed_on_drop() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let registration = Registration::new(
            registry.clone(),
            ActiveSession::new(target(), "air-horn"),
        );
        assert_eq!(registry.list().len(), 1);

        drop(registration);
        assert!(registry.list().is_empty());
    }
}
