//! Soundboard - 单个 bot 身份的播放上下文
//!
//! 显式构造的上下文对象：一个只读音效目录 + 一个播放时序器 + 一个活跃会话登记表。
//! 同一进程可以为多个 bot 身份各构造一个实例。
//! 只能从已构建完成的 `ClipCatalog` 构造，目录构建因此总是先于任何读取。

use std::sync::Arc;

use crate::application::commands::handlers::PlayClipHandler;
use crate::application::commands::PlayClip;
use crate::application::error::PlaybackError;
use crate::application::playback::{PlaybackConfig, PlaybackReport, PlaybackSequencer};
use crate::application::ports::{ActiveSession, SessionRegistryPort, VoiceSenderPort};
use crate::application::queries::handlers::{
    ClipInfo, GetClipHandler, ListClipsHandler, ListSessionsHandler,
};
use crate::application::queries::{GetClip, ListClips, ListSessions};
use crate::domain::clip::ClipCatalog;

/// 单个 bot 的播放上下文
pub struct Soundboard {
    name: String,
    catalog: Arc<ClipCatalog>,

    // ========== Command Handlers ==========
    play_handler: PlayClipHandler,

    // ========== Query Handlers ==========
    list_clips_handler: ListClipsHandler,
    get_clip_handler: GetClipHandler,
    list_sessions_handler: ListSessionsHandler,
}

impl Soundboard {
    pub fn new(
        name: impl Into<String>,
        catalog: ClipCatalog,
        voice_sender: Arc<dyn VoiceSenderPort>,
        session_registry: Arc<dyn SessionRegistryPort>,
        playback_config: PlaybackConfig,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let sequencer =
            PlaybackSequencer::new(playback_config, voice_sender, session_registry.clone());

        Self {
            name: name.into(),
            catalog: catalog.clone(),
            play_handler: PlayClipHandler::new(catalog.clone(), sequencer),
            list_clips_handler: ListClipsHandler::new(catalog.clone()),
            get_clip_handler: GetClipHandler::new(catalog),
            list_sessions_handler: ListSessionsHandler::new(session_registry),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog(&self) -> &Arc<ClipCatalog> {
        &self.catalog
    }

    /// 按名称播放
    pub async fn play_by_name(&self, command: PlayClip) -> Result<PlaybackReport, PlaybackError> {
        self.play_handler.handle(command).await
    }

    /// 所有已知音效名称
    pub fn list_names(&self) -> Vec<String> {
        self.list_clips_handler.handle(ListClips)
    }

    pub fn clip_info(&self, name: impl Into<String>) -> Result<ClipInfo, PlaybackError> {
        self.get_clip_handler.handle(GetClip { name: name.into() })
    }

    pub fn active_sessions(&self) -> Vec<ActiveSession> {
        self.list_sessions_handler.handle(ListSessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemorySessionRegistry;
    use crate::testing::{clip, target, RecordingVoiceSender};
    use futures_util::future::join_all;
    use std::time::Duration;

    fn soundboard(sender: &RecordingVoiceSender) -> Arc<Soundboard> {
        let mut builder = ClipCatalog::builder();
        builder.insert(clip("air-horn", &[b"a0", b"a1", b"a2"]));
        builder.insert(clip("rimshot", &[b"r0"]));

        Arc::new(Soundboard::new(
            "test",
            builder.build(),
            Arc::new(sender.clone()),
            Arc::new(InMemorySessionRegistry::new()),
            PlaybackConfig {
                settle_delay: Duration::from_millis(1),
            },
        ))
    }

    #[tokio::test]
    async fn test_concurrent_plays_leave_catalog_intact() {
        let sender = RecordingVoiceSender::new();
        let board = soundboard(&sender);
        let before = board.catalog().lookup("air-horn").unwrap();

        let plays = (0..32).map(|i| {
            let board = board.clone();
            let name = if i % 2 == 0 { "air-horn" } else { "rimshot" };
            tokio::spawn(async move { board.play_by_name(PlayClip::new(name, target())).await })
        });

        for result in join_all(plays).await {
            assert!(result.unwrap().is_ok());
        }

        let after = board.catalog().lookup("air-horn").unwrap();
        assert_eq!(*before, *after);
        assert_eq!(after.frame_count(), 3);
        assert_eq!(board.list_names(), vec!["air-horn", "rimshot"]);
        assert_eq!(sender.connect_count(), 32);
        assert!(board.active_sessions().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_name_reports_not_found() {
        let sender = RecordingVoiceSender::new();
        let board = soundboard(&sender);

        let err = board
            .play_by_name(PlayClip::new("missing", target()))
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::NotFound(_)));
        assert_eq!(sender.connect_count(), 0);
    }

    #[test]
    fn test_clip_info() {
        let sender = RecordingVoiceSender::new();
        let board = soundboard(&sender);
        assert_eq!(board.clip_info("rimshot").unwrap().frame_count, 1);
    }
}
