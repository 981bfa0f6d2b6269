//! Play Command Handlers

use std::sync::Arc;

use crate::application::commands::PlayClip;
use crate::application::error::PlaybackError;
use crate::application::playback::{PlaybackReport, PlaybackSequencer};
use crate::domain::clip::ClipCatalog;

/// PlayClip Handler
///
/// 先查目录，未找到时直接返回 NotFound，不会尝试连接
pub struct PlayClipHandler {
    catalog: Arc<ClipCatalog>,
    sequencer: PlaybackSequencer,
}

impl PlayClipHandler {
    pub fn new(catalog: Arc<ClipCatalog>, sequencer: PlaybackSequencer) -> Self {
        Self { catalog, sequencer }
    }

    pub async fn handle(&self, command: PlayClip) -> Result<PlaybackReport, PlaybackError> {
        let clip = self
            .catalog
            .lookup(&command.name)
            .ok_or_else(|| PlaybackError::not_found(&command.name))?;

        tracing::info!(
            clip = %command.name,
            target = %command.target,
            frames = clip.frame_count(),
            "Play requested"
        );

        self.sequencer.play(clip, command.target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::playback::PlaybackConfig;
    use crate::infrastructure::memory::InMemorySessionRegistry;
    use crate::testing::{clip, target, RecordingVoiceSender};
    use std::time::Duration;

    fn handler(sender: &RecordingVoiceSender) -> PlayClipHandler {
        let mut builder = ClipCatalog::builder();
        builder.insert(clip("air-horn", &[b"f0", b"f1"]));
        let sequencer = PlaybackSequencer::new(
            PlaybackConfig {
                settle_delay: Duration::ZERO,
            },
            Arc::new(sender.clone()),
            Arc::new(InMemorySessionRegistry::new()),
        );
        PlayClipHandler::new(Arc::new(builder.build()), sequencer)
    }

    #[tokio::test]
    async fn test_unknown_clip_never_connects() {
        let sender = RecordingVoiceSender::new();
        let handler = handler(&sender);

        let err = handler
            .handle(PlayClip::new("sad-trombone", target()))
            .await
            .unwrap_err();

        assert!(matches!(err, PlaybackError::NotFound(name) if name == "sad-trombone"));
        assert_eq!(sender.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_known_clip_is_played() {
        let sender = RecordingVoiceSender::new();
        let handler = handler(&sender);

        let report = handler
            .handle(PlayClip::new("air-horn", target()))
            .await
            .unwrap();

        assert_eq!(report.frames_sent, 2);
        assert_eq!(sender.connect_count(), 1);
    }
}
