//! Ogg Recorder Voice Sender - 录制型语音传输
//!
//! 每个语音会话写成一个 Ogg Opus 文件 (RFC 7845)：
//! `{output_dir}/{guild_id}/{channel_id}-{session}.ogg`
//!
//! 按帧时长以实时速率消费帧，发送方因此受到与真实语音连接相同的背压。

use async_trait::async_trait;
use ogg::writing::PacketWriter;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};
use uuid::Uuid;

use crate::application::ports::{VoiceError, VoiceSenderPort, VoiceSessionPort};
use crate::domain::clip::Frame;
use crate::domain::voice::VoiceTarget;

/// Opus granule position 固定使用 48kHz
const GRANULE_RATE: u32 = 48000;

/// 录制传输配置
#[derive(Debug, Clone)]
pub struct OggRecorderConfig {
    /// 录音输出目录
    pub output_dir: PathBuf,
    /// 每帧时长，决定消费速率
    pub frame_duration: Duration,
}

impl Default for OggRecorderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data/recordings"),
            frame_duration: Duration::from_millis(20),
        }
    }
}

/// 录制型语音传输
pub struct OggRecorderVoiceSender {
    config: OggRecorderConfig,
}

impl OggRecorderVoiceSender {
    pub fn new(config: OggRecorderConfig) -> Self {
        tracing::info!(
            output_dir = %config.output_dir.display(),
            frame_duration_ms = config.frame_duration.as_millis() as u64,
            "OggRecorderVoiceSender initialized"
        );
        Self { config }
    }
}

#[async_trait]
impl VoiceSenderPort for OggRecorderVoiceSender {
    async fn connect(&self, target: VoiceTarget) -> Result<Box<dyn VoiceSessionPort>, VoiceError> {
        let guild_dir = self.config.output_dir.join(target.guild_id.to_string());
        tokio::fs::create_dir_all(&guild_dir).await.map_err(|e| {
            VoiceError::Unreachable(format!("{}: {}", guild_dir.display(), e))
        })?;

        let session_id = Uuid::new_v4();
        let path = guild_dir.join(format!("{}-{}.ogg", target.channel_id, session_id));

        tracing::info!(
            target = %target,
            path = %path.display(),
            "Recording voice session opened"
        );

        Ok(Box::new(OggRecorderSession::new(
            path,
            self.config.frame_duration,
        )))
    }
}

/// 单个录制会话
struct OggRecorderSession {
    path: PathBuf,
    writer: Option<PacketWriter<'static, Vec<u8>>>,
    serial: u32,
    frame_samples: u64,
    granule_pos: u64,
    /// 延后一帧写入，最后一帧才能带上 EndStream 标记
    pending: Option<(Vec<u8>, u64)>,
    headers_written: bool,
    speaking: bool,
    frames_received: usize,
    ticker: Interval,
}

impl OggRecorderSession {
    fn new(path: PathBuf, frame_duration: Duration) -> Self {
        let mut ticker = tokio::time::interval(frame_duration);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            path,
            writer: Some(PacketWriter::new(Vec::new())),
            serial: rand_serial(),
            frame_samples: frame_duration.as_micros() as u64 * GRANULE_RATE as u64 / 1_000_000,
            granule_pos: 0,
            pending: None,
            headers_written: false,
            speaking: false,
            frames_received: 0,
            ticker,
        }
    }

    fn write_headers(&mut self, first_frame: &[u8]) -> Result<(), VoiceError> {
        let channels = match opus::packet::get_nb_channels(first_frame) {
            Ok(opus::Channels::Mono) => 1,
            _ => 2,
        };
        let serial = self.serial;
        let writer = self.writer.as_mut().ok_or(VoiceError::Closed)?;

        writer
            .write_packet(opus_head(channels), serial, ogg::PacketWriteEndInfo::EndPage, 0)
            .map_err(|e| VoiceError::Transport(format!("Failed to write Opus head: {}", e)))?;
        writer
            .write_packet(opus_tags(), serial, ogg::PacketWriteEndInfo::EndPage, 0)
            .map_err(|e| VoiceError::Transport(format!("Failed to write Opus tags: {}", e)))?;

        self.headers_written = true;
        Ok(())
    }

    fn write_pending(&mut self, end_info: ogg::PacketWriteEndInfo) -> Result<(), VoiceError> {
        let Some((packet, granule_pos)) = self.pending.take() else {
            return Ok(());
        };
        let serial = self.serial;
        let writer = self.writer.as_mut().ok_or(VoiceError::Closed)?;

        writer
            .write_packet(packet, serial, end_info, granule_pos)
            .map_err(|e| VoiceError::Transport(format!("Failed to write Opus packet: {}", e)))
    }

    /// 该帧的 48kHz 样本数，无法解析 TOC 时按配置的帧时长计算
    fn samples_of(&self, frame: &[u8]) -> u64 {
        match opus::packet::get_nb_samples(frame, GRANULE_RATE) {
            Ok(samples) => samples as u64,
            Err(_) => self.frame_samples,
        }
    }
}

#[async_trait]
impl VoiceSessionPort for OggRecorderSession {
    async fn set_speaking(&mut self, speaking: bool) {
        tracing::debug!(path = %self.path.display(), speaking = speaking, "Speaking state");
        self.speaking = speaking;
    }

    async fn send(&mut self, frame: &Frame) -> Result<(), VoiceError> {
        if self.writer.is_none() {
            return Err(VoiceError::Closed);
        }
        if !self.speaking && self.frames_received == 0 {
            tracing::warn!(path = %self.path.display(), "Frame sent before speaking was set");
        }

        // 按实时速率接收
        self.ticker.tick().await;
        self.frames_received += 1;

        // 空帧不写入 Ogg 流，只占用一个时隙
        if frame.is_empty() {
            return Ok(());
        }

        if !self.headers_written {
            self.write_headers(frame.as_bytes())?;
        }

        self.write_pending(ogg::PacketWriteEndInfo::NormalPacket)?;
        self.granule_pos += self.samples_of(frame.as_bytes());
        self.pending = Some((frame.as_bytes().to_vec(), self.granule_pos));

        Ok(())
    }

    async fn disconnect(&mut self) {
        if let Err(e) = self.write_pending(ogg::PacketWriteEndInfo::EndStream) {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to finish Ogg stream");
        }

        let Some(writer) = self.writer.take() else {
            return;
        };

        if !self.headers_written {
            tracing::debug!(path = %self.path.display(), "Nothing recorded, skipping file");
            return;
        }

        let data = writer.into_inner();
        match tokio::fs::write(&self.path, &data).await {
            Ok(()) => tracing::info!(
                path = %self.path.display(),
                frames = self.frames_received,
                bytes = data.len(),
                "Recording voice session closed"
            ),
            Err(e) => tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to write recording"
            ),
        }
    }
}

/// Opus Head 包 (RFC 7845)
fn opus_head(channels: u8) -> Vec<u8> {
    let mut head = Vec::with_capacity(19);
    head.extend_from_slice(b"OpusHead");
    head.push(1); // Version
    head.push(channels);
    head.extend_from_slice(&0u16.to_le_bytes()); // Pre-skip
    head.extend_from_slice(&GRANULE_RATE.to_le_bytes());
    head.extend_from_slice(&0i16.to_le_bytes()); // Output gain
    head.push(0); // Channel mapping family
    head
}

/// Opus Tags 包
fn opus_tags() -> Vec<u8> {
    let vendor = env!("CARGO_PKG_NAME");
    let mut tags = Vec::new();
    tags.extend_from_slice(b"OpusTags");
    tags.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    tags.extend_from_slice(vendor.as_bytes());
    tags.extend_from_slice(&0u32.to_le_bytes()); // No user comments
    tags
}

fn rand_serial() -> u32 {
    let bytes = Uuid::new_v4().into_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
