//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 播放时序配置
    #[serde(default)]
    pub playback: PlaybackSettings,

    /// 音效目录配置
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// 语音传输配置
    #[serde(default)]
    pub voice: VoiceConfig,

    /// bot 身份列表，每个身份一个独立的音效目录
    #[serde(default = "default_bots")]
    pub bots: Vec<BotConfig>,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            playback: PlaybackSettings::default(),
            catalog: CatalogConfig::default(),
            voice: VoiceConfig::default(),
            bots: default_bots(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 播放时序配置
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackSettings {
    /// 连接后、断开前各等待的毫秒数
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

fn default_settle_delay_ms() -> u64 {
    250
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl PlaybackSettings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// 音效目录配置
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// 音效文件扩展名（不含点）
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "dca".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

/// 语音传输配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceConfig {
    /// 录制文件输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 每帧时长（毫秒），决定发送节奏
    #[serde(default = "default_frame_duration_ms")]
    pub frame_duration_ms: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/recordings")
}

fn default_frame_duration_ms() -> u64 {
    20
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            frame_duration_ms: default_frame_duration_ms(),
        }
    }
}

impl VoiceConfig {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_duration_ms)
    }
}

/// 单个 bot 身份
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BotConfig {
    pub name: String,

    /// 音效根目录
    pub sound_dir: PathBuf,
}

fn default_bots() -> Vec<BotConfig> {
    vec![BotConfig {
        name: "default".to_string(),
        sound_dir: PathBuf::from("sounds"),
    }]
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5080);
        assert_eq!(config.playback.settle_delay(), Duration::from_millis(250));
        assert_eq!(config.catalog.extension, "dca");
        assert_eq!(config.voice.frame_duration(), Duration::from_millis(20));
        assert_eq!(config.bots, default_bots());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_parse_multiple_bots() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [playback]
            settle_delay_ms = 100

            [[bots]]
            name = "airhorn"
            sound_dir = "sounds/airhorn"

            [[bots]]
            name = "memes"
            sound_dir = "/srv/memes"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.addr(), "0.0.0.0:9000");
        assert_eq!(config.playback.settle_delay_ms, 100);
        assert_eq!(config.bots.len(), 2);
        assert_eq!(config.bots[1].sound_dir, PathBuf::from("/srv/memes"));
    }

    #[test]
    fn test_default_config_has_one_bot() {
        let config = AppConfig::default();
        assert_eq!(config.bots.len(), 1);
        assert_eq!(config.bots[0].name, "default");
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
