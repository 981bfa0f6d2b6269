//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SOUNDBOT_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SOUNDBOT_SERVER__PORT=8080`
/// - `SOUNDBOT_PLAYBACK__SETTLE_DELAY_MS=100`
/// - `SOUNDBOT_VOICE__OUTPUT_DIR=/var/lib/soundbot`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级），bots 列表由 serde 默认值提供
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5080)?
        .set_default("playback.settle_delay_ms", 250)?
        .set_default("catalog.extension", "dca")?
        .set_default("voice.output_dir", "data/recordings")?
        .set_default("voice.frame_duration_ms", 20)?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），例如 SOUNDBOT_SERVER__PORT=8080
    builder = builder.add_source(
        Environment::with_prefix("SOUNDBOT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.bots.is_empty() {
        return Err(ConfigError::ValidationError(
            "At least one bot must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for bot in &config.bots {
        if bot.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Bot name cannot be empty".to_string(),
            ));
        }
        if !seen.insert(bot.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Duplicate bot name: {}",
                bot.name
            )));
        }
    }

    if config.catalog.extension.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Clip extension cannot be empty".to_string(),
        ));
    }

    if config.catalog.extension.starts_with('.') {
        return Err(ConfigError::ValidationError(format!(
            "Clip extension must not start with '.': {}",
            config.catalog.extension
        )));
    }

    if config.voice.frame_duration_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Voice frame duration cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Settle Delay: {}ms", config.playback.settle_delay_ms);
    tracing::info!("Clip Extension: .{}", config.catalog.extension);
    tracing::info!("Recording Directory: {:?}", config.voice.output_dir);
    tracing::info!("Frame Duration: {}ms", config.voice.frame_duration_ms);
    for bot in &config.bots {
        tracing::info!("Bot: {} -> {:?}", bot.name, bot.sound_dir);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
