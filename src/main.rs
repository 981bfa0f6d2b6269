//! Soundbot - 语音频道音效播放服务
//!
//! 启动流程：加载配置 → 并发加载每个 bot 的音效目录 → 构建 Soundboard → 启动 HTTP 服务

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use futures_util::future::try_join_all;

use soundbot::application::{ClipLibraryPort, PlaybackConfig, Soundboard, VoiceSenderPort};
use soundbot::config::{load_config, load_config_from_path, print_config, AppConfig};
use soundbot::infrastructure::adapters::{FsClipLibrary, OggRecorderConfig, OggRecorderVoiceSender};
use soundbot::infrastructure::http::{AppState, HttpServer, ServerConfig};
use soundbot::infrastructure::memory::InMemorySessionRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match std::env::var_os("CONFIG_FILE") {
        Some(path) => load_config_from_path(Some(&PathBuf::from(path))),
        None => load_config(),
    }
    .context("Failed to load config")?;

    // 初始化日志
    let log_filter = format!(
        "{},soundbot={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Soundbot v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    let soundboards = build_soundboards(&config).await?;

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, AppState::new(soundboards));

    server
        .run_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Received shutdown signal"),
                Err(e) => tracing::error!(error = %e, "Failed to listen for ctrl-c"),
            }
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 所有 bot 的音效目录加载完成后才构建 Soundboard，任一目录加载失败则启动失败
async fn build_soundboards(config: &AppConfig) -> anyhow::Result<Vec<Arc<Soundboard>>> {
    let voice_sender: Arc<dyn VoiceSenderPort> =
        Arc::new(OggRecorderVoiceSender::new(OggRecorderConfig {
            output_dir: config.voice.output_dir.clone(),
            frame_duration: config.voice.frame_duration(),
        }));

    let catalogs = try_join_all(config.bots.iter().map(|bot| async move {
        let library = FsClipLibrary::new(&bot.sound_dir, config.catalog.extension.clone());
        library
            .load()
            .await
            .with_context(|| format!("Failed to load clips for bot '{}'", bot.name))
    }))
    .await?;

    let playback_config = PlaybackConfig {
        settle_delay: config.playback.settle_delay(),
    };

    Ok(config
        .bots
        .iter()
        .zip(catalogs)
        .map(|(bot, catalog)| {
            tracing::info!(bot = %bot.name, clips = catalog.len(), "Soundboard ready");
            Arc::new(Soundboard::new(
                bot.name.clone(),
                catalog,
                voice_sender.clone(),
                InMemorySessionRegistry::new().arc(),
                playback_config.clone(),
            ))
        })
        .collect())
}
