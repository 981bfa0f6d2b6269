//! Clip Library Port - 音效来源抽象
//!
//! 启动时一次性加载完整的音效目录

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::clip::{ClipCatalog, DecodeError};

/// 目录加载错误
///
/// 启动期致命错误：进程不能带着不完整的目录运行
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Sound directory not found or not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed clip file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("Clip file name is not a valid clip name: {0}")]
    InvalidName(PathBuf),

    #[error("Loader task failed: {0}")]
    Task(String),
}

/// Clip Library Port
#[async_trait]
pub trait ClipLibraryPort: Send + Sync {
    /// 加载全部音效，任意文件失败则整体失败
    async fn load(&self) -> Result<ClipCatalog, LoadError>;
}
