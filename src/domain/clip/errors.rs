//! Clip Context - Errors

use thiserror::Error;

/// 帧容器解码错误
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("帧 {index} 数据被截断: 声明 {declared} 字节, 实际只有 {available} 字节")]
    TruncatedFrame {
        index: usize,
        declared: usize,
        available: usize,
    },

    #[error("帧 {index} 过大: {len} 字节超过 u16 上限")]
    FrameTooLarge { index: usize, len: usize },

    #[error("读取容器失败: {0}")]
    Io(#[from] std::io::Error),
}
