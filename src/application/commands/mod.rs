//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：播放请求

mod play_commands;

pub mod handlers;

pub use play_commands::*;
