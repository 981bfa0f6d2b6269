//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：音效目录与活跃会话

mod clip_queries;

pub mod handlers;

pub use clip_queries::*;
