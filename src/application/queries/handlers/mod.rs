//! Query Handlers 实现

mod clip_handlers;

pub use clip_handlers::*;
