//! Command Handlers 实现

mod play_handlers;

pub use play_handlers::*;
