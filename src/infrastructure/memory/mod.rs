//! Memory Layer - In-Memory State Management
//!
//! 实现 SessionRegistry，记录正在进行的语音会话

mod session_registry;

pub use session_registry::InMemorySessionRegistry;
