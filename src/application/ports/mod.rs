//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod clip_library;
mod session_registry;
mod voice_sender;

pub use clip_library::{ClipLibraryPort, LoadError};
pub use session_registry::{ActiveSession, PlaybackState, SessionRegistryPort};
pub use voice_sender::{VoiceError, VoiceSenderPort, VoiceSessionPort};
