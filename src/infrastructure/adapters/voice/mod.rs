//! Voice Adapter - 语音传输实现

mod ogg_recorder;

pub use ogg_recorder::{OggRecorderConfig, OggRecorderVoiceSender};
