//! Clip Context - 音效限界上下文
//!
//! 职责:
//! - 帧容器编解码
//! - Clip 聚合
//! - 只读音效目录

mod aggregate;
mod catalog;
pub mod container;
mod errors;
mod value_objects;

pub use aggregate::Clip;
pub use catalog::{CatalogBuilder, ClipCatalog};
pub use container::{decode_frames, encode_frames};
pub use errors::DecodeError;
pub use value_objects::{ClipName, Frame};
