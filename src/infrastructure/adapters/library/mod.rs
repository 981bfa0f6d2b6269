//! Clip Library Adapter - 文件系统音效库

mod fs_clip_library;

pub use fs_clip_library::{FsClipLibrary, DEFAULT_CLIP_EXTENSION};
