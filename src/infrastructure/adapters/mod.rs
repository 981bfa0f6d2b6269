//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod library;
pub mod voice;

pub use library::*;
pub use voice::*;
