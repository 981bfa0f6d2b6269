//! HTTP Handlers

mod bots;
mod clips;
mod ping;
mod play;
mod sessions;

pub use bots::*;
pub use clips::*;
pub use ping::*;
pub use play::*;
pub use sessions::*;
