//! HTTP Handlers

mod ping;
mod voice;

pub use ping::*;
pub use voice::*;
