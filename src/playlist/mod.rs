//! PLS playlist construction

pub mod builder;
pub mod listen_key;
pub mod quality;

pub use builder::{PlaylistBuilder, PlaylistEntry, DEFAULT_DOMAIN};
pub use listen_key::ListenKey;
pub use quality::Quality;
