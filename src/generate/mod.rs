//! Playlist generation module

pub mod engine;
pub mod storage;

pub use engine::{resolve_servers, OutputMode, PlaylistGenerator};
pub use storage::PlaylistStorage;
