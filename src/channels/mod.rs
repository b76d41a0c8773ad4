//! Channel list input

pub mod source;

pub use source::{ChannelEntry, ChannelSource, SourceError};
