//! Playlist generation run

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::PlaylistStorage;
use crate::channels::{ChannelEntry, SourceError};
use crate::playlist::PlaylistBuilder;

/// How channels are grouped into files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// One `<channel key>.pls` per channel
    PerChannel,
    /// Every channel accumulated into `<stem>.pls`
    SingleFile { stem: String },
}

impl OutputMode {
    /// Single-file mode when a filename is given, per-channel otherwise
    ///
    /// The name is taken without extension; a trailing `.pls` is dropped.
    pub fn from_file_name(name: Option<&str>) -> Self {
        match name {
            Some(name) => {
                let stem = name.strip_suffix(".pls").unwrap_or(name);
                OutputMode::SingleFile {
                    stem: stem.to_string(),
                }
            }
            None => OutputMode::PerChannel,
        }
    }
}

/// Cap the server list at `max` entries
///
/// Without a cap, single-file playlists use only the first server while
/// per-channel playlists use all of them. A cap of 0 counts as no cap.
pub fn resolve_servers(
    mut servers: Vec<String>,
    max: Option<usize>,
    mode: &OutputMode,
) -> Vec<String> {
    let max = max.filter(|&m| m > 0).unwrap_or(match mode {
        OutputMode::SingleFile { .. } => 1,
        OutputMode::PerChannel => servers.len(),
    });
    servers.truncate(max);
    servers
}

/// Result of a generation run
#[derive(Debug, Default)]
pub struct GenerateResult {
    pub channels: usize,
    pub entries: usize,
    pub files: Vec<PathBuf>,
}

/// Drives the playlist builder over a channel list and writes the output
pub struct PlaylistGenerator {
    builder: PlaylistBuilder,
    storage: PlaylistStorage,
    mode: OutputMode,
}

impl PlaylistGenerator {
    pub fn new(builder: PlaylistBuilder, storage: PlaylistStorage, mode: OutputMode) -> Self {
        Self {
            builder,
            storage,
            mode,
        }
    }

    /// Process every channel, writing files according to the output mode
    ///
    /// A channel list error aborts the run; files already written stay on disk.
    pub async fn run<I>(&mut self, channels: I) -> Result<GenerateResult>
    where
        I: IntoIterator<Item = Result<ChannelEntry, SourceError>>,
    {
        let mut result = GenerateResult::default();

        self.storage.init().await?;

        debug!(
            "Generating with {} server(s) into {} ({:?})",
            self.builder.servers().len(),
            self.storage.root().display(),
            self.mode
        );

        for channel in channels {
            let channel = channel.context("Failed to read channel list")?;
            println!(" .. processing: {} ..", channel.name.cyan());

            match &self.mode {
                OutputMode::PerChannel => {
                    self.builder.reset();
                    self.builder.append(&channel.key, &channel.name);

                    let path = self
                        .storage
                        .write_playlist(&channel.key, &self.builder.serialize())
                        .await?;
                    result.entries += self.builder.entry_count();
                    result.files.push(path);
                }
                OutputMode::SingleFile { .. } => {
                    self.builder.append(&channel.key, &channel.name);
                }
            }

            result.channels += 1;
        }

        if let OutputMode::SingleFile { stem } = &self.mode {
            if self.builder.is_empty() {
                warn!("No playlist entries collected, writing an empty playlist");
            }
            let path = self
                .storage
                .write_playlist(stem, &self.builder.serialize())
                .await?;
            result.entries += self.builder.entry_count();
            result.files.push(path);
        }

        info!(
            "Generated {} playlist file(s) for {} channel(s)",
            result.files.len(),
            result.channels
        );
        Ok(result)
    }
}
