//! Playlist file output

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::utils::sanitize_file_stem;

/// Extension given to every written playlist
pub const PLS_EXTENSION: &str = "pls";

/// Writes playlist files into an output directory
///
/// Existing files are overwritten. In dry-run mode paths are resolved but
/// nothing touches the filesystem.
pub struct PlaylistStorage {
    root: PathBuf,
    dry_run: bool,
}

impl PlaylistStorage {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a playlist with the given stem is written to
    pub fn playlist_path(&self, stem: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", sanitize_file_stem(stem), PLS_EXTENSION))
    }

    /// Create the output directory if it does not exist
    pub async fn init(&self) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }

        fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create output directory {}", self.root.display()))?;

        debug!("Output directory ready at {}", self.root.display());
        Ok(())
    }

    /// Write one playlist and return its path
    pub async fn write_playlist(&self, stem: &str, content: &str) -> Result<PathBuf> {
        let path = self.playlist_path(stem);

        if self.dry_run {
            debug!("Dry run, not writing {}", path.display());
            return Ok(path);
        }

        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write playlist {}", path.display()))?;

        debug!("Wrote playlist: {} ({} bytes)", path.display(), content.len());
        Ok(path)
    }
}
