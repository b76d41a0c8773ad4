//! Stream quality selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stream quality, appended to the channel key as a suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Medium bitrate, no suffix
    #[default]
    Default,
    /// Low bandwidth AAC stream
    Low,
    /// Highest bitrate stream
    Ultra,
}

impl Quality {
    /// Suffix appended directly to the channel key in stream URLs
    pub fn suffix(self) -> &'static str {
        match self {
            Quality::Default => "",
            Quality::Low => "_aac",
            Quality::Ultra => "_hi",
        }
    }

    /// Pick a quality from the `--low` / `--ultra` flags, falling back to `fallback`
    pub fn from_flags(low: bool, ultra: bool, fallback: Quality) -> Quality {
        if low {
            Quality::Low
        } else if ultra {
            Quality::Ultra
        } else {
            fallback
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quality::Default => "default",
            Quality::Low => "low",
            Quality::Ultra => "ultra",
        };
        f.write_str(name)
    }
}
