//! Listen key acquisition
//!
//! The key comes from `--listen-key` / `DIFM_LISTEN_KEY`, or a non-echoing
//! prompt. It is only ever held in memory.

use anyhow::{Context, Result};
use dialoguer::Password;
use tracing::{debug, warn};

use crate::playlist::ListenKey;

const PROMPT: &str = "Enter your DI.fm listen key";

/// Resolve the listen key, prompting when none was supplied
pub fn listen_key(provided: Option<String>) -> Result<ListenKey> {
    let key = match provided {
        Some(key) => {
            debug!("Using listen key from command line or environment");
            key
        }
        None => Password::new()
            .with_prompt(PROMPT)
            .allow_empty_password(true)
            .interact()
            .context("Failed to read listen key")?,
    };

    let key = ListenKey::new(key);
    if key.is_empty() {
        warn!("Listen key is empty, generated streams will not authenticate");
    }
    Ok(key)
}
