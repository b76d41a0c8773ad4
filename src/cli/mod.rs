//! CLI module for dipls

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod auth;
pub mod commands;

#[derive(Parser, Debug)]
#[command(name = "dipls", about = "Generate PLS playlists for DI.fm Premium channels")]
#[command(version, author)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (default: ~/.config/dipls/settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write playlists for every channel in a saved channel selector
    Generate(GenerateArgs),

    /// List the channels found in a saved channel selector
    Channels {
        /// Channel selector XML saved from the browser's inspector
        #[arg(value_name = "XML_FILE")]
        xml_file: PathBuf,
    },

    /// Show or initialize the settings file
    Config {
        /// Write the default settings file (overwrites an existing one)
        #[arg(long)]
        init: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Channel selector XML saved from the browser's inspector
    #[arg(value_name = "XML_FILE")]
    pub xml_file: PathBuf,

    /// Low bandwidth streams (AAC)
    #[arg(short, long, conflicts_with = "ultra")]
    pub low: bool,

    /// Ultra bandwidth streams
    #[arg(short, long, conflicts_with = "low")]
    pub ultra: bool,

    /// Server mirror to include, in order (repeatable)
    #[arg(short = 's', long = "server", visible_alias = "servers", value_name = "HOST")]
    pub servers: Vec<String>,

    /// Output directory (default: working directory)
    #[arg(short, long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Maximum servers per channel (default: all, or 1 with --file; 0 means no cap)
    #[arg(short, long)]
    pub max: Option<usize>,

    /// Write a single playlist with this name (no extension)
    #[arg(short, long, value_name = "NAME")]
    pub file: Option<String>,

    /// Listen key from your DI.fm account (prompted for when omitted)
    #[arg(long, env = "DIFM_LISTEN_KEY", hide_env_values = true)]
    pub listen_key: Option<String>,

    /// Show what would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,
}
