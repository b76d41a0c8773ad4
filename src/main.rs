//! dipls - Generate PLS playlists for DI.fm Premium channels

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod channels;
mod cli;
mod config;
mod generate;
mod playlist;
mod utils;

use cli::{Cli, Commands};

/// Malformed channel options are always reported, whatever `RUST_LOG` says
const CHANNEL_DIAGNOSTICS: &str = "dipls::channels";

/// Build the log filter from `RUST_LOG`, falling back to the built-in default
///
/// A `RUST_LOG` that says nothing about channel parsing still gets a `warn`
/// floor for it.
fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    match env.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) if directives.contains(CHANNEL_DIAGNOSTICS) => EnvFilter::new(directives),
        Some(directives) => EnvFilter::new(format!("{},{}=warn", directives, CHANNEL_DIAGNOSTICS)),
        None if verbose => EnvFilter::new("dipls=debug"),
        None => EnvFilter::new("dipls=info"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for progress output
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(log_filter(cli.verbose, env.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Generate(args) => {
            cli::commands::generate_playlists(args, cli.config).await?;
        }
        Commands::Channels { xml_file } => {
            cli::commands::channels(xml_file).await?;
        }
        Commands::Config { init } => {
            cli::commands::config(cli.config, init)?;
        }
        Commands::Completion { shell } => {
            cli::commands::completion(shell);
        }
    }

    Ok(())
}
