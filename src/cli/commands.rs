//! CLI command handlers

use anyhow::{Context, Result};
use clap_complete::generate;
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};

use super::GenerateArgs;
use crate::channels::ChannelSource;
use crate::config::{Settings, DEFAULT_SERVERS};
use crate::generate::{resolve_servers, OutputMode, PlaylistGenerator, PlaylistStorage};
use crate::playlist::{ListenKey, PlaylistBuilder, Quality};

/// Handle the `generate` command
pub async fn generate_playlists(args: GenerateArgs, config: Option<PathBuf>) -> Result<()> {
    let settings = Settings::load(config.as_deref())?;
    let xml = read_channel_document(&args.xml_file).await?;

    let mode = OutputMode::from_file_name(args.file.as_deref());

    let servers = if !args.servers.is_empty() {
        args.servers
    } else if !settings.servers.is_empty() {
        settings.servers
    } else {
        DEFAULT_SERVERS.iter().map(|s| s.to_string()).collect()
    };
    let servers = resolve_servers(servers, args.max.or(settings.max_servers), &mode);

    let quality = Quality::from_flags(args.low, args.ultra, settings.quality);
    let output_dir = args
        .dir
        .or(settings.output_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    // A dry run never builds a usable URL, so don't ask for the key
    let listen_key = if args.dry_run && args.listen_key.is_none() {
        ListenKey::new("")
    } else {
        super::auth::listen_key(args.listen_key)?
    };

    println!("{}", "Generating playlists...".cyan());
    println!("  Servers: {}", servers.join(", "));
    println!("  Quality: {}", quality);
    match &mode {
        OutputMode::PerChannel => println!("  Output:  one playlist per channel in {}", output_dir.display()),
        OutputMode::SingleFile { stem } => println!("  Output:  {}.pls in {}", stem, output_dir.display()),
    }
    if args.dry_run {
        println!("{}", "[DRY RUN] No files will be written".yellow());
    }
    println!();

    let builder = PlaylistBuilder::new(listen_key, servers, quality).with_domain(settings.domain);
    let storage = PlaylistStorage::new(output_dir).with_dry_run(args.dry_run);
    let mut generator = PlaylistGenerator::new(builder, storage, mode);

    let mut source = ChannelSource::new(&xml);
    let result = generator.run(source.by_ref()).await?;

    println!();
    if args.dry_run {
        println!("{}", "[DRY RUN] Would write:".yellow());
        for file in &result.files {
            println!("  {}", file.display());
        }
    } else {
        println!("{}", "Playlists written!".green().bold());
    }
    println!("  Channels: {}", result.channels);
    println!("  Files: {}", result.files.len());
    println!("  Entries: {}", result.entries);
    if source.malformed() > 0 {
        println!(
            "  {}",
            format!("Skipped {} malformed option(s)", source.malformed()).yellow()
        );
    }

    Ok(())
}

/// Handle the `channels` command
pub async fn channels(xml_file: PathBuf) -> Result<()> {
    let xml = read_channel_document(&xml_file).await?;
    let mut source = ChannelSource::new(&xml);

    let mut count = 0;
    for channel in source.by_ref() {
        let channel = channel.context("Failed to read channel list")?;
        println!("  {} - {}", channel.key.green(), channel.name);
        count += 1;
    }

    println!();
    if count == 0 {
        println!("{}", "No channels found.".yellow());
    } else {
        println!("Found {} channel(s).", count);
    }
    if source.malformed() > 0 {
        println!(
            "{}",
            format!("Skipped {} malformed option(s).", source.malformed()).yellow()
        );
    }

    Ok(())
}

/// Handle the `config` command
pub fn config(path: Option<PathBuf>, init: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => Settings::settings_path()?,
    };

    if init {
        Settings::default().save(&path)?;
        println!("{} {}", "Wrote default settings to".green(), path.display());
        return Ok(());
    }

    let settings = Settings::load(Some(&path))?;
    let status = if path.exists() { "" } else { " (not created, showing defaults)" };
    println!("Settings file: {}{}", path.display(), status);
    println!(
        "{}",
        serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?
    );

    Ok(())
}

/// Handle the `completion` command
pub fn completion(shell: clap_complete::Shell) {
    let mut cmd = <super::Cli as clap::CommandFactory>::command();
    generate(shell, &mut cmd, "dipls", &mut io::stdout());
}

async fn read_channel_document(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read channel list {}", path.display()))
}
