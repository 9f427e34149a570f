use anyhow::{Context, Result};
use clap::Parser;
use e4map::{MapConfig, MapSession};
use std::io::Write;

mod args;
mod compositor;
mod ops;
mod replay;

use args::{Cli, Commands};

/// Config file if one is given, stock layout under `--root` otherwise,
/// then per-path overrides.
fn resolve_config(cli: &Cli) -> Result<MapConfig> {
    let mut config = match &cli.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::with_root(&cli.root),
    };
    if let Some(path) = &cli.key_image {
        config.key_image = path.clone();
    }
    if let Some(path) = &cli.map_image {
        config.visible_image = path.clone();
    }
    if let Some(path) = &cli.metadata {
        config.metadata = path.clone();
    }
    Ok(config)
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = resolve_config(&cli)?;
    let session = MapSession::load(&config)
        .with_context(|| format!("Failed to load map from {:?}", config.key_image))?;

    let command = cli.command.unwrap_or(Commands::Regions { json: false });
    match command {
        Commands::Regions { json } => ops::list_regions(&session, json, out),
        Commands::Probe { x, y } => ops::probe(&session, x, y, out),
        Commands::Snapshot {
            output,
            hover,
            select,
        } => ops::snapshot(&session, &output, hover, select, out),
        Commands::Overlay { output } => ops::overlay(&session, &output),
        Commands::Replay { script } => {
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read replay script {:?}", script))?;
            let events = replay::parse_script(&text)
                .with_context(|| format!("Invalid replay script {:?}", script))?;
            log::info!("Replaying {} pointer events", events.len());
            replay::replay(&session, &events, out)?;
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = std::str::FromStr::from_str(&cli.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}
