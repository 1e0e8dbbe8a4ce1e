/*
 * Particle Field
 *
 * Opens a window filled with a slowly drifting particle network.
 * Nearby particles are joined by faint lines, the pointer pulls lines
 * towards itself, and clicking anywhere spawns a short-lived burst.
 *
 * Settings come from an optional TOML file, with a few command line
 * overrides on top.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use particle_field::{app, FieldConfig, Launch};

#[derive(Parser, Debug)]
#[command(name = "particle-field", version, about = "Interactive particle-network background")]
struct Cli {
    /// TOML file with field settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ambient particles
    #[arg(long)]
    ambient: Option<usize>,

    /// Seed the random source for a reproducible field
    #[arg(long)]
    seed: Option<u64>,

    /// Tick at a fixed rate (Hz) instead of once per displayed frame
    #[arg(long)]
    fixed_rate: Option<f32>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger; verbosity only applies to this crate, not the graphics stack
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("warn,particle_field={level}")),
    )
    .init();

    let mut config = match &cli.config {
        Some(path) => FieldConfig::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => FieldConfig::default(),
    };

    if let Some(ambient) = cli.ambient {
        config.ambient_count = ambient;
    }
    if let Some(hz) = cli.fixed_rate {
        config.fixed_rate_hz = Some(hz);
    }
    config.validate().context("invalid settings")?;

    log::info!(
        "starting with {} ambient particles, bursts of {}",
        config.ambient_count,
        config.burst_size
    );

    app::run(Launch {
        config,
        seed: cli.seed,
    });

    Ok(())
}
