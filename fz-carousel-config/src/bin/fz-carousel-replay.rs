use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use fz_carousel_config::{ConfigLoader, replay};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "fz-carousel-replay",
    about = "Replay a recorded carousel session against the simulated host"
)]
struct Cli {
    /// Carousel config (TOML or JSON); falls back to the usual lookup
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON array of timed steps
    #[arg(long)]
    script: PathBuf,
    /// Print JSON lines instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.with_path(path);
    }
    let load = loader.load().context("failed to load carousel config")?;

    let raw = fs::read_to_string(&cli.script)
        .with_context(|| format!("failed to read script {}", cli.script.display()))?;
    let steps = replay::parse_script(&raw)
        .with_context(|| format!("invalid script {}", cli.script.display()))?;

    let records = replay::run(load.config, &steps);

    let mut out = io::stdout().lock();
    for record in &records {
        if cli.json {
            writeln!(out, "{}", serde_json::to_string(record)?)?;
        } else {
            writeln!(out, "{record}")?;
        }
    }
    Ok(())
}
