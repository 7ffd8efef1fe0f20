pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod writer;

pub use config::Conventions;
pub use error::{Result, StatError};
pub use model::Stat;

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_logging(args.verbose);

    let conv = match &args.config {
        Some(path) => Conventions::load(path)?,
        None => Conventions::default(),
    };

    // 1. ── Read & aggregate ───────────────────────────────────────────
    let stat = read_stats(&args.stat, &conv).with_context(|| "Reading statistics")?;

    // 2. ── Write header ───────────────────────────────────────────────
    generate(&stat, &conv, &args.out)
        .with_context(|| format!("Generating {}", args.out.display()))?;

    Ok(())
}

/// Read every statistics file and fold all records into one [`Stat`].
pub fn read_stats(paths: &[PathBuf], conv: &Conventions) -> Result<Stat> {
    let records = parser::load(paths, conv)?;
    let stat = Stat::from_records(&records);
    info!(
        "Aggregated {} records: {} scopes, {} switches, {} factories",
        records.len(),
        stat.scopes().len(),
        stat.switches().len(),
        stat.factories().len()
    );
    if stat.is_empty() {
        warn!("No scope, switch or factory records found; the header will be empty");
    }
    Ok(stat)
}

pub fn generate(stat: &Stat, conv: &Conventions, out: &Path) -> Result<()> {
    writer::c::emit(stat, conv, out)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ccheader={level}")));

    // A subscriber may already be installed when embedded; keep it.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
