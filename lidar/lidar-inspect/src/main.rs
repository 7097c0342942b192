//! lidar-inspect
//!
//! Browses a recorded LiDAR frame sequence by partition and applies
//! origin moves, driven by commands from a script file or stdin.
//!
//! # Commands
//!
//! - `view <original|train|validation|test>` - Switch the active view
//! - `prev` / `next` - Step within the active view
//! - `move <n|s|e|w> [step] [m|mm]` - Move the sensor origin of the shown frame
//! - `revert` - Undo every move on the shown frame
//! - `commit` - Save frames to `--output` (if given) and accept all moves
//! - `status` - Print the current status
//!
//! Blank lines and lines starting with `#` are ignored.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lidar_inspect::{InspectConfig, Session, load_frames, load_labels};
use lidar_nav::{LabelMap, split_frames};
use lidar_types::{FrameStore, InMemoryFrameStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Partition-aware LiDAR frame inspection
#[derive(Parser)]
#[command(name = "lidar-inspect")]
#[command(about = "Browse and augment partitioned LiDAR frames", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file holding an array of frames
    #[arg(long)]
    frames: PathBuf,

    /// JSON file mapping frame ids to partition labels
    #[arg(long)]
    labels: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Command script (stdin when absent)
    #[arg(long)]
    script: Option<PathBuf>,

    /// File `commit` writes frames to
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = InspectConfig::load(cli.config.as_deref()).context("loading config")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let frames = load_frames(&cli.frames).context("loading frames")?;
    let store = InMemoryFrameStore::new(frames).context("indexing frames")?;

    let labels = match (&cli.labels, &config.split) {
        (Some(path), _) => load_labels(path).context("loading labels")?,
        (None, Some(split)) => {
            info!(seed = ?split.seed, "splitting frames from config");
            split_frames(&store.ids(), split.ratios, split.seed).context("splitting frames")?
        }
        (None, None) => LabelMap::new(),
    };

    let mut session = Session::new(store, &labels, &config)?;
    if let Some(output) = cli.output {
        session = session.with_output(output);
    }
    println!("{}", session.status());

    let reader: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening script {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    for line in reader.lines() {
        let line = line.context("reading commands")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let outcome = session.execute_line(line);
        println!("> {line}: {outcome}");
        println!("{}", session.status());
    }

    Ok(())
}
