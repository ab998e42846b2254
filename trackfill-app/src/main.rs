//! Trackfill
//!
//! Fills missing frames in per-car tracking tables produced by a plate
//! recognition pipeline. Reads a CSV of observations, interpolates car and
//! plate boxes for every frame an object was lost, and writes a contiguous
//! table per object.

mod app;
mod errors;

use app::{LoggingConfig, RunConfig};
use clap::Parser;
use std::path::PathBuf;
use trackfill_core::{DEFAULT_GAP_WARN_THRESHOLD, DEFAULT_MAX_GAP};
use trackfill_data::WriteOptions;

/// Trackfill - interpolate missing frames in tracked plate detections
#[derive(Parser, Debug)]
#[command(name = "trackfill")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV with one row per (frame, car) observation
    #[arg(default_value = "test.csv")]
    input: PathBuf,

    /// Output CSV path [default: <input stem>_interpolated.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write boxes as `[x1 y1 x2 y2]` like the input instead of bare values
    #[arg(long)]
    bracketed_output: bool,

    /// Write run statistics as JSON to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Warn about gaps longer than this many frames
    #[arg(long, default_value_t = DEFAULT_GAP_WARN_THRESHOLD)]
    gap_warn_threshold: u64,

    /// Fail instead of filling more than this many consecutive missing frames
    #[arg(long, default_value_t = DEFAULT_MAX_GAP)]
    max_gap: u64,
}

fn main() {
    let args = Args::parse();

    let mut config = RunConfig::new(args.input)
        .with_write_options(WriteOptions {
            bracketed_boxes: args.bracketed_output,
        })
        .with_logging(LoggingConfig {
            level: args.log_level,
        })
        .with_gap_warn_threshold(args.gap_warn_threshold)
        .with_max_gap(args.max_gap);
    if let Some(output) = args.output {
        config = config.with_output(output);
    }
    if let Some(summary) = args.summary {
        config = config.with_summary_path(summary);
    }

    config.init_logging();

    if let Err(e) = config.run() {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
