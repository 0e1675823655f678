//! blockcorpus - convert a layout-dataset page manifest to a corpus
//! Parquet file
//!
//! One-shot batch converter: the whole manifest is loaded, every
//! annotated object becomes one block row, and the row set is written to
//! the destination in a single Parquet file. Any error aborts the run;
//! a failed run produces no usable output.
//!
//! # Usage
//!
//! ```bash
//! blockcorpus pages.jsonl -o corpus.parquet
//! blockcorpus pages.jsonl -o corpus.parquet -v   # debug logging
//! ```

mod manifest;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Convert a layout-dataset page manifest into a corpus block Parquet file
#[derive(Parser, Debug)]
#[command(name = "blockcorpus")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSONL manifest of page records (image paths resolved relative to it)
    manifest: PathBuf,

    /// Destination Parquet file, overwritten if it exists
    #[arg(short, long)]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "warn" }),
    )
    .init();

    let pages = manifest::load(&args.manifest)?;
    let page_count = pages.len();

    let rows = blockcorpus_core::build(pages)
        .with_context(|| format!("failed to build block records from {}", args.manifest.display()))?;

    blockcorpus_core::persist(&rows, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "Converted {} pages into {} blocks: {}",
        page_count,
        rows.len(),
        args.output.display()
    );
    Ok(())
}
