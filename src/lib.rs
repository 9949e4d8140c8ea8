//! odstat: render-time statistics from Blender Benchmark Open Data.
//!
//! The binary is a thin shell: it resolves configuration, opens a feed, pushes
//! every line through an [`odstat_core::Pipeline`] and renders the outcome.
//!
//! # Architecture
//!
//! ```text
//! Feed (file | latest snapshot) ──► Pipeline ──► Outcome ──► report
//! ```

pub mod cli;
pub mod report;

use anyhow::Context;
use cli::Cli;
use odstat_core::config::Config;
use odstat_core::{LineOutcome, Outcome, Pipeline};
use odstat_feeds::{Feed, FileFeed, LatestFeed};
use std::io::{BufRead, Write};
use std::time::Instant;

/// Resolve configuration and run the command described by `cli`.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to built-in config");
            Config::defaults()
        }),
    };
    let stdout = std::io::stdout();
    run_with(cli, config, &mut stdout.lock())
}

/// Run against an explicit configuration, writing the report to `out`.
pub fn run_with(cli: &Cli, mut config: Config, out: &mut impl Write) -> anyhow::Result<()> {
    if cli.download {
        let feed = LatestFeed::new(&config.source.latest_url);
        writeln!(out, "Downloading data from {}", feed.url())?;
        let dir = std::env::current_dir().context("resolving current directory")?;
        let dest = feed.save_to(&dir)?;
        writeln!(out, "Snapshot extracted to {}", dest.display())?;
        return Ok(());
    }

    cli.apply(&mut config.filter);
    let filter = config.filter.build()?;

    let feed: Box<dyn Feed> = match &cli.input {
        Some(path) if !cli.latest => Box::new(FileFeed::new(path)),
        _ => {
            writeln!(out, "Downloading data from {}", config.source.latest_url)?;
            Box::new(LatestFeed::new(&config.source.latest_url))
        }
    };
    let reader = feed.open()?;
    tracing::info!(source = %feed.describe(), mode = ?cli.mode(), "starting pass");

    let started = Instant::now();
    let mut pipeline = Pipeline::new(cli.mode(), filter);
    for (n, line) in reader.split(b'\n').enumerate() {
        let line = line.with_context(|| format!("reading line {} of {}", n + 1, feed.describe()))?;
        if let LineOutcome::Unsupported { schema, raw } = pipeline.feed_bytes(&line) {
            report::write_unsupported(out, &schema, &raw)?;
        }
    }
    let output = pipeline.finish();
    let elapsed = started.elapsed();

    match &output.outcome {
        Outcome::Aggregate(results) => {
            let header = report::Header {
                target_os: &config.filter.target_os,
                target_devices: &config.filter.target_devices,
                entries: output.diagnostics.entries,
                elapsed,
            };
            report::write_results(out, &header, results, cli.verbose)?;
        }
        Outcome::Inventory(counts) => {
            report::write_inventory(out, counts, output.diagnostics.entries)?
        }
    }

    if output.diagnostics.malformed > 0 {
        tracing::warn!(count = output.diagnostics.malformed, "malformed lines skipped");
    }
    Ok(())
}
