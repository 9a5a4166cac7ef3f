//! Country Instability Index CLI
//!
//! Scores every tier-1 country from one signal snapshot.
//!
//! Usage:
//!   cii-score --signals data/signals.json \
//!             --previous data/previous_scores.json \
//!             --output data/cii_scores.json

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use country_instability::{loader, CiiConfig, CountryScore, InstabilityEngine, LearningStatus, ScoreLevel};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "cii-score",
    about = "Compute Country Instability Index scores from a signal snapshot"
)]
struct Args {
    /// Path to signal snapshot JSON file
    #[arg(short, long, default_value = "data/signals.json")]
    signals: PathBuf,

    /// Path to engine config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Previous-score snapshot; also marks cached scores as available
    #[arg(short, long)]
    previous: Option<PathBuf>,

    /// Number of countries to list
    #[arg(short, long, default_value_t = 10)]
    top: usize,

    /// Output JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct ScoreReport<'a> {
    generated_at: DateTime<Utc>,
    learning: LearningStatus,
    scores: &'a [CountryScore],
    previous_scores: &'a HashMap<String, u8>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "country_instability=debug,cii_score=debug,info" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("{}", "=".repeat(60));
    info!("Country Instability Index");
    info!("{}", "=".repeat(60));

    let config = match &args.config {
        Some(path) => CiiConfig::from_file(path)?,
        None => CiiConfig::default(),
    };

    let mut engine = InstabilityEngine::with_config(config);
    engine.start_learning();

    if let Some(path) = &args.previous {
        let previous = loader::load_previous_scores(path)?;
        engine.seed_previous_scores(&previous);
        engine.set_has_cached_scores(true);
    }

    let snapshot = loader::load_snapshot(&args.signals)?;
    snapshot.ingest_into(&mut engine);

    let scores = engine.calculate_scores();

    info!("\nTop {} countries by instability:", args.top.min(scores.len()));
    for s in scores.iter().take(args.top) {
        info!(
            "  {:>3} {:<9} | {:<14} | {:?} {:+} | U{:>3} C{:>3} S{:>3} I{:>3}",
            s.score,
            s.level.as_str(),
            s.name,
            s.trend,
            s.change_24h,
            s.components.unrest,
            s.components.conflict,
            s.components.security,
            s.components.information
        );
    }

    let learning = engine.learning_status();
    if learning.in_learning {
        info!(
            "\nLearning mode: {:.0}% ({} min remaining) - scores are provisional",
            learning.progress, learning.remaining_minutes
        );
    } else {
        info!("\nLearning mode complete (cached scores: {})", learning.has_cached_scores);
    }

    if let Some(output) = &args.output {
        info!("\nWriting output to {:?}", output);
        let report = ScoreReport {
            generated_at: Utc::now(),
            learning,
            scores: &scores,
            previous_scores: engine.previous_scores(),
        };
        let file = File::create(output)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &report)?;
    }

    // Summary
    info!("\n{}", "=".repeat(60));
    info!("SUMMARY");
    info!("{}", "=".repeat(60));
    info!("Countries scored: {}", scores.len());
    let mut by_level: BTreeMap<ScoreLevel, usize> = BTreeMap::new();
    for s in &scores {
        *by_level.entry(s.level).or_insert(0) += 1;
    }
    for (level, count) in by_level.iter().rev() {
        info!("  {}: {} countries", level.as_str(), count);
    }

    Ok(())
}
