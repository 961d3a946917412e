use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;

use veiling_catalog::config::Settings;
use veiling_catalog::input::{self, InputBatch};
use veiling_catalog::{
    output, parse_record, Catalog, ParseOutcome, RawRecord, RuleStats, SlugRegistry,
};

#[derive(Parser)]
#[command(
    name = "veiling_catalog",
    about = "Turns veiling trade descriptions into a product catalog"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a code;description file and write products and commercial sets
    Parse {
        /// Input file with one `code;description` record per line
        input: PathBuf,
        /// Output directory (default: output_dir setting)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Disable parallel extraction
        #[arg(long)]
        sequential: bool,
    },
    /// Parse a single record and print what was extracted
    Inspect {
        code: String,
        description: String,
    },
    /// Parse a file and print rule statistics without writing anything
    Stats {
        input: PathBuf,
        #[arg(long)]
        sequential: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load().context("loading settings")?;
    info!(settings = ?settings, "starting");

    let result = match cli.command {
        Commands::Parse {
            input,
            output: out_arg,
            sequential,
        } => {
            if sequential {
                settings.parallel = false;
            }
            let out_dir = out_arg.unwrap_or_else(|| settings.output_dir.clone());
            let batch = load(&input)?;
            if batch.records.is_empty() {
                println!("No usable records in {}.", input.display());
                return Ok(());
            }

            let (catalog, stats) = process_records(&batch.records, &settings)?;
            let (products, sets) = catalog.into_parts();
            let written = output::write_catalog(&out_dir, &products, &sets)
                .with_context(|| format!("writing catalog to {}", out_dir.display()))?;

            println!(
                "Saved {} base products to {} and {} commercial sets to {}.",
                products.len(),
                written.products.display(),
                sets.len(),
                written.sets.display()
            );
            stats.report();
            Ok(())
        }
        Commands::Inspect { code, description } => {
            let record = RawRecord::new(code, description);
            if !record.is_well_formed() {
                anyhow::bail!("both a code and a description are needed");
            }
            let outcome = parse_record(&record);
            println!("{}", serde_json::to_string_pretty(&outcome.attributes)?);
            println!("\nnormalized: {}", outcome.normalized);
            for t in &outcome.trace {
                println!("  {:<32} {:?}", t.rule, t.removed);
            }
            if let Some(source) = outcome.color_source {
                println!("  color from {:?}", source);
            }
            Ok(())
        }
        Commands::Stats { input, sequential } => {
            if sequential {
                settings.parallel = false;
            }
            let batch = load(&input)?;
            let (catalog, stats) = process_records(&batch.records, &settings)?;
            println!(
                "{} base products, {} commercial sets.",
                catalog.products().len(),
                catalog.sets().len()
            );
            stats.report();
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn load(path: &Path) -> anyhow::Result<InputBatch> {
    let batch =
        input::read_path(path).with_context(|| format!("loading {}", path.display()))?;
    println!(
        "Loaded {} records from {} ({} dropped)",
        batch.records.len(),
        path.display(),
        batch.dropped
    );
    Ok(batch)
}

/// Extraction runs chunk by chunk (in parallel when enabled); aggregation is
/// sequential so slugs and first-seen base products follow input order.
fn process_records(
    records: &[RawRecord],
    settings: &Settings,
) -> anyhow::Result<(Catalog, RuleStats)> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut catalog = Catalog::new(SlugRegistry::new(), Utc::now());
    let mut stats = RuleStats::new();
    let mut done = 0usize;

    for chunk in records.chunks(settings.chunk_size.max(1)) {
        for outcome in parse_chunk(chunk, settings.parallel) {
            stats.record(&outcome);
            catalog.push(outcome);
            done += 1;
            if settings.progress_every > 0 && done % settings.progress_every == 0 {
                info!(done, total = records.len(), "records processed");
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    info!(
        records = done,
        products = catalog.products().len(),
        "extraction finished"
    );
    Ok((catalog, stats))
}

#[cfg(feature = "rayon")]
fn parse_chunk(chunk: &[RawRecord], parallel: bool) -> Vec<ParseOutcome> {
    use rayon::prelude::*;

    if parallel {
        chunk.par_iter().map(parse_record).collect()
    } else {
        chunk.iter().map(parse_record).collect()
    }
}

#[cfg(not(feature = "rayon"))]
fn parse_chunk(chunk: &[RawRecord], _parallel: bool) -> Vec<ParseOutcome> {
    chunk.iter().map(parse_record).collect()
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
