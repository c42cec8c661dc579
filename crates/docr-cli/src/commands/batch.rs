//! Batch processing command for multiple document files.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use docr_core::models::config::DocrConfig;
use docr_core::models::record::ProcessOutcome;
use docr_core::ocr::TesseractEngine;
use docr_core::output::save_result;
use docr_core::processor::DocumentProcessor;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file JSON results (default from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// Result of routing a single file.
struct BatchEntry {
    path: PathBuf,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = if let Some(path) = config_path {
        DocrConfig::from_file(std::path::Path::new(path))?
    } else {
        DocrConfig::default()
    };

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = args.output_dir.unwrap_or_else(|| config.output.dir.clone());
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let engine = Arc::new(TesseractEngine::new(&config.ocr));
    let processor = DocumentProcessor::new(engine, &config);

    let mut entries = Vec::with_capacity(files.len());
    for path in files {
        let entry = match processor.process_document(&path) {
            Ok(outcome) => match &outcome {
                ProcessOutcome::Completed(_) => {
                    if let Err(e) = save_result(&outcome, &path, &output_dir) {
                        warn!("Failed to save result for {}: {}", path.display(), e);
                    }
                    BatchEntry { path, error: None }
                }
                ProcessOutcome::Rejected(failure) => {
                    warn!("Rejected {}: {}", path.display(), failure.error);
                    BatchEntry {
                        error: Some(failure.error.clone()),
                        path,
                    }
                }
            },
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                BatchEntry {
                    error: Some(e.to_string()),
                    path,
                }
            }
        };

        entries.push(entry);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let failed: Vec<&BatchEntry> = entries.iter().filter(|e| e.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        entries.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(entries.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for entry in &failed {
            println!(
                "  - {}: {}",
                entry.path.display(),
                entry.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}
