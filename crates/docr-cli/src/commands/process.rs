//! Process command - extract a structured record from a single document.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use docr_core::models::config::DocrConfig;
use docr_core::models::record::ProcessOutcome;
use docr_core::ocr::TesseractEngine;
use docr_core::processor::DocumentProcessor;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show the aggregate confidence score
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = if let Some(path) = config_path {
        DocrConfig::from_file(std::path::Path::new(path))?
    } else {
        DocrConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let engine = Arc::new(TesseractEngine::new(&config.ocr));
    let processor = DocumentProcessor::new(engine, &config);
    let outcome = processor.process_document(&args.input)?;

    let output = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        if let ProcessOutcome::Completed(doc) = &outcome {
            println!();
            println!(
                "{} Document confidence: {:.2}",
                style("ℹ").blue(),
                doc.confidence
            );
            println!("{} Pages: {}", style("ℹ").blue(), doc.total_pages);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_outcome(outcome: &ProcessOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Text => Ok(format_text(outcome)),
    }
}

fn format_text(outcome: &ProcessOutcome) -> String {
    let doc = match outcome {
        ProcessOutcome::Completed(doc) => doc,
        ProcessOutcome::Rejected(failure) => {
            return format!("{}: {}\n", failure.file_path, failure.error);
        }
    };

    let mut output = String::new();

    output.push_str(&format!("File: {}\n", doc.file_path));
    output.push_str(&format!("Pages: {}\n", doc.total_pages));
    output.push_str(&format!("Confidence: {:.2}\n", doc.confidence));
    output.push('\n');

    output.push_str(&format!("Vendor: {}\n", doc.fields.vendor));
    if !doc.fields.dates.is_empty() {
        output.push_str(&format!("Dates: {}\n", doc.fields.dates.join(", ")));
    }
    if !doc.fields.amounts.is_empty() {
        let amounts: Vec<String> = doc.fields.amounts.iter().map(|a| a.to_string()).collect();
        output.push_str(&format!("Amounts: {}\n", amounts.join(", ")));
    }

    if !doc.fields.line_items.is_empty() {
        output.push_str("\nLine items:\n");
        for item in &doc.fields.line_items {
            output.push_str(&format!("  - {}\n", item.description));
        }
    }

    output
}
