use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use carbon::config::AnalysisConfig;
use carbon::corpus;
use carbon::engine::{self, Outcome};
use carbon::extract::{self, traits::Extraction};
use carbon::normalize::Normalizer;
use carbon::output::{terminal, truncate_chars};

/// Carbon: duplicate detection for document submissions.
///
/// Compares a folder of submitted documents against each other, groups
/// the ones that duplicate one another, and flags timeline and policy
/// contradictions inside each group.
#[derive(Parser)]
#[command(name = "carbon", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every supported document in a directory
    Analyze {
        /// Directory containing the submissions (txt, pdf, docx)
        dir: PathBuf,

        /// Grouping threshold in [0, 1] (overrides CARBON_THRESHOLD)
        #[arg(long)]
        threshold: Option<f64>,

        /// Feature-hashing dimensionality (overrides CARBON_DIMENSIONS)
        #[arg(long)]
        dimensions: Option<usize>,

        /// Minimum raw-text length for a file to count (overrides CARBON_MIN_CHARS)
        #[arg(long)]
        min_chars: Option<usize>,

        /// Write the plain-text report here (a directory gets a
        /// timestamped filename inside it)
        #[arg(long)]
        report_file: Option<PathBuf>,

        /// Print a machine-readable JSON summary instead of the colored view
        #[arg(long)]
        json: bool,
    },

    /// Show what extraction and normalization make of a single file
    Inspect {
        /// The file to inspect
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("carbon=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            dir,
            threshold,
            dimensions,
            min_chars,
            report_file,
            json,
        } => {
            let mut config = AnalysisConfig::load()?;
            if let Some(t) = threshold {
                config.threshold = t;
            }
            if let Some(d) = dimensions {
                config.dimensions = d;
            }
            if let Some(m) = min_chars {
                config.min_chars = m;
            }
            config.validate()?;

            let build = corpus::build_corpus(&dir, &config)?;
            if !json {
                terminal::display_skipped(&build.skipped);
            }

            match engine::analyze(&config, build.documents)? {
                Outcome::Completed(analysis) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&analysis.summary())?);
                    } else {
                        terminal::display_analysis(&analysis);
                    }

                    if let Some(target) = report_file {
                        let path = resolve_report_path(target);
                        fs::write(&path, &analysis.report)?;
                        info!(path = %path.display(), "Report written");
                        if !json {
                            println!("\nReport written to {}", path.display().to_string().bold());
                        }
                    }
                }
                Outcome::InsufficientDocuments { valid } => {
                    if json {
                        let payload = serde_json::json!({
                            "label": "INSUFFICIENT_DOCUMENTS",
                            "valid_documents": valid,
                        });
                        println!("{}", serde_json::to_string_pretty(&payload)?);
                    } else {
                        terminal::display_insufficient(valid);
                    }
                }
            }
        }

        Commands::Inspect { file } => {
            let Some(extractor) = extract::extractor_for(&file) else {
                anyhow::bail!(
                    "Unsupported file type: {} (supported: txt, pdf, docx)",
                    file.display()
                );
            };

            println!("Extractor: {}", extractor.kind());
            match extractor.extract(&file) {
                Extraction::Text(raw) => {
                    let normalized = Normalizer::new().normalize(&raw);
                    println!("Raw text: {} chars", raw.chars().count());
                    println!("Normalized: {} chars", normalized.chars().count());
                    if normalized.is_empty() {
                        println!(
                            "{}",
                            "Nothing left after cleanup; this file would be excluded".yellow()
                        );
                    } else {
                        println!("\n{}", truncate_chars(&normalized, 300).dimmed());
                    }
                }
                Extraction::Unreadable { reason } => {
                    println!("{} {}", "Unreadable:".red().bold(), reason);
                }
            }
        }
    }

    Ok(())
}

/// Turn the --report-file argument into a concrete file path. A
/// directory argument gets a timestamped filename inside it.
fn resolve_report_path(target: PathBuf) -> PathBuf {
    if target.is_dir() {
        let name = format!(
            "carbon-report-{}.txt",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        target.join(name)
    } else {
        target
    }
}
