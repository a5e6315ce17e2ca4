// Corpus construction: turn a directory of submissions into the
// engine's input document list.
//
// Files are visited in filename order so the ingestion order (and with
// it the matrix order and the order-dependent grouping) is reproducible
// across runs on the same directory. Every exclusion is recorded and
// logged rather than silently dropped.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::engine::SourceDocument;
use crate::extract::{self, traits::Extraction};

/// Why a file did not make it into the corpus.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Extension is not one of txt/pdf/docx.
    UnsupportedExtension,
    /// The extractor returned an Unreadable outcome.
    Unreadable(String),
    /// Raw text was shorter than the configured minimum.
    TooShort { chars: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnsupportedExtension => write!(f, "unsupported file type"),
            SkipReason::Unreadable(reason) => write!(f, "unreadable: {reason}"),
            SkipReason::TooShort { chars } => {
                write!(f, "too short to compare ({chars} chars)")
            }
        }
    }
}

/// A file that was seen but excluded, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub name: String,
    pub reason: SkipReason,
}

/// The corpus builder's output: admitted documents plus the exclusions.
#[derive(Debug)]
pub struct CorpusBuild {
    pub documents: Vec<SourceDocument>,
    pub skipped: Vec<SkippedFile>,
}

/// Read every supported file under `dir` (non-recursive, like a drop
/// folder) and extract its text.
pub fn build_corpus(dir: &Path, config: &AnalysisConfig) -> Result<CorpusBuild> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .with_context(|| format!("Cannot read directory {}", dir.display()))?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.is_file() {
                path.file_name()?.to_str().map(|s| s.to_string())
            } else {
                None
            }
        })
        .collect();
    names.sort_unstable();

    let pb = ProgressBar::new(names.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Extracting [{bar:30}] {pos}/{len}")
            .unwrap(),
    );

    let mut documents = Vec::new();
    let mut skipped = Vec::new();

    for name in names {
        let path = dir.join(&name);
        let Some(extractor) = extract::extractor_for(&path) else {
            skipped.push(SkippedFile {
                name,
                reason: SkipReason::UnsupportedExtension,
            });
            pb.inc(1);
            continue;
        };

        match extractor.extract(&path) {
            Extraction::Text(raw) => {
                let trimmed_len = raw.trim().chars().count();
                if trimmed_len < config.min_chars {
                    warn!(
                        file = %name,
                        chars = trimmed_len,
                        "Skipping file: not enough text"
                    );
                    skipped.push(SkippedFile {
                        name,
                        reason: SkipReason::TooShort { chars: trimmed_len },
                    });
                } else {
                    documents.push(SourceDocument { id: name, raw });
                }
            }
            Extraction::Unreadable { reason } => {
                warn!(file = %name, reason = %reason, "Skipping unreadable file");
                skipped.push(SkippedFile {
                    name,
                    reason: SkipReason::Unreadable(reason),
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        admitted = documents.len(),
        skipped = skipped.len(),
        "Corpus built"
    );
    Ok(CorpusBuild { documents, skipped })
}
