// Analysis engine: wires the pipeline stages together for one call.
//
// A call is synchronous and self-contained: it owns its documents,
// matrix, and groups, computes everything from scratch, and returns a
// terminal Analysis value. Nothing is cached or shared across calls, so
// a host may run any number of analyses concurrently with different
// configurations and they cannot interfere.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::discrepancy::{self, Issue};
use crate::embed::hashing::HashingEmbedder;
use crate::embed::traits::Embedder;
use crate::grouping::{self, Group};
use crate::normalize::Normalizer;
use crate::report;
use crate::similarity::{MatrixError, SimilarityMatrix};

/// A document as it enters the engine: identifier plus raw text.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub id: String,
    pub raw: String,
}

/// A fully ingested document. Immutable once built; the pipeline only
/// reads from here on.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub raw: String,
    pub normalized: String,
    pub embedding: Vec<f64>,
}

/// One group together with its discrepancy scan results.
#[derive(Debug, Clone, Serialize)]
pub struct GroupAnalysis {
    pub group: Group,
    pub issues: Vec<Issue>,
}

/// Simplified status a hosting service stores or displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerdictLabel {
    AllUnique,
    AllDuplicate,
    HasDuplicates,
}

impl VerdictLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::AllUnique => "ALL_UNIQUE",
            VerdictLabel::AllDuplicate => "ALL_DUPLICATE",
            VerdictLabel::HasDuplicates => "HAS_DUPLICATES",
        }
    }
}

impl std::fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The collapsed outcome a host derives status and score from.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    /// 0-100. For HasDuplicates this is the duplicated-document share
    /// of the corpus; AllUnique pins 100 and AllDuplicate pins 5.
    pub score: u32,
    pub message: String,
}

impl Verdict {
    /// Derive the verdict from the group shapes.
    pub fn from_groups(groups: &[GroupAnalysis], total: usize) -> Self {
        let duplicate_groups: Vec<&GroupAnalysis> =
            groups.iter().filter(|g| g.group.is_duplicate()).collect();

        if duplicate_groups.is_empty() {
            return Self {
                label: VerdictLabel::AllUnique,
                score: 100,
                message: format!("All {total} documents are unique. No duplicates detected."),
            };
        }

        if duplicate_groups.len() == 1 && duplicate_groups[0].group.len() == total {
            return Self {
                label: VerdictLabel::AllDuplicate,
                score: 5,
                message: format!("All {total} documents are highly similar, likely duplicates."),
            };
        }

        // Each duplicate group contributes its size minus the one
        // "original" (the seed).
        let duplicated: usize = duplicate_groups.iter().map(|g| g.group.len() - 1).sum();
        let score = ((duplicated * 100) / total).min(100) as u32;
        Self {
            label: VerdictLabel::HasDuplicates,
            score,
            message: format!(
                "Found {} duplicate group(s) with {} duplicate document(s). Total analyzed: {}",
                duplicate_groups.len(),
                duplicated,
                total
            ),
        }
    }
}

/// Everything one completed analysis produced. Terminal; never mutated
/// after generation.
#[derive(Debug)]
pub struct Analysis {
    pub documents: Vec<Document>,
    pub matrix: SimilarityMatrix,
    pub groups: Vec<GroupAnalysis>,
    pub report: String,
    pub duplicate_groups: usize,
    pub unique_submissions: usize,
    pub verdict: Verdict,
}

/// Machine-readable summary for the --json output and host storage.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub label: &'static str,
    pub score: u32,
    pub message: String,
    pub total_documents: usize,
    pub duplicate_groups: usize,
    pub unique_submissions: usize,
    pub average_similarity: f64,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Serialize)]
pub struct GroupSummary {
    pub members: Vec<String>,
    pub duplicate: bool,
    pub issues: Vec<String>,
}

impl Analysis {
    pub fn summary(&self) -> Summary {
        Summary {
            label: self.verdict.label.as_str(),
            score: self.verdict.score,
            message: self.verdict.message.clone(),
            total_documents: self.matrix.len(),
            duplicate_groups: self.duplicate_groups,
            unique_submissions: self.unique_submissions,
            average_similarity: self.matrix.mean(),
            groups: self
                .groups
                .iter()
                .map(|g| GroupSummary {
                    members: g.group.members.clone(),
                    duplicate: g.group.is_duplicate(),
                    issues: g.issues.iter().map(|i| i.to_string()).collect(),
                })
                .collect(),
        }
    }
}

/// How one analysis call ended.
///
/// Too few valid documents is a soft, distinguishable outcome; it is
/// not an error, and hosts surface it differently from a completed run.
#[derive(Debug)]
pub enum Outcome {
    Completed(Analysis),
    InsufficientDocuments { valid: usize },
}

/// Run the full pipeline over the given documents.
///
/// Fails only on malformed boundary input (a duplicate document id or,
/// through the matrix constructor, mismatched dimensions), and always
/// before grouping starts. Everything downstream of validation is total.
pub fn analyze(config: &AnalysisConfig, sources: Vec<SourceDocument>) -> Result<Outcome> {
    config.validate()?;

    // Duplicate ids are a caller bug; reject before any real work.
    {
        let mut seen = std::collections::HashSet::new();
        for source in &sources {
            if !seen.insert(source.id.as_str()) {
                return Err(MatrixError::DuplicateId(source.id.clone()).into());
            }
        }
    }

    // Normalize, dropping documents with nothing left to compare.
    let normalizer = Normalizer::new();
    let mut kept: Vec<(SourceDocument, String)> = Vec::with_capacity(sources.len());
    for source in sources {
        let normalized = normalizer.normalize(&source.raw);
        if normalized.is_empty() {
            info!(id = %source.id, "Excluding document: empty after normalization");
            continue;
        }
        kept.push((source, normalized));
    }

    if kept.len() < 2 {
        return Ok(Outcome::InsufficientDocuments { valid: kept.len() });
    }

    // Embed and build the matrix.
    let embedder = HashingEmbedder::new(config);
    let texts: Vec<String> = kept.iter().map(|(_, n)| n.clone()).collect();
    let vectors = embedder.embed_batch(&texts);
    debug!(
        documents = kept.len(),
        dimensions = embedder.dimensions(),
        "Embedded corpus"
    );

    let documents: Vec<Document> = kept
        .into_iter()
        .zip(vectors.iter())
        .map(|((source, normalized), embedding)| Document {
            id: source.id,
            raw: source.raw,
            normalized,
            embedding: embedding.clone(),
        })
        .collect();

    let ids: Vec<String> = documents.iter().map(|d| d.id.clone()).collect();
    let matrix = SimilarityMatrix::build(ids, &vectors)?;

    // Group, then scan each group for discrepancies.
    let groups = grouping::group_documents(&matrix, config.threshold);
    let analyses: Vec<GroupAnalysis> = groups
        .into_iter()
        .map(|group| {
            let texts: Vec<&str> = group
                .members
                .iter()
                .filter_map(|id| documents.iter().find(|d| &d.id == id))
                .map(|d| d.normalized.as_str())
                .collect();
            let issues = discrepancy::analyze_group(&texts);
            GroupAnalysis { group, issues }
        })
        .collect();

    let report = report::generate(config, &analyses, &matrix);
    let duplicate_groups = analyses.iter().filter(|g| g.group.is_duplicate()).count();
    let unique_submissions = analyses.len() - duplicate_groups;
    let verdict = Verdict::from_groups(&analyses, matrix.len());

    info!(
        documents = matrix.len(),
        groups = analyses.len(),
        duplicate_groups,
        verdict = %verdict.label,
        "Analysis complete"
    );

    Ok(Outcome::Completed(Analysis {
        documents,
        matrix,
        groups: analyses,
        report,
        duplicate_groups,
        unique_submissions,
        verdict,
    }))
}
