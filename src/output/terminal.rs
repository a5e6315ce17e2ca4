// Colored terminal output for analysis results.
//
// This module handles all terminal-specific formatting: colors and
// layout. The plain report string stays untouched; what gets written
// to a report file is the byte-stable artifact, and this is just the
// interactive view of the same data.

use colored::Colorize;

use crate::corpus::SkippedFile;
use crate::engine::{Analysis, VerdictLabel};
use crate::similarity::SimilarityBand;

/// Display a completed analysis: groups, pair scores, issues, summary.
pub fn display_analysis(analysis: &Analysis) {
    println!(
        "\n{}",
        format!(
            "=== Document Analysis ({} documents, {} groups) ===",
            analysis.matrix.len(),
            analysis.groups.len()
        )
        .bold()
    );
    println!();

    for (idx, group_analysis) in analysis.groups.iter().enumerate() {
        let group = &group_analysis.group;
        let tag = if group.is_duplicate() {
            "DUPLICATE".red().bold()
        } else {
            "UNIQUE".green()
        };
        println!("  Group {} [{}]", idx + 1, tag);

        for member in &group.members {
            println!("    - {member}");
        }

        if group.is_duplicate() {
            for i in 0..group.members.len() {
                for j in (i + 1)..group.members.len() {
                    let (Some(pi), Some(pj)) = (
                        analysis.matrix.position(&group.members[i]),
                        analysis.matrix.position(&group.members[j]),
                    ) else {
                        continue;
                    };
                    let score = analysis.matrix.get(pi, pj);
                    let band = SimilarityBand::from_score(score);
                    println!(
                        "      {} ↔ {} : {:.2} {}",
                        group.members[i],
                        group.members[j],
                        score,
                        colorize_band(band)
                    );
                }
            }
        }

        for issue in &group_analysis.issues {
            println!("      {} {}", "!".yellow().bold(), issue.to_string().yellow());
        }
        println!();
    }

    // Summary block
    println!(
        "  Average similarity: {:.2}  |  Duplicate groups: {}  |  Unique: {}",
        analysis.matrix.mean(),
        analysis.duplicate_groups,
        analysis.unique_submissions
    );
    let label = match analysis.verdict.label {
        VerdictLabel::AllUnique => analysis.verdict.label.as_str().green().bold(),
        VerdictLabel::AllDuplicate => analysis.verdict.label.as_str().red().bold(),
        VerdictLabel::HasDuplicates => analysis.verdict.label.as_str().yellow().bold(),
    };
    println!(
        "  Verdict: {} (score {})  {}",
        label, analysis.verdict.score, analysis.verdict.message
    );
}

/// Display the soft not-enough-documents outcome.
pub fn display_insufficient(valid: usize) {
    println!(
        "\n{} Only {} valid document(s) after extraction and cleanup.",
        "~".yellow(),
        valid
    );
    println!("  At least two documents are needed for comparison.");
}

/// Display the files the corpus builder excluded, with reasons.
pub fn display_skipped(skipped: &[SkippedFile]) {
    if skipped.is_empty() {
        return;
    }
    println!("\n  {} file(s) excluded:", skipped.len());
    for file in skipped {
        println!("    {} {} ({})", "x".dimmed(), file.name, file.reason.to_string().dimmed());
    }
}

/// Colorize a similarity band label.
fn colorize_band(band: SimilarityBand) -> colored::ColoredString {
    let label = format!("({})", band.as_str());
    match band {
        SimilarityBand::FullyIdentical => label.red().bold(),
        SimilarityBand::HighlySimilar => label.bright_red(),
        SimilarityBand::ModeratelySimilar => label.yellow(),
        SimilarityBand::SlightlySimilar => label.bright_blue(),
        SimilarityBand::DistinctContent => label.dimmed(),
    }
}
