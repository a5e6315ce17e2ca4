// Per-group discrepancy analysis.
//
// Documents similar enough to share a group should also agree with each
// other. Two checks run over the group's normalized texts:
//
//   - Timeline: 4-digit years (2000-2099). More than one distinct year
//     across the group means the copies disagree on when.
//   - Policy modality: the closed keyword set {mandatory, must,
//     optional, may, prohibited}. A group that says both
//     "mandatory"/"must" and "optional" contradicts itself.
//
// Both checks work on the union of matches across all members, so a
// conflict between any two members is enough. Singleton groups have
// nothing to disagree with and always come back clean.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Serialize;

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b20\d{2}\b").expect("year pattern is a valid regex"));

static MODALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(mandatory|must|optional|may|prohibited)\b")
        .expect("modality pattern is a valid regex")
});

/// A semantic conflict detected across documents in the same group.
///
/// The Display form is the exact wording that appears in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Issue {
    /// Members mention more than one distinct year. Years are held in
    /// ascending order.
    TimelineConflict { years: Vec<String> },
    /// Members mix mandatory/must language with optional language.
    PolicyContradiction,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Issue::TimelineConflict { years } => {
                write!(f, "Timeline conflict detected: {}", years.join(", "))
            }
            Issue::PolicyContradiction => {
                write!(f, "Policy contradiction: mandatory vs optional statements found")
            }
        }
    }
}

/// Scan one group's normalized texts for conflicts.
///
/// Pure and total: never fails, never panics. Issue order is fixed,
/// timeline conflict first, then policy contradiction.
pub fn analyze_group(texts: &[&str]) -> Vec<Issue> {
    if texts.len() <= 1 {
        return Vec::new();
    }

    let mut issues = Vec::new();

    // BTreeSet gives dedup and ascending order in one pass.
    let years: BTreeSet<String> = texts
        .iter()
        .flat_map(|t| YEAR.find_iter(t).map(|m| m.as_str().to_string()))
        .collect();
    if years.len() > 1 {
        issues.push(Issue::TimelineConflict {
            years: years.into_iter().collect(),
        });
    }

    let modalities: HashSet<String> = texts
        .iter()
        .flat_map(|t| MODALITY.find_iter(t).map(|m| m.as_str().to_lowercase()))
        .collect();
    let has_binding = modalities.contains("mandatory") || modalities.contains("must");
    if has_binding && modalities.contains("optional") {
        issues.push(Issue::PolicyContradiction);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_group_is_always_clean() {
        let issues = analyze_group(&["submission from 2021 is mandatory but was 2023 optional"]);
        assert!(issues.is_empty());
    }

    #[test]
    fn distinct_years_raise_timeline_conflict() {
        let issues = analyze_group(&[
            "project deadline moved to 2023 in the revision",
            "the original plan named 2021 as the deadline",
        ]);
        assert_eq!(
            issues,
            vec![Issue::TimelineConflict {
                years: vec!["2021".to_string(), "2023".to_string()]
            }]
        );
        assert_eq!(
            issues[0].to_string(),
            "Timeline conflict detected: 2021, 2023"
        );
    }

    #[test]
    fn same_year_everywhere_is_clean() {
        let issues = analyze_group(&[
            "both copies agree on 2022 as the cutoff",
            "the cutoff stays 2022 per this copy",
        ]);
        assert!(issues.is_empty());
    }

    #[test]
    fn mandatory_vs_optional_raises_policy_contradiction() {
        let issues = analyze_group(&[
            "attendance is mandatory for all participants",
            "attendance is optional for remote participants",
        ]);
        assert_eq!(issues, vec![Issue::PolicyContradiction]);
        assert_eq!(
            issues[0].to_string(),
            "Policy contradiction: mandatory vs optional statements found"
        );
    }

    #[test]
    fn must_vs_optional_also_contradicts() {
        let issues = analyze_group(&[
            "applicants must attach transcripts",
            "attaching transcripts is optional",
        ]);
        assert_eq!(issues, vec![Issue::PolicyContradiction]);
    }

    #[test]
    fn may_and_prohibited_alone_do_not_contradict() {
        let issues = analyze_group(&[
            "participants may submit early",
            "late submissions are prohibited",
        ]);
        assert!(issues.is_empty());
    }

    #[test]
    fn timeline_precedes_policy_when_both_fire() {
        let issues = analyze_group(&[
            "the 2021 policy makes attendance mandatory",
            "the 2023 revision makes attendance optional",
        ]);
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], Issue::TimelineConflict { .. }));
        assert_eq!(issues[1], Issue::PolicyContradiction);
    }

    #[test]
    fn keyword_match_is_whole_word() {
        // "mayonnaise" must not count as "may", "musty" not as "must"
        let issues = analyze_group(&[
            "the musty cellar stored mayonnaise and it was optional",
            "storage rules are unchanged",
        ]);
        assert!(issues.is_empty());
    }

    #[test]
    fn years_outside_the_2000s_are_ignored() {
        let issues = analyze_group(&[
            "founded in 1999 and restructured in 1987",
            "company history mentions 2022 only",
        ]);
        assert!(issues.is_empty());
    }
}
