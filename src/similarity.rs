// Pairwise similarity: the N×N cosine matrix every later stage reads.
//
// The matrix owns the id ordering: row/column k belongs to ids()[k], in
// ingestion order. Construction is the validation boundary for the one
// fatal error class the engine has (malformed id/matrix shapes). A
// SimilarityMatrix that exists is well-formed, so grouping and
// reporting can stay total.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Cosine similarity between two vectors.
///
/// Zero-norm vectors (texts with no surviving tokens) compare as 0.
/// The raw cosine is returned unclamped; negative values are legal and
/// simply land in the lowest similarity band downstream.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Malformed input at the matrix boundary. Anything here is a caller
/// bug, not a data condition, and it is rejected before grouping starts.
#[derive(Debug, Error, PartialEq)]
pub enum MatrixError {
    #[error("document id appears more than once: {0:?}")]
    DuplicateId(String),
    #[error("{ids} ids but {rows} matrix rows")]
    IdCountMismatch { ids: usize, rows: usize },
    #[error("matrix row {row} has {len} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Square, symmetric similarity matrix over one analysis call's corpus.
///
/// Diagonal entries are exactly 1.0. Computed once per call and
/// discarded with the analysis; nothing is cached across calls.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityMatrix {
    ids: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Build the matrix from embedding vectors, one per id, in order.
    pub fn build(ids: Vec<String>, vectors: &[Vec<f64>]) -> Result<Self, MatrixError> {
        if ids.len() != vectors.len() {
            return Err(MatrixError::IdCountMismatch {
                ids: ids.len(),
                rows: vectors.len(),
            });
        }
        check_unique(&ids)?;

        // Full-matrix computation in parallel. cosine(a, b) and
        // cosine(b, a) run the identical f64 operation sequence, so the
        // two halves come out bitwise equal without mirroring.
        let n = ids.len();
        let values: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                (0..n)
                    .map(|j| {
                        if i == j {
                            1.0
                        } else {
                            cosine(&vectors[i], &vectors[j])
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self { ids, values })
    }

    /// Wrap precomputed values. Used by tests and by callers that score
    /// pairs through some other channel.
    pub fn from_values(ids: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        if ids.len() != values.len() {
            return Err(MatrixError::IdCountMismatch {
                ids: ids.len(),
                rows: values.len(),
            });
        }
        for (row, r) in values.iter().enumerate() {
            if r.len() != ids.len() {
                return Err(MatrixError::RaggedRow {
                    row,
                    len: r.len(),
                    expected: ids.len(),
                });
            }
        }
        check_unique(&ids)?;
        Ok(Self { ids, values })
    }

    /// Row/column ids, in order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of documents (matrix side length).
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Similarity between documents at positions i and j.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Position of an id in the matrix ordering.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|x| x == id)
    }

    /// Mean over the entire matrix, diagonal and both symmetric halves
    /// included. Intentionally biased toward 1; reports have always
    /// quoted this number, so it is reproduced rather than corrected to
    /// an upper-triangular mean.
    pub fn mean(&self) -> f64 {
        let n = self.len();
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = self.values.iter().flatten().sum();
        sum / (n * n) as f64
    }
}

fn check_unique(ids: &[String]) -> Result<(), MatrixError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(MatrixError::DuplicateId(id.clone()));
        }
    }
    Ok(())
}

/// Similarity band: the label a pairwise score renders under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimilarityBand {
    FullyIdentical,
    HighlySimilar,
    ModeratelySimilar,
    SlightlySimilar,
    DistinctContent,
}

impl SimilarityBand {
    /// Determine the band from a raw cosine score. Unclamped input:
    /// anything below 0.30, including negative cosines, is Distinct.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.90 => SimilarityBand::FullyIdentical,
            s if s >= 0.75 => SimilarityBand::HighlySimilar,
            s if s >= 0.50 => SimilarityBand::ModeratelySimilar,
            s if s >= 0.30 => SimilarityBand::SlightlySimilar,
            _ => SimilarityBand::DistinctContent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityBand::FullyIdentical => "Fully Identical",
            SimilarityBand::HighlySimilar => "Highly Similar",
            SimilarityBand::ModeratelySimilar => "Moderately Similar",
            SimilarityBand::SlightlySimilar => "Slightly Similar",
            SimilarityBand::DistinctContent => "Distinct Content",
        }
    }
}

impl std::fmt::Display for SimilarityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let vectors = vec![
            vec![1.0, 0.0, 1.0],
            vec![0.5, 0.5, 0.0],
            vec![0.0, 1.0, 1.0],
        ];
        let m = SimilarityMatrix::build(ids(&["a", "b", "c"]), &vectors).unwrap();
        for i in 0..3 {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i), "asymmetric at ({i},{j})");
            }
        }
    }

    #[test]
    fn identical_vectors_score_one() {
        let v = vec![0.3, 0.0, 0.7, 0.1];
        let m = SimilarityMatrix::build(ids(&["a", "b"]), &[v.clone(), v]).unwrap();
        assert!((m.get(0, 1) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn negative_cosine_is_preserved() {
        let score = cosine(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((score + 1.0).abs() < 1e-9);
        assert_eq!(SimilarityBand::from_score(score), SimilarityBand::DistinctContent);
    }

    #[test]
    fn mean_includes_diagonal_and_both_halves() {
        let m = SimilarityMatrix::from_values(
            ids(&["a", "b"]),
            vec![vec![1.0, 0.5], vec![0.5, 1.0]],
        )
        .unwrap();
        assert!((m.mean() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let v = vec![1.0];
        let err = SimilarityMatrix::build(ids(&["a", "a"]), &[v.clone(), v]).unwrap_err();
        assert_eq!(err, MatrixError::DuplicateId("a".to_string()));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let err = SimilarityMatrix::from_values(
            ids(&["a", "b"]),
            vec![vec![1.0, 0.5]],
        )
        .unwrap_err();
        assert!(matches!(err, MatrixError::IdCountMismatch { .. }));

        let err = SimilarityMatrix::from_values(
            ids(&["a", "b"]),
            vec![vec![1.0, 0.5], vec![0.5]],
        )
        .unwrap_err();
        assert!(matches!(err, MatrixError::RaggedRow { .. }));
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(SimilarityBand::from_score(0.90).as_str(), "Fully Identical");
        assert_eq!(SimilarityBand::from_score(0.8999).as_str(), "Highly Similar");
        assert_eq!(SimilarityBand::from_score(0.75).as_str(), "Highly Similar");
        assert_eq!(
            SimilarityBand::from_score(0.7499).as_str(),
            "Moderately Similar"
        );
        assert_eq!(SimilarityBand::from_score(0.50).as_str(), "Moderately Similar");
        assert_eq!(SimilarityBand::from_score(0.30).as_str(), "Slightly Similar");
        assert_eq!(SimilarityBand::from_score(0.0).as_str(), "Distinct Content");
        assert_eq!(SimilarityBand::from_score(-0.2).as_str(), "Distinct Content");
    }
}
