// Feature-hashing embedder.
//
// Each token hashes to a bucket in a fixed-width vector; the hash's top
// bit picks the sign, so unrelated tokens that collide on a bucket
// cancel in expectation instead of piling up. Vectors are l2-normalized
// so cosine similarity reduces to a dot product of unit vectors.
//
// There is no vocabulary table; the width is a configuration constant,
// independent of corpus size, and unseen words can never fail to embed.

use std::collections::HashSet;

use rayon::prelude::*;
use regex_lite::Regex;
use stop_words::LANGUAGE;
use tracing::warn;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::AnalysisConfig;

use super::traits::Embedder;

/// Feature-hashing embedder: the default vectorizer.
///
/// Runs locally, no model files, no cost. Can be swapped for something
/// heavier via the Embedder trait without touching the pipeline.
pub struct HashingEmbedder {
    dimensions: usize,
    stop_words: HashSet<String>,
    token_pattern: Regex,
}

impl HashingEmbedder {
    /// Build an embedder from the analysis configuration.
    ///
    /// An unknown stopword language tag falls back to English with a
    /// warning rather than failing the run.
    pub fn new(config: &AnalysisConfig) -> Self {
        let language = match config.stopword_language.to_lowercase().as_str() {
            "english" | "en" => LANGUAGE::English,
            "spanish" | "es" => LANGUAGE::Spanish,
            "french" | "fr" => LANGUAGE::French,
            "german" | "de" => LANGUAGE::German,
            other => {
                warn!(tag = other, "Unknown stopword language, using english");
                LANGUAGE::English
            }
        };
        let stop_words: HashSet<String> = stop_words::get(language).into_iter().collect();

        // Tokens are runs of two or more word characters; single
        // letters carry no signal worth a hash bucket.
        let token_pattern = Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex");

        Self {
            dimensions: config.dimensions,
            stop_words,
            token_pattern,
        }
    }

    /// Embed a single text into a unit vector (or the zero vector when
    /// no tokens survive stopword filtering).
    pub fn embed(&self, text: &str) -> Vec<f64> {
        let lower = text.to_lowercase();
        let mut vector = vec![0.0f64; self.dimensions];

        for token in self.token_pattern.find_iter(&lower) {
            let token = token.as_str();
            if self.stop_words.contains(token) {
                continue;
            }
            let hash = xxh3_64(token.as_bytes());
            let index = (hash % self.dimensions as u64) as usize;
            let sign = if hash & (1u64 << 63) != 0 { -1.0 } else { 1.0 };
            vector[index] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Embedder for HashingEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed_batch(&self, texts: &[String]) -> Vec<Vec<f64>> {
        // Pure per-text work; order preserved by rayon.
        texts.par_iter().map(|t| self.embed(t)).collect()
    }
}
