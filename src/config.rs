use std::env;

use anyhow::Result;

/// Default similarity threshold for grouping: two documents at or above
/// this cosine score against a group's seed land in the same group.
pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// Default feature-hashing dimensionality. Fixed and corpus-size
/// independent, so vectors from different runs stay comparable as long
/// as the configuration matches.
pub const DEFAULT_DIMENSIONS: usize = 1024;

/// Default minimum raw-text length (chars, after trimming) for a
/// document to enter the corpus. Anything shorter has too little signal
/// to compare.
pub const DEFAULT_MIN_CHARS: usize = 30;

/// Per-call analysis configuration.
///
/// Loaded from environment variables (a .env file is read automatically
/// at startup via dotenvy) and overridden by CLI flags. This is an
/// explicit value passed into every analysis call; there is no shared
/// process-wide vectorizer or threshold, so concurrent analyses in one
/// process can use different settings without interfering.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Grouping threshold in [0, 1].
    pub threshold: f64,
    /// Feature-hashing vector width.
    pub dimensions: usize,
    /// Stopword language tag (e.g. "english") for the embedder.
    pub stopword_language: String,
    /// Minimum trimmed raw-text length for corpus admission.
    pub min_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            dimensions: DEFAULT_DIMENSIONS,
            stopword_language: "english".to_string(),
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from environment variables, falling back to
    /// the defaults for anything unset.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("CARBON_THRESHOLD") {
            config.threshold = raw
                .parse()
                .map_err(|_| anyhow::anyhow!("CARBON_THRESHOLD is not a number: {raw:?}"))?;
        }
        if let Ok(raw) = env::var("CARBON_DIMENSIONS") {
            config.dimensions = raw.parse().map_err(|_| {
                anyhow::anyhow!("CARBON_DIMENSIONS is not a positive integer: {raw:?}")
            })?;
        }
        if let Ok(raw) = env::var("CARBON_STOPWORDS") {
            if !raw.is_empty() {
                config.stopword_language = raw;
            }
        }
        if let Ok(raw) = env::var("CARBON_MIN_CHARS") {
            config.min_chars = raw.parse().map_err(|_| {
                anyhow::anyhow!("CARBON_MIN_CHARS is not a positive integer: {raw:?}")
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable before starting a run.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            anyhow::bail!(
                "Grouping threshold must be in [0, 1], got {}",
                self.threshold
            );
        }
        if self.dimensions == 0 {
            anyhow::bail!("Embedding dimensionality must be at least 1");
        }
        Ok(())
    }
}
