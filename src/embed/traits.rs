// Embedder trait: the swap-ready abstraction for vectorization.

/// Trait for turning normalized texts into fixed-width vectors.
///
/// Embedding is infallible: every text gets a vector, including texts
/// whose vocabulary was never seen before. A text with no usable tokens
/// embeds to the zero vector.
pub trait Embedder: Send + Sync {
    /// The width of every vector this embedder produces.
    fn dimensions(&self) -> usize;

    /// Embed a batch of texts, one vector per input, in input order.
    fn embed_batch(&self, texts: &[String]) -> Vec<Vec<f64>>;
}
