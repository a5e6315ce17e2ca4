// Embedding: normalized text to fixed-width numeric vectors.
//
// The Embedder trait is the seam: the pipeline only needs "text in,
// vector out, same width every time". The default implementation is
// feature hashing: no vocabulary table, so the dimensionality never
// depends on corpus size and vectors from separate runs stay comparable
// under the same configuration.

pub mod traits;
pub mod hashing;
