//! Embedding providers.

pub mod tfidf_fallback;

pub use tfidf_fallback::TfIdfFallback;
