//! # driftguard-embeddings
//!
//! The embedding collaborator seam: a deterministic TF-IDF hashing provider
//! that is always available, a moka cache keyed by blake3 content hash, and
//! the cosine math drift distances are built on.

pub mod cache;
pub mod providers;
pub mod similarity;

use std::sync::Arc;

use driftguard_core::config::DetectionConfig;
use driftguard_core::traits::IEmbeddingProvider;

pub use cache::CachedProvider;
pub use providers::TfIdfFallback;
pub use similarity::{cosine_distance, cosine_similarity, nearest_distance};

/// Default provider stack: TF-IDF fallback behind the content cache.
pub fn default_provider(config: &DetectionConfig) -> Arc<dyn IEmbeddingProvider> {
    let base: Arc<dyn IEmbeddingProvider> =
        Arc::new(TfIdfFallback::new(config.embedding_dimensions));
    if config.embedding_cache_size == 0 {
        base
    } else {
        Arc::new(CachedProvider::new(base, config.embedding_cache_size))
    }
}
