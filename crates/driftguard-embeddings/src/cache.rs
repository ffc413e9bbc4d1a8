//! In-memory embedding cache using moka.
//!
//! Keys are blake3 content hashes, so identical texts share one entry.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use driftguard_core::errors::{DriftGuardResult, EmbeddingError};
use driftguard_core::traits::IEmbeddingProvider;

/// A provider wrapper that memoizes embeddings and checks their dimension.
pub struct CachedProvider {
    inner: Arc<dyn IEmbeddingProvider>,
    cache: Cache<String, Arc<Vec<f32>>>,
}

impl CachedProvider {
    pub fn new(inner: Arc<dyn IEmbeddingProvider>, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { inner, cache }
    }

    /// blake3 hex digest of the text.
    pub fn content_hash(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    fn checked(&self, embedding: Vec<f32>) -> DriftGuardResult<Vec<f32>> {
        let expected = self.inner.dimensions();
        if embedding.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            }
            .into());
        }
        Ok(embedding)
    }
}

impl IEmbeddingProvider for CachedProvider {
    fn embed(&self, text: &str) -> DriftGuardResult<Vec<f32>> {
        let key = Self::content_hash(text);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.as_ref().clone());
        }
        let embedding = self.checked(self.inner.embed(text)?)?;
        self.cache.insert(key, Arc::new(embedding.clone()));
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use driftguard_core::errors::DriftGuardError;

    struct Counting {
        calls: AtomicUsize,
        dims: usize,
        emit: usize,
    }

    impl IEmbeddingProvider for Counting {
        fn embed(&self, _text: &str) -> DriftGuardResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1.0; self.emit])
        }
        fn dimensions(&self) -> usize {
            self.dims
        }
        fn name(&self) -> &str {
            "counting"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn second_lookup_hits_cache() {
        let inner = Arc::new(Counting {
            calls: AtomicUsize::new(0),
            dims: 4,
            emit: 4,
        });
        let cached = CachedProvider::new(inner.clone(), 100);
        let a = cached.embed("same text").unwrap();
        let b = cached.embed("same text").unwrap();
        assert_eq!(a, b);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        cached.embed("other text").unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn wrong_dimension_is_rejected_and_not_cached() {
        let inner = Arc::new(Counting {
            calls: AtomicUsize::new(0),
            dims: 4,
            emit: 3,
        });
        let cached = CachedProvider::new(inner.clone(), 100);
        let err = cached.embed("x").unwrap_err();
        assert!(matches!(
            err,
            DriftGuardError::Embedding(EmbeddingError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        ));
        assert!(cached.embed("x").is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn content_hash_is_stable() {
        assert_eq!(
            CachedProvider::content_hash("abc"),
            CachedProvider::content_hash("abc")
        );
        assert_ne!(
            CachedProvider::content_hash("abc"),
            CachedProvider::content_hash("abd")
        );
    }
}
