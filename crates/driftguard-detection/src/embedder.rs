//! Bounded-time embedding calls.
//!
//! Providers are synchronous and may be slow; each call runs on the blocking
//! pool and is abandoned after the configured timeout.

use std::sync::Arc;
use std::time::Duration;

use driftguard_core::errors::{DriftGuardResult, EmbeddingError};
use driftguard_core::traits::IEmbeddingProvider;

#[derive(Clone)]
pub struct TimedEmbedder {
    provider: Arc<dyn IEmbeddingProvider>,
    timeout: Duration,
}

impl TimedEmbedder {
    pub fn new(provider: Arc<dyn IEmbeddingProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Embed one text. Every failure maps to an `EmbeddingError`.
    pub async fn embed(&self, text: &str) -> DriftGuardResult<Vec<f32>> {
        let text = text.to_owned();
        let mut out = self
            .run(move |p| p.embed(&text).map(|v| vec![v]))
            .await?;
        out.pop().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "provider returned no embedding".to_string(),
            }
            .into()
        })
    }

    /// Embed many texts under one deadline. All-or-nothing.
    pub async fn embed_batch(&self, texts: Vec<String>) -> DriftGuardResult<Vec<Vec<f32>>> {
        let expected = texts.len();
        let out = self.run(move |p| p.embed_batch(&texts)).await?;
        if out.len() != expected {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("provider returned {} embeddings for {expected} texts", out.len()),
            }
            .into());
        }
        Ok(out)
    }

    async fn run<F>(&self, f: F) -> DriftGuardResult<Vec<Vec<f32>>>
    where
        F: FnOnce(&dyn IEmbeddingProvider) -> DriftGuardResult<Vec<Vec<f32>>> + Send + 'static,
    {
        if !self.provider.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.provider.name().to_string(),
            }
            .into());
        }

        let provider = Arc::clone(&self.provider);
        let task = tokio::task::spawn_blocking(move || f(provider.as_ref()));
        let vectors = match tokio::time::timeout(self.timeout, task).await {
            Err(_) => {
                return Err(EmbeddingError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                }
                .into())
            }
            Ok(Err(join)) => {
                return Err(EmbeddingError::InferenceFailed {
                    reason: join.to_string(),
                }
                .into())
            }
            Ok(Ok(result)) => result?,
        };

        let expected = self.provider.dimensions();
        if let Some(bad) = vectors.iter().find(|v| v.len() != expected) {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: bad.len(),
            }
            .into());
        }
        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftguard_core::errors::DriftGuardError;

    struct Slow;

    impl IEmbeddingProvider for Slow {
        fn embed(&self, _text: &str) -> DriftGuardResult<Vec<f32>> {
            std::thread::sleep(Duration::from_millis(200));
            Ok(vec![1.0])
        }
        fn dimensions(&self) -> usize {
            1
        }
        fn name(&self) -> &str {
            "slow"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    struct Offline;

    impl IEmbeddingProvider for Offline {
        fn embed(&self, _text: &str) -> DriftGuardResult<Vec<f32>> {
            Ok(vec![1.0])
        }
        fn dimensions(&self) -> usize {
            1
        }
        fn name(&self) -> &str {
            "offline"
        }
        fn is_available(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let e = TimedEmbedder::new(Arc::new(Slow), Duration::from_millis(10));
        let err = e.embed("x").await.unwrap_err();
        assert!(matches!(
            err,
            DriftGuardError::Embedding(EmbeddingError::Timeout { timeout_ms: 10 })
        ));
    }

    #[tokio::test]
    async fn unavailable_provider_is_not_called() {
        let e = TimedEmbedder::new(Arc::new(Offline), Duration::from_secs(1));
        let err = e.embed("x").await.unwrap_err();
        assert!(matches!(
            err,
            DriftGuardError::Embedding(EmbeddingError::ProviderUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn fast_provider_succeeds() {
        let e = TimedEmbedder::new(Arc::new(Slow), Duration::from_secs(5));
        assert_eq!(e.embed("x").await.unwrap(), vec![1.0]);
    }
}
