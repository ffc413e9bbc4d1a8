//! TF-IDF sparse-to-dense fallback provider.
//!
//! Generates fixed-dimension vectors from hashed, frequency-weighted terms.
//! No model files or network access.

use std::collections::HashMap;

use driftguard_core::errors::DriftGuardResult;
use driftguard_core::traits::IEmbeddingProvider;

/// TF-IDF fallback embedding provider.
///
/// Deterministic: the same text always yields the same unit vector.
/// Texts sharing no terms are orthogonal unless their terms collide in a bucket.
pub struct TfIdfFallback {
    dimensions: usize,
}

impl TfIdfFallback {
    /// A dimension of zero is treated as one.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    /// Lowercase alphanumeric terms of two or more characters.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| s.chars().count() >= 2)
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn tfidf_vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in &tf {
            let freq = count / total;
            // Longer terms carry more signal than short function words.
            let idf = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::hash_term(term, self.dimensions)] += freq * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for TfIdfFallback {
    fn embed(&self, text: &str) -> DriftGuardResult<Vec<f32>> {
        Ok(self.tfidf_vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> DriftGuardResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.tfidf_vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "tfidf-fallback"
    }

    fn is_available(&self) -> bool {
        true
    }
}
