//! Bounded windows of recent observations.

use driftguard_core::collections::RingBuffer;
use driftguard_core::models::SampleKind;

/// The last N response embeddings, input embeddings, and quality scores.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    responses: RingBuffer<Vec<f32>>,
    inputs: RingBuffer<Vec<f32>>,
    quality: RingBuffer<f64>,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            responses: RingBuffer::with_capacity(capacity),
            inputs: RingBuffer::with_capacity(capacity),
            quality: RingBuffer::with_capacity(capacity),
        }
    }

    pub fn push_embedding(&mut self, kind: SampleKind, embedding: Vec<f32>) {
        match kind {
            SampleKind::Response => self.responses.push(embedding),
            SampleKind::Input => self.inputs.push(embedding),
        };
    }

    pub fn push_quality(&mut self, score: f64) {
        self.quality.push(score);
    }

    pub fn embeddings(&self, kind: SampleKind) -> &RingBuffer<Vec<f32>> {
        match kind {
            SampleKind::Response => &self.responses,
            SampleKind::Input => &self.inputs,
        }
    }

    pub fn quality_scores(&self) -> &RingBuffer<f64> {
        &self.quality
    }

    pub fn quality_len(&self) -> usize {
        self.quality.len()
    }

    /// Mean of the newest `n` quality scores.
    pub fn short_quality_average(&self, n: usize) -> Option<f64> {
        mean(self.quality.tail(n).copied())
    }

    /// Mean of every retained quality score.
    pub fn long_quality_average(&self) -> Option<f64> {
        mean(self.quality.iter().copied())
    }

    pub fn capacity(&self) -> usize {
        self.quality.capacity()
    }

    pub fn clear(&mut self) {
        self.responses.clear();
        self.inputs.clear();
        self.quality.clear();
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_over_short_and_long() {
        let mut w = SampleWindow::new(100);
        for _ in 0..10 {
            w.push_quality(0.9);
        }
        for _ in 0..10 {
            w.push_quality(0.5);
        }
        assert!((w.short_quality_average(10).unwrap() - 0.5).abs() < 1e-12);
        assert!((w.long_quality_average().unwrap() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn capacity_bounds_every_window() {
        let mut w = SampleWindow::new(3);
        for i in 0..5 {
            w.push_quality(i as f64);
            w.push_embedding(SampleKind::Response, vec![i as f32]);
        }
        assert_eq!(w.quality_len(), 3);
        assert_eq!(w.embeddings(SampleKind::Response).len(), 3);
        assert_eq!(w.embeddings(SampleKind::Input).len(), 0);
        assert_eq!(w.quality_scores().get(0), Some(&2.0));
    }

    #[test]
    fn empty_average_is_none() {
        assert!(SampleWindow::new(4).long_quality_average().is_none());
    }
}
