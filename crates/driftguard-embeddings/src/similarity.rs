//! Cosine similarity and the drift distance built on it.

use driftguard_core::constants::MAX_COSINE_DISTANCE;

/// Cosine similarity in `[-1, 1]`. Zero-norm or mismatched vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut na = 0.0f64;
    let mut nb = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na <= f64::EPSILON || nb <= f64::EPSILON {
        return 0.0;
    }
    (dot / (na.sqrt() * nb.sqrt())).clamp(-1.0, 1.0)
}

/// `1 - cos`, clamped to `[0, 2]`. Exactly 0 for identical non-zero vectors
/// up to float rounding.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    (1.0 - cosine_similarity(a, b)).clamp(0.0, MAX_COSINE_DISTANCE)
}

/// Minimum cosine distance from `v` to any reference vector.
/// `None` when there are no references.
pub fn nearest_distance<'a, I>(v: &[f32], references: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    references
        .into_iter()
        .map(|r| cosine_distance(v, r))
        .fold(None, |best, d| match best {
            Some(b) if b <= d => Some(b),
            _ => Some(d),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_is_one() {
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn opposite_is_two() {
        assert!((cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_is_distance_one() {
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }

    #[test]
    fn nearest_picks_minimum() {
        let refs: Vec<Vec<f32>> = vec![vec![0.0, 1.0], vec![1.0, 0.1], vec![-1.0, 0.0]];
        let d = nearest_distance(&[1.0, 0.0], refs.iter().map(|r| r.as_slice())).unwrap();
        assert!(d < 0.01);
        assert!(nearest_distance(&[1.0, 0.0], std::iter::empty::<&[f32]>()).is_none());
    }
}
