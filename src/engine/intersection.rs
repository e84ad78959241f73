//! Histogram intersection similarity.

use crate::errors::{HistogramError, HistogramResult};

/// `Σ min(a[i], b[i])`. Higher means more similar.
///
/// Symmetric, and bounded above by `min(sum(a), sum(b))`. Histograms of different
/// length are an error rather than a silent truncation.
pub fn intersection_distance(a: &[u64], b: &[u64]) -> HistogramResult<u64> {
    if a.len() != b.len() {
        return Err(HistogramError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| (*x).min(*y)).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(bin: usize, count: u64) -> Vec<u64> {
        let mut v = vec![0; 256];
        v[bin] = count;
        v
    }

    #[test]
    fn white_vs_black_is_zero() {
        assert_eq!(
            intersection_distance(&uniform(255, 12), &uniform(0, 12)).unwrap(),
            0
        );
    }

    #[test]
    fn same_gray_is_full_overlap() {
        let g = uniform(128, 27);
        assert_eq!(intersection_distance(&g, &g).unwrap(), 27);
    }

    #[test]
    fn symmetric_and_bounded() {
        let a: Vec<u64> = (0..256).map(|i| (i * 7 % 13) as u64).collect();
        let b: Vec<u64> = (0..256).map(|i| (i * 5 % 11) as u64).collect();
        let ab = intersection_distance(&a, &b).unwrap();
        let ba = intersection_distance(&b, &a).unwrap();
        assert_eq!(ab, ba);
        let bound = a.iter().sum::<u64>().min(b.iter().sum());
        assert!(ab <= bound);
    }

    #[test]
    fn self_intersection_is_total() {
        let a: Vec<u64> = (0..256).map(|i| i as u64).collect();
        assert_eq!(intersection_distance(&a, &a).unwrap(), a.iter().sum::<u64>());
    }

    #[test]
    fn dominated_vector_reaches_bound() {
        let a = vec![1, 2, 3, 0];
        let b = vec![4, 2, 5, 1];
        assert_eq!(intersection_distance(&a, &b).unwrap(), 6);
    }

    #[test]
    fn length_mismatch_is_error() {
        let err = intersection_distance(&[1, 2, 3], &[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            HistogramError::LengthMismatch { left: 3, right: 2 }
        ));
    }
}
