//! Online top-K ranking by intersection distance.

use crate::{Histogram, Match};

/// Bounded list of the best matches seen so far.
///
/// While below capacity every offer is appended. Once full, an offer replaces the
/// incumbent with the smallest distance, and only if it is strictly greater, so on
/// ties the earlier-inserted match stays.
#[derive(Debug)]
pub struct TopK {
    k: usize,
    entries: Vec<Match>,
}

impl TopK {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            entries: Vec::with_capacity(k),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offer one candidate. Returns true if it was retained.
    pub fn offer(&mut self, histogram: Histogram, distance: u64) -> bool {
        if self.k == 0 {
            return false;
        }
        if self.entries.len() < self.k {
            self.entries.push(Match {
                histogram,
                distance,
            });
            return true;
        }
        // Leftmost minimum.
        let weakest = self
            .entries
            .iter()
            .enumerate()
            .fold(0, |min_idx, (i, m)| {
                if m.distance < self.entries[min_idx].distance {
                    i
                } else {
                    min_idx
                }
            });
        if distance > self.entries[weakest].distance {
            self.entries[weakest] = Match {
                histogram,
                distance,
            };
            return true;
        }
        false
    }

    /// Current list order (insertion slots, not sorted).
    pub fn as_slice(&self) -> &[Match] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Match> {
        self.entries
    }
}
