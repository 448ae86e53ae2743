//! Pointer smoothing
//!
//! A plain moving average over the last few fingertip positions. Frames
//! without a hand leave the history untouched, so the pointer holds its last
//! position through short detection dropouts instead of jumping.

use crate::tracking::landmarks::Point;
use std::collections::VecDeque;

/// History length used by the reference configuration
pub const DEFAULT_HISTORY_CAPACITY: usize = 8;

/// Fixed-capacity FIFO of pointer samples
#[derive(Debug, Clone)]
pub struct PointerSmoother {
    history: VecDeque<Point>,
    capacity: usize,
}

impl PointerSmoother {
    /// Create an empty smoother; a zero capacity is treated as one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest once the history is full
    pub fn push(&mut self, sample: Point) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(sample);
    }

    /// Mean of the stored samples, or `None` before the first push
    #[expect(
        clippy::cast_precision_loss,
        reason = "History length is a handful of samples"
    )]
    pub fn current(&self) -> Option<Point> {
        if self.history.is_empty() {
            return None;
        }
        let n = self.history.len() as f64;
        let (sx, sy) = self
            .history
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    /// Stored samples, oldest first
    pub fn samples(&self) -> impl ExactSizeIterator<Item = &Point> {
        self.history.iter()
    }

    /// Number of stored samples
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// True before the first push
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Maximum number of stored samples
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for PointerSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_pointer() {
        let smoother = PointerSmoother::default();
        assert!(smoother.is_empty());
        assert_eq!(smoother.current(), None);
    }

    #[test]
    fn test_mean_of_two_samples() {
        let mut smoother = PointerSmoother::default();
        smoother.push(Point::new(0.0, 0.0));
        smoother.push(Point::new(10.0, 10.0));
        assert_eq!(smoother.current(), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_keeps_most_recent_eight_in_order() {
        let mut smoother = PointerSmoother::default();
        for i in 0..12 {
            smoother.push(Point::new(f64::from(i), 0.0));
        }

        assert_eq!(smoother.len(), 8);
        let xs: Vec<f64> = smoother.samples().map(|p| p.x).collect();
        assert_eq!(xs, vec![4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
        assert_eq!(smoother.current(), Some(Point::new(7.5, 0.0)));
    }

    #[test]
    fn test_zero_capacity_still_tracks_latest() {
        let mut smoother = PointerSmoother::new(0);
        smoother.push(Point::new(1.0, 1.0));
        smoother.push(Point::new(3.0, 5.0));
        assert_eq!(smoother.capacity(), 1);
        assert_eq!(smoother.current(), Some(Point::new(3.0, 5.0)));
    }

    // Property-based tests using proptest
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: history never exceeds capacity and holds the newest samples
            #[test]
            fn history_is_bounded_and_ordered(
                xs in prop::collection::vec(-2000.0f64..2000.0, 0..40),
                capacity in 1usize..16,
            ) {
                let mut smoother = PointerSmoother::new(capacity);
                for &x in &xs {
                    smoother.push(Point::new(x, -x));
                }

                prop_assert!(smoother.len() <= capacity);
                let expected: Vec<f64> = xs.iter().rev().take(capacity).rev().copied().collect();
                let stored: Vec<f64> = smoother.samples().map(|p| p.x).collect();
                prop_assert_eq!(stored, expected);
            }

            /// Property: the smoothed pointer lies within the bounding box of the samples
            #[test]
            fn mean_stays_within_sample_bounds(
                pts in prop::collection::vec((0.0f64..1280.0, 0.0f64..720.0), 1..20),
            ) {
                let mut smoother = PointerSmoother::default();
                for &(x, y) in &pts {
                    smoother.push(Point::new(x, y));
                }
                let mean = smoother.current().unwrap();
                let min_x = smoother.samples().map(|p| p.x).fold(f64::INFINITY, f64::min);
                let max_x = smoother.samples().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(mean.x >= min_x - 1e-9 && mean.x <= max_x + 1e-9);
            }
        }
    }
}
