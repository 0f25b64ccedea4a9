//! Distance travelled and the score derived from it

use serde::{Deserialize, Serialize};

use crate::consts::DISTANCE_PER_POINT;

/// Score for a cumulative distance: `floor(distance / 10)`
#[inline]
pub fn score_for(distance: f64) -> u32 {
    (distance.max(0.0) / DISTANCE_PER_POINT).floor() as u32
}

/// Monotonic distance accumulator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTracker {
    distance: f64,
    score: u32,
}

impl ScoreTracker {
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Add distance; returns the new score only when it went up
    pub fn advance(&mut self, delta: f64) -> Option<u32> {
        if delta > 0.0 {
            self.distance += delta;
        }
        let score = score_for(self.distance);
        if score > self.score {
            self.score = score;
            Some(score)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_score_floor() {
        assert_eq!(score_for(0.0), 0);
        assert_eq!(score_for(9.999), 0);
        assert_eq!(score_for(10.0), 1);
        assert_eq!(score_for(125.0), 12);
    }

    #[test]
    fn test_notifies_only_on_change() {
        let mut tracker = ScoreTracker::default();
        assert_eq!(tracker.advance(5.0), None);
        assert_eq!(tracker.advance(5.0), Some(1));
        assert_eq!(tracker.advance(5.0), None);
        assert_eq!(tracker.advance(30.0), Some(4));
        assert_eq!(tracker.score(), 4);
        assert_eq!(tracker.distance(), 45.0);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut tracker = ScoreTracker::default();
        tracker.advance(20.0);
        assert_eq!(tracker.advance(-50.0), None);
        assert_eq!(tracker.distance(), 20.0);
        assert_eq!(tracker.score(), 2);
    }

    proptest! {
        #[test]
        fn score_is_monotonic(deltas in proptest::collection::vec(-10.0f64..50.0, 1..100)) {
            let mut tracker = ScoreTracker::default();
            let mut last = 0;
            for d in deltas {
                tracker.advance(d);
                prop_assert!(tracker.score() >= last);
                prop_assert_eq!(tracker.score(), score_for(tracker.distance()));
                last = tracker.score();
            }
        }
    }
}
