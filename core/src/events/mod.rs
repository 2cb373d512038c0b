pub mod label_follower;
pub mod trend;

pub use label_follower::{LabelFollower, LabelState};
pub use trend::TrendEstimator;

use crate::interface::detection::ProcessingResult;
use crate::math::regression::LinearFit;
use serde::Serialize;

/// Debounced presence state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresenceUpdate {
    pub active: bool,
    pub changed: bool,
    /// Range trend over the detections seen while present, in bins per frame.
    pub trend: LinearFit,
}

/// Follows detection amplitude with hysteresis and tracks the range trend while
/// a target is present.
pub struct EventTracker {
    follower: LabelFollower,
    trend: TrendEstimator,
}

impl EventTracker {
    pub fn new(follower: LabelFollower, trend_window: usize) -> Self {
        Self {
            follower,
            trend: TrendEstimator::new(trend_window),
        }
    }

    pub fn feed(&mut self, result: &ProcessingResult) -> PresenceUpdate {
        let changed = self.follower.feed(result.amplitude);
        let active = self.follower.is_active();

        let trend = if active {
            if result.detected {
                self.trend.push(result.range)
            } else {
                self.trend.fit()
            }
        } else {
            if changed {
                self.trend.clear();
            }
            LinearFit::default()
        };

        PresenceUpdate {
            active,
            changed,
            trend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_edges_and_range_trend() {
        let follower = LabelFollower::new(1.0, 0.5).unwrap();
        let mut tracker = EventTracker::new(follower, 8);

        let idle = tracker.feed(&ProcessingResult::below_threshold(0.1));
        assert!(!idle.active && !idle.changed);

        let enter = tracker.feed(&ProcessingResult::new(2.0, 10.0, 0.0, 0.0));
        assert!(enter.active && enter.changed);

        let approaching = tracker.feed(&ProcessingResult::new(2.0, 8.0, 0.0, 0.0));
        assert!(approaching.active && !approaching.changed);
        assert!((approaching.trend.slope + 2.0).abs() < 1e-6);

        let leave = tracker.feed(&ProcessingResult::below_threshold(0.2));
        assert!(!leave.active && leave.changed);
        assert_eq!(leave.trend, LinearFit::default());

        // History restarts with the next presence.
        tracker.feed(&ProcessingResult::new(2.0, 3.0, 0.0, 0.0));
        let next = tracker.feed(&ProcessingResult::new(2.0, 4.0, 0.0, 0.0));
        assert!((next.trend.slope - 1.0).abs() < 1e-6);
        assert!((next.trend.intercept - 3.0).abs() < 1e-6);
    }

    #[test]
    fn undetected_frames_do_not_enter_the_trend() {
        let follower = LabelFollower::new(1.0, 0.5).unwrap();
        let mut tracker = EventTracker::new(follower, 8);

        tracker.feed(&ProcessingResult::new(2.0, 10.0, 0.0, 0.0));
        tracker.feed(&ProcessingResult::new(2.0, 10.0, 0.0, 0.0));
        // Above the exit threshold but not a detection: presence holds, range is unknown.
        let held = tracker.feed(&ProcessingResult::below_threshold(0.7));

        assert!(held.active && !held.changed);
        assert_eq!(held.trend.slope, 0.0);
        assert!((held.trend.intercept - 10.0).abs() < 1e-6);

        let next = tracker.feed(&ProcessingResult::new(2.0, 12.0, 0.0, 0.0));
        assert!((next.trend.slope - 1.0).abs() < 1e-6);
    }
}
