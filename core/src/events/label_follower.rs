use crate::prelude::{DspError, DspResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelState {
    #[default]
    Inactive,
    Active,
}

impl LabelState {
    pub fn as_u8(&self) -> u8 {
        match self {
            LabelState::Inactive => 0,
            LabelState::Active => 1,
        }
    }
}

/// Two-threshold hysteresis turning a continuous score into a binary label.
///
/// Values inside the dead band `(threshold_exit, threshold_enter)` never change
/// the state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelFollower {
    state: LabelState,
    threshold_enter: f32,
    threshold_exit: f32,
}

impl LabelFollower {
    /// Rejects thresholds that would collapse the dead band (`enter <= exit`).
    pub fn new(threshold_enter: f32, threshold_exit: f32) -> DspResult<Self> {
        if !threshold_enter.is_finite() || !threshold_exit.is_finite() {
            return Err(DspError::Configuration(
                "label thresholds must be finite".into(),
            ));
        }
        if threshold_enter <= threshold_exit {
            return Err(DspError::Configuration(format!(
                "enter threshold {} must exceed exit threshold {}",
                threshold_enter, threshold_exit
            )));
        }
        Ok(Self {
            state: LabelState::Inactive,
            threshold_enter,
            threshold_exit,
        })
    }

    /// Updates the state and reports whether it changed.
    pub fn feed(&mut self, value: f32) -> bool {
        let next = match self.state {
            LabelState::Inactive if value >= self.threshold_enter => LabelState::Active,
            LabelState::Active if value <= self.threshold_exit => LabelState::Inactive,
            current => current,
        };
        let changed = next != self.state;
        self.state = next;
        changed
    }

    pub fn state(&self) -> LabelState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LabelState::Active
    }

    pub fn thresholds(&self) -> (f32, f32) {
        (self.threshold_enter, self.threshold_exit)
    }

    pub fn reset(&mut self) {
        self.state = LabelState::Inactive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_hysteresis_cycle() {
        let mut follower = LabelFollower::new(0.8, 0.3).unwrap();
        assert_eq!(follower.state(), LabelState::Inactive);

        assert!(follower.feed(0.8));
        assert!(follower.is_active());

        assert!(!follower.feed(0.95));
        assert!(follower.is_active());

        assert!(!follower.feed(0.5));
        assert!(follower.is_active());

        assert!(follower.feed(0.3));
        assert_eq!(follower.state().as_u8(), 0);
    }

    #[test]
    fn dead_band_does_not_activate() {
        let mut follower = LabelFollower::new(0.8, 0.3).unwrap();
        assert!(!follower.feed(0.79));
        assert!(!follower.feed(0.1));
        assert_eq!(follower.state(), LabelState::Inactive);
    }

    #[test]
    fn collapsed_or_inverted_thresholds_are_rejected() {
        assert!(matches!(
            LabelFollower::new(0.5, 0.5),
            Err(DspError::Configuration(_))
        ));
        assert!(LabelFollower::new(0.2, 0.6).is_err());
        assert!(LabelFollower::new(f32::NAN, 0.1).is_err());
    }

    #[test]
    fn reset_returns_to_inactive() {
        let mut follower = LabelFollower::new(1.0, 0.0).unwrap();
        follower.feed(2.0);
        follower.reset();
        assert!(!follower.is_active());
        assert_eq!(follower.thresholds(), (1.0, 0.0));
    }
}
