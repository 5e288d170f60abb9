//! Time-driven progress animation.

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::interpolate::{Interpolate, Progress};

/// Timing of a programmatic progress animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    /// Duration of the animation in milliseconds.
    pub duration_ms: f64,
    /// Easing applied to elapsed time.
    pub easing: EasingFunction,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            duration_ms: 250.0,
            easing: EasingFunction::EaseInOut,
        }
    }
}

impl TransitionSpec {
    pub fn new(duration_ms: f64, easing: EasingFunction) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }
}

/// An in-flight animation of the progress scalar from one value to another.
///
/// Once finished, [`ProgressAnimation::value`] returns the target exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressAnimation {
    from: Progress,
    to: Progress,
    elapsed_ms: f64,
    spec: TransitionSpec,
}

impl ProgressAnimation {
    pub fn new(from: impl Into<Progress>, to: impl Into<Progress>, spec: TransitionSpec) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            elapsed_ms: 0.0,
            spec,
        }
    }

    pub fn target(&self) -> Progress {
        self.to
    }

    /// Fraction of the duration elapsed, in [0, 1].
    pub fn time_fraction(&self) -> f64 {
        if self.spec.duration_ms > 0.0 {
            (self.elapsed_ms / self.spec.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn is_finished(&self) -> bool {
        self.time_fraction() >= 1.0
    }

    /// Current progress value.
    pub fn value(&self) -> Progress {
        if self.is_finished() {
            return self.to;
        }
        let eased = self.spec.easing.evaluate(self.time_fraction());
        Progress::new(self.from.value().interpolate(&self.to.value(), eased))
    }

    /// Advance time. Returns `true` while the animation is still running.
    pub fn update(&mut self, delta_ms: f64) -> bool {
        if self.is_finished() {
            return false;
        }
        self.elapsed_ms += delta_ms.max(0.0);
        !self.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_defaults() {
        let spec = TransitionSpec::default();
        assert_eq!(spec.duration_ms, 250.0);
        assert_eq!(spec.easing, EasingFunction::EaseInOut);
    }

    #[test]
    fn test_linear_progress() {
        let spec = TransitionSpec::new(100.0, EasingFunction::Linear);
        let mut animation = ProgressAnimation::new(0.0, 1.0, spec);

        assert_eq!(animation.value(), Progress::START);
        assert!(animation.update(25.0));
        assert!((animation.value().value() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_lands_exactly_on_target() {
        let spec = TransitionSpec::new(100.0, EasingFunction::Ease);
        let mut animation = ProgressAnimation::new(0.6, 0.0, spec);

        while animation.update(16.0) {}
        assert!(animation.is_finished());
        assert_eq!(animation.value(), Progress::START);
        assert!(!animation.update(16.0));
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let spec = TransitionSpec::new(0.0, EasingFunction::Linear);
        let animation = ProgressAnimation::new(0.0, 1.0, spec);
        assert!(animation.is_finished());
        assert_eq!(animation.value(), Progress::END);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let spec = TransitionSpec::new(100.0, EasingFunction::Linear);
        let mut animation = ProgressAnimation::new(0.0, 1.0, spec);
        animation.update(-50.0);
        assert_eq!(animation.value(), Progress::START);
    }
}
