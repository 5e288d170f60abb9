//! Easing curves for time-driven progress.
//!
//! Style interpolation itself is always piecewise linear over progress; easing only
//! shapes how progress advances in time (the programmatic route-change animation and
//! the gesture settle animation).
//!
//! ```
//! use rune_transition::easing::EasingFunction;
//!
//! let eased = EasingFunction::EaseInOut.evaluate(0.5);
//! assert!((eased - 0.5).abs() < 1e-3);
//! ```

use rune_config::EasingKind;
use serde::{Deserialize, Serialize};

/// Easing function mapping linear time progress in [0, 1] to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// No easing.
    Linear,
    /// `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,
    /// `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`.
    #[default]
    EaseInOut,
}

impl EasingFunction {
    /// Evaluate the curve. Input is clamped to [0, 1]; the endpoints map exactly to
    /// 0 and 1 so animations land on their targets without drift.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }
}

impl From<EasingKind> for EasingFunction {
    fn from(kind: EasingKind) -> Self {
        match kind {
            EasingKind::Linear => Self::Linear,
            EasingKind::Ease => Self::Ease,
            EasingKind::EaseIn => Self::EaseIn,
            EasingKind::EaseOut => Self::EaseOut,
            EasingKind::EaseInOut => Self::EaseInOut,
        }
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, progress: f64) -> f64 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_coord(y1, y2, t)
}

/// Newton-Raphson solve for the curve parameter whose x equals `target_x`.
fn solve_bezier_x(x1: f64, x2: f64, target_x: f64) -> f64 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = bezier_coord(x1, x2, t) - target_x;
        if x.abs() < 1e-7 {
            break;
        }

        let dx = bezier_derivative(x1, x2, t);
        if dx.abs() < 1e-7 {
            break;
        }

        t = (t - x / dx).clamp(0.0, 1.0);
    }

    t
}

/// 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_coord(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn bezier_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}
