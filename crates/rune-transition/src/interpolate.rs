//! The animated-scalar primitive: piecewise-linear interpolation over progress.
//!
//! Every style produced by a transition definition is derived from the shared
//! [`Progress`] value through an `(input_range, output_range)` pair, the same shape
//! as a platform `interpolate({ inputRange, outputRange })` call. Output stops are
//! either plain numbers or angles (`"360deg"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransitionError};

/// Trait for values that can be linearly interpolated.
pub trait Interpolate: Sized {
    /// Interpolate between `self` (t = 0) and `to` (t = 1).
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(*self, *to, t)
    }
}

/// A rotation angle. Serialized as a keyword string such as `"90deg"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    pub const fn deg(degrees: f64) -> Self {
        Self { degrees }
    }

    pub fn rad(radians: f64) -> Self {
        Self {
            degrees: radians.to_degrees(),
        }
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn radians(&self) -> f64 {
        self.degrees.to_radians()
    }
}

impl Interpolate for Angle {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self::deg(lerp(self.degrees, to.degrees, t))
    }
}

impl FromStr for Angle {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = || TransitionError::InvalidAngle(s.to_string());

        if let Some(value) = trimmed.strip_suffix("deg") {
            value.trim().parse::<f64>().map(Self::deg).map_err(|_| invalid())
        } else if let Some(value) = trimmed.strip_suffix("rad") {
            value.trim().parse::<f64>().map(Self::rad).map_err(|_| invalid())
        } else {
            Err(invalid())
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", self.degrees)
    }
}

impl From<Angle> for String {
    fn from(angle: Angle) -> Self {
        angle.to_string()
    }
}

impl TryFrom<String> for Angle {
    type Error = TransitionError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Output stops of an interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "stops", rename_all = "snake_case")]
pub enum OutputRange {
    Numbers(Vec<f64>),
    Angles(Vec<Angle>),
}

impl OutputRange {
    /// Parse keyword stops such as `["0deg", "360deg"]`.
    pub fn angles<S: AsRef<str>>(stops: &[S]) -> Result<Self> {
        stops
            .iter()
            .map(|s| s.as_ref().parse::<Angle>())
            .collect::<Result<Vec<_>>>()
            .map(Self::Angles)
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Numbers(stops) => stops.len(),
            Self::Angles(stops) => stops.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single interpolated output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputValue {
    Number(f64),
    Angle(Angle),
}

impl OutputValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Angle(_) => None,
        }
    }

    pub fn as_angle(&self) -> Option<Angle> {
        match self {
            Self::Angle(angle) => Some(*angle),
            Self::Number(_) => None,
        }
    }
}

/// A validated `(input_range, output_range)` mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    input: Vec<f64>,
    output: OutputRange,
}

impl Interpolation {
    /// Build an interpolation. The input range must have at least two stops, be
    /// strictly increasing, lie within [0, 1] and match the output range in length.
    pub fn new(input: Vec<f64>, output: OutputRange) -> Result<Self> {
        if input.len() < 2 {
            return Err(TransitionError::TooFewStops(input.len()));
        }
        if input.len() != output.len() {
            return Err(TransitionError::RangeLengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }
        let increasing = input.windows(2).all(|w| w[0] < w[1]);
        let bounded = input.iter().all(|v| (0.0..=1.0).contains(v));
        if !increasing || !bounded {
            return Err(TransitionError::InvalidInputRange(input));
        }

        Ok(Self { input, output })
    }

    /// Shorthand for a numeric interpolation.
    pub fn numbers(input: Vec<f64>, output: Vec<f64>) -> Result<Self> {
        Self::new(input, OutputRange::Numbers(output))
    }

    pub fn input_range(&self) -> &[f64] {
        &self.input
    }

    pub fn output_range(&self) -> &OutputRange {
        &self.output
    }

    /// Evaluate at `t`. Values outside the input range clamp to the first/last stop.
    pub fn evaluate(&self, t: f64) -> OutputValue {
        match &self.output {
            OutputRange::Numbers(stops) => OutputValue::Number(piecewise(&self.input, stops, t)),
            OutputRange::Angles(stops) => OutputValue::Angle(piecewise(&self.input, stops, t)),
        }
    }
}

/// The shared transition progress: 0 = fully on the outgoing route, 1 = fully on the
/// incoming route.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Progress(f64);

impl Progress {
    pub const START: Self = Self(0.0);
    pub const END: Self = Self(1.0);

    /// Create a progress value, clamped to [0, 1]. NaN maps to 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Derive a value from this progress.
    pub fn interpolate(&self, interpolation: &Interpolation) -> OutputValue {
        interpolation.evaluate(self.0)
    }

    /// Numeric keyframes with statically known, valid ranges.
    pub(crate) fn keyframes(&self, input: &[f64], output: &[f64]) -> f64 {
        piecewise(input, output, self.0)
    }

    /// Angle keyframes with statically known, valid ranges.
    pub(crate) fn angle_keyframes(&self, input: &[f64], output: &[Angle]) -> Angle {
        piecewise(input, output, self.0)
    }
}

impl From<f64> for Progress {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Piecewise-linear evaluation. Exact at every stop.
fn piecewise<T: Interpolate + Clone>(input: &[f64], output: &[T], t: f64) -> T {
    debug_assert!(input.len() >= 2 && input.len() == output.len());

    let last = input.len() - 1;
    if t <= input[0] {
        return output[0].clone();
    }
    if t >= input[last] {
        return output[last].clone();
    }

    let mut segment = 0;
    while segment + 1 < last && t >= input[segment + 1] {
        segment += 1;
    }

    let span = input[segment + 1] - input[segment];
    let local = (t - input[segment]) / span;
    output[segment].interpolate(&output[segment + 1], local)
}
