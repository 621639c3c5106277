use crate::config::{CONVERGENCE_THRESHOLD, FRAC_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-Point Arithmetic with 12 fractional bits (Q3.12)
/// Dynamic range (with i16 backing): approximately [-8.0, 8.0)
/// Precision: 2^-12 (~2.4e-4)
/// Zero handling: Represents exact 0.0
/// Overflow behavior: Saturating on construction from floats, wrapping on add/sub/shift
pub(crate) const FRACTIONAL_BITS: u32 = FRAC_WIDTH;
const SCALE_FACTOR: f64 = (1i32 << FRACTIONAL_BITS) as f64;
const MIN_RAW: i16 = i16::MIN;
const MAX_RAW: i16 = i16::MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FixedPoint16 {
    /// Internal storage as a Q3.12 signed integer
    raw: i16,
}

impl FixedPoint16 {
    pub const ZERO: Self = Self { raw: 0 };
    pub const ONE: Self = Self { raw: 1 << FRACTIONAL_BITS };
    pub const MAX: Self = Self { raw: MAX_RAW };
    pub const MIN: Self = Self { raw: MIN_RAW };

    /// Wrap a raw Q3.12 encoding.
    pub const fn from_raw(raw: i16) -> Self {
        Self { raw }
    }

    pub const fn raw(self) -> i16 {
        self.raw
    }

    /// Convert from f64 with deterministic quantization (truncation toward zero)
    pub fn from_f64(val: f64) -> Self {
        // NaN has no meaningful encoding; callers filter it before reaching here.
        if val.is_nan() {
            return Self::ZERO;
        }

        let scaled = val * SCALE_FACTOR;

        // Matches a fixed-width cast: truncate toward zero, clamp to the i16 range
        let raw = if scaled >= MAX_RAW as f64 {
            MAX_RAW
        } else if scaled <= MIN_RAW as f64 {
            MIN_RAW
        } else {
            scaled.trunc() as i16
        };

        Self { raw }
    }

    pub fn from_f32(val: f32) -> Self {
        Self::from_f64(val as f64)
    }

    pub fn to_f64(self) -> f64 {
        self.raw as f64 / SCALE_FACTOR
    }

    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    pub fn abs_f64(self) -> f64 {
        self.to_f64().abs()
    }

    /// Sign test used to pick the rotation direction (zero counts as positive).
    pub fn is_non_negative(self) -> bool {
        self.raw >= 0
    }

    /// True once the magnitude is under `CONVERGENCE_THRESHOLD`.
    pub fn has_converged(self) -> bool {
        self.abs_f64() < CONVERGENCE_THRESHOLD
    }
}

impl From<f32> for FixedPoint16 {
    fn from(val: f32) -> Self {
        Self::from_f32(val)
    }
}

impl From<f64> for FixedPoint16 {
    fn from(val: f64) -> Self {
        Self::from_f64(val)
    }
}

impl fmt::Display for FixedPoint16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}", p, self.to_f64()),
            None => write!(f, "{}", self.to_f64()),
        }
    }
}
