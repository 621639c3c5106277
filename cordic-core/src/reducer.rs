use crate::rotation::RotationState;
use cordic_math::config::{
    CONVERGENCE_LIMIT, INV_LN2, LN2, PRACTICAL_MAX_INPUT, PRACTICAL_MIN_INPUT, SOFTMAX_MAX_LOGIT,
    SOFTMAX_MIN_LOGIT,
};
use cordic_math::FixedPoint16;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Output of range reduction.
///
/// When `mapping_applied` holds (and the input was not saturated),
/// `reduction_factor * ln2 + mapped_input ≈ original_input` and
/// `|mapped_input| <= ln2 / 2` up to one LSB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreprocessResult {
    pub mapped_input: FixedPoint16,
    /// n in e^x = 2^n · e^(x - n·ln2)
    pub reduction_factor: i32,
    pub mapping_applied: bool,
    pub original_input: f32,
    /// Input was non-finite or outside the practical bound and got clamped to ±8.
    pub saturated: bool,
}

impl PreprocessResult {
    /// `n·ln2 + x'`, the value this result claims to represent.
    pub fn reconstructed_input(&self) -> f64 {
        self.reduction_factor as f64 * LN2 + self.mapped_input.to_f64()
    }
}

/// Maps arbitrary inputs into the rotation engine's convergence domain.
///
/// Strategy:
/// - |x| <= ln2/2: pass through unchanged
/// - otherwise: e^x = 2^n · e^(x'), n = round(x / ln2), then nudge n until
///   x' lands inside [-ln2/2, ln2/2]
/// - NaN, ±inf, or |x| > 15: saturate to ±8 (no accuracy promised)
pub struct RangeReducer;

impl RangeReducer {
    pub fn process(input: f32) -> PreprocessResult {
        if !Self::is_practical(input) {
            let bound = if input < SOFTMAX_MIN_LOGIT {
                SOFTMAX_MIN_LOGIT
            } else {
                SOFTMAX_MAX_LOGIT
            };
            debug!(input, bound, "input outside practical range, saturating");
            return PreprocessResult {
                mapped_input: FixedPoint16::from_f32(bound),
                reduction_factor: 0,
                mapping_applied: true,
                original_input: input,
                saturated: true,
            };
        }

        let x = input as f64;
        if x.abs() <= CONVERGENCE_LIMIT {
            trace!(input, "input inside convergence domain, no mapping");
            return PreprocessResult {
                mapped_input: FixedPoint16::from_f64(x),
                reduction_factor: 0,
                mapping_applied: false,
                original_input: input,
                saturated: false,
            };
        }

        let mut n = Self::reduction_factor(x);
        let initial = x - n as f64 * LN2;
        let mapped = Self::fine_adjust(initial, &mut n);

        trace!(input, n, mapped, "range reduction applied");

        PreprocessResult {
            mapped_input: FixedPoint16::from_f64(mapped),
            reduction_factor: n,
            mapping_applied: true,
            original_input: input,
            saturated: false,
        }
    }

    /// Hyperbolic rotation-mode start: X = 1, Y = 0, Z = x'.
    pub fn initialize_rotation_state(result: &PreprocessResult) -> RotationState {
        RotationState::new(FixedPoint16::ONE, FixedPoint16::ZERO, result.mapped_input)
    }

    /// n = round(x / ln2)
    fn reduction_factor(x: f64) -> i32 {
        (x * INV_LN2).round() as i32
    }

    /// Moves n by ±1 until |x'| <= ln2/2. At most a step or two after rounding.
    fn fine_adjust(mapped: f64, n: &mut i32) -> f64 {
        let mut adjusted = mapped;
        while adjusted > CONVERGENCE_LIMIT {
            *n += 1;
            adjusted -= LN2;
        }
        while adjusted < -CONVERGENCE_LIMIT {
            *n -= 1;
            adjusted += LN2;
        }
        adjusted
    }

    fn is_practical(input: f32) -> bool {
        input.is_finite() && (PRACTICAL_MIN_INPUT..=PRACTICAL_MAX_INPUT).contains(&input)
    }
}
