//! Read-only algorithm configuration.
//!
//! These values are fixed at compile time and exposed for host introspection;
//! nothing in the pipeline mutates them.

/// Total word width of [`FixedPoint16`](crate::FixedPoint16) in bits.
pub const WORD_WIDTH: u32 = 16;
/// Fractional bits (Q3.12).
pub const FRAC_WIDTH: u32 = 12;
/// Integer bits, excluding the sign bit.
pub const INT_WIDTH: u32 = 3;

/// Smallest representable step, 2^-12.
pub const RESOLUTION: f64 = 1.0 / (1u32 << FRAC_WIDTH) as f64;

/// Upper bound on rotation steps per evaluation.
pub const MAX_ITERATIONS: usize = 6;
/// Residual angle magnitude below which the rotation is considered done.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Number of elementary angles, k = 1..=15.
pub const ANGLE_TABLE_SIZE: usize = 15;
/// Numerical slack applied when comparing a tabulated angle against |Z|.
pub const SELECTION_SLACK: f64 = 1e-6;

pub const LN2: f64 = std::f64::consts::LN_2;
pub const INV_LN2: f64 = std::f64::consts::LOG2_E;
/// Half-width of the reduced domain: |x'| <= ln2 / 2 ≈ 0.34657.
pub const CONVERGENCE_LIMIT: f64 = LN2 / 2.0;

/// Saturation targets for inputs the reducer cannot map.
pub const SOFTMAX_MIN_LOGIT: f32 = -8.0;
pub const SOFTMAX_MAX_LOGIT: f32 = 8.0;

/// Inputs outside this interval (or non-finite) take the saturation path.
pub const PRACTICAL_MIN_INPUT: f32 = -15.0;
pub const PRACTICAL_MAX_INPUT: f32 = 15.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_are_consistent() {
        assert_eq!(WORD_WIDTH, 1 + INT_WIDTH + FRAC_WIDTH);
        assert!((RESOLUTION - 0.000244140625).abs() < 1e-15);
    }

    #[test]
    fn test_convergence_limit() {
        assert!((CONVERGENCE_LIMIT - 0.346573590279973).abs() < 1e-12);
        assert!((LN2 * INV_LN2 - 1.0).abs() < 1e-15);
    }
}
