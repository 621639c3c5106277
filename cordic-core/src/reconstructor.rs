use crate::angle_table::{angle_table, AngleTable};
use crate::reducer::PreprocessResult;
use crate::rotation::IterationResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the rotation gain K is estimated before dividing it out of X and Y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleFactorMode {
    /// K = Π sqrt(1 - 4^-k) over every applied angle, repeats included.
    #[default]
    AngleProduct,
    /// K = sqrt(|X² - Y²|). Superseded: assumes cosh² - sinh² = 1 holds exactly
    /// after truncated fixed-point rotation. Kept for comparison runs.
    HyperbolicIdentity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccuracyGrade {
    /// < 0.1 %
    Excellent,
    /// < 1 %
    VeryGood,
    /// < 5 %
    Good,
    Acceptable,
}

impl AccuracyGrade {
    pub fn from_relative_error(relative_error: f64) -> Self {
        if relative_error < 0.001 {
            Self::Excellent
        } else if relative_error < 0.01 {
            Self::VeryGood
        } else if relative_error < 0.05 {
            Self::Good
        } else {
            Self::Acceptable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PostprocessResult {
    pub exponential_value: f64,
    pub cosh_value: f64,
    pub sinh_value: f64,
    pub scaling_factor: f64,
    /// |computed - e^x| / e^x against the f64 reference; absolute error when
    /// the reference is ~0. Diagnostic only.
    pub relative_error: f64,
}

impl PostprocessResult {
    /// cosh² - sinh² - 1, zero for an exact rotation.
    pub fn identity_residual(&self) -> f64 {
        self.cosh_value * self.cosh_value - self.sinh_value * self.sinh_value - 1.0
    }

    pub fn accuracy_grade(&self) -> AccuracyGrade {
        AccuracyGrade::from_relative_error(self.relative_error)
    }
}

/// Turns the terminal rotation state back into e^x.
///
/// 1. K from the applied angles
/// 2. cosh(x') = X / K, sinh(x') = Y / K
/// 3. e^(x') = cosh(x') + sinh(x')
/// 4. e^x = e^(x') · 2^n when range reduction was applied
pub struct ResultReconstructor<'a> {
    table: &'a AngleTable,
    mode: ScaleFactorMode,
}

impl ResultReconstructor<'static> {
    pub fn new(mode: ScaleFactorMode) -> Self {
        Self::with_table(angle_table(), mode)
    }
}

impl Default for ResultReconstructor<'static> {
    fn default() -> Self {
        Self::new(ScaleFactorMode::default())
    }
}

impl<'a> ResultReconstructor<'a> {
    /// The table must be the one the rotation engine selected indices from.
    pub fn with_table(table: &'a AngleTable, mode: ScaleFactorMode) -> Self {
        Self { table, mode }
    }

    pub fn mode(&self) -> ScaleFactorMode {
        self.mode
    }

    pub fn reconstruct(
        &self,
        iteration: &IterationResult,
        preprocess: &PreprocessResult,
    ) -> PostprocessResult {
        let x_final = iteration.final_state.x.to_f64();
        let y_final = iteration.final_state.y.to_f64();

        let scaling_factor = match self.mode {
            ScaleFactorMode::AngleProduct => self.angle_product(&iteration.selected_angles),
            ScaleFactorMode::HyperbolicIdentity => {
                (x_final * x_final - y_final * y_final).abs().sqrt()
            }
        };

        let cosh_value = x_final / scaling_factor;
        let sinh_value = y_final / scaling_factor;
        let exp_mapped = cosh_value + sinh_value;
        let exponential_value = Self::restore(exp_mapped, preprocess);
        let relative_error = Self::relative_error(exponential_value, preprocess.original_input);

        debug!(
            input = preprocess.original_input,
            k = scaling_factor,
            cosh = cosh_value,
            sinh = sinh_value,
            exp = exponential_value,
            relative_error,
            "reconstructed exponential"
        );

        PostprocessResult {
            exponential_value,
            cosh_value,
            sinh_value,
            scaling_factor,
            relative_error,
        }
    }

    /// Product of per-step gains. Each application of α_k contributes again.
    fn angle_product(&self, selected_angles: &[usize]) -> f64 {
        selected_angles
            .iter()
            .filter_map(|&index| self.table.get(index).ok())
            .map(|entry| entry.rotation_gain())
            .product()
    }

    fn restore(exp_mapped: f64, preprocess: &PreprocessResult) -> f64 {
        if !preprocess.mapping_applied {
            return exp_mapped;
        }
        exp_mapped * (2.0f64).powi(preprocess.reduction_factor)
    }

    fn relative_error(computed: f64, original_input: f32) -> f64 {
        let reference = (original_input as f64).exp();
        if !reference.is_finite() || !computed.is_finite() {
            return f64::INFINITY;
        }
        if reference.abs() < 1e-10 {
            return (computed - reference).abs();
        }
        (computed - reference).abs() / reference.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::RangeReducer;
    use crate::rotation::RotationEngine;

    fn run(x: f32, mode: ScaleFactorMode) -> PostprocessResult {
        let prep = RangeReducer::process(x);
        let iter = RotationEngine::new().iterate(RangeReducer::initialize_rotation_state(&prep));
        ResultReconstructor::new(mode).reconstruct(&iter, &prep)
    }

    #[test]
    fn test_exp_zero_is_exact() {
        let r = run(0.0, ScaleFactorMode::AngleProduct);
        assert_eq!(r.scaling_factor, 1.0);
        assert_eq!(r.exponential_value, 1.0);
        assert_eq!(r.relative_error, 0.0);
        assert_eq!(r.accuracy_grade(), AccuracyGrade::Excellent);
    }

    #[test]
    fn test_error_table() {
        let cases: [(f32, f64); 10] = [
            (0.0, 0.001),
            (0.5, 0.005),
            (1.0, 0.005),
            (2.0, 0.01),
            (3.0, 0.01),
            (5.5, 0.01),
            (-1.0, 0.005),
            (-3.0, 0.01),
            (8.0, 0.01),
            (-8.0, 0.01),
        ];
        for (x, max_err) in cases {
            let r = run(x, ScaleFactorMode::AngleProduct);
            assert!(
                r.relative_error < max_err,
                "exp({}) = {} has error {} >= {}",
                x, r.exponential_value, r.relative_error, max_err
            );
        }
    }

    #[test]
    fn test_hyperbolic_identity_holds() {
        for x in [0.1f32, 0.3, -0.3, 1.0, 2.5, -1.5, 5.5] {
            let r = run(x, ScaleFactorMode::AngleProduct);
            assert!(r.identity_residual().abs() < 0.1, "identity off for {}", x);
        }
    }

    #[test]
    fn test_identity_mode_stays_close() {
        for x in [1.0f32, 2.5, -3.0] {
            let product = run(x, ScaleFactorMode::AngleProduct);
            let identity = run(x, ScaleFactorMode::HyperbolicIdentity);
            assert!(identity.relative_error < 0.01);
            assert!(identity.identity_residual().abs() < 1e-9);
            assert!((product.scaling_factor - identity.scaling_factor).abs() < 0.01);
        }
    }

    #[test]
    fn test_scaling_factor_counts_repeats() {
        let table = angle_table();
        let reconstructor = ResultReconstructor::default();
        let g3 = table.get(3).unwrap().rotation_gain();
        assert!((reconstructor.angle_product(&[3, 3]) - g3 * g3).abs() < 1e-15);
        assert_eq!(reconstructor.angle_product(&[]), 1.0);
    }

    #[test]
    fn test_relative_error_near_zero_reference() {
        // e^-30 < 1e-10, absolute error instead of relative
        let err = ResultReconstructor::relative_error(0.5, -30.0);
        assert!((err - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_grades() {
        assert_eq!(AccuracyGrade::from_relative_error(0.0005), AccuracyGrade::Excellent);
        assert_eq!(AccuracyGrade::from_relative_error(0.005), AccuracyGrade::VeryGood);
        assert_eq!(AccuracyGrade::from_relative_error(0.02), AccuracyGrade::Good);
        assert_eq!(AccuracyGrade::from_relative_error(0.2), AccuracyGrade::Acceptable);
    }
}
