use cordic_core::{
    ExpKernel, IterationResult, PostprocessResult, PreprocessResult, RangeReducer,
    ResultReconstructor, RotationEngine, ScaleFactorMode,
};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// All intermediate results for one exp evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpTrace {
    pub preprocess: PreprocessResult,
    pub iteration: IterationResult,
    pub postprocess: PostprocessResult,
}

/// CORDIC replacement for `expf` and softmax.
///
/// Pipeline per element:
/// 1. [`RangeReducer`]: map x into [-ln2/2, ln2/2]
/// 2. [`RotationEngine`]: greedy hyperbolic rotations
/// 3. [`ResultReconstructor`]: e^x = (cosh + sinh) · 2^n
///
/// Holds no per-call state, so one instance can serve any number of threads.
///
/// # Example
/// ```
/// use cordic_softmax::{CordicSoftmax, ExpKernel};
///
/// let cordic = CordicSoftmax::new();
/// let e = cordic.exp(1.0);
/// assert!((e - std::f32::consts::E).abs() / std::f32::consts::E < 0.005);
///
/// let probs = cordic.softmax(&[1.0, 2.0, 3.0]);
/// assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
/// ```
pub struct CordicSoftmax {
    engine: RotationEngine<'static>,
    reconstructor: ResultReconstructor<'static>,
    debug: bool,
}

impl CordicSoftmax {
    pub fn new() -> Self {
        Self {
            engine: RotationEngine::new(),
            reconstructor: ResultReconstructor::default(),
            debug: false,
        }
    }

    /// Emit the full stage dump for every evaluation at `debug` level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_scale_mode(mut self, mode: ScaleFactorMode) -> Self {
        self.reconstructor = ResultReconstructor::new(mode);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.engine = self.engine.with_max_iterations(max_iterations);
        self
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.debug
    }

    pub fn scale_mode(&self) -> ScaleFactorMode {
        self.reconstructor.mode()
    }

    /// Run the whole pipeline and keep every stage's output.
    pub fn trace(&self, x: f32) -> ExpTrace {
        let preprocess = RangeReducer::process(x);
        let initial = RangeReducer::initialize_rotation_state(&preprocess);
        let iteration = self.engine.iterate(initial);
        let postprocess = self.reconstructor.reconstruct(&iteration, &preprocess);

        if self.debug {
            debug!(
                input = x,
                mapped = preprocess.mapped_input.to_f64(),
                n = preprocess.reduction_factor,
                angles = ?iteration.selected_angles,
                converged = iteration.converged_successfully,
                z_residual = iteration.final_state.z.to_f64(),
                exp = postprocess.exponential_value,
                relative_error = postprocess.relative_error,
                "cordic exp"
            );
        }

        ExpTrace {
            preprocess,
            iteration,
            postprocess,
        }
    }
}

impl Default for CordicSoftmax {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpKernel for CordicSoftmax {
    fn exp(&self, x: f32) -> f32 {
        let value = self.trace(x).postprocess.exponential_value as f32;
        // 2^n scaling of a saturated or wrapped value can still overflow f32
        if value.is_finite() {
            value
        } else {
            f32::MAX
        }
    }
}

/// Process-wide instance behind the free functions and the C exports.
pub fn shared() -> &'static CordicSoftmax {
    static INSTANCE: OnceLock<CordicSoftmax> = OnceLock::new();
    INSTANCE.get_or_init(CordicSoftmax::new)
}

/// Drop-in for `f32::exp`.
pub fn exp(x: f32) -> f32 {
    shared().exp(x)
}

pub fn exp_batch(inputs: &[f32]) -> Vec<f32> {
    shared().exp_batch(inputs)
}

/// Stabilized softmax, output length equals input length.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    shared().softmax(logits)
}
