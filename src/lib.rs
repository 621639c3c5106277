//! # mini-cordic
//!
//! Shift-and-add exponential and softmax for 16-bit fixed-point datapaths.
//!
//! Crates:
//! - [`cordic_math`]: Q3.12 scalar with wrapping add/sub and arithmetic shift
//! - [`cordic_core`]: angle table, range reduction, rotation engine, reconstruction
//! - [`cordic_softmax`]: drop-in `exp`/`softmax` facade and C exports
//!
//! ```
//! let probs = mini_cordic::softmax(&[0.5, 1.5, -0.25]);
//! assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
//! ```

pub use cordic_core;
pub use cordic_math;
pub use cordic_softmax;

pub use cordic_core::{
    angle_table, AngleTable, ExpKernel, PostprocessResult, PreprocessResult, RangeReducer,
    ResultReconstructor, RotationEngine, ScaleFactorMode, StdExp,
};
pub use cordic_math::FixedPoint16;
pub use cordic_softmax::{exp, exp_batch, softmax, CordicConfig, CordicSoftmax, ExpTrace};
