//! # cordic-core
//!
//! The four stages of the greedy hyperbolic CORDIC exponential:
//! - [`AngleTable`]: elementary angles α_k = atanh(2^-k), k = 1..=15
//! - [`RangeReducer`]: maps x to x' with e^x = 2^n · e^(x') and |x'| <= ln2/2
//! - [`RotationEngine`]: greedy shift-and-add rotation of (X, Y, Z)
//! - [`ResultReconstructor`]: divides out the gain and rebuilds e^x = (cosh + sinh) · 2^n
//!
//! Also defines [`ExpKernel`], the exp/softmax interface shared by the CORDIC
//! facade and the [`StdExp`] reference.

pub mod angle_table;
pub mod kernel;
pub mod reconstructor;
pub mod reducer;
pub mod rotation;

pub use angle_table::{angle_table, AngleTable, AngleTableEntry, AngleTableError};
pub use kernel::{ExpKernel, SoftmaxError, StdExp};
pub use reconstructor::{AccuracyGrade, PostprocessResult, ResultReconstructor, ScaleFactorMode};
pub use reducer::{PreprocessResult, RangeReducer};
pub use rotation::{IterationResult, RotationEngine, RotationState};
