//! # cordic-softmax
//!
//! Drop-in exp and softmax for inference code, backed by the Q3.12 CORDIC
//! pipeline in `cordic-core`.
//!
//! Key types:
//! - [`CordicSoftmax`]: the kernel, implements [`ExpKernel`]
//! - [`ExpTrace`]: every stage's output for one evaluation
//! - [`CordicConfig`]: serializable snapshot of the compiled-in parameters
//!
//! The free functions [`exp`], [`exp_batch`] and [`softmax`] share one
//! process-wide kernel; [`ffi`] exposes the same kernel over the C ABI.

pub mod config;
pub mod ffi;
pub mod softmax;

pub use config::{CordicConfig, ConfigError};
pub use cordic_core::{ExpKernel, ScaleFactorMode, SoftmaxError, StdExp};
pub use softmax::{exp, exp_batch, shared, softmax, CordicSoftmax, ExpTrace};
