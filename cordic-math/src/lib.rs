//! # cordic-math
//!
//! Deterministic Q3.12 fixed-point arithmetic for the CORDIC exponential pipeline.
//!
//! This crate provides [`FixedPoint16`], a signed 16-bit value with 12 fractional
//! bits (resolution 2^-12 ≈ 0.000244, range ≈ [-8.0, 7.99976]).
//! Construction from a float saturates; add/sub/shift wrap like a fixed-width
//! hardware datapath.
//!
//! The [`config`] module holds the read-only constants shared by every stage.

pub mod config;
pub mod fixed_point;
pub mod ops;

pub use fixed_point::FixedPoint16;
