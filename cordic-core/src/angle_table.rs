use cordic_math::config::{ANGLE_TABLE_SIZE, SELECTION_SLACK};
use cordic_math::FixedPoint16;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AngleTableError {
    #[error("Angle table index {index} out of range [1, {size}]")]
    IndexOutOfRange { index: usize, size: usize },
}

/// One elementary hyperbolic angle α_k = atanh(2^-k).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleTableEntry {
    /// Shift amount k
    pub shift: u32,
    /// tanh(α_k) = 2^-k
    pub tanh_value: f64,
    pub angle: f64,
    /// α_k as the datapath subtracts it from Z
    pub fixed_angle: FixedPoint16,
}

impl AngleTableEntry {
    pub fn new(shift: u32) -> Self {
        let tanh_value = (2.0f64).powi(-(shift as i32));
        let angle = tanh_value.atanh();
        Self {
            shift,
            tanh_value,
            angle,
            fixed_angle: FixedPoint16::from_f64(angle),
        }
    }

    /// Per-step magnitude gain of the (X, Y) pair: sqrt(1 - 4^-k) = 1 / cosh(α_k).
    pub fn rotation_gain(&self) -> f64 {
        (1.0 - self.tanh_value * self.tanh_value).sqrt()
    }
}

/// Elementary angles for k = 1..=15, strictly decreasing in `angle`.
///
/// Indices are 1-based to match the shift amount: `get(k).shift == k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleTable {
    entries: Vec<AngleTableEntry>,
}

/// Process-wide table, built on first use and read-only afterwards.
pub fn angle_table() -> &'static AngleTable {
    static TABLE: OnceLock<AngleTable> = OnceLock::new();
    TABLE.get_or_init(AngleTable::build)
}

impl AngleTable {
    pub fn build() -> Self {
        Self::with_size(ANGLE_TABLE_SIZE)
    }

    /// Table with k = 1..=size. Mostly useful for convergence experiments.
    pub fn with_size(size: usize) -> Self {
        let entries = (1..=size as u32).map(AngleTableEntry::new).collect();
        Self { entries }
    }

    pub fn get(&self, index: usize) -> Result<&AngleTableEntry, AngleTableError> {
        if !self.has_index(index) {
            return Err(AngleTableError::IndexOutOfRange {
                index,
                size: self.entries.len(),
            });
        }
        Ok(&self.entries[index - 1])
    }

    pub fn has_index(&self, index: usize) -> bool {
        index >= 1 && index <= self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AngleTableEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &AngleTableEntry> {
        self.entries.iter()
    }

    /// Greedy selection: the first (largest) angle with `angle <= |z| + slack`.
    ///
    /// Falls back to the smallest angle when the residual is below every entry.
    /// Returns `None` only for an empty table.
    pub fn select_greedy(&self, residual: f64) -> Option<usize> {
        let abs_z = residual.abs();
        self.entries
            .iter()
            .position(|entry| entry.angle <= abs_z + SELECTION_SLACK)
            .map(|pos| pos + 1)
            .or_else(|| (!self.entries.is_empty()).then_some(self.entries.len()))
    }

    /// Plain-text dump: k, tanh, angle, shift, raw fixed-point angle.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "k\t| tanh(a_k)\t| a_k\t\t| shift\t| fixed (raw)");
        let _ = writeln!(out, "{}", "-".repeat(64));
        for (i, entry) in self.entries.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}\t| {:.6}\t| {:.6}\t| {}\t| {}",
                i + 1,
                entry.tanh_value,
                entry.angle,
                entry.shift,
                entry.fixed_angle.raw()
            );
        }
        out
    }
}

impl Default for AngleTable {
    fn default() -> Self {
        Self::build()
    }
}
