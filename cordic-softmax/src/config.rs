//! Build-time parameters of the kernel, exposed as a serializable snapshot
//! so hosts can record which configuration produced their numbers.

use cordic_core::ScaleFactorMode;
use cordic_math::config;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CordicConfig {
    pub word_width: u32,
    pub frac_width: u32,
    pub int_width: u32,
    pub max_iterations: usize,
    pub convergence_threshold: f64,
    pub angle_table_size: usize,
    pub scale_mode: ScaleFactorMode,
    pub min_logit: f32,
    pub max_logit: f32,
    pub practical_min_input: f32,
    pub practical_max_input: f32,
}

impl CordicConfig {
    /// Snapshot of the compiled-in constants.
    pub fn current() -> Self {
        Self {
            word_width: config::WORD_WIDTH,
            frac_width: config::FRAC_WIDTH,
            int_width: config::INT_WIDTH,
            max_iterations: config::MAX_ITERATIONS,
            convergence_threshold: config::CONVERGENCE_THRESHOLD,
            angle_table_size: config::ANGLE_TABLE_SIZE,
            scale_mode: ScaleFactorMode::default(),
            min_logit: config::SOFTMAX_MIN_LOGIT,
            max_logit: config::SOFTMAX_MAX_LOGIT,
            practical_min_input: config::PRACTICAL_MIN_INPUT,
            practical_max_input: config::PRACTICAL_MAX_INPUT,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn describe(&self) -> String {
        format!(
            "Q{}.{} ({}-bit), {} iterations max, convergence |Z| < {:e}, {} angles, {:?} gain, saturation [{}, {}], practical range [{}, {}]",
            self.int_width,
            self.frac_width,
            self.word_width,
            self.max_iterations,
            self.convergence_threshold,
            self.angle_table_size,
            self.scale_mode,
            self.min_logit,
            self.max_logit,
            self.practical_min_input,
            self.practical_max_input,
        )
    }
}

impl Default for CordicConfig {
    fn default() -> Self {
        Self::current()
    }
}
