use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SoftmaxError {
    #[error("Shape mismatch: {0} logits vs {1} outputs")]
    ShapeMismatch(usize, usize),
}

/// Scalar exponential provider with softmax built on top of it.
///
/// Implementors supply `exp`; batch and softmax reuse it element by element,
/// so a CORDIC kernel and the reference kernel share the exact same
/// stabilization and normalization path.
pub trait ExpKernel {
    fn exp(&self, x: f32) -> f32;

    /// Elementwise exp. Elements are independent.
    fn exp_batch_into(&self, inputs: &[f32], outputs: &mut [f32]) -> Result<(), SoftmaxError> {
        if inputs.len() != outputs.len() {
            return Err(SoftmaxError::ShapeMismatch(inputs.len(), outputs.len()));
        }
        for (out, &x) in outputs.iter_mut().zip(inputs) {
            *out = self.exp(x);
        }
        Ok(())
    }

    fn exp_batch(&self, inputs: &[f32]) -> Vec<f32> {
        inputs.iter().map(|&x| self.exp(x)).collect()
    }

    /// softmax(x_i) = exp(x_i - max) / Σ exp(x_j - max)
    ///
    /// Empty input is a no-op. If the sum degenerates (non-finite or not
    /// positive) the output falls back to a uniform distribution.
    fn softmax_into(&self, logits: &[f32], probabilities: &mut [f32]) -> Result<(), SoftmaxError> {
        if logits.len() != probabilities.len() {
            return Err(SoftmaxError::ShapeMismatch(logits.len(), probabilities.len()));
        }
        if logits.is_empty() {
            return Ok(());
        }

        let max_logit = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let mut sum = 0.0f64;
        for (p, &logit) in probabilities.iter_mut().zip(logits) {
            *p = self.exp(logit - max_logit);
            sum += *p as f64;
        }

        if !(sum.is_finite() && sum > 0.0) {
            let uniform = 1.0 / logits.len() as f32;
            probabilities.fill(uniform);
            return Ok(());
        }

        let inv_sum = 1.0 / sum;
        for p in probabilities.iter_mut() {
            *p = (*p as f64 * inv_sum) as f32;
        }
        Ok(())
    }

    fn softmax(&self, logits: &[f32]) -> Vec<f32> {
        let mut probabilities = vec![0.0; logits.len()];
        // Lengths match by construction
        let _ = self.softmax_into(logits, &mut probabilities);
        probabilities
    }
}

/// Reference kernel backed by the platform `expf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdExp;

impl ExpKernel for StdExp {
    fn exp(&self, x: f32) -> f32 {
        x.exp()
    }
}
