//! C-linkage exports for inference hosts.
//!
//! Null pointers and zero lengths are silent no-ops. Input and output may
//! point at the same buffer.

use crate::softmax::shared;
use cordic_core::ExpKernel;
use cordic_math::config;
use std::slice;

/// Scalar CORDIC exp.
#[no_mangle]
pub extern "C" fn cordic_exp(x: f32) -> f32 {
    shared().exp(x)
}

/// `out[i] = softmax(x)[i]`
///
/// # Safety
/// `x` must be valid for `n` reads and `out` for `n` writes.
#[no_mangle]
pub unsafe extern "C" fn cordic_softmax(x: *const f32, out: *mut f32, n: usize) {
    if x.is_null() || out.is_null() || n == 0 {
        return;
    }
    let logits = read_input(x, n);
    let probabilities = slice::from_raw_parts_mut(out, n);
    // Lengths are both n
    let _ = shared().softmax_into(&logits, probabilities);
}

/// `out[i] = exp(x[i])`
///
/// # Safety
/// `x` must be valid for `n` reads and `out` for `n` writes.
#[no_mangle]
pub unsafe extern "C" fn cordic_exp_batch(x: *const f32, out: *mut f32, n: usize) {
    if x.is_null() || out.is_null() || n == 0 {
        return;
    }
    let inputs = read_input(x, n);
    let outputs = slice::from_raw_parts_mut(out, n);
    let _ = shared().exp_batch_into(&inputs, outputs);
}

#[no_mangle]
pub extern "C" fn cordic_word_width() -> u32 {
    config::WORD_WIDTH
}

#[no_mangle]
pub extern "C" fn cordic_frac_width() -> u32 {
    config::FRAC_WIDTH
}

#[no_mangle]
pub extern "C" fn cordic_max_iterations() -> usize {
    config::MAX_ITERATIONS
}

#[no_mangle]
pub extern "C" fn cordic_convergence_threshold() -> f64 {
    config::CONVERGENCE_THRESHOLD
}

// Copied so the output slice never aliases a live shared borrow.
unsafe fn read_input(x: *const f32, n: usize) -> Vec<f32> {
    slice::from_raw_parts(x, n).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_scalar_matches_facade() {
        assert_eq!(cordic_exp(1.5), crate::exp(1.5));
        assert!(cordic_exp(f32::NAN).is_finite());
    }

    #[test]
    fn test_softmax_export() {
        let x = [1.0f32, 2.0, 3.0];
        let mut out = [0.0f32; 3];
        unsafe { cordic_softmax(x.as_ptr(), out.as_mut_ptr(), x.len()) };
        assert_eq!(out.to_vec(), crate::softmax(&x));
    }

    #[test]
    fn test_in_place() {
        let mut buf = [0.5f32, -1.0, 2.0, 0.0];
        let expected = crate::softmax(&buf);
        let p = buf.as_mut_ptr();
        unsafe { cordic_softmax(p, p, buf.len()) };
        assert_eq!(buf.to_vec(), expected);
    }

    #[test]
    fn test_exp_batch_export() {
        let x = [0.0f32, 1.0, -2.0];
        let mut out = [0.0f32; 3];
        unsafe { cordic_exp_batch(x.as_ptr(), out.as_mut_ptr(), x.len()) };
        assert_eq!(out.to_vec(), crate::exp_batch(&x));
    }

    #[test]
    fn test_null_and_empty_are_noops() {
        let mut out = [7.0f32; 2];
        unsafe {
            cordic_softmax(ptr::null(), out.as_mut_ptr(), 2);
            cordic_exp_batch(ptr::null(), out.as_mut_ptr(), 2);
            cordic_softmax([1.0f32].as_ptr(), out.as_mut_ptr(), 0);
            cordic_softmax([1.0f32, 2.0].as_ptr(), ptr::null_mut(), 2);
        }
        assert_eq!(out, [7.0, 7.0]);
    }

    #[test]
    fn test_config_getters() {
        assert_eq!(cordic_word_width(), 16);
        assert_eq!(cordic_frac_width(), 12);
        assert_eq!(cordic_max_iterations(), 6);
        assert_eq!(cordic_convergence_threshold(), 1e-4);
    }
}
