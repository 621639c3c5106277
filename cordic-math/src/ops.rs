//! Datapath operations on [`FixedPoint16`].
//!
//! Add, subtract and negate wrap on overflow exactly like a 16-bit adder would.
//! Only float construction saturates. Long chains of additions near ±8.0 can
//! therefore flip sign; callers keep operands inside the reduced domain.

use super::FixedPoint16;
use std::ops::{Add, Neg, Shr, Sub};

impl FixedPoint16 {
    /// Wrapping addition
    pub fn wrapping_add(self, other: Self) -> Self {
        Self::from_raw(self.raw().wrapping_add(other.raw()))
    }

    /// Wrapping subtraction
    pub fn wrapping_sub(self, other: Self) -> Self {
        Self::from_raw(self.raw().wrapping_sub(other.raw()))
    }

    /// Arithmetic right shift, i.e. multiplication by 2^-shift rounded toward -inf.
    /// Shifts past the word width collapse to 0 or -1 LSB.
    pub fn shift_right(self, shift: u32) -> Self {
        Self::from_raw(self.raw() >> shift.min(15))
    }

    /// Multiply by the rotation direction `+1` / `-1`.
    pub fn apply_sign(self, positive: bool) -> Self {
        if positive {
            self
        } else {
            -self
        }
    }
}

impl Add for FixedPoint16 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
}

impl Sub for FixedPoint16 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
}

impl Neg for FixedPoint16 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_raw(self.raw().wrapping_neg())
    }
}

impl Shr<u32> for FixedPoint16 {
    type Output = Self;

    fn shr(self, shift: u32) -> Self {
        self.shift_right(shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sub() {
        let a = FixedPoint16::from_f32(1.5);
        let b = FixedPoint16::from_f32(2.5);

        assert!(((a + b).to_f32() - 4.0).abs() < 1e-6);
        assert!(((a - b).to_f32() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_shift() {
        let d = FixedPoint16::from_f32(7.0);
        assert!(((d >> 2).to_f32() - 1.75).abs() < 1e-6);

        // Arithmetic shift keeps the sign and rounds toward -inf
        let neg = FixedPoint16::from_raw(-3);
        assert_eq!((neg >> 1).raw(), -2);
        assert_eq!((neg >> 40).raw(), -1);
        assert_eq!((FixedPoint16::from_raw(3) >> 40).raw(), 0);
    }

    #[test]
    fn test_add_wraps_instead_of_saturating() {
        let a = FixedPoint16::from_f32(6.0);
        let b = FixedPoint16::from_f32(4.0);
        let sum = a + b;
        // 10.0 does not fit in Q3.12; the adder wraps to 10 - 16 = -6
        assert!((sum.to_f32() + 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_neg_and_sign() {
        let x = FixedPoint16::from_f32(0.75);
        assert_eq!((-x).raw(), -x.raw());
        assert_eq!(x.apply_sign(true), x);
        assert_eq!(x.apply_sign(false), -x);
        // i16::MIN negates to itself on a two's complement datapath
        assert_eq!(-FixedPoint16::MIN, FixedPoint16::MIN);
    }
}
