//! Extended-range ("X-number") arithmetic.
//!
//! An X-number is `significand * RADIX^exponent` with `RADIX = 2^960`. The
//! recursion kernels keep every X-number weakly normalized, i.e. the
//! significand magnitude stays within `[RADIX^-1/2, RADIX^1/2)` unless the
//! value is exactly zero. Weak normalization only ever moves the exponent by
//! one step, so producers must never combine values that are more than one
//! step out of range.
//!
//! Reference: Fukushima, T. (2012), J. Geodesy 86, Tables 6-8.

use crate::common::constants::{RADIX, RADIX_INV, RADIX_SQRT, RADIX_SQRT_INV};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XNumber {
    pub significand: f64,
    pub exponent: i32,
}

impl XNumber {
    pub const ZERO: Self = Self {
        significand: 0.0,
        exponent: 0,
    };

    pub const fn new(significand: f64, exponent: i32) -> Self {
        Self {
            significand,
            exponent,
        }
    }

    /// Lifts a native float into X-number form with a zero exponent.
    pub const fn from_native(value: f64) -> Self {
        Self::new(value, 0)
    }

    pub fn to_native(self) -> f64 {
        to_native(self)
    }

    pub fn renormalized(self) -> Self {
        renormalize(self)
    }

    pub fn is_in_core_window(self) -> bool {
        let magnitude = self.significand.abs();
        (RADIX_SQRT_INV..RADIX_SQRT).contains(&magnitude)
    }
}

/// Weak renormalization: at most one exponent step.
pub fn renormalize(x: XNumber) -> XNumber {
    let magnitude = x.significand.abs();
    if magnitude >= RADIX_SQRT {
        XNumber::new(x.significand * RADIX_INV, x.exponent + 1)
    } else if magnitude < RADIX_SQRT_INV {
        XNumber::new(x.significand * RADIX, x.exponent - 1)
    } else {
        x
    }
}

/// Computes `f * x + g * y` for X-numbers `x`, `y` and native weights `f`, `g`.
///
/// Operands whose exponents differ by more than one are dropped: the
/// smaller term is below `2^-960` relative to the larger one.
pub fn scaled_sum(f: f64, x: XNumber, g: f64, y: XNumber) -> XNumber {
    let sum = match x.exponent - y.exponent {
        0 => XNumber::new(f * x.significand + g * y.significand, x.exponent),
        1 => XNumber::new(
            f * x.significand + g * (y.significand * RADIX_INV),
            x.exponent,
        ),
        -1 => XNumber::new(
            g * y.significand + f * (x.significand * RADIX_INV),
            y.exponent,
        ),
        difference if difference > 1 => XNumber::new(f * x.significand, x.exponent),
        _ => XNumber::new(g * y.significand, y.exponent),
    };

    renormalize(sum)
}

/// Flattens an X-number into a native float.
///
/// Exponents below `-1` underflow to zero. Exponents above `1` overflow to a
/// signed infinity, which is the exact result for any weakly normalized
/// significand.
pub fn to_native(x: XNumber) -> f64 {
    match x.exponent {
        0 => x.significand,
        -1 => x.significand * RADIX_INV,
        1 => x.significand * RADIX,
        exponent if exponent < -1 => 0.0,
        _ => {
            if x.significand == 0.0 {
                0.0
            } else {
                f64::INFINITY.copysign(x.significand)
            }
        }
    }
}
