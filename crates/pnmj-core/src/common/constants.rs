//! Numeric constants shared by the X-number arithmetic and the Legendre
//! kernels.
//!
//! The X-number radix is a power of two so that it, its reciprocal, and its
//! square root are exactly representable. The bit patterns below build the
//! values directly from the IEEE-754 exponent field.

pub const PI: f64 = std::f64::consts::PI;
pub const SQRT3: f64 = 1.732_050_807_568_877_293_527_446_341_505_872_4_f64;

/// Binary exponent of the X-number radix.
pub const RADIX_BITS: i32 = 960;

const fn power_of_two(exponent: i32) -> f64 {
    f64::from_bits(((1023 + exponent) as u64) << 52)
}

/// X-number radix, `2^960`.
pub const RADIX: f64 = power_of_two(RADIX_BITS);
/// `2^-960`.
pub const RADIX_INV: f64 = power_of_two(-RADIX_BITS);
/// `sqrt(RADIX)`, upper edge of the significand window.
pub const RADIX_SQRT: f64 = power_of_two(RADIX_BITS / 2);
/// `1 / sqrt(RADIX)`, lower edge of the significand window.
pub const RADIX_SQRT_INV: f64 = power_of_two(-RADIX_BITS / 2);

#[cfg(test)]
mod tests {
    use super::{PI, RADIX, RADIX_BITS, RADIX_INV, RADIX_SQRT, RADIX_SQRT_INV, SQRT3};

    #[test]
    fn radix_constants_are_exact_powers_of_two() {
        assert_eq!(RADIX, 2.0_f64.powi(RADIX_BITS));
        assert_eq!(RADIX_INV, 2.0_f64.powi(-RADIX_BITS));
        assert_eq!(RADIX_SQRT, 2.0_f64.powi(RADIX_BITS / 2));
        assert_eq!(RADIX_SQRT_INV, 2.0_f64.powi(-RADIX_BITS / 2));
    }

    #[test]
    fn radix_constants_are_mutually_consistent() {
        assert_eq!(RADIX * RADIX_INV, 1.0);
        assert_eq!(RADIX_SQRT * RADIX_SQRT, RADIX);
        assert_eq!(RADIX_SQRT * RADIX_SQRT_INV, 1.0);
        assert!(RADIX.is_finite());
        assert!(RADIX_INV.is_normal());
    }

    #[test]
    fn scalar_constants_match_std() {
        assert_eq!(SQRT3, 3.0_f64.sqrt());
        assert_eq!(PI, std::f64::consts::PI);
    }
}
