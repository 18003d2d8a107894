//! Fourier coefficients of fully-normalized associated Legendre functions.
//!
//! `Pbar_nm(theta) = sum_j P_nmj * cos(k theta)` for even `m` and
//! `sum_j P_nmj * sin(k theta)` for odd `m`, with `k = 2j` (even `n`) or
//! `k = 2j + 1` (odd `n`). The kernels follow Fukushima, T. (2018), "Fast
//! computation of sine/cosine series coefficients of associated Legendre
//! functions of arbitrary high degree and order".

pub mod base;
pub mod degree;
pub mod direct;
pub mod order;

pub use base::{MAX_BASE_DEGREE, base_case_coefficients};
pub use degree::{DiagonalPair, diagonal_step, diagonal_step_even, diagonal_step_odd};
pub use direct::{DirectLegendre, DirectLegendreApi, DirectLegendreInput, direct_legendre};
pub use order::{order_step, order_step_even, order_step_odd};

use crate::domain::PnmjError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LegendreError {
    #[error("closed-form coefficients exist only up to degree 4, got degree {degree}")]
    DegreeAboveBaseCase { degree: usize },
    #[error("harmonic order {order} cannot be larger than harmonic degree {degree}")]
    OrderAboveDegree { degree: usize, order: usize },
    #[error("degree {degree} has the wrong parity for the {expected} recursion")]
    ParityMismatch {
        degree: usize,
        expected: &'static str,
    },
    #[error("order recursion requires order <= degree - 2, got degree {degree}, order {order}")]
    OrderAboveRecursionLimit { degree: usize, order: usize },
}

impl From<LegendreError> for PnmjError {
    fn from(error: LegendreError) -> Self {
        let placeholder = match error {
            LegendreError::DegreeAboveBaseCase { .. } => "INPUT.PNMJ_BASE_DEGREE",
            LegendreError::OrderAboveDegree { .. } => "INPUT.PNMJ_ORDER",
            LegendreError::ParityMismatch { .. } => "INPUT.PNMJ_PARITY",
            LegendreError::OrderAboveRecursionLimit { .. } => "INPUT.PNMJ_ORDER",
        };
        PnmjError::invalid_argument(placeholder, error.to_string())
    }
}

/// Number of Fourier coefficients `floor(n / 2) + 1` stored per `(n, m)`.
pub const fn coefficient_count(degree: usize) -> usize {
    degree / 2 + 1
}

/// Fourier wave-number `k` of coefficient `j` of a degree-`n` function.
pub const fn j_to_k(degree: usize, j: usize) -> usize {
    if degree % 2 == 0 { 2 * j } else { 2 * j + 1 }
}

/// Inverse of [`j_to_k`]; the parity of `k` already encodes the degree parity.
pub const fn k_to_j(k: usize) -> usize {
    k / 2
}
