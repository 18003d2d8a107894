pub mod legendre;
pub mod xnum;

pub use legendre::{
    DiagonalPair, DirectLegendre, DirectLegendreApi, DirectLegendreInput, LegendreError,
    MAX_BASE_DEGREE, base_case_coefficients, coefficient_count, diagonal_step, direct_legendre,
    j_to_k, k_to_j, order_step,
};
pub use xnum::{XNumber, renormalize, scaled_sum, to_native};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericTolerance {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub relative_floor: f64,
}

impl NumericTolerance {
    pub const fn new(abs_tol: f64, rel_tol: f64) -> Self {
        Self {
            abs_tol,
            rel_tol,
            relative_floor: 1.0e-12,
        }
    }

    pub fn accepts(&self, lhs: f64, rhs: f64) -> bool {
        within_tolerance(lhs, rhs, self.abs_tol, self.rel_tol, self.relative_floor)
    }
}

impl Default for NumericTolerance {
    fn default() -> Self {
        Self::new(1.0e-11, 1.0e-9)
    }
}

pub fn relative_difference(lhs: f64, rhs: f64, relative_floor: f64) -> f64 {
    let scale = lhs.abs().max(rhs.abs()).max(relative_floor);
    (lhs - rhs).abs() / scale
}

pub fn within_tolerance(
    lhs: f64,
    rhs: f64,
    abs_tol: f64,
    rel_tol: f64,
    relative_floor: f64,
) -> bool {
    let abs_diff = (lhs - rhs).abs();
    abs_diff <= abs_tol || relative_difference(lhs, rhs, relative_floor) <= rel_tol
}
