//! Fourier series coefficients of fully-normalized associated Legendre
//! functions, computed with extended-range arithmetic so that arbitrarily
//! high degrees stay representable.

pub mod common;
pub mod domain;
pub mod numerics;
pub mod table;

pub use domain::{PnmjError, PnmjErrorCategory, PnmjOrdering, PnmjResult};
pub use table::{
    BuildError, BuildSummary, OrderWindow, PnmjTable, TableAccessError, allocate_table,
    allocate_table_with_code, build_orders, build_table, coefficient_row,
    legendre_from_coefficients, spherical_harmonic,
};
