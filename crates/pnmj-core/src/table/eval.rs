//! Point evaluation of Legendre functions and spherical harmonics from a
//! built table or a single coefficient row.

use super::{PnmjTable, TableAccessError};
use crate::common::constants::PI;
use crate::numerics::NumericTolerance;
use crate::numerics::legendre::{DirectLegendre, DirectLegendreApi, DirectLegendreInput, j_to_k};
use num_complex::Complex64;
use serde::Serialize;

/// Sums a Fourier series `P_nmj` (ascending `j`) of `Pbar_nm` at
/// `colatitude` (radians).
pub fn legendre_from_series(
    degree: usize,
    order: usize,
    coefficients: &[f64],
    colatitude: f64,
) -> f64 {
    let use_cosine = order % 2 == 0;
    coefficients
        .iter()
        .enumerate()
        .map(|(j, coefficient)| {
            let phase = j_to_k(degree, j) as f64 * colatitude;
            let basis = if use_cosine { phase.cos() } else { phase.sin() };
            coefficient * basis
        })
        .sum()
}

/// `Pbar_nm(theta) * exp(i m lambda)` from a Fourier series.
pub fn harmonic_from_series(
    degree: usize,
    order: usize,
    coefficients: &[f64],
    colatitude: f64,
    longitude: f64,
) -> Complex64 {
    let radial = legendre_from_series(degree, order, coefficients, colatitude);
    Complex64::from_polar(radial, order as f64 * longitude)
}

/// Sums the stored Fourier series of `Pbar_nm` at `colatitude` (radians).
pub fn legendre_from_coefficients(
    table: &PnmjTable,
    degree: usize,
    order: usize,
    colatitude: f64,
) -> Result<f64, TableAccessError> {
    let coefficients = table.coefficients(order, degree)?;
    Ok(legendre_from_series(degree, order, &coefficients, colatitude))
}

/// `Pbar_nm(theta) * exp(i m lambda)`.
pub fn spherical_harmonic(
    table: &PnmjTable,
    degree: usize,
    order: usize,
    colatitude: f64,
    longitude: f64,
) -> Result<Complex64, TableAccessError> {
    let coefficients = table.coefficients(order, degree)?;
    Ok(harmonic_from_series(
        degree,
        order,
        &coefficients,
        colatitude,
        longitude,
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSample {
    pub degree: usize,
    pub order: usize,
    pub colatitude: f64,
    pub fourier: f64,
    pub direct: f64,
}

impl VerificationSample {
    pub fn abs_diff(&self) -> f64 {
        (self.fourier - self.direct).abs()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub max_degree: usize,
    pub samples: usize,
    pub checked: usize,
    pub failures: usize,
    pub worst: Option<VerificationSample>,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }

    pub fn worst_abs_diff(&self) -> f64 {
        self.worst.map_or(0.0, |sample| sample.abs_diff())
    }
}

/// Compares every `(n, m)` up to `max_degree` against the point-wise
/// recursion at `samples` midpoint colatitudes in `(0, pi)`.
pub fn verify_against_direct(
    table: &PnmjTable,
    max_degree: usize,
    samples: usize,
    tolerance: NumericTolerance,
) -> Result<VerificationReport, TableAccessError> {
    let mut report = VerificationReport {
        max_degree,
        samples,
        checked: 0,
        failures: 0,
        worst: None,
    };

    for step in 0..samples {
        let colatitude = (step as f64 + 0.5) * PI / samples as f64;
        for degree in 0..=max_degree {
            for order in 0..=degree {
                let sample = VerificationSample {
                    degree,
                    order,
                    colatitude,
                    fourier: legendre_from_coefficients(table, degree, order, colatitude)?,
                    direct: DirectLegendre
                        .evaluate(DirectLegendreInput::new(degree, order, colatitude)),
                };

                report.checked += 1;
                if !tolerance.accepts(sample.fourier, sample.direct) {
                    report.failures += 1;
                }
                if report.worst_abs_diff() < sample.abs_diff() || report.worst.is_none() {
                    report.worst = Some(sample);
                }
            }
        }
    }

    Ok(report)
}
