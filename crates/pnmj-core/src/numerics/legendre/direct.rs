//! Point-wise fully-normalized Legendre functions via the standard
//! sectoral-then-column recursion.
//!
//! This evaluator works in native floats and loses range near the poles at
//! high degree; it exists to cross-check the Fourier tables at moderate
//! degree.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectLegendreInput {
    pub degree: usize,
    pub order: usize,
    pub colatitude: f64,
}

impl DirectLegendreInput {
    pub fn new(degree: usize, order: usize, colatitude: f64) -> Self {
        Self {
            degree,
            order,
            colatitude,
        }
    }
}

pub trait DirectLegendreApi {
    fn evaluate(&self, input: DirectLegendreInput) -> f64;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectLegendre;

impl DirectLegendreApi for DirectLegendre {
    fn evaluate(&self, input: DirectLegendreInput) -> f64 {
        direct_legendre(input.degree, input.order, input.colatitude)
    }
}

/// `Pbar_nm(theta)` without the Condon-Shortley phase, normalized so that its
/// mean square over the sphere is one.
pub fn direct_legendre(degree: usize, order: usize, colatitude: f64) -> f64 {
    assert!(
        order <= degree,
        "fully-normalized Legendre function requires order <= degree"
    );

    let t = colatitude.cos();
    let u = colatitude.sin();

    let mut p_mm = 1.0;
    for k in 1..=order {
        let k = k as f64;
        let factor = if k == 1.0 {
            3.0_f64.sqrt()
        } else {
            ((2.0 * k + 1.0) / (2.0 * k)).sqrt()
        };
        p_mm *= factor * u;
    }

    if degree == order {
        return p_mm;
    }

    let p_m_plus_1_m = ((2 * order + 3) as f64).sqrt() * t * p_mm;
    if degree == order + 1 {
        return p_m_plus_1_m;
    }

    let m = order as f64;
    let mut p_lm2 = p_mm;
    let mut p_lm1 = p_m_plus_1_m;
    for l in (order + 2)..=degree {
        let l = l as f64;
        let denominator = (l - m) * (l + m);
        let a = ((2.0 * l - 1.0) * (2.0 * l + 1.0) / denominator).sqrt();
        let b = ((2.0 * l + 1.0) * (l + m - 1.0) * (l - m - 1.0) / (denominator * (2.0 * l - 3.0)))
            .sqrt();
        let p_lm = a * t * p_lm1 - b * p_lm2;
        p_lm2 = p_lm1;
        p_lm1 = p_lm;
    }

    p_lm1
}
