//! Diagonal (`m = n`) and sub-diagonal (`m = n - 1`) coefficients obtained
//! from the diagonal of degree `n - 2` (Fukushima 2018, Tables 4 and 5).
//!
//! These are contract-checked hot paths: the build driver validates degree
//! ranges before calling in, so violations here panic.

use super::coefficient_count;
use crate::numerics::xnum::{XNumber, renormalize, scaled_sum};

#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalPair {
    /// `P_{n,n,j}`
    pub diagonal: Vec<XNumber>,
    /// `P_{n,n-1,j}`
    pub sub_diagonal: Vec<XNumber>,
}

/// Dispatches to the even or odd variant by the parity of `degree`.
pub fn diagonal_step(degree: usize, previous: &[XNumber]) -> DiagonalPair {
    if degree % 2 == 0 {
        diagonal_step_even(degree, previous)
    } else {
        diagonal_step_odd(degree, previous)
    }
}

// Eq. (19)
fn gamma(degree: usize) -> f64 {
    let n = degree as f64;
    0.125 * ((2.0 * n + 1.0) * (2.0 * n - 1.0) / (n * (n - 1.0))).sqrt()
}

fn scaled(weight: f64, x: XNumber) -> XNumber {
    renormalize(XNumber::new(weight * x.significand, x.exponent))
}

/// Even `degree >= 6`.
pub fn diagonal_step_even(degree: usize, previous: &[XNumber]) -> DiagonalPair {
    assert!(
        degree >= 6 && degree % 2 == 0,
        "even diagonal step requires an even degree >= 6, got {degree}"
    );
    assert_eq!(
        previous.len(),
        coefficient_count(degree - 2),
        "diagonal of degree {} has the wrong length",
        degree - 2
    );

    let jx = degree / 2;
    let gamma = gamma(degree);
    let gamma2 = 2.0 * gamma;
    let mut diagonal = vec![XNumber::ZERO; jx + 1];

    diagonal[0] = scaled_sum(gamma2, previous[0], -gamma, previous[1]);

    let partial = scaled_sum(-gamma2, previous[0], gamma2, previous[1]);
    diagonal[1] = scaled_sum(1.0, partial, -gamma, previous[2]);

    for j in 2..=jx - 2 {
        let partial = scaled_sum(-gamma, previous[j - 1], gamma2, previous[j]);
        diagonal[j] = scaled_sum(1.0, partial, -gamma, previous[j + 1]);
    }

    diagonal[jx - 1] = scaled_sum(-gamma, previous[jx - 2], gamma2, previous[jx - 1]);
    diagonal[jx] = scaled(-gamma, previous[jx - 1]);

    let alpha2 = 2.0 * (2.0 / degree as f64).sqrt();
    let mut sub_diagonal = Vec::with_capacity(jx + 1);
    sub_diagonal.push(XNumber::ZERO);
    for (j, value) in diagonal.iter().enumerate().skip(1) {
        sub_diagonal.push(scaled(-(j as f64) * alpha2, *value));
    }

    DiagonalPair {
        diagonal,
        sub_diagonal,
    }
}

/// Odd `degree >= 5`.
pub fn diagonal_step_odd(degree: usize, previous: &[XNumber]) -> DiagonalPair {
    assert!(
        degree >= 5 && degree % 2 == 1,
        "odd diagonal step requires an odd degree >= 5, got {degree}"
    );
    assert_eq!(
        previous.len(),
        coefficient_count(degree - 2),
        "diagonal of degree {} has the wrong length",
        degree - 2
    );

    let jx = (degree - 1) / 2;
    let gamma = gamma(degree);
    let gamma2 = 2.0 * gamma;
    let mut diagonal = vec![XNumber::ZERO; jx + 1];

    diagonal[0] = scaled_sum(3.0 * gamma, previous[0], -gamma, previous[1]);

    for j in 1..=jx - 2 {
        let partial = scaled_sum(-gamma, previous[j - 1], gamma2, previous[j]);
        diagonal[j] = scaled_sum(1.0, partial, -gamma, previous[j + 1]);
    }

    diagonal[jx - 1] = scaled_sum(-gamma, previous[jx - 2], gamma2, previous[jx - 1]);
    diagonal[jx] = scaled(-gamma, previous[jx - 1]);

    let alpha = (2.0 / degree as f64).sqrt();
    let sub_diagonal = diagonal
        .iter()
        .enumerate()
        .map(|(j, value)| scaled((2 * j + 1) as f64 * alpha, *value))
        .collect();

    DiagonalPair {
        diagonal,
        sub_diagonal,
    }
}

#[cfg(test)]
mod tests {
    use super::{diagonal_step, diagonal_step_even, diagonal_step_odd};
    use crate::numerics::legendre::{base_case_coefficients, coefficient_count};
    use crate::numerics::xnum::XNumber;

    fn lifted(degree: usize, order: usize) -> Vec<XNumber> {
        base_case_coefficients(degree, order)
            .expect("base case")
            .into_iter()
            .map(XNumber::from_native)
            .collect()
    }

    fn natives(values: &[XNumber]) -> Vec<f64> {
        values.iter().map(|value| value.to_native()).collect()
    }

    #[test]
    fn even_step_reproduces_known_degree_six_diagonal() {
        let pair = diagonal_step_even(6, &lifted(4, 4));
        assert_eq!(pair.diagonal.len(), coefficient_count(6));
        assert_eq!(pair.sub_diagonal.len(), coefficient_count(6));

        // Pbar_66 = (sqrt(6006) / 32) sin^6, expanded into cos(2j theta).
        let scale = 6006.0_f64.sqrt() / 32.0 / 32.0;
        let expected = [10.0 * scale, -15.0 * scale, 6.0 * scale, -scale];
        for (actual, expected) in natives(&pair.diagonal).iter().zip(expected) {
            assert!((actual - expected).abs() < 1.0e-14, "{actual} vs {expected}");
        }
        assert_eq!(pair.sub_diagonal[0], XNumber::ZERO);
    }

    #[test]
    fn odd_step_sub_diagonal_vanishes_at_pole() {
        // Pbar_54 carries sin^4, so its cosine series sums to zero at theta = 0.
        let pair = diagonal_step_odd(5, &lifted(3, 3));
        let sum: f64 = natives(&pair.sub_diagonal).iter().sum();
        assert!(sum.abs() < 1.0e-14, "sum={sum}");
    }

    #[test]
    fn dispatch_follows_degree_parity() {
        let previous = lifted(4, 4);
        assert_eq!(diagonal_step(6, &previous), diagonal_step_even(6, &previous));
        let previous = lifted(3, 3);
        assert_eq!(diagonal_step(5, &previous), diagonal_step_odd(5, &previous));
    }

    #[test]
    #[should_panic(expected = "wrong length")]
    fn mismatched_previous_length_is_a_contract_violation() {
        let _ = diagonal_step_even(8, &lifted(4, 4));
    }

    #[test]
    #[should_panic(expected = "odd degree >= 5")]
    fn wrong_parity_is_a_contract_violation() {
        let _ = diagonal_step_odd(6, &lifted(4, 4));
    }
}
