//! Descending order recursion at fixed degree (Fukushima 2018, Table 6):
//! `P_{n,m,j}` from `P_{n,m+1,j}` and `P_{n,m+2,j}`.

use super::{LegendreError, coefficient_count};
use crate::numerics::xnum::{XNumber, renormalize, scaled_sum};

#[derive(Debug, Clone, Copy, PartialEq)]
struct OrderWeights {
    u: f64,
    beta: f64,
}

impl OrderWeights {
    fn new(degree: usize, order: usize) -> Self {
        let n = degree as f64;
        let m = order as f64;
        let u = if order == 0 {
            (0.5 / (n * (n + 1.0))).sqrt()
        } else {
            (1.0 / ((n - m) * (n + m + 1.0))).sqrt()
        };
        let beta = ((n - m - 1.0) * (n + m + 2.0)).sqrt() * u;
        Self { u, beta }
    }
}

fn validate(degree: usize, order: usize, even: bool) -> Result<(), LegendreError> {
    if (degree % 2 == 0) != even {
        return Err(LegendreError::ParityMismatch {
            degree,
            expected: if even { "even" } else { "odd" },
        });
    }
    if order > degree {
        return Err(LegendreError::OrderAboveDegree { degree, order });
    }
    if degree < 2 || order > degree - 2 {
        return Err(LegendreError::OrderAboveRecursionLimit { degree, order });
    }
    Ok(())
}

fn check_lengths(degree: usize, one_back: &[XNumber], two_back: &[XNumber]) {
    let expected = coefficient_count(degree);
    assert_eq!(one_back.len(), expected, "order m + 1 vector has the wrong length");
    assert_eq!(two_back.len(), expected, "order m + 2 vector has the wrong length");
}

/// Dispatches to the even or odd variant by the parity of `degree`.
pub fn order_step(
    degree: usize,
    order: usize,
    one_back: &[XNumber],
    two_back: &[XNumber],
) -> Result<Vec<XNumber>, LegendreError> {
    if degree % 2 == 0 {
        order_step_even(degree, order, one_back, two_back)
    } else {
        order_step_odd(degree, order, one_back, two_back)
    }
}

/// `one_back` holds order `m + 1`, `two_back` holds order `m + 2`.
pub fn order_step_even(
    degree: usize,
    order: usize,
    one_back: &[XNumber],
    two_back: &[XNumber],
) -> Result<Vec<XNumber>, LegendreError> {
    validate(degree, order, true)?;
    check_lengths(degree, one_back, two_back);

    let OrderWeights { u, beta } = OrderWeights::new(degree, order);
    let alpha2 = if order % 2 == 0 { 4.0 * u } else { -4.0 * u };

    let mut current = Vec::with_capacity(one_back.len());
    // j = 0 only carries the m + 2 term (Eq. 75).
    current.push(renormalize(XNumber::new(
        beta * two_back[0].significand,
        two_back[0].exponent,
    )));
    for j in 1..one_back.len() {
        current.push(scaled_sum(
            j as f64 * alpha2,
            one_back[j],
            beta,
            two_back[j],
        ));
    }

    Ok(current)
}

/// `one_back` holds order `m + 1`, `two_back` holds order `m + 2`.
pub fn order_step_odd(
    degree: usize,
    order: usize,
    one_back: &[XNumber],
    two_back: &[XNumber],
) -> Result<Vec<XNumber>, LegendreError> {
    validate(degree, order, false)?;
    check_lengths(degree, one_back, two_back);

    let OrderWeights { u, beta } = OrderWeights::new(degree, order);
    let alpha = if order % 2 == 0 { 2.0 * u } else { -2.0 * u };

    Ok(one_back
        .iter()
        .zip(two_back)
        .enumerate()
        .map(|(j, (p1, p2))| scaled_sum((2 * j + 1) as f64 * alpha, *p1, beta, *p2))
        .collect())
}
