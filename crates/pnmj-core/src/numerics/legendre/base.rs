use super::{LegendreError, coefficient_count};

/// Highest degree covered by the closed-form coefficients.
pub const MAX_BASE_DEGREE: usize = 4;

/// Closed-form Fourier coefficients `P_nmj` for `n <= 4`.
///
/// Fukushima (2018), Table 1.
pub fn base_case_coefficients(degree: usize, order: usize) -> Result<Vec<f64>, LegendreError> {
    if degree > MAX_BASE_DEGREE {
        return Err(LegendreError::DegreeAboveBaseCase { degree });
    }
    if order > degree {
        return Err(LegendreError::OrderAboveDegree { degree, order });
    }

    let coefficients = match (degree, order) {
        (0, _) => vec![1.0],
        (1, _) => vec![3.0_f64.sqrt()],
        (2, 0) => {
            let scale = 5.0_f64.sqrt() / 4.0;
            vec![scale, 3.0 * scale]
        }
        (2, 1) => vec![0.0, 15.0_f64.sqrt() / 2.0],
        (2, _) => {
            let scale = 15.0_f64.sqrt() / 4.0;
            vec![scale, -scale]
        }
        (3, 0) => {
            let scale = 7.0_f64.sqrt() / 8.0;
            vec![3.0 * scale, 5.0 * scale]
        }
        (3, 1) => {
            let scale = 42.0_f64.sqrt() / 16.0;
            vec![scale, 5.0 * scale]
        }
        (3, 2) => {
            let scale = 105.0_f64.sqrt() / 8.0;
            vec![scale, -scale]
        }
        (3, _) => {
            let scale = 70.0_f64.sqrt() / 16.0;
            vec![3.0 * scale, -scale]
        }
        (_, 0) => vec![27.0 / 64.0, 15.0 / 16.0, 105.0 / 64.0],
        (_, 1) => {
            let root = 10.0_f64.sqrt();
            vec![0.0, 3.0 * root / 16.0, 21.0 * root / 32.0]
        }
        (_, 2) => {
            let root = 5.0_f64.sqrt();
            vec![9.0 * root / 32.0, 3.0 * root / 8.0, -21.0 * root / 32.0]
        }
        (_, 3) => {
            let scale = 3.0 * 70.0_f64.sqrt();
            vec![0.0, scale / 16.0, -scale / 32.0]
        }
        _ => {
            let root = 35.0_f64.sqrt();
            vec![9.0 * root / 64.0, -3.0 * root / 16.0, 3.0 * root / 64.0]
        }
    };

    debug_assert_eq!(coefficients.len(), coefficient_count(degree));
    Ok(coefficients)
}

#[cfg(test)]
mod tests {
    use super::{MAX_BASE_DEGREE, base_case_coefficients};
    use crate::numerics::legendre::{LegendreError, coefficient_count};

    #[test]
    fn base_cases_cover_every_order_with_expected_length() {
        for degree in 0..=MAX_BASE_DEGREE {
            for order in 0..=degree {
                let coefficients = base_case_coefficients(degree, order).expect("valid pair");
                assert_eq!(coefficients.len(), coefficient_count(degree));
                assert_eq!(coefficients.len(), degree / 2 + 1);
            }
        }
    }

    #[test]
    fn low_degree_values_match_closed_forms() {
        assert_eq!(base_case_coefficients(0, 0).unwrap(), vec![1.0]);
        assert_eq!(base_case_coefficients(1, 0).unwrap(), vec![3.0_f64.sqrt()]);
        assert_eq!(base_case_coefficients(1, 1).unwrap(), vec![3.0_f64.sqrt()]);

        let p20 = base_case_coefficients(2, 0).unwrap();
        assert!((p20[0] - 0.559_016_994_374_947_4).abs() < 1.0e-15);
        assert!((p20[1] - 1.677_050_983_124_842_3).abs() < 1.0e-15);
    }

    #[test]
    fn even_degree_coefficients_reproduce_unit_value_at_pole() {
        // At colatitude zero the cosine series of Pbar_n0 sums to sqrt(2n + 1).
        for degree in 0..=MAX_BASE_DEGREE {
            let sum: f64 = base_case_coefficients(degree, 0).unwrap().iter().sum();
            let expected = ((2 * degree + 1) as f64).sqrt();
            assert!(
                (sum - expected).abs() < 1.0e-14,
                "n={degree} sum={sum} expected={expected}"
            );
        }
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        assert_eq!(
            base_case_coefficients(5, 0),
            Err(LegendreError::DegreeAboveBaseCase { degree: 5 })
        );
        assert_eq!(
            base_case_coefficients(3, 4),
            Err(LegendreError::OrderAboveDegree {
                degree: 3,
                order: 4
            })
        );
    }
}
