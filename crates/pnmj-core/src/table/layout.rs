//! Offset arithmetic for the flat PNMJ buffer.
//!
//! Both orderings group coefficients by order first, so the slab belonging
//! to one order `m` starts at the same offset in either layout; only the
//! arrangement inside the slab differs.
//!
//! * MNJ: degrees `n = m..=N`, each followed by its `floor(n/2) + 1` indices.
//! * MJN: indices `j = 0..=floor(N/2)`, each followed by the degrees
//!   `n = max(m, 2j)..=N`.

use super::TableAccessError;
use crate::domain::PnmjOrdering;
use crate::numerics::legendre::coefficient_count;

/// Number of coefficients of a table built to `max_degree`, or `None` when
/// the count does not fit in `usize`.
///
/// Closed form of `sum_{n=0}^{N} (n + 1) (floor(n/2) + 1)`, split by degree
/// parity.
pub fn pnmj_length(max_degree: usize) -> Option<usize> {
    let big_n = max_degree as u128;

    // Even degrees n = 2q contribute (2q + 1)(q + 1).
    let qe = big_n / 2;
    let pairs = qe.checked_mul(qe + 1)?;
    let even = (pairs.checked_mul(2 * qe + 1)? / 3)
        .checked_add(pairs.checked_mul(3)? / 2)?
        .checked_add(qe + 1)?;

    // Odd degrees n = 2q + 1 contribute 2 (q + 1)^2.
    let odd = if big_n == 0 {
        0
    } else {
        let qo = (big_n - 1) / 2;
        (qo + 1).checked_mul(qo + 2)?.checked_mul(2 * qo + 3)? / 3
    };

    usize::try_from(even.checked_add(odd)?).ok()
}

/// Count of `(n, j)` pairs with `n < degree`.
const fn degree_prefix(degree: usize) -> usize {
    if degree == 0 {
        0
    } else {
        (degree - 1) * (degree - 1) / 4 + degree
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PnmjLayout {
    max_degree: usize,
    ordering: PnmjOrdering,
    order_starts: Vec<usize>,
}

impl PnmjLayout {
    /// Returns `None` if the table would not be addressable.
    pub fn new(max_degree: usize, ordering: PnmjOrdering) -> Option<Self> {
        let length = pnmj_length(max_degree)?;
        let bytes = length.checked_mul(std::mem::size_of::<f64>())?;
        isize::try_from(bytes).ok()?;

        let order_count = max_degree.checked_add(1)?;
        let full_prefix = degree_prefix(order_count);
        let mut order_starts = Vec::with_capacity(order_count + 1);
        let mut start = 0usize;
        order_starts.push(start);
        for order in 0..order_count {
            start += full_prefix - degree_prefix(order);
            order_starts.push(start);
        }
        debug_assert_eq!(start, length);

        Some(Self {
            max_degree,
            ordering,
            order_starts,
        })
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn ordering(&self) -> PnmjOrdering {
        self.ordering
    }

    pub fn len(&self) -> usize {
        self.order_starts[self.order_starts.len() - 1]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Half-open buffer range holding every coefficient of orders
    /// `min..=max`.
    pub fn order_span(&self, min: usize, max: usize) -> std::ops::Range<usize> {
        assert!(min <= max && max <= self.max_degree, "order span out of range");
        self.order_starts[min]..self.order_starts[max + 1]
    }

    pub fn checked_offset(
        &self,
        order: usize,
        degree: usize,
        index: usize,
    ) -> Result<usize, TableAccessError> {
        if degree > self.max_degree {
            return Err(TableAccessError::DegreeOutOfRange {
                degree,
                capacity: self.max_degree,
            });
        }
        if order > degree {
            return Err(TableAccessError::OrderAboveDegree { order, degree });
        }
        if index >= coefficient_count(degree) {
            return Err(TableAccessError::IndexOutOfRange {
                index,
                degree,
                max_index: degree / 2,
            });
        }
        Ok(self.offset(order, degree, index))
    }

    /// Unchecked offset of `(m, n, j)`; callers guarantee
    /// `m <= n <= N` and `j <= n / 2`.
    pub fn offset(&self, order: usize, degree: usize, index: usize) -> usize {
        debug_assert!(order <= degree && degree <= self.max_degree);
        debug_assert!(index < coefficient_count(degree));

        let start = self.order_starts[order];
        match self.ordering {
            PnmjOrdering::Mnj => start + degree_prefix(degree) - degree_prefix(order) + index,
            PnmjOrdering::Mjn => {
                start + self.index_prefix(order, index) + degree - order.max(2 * index)
            }
        }
    }

    /// Inside an MJN slab: count of entries with index `< index`, i.e.
    /// `sum_{i<index} (N + 1 - max(m, 2i))`.
    fn index_prefix(&self, order: usize, index: usize) -> usize {
        let below_order = index.min(order.div_ceil(2));
        let rows = index * (self.max_degree + 1);
        let clipped = below_order * order + index * index.saturating_sub(1)
            - below_order * below_order.saturating_sub(1);
        rows - clipped
    }
}

#[cfg(test)]
mod tests {
    use super::{PnmjLayout, degree_prefix, pnmj_length};
    use crate::domain::PnmjOrdering;
    use crate::table::TableAccessError;
    use std::collections::HashSet;

    fn brute_force_length(max_degree: usize) -> usize {
        let mut count = 0;
        for degree in 0..=max_degree {
            for _order in 0..=degree {
                for _index in 0..=degree / 2 {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn closed_form_length_matches_triple_count() {
        for max_degree in 0..60 {
            assert_eq!(
                pnmj_length(max_degree),
                Some(brute_force_length(max_degree)),
                "N={max_degree}"
            );
        }
        assert_eq!(pnmj_length(0), Some(1));
        assert_eq!(pnmj_length(2), Some(1 + 2 + 6));
    }

    #[test]
    fn closed_form_length_reports_overflow() {
        assert_eq!(pnmj_length(usize::MAX), None);
        assert!(PnmjLayout::new(usize::MAX / 2, PnmjOrdering::Mnj).is_none());
    }

    #[test]
    fn degree_prefix_counts_index_pairs() {
        let mut expected = 0;
        for degree in 0..40 {
            assert_eq!(degree_prefix(degree), expected, "degree={degree}");
            expected += degree / 2 + 1;
        }
    }

    #[test]
    fn offsets_are_a_bijection_for_both_orderings() {
        for ordering in PnmjOrdering::all() {
            for max_degree in [0, 1, 2, 5, 8, 13] {
                let layout = PnmjLayout::new(max_degree, ordering).expect("layout");
                let mut seen = HashSet::new();
                for order in 0..=max_degree {
                    for degree in order..=max_degree {
                        for index in 0..=degree / 2 {
                            let offset = layout.offset(order, degree, index);
                            assert!(offset < layout.len(), "{ordering} offset out of range");
                            assert!(
                                seen.insert(offset),
                                "{ordering} N={max_degree} duplicate offset for m={order} n={degree} j={index}"
                            );
                        }
                    }
                }
                assert_eq!(seen.len(), layout.len());
                assert_eq!(layout.len(), brute_force_length(max_degree));
            }
        }
    }

    #[test]
    fn mnj_layout_walks_degrees_then_indices() {
        let layout = PnmjLayout::new(4, PnmjOrdering::Mnj).expect("layout");
        let mut expected = 0;
        for order in 0..=4 {
            for degree in order..=4 {
                for index in 0..=degree / 2 {
                    assert_eq!(layout.offset(order, degree, index), expected);
                    expected += 1;
                }
            }
        }
    }

    #[test]
    fn mjn_layout_walks_indices_then_degrees() {
        let max_degree = 7;
        let layout = PnmjLayout::new(max_degree, PnmjOrdering::Mjn).expect("layout");
        let mut expected = 0;
        for order in 0..=max_degree {
            for index in 0..=max_degree / 2 {
                for degree in order.max(2 * index)..=max_degree {
                    assert_eq!(layout.offset(order, degree, index), expected);
                    expected += 1;
                }
            }
        }
    }

    #[test]
    fn order_spans_are_shared_between_orderings() {
        let mnj = PnmjLayout::new(9, PnmjOrdering::Mnj).expect("layout");
        let mjn = PnmjLayout::new(9, PnmjOrdering::Mjn).expect("layout");
        for order in 0..=9 {
            assert_eq!(mnj.order_span(order, order), mjn.order_span(order, order));
        }
        assert_eq!(mnj.order_span(0, 9), 0..mnj.len());
    }

    #[test]
    fn checked_offset_rejects_out_of_range_triples() {
        let layout = PnmjLayout::new(6, PnmjOrdering::Mnj).expect("layout");
        assert_eq!(
            layout.checked_offset(0, 7, 0),
            Err(TableAccessError::DegreeOutOfRange {
                degree: 7,
                capacity: 6
            })
        );
        assert_eq!(
            layout.checked_offset(4, 3, 0),
            Err(TableAccessError::OrderAboveDegree {
                order: 4,
                degree: 3
            })
        );
        assert_eq!(
            layout.checked_offset(1, 5, 3),
            Err(TableAccessError::IndexOutOfRange {
                index: 3,
                degree: 5,
                max_index: 2
            })
        );
        assert_eq!(layout.checked_offset(0, 0, 0), Ok(0));
    }
}
