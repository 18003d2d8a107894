//! Table build driver.
//!
//! Degrees `n <= 4` come from closed forms. Above that, each parity class is
//! advanced independently: the diagonal of degree `n - 2` yields the
//! diagonal and sub-diagonal of degree `n`, and the order recursion then
//! descends from `m = n - 2` towards the lowest requested order. All
//! intermediate vectors are X-numbers; values are converted to native floats
//! only when stored.

use super::{BuildError, PnmjTable};
use crate::numerics::legendre::{
    DiagonalPair, LegendreError, MAX_BASE_DEGREE, base_case_coefficients, diagonal_step,
    order_step,
};
use crate::numerics::xnum::XNumber;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, debug_span, info, trace};

/// Inclusive range of orders a build writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrderWindow {
    pub min: usize,
    pub max: usize,
}

impl OrderWindow {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub const fn full(max_degree: usize) -> Self {
        Self::new(0, max_degree)
    }

    pub const fn contains(self, order: usize) -> bool {
        self.min <= order && order <= self.max
    }
}

impl From<RangeInclusive<usize>> for OrderWindow {
    fn from(range: RangeInclusive<usize>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PnmjBuildInput {
    pub max_degree: usize,
    pub orders: OrderWindow,
}

impl PnmjBuildInput {
    pub const fn new(max_degree: usize) -> Self {
        Self {
            max_degree,
            orders: OrderWindow::full(max_degree),
        }
    }

    pub const fn with_orders(self, orders: OrderWindow) -> Self {
        Self { orders, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSummary {
    pub max_degree: usize,
    pub orders: OrderWindow,
    pub elements_written: usize,
    /// Extremes of the X-number exponents of every non-zero stored value.
    pub min_exponent: Option<i32>,
    pub max_exponent: Option<i32>,
    /// Non-zero coefficients that became `0.0` on conversion.
    pub underflow_count: usize,
}

pub trait PnmjBuilderApi {
    fn build(
        &self,
        table: &mut PnmjTable,
        input: PnmjBuildInput,
    ) -> Result<BuildSummary, BuildError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PnmjBuilder;

impl PnmjBuilderApi for PnmjBuilder {
    fn build(
        &self,
        table: &mut PnmjTable,
        input: PnmjBuildInput,
    ) -> Result<BuildSummary, BuildError> {
        validate_input(table, &input)?;

        let span = debug_span!(
            "pnmj_build",
            max_degree = input.max_degree,
            ordering = %table.ordering(),
            orders = ?input.orders
        );
        let _entered = span.enter();

        let summary = rewrite_orders(table, input, |writer| {
            write_base_cases(writer, input.max_degree)?;
            // Even chain seeds from P_44, odd chain from P_33.
            for first_degree in [MAX_BASE_DEGREE + 2, MAX_BASE_DEGREE + 1] {
                advance_parity_chain(writer, first_degree, input.max_degree)?;
            }
            Ok(())
        })?;

        info!(
            elements = summary.elements_written,
            min_exponent = ?summary.min_exponent,
            max_exponent = ?summary.max_exponent,
            underflows = summary.underflow_count,
            "PNMJ table built"
        );
        Ok(summary)
    }
}

/// Clears the window, runs `fill`, and records the summary only on success.
/// A failed build leaves the table without build metadata.
fn rewrite_orders(
    table: &mut PnmjTable,
    input: PnmjBuildInput,
    fill: impl FnOnce(&mut CoefficientWriter<'_>) -> Result<(), BuildError>,
) -> Result<BuildSummary, BuildError> {
    table.forget_build();
    table.clear_orders(input.orders);

    let mut writer = CoefficientWriter::new(table, input.orders);
    fill(&mut writer)?;
    let summary = writer.finish(input);
    table.record_build(summary);
    Ok(summary)
}

/// Fills `table` with every coefficient of degrees `0..=max_degree`.
pub fn build_table(table: &mut PnmjTable, max_degree: usize) -> Result<BuildSummary, BuildError> {
    PnmjBuilder.build(table, PnmjBuildInput::new(max_degree))
}

/// Fills only the orders in `orders`; coefficients of other orders are left
/// untouched.
pub fn build_orders(
    table: &mut PnmjTable,
    max_degree: usize,
    orders: RangeInclusive<usize>,
) -> Result<BuildSummary, BuildError> {
    PnmjBuilder.build(
        table,
        PnmjBuildInput::new(max_degree).with_orders(orders.into()),
    )
}

/// Coefficients `P_nmj` of a single `(n, m)` pair, ascending in `j`.
///
/// Runs only the parity chain of `degree` and descends to `order`, keeping
/// a handful of vectors alive instead of a whole table.
pub fn coefficient_row(degree: usize, order: usize) -> Result<Vec<f64>, BuildError> {
    if order > degree {
        return Err(LegendreError::OrderAboveDegree { degree, order }.into());
    }
    if degree <= MAX_BASE_DEGREE {
        return Ok(base_case_coefficients(degree, order)?);
    }

    let first_degree = if degree % 2 == 0 {
        MAX_BASE_DEGREE + 2
    } else {
        MAX_BASE_DEGREE + 1
    };
    let seed_degree = first_degree - 2;
    let mut diagonal = lift(base_case_coefficients(seed_degree, seed_degree)?);
    for step in (first_degree..degree).step_by(2) {
        diagonal = diagonal_step(step, &diagonal).diagonal;
    }

    let DiagonalPair {
        diagonal,
        sub_diagonal,
    } = diagonal_step(degree, &diagonal);
    let row = if order == degree {
        diagonal
    } else {
        let mut two_back = diagonal;
        let mut one_back = sub_diagonal;
        for current_order in (order..=degree - 2).rev() {
            let current = order_step(degree, current_order, &one_back, &two_back)?;
            two_back = std::mem::replace(&mut one_back, current);
        }
        one_back
    };

    row.iter()
        .enumerate()
        .map(|(index, value)| {
            if value.exponent > 1 {
                return Err(BuildError::ExponentOverflow {
                    order,
                    degree,
                    index,
                    exponent: value.exponent,
                });
            }
            Ok(value.to_native())
        })
        .collect()
}

fn validate_input(table: &PnmjTable, input: &PnmjBuildInput) -> Result<(), BuildError> {
    if input.max_degree > table.capacity() {
        return Err(BuildError::DegreeExceedsCapacity {
            max_degree: input.max_degree,
            capacity: table.capacity(),
        });
    }
    let OrderWindow { min, max } = input.orders;
    if min > max || max > input.max_degree {
        return Err(BuildError::OrderWindowOutOfRange {
            min,
            max,
            max_degree: input.max_degree,
        });
    }
    Ok(())
}

fn lift(values: Vec<f64>) -> Vec<XNumber> {
    values.into_iter().map(XNumber::from_native).collect()
}

fn write_base_cases(
    writer: &mut CoefficientWriter<'_>,
    max_degree: usize,
) -> Result<(), BuildError> {
    for degree in 0..=max_degree.min(MAX_BASE_DEGREE) {
        for order in 0..=degree {
            if writer.accepts(order) {
                let values = lift(base_case_coefficients(degree, order)?);
                writer.write(order, degree, &values)?;
            }
        }
    }
    Ok(())
}

fn advance_parity_chain(
    writer: &mut CoefficientWriter<'_>,
    first_degree: usize,
    max_degree: usize,
) -> Result<(), BuildError> {
    if first_degree > max_degree {
        return Ok(());
    }

    let seed_degree = first_degree - 2;
    let mut diagonal = lift(base_case_coefficients(seed_degree, seed_degree)?);
    let lowest_order = writer.orders.min;

    for degree in (first_degree..=max_degree).step_by(2) {
        let DiagonalPair {
            diagonal: next_diagonal,
            sub_diagonal,
        } = diagonal_step(degree, &diagonal);
        writer.write(degree, degree, &next_diagonal)?;
        writer.write(degree - 1, degree, &sub_diagonal)?;

        if lowest_order + 2 <= degree {
            let mut two_back = next_diagonal.clone();
            let mut one_back = sub_diagonal;
            for order in (lowest_order..=degree - 2).rev() {
                let current = order_step(degree, order, &one_back, &two_back)?;
                writer.write(order, degree, &current)?;
                two_back = std::mem::replace(&mut one_back, current);
            }
        }

        trace!(degree, "degree complete");
        diagonal = next_diagonal;
    }

    debug!(first_degree, max_degree, "parity chain complete");
    Ok(())
}

struct CoefficientWriter<'a> {
    table: &'a mut PnmjTable,
    orders: OrderWindow,
    elements_written: usize,
    min_exponent: Option<i32>,
    max_exponent: Option<i32>,
    underflow_count: usize,
}

impl<'a> CoefficientWriter<'a> {
    fn new(table: &'a mut PnmjTable, orders: OrderWindow) -> Self {
        Self {
            table,
            orders,
            elements_written: 0,
            min_exponent: None,
            max_exponent: None,
            underflow_count: 0,
        }
    }

    fn accepts(&self, order: usize) -> bool {
        self.orders.contains(order)
    }

    /// Stores `values` as `P_{degree,order,j}`; orders outside the window are
    /// skipped.
    fn write(
        &mut self,
        order: usize,
        degree: usize,
        values: &[XNumber],
    ) -> Result<(), BuildError> {
        if !self.accepts(order) {
            return Ok(());
        }

        for (index, value) in values.iter().enumerate() {
            if value.exponent > 1 {
                return Err(BuildError::ExponentOverflow {
                    order,
                    degree,
                    index,
                    exponent: value.exponent,
                });
            }

            let native = value.to_native();
            if value.significand != 0.0 {
                self.min_exponent = Some(
                    self.min_exponent
                        .map_or(value.exponent, |current| current.min(value.exponent)),
                );
                self.max_exponent = Some(
                    self.max_exponent
                        .map_or(value.exponent, |current| current.max(value.exponent)),
                );
                if native == 0.0 {
                    self.underflow_count += 1;
                }
            }

            self.table.set(order, degree, index, native);
        }
        self.elements_written += values.len();
        Ok(())
    }

    fn finish(self, input: PnmjBuildInput) -> BuildSummary {
        BuildSummary {
            max_degree: input.max_degree,
            orders: input.orders,
            elements_written: self.elements_written,
            min_exponent: self.min_exponent,
            max_exponent: self.max_exponent,
            underflow_count: self.underflow_count,
        }
    }
}
