//! Flat storage for the Fourier coefficients `P_nmj` of every
//! `0 <= m <= n <= N`.

pub mod build;
pub mod eval;
pub mod layout;

pub use build::{
    BuildSummary, OrderWindow, PnmjBuildInput, PnmjBuilder, PnmjBuilderApi, build_orders,
    build_table, coefficient_row,
};
pub use eval::{
    VerificationReport, VerificationSample, harmonic_from_series, legendre_from_coefficients,
    legendre_from_series, spherical_harmonic, verify_against_direct,
};
pub use layout::{PnmjLayout, pnmj_length};

use crate::domain::{PnmjError, PnmjOrdering};
use crate::numerics::legendre::{LegendreError, coefficient_count};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("unsupported PNMJ ordering code {code}; expected 0 (MNJ) or 1 (MJN)")]
    UnsupportedOrdering { code: i32 },
    #[error("requested degree {max_degree} exceeds table capacity {capacity}")]
    DegreeExceedsCapacity { max_degree: usize, capacity: usize },
    #[error("order window {min}..={max} is not inside 0..={max_degree}")]
    OrderWindowOutOfRange {
        min: usize,
        max: usize,
        max_degree: usize,
    },
    #[error("cannot allocate PNMJ table of degree {max_degree}: {reason}")]
    AllocationFailure { max_degree: usize, reason: String },
    #[error(
        "coefficient (m={order}, n={degree}, j={index}) left the representable range with exponent {exponent}"
    )]
    ExponentOverflow {
        order: usize,
        degree: usize,
        index: usize,
        exponent: i32,
    },
    #[error("exported table holds {actual} coefficients, expected {expected}")]
    ExportLengthMismatch { expected: usize, actual: usize },
    #[error(transparent)]
    Legendre(#[from] LegendreError),
}

impl From<BuildError> for PnmjError {
    fn from(error: BuildError) -> Self {
        match error {
            BuildError::UnsupportedOrdering { .. } => {
                PnmjError::invalid_argument("INPUT.PNMJ_ORDERING", error.to_string())
            }
            BuildError::DegreeExceedsCapacity { .. } => {
                PnmjError::invalid_argument("INPUT.PNMJ_CAPACITY", error.to_string())
            }
            BuildError::OrderWindowOutOfRange { .. } => {
                PnmjError::invalid_argument("INPUT.PNMJ_ORDER_WINDOW", error.to_string())
            }
            BuildError::AllocationFailure { .. } => {
                PnmjError::allocation("SYSTEM.PNMJ_ALLOCATION", error.to_string())
            }
            BuildError::ExponentOverflow { .. } => {
                PnmjError::computation("RUN.PNMJ_EXPONENT_OVERFLOW", error.to_string())
            }
            BuildError::ExportLengthMismatch { .. } => {
                PnmjError::invalid_argument("INPUT.PNMJ_EXPORT", error.to_string())
            }
            BuildError::Legendre(source) => source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableAccessError {
    #[error("degree {degree} is outside the table capacity {capacity}")]
    DegreeOutOfRange { degree: usize, capacity: usize },
    #[error("order {order} cannot be larger than degree {degree}")]
    OrderAboveDegree { order: usize, degree: usize },
    #[error("index {index} is outside 0..={max_index} for degree {degree}")]
    IndexOutOfRange {
        index: usize,
        degree: usize,
        max_index: usize,
    },
}

impl From<TableAccessError> for PnmjError {
    fn from(error: TableAccessError) -> Self {
        let placeholder = match error {
            TableAccessError::DegreeOutOfRange { .. } => "INPUT.PNMJ_DEGREE",
            TableAccessError::OrderAboveDegree { .. } => "INPUT.PNMJ_ORDER",
            TableAccessError::IndexOutOfRange { .. } => "INPUT.PNMJ_INDEX",
        };
        PnmjError::invalid_argument(placeholder, error.to_string())
    }
}

/// Coefficient table sized for a fixed maximum degree.
///
/// A table is always zero-initialized, so coefficients that no build has
/// written read back as `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PnmjTable {
    layout: PnmjLayout,
    coefficients: Vec<f64>,
    built_degree: Option<usize>,
    last_build: Option<BuildSummary>,
}

impl PnmjTable {
    pub fn new(max_degree: usize, ordering: PnmjOrdering) -> Result<Self, BuildError> {
        let layout =
            PnmjLayout::new(max_degree, ordering).ok_or_else(|| BuildError::AllocationFailure {
                max_degree,
                reason: "coefficient count overflows the address space".to_string(),
            })?;

        let length = layout.len();
        let mut coefficients = Vec::new();
        coefficients
            .try_reserve_exact(length)
            .map_err(|source| BuildError::AllocationFailure {
                max_degree,
                reason: source.to_string(),
            })?;
        coefficients.resize(length, 0.0);

        Ok(Self {
            layout,
            coefficients,
            built_degree: None,
            last_build: None,
        })
    }

    pub fn layout(&self) -> &PnmjLayout {
        &self.layout
    }

    /// Largest degree this table can hold.
    pub fn capacity(&self) -> usize {
        self.layout.max_degree()
    }

    pub fn ordering(&self) -> PnmjOrdering {
        self.layout.ordering()
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.coefficients
    }

    /// Summary of the most recent successful build, if any. Tables restored
    /// with [`PnmjTable::from_export`] carry no summary.
    pub fn last_build(&self) -> Option<&BuildSummary> {
        self.last_build.as_ref()
    }

    /// Degree of the most recent successful build, kept across export.
    pub fn built_degree(&self) -> Option<usize> {
        self.built_degree
    }

    pub fn get(&self, order: usize, degree: usize, index: usize) -> Result<f64, TableAccessError> {
        let offset = self.layout.checked_offset(order, degree, index)?;
        Ok(self.coefficients[offset])
    }

    /// All `floor(n/2) + 1` coefficients of `(n, m)` in ascending `j`.
    pub fn coefficients(&self, order: usize, degree: usize) -> Result<Vec<f64>, TableAccessError> {
        self.layout.checked_offset(order, degree, 0)?;
        Ok((0..coefficient_count(degree))
            .map(|index| self.coefficients[self.layout.offset(order, degree, index)])
            .collect())
    }

    pub fn export(&self) -> TableExport {
        TableExport {
            max_degree: self.capacity(),
            ordering: self.ordering(),
            built_degree: self.built_degree,
            length: self.len(),
            coefficients: self.coefficients.clone(),
        }
    }

    pub fn from_export(export: TableExport) -> Result<Self, BuildError> {
        let mut table = Self::new(export.max_degree, export.ordering)?;
        for actual in [export.length, export.coefficients.len()] {
            if actual != table.len() {
                return Err(BuildError::ExportLengthMismatch {
                    expected: table.len(),
                    actual,
                });
            }
        }
        if let Some(built_degree) = export
            .built_degree
            .filter(|degree| *degree > table.capacity())
        {
            return Err(BuildError::DegreeExceedsCapacity {
                max_degree: built_degree,
                capacity: table.capacity(),
            });
        }
        table.coefficients = export.coefficients;
        table.built_degree = export.built_degree;
        Ok(table)
    }

    pub(crate) fn set(&mut self, order: usize, degree: usize, index: usize, value: f64) {
        let offset = self.layout.offset(order, degree, index);
        self.coefficients[offset] = value;
    }

    pub(crate) fn clear_orders(&mut self, window: OrderWindow) {
        let span = self.layout.order_span(window.min, window.max);
        self.coefficients[span].fill(0.0);
    }

    /// Drops the previous build's metadata before its coefficients are
    /// overwritten.
    pub(crate) fn forget_build(&mut self) {
        self.built_degree = None;
        self.last_build = None;
    }

    pub(crate) fn record_build(&mut self, summary: BuildSummary) {
        self.built_degree = Some(summary.max_degree);
        self.last_build = Some(summary);
    }
}

/// Allocates a zeroed table able to hold every degree up to `max_degree`.
pub fn allocate_table(max_degree: usize, ordering: PnmjOrdering) -> Result<PnmjTable, BuildError> {
    PnmjTable::new(max_degree, ordering)
}

/// Like [`allocate_table`], taking the numeric ordering tag (0 = MNJ,
/// 1 = MJN).
pub fn allocate_table_with_code(max_degree: usize, code: i32) -> Result<PnmjTable, BuildError> {
    let ordering =
        PnmjOrdering::from_code(code).ok_or(BuildError::UnsupportedOrdering { code })?;
    PnmjTable::new(max_degree, ordering)
}

/// Serialized form of a [`PnmjTable`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableExport {
    pub max_degree: usize,
    pub ordering: PnmjOrdering,
    pub built_degree: Option<usize>,
    pub length: usize,
    pub coefficients: Vec<f64>,
}
