pub mod errors;

pub use errors::{PnmjError, PnmjErrorCategory, PnmjResult};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Memory ordering of the coefficients of a [`crate::table::PnmjTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PnmjOrdering {
    /// Order `m`, then degree `n`, then index `j`.
    #[default]
    Mnj,
    /// Order `m`, then index `j`, then degree `n`.
    Mjn,
}

impl PnmjOrdering {
    pub const MNJ_CODE: i32 = 0;
    pub const MJN_CODE: i32 = 1;

    pub const fn all() -> [Self; 2] {
        [Self::Mnj, Self::Mjn]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mnj => "MNJ",
            Self::Mjn => "MJN",
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            Self::Mnj => Self::MNJ_CODE,
            Self::Mjn => Self::MJN_CODE,
        }
    }

    /// Maps a numeric ordering tag onto a supported ordering.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::MNJ_CODE => Some(Self::Mnj),
            Self::MJN_CODE => Some(Self::Mjn),
            _ => None,
        }
    }
}

impl Display for PnmjOrdering {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported PNMJ ordering '{0}'; expected one of 'mnj', 'mjn'")]
pub struct UnsupportedOrderingName(pub String);

impl FromStr for PnmjOrdering {
    type Err = UnsupportedOrderingName;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        if normalized.eq_ignore_ascii_case("mnj") {
            Ok(Self::Mnj)
        } else if normalized.eq_ignore_ascii_case("mjn") {
            Ok(Self::Mjn)
        } else {
            Err(UnsupportedOrderingName(value.to_string()))
        }
    }
}

impl From<UnsupportedOrderingName> for PnmjError {
    fn from(error: UnsupportedOrderingName) -> Self {
        PnmjError::invalid_argument("INPUT.PNMJ_ORDERING", error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::PnmjOrdering;

    #[test]
    fn ordering_codes_round_trip_and_reject_unknown_tags() {
        for ordering in PnmjOrdering::all() {
            assert_eq!(PnmjOrdering::from_code(ordering.code()), Some(ordering));
        }
        assert_eq!(PnmjOrdering::from_code(9999), None);
        assert_eq!(PnmjOrdering::from_code(-1), None);
    }

    #[test]
    fn ordering_parses_case_insensitive_names() {
        assert_eq!("mnj".parse::<PnmjOrdering>(), Ok(PnmjOrdering::Mnj));
        assert_eq!(" MJN ".parse::<PnmjOrdering>(), Ok(PnmjOrdering::Mjn));
        let error = "nmj".parse::<PnmjOrdering>().expect_err("nmj is not supported");
        assert!(error.to_string().contains("'nmj'"));
    }

    #[test]
    fn ordering_serializes_as_lowercase_tag() {
        let encoded = serde_json::to_string(&PnmjOrdering::Mjn).expect("serialize");
        assert_eq!(encoded, "\"mjn\"");
        let decoded: PnmjOrdering = serde_json::from_str("\"mnj\"").expect("deserialize");
        assert_eq!(decoded, PnmjOrdering::Mnj);
        assert_eq!(PnmjOrdering::Mjn.to_string(), "MJN");
    }
}
