use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PnmjResult<T> = Result<T, PnmjError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PnmjErrorCategory {
    Success,
    InvalidArgument,
    IoSystemError,
    AllocationFailure,
    ComputationError,
    InternalError,
}

impl PnmjErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InvalidArgument => 2,
            Self::IoSystemError => 3,
            Self::AllocationFailure => 4,
            Self::ComputationError => 5,
            Self::InternalError => 6,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InvalidArgument => "InvalidArgument",
            Self::IoSystemError => "IoSystemError",
            Self::AllocationFailure => "AllocationFailure",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

impl Display for PnmjErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Category-carrying error shared by the library entry points and the CLI.
///
/// `placeholder` is a stable dotted code (`INPUT.PNMJ_DEGREE`, ...) that
/// scripts can match on independently of the human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PnmjError {
    category: PnmjErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl PnmjError {
    pub fn new(
        category: PnmjErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn invalid_argument(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PnmjErrorCategory::InvalidArgument, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PnmjErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn allocation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PnmjErrorCategory::AllocationFailure, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PnmjErrorCategory::ComputationError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PnmjErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> PnmjErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for PnmjError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for PnmjError {}
