//! JSON build configuration.
//!
//! ```json
//! { "maxDegree": 360, "ordering": "mjn", "orders": { "min": 0, "max": 12 }, "capacity": 720 }
//! ```
//!
//! Only `maxDegree` is required. `capacity` defaults to `maxDegree` and
//! `orders` to the full window.

use crate::domain::{PnmjError, PnmjOrdering};
use crate::table::{OrderWindow, PnmjBuildInput};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildConfig {
    pub max_degree: usize,
    #[serde(default)]
    pub ordering: PnmjOrdering,
    #[serde(default)]
    pub orders: Option<OrderWindow>,
    #[serde(default)]
    pub capacity: Option<usize>,
}

impl BuildConfig {
    pub fn new(max_degree: usize, ordering: PnmjOrdering) -> Self {
        Self {
            max_degree,
            ordering,
            orders: None,
            capacity: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.unwrap_or(self.max_degree)
    }

    pub fn order_window(&self) -> OrderWindow {
        self.orders.unwrap_or_else(|| OrderWindow::full(self.max_degree))
    }

    pub fn build_input(&self) -> PnmjBuildInput {
        PnmjBuildInput::new(self.max_degree).with_orders(self.order_window())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity() < self.max_degree {
            return Err(ConfigError::Invalid {
                message: format!(
                    "capacity {} is smaller than maxDegree {}",
                    self.capacity(),
                    self.max_degree
                ),
            });
        }

        let window = self.order_window();
        if window.min > window.max || window.max > self.max_degree {
            return Err(ConfigError::Invalid {
                message: format!(
                    "orders {}..={} must satisfy min <= max <= maxDegree {}",
                    window.min, window.max, self.max_degree
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read build config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse build config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid build config: {message}")]
    Invalid { message: String },
}

impl From<ConfigError> for PnmjError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::Read { .. } => {
                PnmjError::io_system("IO.PNMJ_CONFIG_READ", error.to_string())
            }
            ConfigError::Parse { .. } => {
                PnmjError::invalid_argument("INPUT.PNMJ_CONFIG_PARSE", error.to_string())
            }
            ConfigError::Invalid { .. } => {
                PnmjError::invalid_argument("INPUT.PNMJ_CONFIG", error.to_string())
            }
        }
    }
}

pub fn load_build_config(config_path: impl AsRef<Path>) -> Result<BuildConfig, ConfigError> {
    let config_path = config_path.as_ref();
    let source = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    let config: BuildConfig =
        serde_json::from_str(&source).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}
