pub mod config;
pub mod constants;

pub use config::{BuildConfig, ConfigError, load_build_config};
