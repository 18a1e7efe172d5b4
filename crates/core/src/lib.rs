//! SurfsUp Core Library
//!
//! Shared utilities for the climate API:
//! - Configuration loading (XDG-compliant)
//! - File system checks for the dataset path

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::is_file;

/// Application name used for XDG paths
pub const APP_NAME: &str = "surfsup";

/// Default API port
pub const DEFAULT_PORT: u16 = 5000;

/// Default location of the climate dataset, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "./Resources/hawaii.sqlite";

/// Last date present in the bundled dataset
pub const DEFAULT_REFERENCE_DATE: &str = "2017-08-23";

/// Length of the "last year" window, in days
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// Station reported by the temperature observations route
pub const DEFAULT_STATION_ID: &str = "USC00519281";
