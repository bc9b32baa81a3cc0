//! Configuration management for median
//!
//! Layered configuration loading with support for:
//! - TOML configuration files
//! - `MEDIAN_*` environment variable overrides
//! - The conventional `DATABASE_URL` and `PORT` variables
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml`
//! 2. `{environment}.toml`
//! 3. `local.toml` (not committed to version control)
//! 4. `MEDIAN_*` environment variables
//! 5. `DATABASE_URL` / `PORT`
//! 6. CLI flags (applied by [`crate::cli::ConfigurationMerger`])

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, LoggerSettings, ServerConfig, Settings};
