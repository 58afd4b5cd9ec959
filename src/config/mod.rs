//! Configuration management for sprout
//!
//! Handler settings are layered from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use sprout::config::Settings;
//!
//! let settings = Settings::load().expect("Failed to load configuration");
//! println!("Registries: {:?}", settings.registries);
//! ```
//!
//! # Environment Variables
//!
//! Settings can be overridden using environment variables with the pattern
//! `SPROUT__<key>`:
//! - `SPROUT__SAFE_FUNCTIONS=true`
//! - `SPROUT__REGISTRIES=std,strings`
//!
//! # Configuration File
//!
//! By default, settings are loaded from `config/sprout.toml`.
//! This can be overridden using the `SPROUT_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::Settings;
pub use sources::default_path;
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Settings {
    /// Load settings from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or validation fails
    /// (unknown registries, self-aliases, empty names).
    pub fn load() -> Result<Self, ConfigError> {
        let settings = sources::load()?;
        validation::validate(&settings)?;
        Ok(settings)
    }

    /// Load settings from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let settings = sources::load_from_sources(path)?;
        validation::validate(&settings)?;
        Ok(settings)
    }
}
