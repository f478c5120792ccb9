//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `TALENT_SCREEN`
//! prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use talent_screen::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod generation;
mod interview;

pub use error::{ConfigError, ValidationError};
pub use generation::{GenerationConfig, Provider};
pub use interview::InterviewConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Fatal configuration errors are detected by [`AppConfig::validate()`]
/// before any conversation turn is processed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generation backend configuration (provider, model, credential)
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Interview shape (question bounds, company identity)
    #[serde(default)]
    pub interview: InterviewConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `TALENT_SCREEN` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `TALENT_SCREEN__GENERATION__API_KEY=sk-...` -> `generation.api_key`
    /// - `TALENT_SCREEN__INTERVIEW__MAX_QUESTIONS=5` -> `interview.max_questions`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TALENT_SCREEN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid:
    /// missing credential, zero or inverted question bounds, zero timeout.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.generation.validate()?;
        self.interview.validate()?;
        Ok(())
    }
}
