pub mod schema;

use schema::{ConfigSchemaError, Validate};
use std::{cell::RefCell, sync::Arc};
use thiserror::Error as ThisError;

pub use schema::ConfigModel;

//
// CONFIG
//
// The core executes single-threaded, but the config handle is an Arc so it
// crosses the async seams (timer tasks, fetch futures) without lifetime
// gymnastics, and so host-side tools that are multi-threaded can hold it too.
//

thread_local! {
    static CONFIG: RefCell<Option<Arc<ConfigModel>>> = const { RefCell::new(None) };
}

/// Errors related to configuration lifecycle and parsing.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("config has already been initialized")]
    AlreadyInitialized,

    #[error("config has not been initialized")]
    NotInitialized,

    /// TOML could not be parsed into the expected structure.
    #[error("toml error: {0}")]
    CannotParseToml(String),

    /// Wrapper for schema-level validation errors.
    #[error(transparent)]
    ConfigSchema(#[from] ConfigSchemaError),
}

///
/// Config
///

pub struct Config {}

impl Config {
    pub fn get() -> Result<Arc<ConfigModel>, ConfigError> {
        CONFIG.with(|cfg| {
            if let Some(config) = cfg.borrow().as_ref() {
                return Ok(config.clone());
            }

            #[cfg(test)]
            {
                Ok(Self::init_for_tests())
            }

            #[cfg(not(test))]
            {
                Err(ConfigError::NotInitialized)
            }
        })
    }

    /// Initialize the global configuration from a TOML string.
    pub fn init_from_toml(config_str: &str) -> Result<(), ConfigError> {
        let config: ConfigModel =
            toml::from_str(config_str).map_err(|e| ConfigError::CannotParseToml(e.to_string()))?;

        // validate
        config.validate().map_err(ConfigError::from)?;

        CONFIG.with(|cfg| {
            let mut borrow = cfg.borrow_mut();
            if borrow.is_some() {
                return Err(ConfigError::AlreadyInitialized);
            }
            let arc = Arc::new(config);
            *borrow = Some(arc);

            Ok(())
        })
    }

    /// Initialize with built-in defaults when no TOML is provided.
    pub fn init_default() -> Result<(), ConfigError> {
        CONFIG.with(|cfg| {
            let mut borrow = cfg.borrow_mut();
            if borrow.is_some() {
                return Err(ConfigError::AlreadyInitialized);
            }

            let config = ConfigModel::default();
            config.validate().map_err(ConfigError::from)?;
            *borrow = Some(Arc::new(config));

            Ok(())
        })
    }

    /// Test-only: reset the global config so tests can reinitialize.
    #[cfg(test)]
    pub fn reset_for_tests() {
        CONFIG.with(|cfg| {
            *cfg.borrow_mut() = None;
        });
    }

    /// Test-only: ensure a validated default config is available.
    #[cfg(test)]
    #[must_use]
    pub fn init_for_tests() -> Arc<ConfigModel> {
        CONFIG.with(|cfg| {
            let mut borrow = cfg.borrow_mut();
            if let Some(existing) = borrow.as_ref() {
                return existing.clone();
            }

            let config = ConfigModel::default();
            config.validate().expect("default config must validate");

            let arc = Arc::new(config);
            *borrow = Some(arc.clone());
            arc
        })
    }
}

///
/// TESTS
///
