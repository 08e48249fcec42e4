use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigSchemaError
///

#[derive(Debug, ThisError)]
pub enum ConfigSchemaError {
    #[error("{field} must be greater than zero")]
    MustBePositive { field: &'static str },

    #[error("{field} is {value}, must be at most {max}")]
    AboveMaximum {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("api_base must start with '/' and must not end with '/'")]
    MalformedApiBase,
}

///
/// Validate
///

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigSchemaError>;
}

///
/// ConfigModel
///
/// Tuning knobs for the sync core. Every field has a default matching the
/// observed dashboard behavior, so an empty TOML document is a valid config.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigModel {
    /// Path prefix every endpoint hangs off.
    pub api_base: String,

    /// Cadence of the recurring refetch cycle for polling views.
    pub poll_interval_secs: u64,

    /// Window requested from the network-stats endpoint by the overview cycle.
    pub overview_network_hours: u32,

    /// Window requested by the dedicated network page (7 days).
    pub network_page_hours: u32,

    /// Page size for the filterable resources list.
    pub resources_per_page: u32,

    /// Page size for the single-shot transaction/intent/block feeds.
    pub feed_per_page: u32,
}

impl Default for ConfigModel {
    fn default() -> Self {
        Self {
            api_base: "/api/analytics".to_string(),
            poll_interval_secs: 30,
            overview_network_hours: 24,
            network_page_hours: 168,
            resources_per_page: 20,
            feed_per_page: 50,
        }
    }
}

/// Upper bound on any requested network-stats window (30 days).
const MAX_NETWORK_HOURS: u32 = 720;

impl Validate for ConfigModel {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if !self.api_base.starts_with('/') || self.api_base.ends_with('/') {
            return Err(ConfigSchemaError::MalformedApiBase);
        }

        for (field, value) in [
            ("poll_interval_secs", self.poll_interval_secs),
            ("overview_network_hours", u64::from(self.overview_network_hours)),
            ("network_page_hours", u64::from(self.network_page_hours)),
            ("resources_per_page", u64::from(self.resources_per_page)),
            ("feed_per_page", u64::from(self.feed_per_page)),
        ] {
            if value == 0 {
                return Err(ConfigSchemaError::MustBePositive { field });
            }
        }

        for (field, value) in [
            ("overview_network_hours", self.overview_network_hours),
            ("network_page_hours", self.network_page_hours),
        ] {
            if value > MAX_NETWORK_HOURS {
                return Err(ConfigSchemaError::AboveMaximum {
                    field,
                    value: u64::from(value),
                    max: u64::from(MAX_NETWORK_HOURS),
                });
            }
        }

        Ok(())
    }
}

///
/// TESTS
///
