use core_config::{ConfigError, FromEnv, env_parse};
use std::time::Duration;

use crate::entity::NullPolicy;
use crate::handlers::{HandlerOptions, ListShape};
use crate::service::DEFAULT_STORAGE_TIMEOUT;

/// Products domain configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductsConfig {
    /// Wrap `GET /` in the response envelope instead of returning a bare array
    pub list_envelope: bool,
    /// Deadline for each storage call
    pub storage_timeout: Duration,
    pub null_policy: NullPolicy,
}

impl ProductsConfig {
    pub fn handler_options(&self) -> HandlerOptions {
        HandlerOptions {
            list_shape: if self.list_envelope {
                ListShape::Enveloped
            } else {
                ListShape::Bare
            },
        }
    }
}

impl Default for ProductsConfig {
    fn default() -> Self {
        Self {
            list_envelope: false,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
            null_policy: NullPolicy::default(),
        }
    }
}

impl FromEnv for ProductsConfig {
    /// - PRODUCTS_LIST_ENVELOPE: defaults to false
    /// - PRODUCTS_STORAGE_TIMEOUT_MS: defaults to 5000, must be non-zero
    /// - PRODUCTS_NULL_POLICY: `explicit` (default) or `zero_as_null`
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let list_envelope = env_parse("PRODUCTS_LIST_ENVELOPE", defaults.list_envelope)?;
        let timeout_ms = env_parse(
            "PRODUCTS_STORAGE_TIMEOUT_MS",
            defaults.storage_timeout.as_millis() as u64,
        )?;
        if timeout_ms == 0 {
            return Err(ConfigError::ParseError {
                key: "PRODUCTS_STORAGE_TIMEOUT_MS".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }
        let null_policy = env_parse("PRODUCTS_NULL_POLICY", defaults.null_policy)?;

        Ok(Self {
            list_envelope,
            storage_timeout: Duration::from_millis(timeout_ms),
            null_policy,
        })
    }
}
