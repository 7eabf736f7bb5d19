//! # Engine Configuration
//!
//! Tunables for [`CallbackEngine`](crate::registry::CallbackEngine). Every field has
//! a default that reproduces the unrestricted registry behaviour, so
//! `EngineConfig::default()` is always a valid starting point.
//!
//! Configuration can be built in code with the `with_*` setters, read from
//! `PUGBACK_*` environment variables, or loaded from a file through the `config`
//! crate with environment overrides layered on top.

use crate::constants::{env, DEFAULT_EVENT_CHANNEL_CAPACITY};
use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Configuration for a callback engine
///
/// # Examples
///
/// ```rust
/// use pugback::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_max_groups(16)
///     .with_max_handlers_per_group(8);
///
/// assert_eq!(config.max_groups, Some(16));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Capacity of the broadcast channel used for lifecycle events
    pub event_channel_capacity: usize,

    /// Upper bound on live groups; `None` means unlimited
    pub max_groups: Option<usize>,

    /// Upper bound on handlers in a single group; `None` means unlimited
    pub max_handlers_per_group: Option<usize>,

    /// Log each failed, faulted or skipped handler during dispatch
    pub log_handler_outcomes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
            max_groups: None,
            max_handlers_per_group: None,
            log_handler_outcomes: true,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = capacity;
        self
    }

    pub fn with_max_groups(mut self, max_groups: usize) -> Self {
        self.max_groups = Some(max_groups);
        self
    }

    pub fn with_max_handlers_per_group(mut self, max_handlers: usize) -> Self {
        self.max_handlers_per_group = Some(max_handlers);
        self
    }

    pub fn with_handler_outcome_logging(mut self, enabled: bool) -> Self {
        self.log_handler_outcomes = enabled;
        self
    }

    /// Build a configuration from `PUGBACK_*` environment variables, falling back
    /// to defaults for anything unset
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(capacity) = std::env::var(env::EVENT_CHANNEL_CAPACITY) {
            config.event_channel_capacity = capacity.parse().map_err(|e| {
                RegistryError::config(format!("Invalid event_channel_capacity: {e}"))
            })?;
        }

        if let Ok(max_groups) = std::env::var(env::MAX_GROUPS) {
            config.max_groups = Some(max_groups.parse().map_err(|e| {
                RegistryError::config(format!("Invalid max_groups: {e}"))
            })?);
        }

        if let Ok(max_handlers) = std::env::var(env::MAX_HANDLERS_PER_GROUP) {
            config.max_handlers_per_group = Some(max_handlers.parse().map_err(|e| {
                RegistryError::config(format!("Invalid max_handlers_per_group: {e}"))
            })?);
        }

        if let Ok(log_outcomes) = std::env::var(env::LOG_HANDLER_OUTCOMES) {
            config.log_handler_outcomes = log_outcomes.parse().map_err(|e| {
                RegistryError::config(format!("Invalid log_handler_outcomes: {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file (format inferred from the extension), with
    /// `PUGBACK_*` environment variables overriding file values
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading engine configuration from: {}", path.display());

        let config: Self = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(::config::Environment::with_prefix(env::PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.event_channel_capacity == 0 {
            return Err(RegistryError::config(
                "event_channel_capacity must be greater than zero",
            ));
        }

        if self.max_groups == Some(0) {
            return Err(RegistryError::config("max_groups must be greater than zero"));
        }

        if self.max_handlers_per_group == Some(0) {
            return Err(RegistryError::config(
                "max_handlers_per_group must be greater than zero",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.event_channel_capacity, 1000);
        assert_eq!(config.max_groups, None);
        assert_eq!(config.max_handlers_per_group, None);
        assert!(config.log_handler_outcomes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = EngineConfig::new()
            .with_event_channel_capacity(16)
            .with_max_groups(4)
            .with_max_handlers_per_group(2)
            .with_handler_outcome_logging(false);

        assert_eq!(config.event_channel_capacity, 16);
        assert_eq!(config.max_groups, Some(4));
        assert_eq!(config.max_handlers_per_group, Some(2));
        assert!(!config.log_handler_outcomes);
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        assert!(EngineConfig::new()
            .with_event_channel_capacity(0)
            .validate()
            .is_err());
        assert!(EngineConfig::new().with_max_groups(0).validate().is_err());
        assert!(EngineConfig::new()
            .with_max_handlers_per_group(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_groups": 3}"#).unwrap();
        assert_eq!(config.max_groups, Some(3));
        assert_eq!(config.event_channel_capacity, 1000);
        assert!(config.log_handler_outcomes);
    }
}
