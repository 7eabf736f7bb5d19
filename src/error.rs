//! Error types for pugback
//!
//! The registry contract itself reports [`Status`](crate::constants::Status) codes.
//! `RegistryError` backs the richer APIs layered on top of it: dispatch reports,
//! configuration loading and diagnostic output.

use thiserror::Error;

/// Result type for pugback operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur in pugback operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No group is registered under the given name
    #[error("Group not found: {group}")]
    GroupNotFound { group: String },

    /// The group exists but holds no handler with the given id
    #[error("Handler {handler_id} not found in group {group}")]
    HandlerNotFound { group: String, handler_id: u64 },

    /// A configured registry limit would be exceeded
    #[error("Limit exceeded: {message}")]
    LimitExceeded { message: String },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration source could not be read or deserialized
    #[error("Config source error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing a diagnostic report failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    /// Create a group not found error
    pub fn group_not_found<S: Into<String>>(group: S) -> Self {
        Self::GroupNotFound {
            group: group.into(),
        }
    }

    /// Create a handler not found error
    pub fn handler_not_found<S: Into<String>>(group: S, handler_id: u64) -> Self {
        Self::HandlerNotFound {
            group: group.into(),
            handler_id,
        }
    }

    /// Create a limit exceeded error
    pub fn limit_exceeded<S: Into<String>>(message: S) -> Self {
        Self::LimitExceeded {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error means the referenced group or handler does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GroupNotFound { .. } | Self::HandlerNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RegistryError::group_not_found("onStart");
        assert_eq!(err.to_string(), "Group not found: onStart");

        let err = RegistryError::handler_not_found("onStart", 7);
        assert_eq!(err.to_string(), "Handler 7 not found in group onStart");
    }

    #[test]
    fn test_not_found_classification() {
        assert!(RegistryError::group_not_found("g").is_not_found());
        assert!(RegistryError::handler_not_found("g", 1).is_not_found());
        assert!(!RegistryError::config("bad").is_not_found());
        assert!(!RegistryError::limit_exceeded("full").is_not_found());
    }
}
