//! # Status Codes and Constants
//!
//! Status codes returned by every registry operation, plus the environment
//! variable names the crate reads.
//!
//! The integer codes are stable across the API so they can be handed to callers
//! that only understand plain numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a registry operation or a single handler invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum Status {
    /// The operation (or handler) completed successfully
    Success = 1,
    /// The operation failed, or the handler reported a non-zero result
    Failure = 2,
    /// The handler could not be called back (it panicked)
    Invalid = 3,
    /// The handler is disabled and was not invoked
    Disabled = 4,
    /// Registration succeeded and created the group on demand
    CreatedNewGroup = 5,
}

impl Status {
    /// Stable integer code for this status
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Look up a status by its integer code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Success),
            2 => Some(Self::Failure),
            3 => Some(Self::Invalid),
            4 => Some(Self::Disabled),
            5 => Some(Self::CreatedNewGroup),
            _ => None,
        }
    }

    /// Map a callable's raw return value: zero is success, anything else failure
    pub fn from_callback_result(result: i32) -> Self {
        if result == 0 {
            Self::Success
        } else {
            Self::Failure
        }
    }

    /// `Success` or `CreatedNewGroup`
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::CreatedNewGroup)
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failure | Self::Invalid)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Invalid => "invalid",
            Self::Disabled => "disabled",
            Self::CreatedNewGroup => "created_new_group",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment variables recognised by the crate
pub mod env {
    pub const ENVIRONMENT: &str = "PUGBACK_ENV";
    pub const PREFIX: &str = "PUGBACK";
    pub const EVENT_CHANNEL_CAPACITY: &str = "PUGBACK_EVENT_CHANNEL_CAPACITY";
    pub const MAX_GROUPS: &str = "PUGBACK_MAX_GROUPS";
    pub const MAX_HANDLERS_PER_GROUP: &str = "PUGBACK_MAX_HANDLERS_PER_GROUP";
    pub const LOG_HANDLER_OUTCOMES: &str = "PUGBACK_LOG_HANDLER_OUTCOMES";
    pub const LOG_FORMAT: &str = "PUGBACK_LOG_FORMAT";
}

/// Default capacity of the lifecycle event broadcast channel
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1000;
