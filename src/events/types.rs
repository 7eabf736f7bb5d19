use serde::{Deserialize, Serialize};

/// Something that changed in, or happened through, a registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryEvent {
    GroupCreated {
        group_id: u64,
        group: String,
    },
    HandlerRegistered {
        group_id: u64,
        group: String,
        handler_id: u64,
        handler: String,
    },
    HandlerToggled {
        group: String,
        handler_id: u64,
        enabled: bool,
    },
    GroupDeleted {
        group_id: u64,
        group: String,
        handlers_removed: usize,
    },
    DispatchCompleted {
        group: String,
        invoked: usize,
        failed: usize,
    },
}

impl RegistryEvent {
    /// Dotted event name, e.g. `group.created`
    pub fn name(&self) -> &'static str {
        match self {
            Self::GroupCreated { .. } => "group.created",
            Self::HandlerRegistered { .. } => "handler.registered",
            Self::HandlerToggled { .. } => "handler.toggled",
            Self::GroupDeleted { .. } => "group.deleted",
            Self::DispatchCompleted { .. } => "dispatch.completed",
        }
    }

    /// Name of the group the event concerns
    pub fn group(&self) -> &str {
        match self {
            Self::GroupCreated { group, .. }
            | Self::HandlerRegistered { group, .. }
            | Self::HandlerToggled { group, .. }
            | Self::GroupDeleted { group, .. }
            | Self::DispatchCompleted { group, .. } => group,
        }
    }
}
