use super::handler::Handler;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A uniquely named, ordered collection of handlers; the unit of dispatch
pub struct Group<P: ?Sized> {
    id: u64,
    name: String,
    created_at: DateTime<Utc>,
    handlers: Vec<Handler<P>>,
}

impl<P: ?Sized> Group<P> {
    pub(crate) fn new(id: u64, name: String) -> Self {
        Self {
            id,
            name,
            created_at: Utc::now(),
            handlers: Vec::new(),
        }
    }

    /// Engine-assigned id: 1, 2, 3, ... in creation order, never reused
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Handlers in registration order
    pub fn handlers(&self) -> &[Handler<P>] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            id: self.id,
            name: self.name.clone(),
            handler_count: self.handlers.len(),
            enabled_handlers: self.handlers.iter().filter(|h| h.is_enabled()).count(),
            created_at: self.created_at,
        }
    }

    pub(crate) fn push(&mut self, handler: Handler<P>) {
        self.handlers.push(handler);
    }

    pub(crate) fn handler_mut(&mut self, handler_id: u64) -> Option<&mut Handler<P>> {
        self.handlers.iter_mut().find(|h| h.id() == handler_id)
    }
}

impl<P: ?Sized> Clone for Group<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            handlers: self.handlers.clone(),
        }
    }
}

impl<P: ?Sized> std::fmt::Debug for Group<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("created_at", &self.created_at)
            .field("handlers", &self.handlers)
            .finish()
    }
}

/// Group metadata for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub id: u64,
    pub name: String,
    pub handler_count: usize,
    pub enabled_handlers: usize,
    pub created_at: DateTime<Utc>,
}
