//! # Registry Lifecycle Events
//!
//! Optional broadcast of what happens inside a [`CallbackEngine`](crate::registry::CallbackEngine):
//! groups created and deleted, handlers registered and toggled, dispatches completed.
//! Engines only publish when constructed with an [`EventPublisher`].

pub mod publisher;
pub mod types;

// Re-export key types for convenience
pub use publisher::{EventPublisher, PublishedEvent};
pub use types::RegistryEvent;
