#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Pugback
//!
//! In-process publish/notify registry: register named handlers under named
//! groups, then trigger every handler in a group by name with a payload.
//!
//! ## Overview
//!
//! Producers and consumers of events only share a group name. Consumers register
//! callables with [`CallbackEngine::register_handler`]; producers call
//! [`CallbackEngine::dispatch`]. Dispatch is best-effort fan-out: every enabled
//! handler runs in registration order, and one handler failing or panicking never
//! keeps the others from running.
//!
//! ## Key Features
//!
//! - **Thread-safe**: one blocking lock guards the registry; handlers never run under it
//! - **Re-entrant handlers**: a handler may register, dispatch or delete while being dispatched
//! - **Fault isolation**: panics are caught per handler and reported as [`Status::Invalid`]
//! - **Stable status codes**: [`Status`] values map to fixed integers
//! - **Observability**: `tracing` logs, optional lifecycle events, snapshots and a text report
//!
//! ## Module Organization
//!
//! - [`registry`] - Engine, groups, handlers, dispatch reports, diagnostics
//! - [`constants`] - Status codes and environment variable names
//! - [`config`] - Engine configuration
//! - [`events`] - Lifecycle event broadcast
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use pugback::{CallbackEngine, Status};
//! use serde_json::{json, Value};
//!
//! let engine: CallbackEngine = CallbackEngine::new();
//!
//! engine.register_handler("audit", "user.created", |payload: &Value| {
//!     if payload["id"].is_u64() { 0 } else { 1 }
//! });
//!
//! let report = engine
//!     .dispatch_with_report("user.created", &json!({"id": 7}))
//!     .expect("group exists");
//! assert!(report.all_succeeded());
//! assert_eq!(engine.dispatch("user.deleted", &json!({})), Status::Failure);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod registry;

pub use config::EngineConfig;
pub use constants::Status;
pub use error::{RegistryError, Result};
pub use events::{EventPublisher, PublishedEvent, RegistryEvent};
pub use registry::{
    write_report, Callback, CallbackEngine, DispatchReport, Group, GroupSummary, Handler,
    HandlerInfo, HandlerOutcome, Registration, RegistrySnapshot, RegistryStats, SharedCallback,
};
