//! # Callback Engine
//!
//! The single source of truth for groups and handlers.
//!
//! ## Locking
//!
//! All registry state sits behind one blocking mutex. Every operation holds it only
//! for lookup and copy work, never while a callable runs: [`CallbackEngine::dispatch`]
//! copies the group's handlers out, releases the lock, then invokes them. Handlers
//! may therefore re-enter the engine (register, dispatch, delete) without
//! deadlocking, and a slow handler never stalls other callers.
//!
//! ## Usage
//!
//! ```rust
//! use pugback::{CallbackEngine, Status};
//! use serde_json::json;
//!
//! let engine: CallbackEngine = CallbackEngine::new();
//!
//! assert_eq!(
//!     engine.register_handler("A", "onStart", |_| 0),
//!     Status::CreatedNewGroup
//! );
//! assert_eq!(engine.register_handler("B", "onStart", |_| 1), Status::Success);
//!
//! assert_eq!(engine.dispatch("onStart", &json!({"pid": 42})), Status::Success);
//! assert_eq!(engine.dispatch("onStop", &json!(null)), Status::Failure);
//! assert_eq!(engine.list_group_names(), vec!["onStart".to_string()]);
//! ```

use super::diagnostics::RegistryStats;
use super::dispatch::DispatchReport;
use super::group::{Group, GroupSummary};
use super::handler::{Callback, Handler, SharedCallback};
use crate::config::EngineConfig;
use crate::constants::Status;
use crate::error::{RegistryError, Result};
use crate::events::{EventPublisher, RegistryEvent};
use crate::logging::log_registry_operation;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a successful registration landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub group_id: u64,
    pub handler_id: u64,
    pub created_group: bool,
}

impl Registration {
    /// `CreatedNewGroup` when the group was created on demand, `Success` otherwise
    pub fn status(&self) -> Status {
        if self.created_group {
            Status::CreatedNewGroup
        } else {
            Status::Success
        }
    }
}

struct RegistryState<P: ?Sized> {
    groups: Vec<Group<P>>,
    group_id_counter: u64,
    handler_id_counter: u64,
}

impl<P: ?Sized> RegistryState<P> {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            group_id_counter: 0,
            handler_id_counter: 0,
        }
    }

    fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name() == name)
    }

    fn group(&self, name: &str) -> Option<&Group<P>> {
        self.groups.iter().find(|g| g.name() == name)
    }

    fn group_mut(&mut self, name: &str) -> Option<&mut Group<P>> {
        self.groups.iter_mut().find(|g| g.name() == name)
    }

    fn allocate_handler_id(&mut self) -> u64 {
        self.handler_id_counter += 1;
        self.handler_id_counter
    }

    fn allocate_group_id(&mut self) -> u64 {
        self.group_id_counter += 1;
        self.group_id_counter
    }
}

/// Thread-safe registry of named handler groups
///
/// Cloning is cheap and yields another handle onto the same registry, so an
/// engine can be injected into several components or captured by its own
/// handlers.
pub struct CallbackEngine<P: ?Sized = serde_json::Value> {
    state: Arc<Mutex<RegistryState<P>>>,
    config: Arc<EngineConfig>,
    event_publisher: Option<EventPublisher>,
}

impl<P: ?Sized> CallbackEngine<P> {
    /// Create an empty engine with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an empty engine with the given configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(RegistryState::new())),
            config: Arc::new(config),
            event_publisher: None,
        }
    }

    /// Create an empty engine that publishes lifecycle events
    pub fn with_event_publisher(config: EngineConfig, event_publisher: EventPublisher) -> Self {
        Self {
            event_publisher: Some(event_publisher),
            ..Self::with_config(config)
        }
    }

    /// Create an empty engine with its own event channel
    ///
    /// The channel is sized by `config.event_channel_capacity`; subscribe
    /// through [`event_publisher`](Self::event_publisher).
    pub fn with_events(config: EngineConfig) -> Self {
        let event_publisher = EventPublisher::new(config.event_channel_capacity);
        Self::with_event_publisher(config, event_publisher)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn event_publisher(&self) -> Option<&EventPublisher> {
        self.event_publisher.as_ref()
    }

    /// Register a closure under `group_name`, creating the group if needed
    ///
    /// Returns `CreatedNewGroup` when the group did not exist, `Success` when the
    /// handler was appended to an existing group, and `Failure` only when a
    /// configured limit rejected the registration.
    pub fn register_handler<F>(&self, name: impl Into<String>, group_name: &str, callable: F) -> Status
    where
        F: Fn(&P) -> i32 + Send + Sync + 'static,
    {
        self.register_shared_handler(name, group_name, Arc::new(callable))
    }

    /// Register any [`Callback`] implementation, boxing it into an `Arc`
    pub fn register<C>(&self, name: impl Into<String>, group_name: &str, callable: C) -> Status
    where
        C: Callback<P> + 'static,
    {
        self.register_shared_handler(name, group_name, Arc::new(callable))
    }

    /// Register an already shared callable, e.g. a `Callback` trait implementation
    pub fn register_shared_handler(
        &self,
        name: impl Into<String>,
        group_name: &str,
        callable: SharedCallback<P>,
    ) -> Status {
        match self.try_register_handler(name, group_name, callable) {
            Ok(registration) => registration.status(),
            Err(_) => Status::Failure,
        }
    }

    /// Register a callable and report the ids it was given
    pub fn try_register_handler(
        &self,
        name: impl Into<String>,
        group_name: &str,
        callable: SharedCallback<P>,
    ) -> Result<Registration> {
        let name = name.into();

        let registration = {
            let mut state = self.state.lock();

            match state.group_index(group_name) {
                Some(index) => {
                    if let Some(max) = self.config.max_handlers_per_group {
                        if state.groups[index].len() >= max {
                            drop(state);
                            warn!(
                                group = %group_name,
                                handler = %name,
                                max_handlers_per_group = max,
                                "Rejected handler registration: group is full"
                            );
                            return Err(RegistryError::limit_exceeded(format!(
                                "group '{group_name}' already holds {max} handlers"
                            )));
                        }
                    }

                    let handler_id = state.allocate_handler_id();
                    let group = &mut state.groups[index];
                    let group_id = group.id();
                    group.push(Handler::new(handler_id, group_id, name.clone(), callable));

                    Registration {
                        group_id,
                        handler_id,
                        created_group: false,
                    }
                }
                None => {
                    if let Some(max) = self.config.max_groups {
                        if state.groups.len() >= max {
                            drop(state);
                            warn!(
                                group = %group_name,
                                handler = %name,
                                max_groups = max,
                                "Rejected handler registration: group limit reached"
                            );
                            return Err(RegistryError::limit_exceeded(format!(
                                "registry already holds {max} groups"
                            )));
                        }
                    }

                    let group_id = state.allocate_group_id();
                    let handler_id = state.allocate_handler_id();
                    let mut group = Group::new(group_id, group_name.to_string());
                    group.push(Handler::new(handler_id, group_id, name.clone(), callable));
                    state.groups.push(group);

                    Registration {
                        group_id,
                        handler_id,
                        created_group: true,
                    }
                }
            }
        };

        if registration.created_group {
            log_registry_operation(
                "create_group",
                Some(group_name),
                Some(registration.group_id),
                Some(name.as_str()),
                registration.status().as_str(),
                None,
            );
            self.publish(RegistryEvent::GroupCreated {
                group_id: registration.group_id,
                group: group_name.to_string(),
            });
        }

        debug!(
            group = %group_name,
            group_id = registration.group_id,
            handler = %name,
            handler_id = registration.handler_id,
            "Registered handler"
        );
        self.publish(RegistryEvent::HandlerRegistered {
            group_id: registration.group_id,
            group: group_name.to_string(),
            handler_id: registration.handler_id,
            handler: name,
        });

        Ok(registration)
    }

    /// Names of all live groups, in creation order
    pub fn list_group_names(&self) -> Vec<String> {
        let state = self.state.lock();
        state.groups.iter().map(|g| g.name().to_string()).collect()
    }

    /// Copies of the group's handlers in registration order; empty when the
    /// group does not exist
    pub fn list_handlers(&self, group_name: &str) -> Vec<Handler<P>> {
        let state = self.state.lock();
        state
            .group(group_name)
            .map(|g| g.handlers().to_vec())
            .unwrap_or_default()
    }

    /// Summaries of all live groups, in creation order
    pub fn list_groups(&self) -> Vec<GroupSummary> {
        let state = self.state.lock();
        state.groups.iter().map(Group::summary).collect()
    }

    /// Snapshot of a single group
    pub fn group(&self, group_name: &str) -> Option<Group<P>> {
        let state = self.state.lock();
        state.group(group_name).cloned()
    }

    pub fn contains_group(&self, group_name: &str) -> bool {
        self.state.lock().group_index(group_name).is_some()
    }

    /// Remove a group and all of its handlers
    ///
    /// Returns `Failure` (and changes nothing) when the group does not exist.
    pub fn delete_group(&self, group_name: &str) -> Status {
        let removed = {
            let mut state = self.state.lock();
            let index = state.group_index(group_name);
            index.map(|index| state.groups.remove(index))
        };

        let Some(group) = removed else {
            debug!(group = %group_name, "Delete requested for unknown group");
            return Status::Failure;
        };

        log_registry_operation(
            "delete_group",
            Some(group_name),
            Some(group.id()),
            None,
            Status::Success.as_str(),
            None,
        );
        self.publish(RegistryEvent::GroupDeleted {
            group_id: group.id(),
            group: group_name.to_string(),
            handlers_removed: group.len(),
        });

        Status::Success
    }

    pub fn enable_handler(&self, group_name: &str, handler_id: u64) -> Status {
        Self::status_of(self.set_handler_enabled(group_name, handler_id, true))
    }

    pub fn disable_handler(&self, group_name: &str, handler_id: u64) -> Status {
        Self::status_of(self.set_handler_enabled(group_name, handler_id, false))
    }

    /// Toggle a live handler; later dispatches observe the new state
    pub fn set_handler_enabled(&self, group_name: &str, handler_id: u64, enabled: bool) -> Result<()> {
        {
            let mut state = self.state.lock();
            let group = state
                .group_mut(group_name)
                .ok_or_else(|| RegistryError::group_not_found(group_name))?;
            let handler = group
                .handler_mut(handler_id)
                .ok_or_else(|| RegistryError::handler_not_found(group_name, handler_id))?;

            if enabled {
                handler.enable();
            } else {
                handler.disable();
            }
        }

        info!(
            group = %group_name,
            handler_id = handler_id,
            enabled = enabled,
            "Handler toggled"
        );
        self.publish(RegistryEvent::HandlerToggled {
            group: group_name.to_string(),
            handler_id,
            enabled,
        });

        Ok(())
    }

    /// Invoke every handler in the group against `payload`, in registration order
    ///
    /// Returns `Failure` only when the group does not exist. Individual handler
    /// failures never stop the fan-out; use [`dispatch_with_report`](Self::dispatch_with_report)
    /// to see them.
    pub fn dispatch(&self, group_name: &str, payload: &P) -> Status {
        Self::status_of(self.dispatch_with_report(group_name, payload).map(|_| ()))
    }

    /// Invoke every handler in the group and collect each handler's outcome
    pub fn dispatch_with_report(&self, group_name: &str, payload: &P) -> Result<DispatchReport> {
        // The lock is released at the end of this block, before any callable runs
        let handlers = {
            let state = self.state.lock();
            match state.group(group_name) {
                Some(group) => group.handlers().to_vec(),
                None => {
                    drop(state);
                    debug!(group = %group_name, "Dispatch to unknown group");
                    return Err(RegistryError::group_not_found(group_name));
                }
            }
        };

        let outcomes: Vec<_> = handlers
            .iter()
            .map(|handler| handler.invoke_with_outcome(payload))
            .collect();

        let report = DispatchReport {
            group: group_name.to_string(),
            outcomes,
        };

        if self.config.log_handler_outcomes {
            for outcome in &report.outcomes {
                match outcome.status {
                    Status::Failure | Status::Invalid => warn!(
                        group = %group_name,
                        handler = %outcome.handler_name,
                        handler_id = outcome.handler_id,
                        status = %outcome.status,
                        fault = outcome.fault.as_deref(),
                        "Handler did not succeed"
                    ),
                    Status::Disabled => debug!(
                        group = %group_name,
                        handler = %outcome.handler_name,
                        handler_id = outcome.handler_id,
                        "Skipped disabled handler"
                    ),
                    _ => {}
                }
            }
        }

        debug!(
            group = %group_name,
            invoked = report.invoked(),
            failed = report.failed() + report.faulted(),
            "Dispatch completed"
        );
        self.publish(RegistryEvent::DispatchCompleted {
            group: group_name.to_string(),
            invoked: report.invoked(),
            failed: report.failed() + report.faulted(),
        });

        Ok(report)
    }

    /// Counts across the whole registry, taken under one lock
    pub fn stats(&self) -> RegistryStats {
        let state = self.state.lock();
        let mut stats = RegistryStats {
            total_groups: state.groups.len(),
            ..RegistryStats::default()
        };

        for handler in state.groups.iter().flat_map(|g| g.handlers()) {
            stats.total_handlers += 1;
            if handler.is_enabled() {
                stats.enabled_handlers += 1;
            } else {
                stats.disabled_handlers += 1;
            }
        }

        stats
    }

    fn status_of(result: Result<()>) -> Status {
        match result {
            Ok(()) => Status::Success,
            Err(_) => Status::Failure,
        }
    }

    fn publish(&self, event: RegistryEvent) {
        if let Some(publisher) = &self.event_publisher {
            publisher.publish(event);
        }
    }
}

impl<P: ?Sized> Clone for CallbackEngine<P> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            config: Arc::clone(&self.config),
            event_publisher: self.event_publisher.clone(),
        }
    }
}

impl<P: ?Sized> Default for CallbackEngine<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> std::fmt::Debug for CallbackEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackEngine")
            .field("groups", &self.list_group_names())
            .field("config", &self.config)
            .field("publishes_events", &self.event_publisher.is_some())
            .finish()
    }
}
