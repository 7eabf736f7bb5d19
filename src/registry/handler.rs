//! # Handlers
//!
//! A [`Handler`] is one registered callable plus the metadata the engine keeps
//! about it. Handlers are created by [`CallbackEngine::register_handler`](super::CallbackEngine::register_handler)
//! and live until their group is deleted.
//!
//! ## Invocation
//!
//! [`Handler::invoke`] is the fault boundary of the registry: a disabled handler
//! is skipped, a callable returning `0` maps to [`Status::Success`], any other
//! value to [`Status::Failure`], and a panic inside the callable is caught and
//! reported as [`Status::Invalid`] so it never escapes a fan-out dispatch.

use super::dispatch::HandlerOutcome;
use crate::constants::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Something that can be called back with a payload
///
/// Implemented for every `Fn(&P) -> i32 + Send + Sync`, so closures with
/// captured context work directly. Return `0` for success.
pub trait Callback<P: ?Sized>: Send + Sync {
    fn call(&self, payload: &P) -> i32;
}

impl<P: ?Sized, F> Callback<P> for F
where
    F: Fn(&P) -> i32 + Send + Sync,
{
    fn call(&self, payload: &P) -> i32 {
        self(payload)
    }
}

/// Shared, immutable callable held by a handler
pub type SharedCallback<P> = Arc<dyn Callback<P>>;

/// One registered callable plus its identity and enabled flag
///
/// Cloning produces an independent snapshot: the callable is shared, the
/// enabled flag is not.
pub struct Handler<P: ?Sized> {
    id: u64,
    group_id: u64,
    name: String,
    enabled: bool,
    registered_at: DateTime<Utc>,
    callable: SharedCallback<P>,
}

impl<P: ?Sized> Handler<P> {
    pub(crate) fn new(id: u64, group_id: u64, name: String, callable: SharedCallback<P>) -> Self {
        Self {
            id,
            group_id,
            name,
            enabled: true,
            registered_at: Utc::now(),
            callable,
        }
    }

    /// Engine-assigned id, unique for the lifetime of the engine
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Id of the owning group
    pub fn group_id(&self) -> u64 {
        self.group_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Call the handler back with `payload`
    pub fn invoke(&self, payload: &P) -> Status {
        self.invoke_with_outcome(payload).status
    }

    /// Call the handler back and keep the fault message, if any
    pub fn invoke_with_outcome(&self, payload: &P) -> HandlerOutcome {
        if !self.enabled {
            return HandlerOutcome::new(self, Status::Disabled, None);
        }

        match catch_unwind(AssertUnwindSafe(|| self.callable.call(payload))) {
            Ok(result) => HandlerOutcome::new(self, Status::from_callback_result(result), None),
            Err(panic) => {
                HandlerOutcome::new(self, Status::Invalid, Some(panic_message(panic.as_ref())))
            }
        }
    }

    /// Serializable metadata, without the callable
    pub fn info(&self) -> HandlerInfo {
        HandlerInfo {
            id: self.id,
            group_id: self.group_id,
            name: self.name.clone(),
            enabled: self.enabled,
            registered_at: self.registered_at,
        }
    }
}

impl<P: ?Sized> Clone for Handler<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            group_id: self.group_id,
            name: self.name.clone(),
            enabled: self.enabled,
            registered_at: self.registered_at,
            callable: Arc::clone(&self.callable),
        }
    }
}

impl<P: ?Sized> std::fmt::Debug for Handler<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("id", &self.id)
            .field("group_id", &self.group_id)
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("registered_at", &self.registered_at)
            .field("callable", &"<Arc<dyn Callback>>")
            .finish()
    }
}

/// Handler metadata for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerInfo {
    pub id: u64,
    pub group_id: u64,
    pub name: String,
    pub enabled: bool,
    pub registered_at: DateTime<Utc>,
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked with a non-string payload".to_string()
    }
}
