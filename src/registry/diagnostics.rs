//! # Registry Diagnostics
//!
//! Read-only views of a registry for humans and tooling. Everything here is
//! assembled from [`CallbackEngine::list_group_names`] and
//! [`CallbackEngine::list_handlers`], so it adds no locking of its own and may
//! be used while dispatches are in flight.

use super::callback_engine::CallbackEngine;
use super::handler::HandlerInfo;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Counts across the whole registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_groups: usize,
    pub total_handlers: usize,
    pub enabled_handlers: usize,
    pub disabled_handlers: usize,
}

/// One group as seen by a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub name: String,
    pub handlers: Vec<HandlerInfo>,
}

/// Point-in-time view of every group and its handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub groups: Vec<GroupSnapshot>,
    pub taken_at: DateTime<Utc>,
}

impl RegistrySnapshot {
    /// Capture the registry group by group
    ///
    /// A group deleted between listing names and listing its handlers shows up
    /// with no handlers.
    pub fn capture<P: ?Sized>(engine: &CallbackEngine<P>) -> Self {
        let groups = engine
            .list_group_names()
            .into_iter()
            .map(|name| {
                let handlers = engine.list_handlers(&name).iter().map(|h| h.info()).collect();
                GroupSnapshot { name, handlers }
            })
            .collect();

        Self {
            groups,
            taken_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for RegistrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            writeln!(f, "'{}'", group.name)?;
            writeln!(f, "  ID:  'Name'  IsDisabled")?;
            for handler in &group.handlers {
                writeln!(
                    f,
                    "  {}: '{}' IsDisabled={}",
                    handler.id, handler.name, !handler.enabled
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Write a human-readable listing of every group and handler to `out`
pub fn write_report<P: ?Sized, W: Write>(engine: &CallbackEngine<P>, out: &mut W) -> Result<()> {
    let snapshot = RegistrySnapshot::capture(engine);
    write!(out, "{snapshot}")?;
    out.flush()?;
    Ok(())
}
