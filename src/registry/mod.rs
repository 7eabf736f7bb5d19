//! # Callback Registry
//!
//! Named groups of handlers and the engine that dispatches to them.
//!
//! ## Architecture
//!
//! ```text
//! CallbackEngine            (locking, registration, dispatch)
//! ├── Group                 (uniquely named, ordered handlers)
//! │   └── Handler           (callable + id + enabled flag)
//! ├── DispatchReport        (per-handler outcomes)
//! └── diagnostics           (snapshots, stats, text report)
//! ```

pub mod callback_engine;
pub mod diagnostics;
pub mod dispatch;
pub mod group;
pub mod handler;

// Re-export main types for easy access
pub use callback_engine::{CallbackEngine, Registration};
pub use diagnostics::{write_report, GroupSnapshot, RegistrySnapshot, RegistryStats};
pub use dispatch::{DispatchReport, HandlerOutcome};
pub use group::{Group, GroupSummary};
pub use handler::{Callback, Handler, HandlerInfo, SharedCallback};
