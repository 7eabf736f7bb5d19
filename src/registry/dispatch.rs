//! Per-handler results of a dispatch.

use super::handler::Handler;
use crate::constants::Status;
use serde::{Deserialize, Serialize};

/// What happened when one handler was called back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerOutcome {
    pub handler_id: u64,
    pub handler_name: String,
    pub status: Status,
    /// Panic message when `status` is `Invalid`
    pub fault: Option<String>,
}

impl HandlerOutcome {
    pub(crate) fn new<P: ?Sized>(handler: &Handler<P>, status: Status, fault: Option<String>) -> Self {
        Self {
            handler_id: handler.id(),
            handler_name: handler.name().to_string(),
            status,
            fault,
        }
    }
}

/// Outcomes of one dispatch, in invocation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub group: String,
    pub outcomes: Vec<HandlerOutcome>,
}

impl DispatchReport {
    /// Handlers whose callable actually ran (disabled handlers excluded)
    pub fn invoked(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status != Status::Disabled)
            .count()
    }

    pub fn succeeded(&self) -> usize {
        self.count(Status::Success)
    }

    pub fn failed(&self) -> usize {
        self.count(Status::Failure)
    }

    /// Handlers that panicked
    pub fn faulted(&self) -> usize {
        self.count(Status::Invalid)
    }

    pub fn skipped(&self) -> usize {
        self.count(Status::Disabled)
    }

    /// True when no handler failed or faulted; disabled handlers don't count against it
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| !o.status.is_failure())
    }

    fn count(&self, status: Status) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: u64, status: Status) -> HandlerOutcome {
        HandlerOutcome {
            handler_id: id,
            handler_name: format!("handler_{id}"),
            status,
            fault: None,
        }
    }

    #[test]
    fn test_report_counts() {
        let report = DispatchReport {
            group: "onStart".to_string(),
            outcomes: vec![
                outcome(1, Status::Success),
                outcome(2, Status::Failure),
                outcome(3, Status::Disabled),
                outcome(4, Status::Invalid),
                outcome(5, Status::Success),
            ],
        };

        assert_eq!(report.invoked(), 4);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.faulted(), 1);
        assert_eq!(report.skipped(), 1);
        assert!(!report.all_succeeded());
    }

    #[test]
    fn test_empty_report_succeeds() {
        let report = DispatchReport {
            group: "empty".to_string(),
            outcomes: Vec::new(),
        };
        assert_eq!(report.invoked(), 0);
        assert!(report.all_succeeded());
    }

    #[test]
    fn test_disabled_does_not_fail_report() {
        let report = DispatchReport {
            group: "onStart".to_string(),
            outcomes: vec![outcome(1, Status::Success), outcome(2, Status::Disabled)],
        };
        assert!(report.all_succeeded());
    }
}
