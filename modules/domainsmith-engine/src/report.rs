//! What a saga run leaves behind.
//!
//! Saga state is not persisted past the run; the report is the record the
//! caller gets — every dispatched event with its lineage, the duplicate
//! steps that were skipped, the branches that failed and where.

use uuid::Uuid;

/// One event the dispatcher processed, payload included, so a failed run
/// can be reconstructed step by step from the report alone.
#[derive(Debug, Clone)]
pub struct DispatchedEvent {
    pub id: Uuid,
    pub event_type: String,
    pub lineage: Vec<Uuid>,
    pub payload: serde_json::Value,
}

/// A branch that halted: the step's event type and the collaborator error.
#[derive(Debug, Clone)]
pub struct StepFailure {
    pub event_type: String,
    pub error: String,
}

/// Outcome of one saga run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Every event popped from the queue, in dispatch order.
    pub events: Vec<DispatchedEvent>,
    /// Event types skipped by the duplicate-step guard.
    pub skipped: Vec<String>,
    /// Steps whose handler failed; their branches halted without rollback.
    pub failures: Vec<StepFailure>,
    /// Event types that ended a branch by having no registered handler.
    pub terminals: Vec<String>,
}

impl RunReport {
    /// Whether an event of the given type was dispatched at all.
    pub fn reached(&self, event_type: &str) -> bool {
        self.events.iter().any(|e| e.event_type == event_type)
    }

    /// How many events of the given type were dispatched.
    pub fn count(&self, event_type: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }
}
