//! The dispatch loop.

use std::collections::{HashMap, VecDeque};

use anyhow::{Context as _, Result};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::event::{Envelope, SagaEvent};
use crate::registry::{HandlerRegistry, Reducer};
use crate::report::{DispatchedEvent, RunReport, StepFailure};

/// Drives one saga instance from its root event to exhaustion.
///
/// Dispatch is breadth-first: siblings from a fan-out are processed in the
/// order their handler returned them, and strict ordering holds only within
/// a single causal chain. A handler failure halts its branch — siblings keep
/// going, nothing is rolled back.
pub struct Dispatcher<E, S, D, R>
where
    E: SagaEvent,
    S: Send,
    R: Reducer<E, S>,
{
    registry: HandlerRegistry<E, S, D>,
    reducer: R,
}

impl<E, S, D, R> Dispatcher<E, S, D, R>
where
    E: SagaEvent,
    S: Send,
    D: Send + Sync,
    R: Reducer<E, S>,
{
    pub fn new(registry: HandlerRegistry<E, S, D>, reducer: R) -> Self {
        Self { registry, reducer }
    }

    /// Dispatch from `root` until the queue is empty.
    ///
    /// Returns `Err` only for run-fatal programming errors (a reducer
    /// rejecting a Context write); collaborator failures are recorded in the
    /// report instead.
    pub async fn dispatch(&self, root: Envelope<E>, state: &mut S, deps: &D) -> Result<RunReport> {
        let mut queue: VecDeque<Envelope<E>> = VecDeque::new();
        queue.push_back(root);

        // Type of every event dispatched so far, for the duplicate-step guard.
        let mut types_by_id: HashMap<Uuid, &'static str> = HashMap::new();
        // Arrival counters for join points.
        let mut join_arrivals: HashMap<&'static str, usize> = HashMap::new();

        let mut report = RunReport::default();

        while let Some(env) = queue.pop_front() {
            let event_type = env.event_type();

            // Duplicate-step guard: an event type already in this event's own
            // lineage means the step ran before. Re-executing side effects
            // like repository creation would conflict on the hosting API, so
            // the step is skipped, not retried.
            if env
                .lineage()
                .iter()
                .any(|id| types_by_id.get(id) == Some(&event_type))
            {
                warn!(event_type, "step already satisfied in lineage, skipping");
                report.skipped.push(event_type.to_string());
                continue;
            }

            types_by_id.insert(env.id(), event_type);
            report.events.push(DispatchedEvent {
                id: env.id(),
                event_type: event_type.to_string(),
                lineage: env.lineage().to_vec(),
                payload: env.body.to_payload(),
            });

            // Join guard: absorb arrivals until every expected sibling branch
            // has reported in. The handlers fire once, on the final arrival.
            if let Some(expected) = self.registry.join_expectation(event_type) {
                let arrivals = join_arrivals.entry(event_type).or_insert(0);
                *arrivals += 1;
                if *arrivals < expected {
                    debug!(event_type, arrivals, expected, "join arrival absorbed");
                    continue;
                }
                if *arrivals > expected {
                    warn!(event_type, "join already fired, skipping extra arrival");
                    report.skipped.push(event_type.to_string());
                    continue;
                }
            }

            // Reduce first so handlers of this event see its facts.
            self.reducer
                .apply(state, &env.body)
                .with_context(|| format!("reducing `{event_type}`"))?;

            let handlers = self.registry.handlers_for(event_type);
            if handlers.is_empty() {
                debug!(event_type, "no handler registered, branch terminal");
                report.terminals.push(event_type.to_string());
                continue;
            }

            for handler in handlers {
                match handler(&env, state, deps).await {
                    Ok(successors) => {
                        for body in successors {
                            queue.push_back(env.successor(body));
                        }
                    }
                    Err(err) => {
                        error!(event_type, error = %format!("{err:#}"), "step failed, halting branch");
                        report.failures.push(StepFailure {
                            event_type: event_type.to_string(),
                            error: format!("{err:#}"),
                        });
                    }
                }
            }
        }

        Ok(report)
    }
}
