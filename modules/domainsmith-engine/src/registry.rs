//! Handler registration.
//!
//! The registry is an explicit table built once at process start: event type
//! → ordered list of handler functions, plus join rules for steps that must
//! wait for several sibling branches. No runtime re-registration, no
//! discovery mechanism.

use std::collections::HashMap;

use anyhow::Result;
use futures::future::BoxFuture;

use crate::event::{Envelope, SagaEvent};

/// What a handler returns: zero, one, or many successor events.
pub type HandlerFuture<'a, E> = BoxFuture<'a, Result<Vec<E>>>;

/// A stateless handler function. Reads the event and run state, performs at
/// most one external side effect through `deps`, and returns its successors.
pub type HandlerFn<E, S, D> =
    for<'a> fn(&'a Envelope<E>, &'a S, &'a D) -> HandlerFuture<'a, E>;

/// Pure state accumulation, applied to every dispatched event before its
/// handlers run. This is where Context facts are recorded.
///
/// An error here is an ordering/programming bug (a fact derived twice, a key
/// read too early) and fails the whole run loudly.
pub trait Reducer<E: SagaEvent, S: Send>: Send + Sync {
    fn apply(&self, state: &mut S, event: &E) -> Result<()>;
}

/// Event type → handlers, plus join expectations.
pub struct HandlerRegistry<E, S, D> {
    handlers: HashMap<&'static str, Vec<HandlerFn<E, S, D>>>,
    joins: HashMap<&'static str, usize>,
}

impl<E: SagaEvent, S, D> HandlerRegistry<E, S, D> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            joins: HashMap::new(),
        }
    }

    /// Register a handler for an event type. Handlers fire in registration
    /// order. An event type with no handler is terminal by design.
    pub fn on(&mut self, event_type: &'static str, handler: HandlerFn<E, S, D>) -> &mut Self {
        self.handlers.entry(event_type).or_default().push(handler);
        self
    }

    /// Declare a join point: events of this type are absorbed until
    /// `expected` arrivals, and the handlers fire exactly once, on the last.
    pub fn join(&mut self, event_type: &'static str, expected: usize) -> &mut Self {
        self.joins.insert(event_type, expected);
        self
    }

    pub fn handlers_for(&self, event_type: &str) -> &[HandlerFn<E, S, D>] {
        self.handlers
            .get(event_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn join_expectation(&self, event_type: &str) -> Option<usize> {
        self.joins.get(event_type).copied()
    }
}

impl<E: SagaEvent, S, D> Default for HandlerRegistry<E, S, D> {
    fn default() -> Self {
        Self::new()
    }
}
