//! Saga dispatch engine.
//!
//! Provides a generic event loop for one saga run: pop an event, guard
//! against duplicate steps and premature joins, reduce state, invoke the
//! registered handlers, enqueue their successors — until the queue drains.
//! Events form causal chains through append-only lineage.
//!
//! Consumers define their domain by implementing [`Reducer`] (pure state
//! accumulation) and registering handler functions (side effects that emit
//! successor events) into a [`HandlerRegistry`].

pub mod dispatcher;
pub mod event;
pub mod registry;
pub mod report;

pub use dispatcher::Dispatcher;
pub use event::{Envelope, SagaEvent};
pub use registry::{HandlerFn, HandlerFuture, HandlerRegistry, Reducer};
pub use report::{DispatchedEvent, RunReport, StepFailure};
