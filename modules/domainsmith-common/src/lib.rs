//! Shared types for the domainsmith provisioning saga.
//!
//! Holds the pieces every other module needs: the provisioning request,
//! the append-only [`Context`] of facts derived during a run, and the
//! environment-driven [`Config`].

pub mod config;
pub mod context;
pub mod request;

pub use config::Config;
pub use context::{Context, ContextError};
pub use request::DomainRequest;
