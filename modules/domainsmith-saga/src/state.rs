//! Run state and handler dependencies.

use std::sync::Arc;

use domainsmith_common::{Config, Context, DomainRequest};

use crate::traits::{FlakeTools, Hosting, Vcs};

/// Mutable state for one provisioning run.
///
/// The request is fixed at the root; the Context grows monotonically as the
/// reducer records derived facts. Each run owns its state — concurrent runs
/// share nothing.
pub struct SagaState {
    pub request: DomainRequest,
    pub context: Context,
}

impl SagaState {
    pub fn new(request: DomainRequest) -> Self {
        Self {
            request,
            context: Context::new(),
        }
    }

    /// Rebuild state for an event reconstructed from the signal bus, where
    /// the Context arrived alongside the payload.
    pub fn with_context(request: DomainRequest, context: Context) -> Self {
        Self { request, context }
    }
}

/// Immutable collaborators passed to every handler. Each handler performs at
/// most one side effect through these.
pub struct ProvisionDeps {
    pub hosting: Arc<dyn Hosting>,
    pub vcs: Arc<dyn Vcs>,
    pub flake: Arc<dyn FlakeTools>,
    pub config: Config,
}
