//! The "new domain" provisioning saga.
//!
//! One run takes a [`DomainRequest`] and provisions two linked repositories:
//! the domain repository (code skeleton, tagged and pushed) and its
//! definition repository (Nix flake pinned to the domain's tagged tarball).
//! Every step is an event; the dispatch engine drives the causal chain from
//! `saga:new_domain_requested` to `saga:new_domain_created`.

pub mod bus;
pub mod events;
pub mod handlers;
pub mod reducer;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use anyhow::Result;
use domainsmith_common::{Config, Context, DomainRequest};
use domainsmith_engine::{Dispatcher, Envelope, RunReport};

use events::ProvisionEvent;
use handlers::build_registry;
use reducer::ProvisionReducer;
use state::{ProvisionDeps, SagaState};
use traits::production_collaborators;

/// What a finished run hands back: the dispatch report plus the Context with
/// every derived fact (repository urls, working folders, version).
pub struct ProvisionOutcome {
    pub report: RunReport,
    pub context: Context,
}

impl ProvisionOutcome {
    /// Whether the run reached its terminal `saga:new_domain_created` event.
    pub fn completed(&self) -> bool {
        self.report.reached(events::event_type::NEW_DOMAIN_CREATED)
    }
}

/// Run the full provisioning saga against the production collaborators.
pub async fn provision(request: DomainRequest, config: Config) -> Result<ProvisionOutcome> {
    let (hosting, git, flake) = production_collaborators(
        request.github_token.clone(),
        config.hosting_api_url.clone(),
        config.collaborator_timeout,
    );
    let deps = ProvisionDeps {
        hosting: Arc::new(hosting),
        vcs: Arc::new(git),
        flake: Arc::new(flake),
        config,
    };

    let dispatcher = Dispatcher::new(build_registry(), ProvisionReducer);
    let mut state = SagaState::new(request.clone());
    let root = Envelope::root(ProvisionEvent::NewDomainRequested { request });
    let report = dispatcher.dispatch(root, &mut state, &deps).await?;

    Ok(ProvisionOutcome {
        report,
        context: state.context,
    })
}
