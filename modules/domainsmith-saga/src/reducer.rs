//! Context accumulation.
//!
//! All Context writes happen here, once per fact, driven by the event
//! stream. Handlers never mutate state directly — they report results in
//! event payloads and the reducer records them. A second write to any key
//! is an ordering bug and fails the run.

use anyhow::Result;
use domainsmith_engine::Reducer;
use tracing::debug;

use crate::events::ProvisionEvent;
use crate::state::SagaState;

pub struct ProvisionReducer;

impl Reducer<ProvisionEvent, SagaState> for ProvisionReducer {
    fn apply(&self, state: &mut SagaState, event: &ProvisionEvent) -> Result<()> {
        match event {
            // The root event derives every fact computable from the request
            // alone, so downstream handlers never recompute them.
            ProvisionEvent::NewDomainRequested { request } => {
                let ctx = &mut state.context;
                let def_org = format!("{}-def", request.org);
                ctx.set_url(format!(
                    "https://github.com/{}/{}",
                    request.org, request.name
                ))?;
                ctx.set_def_url(format!("https://github.com/{}/{}", def_org, request.name))?;
                ctx.set_def_org(def_org)?;
                ctx.set_artifact_org(format!("{}-artifact", request.org))?;
                ctx.set_version("0.0.0")?;
                debug!(org = request.org.as_str(), name = request.name.as_str(), "derived root context");
            }

            ProvisionEvent::DomainRepositoryCloned { folder } => {
                state.context.set_repo_folder(folder.display().to_string())?;
            }

            ProvisionEvent::DefinitionRepositoryCloned { folder } => {
                state
                    .context
                    .set_def_repo_folder(folder.display().to_string())?;
            }

            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::request;
    use std::path::PathBuf;

    #[test]
    fn root_event_derives_urls_orgs_and_version() {
        let mut state = SagaState::new(request());
        ProvisionReducer
            .apply(
                &mut state,
                &ProvisionEvent::NewDomainRequested { request: request() },
            )
            .unwrap();

        let ctx = &state.context;
        assert_eq!(ctx.url().unwrap(), "https://github.com/acme/widgets");
        assert_eq!(ctx.def_url().unwrap(), "https://github.com/acme-def/widgets");
        assert_eq!(ctx.def_org().unwrap(), "acme-def");
        assert_eq!(ctx.artifact_org().unwrap(), "acme-artifact");
        assert_eq!(ctx.version().unwrap(), "0.0.0");
    }

    #[test]
    fn deriving_twice_is_an_error() {
        let mut state = SagaState::new(request());
        let root = ProvisionEvent::NewDomainRequested { request: request() };
        ProvisionReducer.apply(&mut state, &root).unwrap();
        assert!(ProvisionReducer.apply(&mut state, &root).is_err());
    }

    #[test]
    fn clone_events_record_folders() {
        let mut state = SagaState::new(request());
        ProvisionReducer
            .apply(
                &mut state,
                &ProvisionEvent::DomainRepositoryCloned {
                    folder: PathBuf::from("/tmp/x/widgets"),
                },
            )
            .unwrap();
        assert_eq!(state.context.repo_folder().unwrap(), "/tmp/x/widgets");
        assert!(state.context.def_repo_folder().is_err());
    }
}
