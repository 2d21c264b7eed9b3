//! End-to-end runs of the provisioning saga against recording fakes.

use std::path::PathBuf;
use std::sync::Arc;

use domainsmith_common::Config;
use domainsmith_engine::{Dispatcher, Envelope, RunReport};

use crate::events::{event_type::*, ProvisionEvent};
use crate::handlers::build_registry;
use crate::reducer::ProvisionReducer;
use crate::state::{ProvisionDeps, SagaState};
use crate::testing::{request, MockFlake, MockHosting, MockVcs};

struct Harness {
    hosting: Arc<MockHosting>,
    vcs: Arc<MockVcs>,
    flake: Arc<MockFlake>,
    deps: ProvisionDeps,
}

fn harness(hosting: MockHosting) -> Harness {
    let hosting = Arc::new(hosting);
    let vcs = Arc::new(MockVcs::new());
    let flake = Arc::new(MockFlake::default());
    let deps = ProvisionDeps {
        hosting: hosting.clone(),
        vcs: vcs.clone(),
        flake: flake.clone(),
        config: Config::default(),
    };
    Harness {
        hosting,
        vcs,
        flake,
        deps,
    }
}

async fn run(harness: &Harness) -> (RunReport, SagaState) {
    let dispatcher = Dispatcher::new(build_registry(), ProvisionReducer);
    let mut state = SagaState::new(request());
    let root = Envelope::root(ProvisionEvent::NewDomainRequested { request: request() });
    let report = dispatcher
        .dispatch(root, &mut state, &harness.deps)
        .await
        .unwrap();
    (report, state)
}

#[tokio::test]
async fn full_run_reaches_new_domain_created() {
    let h = harness(MockHosting::default());
    let (report, state) = run(&h).await;

    assert!(!report.failed(), "failures: {:?}", report.failures);
    assert!(report.reached(NEW_DOMAIN_CREATED));
    assert!(report.terminals.contains(&NEW_DOMAIN_CREATED.to_string()));

    assert_eq!(state.context.url().unwrap(), "https://github.com/acme/widgets");
    assert_eq!(
        state.context.def_url().unwrap(),
        "https://github.com/acme-def/widgets"
    );

    // Both repositories were created, in order.
    assert_eq!(
        *h.hosting.calls.lock().unwrap(),
        vec!["acme/widgets", "acme-def/widgets"]
    );
}

#[tokio::test]
async fn full_run_writes_the_generated_files() {
    let h = harness(MockHosting::default());
    let (_, state) = run(&h).await;

    let domain = PathBuf::from(state.context.repo_folder().unwrap());
    for file in ["README.md", ".gitattributes", ".gitignore"] {
        assert!(domain.join(file).is_file(), "missing {file}");
    }
    // One __init__.py per package segment.
    assert!(domain.join("acme/__init__.py").is_file());
    assert!(domain.join("acme/widgets/__init__.py").is_file());

    let definition = PathBuf::from(state.context.def_repo_folder().unwrap());
    for file in ["README.md", "flake.nix", "pyproject.toml.template"] {
        assert!(definition.join(file).is_file(), "missing {file}");
    }

    let readme = std::fs::read_to_string(domain.join("README.md")).unwrap();
    assert!(readme.contains("https://github.com/acme-def/widgets"));
    let pyproject = std::fs::read_to_string(definition.join("pyproject.toml.template")).unwrap();
    assert!(pyproject.contains(r#"include = "acme""#));
}

#[tokio::test]
async fn joins_absorb_all_branches_and_fire_once() {
    let h = harness(MockHosting::default());
    let (report, state) = run(&h).await;

    // All three file branches request the commit, but it runs once.
    assert_eq!(report.count(DOMAIN_COMMIT_REQUESTED), 3);
    assert_eq!(report.count(DOMAIN_CHANGES_COMMITTED), 1);
    let domain = state.context.repo_folder().unwrap();
    let commits: Vec<_> = h
        .vcs
        .ops_starting_with("commit")
        .into_iter()
        .filter(|op| op.contains(domain))
        .collect();
    assert_eq!(commits.len(), 1);

    // Same shape on the definition side.
    assert_eq!(report.count(DEFINITION_FLAKE_LOCK_REQUESTED), 3);
    assert_eq!(report.count(DEFINITION_FLAKE_LOCK_CREATED), 1);
}

#[tokio::test]
async fn tags_and_pushes_use_context_version_and_configured_remote() {
    let h = harness(MockHosting::default());
    let (_, _) = run(&h).await;

    let tags = h.vcs.ops_starting_with("tag");
    assert_eq!(tags.len(), 2);
    assert!(tags.iter().all(|op| op.contains("0.0.0")));

    let pushes = h.vcs.ops_starting_with("push ");
    assert_eq!(pushes.len(), 2);
    assert!(pushes.iter().all(|op| op.ends_with("main origin")));
    assert_eq!(h.vcs.ops_starting_with("push-tags").len(), 2);
}

#[tokio::test]
async fn flake_is_pinned_to_the_domain_tarball() {
    let h = harness(MockHosting::default());
    let (report, _) = run(&h).await;

    assert!(report.reached(DEFINITION_SHA256_UPDATED));
    let calls = h.flake.calls.lock().unwrap();
    assert!(calls
        .iter()
        .any(|c| c == "fetch https://github.com/acme/widgets 0.0.0"));
    assert!(calls
        .iter()
        .any(|c| c.starts_with(&format!("patch {}", MockFlake::HASH))));
}

#[tokio::test]
async fn reemitted_repository_request_is_skipped_not_recreated() {
    use domainsmith_engine::HandlerFuture;

    // A rogue extra handler that re-requests the domain repository after the
    // push, as a crashed-and-replayed listener would.
    fn reemit_repository_request<'a>(
        _event: &'a Envelope<ProvisionEvent>,
        _state: &'a SagaState,
        _deps: &'a ProvisionDeps,
    ) -> HandlerFuture<'a, ProvisionEvent> {
        Box::pin(async move { Ok(vec![ProvisionEvent::DomainRepositoryRequested]) })
    }

    let mut registry = build_registry();
    registry.on(DOMAIN_CHANGES_PUSHED, reemit_repository_request);

    let h = harness(MockHosting::default());
    let dispatcher = Dispatcher::new(registry, ProvisionReducer);
    let mut state = SagaState::new(request());
    let root = Envelope::root(ProvisionEvent::NewDomainRequested { request: request() });
    let report = dispatcher
        .dispatch(root, &mut state, &h.deps)
        .await
        .unwrap();

    // The duplicate step was skipped via lineage, so the hosting client was
    // only ever called once per repository.
    assert!(report
        .skipped
        .contains(&DOMAIN_REPOSITORY_REQUESTED.to_string()));
    assert_eq!(report.count(DOMAIN_REPOSITORY_REQUESTED), 1);
    assert_eq!(
        *h.hosting.calls.lock().unwrap(),
        vec!["acme/widgets", "acme-def/widgets"]
    );
    assert!(report.reached(NEW_DOMAIN_CREATED));
}

#[tokio::test]
async fn hosting_failure_halts_the_run_before_any_clone() {
    let h = harness(MockHosting {
        fail: true,
        ..MockHosting::default()
    });
    let (report, _) = run(&h).await;

    assert!(report.failed());
    assert_eq!(report.failures[0].event_type, DOMAIN_REPOSITORY_REQUESTED);
    assert!(!report.reached(DOMAIN_REPOSITORY_CREATED));
    assert!(!report.reached(DEFINITION_REPOSITORY_REQUESTED));
    assert!(!report.reached(NEW_DOMAIN_CREATED));
    assert!(h.vcs.ops_starting_with("clone").is_empty());
}
