use anyhow::{bail, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use domainsmith_common::{Config, DomainRequest};
use domainsmith_saga::provision;

/// Provision a new domain: a code repository and its Nix definition
/// repository, linked and pushed.
#[derive(Parser)]
#[command(name = "domainsmith", version)]
struct Args {
    /// Hosting organization of the domain repository.
    #[arg(long)]
    org: String,

    /// Name of the domain (and of both repositories).
    #[arg(long)]
    name: String,

    /// One-line description used in generated files.
    #[arg(long)]
    description: String,

    /// Dotted package identifier, e.g. `acme.widgets`.
    #[arg(long)]
    package: String,

    /// Hosting API credential.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// GnuPG key id used for signed commits.
    #[arg(long, env = "GPG_KEY_ID")]
    gpg_key_id: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("domainsmith=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let request = DomainRequest {
        org: args.org,
        name: args.name,
        description: args.description,
        package: args.package,
        github_token: args.github_token,
        gpg_key_id: args.gpg_key_id,
    };

    info!(org = request.org.as_str(), name = request.name.as_str(), "provisioning new domain");

    let outcome = provision(request, config).await?;

    for failure in &outcome.report.failures {
        error!(
            event_type = failure.event_type.as_str(),
            error = failure.error.as_str(),
            "step failed"
        );
    }

    if !outcome.completed() {
        bail!("provisioning did not complete");
    }

    info!(
        url = outcome.context.url()?,
        def_url = outcome.context.def_url()?,
        "new domain created"
    );
    Ok(())
}
