//! Wire codec for events published over the signal bus.
//!
//! The repository-lifecycle events (`saga:*`, the `domain:*`/`definition:*`
//! repository Requested/Created pairs, and the three domain file
//! Requested/Created pairs) are announced to other processes; the purely
//! internal plumbing events (clone, commit, tag, push, flake steps) stay
//! inside one run. Every published event shares one wire body: an ordered
//! list of strings — the six request fields, the Context as a JSON object
//! with kebab-case keys, the event id, and the lineage as a JSON array of
//! ids.

use domainsmith_common::{Context, DomainRequest};
use domainsmith_engine::Envelope;
use thiserror::Error;
use uuid::Uuid;

use crate::events::{event_type, ProvisionEvent};

const WIRE_FIELDS: usize = 9;

/// The event types announced on the bus.
const BUS_TYPES: &[&str] = &[
    event_type::NEW_DOMAIN_REQUESTED,
    event_type::NEW_DOMAIN_CREATED,
    event_type::DOMAIN_REPOSITORY_REQUESTED,
    event_type::DOMAIN_REPOSITORY_CREATED,
    event_type::DOMAIN_README_REQUESTED,
    event_type::DOMAIN_README_CREATED,
    event_type::DOMAIN_GITATTRIBUTES_REQUESTED,
    event_type::DOMAIN_GITATTRIBUTES_CREATED,
    event_type::DOMAIN_GITIGNORE_REQUESTED,
    event_type::DOMAIN_GITIGNORE_CREATED,
    event_type::DEFINITION_REPOSITORY_REQUESTED,
    event_type::DEFINITION_REPOSITORY_CREATED,
];

#[derive(Debug, Error)]
pub enum BusError {
    #[error("event type `{0}` does not cross the bus")]
    UnsupportedType(String),

    #[error("wire body has {0} fields, expected {WIRE_FIELDS}")]
    WrongArity(usize),

    #[error("invalid event id: {0}")]
    BadId(#[from] uuid::Error),

    #[error("invalid JSON field `{field}`: {source}")]
    BadJson {
        field: &'static str,
        source: serde_json::Error,
    },
}

/// An event decoded from the bus: the envelope (with the sender's id and
/// lineage preserved) plus the request and Context it carried.
#[derive(Debug)]
pub struct BusSignal {
    pub envelope: Envelope<ProvisionEvent>,
    pub request: DomainRequest,
    pub context: Context,
}

/// Encode an event for publication.
pub fn encode(
    envelope: &Envelope<ProvisionEvent>,
    request: &DomainRequest,
    context: &Context,
) -> Result<Vec<String>, BusError> {
    let event_type = envelope.event_type();
    if !BUS_TYPES.contains(&event_type) {
        return Err(BusError::UnsupportedType(event_type.to_string()));
    }

    let context_json = serde_json::to_string(context).map_err(|source| BusError::BadJson {
        field: "context",
        source,
    })?;
    let lineage_json =
        serde_json::to_string(envelope.lineage()).map_err(|source| BusError::BadJson {
            field: "lineage",
            source,
        })?;

    Ok(vec![
        request.org.clone(),
        request.name.clone(),
        request.description.clone(),
        request.package.clone(),
        request.github_token.clone(),
        request.gpg_key_id.clone(),
        context_json,
        envelope.id().to_string(),
        lineage_json,
    ])
}

/// Decode an event received from the bus.
///
/// The sender's event id and lineage are preserved verbatim so causal chains
/// survive the process boundary.
pub fn decode(event_type: &str, body: &[String]) -> Result<BusSignal, BusError> {
    if body.len() != WIRE_FIELDS {
        return Err(BusError::WrongArity(body.len()));
    }

    let request = DomainRequest {
        org: body[0].clone(),
        name: body[1].clone(),
        description: body[2].clone(),
        package: body[3].clone(),
        github_token: body[4].clone(),
        gpg_key_id: body[5].clone(),
    };
    let context: Context = serde_json::from_str(&body[6]).map_err(|source| BusError::BadJson {
        field: "context",
        source,
    })?;
    let id: Uuid = body[7].parse()?;
    let lineage: Vec<Uuid> =
        serde_json::from_str(&body[8]).map_err(|source| BusError::BadJson {
            field: "lineage",
            source,
        })?;

    let event = match event_type {
        event_type::NEW_DOMAIN_REQUESTED => ProvisionEvent::NewDomainRequested {
            request: request.clone(),
        },
        event_type::NEW_DOMAIN_CREATED => ProvisionEvent::NewDomainCreated,
        event_type::DOMAIN_REPOSITORY_REQUESTED => ProvisionEvent::DomainRepositoryRequested,
        event_type::DOMAIN_REPOSITORY_CREATED => ProvisionEvent::DomainRepositoryCreated,
        event_type::DOMAIN_README_REQUESTED => ProvisionEvent::DomainRepositoryReadmeRequested,
        event_type::DOMAIN_README_CREATED => ProvisionEvent::DomainRepositoryReadmeCreated,
        event_type::DOMAIN_GITATTRIBUTES_REQUESTED => {
            ProvisionEvent::DomainRepositoryGitattributesRequested
        }
        event_type::DOMAIN_GITATTRIBUTES_CREATED => {
            ProvisionEvent::DomainRepositoryGitattributesCreated
        }
        event_type::DOMAIN_GITIGNORE_REQUESTED => {
            ProvisionEvent::DomainRepositoryGitignoreRequested
        }
        event_type::DOMAIN_GITIGNORE_CREATED => ProvisionEvent::DomainRepositoryGitignoreCreated,
        event_type::DEFINITION_REPOSITORY_REQUESTED => {
            ProvisionEvent::DefinitionRepositoryRequested
        }
        event_type::DEFINITION_REPOSITORY_CREATED => ProvisionEvent::DefinitionRepositoryCreated,
        other => return Err(BusError::UnsupportedType(other.to_string())),
    };

    Ok(BusSignal {
        envelope: Envelope::reconstruct(id, lineage, event),
        request,
        context,
    })
}
