//! Event identity and causal lineage.

use serde_json::Value;
use uuid::Uuid;

/// Events carry a type string and know how to serialize their payload.
pub trait SagaEvent: Clone + Send + Sync + 'static {
    /// The stable type string the registry dispatches on.
    fn event_type(&self) -> &'static str;

    /// Serialize this event's payload for logs and the wire codec.
    fn to_payload(&self) -> Value;
}

/// An event plus its causal identity.
///
/// Identity is minted at construction unless the envelope is reconstructed
/// from a wire representation, in which case the external id is preserved
/// verbatim. Lineage is append-only: a successor's lineage is
/// `[predecessor.id] + predecessor.lineage`, never rewritten. Two envelopes
/// with equal payloads but different lineage are distinct events — only
/// identity equality deduplicates.
#[derive(Debug, Clone)]
pub struct Envelope<E> {
    id: Uuid,
    lineage: Vec<Uuid>,
    pub body: E,
}

impl<E: SagaEvent> Envelope<E> {
    /// A root event: fresh id, empty lineage.
    pub fn root(body: E) -> Self {
        Self {
            id: Uuid::new_v4(),
            lineage: Vec::new(),
            body,
        }
    }

    /// A successor of `self`: fresh id, lineage extended by `self.id`.
    pub fn successor(&self, body: E) -> Self {
        let mut lineage = Vec::with_capacity(self.lineage.len() + 1);
        lineage.push(self.id);
        lineage.extend_from_slice(&self.lineage);
        Self {
            id: Uuid::new_v4(),
            lineage,
            body,
        }
    }

    /// Rebuild an envelope that arrived over the signal bus. The originating
    /// id and lineage are kept as-is instead of minting new ones.
    pub fn reconstruct(id: Uuid, lineage: Vec<Uuid>, body: E) -> Self {
        Self { id, lineage, body }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn lineage(&self) -> &[Uuid] {
        &self.lineage
    }

    pub fn event_type(&self) -> &'static str {
        self.body.event_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Ping;

    impl SagaEvent for Ping {
        fn event_type(&self) -> &'static str {
            "ping"
        }

        fn to_payload(&self) -> Value {
            Value::Null
        }
    }

    #[test]
    fn root_has_empty_lineage() {
        let root = Envelope::root(Ping);
        assert!(root.lineage().is_empty());
    }

    #[test]
    fn lineage_accumulates_never_truncates() {
        let root = Envelope::root(Ping);
        let child = root.successor(Ping);
        let grandchild = child.successor(Ping);

        assert_eq!(child.lineage(), &[root.id()]);
        assert_eq!(grandchild.lineage(), &[child.id(), root.id()]);
    }

    #[test]
    fn same_payload_different_lineage_are_distinct() {
        let a = Envelope::root(Ping);
        let b = Envelope::root(Ping);
        assert_eq!(a.body, b.body);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn reconstruct_preserves_external_identity() {
        let id = Uuid::new_v4();
        let lineage = vec![Uuid::new_v4(), Uuid::new_v4()];
        let env = Envelope::reconstruct(id, lineage.clone(), Ping);
        assert_eq!(env.id(), id);
        assert_eq!(env.lineage(), lineage.as_slice());
    }
}
