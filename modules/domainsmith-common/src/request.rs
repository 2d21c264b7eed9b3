//! The provisioning request that roots a saga run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the caller supplies for one "new domain" request. Immutable for
/// the lifetime of the run; derived facts live in the `Context` instead.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainRequest {
    /// Hosting organization of the domain repository.
    pub org: String,
    /// Name of the domain (and of both repositories).
    pub name: String,
    /// One-line description used in generated files.
    pub description: String,
    /// Dotted package identifier, e.g. `acme.widgets`.
    pub package: String,
    /// Hosting API credential.
    pub github_token: String,
    /// GnuPG key id used for signed commits.
    pub gpg_key_id: String,
}

// Manual Debug so the credential never lands in logs.
impl fmt::Debug for DomainRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainRequest")
            .field("org", &self.org)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("package", &self.package)
            .field("github_token", &"<redacted>")
            .field("gpg_key_id", &self.gpg_key_id)
            .finish()
    }
}

impl DomainRequest {
    /// Package path segments, e.g. `acme.widgets` → `["acme", "widgets"]`.
    pub fn package_segments(&self) -> Vec<&str> {
        self.package.split('.').filter(|s| !s.is_empty()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DomainRequest {
        DomainRequest {
            org: "acme".into(),
            name: "widgets".into(),
            description: "Widget domain".into(),
            package: "acme.widgets".into(),
            github_token: "ghp_secret".into(),
            gpg_key_id: "0xCAFE".into(),
        }
    }

    #[test]
    fn debug_redacts_the_token() {
        let rendered = format!("{:?}", request());
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn package_segments_split_on_dots() {
        assert_eq!(request().package_segments(), vec!["acme", "widgets"]);
    }
}
