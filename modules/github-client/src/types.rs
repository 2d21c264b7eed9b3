use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct CreateRepositoryRequest {
    pub name: String,
    pub private: bool,
    pub auto_init: bool,
}

/// The slice of the creation response the saga cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRepository {
    pub full_name: String,
    pub html_url: String,
    pub clone_url: String,
}
