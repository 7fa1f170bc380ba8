//! Credential type returned by the CredHub data API.
//!
//! Only the fields this tool reads are modelled. `value` is left as raw
//! JSON because its shape depends on the credential type: `value` and
//! `password` credentials hold a string, while `json`, `user`,
//! `certificate`, `rsa` and `ssh` credentials hold an object.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// A single version of a CredHub credential.
#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    /// Unique id of this version.
    #[serde(default)]
    pub id: String,

    /// Full credential name (e.g. "/concourse/main/db").
    pub name: String,

    /// CredHub credential type ("value", "json", "password", ...).
    #[serde(rename = "type", default)]
    pub kind: String,

    /// The secret payload: a scalar string or a structured mapping.
    pub value: Value,

    /// When this version was created.
    #[serde(default)]
    pub version_created_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Build a credential from a name and value, leaving metadata empty.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            kind: String::new(),
            value,
            version_created_at: None,
        }
    }
}

/// Envelope of `GET /api/v1/data`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataResponse {
    #[serde(default)]
    pub data: Vec<Credential>,
}
