//! CredHub module: credential types and the session used to fetch them.
//!
//! This module provides:
//! - The `Credential` type returned by the data API (`credential`)
//! - `CredHubClient`, a UAA-authenticated HTTPS session (`client`)
//! - The `CredentialSource` trait the run loop fetches through

pub mod client;
pub mod credential;

pub use client::CredHubClient;
pub use credential::Credential;

use crate::errors::Result;

/// Anything that can look up the latest version of a credential by path.
pub trait CredentialSource {
    fn latest_version(&self, path: &str) -> Result<Credential>;
}
