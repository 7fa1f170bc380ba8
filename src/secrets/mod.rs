//! Secrets module: request parsing, value extraction and output binding.
//!
//! This module provides:
//! - `SecretRequest` and the `--get` list parser (`request`)
//! - Value extraction from fetched credentials (`extract`)
//! - Escaping and the `::set-output` line format (`binding`)

pub mod binding;
pub mod extract;
pub mod request;

// Re-export the most commonly used items.
pub use binding::{escape, OutputLine};
pub use extract::extract;
pub use request::{parse_requests, SecretRequest};
