//! Parser for the `--get` request list.
//!
//! Each line has the form `NAME:PATH[.KEY]`. The text after the last
//! period is the key to pull out of a structured credential, so a CredHub
//! path that itself contains a period cannot be addressed without a key.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::errors::{Error, Result};

/// One secret to fetch, parsed from a single request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRequest {
    /// Output name the value is bound to (ASCII `[0-9A-Za-z_]+`).
    pub name: String,

    /// CredHub credential path, exactly as written.
    pub path: String,

    /// Optional key inside a structured credential.
    pub key: Option<String>,
}

impl fmt::Display for SecretRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.path)?;
        if let Some(key) = &self.key {
            write!(f, ".{key}")?;
        }
        Ok(())
    }
}

fn request_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // `R` makes `$` and `.` treat `\r\n` as a line break. Names are
        // ASCII word characters only.
        Regex::new(r"(?mR)(?P<name>(?-u:\w)+):[^\S\r\n]*(?P<path>.+?)(?:\.(?P<key>[^.\r\n]*))?$")
            .expect("request pattern is valid")
    })
}

/// Parse every request line in `input`.
///
/// Lines that don't match are skipped. Fails only when nothing at all
/// could be parsed.
pub fn parse_requests(input: &str) -> Result<Vec<SecretRequest>> {
    let requests: Vec<SecretRequest> = request_pattern()
        .captures_iter(input)
        .filter_map(|caps| {
            let name = caps.name("name")?.as_str();
            let path = caps.name("path")?.as_str();
            if path.trim().is_empty() {
                return None;
            }
            let key = caps
                .name("key")
                .map(|k| k.as_str())
                .filter(|k| !k.is_empty());

            Some(SecretRequest {
                name: name.to_string(),
                path: path.to_string(),
                key: key.map(str::to_string),
            })
        })
        .collect();

    if requests.is_empty() {
        return Err(Error::NoRequests);
    }

    Ok(requests)
}
