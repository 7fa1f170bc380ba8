//! Turn a fetched credential into the string that gets emitted.

use serde_json::Value;

use crate::credhub::Credential;
use crate::errors::{Error, Result};

/// Produce the output string for `credential`, optionally pulling out `key`.
///
/// Strings are emitted verbatim; every other JSON value is serialized
/// as compact JSON.
pub fn extract(credential: &Credential, key: Option<&str>) -> Result<String> {
    let Some(key) = key else {
        return render(&credential.value);
    };

    let map = credential
        .value
        .as_object()
        .ok_or_else(|| Error::NotAMapping {
            key: key.to_string(),
            path: credential.name.clone(),
        })?;

    let nested = map.get(key).ok_or_else(|| Error::KeyNotFound {
        key: key.to_string(),
        path: credential.name.clone(),
    })?;

    render(nested)
}

fn render(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Ok(serde_json::to_string(other)?),
    }
}
