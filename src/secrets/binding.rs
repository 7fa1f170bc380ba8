//! Workflow-command output binding (`::set-output name=NAME::VALUE`).

use std::fmt;

/// Escape a value for the single-line workflow command protocol.
///
/// `%` is replaced first so the sequences introduced for line breaks are
/// not encoded twice. Applying this to an already escaped string encodes
/// it again.
pub fn escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\n', "%0A")
        .replace('\r', "%0D")
}

/// A name/value pair ready to be written to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub name: String,
    pub value: String,
}

impl OutputLine {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::set-output name={}::{}", self.name, escape(&self.value))
    }
}
