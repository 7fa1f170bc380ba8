use thiserror::Error;

/// All errors that can occur while fetching CredHub secrets.
#[derive(Debug, Error)]
pub enum Error {
    // --- Config errors ---
    #[error("Missing required \"{0}\" input")]
    MissingInput(&'static str),

    // --- CredHub session errors ---
    #[error("unable to authenticate: {0}")]
    Auth(String),

    #[error("invalid CA certificate: {0}")]
    Tls(String),

    // --- Request parsing errors ---
    #[error("No credentials to fetch")]
    NoRequests,

    // --- Per-item errors ---
    #[error("failed while fetching credential {path:?}: {reason}")]
    Fetch { path: String, reason: String },

    #[error("could not find key {key:?} in credential {path:?}")]
    KeyNotFound { key: String, path: String },

    #[error("credential {path:?} is not a mapping, cannot get key {key:?}")]
    NotAMapping { key: String, path: String },

    // --- Serialization errors ---
    #[error("failed while serializing credential: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error only affects a single secret request.
    ///
    /// Per-item errors are reported and the run continues; everything
    /// else aborts the process.
    pub fn is_per_item(&self) -> bool {
        matches!(
            self,
            Error::Fetch { .. }
                | Error::KeyNotFound { .. }
                | Error::NotAMapping { .. }
                | Error::Serialization(_)
        )
    }
}

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;
