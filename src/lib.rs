//! Fetch secrets from CredHub and expose them as CI step outputs.
//!
//! ```text
//! src/
//! ├── cli/        # Clap parser, console helpers, the fetch loop
//! ├── config/     # Validated, immutable run configuration
//! ├── credhub/    # Credential type, UAA-authenticated client
//! ├── secrets/    # Request parser, value extraction, output binding
//! └── errors.rs
//! ```

pub mod cli;
pub mod config;
pub mod credhub;
pub mod errors;
pub mod secrets;
