//! CLI module: Clap argument parser, output helpers, and the fetch loop.

pub mod output;
pub mod run;

use clap::Parser;

/// Fetch secrets from CredHub and expose them as workflow step outputs.
///
/// Required inputs are optional at the parser level so that a missing or
/// empty value is reported the same way whether it came from a flag or
/// the environment.
#[derive(Parser, Debug)]
#[command(
    name = "credhub-secrets",
    about = "Fetch CredHub secrets and expose them as workflow step outputs",
    version
)]
pub struct Cli {
    /// Set the CredHub API target where commands are sent
    #[arg(long, env = "CREDHUB_API")]
    pub api: Option<String>,

    /// Authentication username
    #[arg(long, env = "CREDHUB_USERNAME")]
    pub username: Option<String>,

    /// Authentication password
    #[arg(long, env = "CREDHUB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Newline-separated list of secrets to fetch, one NAME:/path/to/secret[.key] per line
    #[arg(long, env = "CREDHUB_GET")]
    pub get: Option<String>,

    /// Disable TLS validation (not recommended)
    #[arg(
        long = "insecureSkipTLSValidation",
        env = "CREDHUB_INSECURE_SKIP_TLS_VALIDATION",
        default_value = "false"
    )]
    pub insecure_skip_tls_validation: String,

    /// Trusted CA certificate (x509), as a file path or inline PEM
    #[arg(long, env = "CREDHUB_CA")]
    pub ca: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
