use std::fmt;

use zeroize::Zeroizing;

use crate::cli::Cli;
use crate::errors::{Error, Result};

/// Immutable run configuration built from the command line.
///
/// Everything the session and the fetch loop need is captured here, so
/// nothing downstream reads flags or the environment directly.
#[derive(Clone)]
pub struct Config {
    /// CredHub API endpoint (e.g. "https://credhub.example.com:8844").
    pub api: String,

    /// UAA username.
    pub username: String,

    /// UAA password, wiped from memory on drop.
    pub password: Zeroizing<String>,

    /// Raw `--get` request list, parsed later by the request parser.
    pub get: String,

    /// Skip TLS certificate verification.
    pub insecure_skip_tls_validation: bool,

    /// Trusted CA: a file path or inline PEM.
    pub ca: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api", &self.api)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("get", &self.get)
            .field("insecure_skip_tls_validation", &self.insecure_skip_tls_validation)
            .field("ca", &self.ca)
            .finish()
    }
}

// ── Implementation ───────────────────────────────────────────────────

impl Config {
    /// Validate the parsed CLI into a `Config`.
    ///
    /// Required inputs are checked in the order `api`, `username`,
    /// `password`, `get`; the first missing (or empty) one is reported.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api = required(&cli.api, "api")?;
        let username = required(&cli.username, "username")?;
        let password = Zeroizing::new(required(&cli.password, "password")?);
        let get = required(&cli.get, "get")?;

        Ok(Self {
            api,
            username,
            password,
            get,
            insecure_skip_tls_validation: parse_flag(&cli.insecure_skip_tls_validation),
            ca: cli.ca.clone().filter(|ca| !ca.is_empty()),
        })
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.clone()),
        _ => Err(Error::MissingInput(name)),
    }
}

/// Only the literal `true` (any case) enables a string flag.
fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a `Cli` directly so `CREDHUB_*` variables in the environment
    /// can't leak into the test.
    fn cli(api: &str, username: &str, password: &str, get: &str) -> Cli {
        let input = |v: &str| Some(v.to_string());
        Cli {
            api: input(api),
            username: input(username),
            password: input(password),
            get: input(get),
            insecure_skip_tls_validation: "false".to_string(),
            ca: None,
            verbose: false,
        }
    }

    fn full() -> Cli {
        cli("https://credhub:8844/", "admin", "hunter2", "FOO:/creds/db")
    }

    #[test]
    fn builds_config_from_full_cli() {
        let config = Config::from_cli(&full()).unwrap();
        assert_eq!(config.api, "https://credhub:8844/");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password.as_str(), "hunter2");
        assert_eq!(config.get, "FOO:/creds/db");
        assert!(!config.insecure_skip_tls_validation);
        assert!(config.ca.is_none());
    }

    #[test]
    fn missing_inputs_reported_in_order() {
        let mut args = full();
        args.get = None;
        args.password = None;
        args.username = None;
        args.api = None;
        let err = Config::from_cli(&args).unwrap_err();
        assert!(matches!(err, Error::MissingInput("api")));

        args.api = Some("https://x".into());
        let err = Config::from_cli(&args).unwrap_err();
        assert!(matches!(err, Error::MissingInput("username")));

        args.username = Some("u".into());
        let err = Config::from_cli(&args).unwrap_err();
        assert!(matches!(err, Error::MissingInput("password")));

        args.password = Some("p".into());
        let err = Config::from_cli(&args).unwrap_err();
        assert!(matches!(err, Error::MissingInput("get")));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let err = Config::from_cli(&cli("", "admin", "hunter2", "FOO:/a")).unwrap_err();
        assert!(matches!(err, Error::MissingInput("api")));

        let err = Config::from_cli(&cli("https://x", "admin", "hunter2", "")).unwrap_err();
        assert!(matches!(err, Error::MissingInput("get")));
    }

    #[test]
    fn skip_tls_only_for_true() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag("1"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn skip_tls_flag_reaches_config() {
        let mut args = full();
        args.insecure_skip_tls_validation = "true".into();
        assert!(Config::from_cli(&args).unwrap().insecure_skip_tls_validation);
    }

    #[test]
    fn debug_redacts_password() {
        let config = Config::from_cli(&full()).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn empty_ca_is_ignored() {
        let mut args = full();
        args.ca = Some(String::new());
        assert!(Config::from_cli(&args).unwrap().ca.is_none());

        args.ca = Some("/etc/ca.pem".into());
        assert_eq!(
            Config::from_cli(&args).unwrap().ca.as_deref(),
            Some("/etc/ca.pem")
        );
    }
}
