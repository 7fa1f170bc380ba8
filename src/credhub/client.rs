//! Blocking CredHub client authenticated through UAA.
//!
//! Session setup mirrors the CredHub CLI:
//!
//! ```text
//! GET  {api}/info                 -> auth-server.url
//! POST {uaa}/oauth/token          -> access_token   (password grant, client "credhub_cli")
//! GET  {api}/api/v1/data?name=..  -> latest credential version
//! ```

use std::fs;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use ureq::tls::{PemItem, RootCerts, TlsConfig};
use ureq::Agent;
use zeroize::Zeroizing;

use super::credential::{Credential, DataResponse};
use super::CredentialSource;
use crate::config::Config;
use crate::errors::{Error, Result};

/// OAuth client the CredHub CLI registers with UAA (public, empty secret).
const CLIENT_ID: &str = "credhub_cli";
const CLIENT_SECRET: &str = "";

#[derive(Deserialize)]
struct InfoResponse {
    #[serde(rename = "auth-server")]
    auth_server: AuthServer,
}

#[derive(Deserialize)]
struct AuthServer {
    url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Error body returned by CredHub (`error`) and UAA (`error_description`).
#[derive(Deserialize, Default)]
struct ErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

/// An authenticated CredHub session.
pub struct CredHubClient {
    agent: Agent,
    api: String,
    access_token: Zeroizing<String>,
}

impl CredHubClient {
    /// Connect to CredHub and obtain an access token.
    ///
    /// Any failure here is fatal for the run and reported as `Error::Auth`
    /// (or `Error::Tls` for an unusable CA).
    pub fn connect(config: &Config) -> Result<Self> {
        let agent = build_agent(config.insecure_skip_tls_validation, config.ca.as_deref())?;
        let api = config.api.trim_end_matches('/').to_string();

        let info: InfoResponse = get_json(&agent, &format!("{api}/info"), None)
            .map_err(|reason| Error::Auth(format!("failed to query {api}/info: {reason}")))?;
        let uaa = info.auth_server.url.trim_end_matches('/').to_string();
        debug!(uaa = %uaa, "discovered auth server");

        let access_token = password_grant(&agent, &uaa, &config.username, &config.password)
            .map_err(|reason| Error::Auth(format!("{uaa}/oauth/token: {reason}")))?;
        debug!("obtained access token");

        Ok(Self {
            agent,
            api,
            access_token,
        })
    }
}

impl CredentialSource for CredHubClient {
    fn latest_version(&self, path: &str) -> Result<Credential> {
        let url = format!("{}/api/v1/data", self.api);
        let fetch_err = |reason: String| Error::Fetch {
            path: path.to_string(),
            reason,
        };

        let resp: DataResponse = get_json(
            &self.agent,
            &url,
            Some((path, self.access_token.as_str())),
        )
        .map_err(fetch_err)?;

        resp.data
            .into_iter()
            .next()
            .ok_or_else(|| fetch_err("credential has no versions".to_string()))
    }
}

fn build_agent(skip_verification: bool, ca: Option<&str>) -> Result<Agent> {
    let mut tls = TlsConfig::builder().disable_verification(skip_verification);
    if let Some(ca) = ca {
        let pem = load_ca(ca)?;
        let certs = parse_certificates(pem.as_bytes())?;
        tls = tls.root_certs(RootCerts::new_with_certs(&certs));
    }

    let config = Agent::config_builder()
        .tls_config(tls.build())
        .http_status_as_error(false)
        .build();

    Ok(Agent::new_with_config(config))
}

/// Read CA material given either inline PEM or a path to a PEM file.
pub(crate) fn load_ca(ca: &str) -> Result<String> {
    if ca.trim_start().starts_with("-----BEGIN") {
        return Ok(ca.to_string());
    }
    fs::read_to_string(ca).map_err(|e| Error::Tls(format!("failed to read {ca}: {e}")))
}

fn parse_certificates(pem: &[u8]) -> Result<Vec<ureq::tls::Certificate<'static>>> {
    let mut certs = Vec::new();
    for item in ureq::tls::parse_pem(pem) {
        match item.map_err(|e| Error::Tls(e.to_string()))? {
            PemItem::Certificate(cert) => certs.push(cert.to_owned()),
            _ => continue,
        }
    }

    if certs.is_empty() {
        return Err(Error::Tls("no certificates found".to_string()));
    }
    Ok(certs)
}

/// GET a JSON document. With `credential` set, queries the data API for
/// that name using the bearer token.
fn get_json<T: DeserializeOwned>(
    agent: &Agent,
    url: &str,
    credential: Option<(&str, &str)>,
) -> std::result::Result<T, String> {
    let mut request = agent.get(url).header("Accept", "application/json");
    if let Some((name, token)) = credential {
        request = request
            .query("name", name)
            .query("current", "true")
            .header("Authorization", &format!("Bearer {token}"));
    }

    let mut resp = request.call().map_err(|e| e.to_string())?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.body_mut().read_to_string().unwrap_or_default();
        return Err(describe_failure(status.as_u16(), &body));
    }

    resp.body_mut()
        .read_json::<T>()
        .map_err(|e| format!("unexpected response: {e}"))
}

fn password_grant(
    agent: &Agent,
    uaa: &str,
    username: &str,
    password: &str,
) -> std::result::Result<Zeroizing<String>, String> {
    let mut resp = agent
        .post(&format!("{uaa}/oauth/token"))
        .header("Accept", "application/json")
        .send_form([
            ("grant_type", "password"),
            ("response_type", "token"),
            ("client_id", CLIENT_ID),
            ("client_secret", CLIENT_SECRET),
            ("username", username),
            ("password", password),
        ])
        .map_err(|e| e.to_string())?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.body_mut().read_to_string().unwrap_or_default();
        return Err(describe_failure(status.as_u16(), &body));
    }

    let token: TokenResponse = resp
        .body_mut()
        .read_json()
        .map_err(|e| format!("unexpected response: {e}"))?;
    Ok(Zeroizing::new(token.access_token))
}

/// Render a non-2xx response, preferring the server's own error message.
fn describe_failure(status: u16, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    match parsed.error_description.or(parsed.error) {
        Some(message) => format!("HTTP {status}: {message}"),
        None => format!("HTTP {status}"),
    }
}
