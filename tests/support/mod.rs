//! Mock CredHub for integration tests.
//!
//! One `wiremock::MockServer` plays both CredHub and UAA: `/info` points
//! the auth server back at itself. Requests that miss every specific mock
//! fall through to low-priority error responses, the same bodies the real
//! servers send.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "hunter2";
pub const TOKEN: &str = "test-access-token";

/// Priority for catch-all responses (wiremock tries lower numbers first).
const FALLBACK: u8 = 10;

/// Start a CredHub that accepts `USERNAME`/`PASSWORD` and knows no credentials.
pub async fn start_credhub() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "app": {"name": "CredHub"},
            "auth-server": {"url": server.uri()}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("response_type=token"))
        .and(body_string_contains("client_id=credhub_cli"))
        .and(body_string_contains(format!("username={USERNAME}")))
        .and(body_string_contains(format!("password={PASSWORD}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TOKEN,
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "unauthorized",
            "error_description": "Bad credentials"
        })))
        .with_priority(FALLBACK)
        .mount(&server)
        .await;

    Mock::given(path("/api/v1/data"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "The request could not be completed because the credential does not exist or you do not have sufficient authorization."
        })))
        .with_priority(FALLBACK)
        .mount(&server)
        .await;

    server
}

/// Start a CredHub serving each `(name, value)` pair as a current credential.
pub async fn credhub_with(creds: Vec<(&str, Value)>) -> MockServer {
    let server = start_credhub().await;
    for (name, value) in creds {
        let kind = if value.is_string() { "value" } else { "json" };
        mount_versions(
            &server,
            name,
            json!([{
                "id": "67fc3def-bbfb-4953-83f8-4ab0682ad675",
                "name": name,
                "type": kind,
                "value": value,
                "version_created_at": "2019-02-01T20:37:52Z"
            }]),
        )
        .await;
    }
    server
}

/// Answer the current-version lookup for `name` with `versions` as `data`.
///
/// Only matches authenticated requests that ask for the current version.
pub async fn mount_versions(server: &MockServer, name: &str, versions: Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/data"))
        .and(query_param("name", name))
        .and(query_param("current", "true"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": versions })))
        .mount(server)
        .await;
}
