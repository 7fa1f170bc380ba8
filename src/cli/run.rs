//! The fetch loop: parse requests, fetch each credential, emit outputs.

use std::io::Write;

use tracing::{debug, error, info};

use crate::cli::output;
use crate::config::Config;
use crate::credhub::{CredHubClient, CredentialSource};
use crate::errors::{Error, Result};
use crate::secrets::{extract, parse_requests, OutputLine, SecretRequest};

/// What happened to a single request.
#[derive(Debug)]
pub enum ItemOutcome {
    /// An output line was written for this name.
    Emitted { name: String },

    /// The request failed; nothing was written for it.
    Failed { name: String, error: Error },
}

/// Per-request results of a run, in request order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl RunReport {
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ItemOutcome::Failed { .. }))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Connect to CredHub, then fetch and print every requested secret to stdout.
pub fn execute(config: &Config) -> Result<RunReport> {
    let client = CredHubClient::connect(config)?;

    info!("Parsing tokens");
    let requests = parse_requests(&config.get)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&requests, &client, &mut out)
}

/// Process `requests` in order, writing one line per successful request.
///
/// A failed fetch or extraction is reported on stderr and recorded in the
/// report; the remaining requests still run. Only a failure to write to
/// `out` aborts the loop.
pub fn run<S, W>(requests: &[SecretRequest], source: &S, out: &mut W) -> Result<RunReport>
where
    S: CredentialSource + ?Sized,
    W: Write,
{
    let mut report = RunReport::default();

    for request in requests {
        match process(request, source) {
            Ok(line) => {
                writeln!(out, "{line}")?;
                out.flush()?;
                report.outcomes.push(ItemOutcome::Emitted {
                    name: request.name.clone(),
                });
            }
            Err(err) if err.is_per_item() => {
                error!(
                    name = %request.name,
                    path = %request.path,
                    error = %err,
                    "failed to fetch secret"
                );
                output::error(&format!("{}: {err}", request.name));
                report.outcomes.push(ItemOutcome::Failed {
                    name: request.name.clone(),
                    error: err,
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}

fn process<S>(request: &SecretRequest, source: &S) -> Result<OutputLine>
where
    S: CredentialSource + ?Sized,
{
    info!(name = %request.name, path = %request.path, "Fetching credential");
    let credential = source.latest_version(&request.path)?;
    debug!(
        path = %request.path,
        kind = %credential.kind,
        id = %credential.id,
        created = ?credential.version_created_at,
        "fetched latest version"
    );

    if let Some(key) = &request.key {
        info!(key = %key, name = %request.name, "Getting key");
    }
    let value = extract(&credential, request.key.as_deref())?;

    Ok(OutputLine::new(&request.name, value))
}
