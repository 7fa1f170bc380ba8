use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use credhub_secrets::cli::{output, run, Cli};
use credhub_secrets::config::Config;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("CREDHUB_SECRETS_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("credhub_secrets=debug")
        } else {
            EnvFilter::new("credhub_secrets=info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    if config.insecure_skip_tls_validation {
        output::warning("TLS certificate validation is disabled");
    }

    match run::execute(&config) {
        Ok(report) if report.is_success() => {
            output::success(&format!("Fetched {} secret(s)", report.outcomes.len()));
        }
        Ok(report) => {
            output::error(&format!(
                "{} of {} secret(s) could not be fetched",
                report.failed_count(),
                report.outcomes.len()
            ));
            std::process::exit(1);
        }
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    }
}
