use std::process;

use tracing_subscriber::EnvFilter;

use check_haproxy::cli::Cli;
use check_haproxy::core::stats::{evaluate, parse_stats, select_rows};
use check_haproxy::{CheckError, CheckOutcome, CheckStatus};

fn main() {
    init_logging();

    let cli = Cli::parse_args();
    let outcome = run(&cli)
        .unwrap_or_else(|err| CheckOutcome::new(CheckStatus::Unknown, err.to_string()));

    println!("{}: {}", outcome.status, outcome.message);
    process::exit(outcome.status.exit_code());
}

fn run(cli: &Cli) -> Result<CheckOutcome, CheckError> {
    // Policy problems must surface before any network I/O happens.
    let policy = cli.policy()?;

    let payload = cli.endpoint().fetch()?;
    let rows = parse_stats(&payload);
    let selected = select_rows(rows, &policy);
    Ok(evaluate(&selected, &policy))
}

/// Diagnostics go to stderr behind RUST_LOG; stdout carries only the result
/// line monitoring systems consume.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}
