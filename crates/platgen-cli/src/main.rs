//! # platgen
//!
//! Scaffolds a Spring Cloud microservice platform.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` into the environment.
//! 2. Parse CLI arguments (`--help` / `--version` print and exit 0).
//! 3. Initialise the tracing subscriber (logging).
//! 4. Check that `git` can be run.
//! 5. Resolve configuration (defaults, environment, file, flags).
//! 6. Run the scaffold command through the [`OutputManager`].
//! 7. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success, help or version                 |
//! |  1   | Internal / system error (I/O, git)       |
//! |  2   | User error (flags, configuration)        |
//! |  3   | Required tool not found (`git`)          |
//! |  5   | Remote generation failed                 |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::Cli,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init. A missing
    // file is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    // clap reports help/version with exit code 0 and usage errors with 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;
    let output = OutputManager::new(&cli.global);
    match run(&cli, &output) {
        Ok(()) => {
            info!("platgen completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, output.supports_color()),
    }
}

/// Check for `git`, resolve configuration and run the pipeline.
#[instrument(skip_all)]
fn run(cli: &Cli, output: &OutputManager) -> CliResult<()> {
    let service = commands::scaffold::service()?;
    service.preflight()?;

    let environment = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
    let configuration = config::load(cli, environment)?;
    debug!(?configuration, "Configuration resolved");

    commands::scaffold::execute(&service, &configuration, output)
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();

    // Written to stderr so the message appears even when stdout is
    // redirected. Colour only on a terminal and never under --no-color.
    let msg = if color && std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
