//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the
//! reelscript binary. Handlers return the process exit code; an `Err` is
//! reserved for setup failures such as a missing API key.

mod commands;
mod context;
mod generate;
mod interactive;
mod options;
mod refine;
mod serve;

pub use commands::{BriefArgs, Cli, Commands};
pub use context::Context;
pub use generate::run_generate;
pub use interactive::run_interactive;
pub use options::run_options;
pub use refine::run_refine;
pub use serve::run_serve;

use reelscript::{PROGRESS_TICK, Progress, ReelscriptError, ValidationError, with_progress};
use std::future::Future;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use tracing::error;

/// Print each field issue on stderr.
pub(crate) fn report_validation(err: &ValidationError) {
    eprintln!("Please fix the following:");
    for issue in &err.issues {
        eprintln!("  - {}", issue);
    }
}

/// Report a failed flow: field issues verbatim, anything else as `message`.
pub(crate) fn report_failure(err: &ReelscriptError, message: &str) -> ExitCode {
    match err.as_validation() {
        Some(validation) => report_validation(validation),
        None => {
            error!(error = %err, "Request failed");
            eprintln!("{}", message);
        }
    }
    ExitCode::FAILURE
}

/// Await `future`, drawing a progress line on stderr when it is a terminal.
pub(crate) async fn with_terminal_progress<F: Future>(future: F) -> F::Output {
    if !std::io::stderr().is_terminal() {
        return future.await;
    }

    with_progress(future, PROGRESS_TICK, |progress: Progress| {
        let mut stderr = std::io::stderr().lock();
        let _ = write!(
            stderr,
            "\r[{:>3}%] {:<28}",
            progress.percent(),
            progress.message()
        );
        if progress.is_done() {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    })
    .await
}
