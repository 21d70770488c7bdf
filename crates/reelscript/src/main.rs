//! Reelscript CLI binary.
//!
//! This binary provides command-line access to Reelscript:
//! - Generate five scripts from a brief
//! - Refine a single script
//! - Run an interactive generate-and-refine session
//! - Serve the HTTP API

use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{
        Cli, Commands, Context, run_generate, run_interactive, run_options, run_refine, run_serve,
    };

    // Parse command-line arguments
    let cli = Cli::parse();

    // Pick up GEMINI_API_KEY from a local .env if present
    let _ = dotenvy::dotenv();

    reelscript::telemetry::init_console_telemetry(cli.verbose);

    let ctx = match Context::load(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Execute the requested command
    let result = match &cli.command {
        Commands::Generate { brief, json } => run_generate(&ctx, brief, *json).await,
        Commands::Refine {
            script,
            file,
            goal,
            brief,
        } => run_refine(&ctx, script.as_deref(), file.as_deref(), goal, brief).await,
        Commands::Options { locale, json } => run_options(&ctx, locale.as_deref(), *json),
        Commands::Interactive => run_interactive(&ctx).await,
        Commands::Serve { bind } => run_serve(&ctx, bind.as_deref()).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
