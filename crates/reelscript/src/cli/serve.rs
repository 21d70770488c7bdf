//! `serve` command handler.

use crate::cli::Context;
use reelscript::{ApiState, ReelscriptResult, serve};
use std::process::ExitCode;

/// Handle the `serve` command
pub async fn run_serve(ctx: &Context, bind: Option<&str>) -> ReelscriptResult<ExitCode> {
    let addr = bind.unwrap_or(ctx.bind());
    let state = ApiState::new(ctx.driver()?, ctx.options().clone());

    tracing::info!(addr, "API server starting. Press Ctrl+C to stop.");
    serve(state, addr).await?;
    Ok(ExitCode::SUCCESS)
}
