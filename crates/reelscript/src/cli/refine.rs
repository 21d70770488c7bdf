//! `refine` command handler.

use crate::cli::{BriefArgs, Context, report_failure, report_validation};
use reelscript::{
    IoError, REFINEMENT_FAILED_MESSAGE, ReelscriptResult, RefinementGoal, RefinementRequest,
    ValidationError, refine_script,
};
use std::path::Path;
use std::process::ExitCode;
use tracing::instrument;

/// Handle the `refine` command
#[instrument(skip_all, fields(goal = %goal))]
pub async fn run_refine(
    ctx: &Context,
    script: Option<&str>,
    file: Option<&Path>,
    goal: &str,
    args: &BriefArgs,
) -> ReelscriptResult<ExitCode> {
    let script = match (script, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => tokio::fs::read_to_string(path).await.map_err(|e| {
            IoError::new(format!("Failed to read {}: {}", path.display(), e))
        })?,
        (None, None) => String::new(),
    };

    let Some(brief) = args.to_brief(ctx) else {
        return Ok(ExitCode::FAILURE);
    };
    let Ok(goal) = goal.parse::<RefinementGoal>();
    if let Some(issue) = goal.check(ctx.options()) {
        report_validation(&ValidationError::new(vec![issue]));
        return Ok(ExitCode::FAILURE);
    }

    let request = RefinementRequest::from_brief(script, &brief, &goal);
    let driver = ctx.driver()?;
    match refine_script(driver.as_ref(), &request).await {
        Ok(result) => {
            println!("{}", result.refined_script());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report_failure(&err, REFINEMENT_FAILED_MESSAGE)),
    }
}
