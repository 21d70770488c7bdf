//! `generate` command handler.

use crate::cli::{BriefArgs, Context, report_failure, report_validation, with_terminal_progress};
use reelscript::{
    BriefForm, CreativeBrief, GENERATION_FAILED_MESSAGE, JsonError, ReelscriptResult,
    generate_scripts,
};
use std::process::ExitCode;
use tracing::instrument;

impl BriefArgs {
    /// Convert the flags into a form, filling the language from the locale.
    pub fn to_form(&self, ctx: &Context) -> BriefForm {
        BriefForm {
            topic: Some(self.topic.clone()),
            length: Some(self.length.clone()),
            language: Some(
                self.language
                    .clone()
                    .unwrap_or_else(|| ctx.default_language(None)),
            ),
            tone: Some(self.tone.clone()),
            objective: Some(self.objective.clone()),
        }
    }

    /// Validate the flags into a brief, printing any field issues.
    pub fn to_brief(&self, ctx: &Context) -> Option<CreativeBrief> {
        match self.to_form(ctx).into_brief(ctx.options()) {
            Ok(brief) => Some(brief),
            Err(err) => {
                report_validation(&err);
                None
            }
        }
    }
}

/// Handle the `generate` command
#[instrument(skip_all, fields(topic = %args.topic))]
pub async fn run_generate(ctx: &Context, args: &BriefArgs, json: bool) -> ReelscriptResult<ExitCode> {
    let Some(brief) = args.to_brief(ctx) else {
        return Ok(ExitCode::FAILURE);
    };
    let driver = ctx.driver()?;

    let outcome =
        with_terminal_progress(generate_scripts(driver.as_ref(), &brief, ctx.options())).await;
    let scripts = match outcome {
        Ok(scripts) => scripts,
        Err(err) => return Ok(report_failure(&err, GENERATION_FAILED_MESSAGE)),
    };

    if json {
        let rendered = serde_json::to_string_pretty(&scripts).map_err(JsonError::from)?;
        println!("{}", rendered);
    } else {
        for (i, script) in scripts.iter().enumerate() {
            println!("--- Script {} ---\n{}\n", i + 1, script);
        }
    }
    Ok(ExitCode::SUCCESS)
}
