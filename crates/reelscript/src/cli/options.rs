//! `options` command handler.

use crate::cli::Context;
use reelscript::{JsonError, OptionsResponse, ReelscriptResult};
use std::process::ExitCode;

/// Handle the `options` command
pub fn run_options(ctx: &Context, locale: Option<&str>, json: bool) -> ReelscriptResult<ExitCode> {
    let locale = ctx.locale(locale);
    let options = OptionsResponse::for_locale(ctx.options(), locale.as_deref());

    if json {
        let rendered = serde_json::to_string_pretty(&options).map_err(JsonError::from)?;
        println!("{}", rendered);
        return Ok(ExitCode::SUCCESS);
    }

    let lengths: Vec<String> = options.lengths.iter().map(ToString::to_string).collect();
    println!("Lengths:    {}", lengths.join(", "));
    println!("Languages:  {}", options.languages.join(", "));
    println!("Tones:      {}", options.tones.join(", "));
    println!("Objectives: {}", options.objectives.join(", "));
    println!();
    println!(
        "Defaults:   {} / {} / {} / {}",
        options.defaults.length,
        options.defaults.language,
        options.defaults.tone,
        options.defaults.objective
    );
    Ok(ExitCode::SUCCESS)
}
