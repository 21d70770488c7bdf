//! `interactive` command: a small REPL over one orchestrated session.

use crate::cli::{Context, report_failure, report_validation, with_terminal_progress};
use reelscript::{
    BriefForm, CreativeBrief, DEFAULT_OBJECTIVE, DEFAULT_TONE, GENERATION_FAILED_MESSAGE,
    GenerationState, IoError, Orchestrator, REFINEMENT_FAILED_MESSAGE, ReelLength,
    ReelscriptErrorKind, ReelscriptResult, RefinementGoal, Session,
};
use std::io::Write;
use std::process::ExitCode;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

const HELP: &str = "\
Commands:
  show                 list the current scripts
  refine <n> <goal>    refine script n (goal: shorten, lengthen, tone:<tone>, cta:<focus>, or free text)
  copy <n>             print script n alone, ready to copy
  new                  start over with a new brief
  help                 show this help
  quit                 leave";

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReplCommand {
    Show,
    Refine { index: usize, goal: String },
    Copy(usize),
    New,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

fn parse_index(word: Option<&str>) -> Option<usize> {
    word?.parse::<usize>().ok()?.checked_sub(1)
}

/// Parse a REPL line. Script numbers are 1-based on screen and 0-based here.
pub(crate) fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word.to_ascii_lowercase().as_str() {
        "" => ReplCommand::Empty,
        "show" | "ls" => ReplCommand::Show,
        "new" => ReplCommand::New,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        "copy" | "print" => match parse_index(Some(rest)) {
            Some(index) => ReplCommand::Copy(index),
            None => ReplCommand::Invalid("Usage: copy <n>".to_string()),
        },
        "refine" => {
            let (number, goal) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match (parse_index(Some(number)), goal.trim()) {
                (Some(index), goal) if !goal.is_empty() => ReplCommand::Refine {
                    index,
                    goal: goal.to_string(),
                },
                _ => ReplCommand::Invalid("Usage: refine <n> <goal>".to_string()),
            }
        }
        other => ReplCommand::Invalid(format!("Unknown command '{}'. Type 'help'.", other)),
    }
}

async fn read_line<R>(input: &mut Lines<R>, prompt: &str) -> ReelscriptResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    print!("{}", prompt);
    let _ = std::io::stdout().flush();
    let line = input
        .next_line()
        .await
        .map_err(|e| IoError::new(format!("Failed to read input: {}", e)))?;
    Ok(line)
}

async fn ask<R>(input: &mut Lines<R>, label: &str, default: &str) -> ReelscriptResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let prompt = if default.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, default)
    };
    Ok(read_line(input, &prompt).await?.map(|answer| {
        let answer = answer.trim();
        if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        }
    }))
}

/// Prompt until the brief validates. `None` on end of input.
async fn ask_brief<R>(ctx: &Context, input: &mut Lines<R>) -> ReelscriptResult<Option<CreativeBrief>>
where
    R: AsyncBufRead + Unpin,
{
    let default_language = ctx.default_language(None);
    let default_length = ReelLength::default().to_string();
    loop {
        let Some(topic) = ask(input, "Topic", "").await? else {
            return Ok(None);
        };
        let Some(length) = ask(input, "Length", &default_length).await? else {
            return Ok(None);
        };
        let Some(language) = ask(input, "Language", &default_language).await? else {
            return Ok(None);
        };
        let Some(tone) = ask(input, "Tone", DEFAULT_TONE).await? else {
            return Ok(None);
        };
        let Some(objective) = ask(input, "Objective", DEFAULT_OBJECTIVE).await? else {
            return Ok(None);
        };

        let form = BriefForm {
            topic: Some(topic),
            length: Some(length),
            language: Some(language),
            tone: Some(tone),
            objective: Some(objective),
        };
        match form.into_brief(ctx.options()) {
            Ok(brief) => return Ok(Some(brief)),
            Err(err) => report_validation(&err),
        }
    }
}

fn show(session: &Session) {
    match session.state() {
        GenerationState::Idle => println!("No scripts yet. Type 'new' to start."),
        GenerationState::Submitting { .. } => println!("Still generating..."),
        GenerationState::Failed { message, .. } => eprintln!("{}", message),
        GenerationState::Succeeded { .. } => {
            for (i, item) in session.items().iter().enumerate() {
                let marker = if item.refined().is_some() { " (refined)" } else { "" };
                println!("--- Script {}{} ---\n{}", i + 1, marker, item.display_text());
                if let Some(error) = item.error() {
                    eprintln!("! {}", error);
                }
                println!();
            }
        }
    }
}

/// Ask for a brief and generate. `false` on end of input.
async fn start_generation<R>(
    ctx: &Context,
    orchestrator: &Orchestrator,
    input: &mut Lines<R>,
) -> ReelscriptResult<bool>
where
    R: AsyncBufRead + Unpin,
{
    let Some(brief) = ask_brief(ctx, input).await? else {
        return Ok(false);
    };
    if let Err(err) = with_terminal_progress(orchestrator.generate(brief)).await {
        report_failure(&err, GENERATION_FAILED_MESSAGE);
    }
    show(&orchestrator.snapshot());
    Ok(true)
}

async fn refine(orchestrator: &Orchestrator, index: usize, goal: &str) {
    let Ok(goal) = goal.parse::<RefinementGoal>();
    match orchestrator.refine(index, goal).await {
        Ok(_) => {
            let session = orchestrator.snapshot();
            if let Some(item) = session.items().get(index) {
                match item.error() {
                    Some(error) => eprintln!("{}", error),
                    None => println!(
                        "--- Script {} (refined) ---\n{}\n",
                        index + 1,
                        item.display_text()
                    ),
                }
            }
        }
        Err(err) => match err.kind() {
            ReelscriptErrorKind::Session(session) => eprintln!("{}", session.kind),
            _ => {
                report_failure(&err, REFINEMENT_FAILED_MESSAGE);
            }
        },
    }
}

/// Handle the `interactive` command
pub async fn run_interactive(ctx: &Context) -> ReelscriptResult<ExitCode> {
    let orchestrator = Orchestrator::new(ctx.driver()?, ctx.options().clone());
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n", HELP);
    if !start_generation(ctx, &orchestrator, &mut input).await? {
        return Ok(ExitCode::SUCCESS);
    }

    while let Some(line) = read_line(&mut input, "reelscript> ").await? {
        match parse_command(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Quit => break,
            ReplCommand::Show => show(&orchestrator.snapshot()),
            ReplCommand::New => {
                if !start_generation(ctx, &orchestrator, &mut input).await? {
                    break;
                }
            }
            ReplCommand::Copy(index) => match orchestrator.snapshot().items().get(index) {
                Some(item) => println!("{}", item.display_text()),
                None => eprintln!("No script {}", index + 1),
            },
            ReplCommand::Refine { index, goal } => refine(&orchestrator, index, &goal).await,
            ReplCommand::Invalid(message) => eprintln!("{}", message),
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refine_takes_rest_of_line_as_goal() {
        assert_eq!(
            parse_command("refine 2 open with a question"),
            ReplCommand::Refine {
                index: 1,
                goal: "open with a question".to_string()
            }
        );
        assert_eq!(
            parse_command("  REFINE 5 tone:Playful "),
            ReplCommand::Refine {
                index: 4,
                goal: "tone:Playful".to_string()
            }
        );
    }

    #[test]
    fn test_script_numbers_start_at_one() {
        assert_eq!(parse_command("copy 1"), ReplCommand::Copy(0));
        assert!(matches!(parse_command("copy 0"), ReplCommand::Invalid(_)));
        assert!(matches!(parse_command("copy two"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_refine_without_goal_is_invalid() {
        assert!(matches!(parse_command("refine 3"), ReplCommand::Invalid(_)));
        assert!(matches!(parse_command("refine"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command(""), ReplCommand::Empty);
        assert_eq!(parse_command("show"), ReplCommand::Show);
        assert_eq!(parse_command("new"), ReplCommand::New);
        assert_eq!(parse_command("quit"), ReplCommand::Quit);
        assert!(matches!(parse_command("dance"), ReplCommand::Invalid(_)));
    }
}
