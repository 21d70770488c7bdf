//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Reelscript - five short-form reel scripts from one creative brief
#[derive(Parser, Debug)]
#[command(name = "reelscript")]
#[command(about = "Generate and refine short-form reel scripts with an LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file layered over the bundled defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured model name
    #[arg(short, long, global = true)]
    pub model: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate five scripts from a brief
    Generate {
        #[command(flatten)]
        brief: BriefArgs,

        /// Print the scripts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Refine one script toward a goal
    Refine {
        /// Script text to refine
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        script: Option<String>,

        /// Read the script from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Goal: shorten, lengthen, tone:<tone>, cta:<focus>, or free text
        #[arg(long)]
        goal: String,

        #[command(flatten)]
        brief: BriefArgs,
    },

    /// List the allowed lengths, languages, tones and objectives
    Options {
        /// Locale used to order languages (defaults to $LANG)
        #[arg(long)]
        locale: Option<String>,

        /// Print the options as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: generate, then refine scripts one by one
    Interactive,

    /// Serve the HTTP API
    Serve {
        /// Address to bind (overrides the configured one)
        #[arg(long)]
        bind: Option<String>,
    },
}

/// Brief fields shared by `generate` and `refine`
#[derive(Args, Debug, Clone)]
pub struct BriefArgs {
    /// What the reel is about
    #[arg(long)]
    pub topic: String,

    /// Reel duration: 15s, 30s, 60s or 90s
    #[arg(long, default_value = "30s")]
    pub length: String,

    /// Script language (defaults to the language of $LANG)
    #[arg(long)]
    pub language: Option<String>,

    /// Script tone
    #[arg(long, default_value = "Motivational")]
    pub tone: String,

    /// What the reel should achieve
    #[arg(long, default_value = "Increase engagement")]
    pub objective: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from([
            "reelscript",
            "generate",
            "--topic",
            "3-ingredient healthy breakfasts",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate { brief, json } => {
                assert_eq!(brief.topic, "3-ingredient healthy breakfasts");
                assert_eq!(brief.length, "30s");
                assert_eq!(brief.tone, "Motivational");
                assert_eq!(brief.objective, "Increase engagement");
                assert!(brief.language.is_none());
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "reelscript",
            "options",
            "--json",
            "-v",
            "--model",
            "gemini-2.5-flash",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-flash"));
        assert!(matches!(cli.command, Commands::Options { json: true, .. }));
    }

    #[test]
    fn test_refine_requires_goal() {
        let result = Cli::try_parse_from([
            "reelscript",
            "refine",
            "--script",
            "Eggs. Spinach. Go.",
            "--topic",
            "3-ingredient healthy breakfasts",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_refine_needs_a_script_source() {
        let result = Cli::try_parse_from([
            "reelscript",
            "refine",
            "--goal",
            "shorten",
            "--topic",
            "3-ingredient healthy breakfasts",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_script_and_file_conflict() {
        let result = Cli::try_parse_from([
            "reelscript",
            "refine",
            "--script",
            "Eggs.",
            "--file",
            "script.txt",
            "--goal",
            "shorten",
            "--topic",
            "3-ingredient healthy breakfasts",
        ]);
        assert!(result.is_err());
    }
}
