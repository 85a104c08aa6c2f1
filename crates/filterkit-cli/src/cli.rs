//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filterkit CLI - Twig-style template filters from the command line
///
/// Apply any built-in filter to a JSON value, list the registered filters,
/// or see how a human date pattern translates to strftime.
#[derive(Parser, Debug)]
#[command(
    name = "filterkit",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FILTERKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (falls back to the configured format, then human)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Report filters that degrade to null as warnings
    #[arg(long, global = true)]
    pub diagnostics: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a filter to a JSON value
    Apply(ApplyArgs),

    /// List the registered filter names
    List,

    /// Translate a date pattern to its strftime form
    Translate(TranslateArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the apply command
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("subject").required(true).args(["input", "input_file"])))]
pub struct ApplyArgs {
    /// Name of the filter to apply
    #[arg(value_name = "FILTER")]
    pub filter: String,

    /// Filter arguments, parsed as JSON with a plain-string fallback
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// Subject value as JSON text
    #[arg(short, long, value_name = "JSON")]
    pub input: Option<String>,

    /// Read the subject value from a JSON or YAML file
    #[arg(long, value_name = "PATH")]
    pub input_file: Option<PathBuf>,
}

/// Arguments for the translate command
#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Date pattern such as `dd/MM/yyyy hh:mm`
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Also render the pattern for this `YYYY-MM-DD HH:MM:SS` value
    #[arg(long, value_name = "DATETIME")]
    pub at: Option<String>,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_parsing() {
        let cli = Cli::parse_from(["filterkit", "apply", "batch", "2", "\"x\"", "--input", "[1,2,3]"]);
        match cli.command {
            Commands::Apply(args) => {
                assert_eq!(args.filter, "batch");
                assert_eq!(args.args, vec!["2", "\"x\""]);
                assert_eq!(args.input.as_deref(), Some("[1,2,3]"));
                assert!(args.input_file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_apply_arguments_after_separator() {
        let cli = Cli::parse_from(["filterkit", "apply", "round", "--input", "1250", "--", "-2"]);
        match cli.command {
            Commands::Apply(args) => assert_eq!(args.args, vec!["-2"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_apply_requires_a_subject() {
        assert!(Cli::try_parse_from(["filterkit", "apply", "upper"]).is_err());
        assert!(Cli::try_parse_from([
            "filterkit", "apply", "upper", "--input", "\"a\"", "--input-file", "a.json"
        ])
        .is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["filterkit", "-vv", "--diagnostics", "-o", "json-pretty", "list"]);
        assert_eq!(cli.verbosity_level(), 2);
        assert!(cli.diagnostics);
        assert_eq!(cli.output, Some(OutputFormat::JsonPretty));
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            diagnostics: false,
            command: Commands::Translate(TranslateArgs {
                pattern: "yyyy".to_string(),
                at: None,
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli { quiet: true, ..cli };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }
}
