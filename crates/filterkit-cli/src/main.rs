//! Filterkit CLI - Command-line interface for Twig-style template filters
//!
//! This is the main entry point for the Filterkit CLI application, providing
//! commands for applying filters to JSON values, listing the registry and
//! translating date patterns.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::{ErrorContext, Result};
use filterkit_core::FilterRegistry;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Run the application
    let result = run(cli);

    // Handle the result
    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
fn run(cli: Cli) -> Result<()> {
    // Configuration is read before logging so its `logging` section applies;
    // until then a scoped subscriber reports problems with the file itself
    let config = logging::with_startup_logging(&startup_logging_config(&cli), || {
        Config::load_with_file(cli.config.as_deref())
    })
    .context("Failed to load configuration")?;

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    execute(cli, &config)
}

#[instrument(skip_all, fields(command = ?cli.command))]
fn execute(cli: Cli, config: &Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = cli.output.unwrap_or(config.output.format);
    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    let registry = FilterRegistry::builtin();

    // Handle the subcommand
    match cli.command {
        Commands::Apply(args) => {
            let ctx = config.context(cli.diagnostics);
            handlers::handle_apply(args, &registry, &ctx, &mut output)
        }
        Commands::List => handlers::handle_list(&registry, &mut output),
        Commands::Translate(args) => handlers::handle_translate(args, &mut output),
        Commands::Completions(args) => {
            handlers::handle_completions(args, &mut std::io::stdout())
        }
    }
}

/// Logging settings that hold before the config file is read
fn startup_logging_config(cli: &Cli) -> LoggingConfig {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_env();
    if cli.quiet {
        logging_config.level = "error".to_string();
    }
    logging_config
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    // Config file first, then environment overrides
    logging_config.merge_with_file(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["filterkit", "-vv", "translate", "yyyy"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["filterkit", "--quiet", "list"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(cli.quiet);
    }

    #[test]
    fn test_startup_logging_config() {
        let cli = Cli::parse_from(["filterkit", "-vv", "list"]);
        if std::env::var("RUST_LOG").is_err() {
            assert_eq!(startup_logging_config(&cli).level, "debug");
        }

        let cli = Cli::parse_from(["filterkit", "--quiet", "list"]);
        assert_eq!(startup_logging_config(&cli).level, "error");
    }
}
