//! token-count - Count LLM tokens in text, files and directory trees
//!
//! token-count provides:
//! - Token counts for a literal string, a single file, or a directory tree
//! - Per-directory .gptignore/.gitignore glob patterns plus built-in defaults
//! - Any tiktoken model or encoding name
//! - Plain (wc-style) or JSON Lines output

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use token_count::core::model::TokenCountError;

mod cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.no_color);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            let code = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<TokenCountError>())
                .map(TokenCountError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

/// Install the stderr log subscriber; RUST_LOG takes precedence over --verbose
fn init_logging(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!no_color)
        .init();
}
