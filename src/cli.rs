//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::path::PathBuf;

use token_count::core::model::CountReport;
use token_count::core::render::{CountRecord, OutputFormat, Renderer};
use token_count::core::tokenizer::{Encoder, DEFAULT_MODEL};
use token_count::flows::count::{CountOptions, TokenCounter};

/// Count the number of tokens in a text string or file, similar to the Unix 'wc' utility.
#[derive(Parser, Debug)]
#[command(name = "token-count")]
#[command(
    author,
    version,
    about,
    long_about = r#"Count the number of tokens a language model sees in a text string, a file,
or every text file under a directory.

Directories are walked recursively. Hidden entries (names starting with '.')
are skipped, and each directory may carry a .gptignore (preferred) or
.gitignore whose glob patterns exclude paths. Build, dependency, cache and
version-control directories are always excluded.

Each requested input prints one result, in the order directory, file, text.

Examples:
    token-count --text "hello world"
    token-count --file README.md
    token-count --directory src --model-name gpt-4o
    token-count -d . --format json
"#
)]
pub struct Cli {
    /// Model or encoding used to tokenize.
    #[arg(
        short,
        long,
        alias = "model_name",
        env = "TOKEN_COUNT_MODEL",
        default_value = DEFAULT_MODEL,
        value_name = "MODEL",
        long_help = "Model or encoding used to tokenize.\n\n\
Accepts OpenAI model names (gpt-3.5-turbo, gpt-4, gpt-4o, text-davinci-003, ...)\n\
or encoding names (o200k_base, cl100k_base, p50k_base, p50k_edit, r50k_base).\n\
An unknown name aborts before anything is counted."
    )]
    pub model_name: String,

    /// Directory to count tokens in.
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// File to count tokens in.
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Text to count tokens in.
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Do not read .gptignore/.gitignore files.
    #[arg(
        long,
        long_help = "Do not read .gptignore or .gitignore files while walking a directory.\n\n\
The built-in patterns (dist, sdist, .git, node_modules, __pycache__) still apply,\n\
and hidden entries are still skipped."
    )]
    pub no_ignore: bool,

    /// Output format (plain/json).
    #[arg(
        long,
        env = "TOKEN_COUNT_FORMAT",
        default_value = "plain",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- plain (default): one integer per line\n\
- json: one JSON object per line, including the model and skipped files"
    )]
    pub format: OutputFormat,

    /// Quiet mode (no skipped-file warnings).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging on stderr).
    #[arg(
        short,
        long,
        long_help = "Enable debug logging on stderr (ignore files found, directories visited,\n\
files skipped). RUST_LOG overrides the level when set."
    )]
    pub verbose: bool,

    /// Disable colored output on stderr.
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    fn has_input(&self) -> bool {
        self.directory.is_some() || self.file.is_some() || self.text.is_some()
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let encoder = Encoder::for_model(&cli.model_name)?;

    if !cli.has_input() {
        tracing::info!("no input provided");
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let options = CountOptions {
        read_ignore_files: !cli.no_ignore,
    };
    let counter = TokenCounter::with_options(encoder, options);
    let renderer = Renderer::new(cli.format);
    let model = counter.encoder().model();

    if let Some(dir) = &cli.directory {
        let report = counter
            .count_directory(dir)
            .with_context(|| format!("counting tokens in directory {}", dir.display()))?;
        if !cli.quiet {
            print_skipped(&report);
        }
        println!(
            "{}",
            renderer.render(&CountRecord::directory(dir, model, &report))
        );
    }

    if let Some(file) = &cli.file {
        let tokens = counter
            .count_file(file)
            .with_context(|| format!("counting tokens in file {}", file.display()))?;
        println!("{}", renderer.render(&CountRecord::file(file, model, tokens)));
    }

    if let Some(text) = &cli.text {
        let tokens = counter
            .count_string(text)
            .context("counting tokens in text")?;
        println!("{}", renderer.render(&CountRecord::text(model, tokens)));
    }

    Ok(())
}

/// Report files left out of a directory total on stderr
fn print_skipped(report: &CountReport) {
    for skipped in &report.skipped {
        eprintln!(
            "{} could not read {}: {}. Ignoring.",
            "warning:".yellow().bold(),
            skipped.path.display(),
            skipped.reason
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["token-count", "-t", "hi"]).unwrap();
        assert_eq!(cli.model_name, DEFAULT_MODEL);
        assert_eq!(cli.format, OutputFormat::Plain);
        assert!(!cli.no_ignore);
        assert!(cli.has_input());
    }

    #[test]
    fn test_modes_are_not_exclusive() {
        let cli = Cli::try_parse_from([
            "token-count",
            "-d",
            "src",
            "-f",
            "README.md",
            "-t",
            "hello",
            "-m",
            "gpt-4o",
        ])
        .unwrap();
        assert_eq!(cli.directory, Some(PathBuf::from("src")));
        assert_eq!(cli.file, Some(PathBuf::from("README.md")));
        assert_eq!(cli.text.as_deref(), Some("hello"));
        assert_eq!(cli.model_name, "gpt-4o");
    }

    #[test]
    fn test_underscore_alias_for_model_name() {
        let cli = Cli::try_parse_from(["token-count", "--model_name", "gpt-4", "-t", "x"]).unwrap();
        assert_eq!(cli.model_name, "gpt-4");
    }

    #[test]
    fn test_no_input_detected() {
        let cli = Cli::try_parse_from(["token-count"]).unwrap();
        assert!(!cli.has_input());
    }

    #[test]
    fn test_bad_format_rejected() {
        assert!(Cli::try_parse_from(["token-count", "--format", "xml", "-t", "x"]).is_err());
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["token-count", "-q", "-v", "-t", "x"]).is_err());
    }
}
