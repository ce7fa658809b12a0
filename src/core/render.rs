//! Renderer module
//!
//! Renders count results as plain integers (one per line, like `wc`) or as
//! JSON Lines records carrying the same number plus context.

use serde::Serialize;
use std::path::Path;

use crate::core::model::{CountReport, Skipped};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(OutputFormat::Plain),
            "json" | "jsonl" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {} (expected plain or json)", s)),
        }
    }
}

/// Which input a result was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Directory,
    File,
    Text,
}

/// One printed result
#[derive(Debug, Clone, Serialize)]
pub struct CountRecord<'a> {
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'a Path>,
    pub model: &'a str,
    pub tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<&'a [Skipped]>,
}

impl<'a> CountRecord<'a> {
    pub fn directory(path: &'a Path, model: &'a str, report: &'a CountReport) -> Self {
        Self {
            mode: Mode::Directory,
            path: Some(path),
            model,
            tokens: report.tokens,
            files: Some(report.files),
            skipped: Some(&report.skipped),
        }
    }

    pub fn file(path: &'a Path, model: &'a str, tokens: usize) -> Self {
        Self {
            mode: Mode::File,
            path: Some(path),
            model,
            tokens,
            files: None,
            skipped: None,
        }
    }

    pub fn text(model: &'a str, tokens: usize) -> Self {
        Self {
            mode: Mode::Text,
            path: None,
            model,
            tokens,
            files: None,
            skipped: None,
        }
    }
}

/// Renderer for count records
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render one record as a single output line
    pub fn render(&self, record: &CountRecord<'_>) -> String {
        match self.format {
            OutputFormat::Plain => record.tokens.to_string(),
            OutputFormat::Json => serde_json::to_string(record)
                .unwrap_or_else(|_| format!("{{\"tokens\":{}}}", record.tokens)),
        }
    }
}
