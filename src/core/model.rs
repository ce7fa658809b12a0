//! Data model - Error taxonomy and count reports
//!
//! Every counting operation returns either a plain token count or a
//! [`CountReport`]. Failures that must surface to the caller are
//! [`TokenCountError`]s; failures that only affect one entry inside a
//! directory walk are collected as [`Skipped`] items instead.

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by the token counter
#[derive(Debug, Error)]
pub enum TokenCountError {
    /// The model name could not be resolved to a tokenizer
    #[error("unknown model '{model}': {reason}")]
    UnknownModel { model: String, reason: String },

    /// A directly requested path could not be opened or read
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directly requested file is not valid UTF-8 text
    #[error("could not decode {} as UTF-8 text", .path.display())]
    NotUtf8 { path: PathBuf },

    /// The top-level path of a directory count is not a directory
    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// Text contains a special token string the tokenizer refuses to encode
    #[error("text contains the special token '{token}'")]
    SpecialToken { token: String },
}

impl TokenCountError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TokenCountError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error comes from invalid configuration rather than input data
    pub fn is_config(&self) -> bool {
        matches!(self, TokenCountError::UnknownModel { .. })
    }

    /// Process exit status for this error (2 = configuration, 1 = input)
    pub fn exit_code(&self) -> u8 {
        if self.is_config() {
            2
        } else {
            1
        }
    }
}

/// Why an entry was left out of a directory total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// Opening or reading the file failed
    Unreadable(String),
    /// File content is not valid UTF-8
    NotUtf8,
    /// File content contains a special token string such as `<|endoftext|>`
    SpecialToken(String),
    /// A subdirectory could not be enumerated
    UnreadableDirectory(String),
    /// The entry type could not be determined (e.g. a dangling symlink)
    Unresolvable(String),
    /// A directory that is its own ancestor through a symlink
    Cycle,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(e) => write!(f, "{}", e),
            SkipReason::NotUtf8 => write!(f, "not valid UTF-8 text"),
            SkipReason::SpecialToken(t) => write!(f, "contains the special token '{}'", t),
            SkipReason::UnreadableDirectory(e) => write!(f, "directory not readable: {}", e),
            SkipReason::Unresolvable(e) => write!(f, "cannot determine entry type: {}", e),
            SkipReason::Cycle => write!(f, "symlink cycle back to an ancestor directory"),
        }
    }
}

/// An entry that contributed zero tokens because it could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl Skipped {
    pub fn new(path: impl Into<PathBuf>, reason: SkipReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Result of counting a directory tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountReport {
    /// Sum of tokens across every counted file
    pub tokens: usize,
    /// Number of files that contributed to `tokens`
    pub files: usize,
    /// Entries left out because of recoverable errors, in visit order
    pub skipped: Vec<Skipped>,
}

impl CountReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the token count of one file
    pub fn add_file(&mut self, tokens: usize) {
        self.tokens += tokens;
        self.files += 1;
    }

    /// Record an entry that was skipped
    pub fn skip(&mut self, path: &Path, reason: SkipReason) {
        self.skipped.push(Skipped::new(path, reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let config = TokenCountError::UnknownModel {
            model: "nope".to_string(),
            reason: "no tokenizer".to_string(),
        };
        assert!(config.is_config());
        assert_eq!(config.exit_code(), 2);

        let input = TokenCountError::NotUtf8 {
            path: PathBuf::from("bin.dat"),
        };
        assert!(!input.is_config());
        assert_eq!(input.exit_code(), 1);
    }

    #[test]
    fn test_error_messages_name_the_path() {
        let err = TokenCountError::io(
            "missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("missing.txt"));

        let err = TokenCountError::NotADirectory {
            path: PathBuf::from("file.txt"),
        };
        assert_eq!(err.to_string(), "file.txt is not a directory");

        let err = TokenCountError::SpecialToken {
            token: "<|endoftext|>".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("<|endoftext|>"));
    }

    #[test]
    fn test_report_accumulates() {
        let mut report = CountReport::new();
        report.add_file(3);
        report.add_file(4);
        report.skip(Path::new("d/bin"), SkipReason::NotUtf8);

        assert_eq!(report.tokens, 7);
        assert_eq!(report.files, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].to_string(), "d/bin: not valid UTF-8 text");
    }

    #[test]
    fn test_skip_reason_serializes_tagged() {
        let json = serde_json::to_string(&SkipReason::Unreadable("denied".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"unreadable","detail":"denied"}"#);

        let json = serde_json::to_string(&SkipReason::NotUtf8).unwrap();
        assert_eq!(json, r#"{"kind":"not_utf8"}"#);
    }
}
