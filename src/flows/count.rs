//! Count flow - Token totals for strings, files and directory trees
//!
//! Directory counts walk the tree depth-first with an explicit stack. Every
//! directory resolves its own ignore rules; hidden entries and ignored paths
//! are skipped; files that cannot be read as text or that the encoder
//! rejects are recorded in the [`CountReport`] and contribute nothing.

use std::path::{Path, PathBuf};

use crate::backends::scan::{list_entries, EntryKind, ScanEntry};
use crate::core::file_reader::{read_text, skip_reason};
use crate::core::ignore_rules::IgnoreRules;
use crate::core::model::{CountReport, SkipReason, TokenCountError};
use crate::core::paths::{is_hidden_name, visit_key};
use crate::core::tokenizer::Encoder;

/// Options for directory counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountOptions {
    /// Read `.gptignore` / `.gitignore` in each directory (defaults always apply)
    pub read_ignore_files: bool,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            read_ignore_files: true,
        }
    }
}

/// A directory waiting to be visited
struct Pending {
    dir: PathBuf,
    entries: Vec<ScanEntry>,
    /// Canonical paths of this directory and its ancestors
    chain: Vec<PathBuf>,
}

/// Counts tokens with one encoder
#[derive(Debug)]
pub struct TokenCounter {
    encoder: Encoder,
    options: CountOptions,
}

impl TokenCounter {
    pub fn new(encoder: Encoder) -> Self {
        Self::with_options(encoder, CountOptions::default())
    }

    pub fn with_options(encoder: Encoder, options: CountOptions) -> Self {
        Self { encoder, options }
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Tokens in `text`
    pub fn count_string(&self, text: &str) -> Result<usize, TokenCountError> {
        self.encoder.encode_count(text)
    }

    /// Tokens in one file; read, decode and encode errors are returned
    pub fn count_file(&self, path: &Path) -> Result<usize, TokenCountError> {
        let text = read_text(path)?;
        self.encoder.encode_count(&text)
    }

    /// Total tokens under `dir`
    ///
    /// Fails only when `dir` itself cannot be listed. Anything below it that
    /// cannot be read is recorded in [`CountReport::skipped`].
    pub fn count_directory(&self, dir: &Path) -> Result<CountReport, TokenCountError> {
        let mut report = CountReport::new();
        let mut stack = vec![Pending {
            dir: dir.to_path_buf(),
            entries: list_entries(dir)?,
            chain: vec![visit_key(dir)],
        }];

        while let Some(Pending {
            dir,
            entries,
            chain,
        }) = stack.pop()
        {
            let rules = IgnoreRules::resolve_with(&dir, self.options.read_ignore_files);
            tracing::debug!(
                dir = %dir.display(),
                entries = entries.len(),
                ignore_file = ?rules.source(),
                invalid_patterns = ?rules.invalid(),
                "visiting directory"
            );

            for entry in entries {
                if is_hidden_name(&entry.name) || rules.is_ignored(&entry.path) {
                    tracing::trace!(path = %entry.path.display(), "skipped by filter");
                    continue;
                }

                match entry.kind {
                    EntryKind::File => match self.count_file(&entry.path) {
                        Ok(tokens) => report.add_file(tokens),
                        Err(err) => {
                            tracing::debug!(path = %entry.path.display(), error = %err, "skipping file");
                            report.skip(&entry.path, skip_reason(&err));
                        }
                    },
                    EntryKind::Dir => {
                        let key = visit_key(&entry.path);
                        if chain.contains(&key) {
                            report.skip(&entry.path, SkipReason::Cycle);
                            continue;
                        }
                        match list_entries(&entry.path) {
                            Ok(children) => {
                                let mut child_chain = chain.clone();
                                child_chain.push(key);
                                stack.push(Pending {
                                    dir: entry.path,
                                    entries: children,
                                    chain: child_chain,
                                });
                            }
                            Err(err) => {
                                tracing::debug!(path = %entry.path.display(), error = %err, "skipping directory");
                                report.skip(
                                    &entry.path,
                                    SkipReason::UnreadableDirectory(err.to_string()),
                                );
                            }
                        }
                    }
                    EntryKind::Other => {
                        tracing::debug!(path = %entry.path.display(), "skipping special file");
                    }
                    EntryKind::Unresolved(reason) => {
                        report.skip(&entry.path, reason);
                    }
                }
            }
        }

        Ok(report)
    }
}
