//! File reading - Whole-file UTF-8 text reads
//!
//! Files are read fully into memory and decoded strictly: invalid UTF-8 is an
//! error, never replaced. Callers decide whether an error is fatal (a file
//! requested directly) or only skips one entry (a file inside a walk).

use std::fs;
use std::path::Path;

use crate::core::model::{SkipReason, TokenCountError};

/// Read `path` as UTF-8 text
pub fn read_text(path: &Path) -> Result<String, TokenCountError> {
    let bytes = fs::read(path).map_err(|e| TokenCountError::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| TokenCountError::NotUtf8 {
        path: path.to_path_buf(),
    })
}

/// Convert a read or encode error into the reason recorded when a walk skips the file
pub fn skip_reason(err: &TokenCountError) -> SkipReason {
    match err {
        TokenCountError::NotUtf8 { .. } => SkipReason::NotUtf8,
        TokenCountError::SpecialToken { token } => SkipReason::SpecialToken(token.clone()),
        TokenCountError::Io { source, .. } => SkipReason::Unreadable(source.to_string()),
        other => SkipReason::Unreadable(other.to_string()),
    }
}
