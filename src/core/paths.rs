//! Path helpers
//!
//! Paths are kept exactly as the walker joins them; nothing here canonicalizes
//! except the cycle key used to detect directories reached twice.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Check if an entry name is hidden (starts with '.')
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Identity of a directory for cycle detection
///
/// Falls back to the path as given when it cannot be canonicalized.
pub fn visit_key(dir: &Path) -> PathBuf {
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}
