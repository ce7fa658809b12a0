//! Directory enumeration backend
//!
//! Lists the direct entries of one directory with walkdir. Symlinks are
//! followed for classification only, so a link to a file is a file and a
//! link to a directory is a directory.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::model::{SkipReason, TokenCountError};

/// Kind of a directory entry, as classified by the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// FIFOs, sockets, devices
    Other,
    /// The entry exists but its type could not be determined
    Unresolved(SkipReason),
}

/// One direct entry of a directory
#[derive(Debug, Clone)]
pub struct ScanEntry {
    /// `dir` joined with the entry name
    pub path: PathBuf,
    pub name: OsString,
    pub kind: EntryKind,
}

/// List the direct entries of `dir` (no ordering guarantee)
///
/// Fails when `dir` itself is missing, not a directory, or not readable.
/// Per-entry problems are returned as [`EntryKind::Unresolved`].
pub fn list_entries(dir: &Path) -> Result<Vec<ScanEntry>, TokenCountError> {
    let metadata = fs::metadata(dir).map_err(|e| TokenCountError::io(dir, e))?;
    if !metadata.is_dir() {
        return Err(TokenCountError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    // Surface permission errors on the directory itself before walking.
    fs::read_dir(dir).map_err(|e| TokenCountError::io(dir, e))?;

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    let mut entries = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                let file_type = entry.file_type();
                let kind = if file_type.is_dir() {
                    EntryKind::Dir
                } else if file_type.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                };
                entries.push(ScanEntry {
                    path: entry.path().to_path_buf(),
                    name: entry.file_name().to_os_string(),
                    kind,
                });
            }
            Err(err) => {
                let Some(path) = err.path().map(Path::to_path_buf) else {
                    tracing::warn!(dir = %dir.display(), error = %err, "walk error without a path");
                    continue;
                };
                if path == dir {
                    return Err(TokenCountError::io(dir, err.into()));
                }
                let reason = if err.loop_ancestor().is_some() {
                    SkipReason::Cycle
                } else {
                    SkipReason::Unresolvable(err.to_string())
                };
                let name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
                entries.push(ScanEntry {
                    path,
                    name,
                    kind: EntryKind::Unresolved(reason),
                });
            }
        }
    }

    Ok(entries)
}
