//! Ignore rules - Per-directory ignore patterns
//!
//! Each directory is resolved on its own: `.gptignore` wins over `.gitignore`
//! (the two are never merged), and the built-in defaults are always appended.
//! Patterns are shell globs matched against the entry path exactly as the
//! walker builds it, so `*` also crosses `/`.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

/// Tool-specific ignore file, preferred when present
pub const GPTIGNORE: &str = ".gptignore";

/// Generic ignore file, used only when there is no `.gptignore`
pub const GITIGNORE: &str = ".gitignore";

/// Patterns applied in every directory
///
/// Each one matches the entry itself, so a matching directory is never
/// entered and its contents need no pattern of their own. Contents patterns
/// like `*/dist/*` would also match the walked root's own prefix.
pub const DEFAULT_PATTERNS: &[&str] = &[
    "*/dist",
    "*/sdist",
    "*/.git",
    "*/node_modules",
    "*/__pycache__",
    "*/.gptignore",
    "*/.gitignore",
];

static DEFAULT_GLOBS: Lazy<Vec<Glob>> = Lazy::new(|| {
    DEFAULT_PATTERNS
        .iter()
        .filter_map(|p| compile(p).ok())
        .collect()
});

/// Compile one pattern with fnmatch-like semantics
fn compile(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(false)
        .backslash_escape(false)
        .build()
}

/// Parse ignore file text into patterns (skips blanks and `#` comments)
pub fn parse_ignore_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Locate the ignore file for `dir`, preferring `.gptignore`
pub fn find_ignore_file(dir: &Path) -> Option<PathBuf> {
    [GPTIGNORE, GITIGNORE]
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Whether `path` matches any of `patterns`
///
/// Patterns that fail to compile never match.
pub fn matches(path: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        compile(pattern)
            .map(|glob| glob.compile_matcher().is_match(path))
            .unwrap_or(false)
    })
}

/// The ignore patterns in effect for one directory
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    patterns: Vec<String>,
    source: Option<PathBuf>,
    invalid: Vec<String>,
    set: GlobSet,
}

impl IgnoreRules {
    /// Resolve the rules for `dir`, reading its ignore file if present
    pub fn resolve(dir: &Path) -> Self {
        Self::resolve_with(dir, true)
    }

    /// Resolve the rules for `dir`; with `read_ignore_files` false only the defaults apply
    pub fn resolve_with(dir: &Path, read_ignore_files: bool) -> Self {
        let mut source = None;
        let mut patterns = Vec::new();

        if read_ignore_files {
            if let Some(path) = find_ignore_file(dir) {
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        patterns = parse_ignore_lines(&text);
                        tracing::debug!(
                            file = %path.display(),
                            count = patterns.len(),
                            "loaded ignore patterns"
                        );
                        source = Some(path);
                    }
                    Err(e) => {
                        tracing::warn!(
                            file = %path.display(),
                            error = %e,
                            "could not read ignore file, using defaults only"
                        );
                    }
                }
            }
        }

        let mut rules = Self::from_patterns(patterns);
        rules.source = source;
        rules
    }

    /// Build rules from explicit patterns plus the defaults
    pub fn from_patterns(mut patterns: Vec<String>) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut invalid = Vec::new();

        for pattern in &patterns {
            match compile(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "ignoring invalid pattern");
                    invalid.push(pattern.clone());
                }
            }
        }
        for glob in DEFAULT_GLOBS.iter() {
            builder.add(glob.clone());
        }
        patterns.extend(DEFAULT_PATTERNS.iter().map(|p| p.to_string()));

        let set = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not build ignore set, nothing will be ignored");
            GlobSet::empty()
        });

        Self {
            patterns,
            source: None,
            invalid,
            set,
        }
    }

    /// All patterns, ignore-file lines first, then the defaults
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// The ignore file that was read, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Pattern lines that could not be compiled
    pub fn invalid(&self) -> &[String] {
        &self.invalid
    }

    /// Whether `path` is ignored; the path is matched as given, not normalized
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.set.is_match(path.to_string_lossy().as_ref())
    }
}
