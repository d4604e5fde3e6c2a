//! Exclusion policy for bulk file listings.
//!
//! Hides lockfiles, generated tooling config, build output and binary
//! assets from enumeration. This is a presentation filter only; excluded
//! files stay addressable by exact path.

use super::unify_separators;
use serde::Serialize;

/// Exact filenames hidden from listings.
pub const EXCLUDED_FILES: &[&str] = &[
    ".DS_Store",
    ".gitignore",
    "package-lock.json",
    "postcss.config.js",
    "postcss.config.mjs",
    "jsconfig.json",
    "components.json",
    "tsconfig.tsbuildinfo",
    "tsconfig.json",
];

/// Directory tokens; any directory portion containing one is hidden.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".next", "dist", "build", ".git"];

/// Lowercase extensions (with the dot) of non-text formats.
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".ico", ".svg", ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".tiff", ".webp", ".db", ".sql",
];

/// Three immutable sets deciding what listings hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionPolicy {
    pub files: &'static [&'static str],
    pub directories: &'static [&'static str],
    pub extensions: &'static [&'static str],
}

impl ExclusionPolicy {
    /// The compiled-in policy.
    pub const DEFAULT: Self = Self::new(EXCLUDED_FILES, EXCLUDED_DIRS, EXCLUDED_EXTENSIONS);

    /// Excludes nothing.
    pub const EMPTY: Self = Self::new(&[], &[], &[]);

    #[must_use]
    pub const fn new(
        files: &'static [&'static str],
        directories: &'static [&'static str],
        extensions: &'static [&'static str],
    ) -> Self {
        Self {
            files,
            directories,
            extensions,
        }
    }

    /// Reports the first rule that excludes `relative_path`, if any.
    #[must_use]
    pub fn matches(&self, relative_path: &str) -> Option<ExclusionMatch> {
        let path = unify_separators(relative_path);
        let (dir, filename) = match path.rsplit_once('/') {
            Some((dir, filename)) => (dir, filename),
            None => ("", path.as_ref()),
        };

        if let Some(token) = self.files.iter().copied().find(|f| *f == filename) {
            return Some(ExclusionMatch::new(ExclusionRule::File, token));
        }

        // Substring match on purpose: `a/my-node_modules-backup/x` is
        // hidden too.
        if let Some(token) = self.directories.iter().copied().find(|d| dir.contains(d)) {
            return Some(ExclusionMatch::new(ExclusionRule::Directory, token));
        }

        if let Some(ext) = extension(filename) {
            let ext = ext.to_lowercase();
            if let Some(token) = self.extensions.iter().copied().find(|e| *e == ext) {
                return Some(ExclusionMatch::new(ExclusionRule::Extension, token));
            }
        }

        None
    }
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which rule excluded a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionRule {
    /// Final segment equals an excluded filename
    File,
    /// Directory portion contains an excluded token
    Directory,
    /// Lowercased extension is excluded
    Extension,
}

/// A matched exclusion rule and the policy entry that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExclusionMatch {
    pub rule: ExclusionRule,
    pub token: &'static str,
}

impl ExclusionMatch {
    const fn new(rule: ExclusionRule, token: &'static str) -> Self {
        Self { rule, token }
    }
}

/// Extension of a filename including the dot. Leading dots belong to the
/// stem, so `.png` and `.bashrc` have none.
fn extension(filename: &str) -> Option<&str> {
    let stem_start = filename.len() - filename.trim_start_matches('.').len();
    let dot = filename[stem_start..].rfind('.')?;
    Some(&filename[stem_start + dot..])
}

/// Returns true if `relative_path` should be hidden from listings.
///
/// # Example
///
/// ```
/// use workspace_guard::security::{is_excluded, ExclusionPolicy};
///
/// let policy = ExclusionPolicy::DEFAULT;
/// assert!(is_excluded("src/node_modules/x.js", &policy));
/// assert!(is_excluded("package-lock.json", &policy));
/// assert!(is_excluded("assets/logo.png", &policy));
/// assert!(!is_excluded("README.md", &policy));
/// ```
#[must_use]
pub fn is_excluded(relative_path: &str, policy: &ExclusionPolicy) -> bool {
    policy.matches(relative_path).is_some()
}

/// Like [`is_excluded`], reporting which rule matched.
#[must_use]
pub fn exclusion_match(relative_path: &str, policy: &ExclusionPolicy) -> Option<ExclusionMatch> {
    policy.matches(relative_path)
}
