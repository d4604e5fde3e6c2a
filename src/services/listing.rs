//! Workspace enumeration filtered by the exclusion policy.
//!
//! The requested directory goes through the guard first; every file the
//! walker finds is then reported by its workspace-relative path unless the
//! exclusion policy hides it.

use crate::error::{Result, ServerError};
use crate::security::{ExclusionPolicy, WorkspaceGuard};
use ignore::WalkBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Walker settings for one listing.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Include dotfiles and dot-directories (default: true)
    pub include_hidden: bool,
    /// Honor `.gitignore` and friends (default: false)
    pub respect_gitignore: bool,
    /// Follow symbolic links (default: false)
    pub follow_symlinks: bool,
    /// Maximum depth below the listed directory
    pub max_depth: Option<usize>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            include_hidden: true,
            respect_gitignore: false,
            follow_symlinks: false,
            max_depth: None,
        }
    }
}

/// A visible file in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedFile {
    /// `/`-separated path relative to the workspace root
    pub path: String,
    /// Size in bytes
    pub size: u64,
}

/// Lists workspace files through the guard and the exclusion policy.
#[derive(Debug, Clone)]
pub struct WorkspaceLister {
    guard: WorkspaceGuard,
    exclusions: ExclusionPolicy,
}

impl WorkspaceLister {
    #[must_use]
    pub fn new(guard: WorkspaceGuard, exclusions: ExclusionPolicy) -> Self {
        Self { guard, exclusions }
    }

    #[must_use]
    pub fn guard(&self) -> &WorkspaceGuard {
        &self.guard
    }

    /// Lists visible files under `dir`, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Escape`] if `dir` leaves the workspace and
    /// [`ServerError::NotFound`] if it does not exist.
    pub fn list(&self, dir: &str, options: &ListOptions) -> Result<Vec<ListedFile>> {
        let canonical = self.guard.enforce(dir)?;
        let disk_root = PathBuf::from(self.guard.root().as_str());
        let start = if canonical.is_root() {
            disk_root.clone()
        } else {
            disk_root.join(canonical.as_str())
        };

        if !start.exists() {
            return Err(ServerError::NotFound { path: start });
        }

        let mut builder = WalkBuilder::new(&start);
        builder
            .standard_filters(false)
            .hidden(!options.include_hidden)
            .git_ignore(options.respect_gitignore)
            .git_global(options.respect_gitignore)
            .git_exclude(options.respect_gitignore)
            .require_git(false)
            .follow_links(options.follow_symlinks)
            .max_depth(options.max_depth);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let Some(path) = relative_to(entry.path(), &disk_root) else {
                continue;
            };
            if let Some(m) = self.exclusions.matches(&path) {
                tracing::trace!(path = %path, rule = ?m.rule, token = m.token, "excluded from listing");
                continue;
            }

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            files.push(ListedFile { path, size });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!(dir = canonical.as_str(), count = files.len(), "listed workspace");
        Ok(files)
    }
}

/// `/`-joined path of `path` below `root`, or `None` outside it.
fn relative_to(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkspaceRoot;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, WorkspaceLister) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.rs"), "fn main() {}\n").unwrap();
        fs::write(dir.path().join("logo.png"), [0u8; 4]).unwrap();

        let root = WorkspaceRoot::new(dir.path().to_string_lossy()).unwrap();
        let lister = WorkspaceLister::new(WorkspaceGuard::new(root), ExclusionPolicy::DEFAULT);
        (dir, lister)
    }

    #[test]
    fn test_relative_to() {
        let rel = relative_to(Path::new("/ws/a/b.txt"), Path::new("/ws"));
        assert_eq!(rel.as_deref(), Some("a/b.txt"));
        assert_eq!(relative_to(Path::new("/other"), Path::new("/ws")), None);
    }

    #[test]
    fn test_list_filters_excluded() {
        let (_dir, lister) = setup();
        let files = lister.list("", &ListOptions::default()).unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["src/main.rs"]);
        assert_eq!(files[0].size, 13);
    }

    #[test]
    fn test_list_refuses_escape() {
        let (_dir, lister) = setup();
        let err = lister.list("../", &ListOptions::default()).unwrap_err();
        assert_eq!(err.code(), "PATH_TRAVERSAL");
    }

    #[test]
    fn test_list_missing_dir() {
        let (_dir, lister) = setup();
        let err = lister.list("nope", &ListOptions::default()).unwrap_err();
        assert!(matches!(err, ServerError::NotFound { .. }));
    }
}
