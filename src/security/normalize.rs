//! Advisory canonicalization of workspace paths.
//!
//! [`normalize`] only strips leading separators and redundant workspace
//! prefixes. It does not resolve `..` and must never be the only check in
//! front of a file operation; use [`super::WorkspaceGuard`] for that.

use super::{strip_path_prefix, unify_separators};
use crate::types::WorkspaceRoot;

/// Hardcoded prefix some callers put in front of every workspace path,
/// whatever the configured root is.
pub const LEGACY_WORKSPACE_PREFIX: &str = "workspace/";

/// Rewrites a raw path into a workspace-relative form.
///
/// Strips leading separators, the root repeated as a relative path
/// (`workspace/...` for root `/workspace`) and the legacy `workspace/`
/// prefix, until none is left. The empty string denotes the root.
///
/// A top-level directory literally named `workspace` (or named like the
/// root) cannot be addressed: `/workspace/workspace/file` becomes `file`.
///
/// # Example
///
/// ```
/// use workspace_guard::security::normalize;
/// use workspace_guard::types::WorkspaceRoot;
///
/// let root = WorkspaceRoot::default();
/// assert_eq!(normalize("/workspace/foo/bar.txt", &root), "foo/bar.txt");
/// assert_eq!(normalize("workspace/foo/bar.txt", &root), "foo/bar.txt");
/// assert_eq!(normalize("/workspace", &root), "");
/// ```
#[must_use]
pub fn normalize(path: &str, root: &WorkspaceRoot) -> String {
    let unified = unify_separators(path);
    strip_redundant_prefixes(&unified, root).to_string()
}

/// Prefix stripping shared with the guard. Expects unified separators.
pub(crate) fn strip_redundant_prefixes<'a>(path: &'a str, root: &WorkspaceRoot) -> &'a str {
    let root_prefix = root.relative_prefix();
    let mut rest = path.trim_start_matches('/');

    loop {
        let before = rest.len();

        if let Some(stripped) = strip_path_prefix(rest, root_prefix) {
            rest = stripped.trim_start_matches('/');
        }
        if let Some(stripped) = rest.strip_prefix(LEGACY_WORKSPACE_PREFIX) {
            rest = stripped.trim_start_matches('/');
        }

        if rest.len() == before {
            return rest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(s: &str) -> WorkspaceRoot {
        WorkspaceRoot::new(s).unwrap()
    }

    #[test]
    fn test_strips_leading_slashes() {
        let r = WorkspaceRoot::default();
        assert_eq!(normalize("/foo/bar.txt", &r), "foo/bar.txt");
        assert_eq!(normalize("///foo", &r), "foo");
        assert_eq!(normalize("foo", &r), "foo");
    }

    #[test]
    fn test_strips_root_prefix() {
        let r = WorkspaceRoot::default();
        assert_eq!(normalize("/workspace/foo/bar.txt", &r), "foo/bar.txt");
        assert_eq!(normalize("workspace/foo/bar.txt", &r), "foo/bar.txt");
        assert_eq!(normalize("/workspace", &r), "");
        assert_eq!(normalize("/workspace/", &r), "");
        assert_eq!(normalize("", &r), "");
    }

    #[test]
    fn test_custom_root_prefix() {
        let r = root("/srv/data");
        assert_eq!(normalize("/srv/data/a.txt", &r), "a.txt");
        assert_eq!(normalize("srv/data/a.txt", &r), "a.txt");
        // Legacy prefix applies whatever the root is
        assert_eq!(normalize("workspace/a.txt", &r), "a.txt");
        assert_eq!(normalize("other/a.txt", &r), "other/a.txt");
    }

    #[test]
    fn test_mixed_redundant_prefixes() {
        let r = root("/srv/data");
        assert_eq!(normalize("/srv/data/workspace/a.txt", &r), "a.txt");
        assert_eq!(normalize("workspace/srv/data/a.txt", &r), "a.txt");

        let r = WorkspaceRoot::default();
        assert_eq!(normalize("/workspace/workspace/workspace/x", &r), "x");
    }

    #[test]
    fn test_prefix_requires_segment_boundary() {
        let r = WorkspaceRoot::default();
        assert_eq!(normalize("workspace_notes.md", &r), "workspace_notes.md");
        assert_eq!(normalize("/workspaces/x", &r), "workspaces/x");
    }

    #[test]
    fn test_backslash_separators() {
        let r = WorkspaceRoot::default();
        assert_eq!(normalize(r"\workspace\src\lib.rs", &r), "src/lib.rs");
    }

    #[test]
    fn test_leaves_dot_segments_alone() {
        let r = WorkspaceRoot::default();
        assert_eq!(normalize("./a/../b", &r), "./a/../b");
        assert_eq!(normalize("foo/", &r), "foo/");
    }
}
