//! Path policy for agents operating inside a workspace root.
//!
//! Provides:
//! - Advisory canonicalization of workspace paths ([`normalize`])
//! - The authoritative traversal gate ([`WorkspaceGuard`])
//! - The listing exclusion policy ([`is_excluded`])
//! - Audit sinks recording refused paths ([`AuditSink`])
//!
//! # Design Philosophy
//!
//! Everything here is pure path algebra over strings. Nothing touches the
//! filesystem, so the same rules apply whether or not the target exists,
//! and no symlink is ever followed. `/` and `\` are both separators on
//! every host, and drive-letter prefixes count as absolute syntax.
//!
//! The exclusion policy is a presentation filter, not a security boundary:
//! excluded files can still be addressed directly through the guard.

mod audit;
mod guard;
mod normalize;
mod visibility;

pub use audit::{
    AuditSink, JsonLinesAuditSink, MemoryAuditSink, NoopAuditSink, RejectionEvent,
    TracingAuditSink,
};
pub use guard::{enforce, WorkspaceGuard};
pub use normalize::{normalize, LEGACY_WORKSPACE_PREFIX};
pub use visibility::{
    exclusion_match, is_excluded, ExclusionMatch, ExclusionPolicy, ExclusionRule,
    EXCLUDED_DIRS, EXCLUDED_EXTENSIONS, EXCLUDED_FILES,
};

use std::borrow::Cow;

/// Rewrites every `\` to `/`.
pub(crate) fn unify_separators(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Returns true for absolute-path syntax on any platform.
///
/// Expects separators already unified. Covers POSIX roots, UNC shares
/// (`//server`) and drive letters (`C:`, `C:/`).
pub(crate) fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || has_drive_prefix(path)
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Splits a unified absolute path into its anchor (`/`, `C:/` or `C:`)
/// and the remainder.
fn split_anchor(path: &str) -> (&str, &str) {
    if has_drive_prefix(path) {
        if path[2..].starts_with('/') {
            path.split_at(3)
        } else {
            path.split_at(2)
        }
    } else if path.starts_with('/') {
        path.split_at(1)
    } else {
        ("", path)
    }
}

/// Collapses `.`, `..` and empty segments without filesystem access.
///
/// `..` at the anchor stays at the anchor, so `/a/../..` becomes `/`.
/// Expects separators already unified.
pub(crate) fn resolve_lexically(path: &str) -> String {
    let (anchor, rest) = split_anchor(path);
    let mut segments: Vec<&str> = Vec::new();

    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if anchor.is_empty() {
                    segments.push(segment);
                }
            }
            _ => segments.push(segment),
        }
    }

    let mut resolved = String::with_capacity(path.len());
    resolved.push_str(anchor);
    resolved.push_str(&segments.join("/"));
    resolved
}

/// Strips `prefix` from `path` only when it ends on a segment boundary.
///
/// Returns the remainder with its separator still attached, or `""` on an
/// exact match. An empty prefix never matches.
pub(crate) fn strip_segment_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// [`strip_segment_prefix`] with drive letters compared case-insensitively,
/// so `c:/ws/x` is below `C:/ws`.
pub(crate) fn strip_path_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if has_drive_prefix(path) && has_drive_prefix(prefix) {
        if !path.as_bytes()[0].eq_ignore_ascii_case(&prefix.as_bytes()[0]) {
            return None;
        }
        return strip_segment_prefix(&path[1..], &prefix[1..]);
    }
    strip_segment_prefix(path, prefix)
}
