//! The authoritative workspace gate.
//!
//! # Security Properties
//!
//! 1. Absolute paths outside the root are refused before any resolution
//! 2. `.` and `..` are collapsed lexically against the root
//! 3. The resolved path must be the root or lie below it
//! 4. Every refusal is handed to the audit sink, best effort

use super::audit::{AuditSink, NoopAuditSink, RejectionEvent};
use super::normalize::strip_redundant_prefixes;
use super::{is_absolute, resolve_lexically, unify_separators};
use crate::error::{EscapeReason, PathEscapeError};
use crate::types::{CanonicalPath, WorkspaceRoot};
use std::fmt;
use std::sync::Arc;

/// Resolves untrusted paths against a fixed workspace root.
///
/// Cheap to clone; clones share the audit sink.
#[derive(Clone)]
pub struct WorkspaceGuard {
    root: WorkspaceRoot,
    audit: Arc<dyn AuditSink>,
}

impl WorkspaceGuard {
    /// Creates a guard that discards audit events.
    #[must_use]
    pub fn new(root: WorkspaceRoot) -> Self {
        Self {
            root,
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = sink;
        self
    }

    #[must_use]
    pub fn root(&self) -> &WorkspaceRoot {
        &self.root
    }

    /// Advisory canonicalization against this guard's root.
    #[must_use]
    pub fn normalize(&self, path: &str) -> String {
        super::normalize(path, &self.root)
    }

    /// Validates an untrusted path and returns its canonical relative form.
    ///
    /// # Errors
    ///
    /// Returns [`PathEscapeError`] when the path is absolute outside the
    /// root or resolves outside it.
    ///
    /// Redundant prefixes are stripped the way [`super::normalize`] strips
    /// them, so a top-level directory literally named `workspace` cannot be
    /// addressed: `/workspace/workspace/file` yields `file`.
    ///
    /// # Example
    ///
    /// ```
    /// use workspace_guard::security::WorkspaceGuard;
    /// use workspace_guard::types::WorkspaceRoot;
    ///
    /// let guard = WorkspaceGuard::new(WorkspaceRoot::default());
    ///
    /// assert_eq!(guard.enforce("/workspace/src/main.rs").unwrap(), "src/main.rs");
    /// assert_eq!(guard.enforce("./src/../lib.rs").unwrap(), "lib.rs");
    /// assert_eq!(guard.enforce("").unwrap(), "");
    ///
    /// assert!(guard.enforce("/etc/passwd").is_err());
    /// assert!(guard.enforce("../../etc/passwd").is_err());
    /// assert!(guard.enforce("foo/../../bar.txt").is_err());
    /// ```
    pub fn enforce(&self, path: &str) -> Result<CanonicalPath, PathEscapeError> {
        enforce_with(path, &self.root, self.audit.as_ref())
    }
}

impl fmt::Debug for WorkspaceGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceGuard")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// [`WorkspaceGuard::enforce`] without an audit sink.
///
/// # Errors
///
/// Returns [`PathEscapeError`] when `path` escapes `root`.
pub fn enforce(path: &str, root: &WorkspaceRoot) -> Result<CanonicalPath, PathEscapeError> {
    enforce_with(path, root, &NoopAuditSink)
}

fn enforce_with(
    path: &str,
    root: &WorkspaceRoot,
    audit: &dyn AuditSink,
) -> Result<CanonicalPath, PathEscapeError> {
    let unified = unify_separators(path);

    // Cheap rejection for obvious absolute escapes such as /etc/passwd
    if is_absolute(&unified) && root.strip_root(&unified).is_none() {
        return Err(reject(path, root, EscapeReason::AbsoluteOutside, None, audit));
    }

    let candidate = strip_redundant_prefixes(&unified, root);
    let joined = format!("{}/{}", root.as_str(), candidate);
    let resolved = resolve_lexically(&joined);

    let Some(relative) = root.strip_root(&resolved) else {
        return Err(reject(
            path,
            root,
            EscapeReason::ResolvedOutside,
            Some(resolved.clone()),
            audit,
        ));
    };

    // `..` can re-expose a redundant prefix (`a/../workspace/x`); strip it
    // again so enforce(enforce(p)) == enforce(p).
    let canonical = strip_redundant_prefixes(relative, root);

    // A drive-prefixed first segment replaces the root when joined on
    // Windows hosts.
    if is_absolute(canonical) {
        return Err(reject(
            path,
            root,
            EscapeReason::ResolvedOutside,
            Some(resolved.clone()),
            audit,
        ));
    }

    tracing::trace!(input = path, canonical, "path accepted");
    Ok(CanonicalPath::new(canonical.to_string()))
}

fn reject(
    path: &str,
    root: &WorkspaceRoot,
    reason: EscapeReason,
    resolved: Option<String>,
    audit: &dyn AuditSink,
) -> PathEscapeError {
    let event = RejectionEvent::new(path, reason, resolved.clone(), root.as_str());
    if let Err(e) = audit.record_rejection(&event) {
        tracing::debug!(error = %e, "audit sink failed to record rejection");
    }

    PathEscapeError {
        attempted: path.to_string(),
        reason,
        resolved,
    }
}
