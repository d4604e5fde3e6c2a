//! Error types for workspace-guard.
//!
//! Uses thiserror for ergonomic error handling with proper
//! error chain propagation.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for listing and tool operations.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Escape(#[from] PathEscapeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Audit error: {0}")]
    Audit(#[from] AuditError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Walk error: {0}")]
    Walk(String),

    #[error("Not found in workspace: {}", path.display())]
    NotFound { path: PathBuf },
}

/// Why the guard refused a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscapeReason {
    /// Absolute path syntax pointing outside the root
    AbsoluteOutside,
    /// Lexical resolution left the root
    ResolvedOutside,
}

impl EscapeReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AbsoluteOutside => "absolute path outside workspace",
            Self::ResolvedOutside => "resolved path outside workspace",
        }
    }
}

impl fmt::Display for EscapeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EscapeReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A path that would leave the workspace. Always a hard refusal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Path '{attempted}' refused: {reason}")]
pub struct PathEscapeError {
    /// The raw input as received
    pub attempted: String,
    pub reason: EscapeReason,
    /// Lexically resolved absolute path, when resolution found the escape
    pub resolved: Option<String>,
}

impl PathEscapeError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self.reason {
            EscapeReason::AbsoluteOutside => "ABSOLUTE_PATH",
            EscapeReason::ResolvedOutside => "PATH_TRAVERSAL",
        }
    }
}

/// Invalid workspace configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Workspace root is empty")]
    EmptyRoot,

    #[error("Workspace root must be absolute: '{root}'")]
    RelativeRoot { root: String },

    #[error("Environment variable {var} is not valid unicode")]
    NotUnicode { var: &'static str },
}

/// Failure to record an audit event. Never escalated by the guard.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Audit IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audit serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Audit sink lock poisoned")]
    Poisoned,
}

/// Result type alias for listing and tool operations.
pub type Result<T> = std::result::Result<T, ServerError>;

impl ServerError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Escape(e) => e.code(),
            Self::Config(e) => e.code(),
            Self::Audit(_) => "AUDIT_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Walk(_) => "WALK_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
        }
    }
}

impl ConfigError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyRoot => "EMPTY_ROOT",
            Self::RelativeRoot { .. } => "RELATIVE_ROOT",
            Self::NotUnicode { .. } => "CONFIG_NOT_UNICODE",
        }
    }
}

impl From<ignore::Error> for ServerError {
    fn from(err: ignore::Error) -> Self {
        Self::Walk(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_error_message_and_code() {
        let err = PathEscapeError {
            attempted: "/etc/passwd".to_string(),
            reason: EscapeReason::AbsoluteOutside,
            resolved: None,
        };
        assert_eq!(
            err.to_string(),
            "Path '/etc/passwd' refused: absolute path outside workspace"
        );
        assert_eq!(err.code(), "ABSOLUTE_PATH");

        let server: ServerError = err.into();
        assert_eq!(server.code(), "ABSOLUTE_PATH");
    }

    #[test]
    fn test_reason_serializes_as_text() {
        let json = serde_json::to_string(&EscapeReason::ResolvedOutside).unwrap();
        assert_eq!(json, "\"resolved path outside workspace\"");
    }
}
