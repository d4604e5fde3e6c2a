//! Path policy tools.
//!
//! # Security
//!
//! Only `enforce` is authoritative. `normalize` and `excluded` are
//! advisory and must not gate a file operation on their own.
//!
//! See [`crate::security`] for details.

use crate::security::{self, ExclusionPolicy, ExclusionRule, WorkspaceGuard};
use serde::{Deserialize, Serialize};

/// Input for the normalize tool.
#[derive(Debug, Deserialize)]
pub struct NormalizeInput {
    /// Raw path
    pub path: String,
}

/// Output for the normalize tool.
#[derive(Debug, Serialize)]
pub struct NormalizeOutput {
    /// Raw path as received
    pub input: String,
    /// Workspace-relative form (empty for the root)
    pub path: String,
}

/// Executes the normalize tool.
#[must_use]
pub fn execute_normalize(guard: &WorkspaceGuard, input: NormalizeInput) -> NormalizeOutput {
    let path = guard.normalize(&input.path);
    NormalizeOutput {
        input: input.path,
        path,
    }
}

/// Input for the enforce tool.
#[derive(Debug, Deserialize)]
pub struct EnforceInput {
    /// Untrusted path
    pub path: String,
}

/// Output for the enforce tool.
///
/// A refusal is reported as data, with `allowed: false`.
#[derive(Debug, Serialize)]
pub struct EnforceOutput {
    /// Raw path as received
    pub input: String,
    /// Whether the path stays inside the workspace
    pub allowed: bool,
    /// Canonical relative path when allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Refusal reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    /// Machine-readable refusal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    /// Resolved absolute path for traversal refusals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
}

/// Executes the enforce tool.
#[must_use]
pub fn execute_enforce(guard: &WorkspaceGuard, input: EnforceInput) -> EnforceOutput {
    match guard.enforce(&input.path) {
        Ok(canonical) => EnforceOutput {
            input: input.path,
            allowed: true,
            path: Some(canonical.into_string()),
            reason: None,
            code: None,
            resolved: None,
        },
        Err(err) => EnforceOutput {
            allowed: false,
            path: None,
            reason: Some(err.reason.as_str()),
            code: Some(err.code()),
            resolved: err.resolved,
            input: input.path,
        },
    }
}

/// Input for the excluded tool.
#[derive(Debug, Deserialize)]
pub struct ExcludedInput {
    /// Workspace-relative path
    pub path: String,
}

/// Output for the excluded tool.
#[derive(Debug, Serialize)]
pub struct ExcludedOutput {
    pub path: String,
    /// Whether listings hide this path
    pub excluded: bool,
    /// Rule that matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<ExclusionRule>,
    /// Policy entry that matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<&'static str>,
}

/// Executes the excluded tool.
#[must_use]
pub fn execute_excluded(policy: &ExclusionPolicy, input: ExcludedInput) -> ExcludedOutput {
    let matched = security::exclusion_match(&input.path, policy);
    ExcludedOutput {
        path: input.path,
        excluded: matched.is_some(),
        rule: matched.map(|m| m.rule),
        token: matched.map(|m| m.token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkspaceRoot;

    fn guard() -> WorkspaceGuard {
        WorkspaceGuard::new(WorkspaceRoot::default())
    }

    #[test]
    fn test_enforce_allowed() {
        let out = execute_enforce(
            &guard(),
            EnforceInput {
                path: "/workspace/src/app.py".to_string(),
            },
        );
        assert!(out.allowed);
        assert_eq!(out.path.as_deref(), Some("src/app.py"));
        assert!(out.reason.is_none());
    }

    #[test]
    fn test_enforce_refused() {
        let out = execute_enforce(
            &guard(),
            EnforceInput {
                path: "../../etc/passwd".to_string(),
            },
        );
        assert!(!out.allowed);
        assert_eq!(out.reason, Some("resolved path outside workspace"));
        assert_eq!(out.code, Some("PATH_TRAVERSAL"));
        assert_eq!(out.resolved.as_deref(), Some("/etc/passwd"));
    }

    #[test]
    fn test_normalize_tool() {
        let out = execute_normalize(
            &guard(),
            NormalizeInput {
                path: "workspace/foo/bar.txt".to_string(),
            },
        );
        assert_eq!(out.path, "foo/bar.txt");
        assert_eq!(out.input, "workspace/foo/bar.txt");
    }

    #[test]
    fn test_excluded_tool() {
        let out = execute_excluded(
            &ExclusionPolicy::DEFAULT,
            ExcludedInput {
                path: "web/package-lock.json".to_string(),
            },
        );
        assert!(out.excluded);
        assert_eq!(out.rule, Some(ExclusionRule::File));
        assert_eq!(out.token, Some("package-lock.json"));

        let out = execute_excluded(
            &ExclusionPolicy::DEFAULT,
            ExcludedInput {
                path: "README.md".to_string(),
            },
        );
        assert!(!out.excluded);
        assert!(out.rule.is_none());
    }
}
