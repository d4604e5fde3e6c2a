//! Policy configuration.
//!
//! The workspace root and exclusion policy are plain immutable values,
//! built once at startup and passed to the components that need them.

use crate::error::ConfigError;
use crate::security::{AuditSink, ExclusionPolicy, WorkspaceGuard};
use crate::types::WorkspaceRoot;
use std::sync::Arc;

/// Environment variable holding the workspace root.
pub const WORKSPACE_ROOT_ENV: &str = "WORKSPACE_ROOT";

/// Everything the policy layer is configured with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyConfig {
    pub root: WorkspaceRoot,
    pub exclusions: ExclusionPolicy,
}

impl PolicyConfig {
    /// Config for `root` with the compiled-in exclusion policy.
    #[must_use]
    pub fn new(root: WorkspaceRoot) -> Self {
        Self {
            root,
            exclusions: ExclusionPolicy::DEFAULT,
        }
    }

    /// Reads the root from `WORKSPACE_ROOT`, defaulting to `/workspace`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the variable is set to an invalid root.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(WORKSPACE_ROOT_ENV) {
            Ok(value) => Self::from_root_value(Some(&value)),
            Err(std::env::VarError::NotPresent) => Self::from_root_value(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                var: WORKSPACE_ROOT_ENV,
            }),
        }
    }

    /// Builds a config from an optional root setting; unset or blank means
    /// the default root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the value is not an absolute path.
    pub fn from_root_value(value: Option<&str>) -> Result<Self, ConfigError> {
        let root = match value.map(str::trim) {
            Some(v) if !v.is_empty() => WorkspaceRoot::new(v)?,
            _ => WorkspaceRoot::default(),
        };
        Ok(Self::new(root))
    }

    /// Replaces the exclusion policy.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionPolicy) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// A guard for this root without auditing.
    #[must_use]
    pub fn guard(&self) -> WorkspaceGuard {
        WorkspaceGuard::new(self.root.clone())
    }

    /// A guard for this root reporting rejections to `sink`.
    #[must_use]
    pub fn audited_guard(&self, sink: Arc<dyn AuditSink>) -> WorkspaceGuard {
        self.guard().with_audit_sink(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::MemoryAuditSink;

    #[test]
    fn test_default_root() {
        let config = PolicyConfig::from_root_value(None).unwrap();
        assert_eq!(config.root.as_str(), "/workspace");
        assert_eq!(config.exclusions, ExclusionPolicy::DEFAULT);

        let blank = PolicyConfig::from_root_value(Some("  ")).unwrap();
        assert_eq!(blank, config);
    }

    #[test]
    fn test_explicit_root() {
        let config = PolicyConfig::from_root_value(Some("/srv/agent/")).unwrap();
        assert_eq!(config.root.as_str(), "/srv/agent");
        assert_eq!(config.guard().enforce("/srv/agent/x").unwrap(), "x");
    }

    #[test]
    fn test_relative_root_rejected() {
        assert!(matches!(
            PolicyConfig::from_root_value(Some("workspace")),
            Err(ConfigError::RelativeRoot { .. })
        ));
    }

    #[test]
    fn test_audited_guard_records() {
        let sink = Arc::new(MemoryAuditSink::new());
        let guard = PolicyConfig::default().audited_guard(sink.clone());

        assert!(guard.enforce("/etc/passwd").is_err());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_custom_exclusions() {
        const NOTHING: ExclusionPolicy = ExclusionPolicy::EMPTY;
        let config = PolicyConfig::default().with_exclusions(NOTHING);
        assert_eq!(config.exclusions, ExclusionPolicy::EMPTY);
    }
}
