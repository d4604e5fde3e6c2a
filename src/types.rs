//! Type-safe newtypes for workspace-guard.
//!
//! These newtypes keep validated roots and canonical paths from being
//! confused with arbitrary untrusted strings.

use crate::error::ConfigError;
use crate::security::{is_absolute, resolve_lexically, strip_path_prefix, unify_separators};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The absolute directory all agent file operations are confined to.
///
/// Stored with `/` separators, `.`/`..` collapsed and trailing separators
/// trimmed. A bare anchor (`/`, `C:/`) keeps its separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WorkspaceRoot(String);

impl WorkspaceRoot {
    /// Root used when nothing else is configured.
    pub const DEFAULT: &'static str = "/workspace";

    /// Validates and canonicalizes a root path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the root is empty or not absolute.
    pub fn new(root: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = root.as_ref();
        if raw.trim().is_empty() {
            return Err(ConfigError::EmptyRoot);
        }

        let unified = unify_separators(raw);
        // Drive-relative roots such as `C:ws` are not absolute.
        let anchored = unified.starts_with('/')
            || (unified.as_bytes().get(2) == Some(&b'/') && is_absolute(&unified));
        if !anchored {
            return Err(ConfigError::RelativeRoot {
                root: raw.to_string(),
            });
        }

        Ok(Self(resolve_lexically(&unified)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The root without its leading separators, as it tends to appear when
    /// callers repeat the root inside a relative path (`/workspace` gives
    /// `workspace`).
    #[must_use]
    pub fn relative_prefix(&self) -> &str {
        self.0.trim_start_matches('/')
    }

    /// Returns the part of a unified absolute path below this root, or
    /// `None` when the path is neither the root nor inside it.
    ///
    /// Purely textual; resolve `..` first.
    #[must_use]
    pub fn strip_root<'a>(&self, path: &'a str) -> Option<&'a str> {
        strip_path_prefix(path, &self.0).map(|rest| rest.trim_start_matches('/'))
    }
}

impl Default for WorkspaceRoot {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for WorkspaceRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for WorkspaceRoot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A path relative to the workspace root that the guard has accepted.
///
/// No leading separator, no redundant root prefix, and no `.`/`..`
/// segments. The root itself is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    /// Only the guard mints canonical paths.
    pub(crate) fn new(path: String) -> Self {
        Self(path)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the path denotes the workspace root itself.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CanonicalPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<String> for CanonicalPath {
    fn eq(&self, other: &String) -> bool {
        self.0 == *other
    }
}

impl PartialEq<&str> for CanonicalPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<CanonicalPath> for String {
    fn from(path: CanonicalPath) -> Self {
        path.0
    }
}

// Compile-time assertions for thread safety.
#[cfg(test)]
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<WorkspaceRoot>();
    assert_send_sync::<CanonicalPath>();
};
