//! workspace-guard: path sandboxing and file visibility for agents.
//!
//! An agent that reads and writes files on a user's behalf must stay inside
//! one directory, the workspace. This library decides whether an untrusted
//! path may be touched, canonicalizes it to a workspace-relative form, and
//! decides which files bulk listings should hide.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │      File-operation dispatcher / CLI        │
//! └───────────┬─────────────────────┬───────────┘
//!             │ every path          │ listings
//! ┌───────────▼───────────┐ ┌───────▼───────────┐
//! │    WorkspaceGuard     │ │ WorkspaceLister   │
//! │ (authoritative gate)  │ │ (ignore walker)   │
//! └───┬───────────────┬───┘ └───────┬───────────┘
//!     │               │             │
//! ┌───▼──────┐  ┌─────▼─────┐ ┌─────▼───────────┐
//! │normalize │  │ AuditSink │ │ ExclusionPolicy │
//! └──────────┘  └───────────┘ └─────────────────┘
//! ```
//!
//! The policy layer in [`security`] never touches the filesystem. Only
//! [`services::WorkspaceLister`] walks directories, and it asks the guard
//! first.

pub mod config;
pub mod error;
pub mod fmt;
pub mod security;
pub mod services;
pub mod tools;
pub mod types;

pub use config::PolicyConfig;
pub use error::{ConfigError, PathEscapeError, Result, ServerError};
pub use security::{enforce, is_excluded, normalize, ExclusionPolicy, WorkspaceGuard};
pub use types::{CanonicalPath, WorkspaceRoot};
