//! Common test utilities for workspace-guard integration tests.
//!
//! Provides `TestEnv` for setting up an on-disk workspace with a guard and
//! lister wired together.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use workspace_guard::error::AuditError;
use workspace_guard::security::{
    AuditSink, ExclusionPolicy, MemoryAuditSink, RejectionEvent, WorkspaceGuard,
};
use workspace_guard::services::WorkspaceLister;
use workspace_guard::WorkspaceRoot;

/// A workspace on disk with an audited guard.
pub struct TestEnv {
    pub dir: TempDir,
    pub root: WorkspaceRoot,
    pub audit: Arc<MemoryAuditSink>,
    pub guard: WorkspaceGuard,
}

impl TestEnv {
    /// Creates a new empty workspace.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let root = WorkspaceRoot::new(dir.path().to_string_lossy())
            .expect("Temp directory should be an absolute root");
        let audit = Arc::new(MemoryAuditSink::new());
        let guard = WorkspaceGuard::new(root.clone()).with_audit_sink(audit.clone());

        Self {
            dir,
            root,
            audit,
            guard,
        }
    }

    /// Creates a lister using the default exclusion policy.
    pub fn lister(&self) -> WorkspaceLister {
        WorkspaceLister::new(self.guard.clone(), ExclusionPolicy::DEFAULT)
    }

    /// Writes a file to the workspace.
    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write test file");
    }

    /// Gets the full path to a file in the workspace.
    pub fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a workspace resembling a small web project.
pub fn web_project() -> TestEnv {
    let env = TestEnv::new();

    env.write_file("README.md", "# demo\n");
    env.write_file("package.json", "{\"name\": \"demo\"}\n");
    env.write_file("package-lock.json", "{}\n");
    env.write_file("tsconfig.json", "{}\n");
    env.write_file(".gitignore", "dist/\n");
    env.write_file(".env", "SECRET=1\n");
    env.write_file("src/app.ts", "export const app = 1;\n");
    env.write_file("src/components/Button.tsx", "export {};\n");
    env.write_file("public/logo.png", "png");
    env.write_file("public/favicon.ico", "ico");
    env.write_file("node_modules/react/index.js", "module.exports = {};\n");
    env.write_file(".next/cache/x.json", "{}\n");
    env.write_file("dist/bundle.js", "void 0;\n");
    env.write_file(".git/HEAD", "ref: refs/heads/main\n");
    env.write_file("db/schema.sql", "create table t();\n");

    env
}

/// Sink that always fails, standing in for an unavailable audit backend.
pub struct FailingAuditSink;

impl AuditSink for FailingAuditSink {
    fn record_rejection(&self, _event: &RejectionEvent) -> Result<(), AuditError> {
        Err(AuditError::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "audit backend unavailable",
        )))
    }
}

/// The default `/workspace` root.
pub fn default_root() -> WorkspaceRoot {
    WorkspaceRoot::default()
}
