//! Audit sinks for refused paths.
//!
//! The guard hands every rejection to an [`AuditSink`]. Recording is best
//! effort: a sink error is swallowed by the guard and never changes the
//! outcome of the check.

use crate::error::{AuditError, EscapeReason};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// One refused path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionEvent {
    pub ts_ms: u64,
    /// The untrusted input exactly as received.
    pub attempted: String,
    pub reason: EscapeReason,
    /// Lexically resolved absolute path, for rejections found by resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
    pub root: String,
}

impl RejectionEvent {
    #[must_use]
    pub fn new(
        attempted: impl Into<String>,
        reason: EscapeReason,
        resolved: Option<String>,
        root: impl Into<String>,
    ) -> Self {
        Self {
            ts_ms: now_ms(),
            attempted: attempted.into(),
            reason,
            resolved,
            root: root.into(),
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().min(u128::from(u64::MAX)) as u64)
        .unwrap_or(0)
}

/// Capability for recording guard rejections.
pub trait AuditSink: Send + Sync {
    /// Records one rejection.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when the record could not be stored. Callers
    /// treat this as non-fatal.
    fn record_rejection(&self, event: &RejectionEvent) -> Result<(), AuditError>;
}

/// Discards every event. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_rejection(&self, _event: &RejectionEvent) -> Result<(), AuditError> {
        Ok(())
    }
}

/// Emits each event as a `warn` level tracing record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record_rejection(&self, event: &RejectionEvent) -> Result<(), AuditError> {
        match &event.resolved {
            Some(resolved) => tracing::warn!(
                attempted = %event.attempted,
                resolved = %resolved,
                root = %event.root,
                "agent attempted to access path outside workspace: {}",
                event.reason
            ),
            None => tracing::warn!(
                attempted = %event.attempted,
                root = %event.root,
                "agent attempted to access path outside workspace: {}",
                event.reason
            ),
        }
        Ok(())
    }
}

/// Keeps events in memory, mostly so tests can assert on them.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<RejectionEvent>>,
}

impl MemoryAuditSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<RejectionEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(events) => events.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record_rejection(&self, event: &RejectionEvent) -> Result<(), AuditError> {
        self.events
            .lock()
            .map_err(|_| AuditError::Poisoned)?
            .push(event.clone());
        Ok(())
    }
}

/// Appends one JSON object per event to a file.
#[derive(Debug)]
pub struct JsonLinesAuditSink {
    file: Mutex<File>,
}

impl JsonLinesAuditSink {
    /// Opens (or creates) the log file in append mode, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for JsonLinesAuditSink {
    fn record_rejection(&self, event: &RejectionEvent) -> Result<(), AuditError> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let mut file = self.file.lock().map_err(|_| AuditError::Poisoned)?;
        file.write_all(&line)?;
        file.flush()?;
        Ok(())
    }
}
