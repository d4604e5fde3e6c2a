//! Concurrent access tests for thread safety verification.
//!
//! The guard and exclusion policy are shared across threads without
//! synchronization; results must not depend on interleaving.

mod common;

use common::{default_root, web_project};
use std::sync::Arc;
use std::thread;
use workspace_guard::security::{is_excluded, ExclusionPolicy, MemoryAuditSink, WorkspaceGuard};
use workspace_guard::services::ListOptions;

#[test]
fn test_concurrent_enforce() {
    let sink = Arc::new(MemoryAuditSink::new());
    let guard = WorkspaceGuard::new(default_root()).with_audit_sink(sink.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let guard = guard.clone();
            thread::spawn(move || {
                for j in 0..50 {
                    let ok = guard.enforce(&format!("/workspace/t{i}/f{j}.rs")).unwrap();
                    assert_eq!(ok, format!("t{i}/f{j}.rs").as_str());

                    assert!(guard.enforce(&format!("../t{i}/f{j}.rs")).is_err());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread should not panic");
    }

    // Every refusal was recorded exactly once
    assert_eq!(sink.len(), 8 * 50);
}

#[test]
fn test_concurrent_exclusion_checks() {
    const POLICY: ExclusionPolicy = ExclusionPolicy::DEFAULT;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                for _ in 0..100 {
                    assert!(is_excluded(&format!("pkg{i}/node_modules/x.js"), &POLICY));
                    assert!(!is_excluded(&format!("pkg{i}/src/x.js"), &POLICY));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread should not panic");
    }
}

#[test]
fn test_concurrent_listings() {
    let env = web_project();
    let lister = Arc::new(env.lister());
    let expected = lister.list("", &ListOptions::default()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lister = Arc::clone(&lister);
            let expected = expected.clone();
            thread::spawn(move || {
                let listed = lister.list("", &ListOptions::default()).unwrap();
                assert_eq!(listed, expected);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread should not panic");
    }
}
