//! Integration Test: Lock-Free Address Caches
//!
//! Cached views on `DomainSocketAddress` are pure functions of the path, so
//! they live in compute-once cells. A mutex or rwlock in the address module
//! means someone added shared mutable state to a value type.
//!
//! **Policy**: `address.rs` uses `OnceLock` only; no `Mutex`, `RwLock`, or
//! interior `Cell`/`RefCell`.

use architectural_enforcement::{production_lines, workspace_root};

const FORBIDDEN: &[&str] = &["Mutex", "RwLock", "RefCell", "Cell<", "parking_lot"];

#[test]
fn test_address_caches_take_no_locks() {
    let path = workspace_root().join("unixaddr/core/src/address.rs");
    let lines = production_lines(&path);
    assert!(!lines.is_empty(), "address module not found at {:?}", path);

    let violations: Vec<String> = lines
        .iter()
        .filter(|(_, code)| FORBIDDEN.iter().any(|f| code.contains(f)))
        .map(|(n, code)| format!("{}:{} - {}", path.display(), n, code.trim()))
        .collect();

    assert!(
        violations.is_empty(),
        "Locks or interior cells in address caches:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_address_caches_use_once_lock() {
    let path = workspace_root().join("unixaddr/core/src/address.rs");
    let uses_once_lock = production_lines(&path)
        .iter()
        .any(|(_, code)| code.contains("OnceLock<"));
    assert!(uses_once_lock, "cached views should be OnceLock cells");
}
