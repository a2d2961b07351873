//! Integration Test: Core Owns No File Format
//!
//! `unixaddr-core` is a pure value library. Reading or parsing files belongs
//! to the tools built on top of it, such as `unixaddr-inspect`.
//!
//! **Policy**: No `toml`, no `std::fs`, no file reads in `unixaddr/core/src`.

use std::fs;

use architectural_enforcement::{production_lines, source_files, workspace_root};

const FORBIDDEN: &[&str] = &["toml::", "std::fs", "read_to_string", "File::open"];

#[test]
fn test_core_sources_do_no_file_io() {
    let mut violations = Vec::new();

    for file in source_files("unixaddr/core/src") {
        for (line_number, code) in production_lines(&file) {
            if FORBIDDEN.iter().any(|f| code.contains(f)) {
                violations.push(format!("{}:{} - {}", file.display(), line_number, code.trim()));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "File handling in the core crate:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_core_manifest_has_no_toml_dependency() {
    let manifest = fs::read_to_string(workspace_root().join("unixaddr/core/Cargo.toml")).unwrap();
    let dependencies = manifest
        .split("[dependencies]")
        .nth(1)
        .and_then(|rest| rest.split("[dev-dependencies]").next())
        .unwrap_or_default();

    assert!(
        !dependencies.lines().any(|l| l.trim_start().starts_with("toml")),
        "unixaddr-core must not depend on toml"
    );
}
