//! Integration Test: Panic-Free Production Code
//!
//! Every operation on a domain socket address is pure, and bad input is
//! reported through `AddressError`. Production code must propagate errors
//! instead of panicking.
//!
//! **Policy**: No `.unwrap()` or `.expect(` outside test modules.

use architectural_enforcement::{production_lines, source_files};

const PRODUCTION_DIRS: &[&str] = &["unixaddr/core/src", "unixaddr/inspect/src"];

#[test]
fn test_no_unwrap_in_production_code() {
    let mut violations = Vec::new();

    for dir in PRODUCTION_DIRS {
        for file in source_files(dir) {
            for (line_number, code) in production_lines(&file) {
                if code.contains(".unwrap()") || code.contains(".expect(") {
                    violations.push(format!(
                        "{}:{} - {}",
                        file.display(),
                        line_number,
                        code.trim()
                    ));
                }
            }
        }
    }

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        panic!(
            "\nFound {} unwrap/expect call(s) in production code.\nPropagate the error instead.",
            violations.len()
        );
    }
}

#[test]
fn test_production_dirs_are_scanned() {
    for dir in PRODUCTION_DIRS {
        assert!(
            !source_files(dir).is_empty(),
            "{} has no sources; the enforcement scan would be vacuous",
            dir
        );
    }
}
