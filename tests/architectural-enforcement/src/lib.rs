//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No `unwrap()`/`expect()` in production code
//! - Lazily cached address views never take a lock
//!
//! The helpers below walk the workspace sources and hand back only the
//! production lines of each file, with comments and `#[cfg(test)]` modules
//! stripped.

use std::fs;
use std::path::{Path, PathBuf};

/// Root of the workspace, resolved from this crate's manifest directory
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// All `.rs` files below `dir` (relative to the workspace root)
pub fn source_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Production lines of a source file as `(line_number, code)`
///
/// Everything from the first `#[cfg(test)]` onwards is dropped, as are
/// comment-only lines and trailing `//` comments. A `//` inside a string
/// literal is kept. Raw strings and multi-line strings are not tracked.
pub fn production_lines(path: &Path) -> Vec<(usize, String)> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(idx, line)| (idx + 1, strip_line_comment(line).to_string()))
        .collect()
}

/// The part of `line` before a trailing `//` comment
///
/// Tracks double-quoted string literals and their escapes so that `"unix://x"`
/// does not end the code early.
pub fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            _ => {}
        }
        i += 1;
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let mut file = tempfile_in_target("prod_lines.rs");
        writeln!(file.1, "fn a() {{ x.unwrap_or(1); }} // trailing .unwrap()").unwrap();
        writeln!(file.1, "/// doc with .unwrap()").unwrap();
        writeln!(file.1, "#[cfg(test)]").unwrap();
        writeln!(file.1, "mod tests {{ fn t() {{ x.unwrap(); }} }}").unwrap();
        drop(file.1);

        let lines = production_lines(&file.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, 1);
        assert!(!lines[0].1.contains(".unwrap()"));
    }

    #[test]
    fn test_comment_marker_inside_string_is_code() {
        let line = r#"let a = parse("unix://x").unwrap(); // note"#;
        assert_eq!(
            strip_line_comment(line),
            r#"let a = parse("unix://x").unwrap(); "#
        );
        assert!(strip_line_comment(line).contains(".unwrap()"));
    }

    #[test]
    fn test_escaped_quote_keeps_string_open() {
        let line = r#"let s = "a\"//b"; x.unwrap() // c"#;
        assert_eq!(strip_line_comment(line), r#"let s = "a\"//b"; x.unwrap() "#);
    }

    #[test]
    fn test_plain_trailing_comment_stripped() {
        assert_eq!(strip_line_comment("x.unwrap_or(1); // .unwrap()"), "x.unwrap_or(1); ");
        assert_eq!(strip_line_comment("no comment"), "no comment");
    }

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }

    fn tempfile_in_target(name: &str) -> (PathBuf, fs::File) {
        let dir = std::env::temp_dir().join("architectural-enforcement");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let file = fs::File::create(&path).unwrap();
        (path, file)
    }
}
