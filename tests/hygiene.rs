//! Hygiene: enforces coding standards at test time.
//!
//! Scans the engine's production sources for constructs that can crash the
//! loop or silently swallow an error. Every budget is zero; a new hit means
//! the code must propagate or handle the error instead.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, excluding `*_test.rs` siblings.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the crate root");
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if path.extension().is_none_or(|e| e != "rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn assert_budget(pattern: &str, max: usize) {
    let hits: Vec<(String, usize)> = source_files()
        .into_iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then_some((file.path, count))
        })
        .collect();
    let total: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits
        .iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(total <= max, "`{pattern}` budget exceeded: found {total}, max {max}.\n{listing}");
}

// Panics.

#[test]
fn unwrap_budget() {
    assert_budget(".unwrap()", 0);
}

#[test]
fn expect_budget() {
    assert_budget(".expect(", 0);
}

#[test]
fn panic_budget() {
    assert_budget("panic!(", 0);
}

#[test]
fn unreachable_budget() {
    assert_budget("unreachable!(", 0);
}

#[test]
fn todo_budget() {
    assert_budget("todo!(", 0);
}

#[test]
fn unimplemented_budget() {
    assert_budget("unimplemented!(", 0);
}

// Silent loss.

#[test]
fn silent_discard_budget() {
    assert_budget("let _ =", 0);
}

#[test]
fn dot_ok_budget() {
    assert_budget(".ok()", 0);
}

// Structure.

#[test]
fn allow_dead_code_budget() {
    assert_budget("#[allow(dead_code)]", 0);
}
