//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries hold:
//! domain is pure, services talk to the outside world only through ports,
//! and infrastructure never reaches up into presentation code.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().starts_with("#[cfg(test)]") && !self.in_test_block {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Production lines of a file: no comments, nothing inside `#[cfg(test)]`.
fn production_lines(path: &Path) -> Vec<(usize, String)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let mut tracker = CfgTestTracker::new();
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            let comment = trimmed.starts_with("//") || trimmed.starts_with("/*");
            (!in_test && !comment).then(|| (i + 1, line.to_string()))
        })
        .collect()
}

/// Every production line under `src/<layer>` that mentions a forbidden path.
fn violations(layer: &str, forbidden: &[&str], skip: &[&str]) -> Vec<String> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut found = Vec::new();
    for file in collect_rs_files(&root.join(layer)) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        if skip.iter().any(|s| rel.ends_with(s)) {
            continue;
        }
        for (lineno, line) in production_lines(&file) {
            for needle in forbidden {
                if line.contains(needle) {
                    found.push(format!("{rel}:{lineno}: `{needle}` in: {}", line.trim()));
                }
            }
        }
    }
    found
}

#[test]
fn domain_is_pure() {
    let found = violations(
        "domain",
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "tokio::",
            "std::fs",
            "std::process",
            "std::net",
        ],
        &[],
    );
    assert!(found.is_empty(), "domain/ must not do I/O:\n{}", found.join("\n"));
}

#[test]
fn application_reaches_io_only_through_ports() {
    let found = violations(
        "application",
        &[
            "crate::infra",
            "crate::commands",
            "crate::output",
            "std::fs",
            "std::process::Command",
            "tokio::process",
            "ureq::",
        ],
        &["test_support.rs"],
    );
    assert!(
        found.is_empty(),
        "application/ must go through port traits:\n{}",
        found.join("\n")
    );
}

#[test]
fn infra_does_not_depend_on_presentation() {
    let found = violations("infra", &["crate::commands", "crate::output"], &[]);
    assert!(found.is_empty(), "infra/ must not import presentation:\n{}", found.join("\n"));
}

#[test]
fn no_inline_json_branching_in_commands() {
    let found = violations("commands", &["json: bool", "if json", "if !json"], &[]);
    assert!(
        found.is_empty(),
        "commands/ should render through app.renderer():\n{}",
        found.join("\n")
    );
}

#[test]
fn services_never_print() {
    let found = violations(
        "application/services",
        &["println!", "eprintln!", "print!("],
        &["test_support.rs"],
    );
    assert!(
        found.is_empty(),
        "services report through ProgressReporter:\n{}",
        found.join("\n")
    );
}
