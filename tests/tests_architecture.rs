//! Module Dependency Tests
//!
//! These tests enforce the dependency rules between the crate's modules:
//!
//! ```text
//! parser
//!   ↓
//! dialect (only the SyntaxKind enum from parser, for the applicability table)
//!   ↓
//! base
//! ```

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

/// `use crate::...` lines in `dir` whose path does not start with one of
/// `allowed`.
fn collect_violations(dir: &str, allowed: &[&str]) -> Vec<String> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join(dir);
    let mut violations = Vec::new();
    for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }
        let content = fs::read_to_string(path).unwrap();
        for (number, line) in content.lines().enumerate() {
            let Some(import) = line.trim().strip_prefix("use crate::") else {
                continue;
            };
            if !allowed.iter().any(|prefix| import.starts_with(prefix)) {
                violations.push(format!("{}:{}: {}", path.display(), number + 1, line.trim()));
            }
        }
    }
    violations
}

#[test]
fn test_base_has_no_crate_dependencies() {
    let violations = collect_violations("src/base", &[]);
    assert!(
        violations.is_empty(),
        "\nbase should not depend on other crate modules.\nViolations:\n{}\n",
        violations.join("\n")
    );
}

#[test]
fn test_dialect_only_uses_syntax_kind() {
    let violations = collect_violations("src/dialect", &["parser::SyntaxKind"]);
    assert!(
        violations.is_empty(),
        "\ndialect may only use parser::SyntaxKind.\nViolations:\n{}\n",
        violations.join("\n")
    );
}

#[test]
fn test_grammar_does_not_reach_outside_parser() {
    let violations = collect_violations("src/parser/grammar", &["parser::", "dialect::"]);
    assert!(
        violations.is_empty(),
        "\ngrammar should only depend on the parser and dialect modules.\nViolations:\n{}\n",
        violations.join("\n")
    );
}
