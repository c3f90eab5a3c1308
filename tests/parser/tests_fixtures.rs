//! Golden dump fixtures
//!
//! Each `tests/fixtures/<implementation>/<name>.xq` is parsed with the preset
//! for `<implementation>` and its dump compared against `<name>.dump`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::fs;
use std::path::Path;

use walkdir::WalkDir;
use xquery::Dialect;
use xquery::dialect::Implementation;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn dialect_for(path: &Path) -> Dialect {
    let implementation = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .unwrap();
    Dialect::for_implementation(implementation.parse::<Implementation>().unwrap())
}

#[test]
fn test_golden_dumps() {
    let mut checked = 0;
    let mut failures = Vec::new();

    for entry in WalkDir::new(FIXTURES)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "xq") {
            continue;
        }
        let input = fs::read_to_string(path).unwrap();
        let expected = fs::read_to_string(path.with_extension("dump")).unwrap();
        let actual = xquery::parse(&input, &dialect_for(path)).debug_tree();
        if actual != expected {
            failures.push(format!(
                "{}\n--- expected\n{expected}--- actual\n{actual}",
                path.display()
            ));
        }
        checked += 1;
    }

    assert!(checked > 0, "no fixtures found under {FIXTURES}");
    if !failures.is_empty() {
        panic!("{} fixture(s) differ:\n{}", failures.len(), failures.join("\n"));
    }
}
