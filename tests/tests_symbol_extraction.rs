//! End-to-end symbol extraction over whole source units.

use pydex::{SymbolKind, analyze};

const SAMPLE: &str = include_str!("fixtures/sample.py");

#[test]
fn test_sample_file_symbol_table() {
    let analysis = analyze(SAMPLE).unwrap();
    assert!(
        analysis.diagnostics.is_empty(),
        "diagnostics: {:?}",
        analysis.diagnostics
    );

    let names: Vec<&str> = analysis
        .symbols
        .iter()
        .map(|s| s.qualified_name.as_ref())
        .collect();
    assert_eq!(
        names,
        vec![
            "add",
            "Calculator",
            "Calculator.__init__",
            "Calculator.multiply",
            "Calculator.get_history",
            "User",
            "User.id",
            "User.name",
            "User.email",
            "fetch_data",
        ]
    );
}

#[test]
fn test_sample_file_function_details() {
    let analysis = analyze(SAMPLE).unwrap();

    let add = &analysis.symbols[0];
    assert_eq!(add.kind, SymbolKind::Function);
    assert_eq!(add.signature, "add(a: int, b: int) -> int");
    assert_eq!(add.docstring.as_deref(), Some("Add two numbers together."));
    assert_eq!(add.source_line, 4);

    let multiply = analysis
        .symbols
        .iter()
        .find(|s| s.name.as_ref() == "multiply")
        .unwrap();
    assert_eq!(multiply.kind, SymbolKind::Method);
    assert_eq!(multiply.signature, "multiply(a: int, b: int) -> int");

    let init = analysis
        .symbols
        .iter()
        .find(|s| s.name.as_ref() == "__init__")
        .unwrap();
    assert_eq!(init.signature, "__init__() -> ?");
}

#[test]
fn test_sample_file_dataclass() {
    let analysis = analyze(SAMPLE).unwrap();

    let class_records: Vec<_> = analysis
        .symbols
        .iter()
        .filter(|s| s.kind == SymbolKind::Class && s.name.as_ref() == "User")
        .collect();
    assert_eq!(class_records.len(), 1);

    let user = class_records[0];
    assert_eq!(user.decorators, vec!["dataclass".to_string()]);
    assert_eq!(user.docstring.as_deref(), Some("User data class."));

    let id = analysis
        .symbols
        .iter()
        .find(|s| s.qualified_name.as_ref() == "User.id")
        .unwrap();
    assert_eq!(id.kind, SymbolKind::Field);
    assert_eq!(id.signature, "id: str");
}

#[test]
fn test_sample_file_async_function() {
    let analysis = analyze(SAMPLE).unwrap();

    let fetch = analysis
        .symbols
        .iter()
        .find(|s| s.name.as_ref() == "fetch_data")
        .unwrap();
    assert!(fetch.is_async);
    assert_eq!(fetch.kind, SymbolKind::Function);
    assert_eq!(fetch.signature, "fetch_data(url: str) -> dict");
    // the two nested `async with` blocks contribute no records
    assert_eq!(
        analysis
            .symbols
            .iter()
            .filter(|s| s.qualified_name.starts_with("fetch_data"))
            .count(),
        1
    );
}

#[test]
fn test_reparse_is_idempotent() {
    let first = analyze(SAMPLE).unwrap();
    let second = analyze(SAMPLE).unwrap();
    assert_eq!(first.symbols, second.symbols);
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn test_order_matches_source() {
    let analysis = analyze(SAMPLE).unwrap();
    let lines: Vec<u32> = analysis
        .symbols
        .iter()
        .map(|s| s.source_line)
        .collect();
    let mut sorted = lines.clone();
    sorted.sort_unstable();
    assert_eq!(lines, sorted);
}

#[test]
fn test_empty_input() {
    let analysis = analyze("").unwrap();
    assert!(analysis.symbols.is_empty());
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn test_parallel_analysis_matches_sequential() {
    let sources = vec![SAMPLE, "def solo():\n    pass\n", ""];
    let results = pydex::analyze_many(&sources);
    assert_eq!(results.len(), 3);
    let parallel = results[0].as_ref().unwrap();
    let sequential = analyze(SAMPLE).unwrap();
    assert_eq!(parallel.symbols, sequential.symbols);
    assert_eq!(results[1].as_ref().unwrap().symbols.len(), 1);
    assert!(results[2].as_ref().unwrap().symbols.is_empty());
}
