//! Error recovery: malformed constructs never abort the whole unit.

use pydex::{ErrorCode, Severity, analyze};

#[test]
fn test_invalid_declaration_between_valid_ones() {
    let source = "def valid_one():\n    pass\n\ndef 123bad():\n    pass\n\ndef valid_two():\n    pass\n";
    let analysis = analyze(source).unwrap();

    let names: Vec<&str> = analysis.symbols.iter().map(|s| s.name.as_ref()).collect();
    assert_eq!(names, vec!["valid_one", "valid_two"]);

    assert!(
        analysis
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error && d.line == 3),
        "expected an error referencing the invalid declaration's line, got {:?}",
        analysis.diagnostics
    );
}

#[test]
fn test_missing_parameter_parenthesis() {
    let source = "def broken:\n    pass\n\ndef fine():\n    pass\n";
    let analysis = analyze(source).unwrap();
    assert!(analysis.has_errors());
    assert!(analysis.symbols.iter().any(|s| s.name.as_ref() == "fine"));
}

#[test]
fn test_unclosed_parameter_list() {
    let source = "def broken(a, b:\n    pass\n\ndef fine():\n    pass\n";
    let analysis = analyze(source).unwrap();
    assert!(analysis.has_errors());
    assert!(analysis.symbols.iter().any(|s| s.name.as_ref() == "fine"));
}

#[test]
fn test_inconsistent_indentation_is_reported_and_survived() {
    let source = "def f():\n        pass\n      pass\n\ndef g():\n    pass\n";
    let analysis = analyze(source).unwrap();
    assert!(
        analysis
            .diagnostics
            .iter()
            .any(|d| d.code == ErrorCode::E0201)
    );
    let names: Vec<&str> = analysis.symbols.iter().map(|s| s.name.as_ref()).collect();
    assert!(names.contains(&"f"));
    assert!(names.contains(&"g"));
}

#[test]
fn test_dangling_decorator() {
    let source = "@dataclass\nCONSTANT = 1\n\nclass Fine:\n    pass\n";
    let analysis = analyze(source).unwrap();
    assert!(
        analysis
            .diagnostics
            .iter()
            .any(|d| d.code == ErrorCode::E0502)
    );
    assert!(analysis.symbols.iter().any(|s| s.name.as_ref() == "Fine"));
}

#[test]
fn test_malformed_class_member_keeps_other_members() {
    let source = "class C:\n    def good(self):\n        pass\n\n    def (self):\n        pass\n\n    def also_good(self):\n        pass\n";
    let analysis = analyze(source).unwrap();
    assert!(analysis.has_errors());
    let names: Vec<&str> = analysis.symbols.iter().map(|s| s.name.as_ref()).collect();
    assert_eq!(names, vec!["C", "good", "also_good"]);
}

#[test]
fn test_diagnostics_ordered_by_position() {
    let source = "def 1bad():\n    pass\n\ndef 2worse():\n    pass\n";
    let analysis = analyze(source).unwrap();
    assert!(analysis.diagnostics.len() >= 2);
    let positions: Vec<(u32, u32)> = analysis
        .diagnostics
        .iter()
        .map(|d| (d.line, d.column))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_invalid_character_is_a_lexical_diagnostic() {
    let source = "def f():\n    x = 1 ¤ 2\n    return x\n";
    let analysis = analyze(source).unwrap();
    assert!(
        analysis
            .diagnostics
            .iter()
            .any(|d| d.code == ErrorCode::E0101)
    );
    assert_eq!(analysis.symbols.len(), 1);
}
