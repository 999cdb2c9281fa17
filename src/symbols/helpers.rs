//! Docstring normalization and receiver-parameter conventions.

use crate::parser::{Decorator, Parameter, ParameterKind};

/// Normalize a docstring: strip the enclosing quote markers, then strip the
/// minimal common leading-whitespace prefix across the continuation lines.
/// Leading and trailing blank lines are dropped.
pub(super) fn normalize_docstring(raw: &str) -> String {
    cleandoc(strip_quote_markers(raw))
}

/// Strip triple or single quote markers from a string literal.
pub(super) fn strip_quote_markers(raw: &str) -> &str {
    for marker in ["\"\"\"", "'''"] {
        if raw.len() >= 6 && raw.starts_with(marker) && raw.ends_with(marker) {
            return &raw[3..raw.len() - 3];
        }
    }
    for marker in ["\"", "'"] {
        if raw.len() >= 2 && raw.starts_with(marker) && raw.ends_with(marker) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

fn leading_ws_width(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Conventional documentation-string normalization: the first line stands
/// on its own and is trimmed; the remaining non-blank lines lose their
/// common margin.
fn cleandoc(text: &str) -> String {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or("").trim();
    let rest: Vec<&str> = lines.collect();

    let margin = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_ws_width(line))
        .min()
        .unwrap_or(0);

    let mut out: Vec<String> = vec![first.to_string()];
    for line in &rest {
        if line.trim().is_empty() {
            out.push(String::new());
        } else {
            let stripped: String = line.chars().skip(margin).collect();
            out.push(stripped.trim_end().to_string());
        }
    }

    while out.last().is_some_and(|line| line.is_empty()) {
        out.pop();
    }
    while out.first().is_some_and(|line| line.is_empty()) {
        out.remove(0);
    }
    out.join("\n")
}

/// Is this parameter the conventional receiver of a method?
///
/// `self` always counts unless the method is a staticmethod; `cls` counts
/// only under `@classmethod`.
pub(super) fn is_receiver(param: &Parameter, decorators: &[Decorator]) -> bool {
    if param.kind != ParameterKind::Plain {
        return false;
    }
    match param.name.as_str() {
        "self" => !decorators.iter().any(|d| d.name == "staticmethod"),
        "cls" => decorators.iter().any(|d| d.name == "classmethod"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quote_markers() {
        assert_eq!(strip_quote_markers("\"\"\"Doc.\"\"\""), "Doc.");
        assert_eq!(strip_quote_markers("'''Doc.'''"), "Doc.");
        assert_eq!(strip_quote_markers("\"Doc.\""), "Doc.");
        assert_eq!(strip_quote_markers("'Doc.'"), "Doc.");
        assert_eq!(strip_quote_markers("bare"), "bare");
        // a lone quote is not a quoted pair
        assert_eq!(strip_quote_markers("\""), "\"");
    }

    #[test]
    fn test_normalize_single_line() {
        assert_eq!(normalize_docstring("\"\"\"User data class.\"\"\""), "User data class.");
    }

    #[test]
    fn test_normalize_multi_line() {
        let raw = "\"\"\"Summary line.\n\n    Details over\n    two lines.\n    \"\"\"";
        assert_eq!(
            normalize_docstring(raw),
            "Summary line.\n\nDetails over\ntwo lines."
        );
    }

    #[test]
    fn test_normalize_leading_newline() {
        let raw = "\"\"\"\nBody text\n\"\"\"";
        assert_eq!(normalize_docstring(raw), "Body text");
    }
}
