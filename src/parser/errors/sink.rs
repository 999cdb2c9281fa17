//! Append-only diagnostic collector shared across one parse session
//!
//! The block structurer, the declaration parser, and the symbol extractor
//! all push into the same sink. Diagnostics are kept in insertion order and
//! sorted by source position when the session finishes; identical entries
//! at different positions are all retained.

use super::codes::ErrorCode;
use super::error::Diagnostic;

/// Collects diagnostics for one parse session
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Push an Error-severity diagnostic
    pub fn error(&mut self, message: impl Into<String>, line: u32, column: u32, code: ErrorCode) {
        self.push(Diagnostic::new(message, line, column, code));
    }

    /// Push a Warning-severity diagnostic
    pub fn warning(&mut self, message: impl Into<String>, line: u32, column: u32, code: ErrorCode) {
        self.push(Diagnostic::warning(message, line, column, code));
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    /// Finish the session: diagnostics ordered by the source position of
    /// the triggering token (stable, so same-position entries keep their
    /// insertion order).
    pub fn into_diagnostics(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|d| (d.line, d.column));
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_orders_by_position() {
        let mut sink = DiagnosticSink::new();
        sink.error("later", 5, 0, ErrorCode::E0901);
        sink.error("earlier", 2, 4, ErrorCode::E0901);
        sink.warning("last", 9, 1, ErrorCode::E0303);

        let diags = sink.into_diagnostics();
        assert_eq!(diags[0].message, "earlier");
        assert_eq!(diags[1].message, "later");
        assert_eq!(diags[2].message, "last");
    }

    #[test]
    fn test_sink_keeps_duplicates() {
        let mut sink = DiagnosticSink::new();
        sink.error("unexpected token", 1, 0, ErrorCode::E0901);
        sink.error("unexpected token", 3, 0, ErrorCode::E0901);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_has_errors() {
        let mut sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        sink.warning("shadowed", 0, 0, ErrorCode::E0303);
        assert!(!sink.has_errors());
        sink.error("bad", 0, 0, ErrorCode::E0901);
        assert!(sink.has_errors());
    }
}
