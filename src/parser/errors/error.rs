//! Diagnostic types for parse and extraction errors
//!
//! Diagnostics are accumulated during a parse session and returned to the
//! caller alongside the partial result; they are never used as control flow.
//! The only fatal condition is [`InternalError`], which signals a defect in
//! this crate rather than malformed input.

use super::codes::ErrorCode;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// A hard error in the input
    #[default]
    Error,
    /// A condition worth flagging that doesn't invalidate the input
    Warning,
}

impl Severity {
    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A recoverable problem found while parsing or extracting
///
/// Provides:
/// - Human-readable message
/// - Source position (0-indexed line/column of the triggering token)
/// - Categorized error code
/// - Severity level
/// - Optional suggestion for fixing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,
    /// Line of the triggering token (0-indexed)
    pub line: u32,
    /// Column of the triggering token (0-indexed)
    pub column: u32,
    /// Categorized error code
    pub code: ErrorCode,
    /// Severity level
    pub severity: Severity,
    /// Optional suggestion for fixing the problem
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Create a new Error-severity diagnostic
    pub fn new(message: impl Into<String>, line: u32, column: u32, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            code,
            severity: Severity::Error,
            hint: None,
        }
    }

    /// Create a Warning-severity diagnostic
    pub fn warning(message: impl Into<String>, line: u32, column: u32, code: ErrorCode) -> Self {
        Self::new(message, line, column, code).with_severity(Severity::Warning)
    }

    /// Add a hint to this diagnostic
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Check if this diagnostic is an error
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        let mut result = format!(
            "{}:{}: {} {}: {}",
            self.line, self.column, self.severity.as_str(), self.code, self.message
        );
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {hint}"));
        }
        result
    }
}

/// Fatal internal failure of the parser itself
///
/// Never triggered by malformed input; aborts the current parse session
/// only. Callers running a batch of sessions keep the other sessions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    /// A structural invariant of the parser was broken
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl InternalError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new("expected identifier", 4, 8, ErrorCode::E0301);

        assert_eq!(diag.message, "expected identifier");
        assert_eq!(diag.line, 4);
        assert_eq!(diag.column, 8);
        assert_eq!(diag.code, ErrorCode::E0301);
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.hint.is_none());
    }

    #[test]
    fn test_diagnostic_warning() {
        let diag = Diagnostic::warning("shadows earlier declaration", 10, 0, ErrorCode::E0303);
        assert!(!diag.is_error());
        assert_eq!(diag.severity, Severity::Warning);
    }

    #[test]
    fn test_diagnostic_with_hint() {
        let diag = Diagnostic::new("expected ':'", 2, 17, ErrorCode::E0902)
            .with_hint("declaration headers end with ':'");

        assert_eq!(diag.hint.as_deref(), Some("declaration headers end with ':'"));
    }

    #[test]
    fn test_severity() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());

        assert_eq!(Severity::Error.as_str(), "error");
        assert_eq!(Severity::Warning.as_str(), "warning");
    }

    #[test]
    fn test_format() {
        let diag = Diagnostic::new("expected ':'", 2, 17, ErrorCode::E0902).with_hint("add ':'");

        let formatted = diag.format();
        assert!(formatted.contains("E0902"));
        assert!(formatted.contains("expected ':'"));
        assert!(formatted.contains("2:17"));
        assert!(formatted.contains("hint"));
    }

    #[test]
    fn test_internal_error_display() {
        let err = InternalError::invariant("indentation stack underflow");
        assert_eq!(
            err.to_string(),
            "internal invariant violated: indentation stack underflow"
        );
    }
}
