//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Indentation and layout errors
//! - E03xx: Declaration errors
//! - E04xx: Parameter and signature errors
//! - E05xx: Decorator errors
//! - E06xx: Resource block errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
///
/// Each error code represents a specific category of parse error,
/// enabling filtering, documentation, and tooling integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,

    // =========================================================================
    // E02xx: Indentation and layout errors
    // =========================================================================
    /// Dedent to a width that matches no enclosing indentation level
    E0201,
    /// Indent where no block was opened
    E0202,
    /// Block expected but the next line is not indented
    E0203,
    /// Unclosed `(`, `[` or `{` swallowing following lines
    E0204,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Missing identifier/name
    E0301,
    /// Missing declaration body
    E0302,
    /// Declaration shadows an earlier one in the same scope
    E0303,

    // =========================================================================
    // E04xx: Parameter and signature errors
    // =========================================================================
    /// Invalid token in parameter list
    E0401,
    /// Missing parameter name
    E0402,
    /// Annotation marker present but no annotation follows
    E0403,
    /// Parameter list is never closed
    E0404,

    // =========================================================================
    // E05xx: Decorator errors
    // =========================================================================
    /// Invalid decorator name
    E0501,
    /// Decorator not followed by a function or class declaration
    E0502,

    // =========================================================================
    // E06xx: Resource block errors
    // =========================================================================
    /// Missing resource expression in a `with` item
    E0601,
    /// Missing binding name after `as`
    E0602,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0301")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            // Indentation
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            // Declaration
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            // Parameter
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            // Decorator
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            // Resource
            Self::E0601 => "E0601",
            Self::E0602 => "E0602",
            // Generic
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 => "indentation error",
            Self::E0301 | Self::E0302 | Self::E0303 => "declaration error",
            Self::E0401 | Self::E0402 | Self::E0403 | Self::E0404 => "parameter error",
            Self::E0501 | Self::E0502 => "decorator error",
            Self::E0601 | Self::E0602 => "resource block error",
            Self::E0901 | Self::E0902 | Self::E0999 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            // Indentation
            Self::E0201 => "inconsistent indentation",
            Self::E0202 => "unexpected indent",
            Self::E0203 => "expected an indented block",
            Self::E0204 => "unclosed delimiter",
            // Declaration
            Self::E0301 => "missing identifier",
            Self::E0302 => "missing declaration body",
            Self::E0303 => "shadowed declaration",
            // Parameter
            Self::E0401 => "invalid parameter",
            Self::E0402 => "missing parameter name",
            Self::E0403 => "missing type annotation",
            Self::E0404 => "unclosed parameter list",
            // Decorator
            Self::E0501 => "invalid decorator name",
            Self::E0502 => "dangling decorator",
            // Resource
            Self::E0601 => "missing resource expression",
            Self::E0602 => "missing binding name",
            // Generic
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
            Self::E0999 => "internal parser error",
        }
    }

    /// Check if this is an indentation/layout error
    pub fn is_indentation(&self) -> bool {
        matches!(self, Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204)
    }

    /// Check if this is a recoverable error (parsing can continue)
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::E0999)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E0201.as_str(), "E0201");
        assert_eq!(ErrorCode::E0901.as_str(), "E0901");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::E0301), "E0301");
    }

    #[test]
    fn test_error_code_default_message() {
        assert_eq!(ErrorCode::E0201.default_message(), "inconsistent indentation");
        assert_eq!(ErrorCode::E0502.default_message(), "dangling decorator");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0201.category_description(), "indentation error");
        assert_eq!(ErrorCode::E0301.category_description(), "declaration error");
        assert_eq!(ErrorCode::E0402.category_description(), "parameter error");
    }

    #[test]
    fn test_is_indentation() {
        assert!(ErrorCode::E0201.is_indentation());
        assert!(ErrorCode::E0203.is_indentation());
        assert!(!ErrorCode::E0301.is_indentation());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(ErrorCode::E0201.is_recoverable());
        assert!(!ErrorCode::E0999.is_recoverable());
    }
}
