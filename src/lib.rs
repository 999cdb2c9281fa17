//! # pydex-base
//!
//! Core library for Python declaration parsing, AST, and symbol extraction.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! symbols   → Symbol extraction: flatten the AST into SymbolRecords
//!   ↓
//! parser    → Logos lexer, block structurer, recursive-descent parser
//!   ↓
//! base      → Primitives (Position, Span)
//! ```
//!
//! The crate recognizes structure and extracts a symbol model; it never
//! executes or type-checks the source, and it resolves no cross-file
//! references. Symbol records and diagnostics are always returned
//! together so callers can render partial results alongside errors.

// ============================================================================
// MODULES (dependency order: base → parser → symbols)
// ============================================================================

/// Foundation types: Position, Span
pub mod base;

/// Parser: logos lexer, block structurer, recursive-descent parser
pub mod parser;

/// Symbol extraction: AST → flat symbol table
pub mod symbols;

// Re-export commonly needed items
pub use base::{Position, Span};
pub use parser::errors::{Diagnostic, ErrorCode, InternalError, Severity};
pub use parser::{Parse, Token, TokenKind, parse_source, parse_tokens};
pub use symbols::{ExtractionResult, SymbolKind, SymbolRecord, extract_symbols};

/// The durable output of one analysis session: the flat symbol table plus
/// every diagnostic collected while producing it, ordered by source
/// position.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub symbols: Vec<SymbolRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }
}

/// Parse one source unit and extract its symbol table.
///
/// The AST is discarded after extraction; callers that need it should use
/// [`parse_source`] and [`extract_symbols`] separately.
pub fn analyze(source: &str) -> Result<Analysis, InternalError> {
    let parse = parse_source(source)?;
    let extraction = extract_symbols(&parse.module);

    let mut diagnostics = parse.diagnostics;
    diagnostics.extend(extraction.diagnostics);
    diagnostics.sort_by_key(|d| (d.line, d.column));

    tracing::debug!(
        symbols = extraction.symbols.len(),
        diagnostics = diagnostics.len(),
        "analysis finished"
    );
    Ok(Analysis {
        symbols: extraction.symbols,
        diagnostics,
    })
}

/// Analyze independent source units in parallel.
///
/// Each unit gets its own parse session with no shared mutable state, so
/// no locking is involved; an internal error in one unit leaves the
/// others intact.
pub fn analyze_many(sources: &[&str]) -> Vec<Result<Analysis, InternalError>> {
    use rayon::prelude::*;
    sources.par_iter().map(|source| analyze(source)).collect()
}
