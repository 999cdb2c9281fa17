//! Public type definitions for symbol extraction.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::parser::errors::Diagnostic;

/// The kind of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymbolKind {
    Function,
    Method,
    Class,
    Field,
}

impl SymbolKind {
    /// Get a display string for this kind.
    pub fn display(&self) -> &'static str {
        match self {
            Self::Function => "Function",
            Self::Method => "Method",
            Self::Class => "Class",
            Self::Field => "Field",
        }
    }
}

/// A symbol extracted from the AST.
///
/// One record per declaration, in source order. Records own their data and
/// are independent of the AST's lifetime; the tree can be discarded after
/// extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymbolRecord {
    /// The simple name of the symbol
    pub name: Arc<str>,
    /// Enclosing declaration names joined with '.', e.g. `Calculator.multiply`
    pub qualified_name: Arc<str>,
    /// What kind of symbol this is
    pub kind: SymbolKind,
    /// Rendered signature, e.g. `multiply(a: int, b: int) -> int`
    pub signature: String,
    /// Normalized documentation text, if any
    pub docstring: Option<String>,
    /// Decorators as written, in declaration order
    pub decorators: Vec<String>,
    /// Whether the declaration carried the async marker
    pub is_async: bool,
    /// Line of the declaration name (0-indexed)
    pub source_line: u32,
}

/// Result of symbol extraction: the symbol table plus any warnings found
/// while flattening (e.g. shadowed declarations).
#[derive(Debug, Default)]
pub struct ExtractionResult {
    /// Extracted symbols, in source order.
    pub symbols: Vec<SymbolRecord>,
    /// Extraction diagnostics, in source order.
    pub diagnostics: Vec<Diagnostic>,
}
