//! Symbol extraction from the AST — pure functions that return records.
//!
//! # Module structure
//!
//! - [`types`] — Public type definitions (SymbolRecord, SymbolKind)
//! - [`context`] — ExtractionContext for tracking scope during extraction
//! - [`helpers`] — Docstring normalization and receiver conventions
//! - [`signature`] — Signature rendering
//! - [`extract`] — Traversal and extraction entry point

mod context;
mod extract;
mod helpers;
mod signature;
mod types;


pub use extract::extract_symbols;
pub use signature::UNTYPED_MARKER;
pub use types::{ExtractionResult, SymbolKind, SymbolRecord};
