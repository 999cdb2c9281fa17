//! Parser error handling module
//!
//! Provides diagnostics for the block structurer, the declaration parser,
//! and the symbol extractor:
//! - Categorized error codes for filtering and documentation
//! - Context-aware error messages
//! - An append-only collector shared across one parse session

mod codes;
mod context;
mod error;
mod sink;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{Diagnostic, InternalError, Severity};
pub use sink::DiagnosticSink;
