//! Lexer, block structurer, and recursive-descent declaration parser
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → raw tokens with positions
//!     ↓
//! Block structurer → Indent/Dedent markers, trivia stripped
//!     ↓
//! Parser → Module AST + diagnostics
//! ```
//!
//! The parser can also be fed an externally produced raw token stream via
//! [`parse_tokens`]; the bundled lexer is just the default front end.
//! Parsing one source unit is a single synchronous pass with bounded
//! lookahead and no backtracking; independent units can be parsed in
//! parallel because a session shares no mutable state with any other.

mod block;
mod lexer;
#[allow(clippy::module_inception)]
mod parser;
mod token;

pub mod ast;
pub mod errors;

pub use ast::*;
pub use lexer::{Lexer, tokenize};
pub use parser::{Parse, parse_source, parse_tokens};
pub use token::{Token, TokenKind};
