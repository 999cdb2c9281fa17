//! Foundation types: source positions and spans.

mod position;

pub use position::{Position, Span};
