//! Token contract consumed by the declaration parser.
//!
//! Tokens carry their kind, lexeme text, and 0-indexed source position.
//! The layout kinds (`Newline`, `Indent`, `Dedent`, `Eof`) are synthesized
//! by the block structurer; everything else comes from the lexer.

use crate::base::Span;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: u32,
    pub column: u32,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, line: u32, column: u32) -> Self {
        Self {
            kind,
            text,
            line,
            column,
        }
    }

    /// A zero-width synthetic token (layout markers, end of input).
    pub fn synthetic(kind: TokenKind, line: u32, column: u32) -> Token<'static> {
        Token {
            kind,
            text: "",
            line,
            column,
        }
    }

    /// The source span covered by this token's text.
    pub fn span(&self) -> Span {
        let mut line = self.line;
        let mut column = self.column;
        for c in self.text.chars() {
            if c == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        Span::from_coords(self.line, self.column, line, column)
    }

    /// Position immediately after this token on its final line.
    pub fn end_column(&self) -> u32 {
        self.span().end.column
    }
}

/// Token kinds for Python-like source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    Whitespace,
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    Ident,
    Int,
    Float,
    Str,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION
    // =========================================================================
    Arrow,
    EqEq,
    BangEq,
    LtEq,
    GtEq,
    StarStar,
    SlashSlash,
    Shl,
    Shr,
    ColonEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Colon,
    Semicolon,
    Comma,
    Dot,
    At,
    Eq,
    Lt,
    Gt,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    AndKw,
    AsKw,
    AssertKw,
    AsyncKw,
    AwaitKw,
    BreakKw,
    ClassKw,
    ContinueKw,
    DefKw,
    DelKw,
    ElifKw,
    ElseKw,
    ExceptKw,
    FalseKw,
    FinallyKw,
    ForKw,
    FromKw,
    GlobalKw,
    IfKw,
    ImportKw,
    InKw,
    IsKw,
    LambdaKw,
    NoneKw,
    NonlocalKw,
    NotKw,
    OrKw,
    PassKw,
    RaiseKw,
    ReturnKw,
    TrueKw,
    TryKw,
    WhileKw,
    WithKw,
    YieldKw,

    // =========================================================================
    // LAYOUT (synthesized by the block structurer)
    // =========================================================================
    Newline,
    Indent,
    Dedent,
    Eof,

    /// Unrecognized input
    Error,
}

impl TokenKind {
    /// Whitespace and comments, dropped before parsing
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::AndKw
                | Self::AsKw
                | Self::AssertKw
                | Self::AsyncKw
                | Self::AwaitKw
                | Self::BreakKw
                | Self::ClassKw
                | Self::ContinueKw
                | Self::DefKw
                | Self::DelKw
                | Self::ElifKw
                | Self::ElseKw
                | Self::ExceptKw
                | Self::FalseKw
                | Self::FinallyKw
                | Self::ForKw
                | Self::FromKw
                | Self::GlobalKw
                | Self::IfKw
                | Self::ImportKw
                | Self::InKw
                | Self::IsKw
                | Self::LambdaKw
                | Self::NoneKw
                | Self::NonlocalKw
                | Self::NotKw
                | Self::OrKw
                | Self::PassKw
                | Self::RaiseKw
                | Self::ReturnKw
                | Self::TrueKw
                | Self::TryKw
                | Self::WhileKw
                | Self::WithKw
                | Self::YieldKw
        )
    }

    pub fn is_operator(self) -> bool {
        matches!(
            self,
            Self::Arrow
                | Self::EqEq
                | Self::BangEq
                | Self::LtEq
                | Self::GtEq
                | Self::StarStar
                | Self::SlashSlash
                | Self::Shl
                | Self::Shr
                | Self::ColonEq
                | Self::LParen
                | Self::RParen
                | Self::LBracket
                | Self::RBracket
                | Self::LBrace
                | Self::RBrace
                | Self::Colon
                | Self::Semicolon
                | Self::Comma
                | Self::Dot
                | Self::At
                | Self::Eq
                | Self::Lt
                | Self::Gt
                | Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Slash
                | Self::Percent
                | Self::Amp
                | Self::Pipe
                | Self::Caret
                | Self::Tilde
        )
    }

    /// Layout markers produced by the block structurer
    pub fn is_layout(self) -> bool {
        matches!(self, Self::Newline | Self::Indent | Self::Dedent | Self::Eof)
    }

    /// Opening bracket, suppresses newlines until matched
    pub fn is_open_bracket(self) -> bool {
        matches!(self, Self::LParen | Self::LBracket | Self::LBrace)
    }

    pub fn is_close_bracket(self) -> bool {
        matches!(self, Self::RParen | Self::RBracket | Self::RBrace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_categories() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::Ident.is_trivia());

        assert!(TokenKind::DefKw.is_keyword());
        assert!(TokenKind::AsyncKw.is_keyword());
        assert!(!TokenKind::Ident.is_keyword());

        assert!(TokenKind::Arrow.is_operator());
        assert!(TokenKind::At.is_operator());
        assert!(!TokenKind::Str.is_operator());

        assert!(TokenKind::Indent.is_layout());
        assert!(TokenKind::Eof.is_layout());
    }

    #[test]
    fn test_single_line_span() {
        let token = Token::new(TokenKind::Ident, "multiply", 3, 8);
        let span = token.span();
        assert_eq!(span.start.line, 3);
        assert_eq!(span.start.column, 8);
        assert_eq!(span.end.line, 3);
        assert_eq!(span.end.column, 16);
    }

    #[test]
    fn test_multi_line_span() {
        let token = Token::new(TokenKind::Str, "\"\"\"doc\nbody\"\"\"", 0, 0);
        let span = token.span();
        assert_eq!(span.start.line, 0);
        assert_eq!(span.end.line, 1);
        assert_eq!(span.end.column, 7);
    }
}
