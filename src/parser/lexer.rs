//! Logos-based lexer for Python-like source
//!
//! Fast tokenization using the logos crate. The lexer produces the raw
//! token stream (including whitespace and newlines); the block structurer
//! turns layout into explicit Indent/Dedent markers afterwards.

use super::token::{Token, TokenKind};
use logos::Logos;

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            line: 0,
            column: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let (line, column) = (self.line, self.column);
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };

        Some(Token::new(kind, text, line, column))
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\f]+")]
    Whitespace,

    // Explicit line joining: backslash-newline behaves like plain whitespace
    #[regex(r"\\\r?\n")]
    LineJoin,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"#[^\n]*")]
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*")]
    Int,

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#)]
    TripleDoubleString,

    #[regex(r"'''([^']|'[^']|''[^'])*'''")]
    TripleSingleString,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    DoubleString,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    SingleString,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("->")]
    Arrow,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("**")]
    StarStar,

    #[token("//")]
    SlashSlash,

    #[token("<<")]
    Shl,

    #[token(">>")]
    Shr,

    #[token(":=")]
    ColonEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,

    // =========================================================================
    // KEYWORDS (alphabetical, longest match wins in logos)
    // =========================================================================
    #[token("and")]
    AndKw,
    #[token("as")]
    AsKw,
    #[token("assert")]
    AssertKw,
    #[token("async")]
    AsyncKw,
    #[token("await")]
    AwaitKw,
    #[token("break")]
    BreakKw,
    #[token("class")]
    ClassKw,
    #[token("continue")]
    ContinueKw,
    #[token("def")]
    DefKw,
    #[token("del")]
    DelKw,
    #[token("elif")]
    ElifKw,
    #[token("else")]
    ElseKw,
    #[token("except")]
    ExceptKw,
    #[token("False")]
    FalseKw,
    #[token("finally")]
    FinallyKw,
    #[token("for")]
    ForKw,
    #[token("from")]
    FromKw,
    #[token("global")]
    GlobalKw,
    #[token("if")]
    IfKw,
    #[token("import")]
    ImportKw,
    #[token("in")]
    InKw,
    #[token("is")]
    IsKw,
    #[token("lambda")]
    LambdaKw,
    #[token("None")]
    NoneKw,
    #[token("nonlocal")]
    NonlocalKw,
    #[token("not")]
    NotKw,
    #[token("or")]
    OrKw,
    #[token("pass")]
    PassKw,
    #[token("raise")]
    RaiseKw,
    #[token("return")]
    ReturnKw,
    #[token("True")]
    TrueKw,
    #[token("try")]
    TryKw,
    #[token("while")]
    WhileKw,
    #[token("with")]
    WithKw,
    #[token("yield")]
    YieldKw,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace | LineJoin => TokenKind::Whitespace,
            Newline => TokenKind::Newline,
            Comment => TokenKind::Comment,

            // Literals
            Ident => TokenKind::Ident,
            Int => TokenKind::Int,
            Float => TokenKind::Float,
            TripleDoubleString | TripleSingleString | DoubleString | SingleString => TokenKind::Str,

            // Multi-char punctuation
            Arrow => TokenKind::Arrow,
            EqEq => TokenKind::EqEq,
            BangEq => TokenKind::BangEq,
            LtEq => TokenKind::LtEq,
            GtEq => TokenKind::GtEq,
            StarStar => TokenKind::StarStar,
            SlashSlash => TokenKind::SlashSlash,
            Shl => TokenKind::Shl,
            Shr => TokenKind::Shr,
            ColonEq => TokenKind::ColonEq,

            // Single-char punctuation
            LParen => TokenKind::LParen,
            RParen => TokenKind::RParen,
            LBracket => TokenKind::LBracket,
            RBracket => TokenKind::RBracket,
            LBrace => TokenKind::LBrace,
            RBrace => TokenKind::RBrace,
            Colon => TokenKind::Colon,
            Semicolon => TokenKind::Semicolon,
            Comma => TokenKind::Comma,
            Dot => TokenKind::Dot,
            At => TokenKind::At,
            Eq => TokenKind::Eq,
            Lt => TokenKind::Lt,
            Gt => TokenKind::Gt,
            Plus => TokenKind::Plus,
            Minus => TokenKind::Minus,
            Star => TokenKind::Star,
            Slash => TokenKind::Slash,
            Percent => TokenKind::Percent,
            Amp => TokenKind::Amp,
            Pipe => TokenKind::Pipe,
            Caret => TokenKind::Caret,
            Tilde => TokenKind::Tilde,

            // Keywords
            AndKw => TokenKind::AndKw,
            AsKw => TokenKind::AsKw,
            AssertKw => TokenKind::AssertKw,
            AsyncKw => TokenKind::AsyncKw,
            AwaitKw => TokenKind::AwaitKw,
            BreakKw => TokenKind::BreakKw,
            ClassKw => TokenKind::ClassKw,
            ContinueKw => TokenKind::ContinueKw,
            DefKw => TokenKind::DefKw,
            DelKw => TokenKind::DelKw,
            ElifKw => TokenKind::ElifKw,
            ElseKw => TokenKind::ElseKw,
            ExceptKw => TokenKind::ExceptKw,
            FalseKw => TokenKind::FalseKw,
            FinallyKw => TokenKind::FinallyKw,
            ForKw => TokenKind::ForKw,
            FromKw => TokenKind::FromKw,
            GlobalKw => TokenKind::GlobalKw,
            IfKw => TokenKind::IfKw,
            ImportKw => TokenKind::ImportKw,
            InKw => TokenKind::InKw,
            IsKw => TokenKind::IsKw,
            LambdaKw => TokenKind::LambdaKw,
            NoneKw => TokenKind::NoneKw,
            NonlocalKw => TokenKind::NonlocalKw,
            NotKw => TokenKind::NotKw,
            OrKw => TokenKind::OrKw,
            PassKw => TokenKind::PassKw,
            RaiseKw => TokenKind::RaiseKw,
            ReturnKw => TokenKind::ReturnKw,
            TrueKw => TokenKind::TrueKw,
            TryKw => TokenKind::TryKw,
            WhileKw => TokenKind::WhileKw,
            WithKw => TokenKind::WithKw,
            YieldKw => TokenKind::YieldKw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_def_line() {
        let tokens = tokenize("def add(a: int) -> int:");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::DefKw,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::RParen,
                TokenKind::Whitespace,
                TokenKind::Arrow,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Colon,
            ]
        );
    }

    #[test]
    fn test_lex_positions() {
        let tokens = tokenize("def f():\n    pass\n");
        let pass = tokens.iter().find(|t| t.kind == TokenKind::PassKw).unwrap();
        assert_eq!(pass.line, 1);
        assert_eq!(pass.column, 4);
    }

    #[test]
    fn test_lex_triple_quoted_string() {
        let tokens = tokenize("\"\"\"Add two numbers together.\"\"\"");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Str);
    }

    #[test]
    fn test_lex_triple_quoted_multiline() {
        let tokens = tokenize("\"\"\"\nSummary\n\"\"\"\n");
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_lex_comment() {
        let tokens = tokenize("# note\npass");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[2].kind, TokenKind::PassKw);
    }

    #[test]
    fn test_lex_decorator() {
        let tokens = tokenize("@dataclass");
        assert_eq!(tokens[0].kind, TokenKind::At);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].text, "dataclass");
    }

    #[test]
    fn test_lex_keyword_prefix_is_ident() {
        // identifiers that merely start with a keyword stay identifiers
        let tokens = tokenize("classify defer");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[2].kind, TokenKind::Ident);
    }

    #[test]
    fn test_lex_unrecognized_char() {
        let tokens = tokenize("def f(x¤):");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Error));
    }

    #[test]
    fn test_lex_line_join() {
        let tokens = tokenize("a = 1 + \\\n    2\n");
        // the backslash-newline lexes as whitespace, not a Newline token
        let newlines = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Newline)
            .count();
        assert_eq!(newlines, 1);
    }
}
