//! Block structurer: converts whitespace layout into explicit block markers
//!
//! Consumes the raw lexed stream (whitespace, comments, newlines included)
//! and emits a trivia-free stream where every increase in leading width
//! yields one `Indent` and every decrease yields one `Dedent` per level
//! popped. The stream always ends with `Eof`, preceded by the dedents
//! needed to unwind to the base level.
//!
//! Rules, matching the source language's tokenizer:
//! - blank lines and comment-only lines do not affect the stack
//! - tabs advance to the next multiple of 8 columns
//! - newlines inside unclosed `(`/`[`/`{` pairs are implicit line joins
//!
//! A dedent that lands on a width matching no enclosing level is an
//! Error-severity diagnostic; the line is then treated as being at the
//! nearest enclosing width.

use super::errors::{DiagnosticSink, ErrorCode, InternalError};
use super::token::{Token, TokenKind};

/// Leading width of a whitespace run, tabs rounded up to multiples of 8
fn indent_width(text: &str) -> u32 {
    let mut width = 0u32;
    for c in text.chars() {
        match c {
            '\t' => width = (width / 8 + 1) * 8,
            _ => width += 1,
        }
    }
    width
}

/// Does a suppressed newline precede a line that can only start a
/// declaration? Used to recover from unclosed delimiters: `def`/`class`
/// are never legal inside brackets, so seeing one means the bracket was
/// never closed.
fn next_line_starts_declaration(tokens: &[Token<'_>], mut idx: usize) -> bool {
    while let Some(token) = tokens.get(idx) {
        match token.kind {
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::Newline => idx += 1,
            TokenKind::DefKw | TokenKind::ClassKw => return true,
            _ => return false,
        }
    }
    false
}

/// Transform a raw token stream into a block-structured one.
pub(crate) fn structure<'a>(
    tokens: &[Token<'a>],
    sink: &mut DiagnosticSink,
) -> Result<Vec<Token<'a>>, InternalError> {
    let mut out: Vec<Token<'a>> = Vec::with_capacity(tokens.len());
    // Sentinel base level; the stack is never empty.
    let mut stack: Vec<u32> = vec![0];
    let mut bracket_depth: u32 = 0;
    let mut at_line_start = true;
    let mut i = 0;

    let end = tokens
        .last()
        .map(|t| t.span().end)
        .unwrap_or_default();

    while i < tokens.len() {
        if at_line_start && bracket_depth == 0 {
            // Measure leading width and classify the line.
            let mut width = 0u32;
            let mut j = i;
            if tokens[j].kind == TokenKind::Whitespace {
                width = indent_width(tokens[j].text);
                j += 1;
            }
            match tokens.get(j).map(|t| t.kind) {
                None => break,
                Some(TokenKind::Newline) => {
                    // blank line
                    i = j + 1;
                    continue;
                }
                Some(TokenKind::Comment) => {
                    // comment-only line
                    i = j + 1;
                    if tokens.get(i).map(|t| t.kind) == Some(TokenKind::Newline) {
                        i += 1;
                    }
                    continue;
                }
                Some(_) => {
                    let anchor = &tokens[j];
                    let top = *stack
                        .last()
                        .ok_or_else(|| InternalError::invariant("indentation stack underflow"))?;
                    if width > top {
                        stack.push(width);
                        out.push(Token::synthetic(TokenKind::Indent, anchor.line, 0));
                    } else if width < top {
                        while stack.len() > 1 && width < *stack.last().unwrap_or(&0) {
                            stack.pop();
                            out.push(Token::synthetic(TokenKind::Dedent, anchor.line, 0));
                        }
                        let landed = *stack
                            .last()
                            .ok_or_else(|| InternalError::invariant("indentation stack underflow"))?;
                        if landed != width {
                            sink.error(
                                "inconsistent indentation",
                                anchor.line,
                                anchor.column,
                                ErrorCode::E0201,
                            );
                            // recover: treat the line as being at `landed`
                        }
                    }
                    at_line_start = false;
                    i = j;
                    continue;
                }
            }
        }

        let token = &tokens[i];
        match token.kind {
            TokenKind::Whitespace | TokenKind::Comment => {}
            TokenKind::Newline => {
                if bracket_depth > 0 {
                    if next_line_starts_declaration(tokens, i + 1) {
                        sink.error(
                            "unclosed delimiter before this line",
                            token.line,
                            token.column,
                            ErrorCode::E0204,
                        );
                        bracket_depth = 0;
                        out.push(token.clone());
                        at_line_start = true;
                    }
                    // otherwise: implicit line join, drop the newline
                } else {
                    out.push(token.clone());
                    at_line_start = true;
                }
            }
            TokenKind::Error => {
                sink.error(
                    format!("invalid character `{}`", token.text),
                    token.line,
                    token.column,
                    ErrorCode::E0101,
                );
            }
            TokenKind::Eof => break,
            kind => {
                if kind.is_open_bracket() {
                    bracket_depth += 1;
                } else if kind.is_close_bracket() {
                    bracket_depth = bracket_depth.saturating_sub(1);
                }
                out.push(token.clone());
                at_line_start = false;
            }
        }
        i += 1;
    }

    // Terminate the last logical line, unwind the stack, close the stream.
    if out.last().is_some_and(|t| t.kind != TokenKind::Newline) && !out.is_empty() {
        out.push(Token::synthetic(TokenKind::Newline, end.line, end.column));
    }
    while stack.len() > 1 {
        stack.pop();
        out.push(Token::synthetic(TokenKind::Dedent, end.line, end.column));
    }
    if stack.is_empty() {
        return Err(InternalError::invariant("indentation stack underflow"));
    }
    out.push(Token::synthetic(TokenKind::Eof, end.line, end.column));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn structured(input: &str) -> (Vec<TokenKind>, DiagnosticSink) {
        let raw = tokenize(input);
        let mut sink = DiagnosticSink::new();
        let out = structure(&raw, &mut sink).unwrap();
        (out.iter().map(|t| t.kind).collect(), sink)
    }

    #[test]
    fn test_empty_input() {
        let (kinds, sink) = structured("");
        assert_eq!(kinds, vec![TokenKind::Eof]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_indent_dedent_pairing() {
        let (kinds, sink) = structured("def f():\n    pass\n");
        assert!(sink.is_empty());
        let indents = kinds.iter().filter(|k| **k == TokenKind::Indent).count();
        let dedents = kinds.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(indents, 1);
        assert_eq!(dedents, 1);
        assert_eq!(*kinds.last().unwrap(), TokenKind::Eof);
    }

    #[test]
    fn test_blank_and_comment_lines_ignored() {
        let (kinds, sink) = structured("def f():\n\n    # setup\n    pass\n");
        assert!(sink.is_empty());
        let indents = kinds.iter().filter(|k| **k == TokenKind::Indent).count();
        assert_eq!(indents, 1);
        // neither the blank line nor the comment line produced a Newline
        let newlines = kinds.iter().filter(|k| **k == TokenKind::Newline).count();
        assert_eq!(newlines, 2);
    }

    #[test]
    fn test_multi_level_dedent() {
        let (kinds, _) = structured("class C:\n    def m(self):\n        pass\n");
        let dedents = kinds.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(dedents, 2);
    }

    #[test]
    fn test_inconsistent_dedent_diagnostic() {
        // dedent to width 2 which was never pushed (levels are 0 and 4)
        let (_, sink) = structured("def f():\n    pass\n  pass\n");
        let diags = sink.into_diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, ErrorCode::E0201);
        assert!(diags[0].is_error());
        assert_eq!(diags[0].line, 2);
    }

    #[test]
    fn test_implicit_line_join() {
        let (kinds, sink) = structured("x = f(1,\n      2)\ny = 3\n");
        assert!(sink.is_empty());
        // the newline inside the call is suppressed
        let newlines = kinds.iter().filter(|k| **k == TokenKind::Newline).count();
        assert_eq!(newlines, 2);
        assert!(!kinds.contains(&TokenKind::Indent));
    }

    #[test]
    fn test_unclosed_delimiter_recovery() {
        let (kinds, sink) = structured("x = f(1,\ndef g():\n    pass\n");
        let diags = sink.into_diagnostics();
        assert!(diags.iter().any(|d| d.code == ErrorCode::E0204));
        // the following declaration still gets its own lines and block
        assert!(kinds.contains(&TokenKind::Indent));
    }

    #[test]
    fn test_missing_trailing_newline() {
        let (kinds, sink) = structured("x = 1");
        assert!(sink.is_empty());
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::Int,
                TokenKind::Newline,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_invalid_character_diagnostic() {
        let (_, sink) = structured("x = 1 ¤\n");
        let diags = sink.into_diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, ErrorCode::E0101);
    }

    #[test]
    fn test_tab_indentation() {
        let (kinds, sink) = structured("def f():\n\tpass\n");
        assert!(sink.is_empty());
        assert!(kinds.contains(&TokenKind::Indent));
    }
}
