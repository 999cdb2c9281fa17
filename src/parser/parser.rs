//! Recursive descent parser for Python-like declarations
//!
//! Consumes the block-structured token stream and builds an owned AST.
//! Supports panic-mode error recovery: a malformed declaration never
//! prevents its siblings from being parsed, and the partial tree is
//! always returned together with the collected diagnostics.

use smol_str::SmolStr;
use tracing::trace;

use super::ast::{
    ClassDecl, Declaration, Decorator, DocString, FieldDecl, FunctionDecl, Module, Parameter,
    ParameterKind, ResourceItem, ScopedResourceBlock, Statement, TypeAnnotation,
};
use super::block::structure;
use super::errors::{Diagnostic, DiagnosticSink, ErrorCode, InternalError, ParseContext};
use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::base::Span;

/// Parse result containing the module tree and any diagnostics
#[derive(Debug, Clone)]
pub struct Parse {
    pub module: Module,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parse {
    /// Check if parsing succeeded without Error-severity diagnostics
    pub fn ok(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.is_error())
    }
}

/// Parse source text into a module tree
pub fn parse_source(input: &str) -> Result<Parse, InternalError> {
    let tokens: Vec<_> = Lexer::new(input).collect();
    parse_tokens(&tokens)
}

/// Parse an already-produced raw token stream into a module tree
///
/// This is the primary input contract: the stream carries explicit newline
/// tokens and leading-whitespace runs, as produced by an external lexer or
/// by [`Lexer`]. The stream is consumed exactly once, left to right.
pub fn parse_tokens(tokens: &[Token<'_>]) -> Result<Parse, InternalError> {
    let mut sink = DiagnosticSink::new();
    let structured = structure(tokens, &mut sink)?;
    let mut parser = Parser::new(&structured, sink);
    parser.parse_module();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    sink: DiagnosticSink,
    module: Module,
    context: Vec<ParseContext>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], sink: DiagnosticSink) -> Self {
        Self {
            tokens,
            pos: 0,
            sink,
            module: Module::default(),
            context: Vec::new(),
        }
    }

    fn finish(self) -> Result<Parse, InternalError> {
        if !self.at_eof() {
            return Err(InternalError::invariant(format!(
                "parser stopped before end of input at token index {}",
                self.pos
            )));
        }
        Ok(Parse {
            module: self.module,
            diagnostics: self.sink.into_diagnostics(),
        })
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> TokenKind {
        self.current().map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn current_span(&self) -> Span {
        self.current().map(|t| t.span()).unwrap_or_default()
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Bounded lookahead: kind of the nth token from the cursor
    fn nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(
                ErrorCode::E0902,
                format!(
                    "expected {:?}, found {:?} {}",
                    kind,
                    self.current_kind(),
                    self.context_description()
                ),
            );
            false
        }
    }

    fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.bump();
        }
    }

    /// Advance until one of `stops` at bracket depth 0, or end of input.
    fn skip_until(&mut self, stops: &[TokenKind]) {
        let mut depth = 0u32;
        loop {
            let kind = self.current_kind();
            if kind == TokenKind::Eof {
                return;
            }
            if depth == 0 && stops.contains(&kind) {
                return;
            }
            if kind.is_open_bracket() {
                depth += 1;
            } else if kind.is_close_bracket() {
                depth = depth.saturating_sub(1);
            }
            self.bump();
        }
    }

    /// Like [`skip_until`], but returns the skipped tokens rendered back to
    /// source-like text: adjacent tokens stay joined, any gap becomes one
    /// space.
    fn take_until(&mut self, stops: &[TokenKind]) -> String {
        let start = self.pos;
        self.skip_until(stops);
        self.render_range(start)
    }

    fn render_range(&self, start: usize) -> String {
        let mut out = String::new();
        let mut prev: Option<&Token<'a>> = None;
        for token in &self.tokens[start..self.pos] {
            if token.kind.is_layout() {
                continue;
            }
            if let Some(p) = prev {
                let adjacent = p.line == token.span().start.line && p.end_column() == token.column;
                if !adjacent {
                    out.push(' ');
                }
            }
            out.push_str(token.text);
            prev = Some(token);
        }
        out
    }

    // =========================================================================
    // Error handling and recovery
    // =========================================================================

    fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        let (line, column) = self
            .current()
            .or_else(|| self.tokens.last())
            .map(|t| (t.line, t.column))
            .unwrap_or((0, 0));
        self.sink.error(message, line, column, code);
    }

    fn context_description(&self) -> &'static str {
        self.context
            .last()
            .map(|c| c.description())
            .unwrap_or("at top level")
    }

    fn push_context(&mut self, context: ParseContext) {
        self.context.push(context);
    }

    fn pop_context(&mut self) {
        self.context.pop();
    }

    /// Panic-mode recovery: discard tokens up to the next statement
    /// boundary consistent with the enclosing block. A block opened by the
    /// malformed construct is skipped whole; a `Dedent` is left for the
    /// enclosing suite to consume.
    fn recover_statement(&mut self) {
        trace!(
            "recovering after parse error near line {}",
            self.current().map(|t| t.line).unwrap_or(0)
        );
        loop {
            match self.current_kind() {
                TokenKind::Eof | TokenKind::Dedent => return,
                TokenKind::Newline => {
                    self.bump();
                    if self.at(TokenKind::Indent) {
                        self.skip_balanced_block();
                    }
                    return;
                }
                TokenKind::Indent => {
                    self.skip_balanced_block();
                }
                _ => self.bump(),
            }
        }
    }

    /// Consume an `Indent` and everything up to its matching `Dedent`.
    fn skip_balanced_block(&mut self) {
        if !self.eat(TokenKind::Indent) {
            return;
        }
        let mut depth = 1u32;
        while depth > 0 && !self.at_eof() {
            match self.current_kind() {
                TokenKind::Indent => depth += 1,
                TokenKind::Dedent => depth -= 1,
                _ => {}
            }
            self.bump();
        }
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// Module = DocString? TopLevelItem*
    fn parse_module(&mut self) {
        self.push_context(ParseContext::TopLevel);
        self.module.docstring = self.try_docstring();

        while !self.at_eof() {
            let pos_before = self.pos;
            self.skip_newlines();
            if self.at_eof() {
                break;
            }
            if let Some(decl) = self.parse_top_level() {
                self.module.members.push(decl);
            }
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(
                    ErrorCode::E0901,
                    format!("stuck on token {:?}", self.current_kind()),
                );
                self.bump();
            }
        }
        self.pop_context();
    }

    fn parse_top_level(&mut self) -> Option<Declaration> {
        match self.current_kind() {
            TokenKind::At | TokenKind::DefKw | TokenKind::ClassKw => self.parse_declaration(),
            TokenKind::AsyncKw if self.nth(1) == TokenKind::DefKw => self.parse_declaration(),
            TokenKind::Indent => {
                self.error(ErrorCode::E0202, "unexpected indentation at top level");
                self.skip_balanced_block();
                None
            }
            _ => {
                // import statements, assignments, expression statements...
                self.parse_opaque_statement();
                None
            }
        }
    }

    /// Declaration = Decorator* (FunctionDecl | ClassDecl)
    fn parse_declaration(&mut self) -> Option<Declaration> {
        let decorators = self.parse_decorators();
        match self.current_kind() {
            TokenKind::DefKw => self.parse_function(decorators, false).map(Declaration::Function),
            TokenKind::AsyncKw if self.nth(1) == TokenKind::DefKw => {
                self.bump();
                self.parse_function(decorators, true).map(Declaration::Function)
            }
            TokenKind::ClassKw => self.parse_class(decorators).map(Declaration::Class),
            _ => {
                if !decorators.is_empty() {
                    self.error(
                        ErrorCode::E0502,
                        "decorator is not attached to a function or class declaration",
                    );
                }
                self.recover_statement();
                None
            }
        }
    }

    /// Decorator = '@' DottedName ('(' ArgumentSpan ')')? Newline
    fn parse_decorators(&mut self) -> Vec<Decorator> {
        let mut decorators = Vec::new();
        while self.at(TokenKind::At) {
            let span = self.current_span();
            self.push_context(ParseContext::DecoratorList);
            self.bump();

            let Some(name) = self.parse_dotted_name() else {
                self.error(
                    ErrorCode::E0501,
                    format!("expected decorator name, found {:?}", self.current_kind()),
                );
                self.skip_until(&[TokenKind::Newline]);
                self.eat(TokenKind::Newline);
                self.pop_context();
                continue;
            };

            let arguments = if self.eat(TokenKind::LParen) {
                let text = self.take_until(&[TokenKind::RParen, TokenKind::Newline]);
                self.expect(TokenKind::RParen);
                Some(text)
            } else {
                None
            };

            if !self.eat(TokenKind::Newline) {
                self.error(ErrorCode::E0901, "unexpected tokens after decorator");
                self.skip_until(&[TokenKind::Newline]);
                self.eat(TokenKind::Newline);
            }
            self.pop_context();
            decorators.push(Decorator {
                name,
                arguments,
                span,
            });
        }
        decorators
    }

    /// DottedName = Ident ('.' Ident)*
    fn parse_dotted_name(&mut self) -> Option<SmolStr> {
        if !self.at(TokenKind::Ident) {
            return None;
        }
        let start = self.pos;
        self.bump();
        while self.at(TokenKind::Dot) && self.nth(1) == TokenKind::Ident {
            self.bump();
            self.bump();
        }
        Some(SmolStr::new(self.render_range(start)))
    }

    /// FunctionDecl = 'async'? 'def' Name Parameters ('->' Type)? Suite
    fn parse_function(&mut self, decorators: Vec<Decorator>, is_async: bool) -> Option<FunctionDecl> {
        self.expect(TokenKind::DefKw);
        let Some((name, span)) = self.expect_name() else {
            self.recover_statement();
            return None;
        };
        let params = self.parse_parameters();
        let return_ty = if self.eat(TokenKind::Arrow) {
            Some(self.parse_annotation(&[TokenKind::Colon, TokenKind::Newline]))
        } else {
            None
        };
        let (docstring, body) = self.parse_suite(ParseContext::FunctionBody, true);
        Some(FunctionDecl {
            name,
            params,
            return_ty,
            docstring,
            decorators,
            is_async,
            body,
            span,
        })
    }

    fn expect_name(&mut self) -> Option<(SmolStr, Span)> {
        if self.at(TokenKind::Ident) {
            let name = SmolStr::new(self.current_text());
            let span = self.current_span();
            self.bump();
            Some((name, span))
        } else {
            self.error(
                ErrorCode::E0301,
                format!("expected identifier, found {:?}", self.current_kind()),
            );
            None
        }
    }

    /// Parameters = '(' (Parameter (',' Parameter)*)? ')'
    fn parse_parameters(&mut self) -> Vec<Parameter> {
        let mut params = Vec::new();
        self.push_context(ParseContext::ParameterList);
        if !self.expect(TokenKind::LParen) {
            self.pop_context();
            return params;
        }
        loop {
            if self.eat(TokenKind::RParen) {
                break;
            }
            if self.at_any(&[
                TokenKind::Eof,
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Dedent,
                TokenKind::DefKw,
                TokenKind::ClassKw,
            ]) {
                self.error(ErrorCode::E0404, "unclosed parameter list");
                break;
            }

            let kind = if self.eat(TokenKind::StarStar) {
                ParameterKind::VarKeyword
            } else if self.eat(TokenKind::Star) {
                if self.at(TokenKind::Comma) || self.at(TokenKind::RParen) {
                    // bare `*`: keyword-only marker, not a parameter
                    self.eat(TokenKind::Comma);
                    continue;
                }
                ParameterKind::VarPositional
            } else if self.eat(TokenKind::Slash) {
                // `/`: positional-only marker, not a parameter
                self.eat(TokenKind::Comma);
                continue;
            } else {
                ParameterKind::Plain
            };

            if !self.at(TokenKind::Ident) {
                self.error(
                    ErrorCode::E0402,
                    format!("expected parameter name, found {:?}", self.current_kind()),
                );
                self.skip_until(&[TokenKind::Comma, TokenKind::RParen, TokenKind::Newline]);
                self.eat(TokenKind::Comma);
                continue;
            }
            let name = SmolStr::new(self.current_text());
            let span = self.current_span();
            self.bump();

            let annotation = if self.eat(TokenKind::Colon) {
                Some(self.parse_annotation(&[
                    TokenKind::Eq,
                    TokenKind::Comma,
                    TokenKind::RParen,
                    TokenKind::Newline,
                ]))
            } else {
                None
            };
            let default = if self.eat(TokenKind::Eq) {
                Some(self.take_until(&[TokenKind::Comma, TokenKind::RParen, TokenKind::Newline]))
            } else {
                None
            };
            params.push(Parameter {
                name,
                kind,
                annotation,
                default,
                span,
            });

            if !self.eat(TokenKind::Comma) && !self.at(TokenKind::RParen) {
                self.error(
                    ErrorCode::E0401,
                    format!("unexpected token {:?} in parameter list", self.current_kind()),
                );
                self.skip_until(&[TokenKind::Comma, TokenKind::RParen, TokenKind::Newline]);
                self.eat(TokenKind::Comma);
            }
        }
        self.pop_context();
        params
    }

    /// Captures annotation text up to one of `stops` at bracket depth 0.
    fn parse_annotation(&mut self, stops: &[TokenKind]) -> TypeAnnotation {
        let span = self.current_span();
        let text = self.take_until(stops);
        if text.is_empty() {
            self.error(ErrorCode::E0403, "missing type annotation");
        }
        TypeAnnotation { text, span }
    }

    /// ClassDecl = 'class' Name ('(' BaseList ')')? ClassBody
    fn parse_class(&mut self, decorators: Vec<Decorator>) -> Option<ClassDecl> {
        self.expect(TokenKind::ClassKw);
        let Some((name, span)) = self.expect_name() else {
            self.recover_statement();
            return None;
        };

        let mut bases = Vec::new();
        if self.eat(TokenKind::LParen) {
            loop {
                if self.eat(TokenKind::RParen) {
                    break;
                }
                if self.at_any(&[TokenKind::Eof, TokenKind::Newline, TokenKind::DefKw, TokenKind::ClassKw]) {
                    self.error(ErrorCode::E0204, "unclosed base class list");
                    break;
                }
                let text = self.take_until(&[TokenKind::Comma, TokenKind::RParen, TokenKind::Newline]);
                if text.is_empty() {
                    // stray separator; make progress
                    self.error(ErrorCode::E0901, "unexpected token in base class list");
                    self.bump();
                    continue;
                }
                bases.push(SmolStr::new(text));
                if !self.eat(TokenKind::Comma) && !self.at(TokenKind::RParen) {
                    break;
                }
            }
        }

        let (docstring, members) = self.parse_class_body();
        Some(ClassDecl {
            name,
            bases,
            docstring,
            decorators,
            members,
            span,
        })
    }

    /// ClassBody = ':' Newline Indent DocString? ClassMember* Dedent
    fn parse_class_body(&mut self) -> (Option<DocString>, Vec<Declaration>) {
        if !self.expect(TokenKind::Colon) {
            self.recover_statement();
            return (None, Vec::new());
        }
        if !self.eat(TokenKind::Newline) {
            // suite on the class line, e.g. `class C: pass`
            self.parse_opaque_statement();
            return (None, Vec::new());
        }
        if !self.at(TokenKind::Indent) {
            self.error(ErrorCode::E0203, "expected an indented block in class body");
            return (None, Vec::new());
        }
        self.bump();
        self.push_context(ParseContext::ClassBody);
        let docstring = self.try_docstring();
        let mut members = Vec::new();
        while !self.at(TokenKind::Dedent) && !self.at_eof() {
            let pos_before = self.pos;
            self.skip_newlines();
            if self.at(TokenKind::Dedent) || self.at_eof() {
                break;
            }
            if let Some(member) = self.parse_class_member() {
                members.push(member);
            }
            if self.pos == pos_before && !self.at_eof() {
                self.error(
                    ErrorCode::E0901,
                    format!("stuck on token {:?} in class body", self.current_kind()),
                );
                self.bump();
            }
        }
        self.eat(TokenKind::Dedent);
        self.pop_context();
        (docstring, members)
    }

    /// ClassMember = Declaration | FieldDecl | opaque statement
    fn parse_class_member(&mut self) -> Option<Declaration> {
        match self.current_kind() {
            TokenKind::At | TokenKind::DefKw | TokenKind::ClassKw => self.parse_declaration(),
            TokenKind::AsyncKw if self.nth(1) == TokenKind::DefKw => self.parse_declaration(),
            TokenKind::Ident if matches!(self.nth(1), TokenKind::Colon | TokenKind::Eq) => {
                Some(Declaration::Field(self.parse_field()))
            }
            _ => {
                self.parse_opaque_statement();
                None
            }
        }
    }

    /// FieldDecl = Name (':' Type)? ('=' ValueSpan)? Newline
    fn parse_field(&mut self) -> FieldDecl {
        let name = SmolStr::new(self.current_text());
        let span = self.current_span();
        self.bump();
        let annotation = if self.eat(TokenKind::Colon) {
            Some(self.parse_annotation(&[TokenKind::Eq, TokenKind::Newline]))
        } else {
            None
        };
        let value = if self.eat(TokenKind::Eq) {
            Some(self.take_until(&[TokenKind::Newline]))
        } else {
            None
        };
        self.eat(TokenKind::Newline);
        FieldDecl {
            name,
            annotation,
            value,
            span,
        }
    }

    /// Suite = ':' (Newline Indent DocString? Statement* Dedent | SimpleStatements)
    fn parse_suite(
        &mut self,
        context: ParseContext,
        allow_docstring: bool,
    ) -> (Option<DocString>, Vec<Statement>) {
        if !self.expect(TokenKind::Colon) {
            self.recover_statement();
            return (None, Vec::new());
        }
        if !self.eat(TokenKind::Newline) {
            // suite on the same line, e.g. `def f(): pass`
            return (None, vec![self.parse_opaque_statement()]);
        }
        if !self.at(TokenKind::Indent) {
            self.error(
                ErrorCode::E0203,
                format!("expected an indented block {}", context.description()),
            );
            return (None, Vec::new());
        }
        self.bump();
        self.push_context(context);
        let docstring = if allow_docstring { self.try_docstring() } else { None };
        let mut body = Vec::new();
        while !self.at(TokenKind::Dedent) && !self.at_eof() {
            let pos_before = self.pos;
            self.skip_newlines();
            if self.at(TokenKind::Dedent) || self.at_eof() {
                break;
            }
            body.push(self.parse_statement());
            if self.pos == pos_before && !self.at_eof() {
                self.error(
                    ErrorCode::E0901,
                    format!("stuck on token {:?}", self.current_kind()),
                );
                self.bump();
            }
        }
        self.eat(TokenKind::Dedent);
        self.pop_context();
        (docstring, body)
    }

    /// A bare string literal standing alone on its line
    fn try_docstring(&mut self) -> Option<DocString> {
        if self.at(TokenKind::Str) && self.nth(1) == TokenKind::Newline {
            let raw = self.current_text().to_string();
            let span = self.current_span();
            self.bump();
            self.bump();
            Some(DocString { raw, span })
        } else {
            None
        }
    }

    /// Statement = ScopedResourceBlock | NestedDeclaration | opaque
    fn parse_statement(&mut self) -> Statement {
        match self.current_kind() {
            TokenKind::WithKw => {
                let span = self.current_span();
                Statement::ScopedResource(self.parse_with(false, span))
            }
            TokenKind::AsyncKw if self.nth(1) == TokenKind::WithKw => {
                let span = self.current_span();
                self.bump();
                Statement::ScopedResource(self.parse_with(true, span))
            }
            TokenKind::DefKw | TokenKind::ClassKw | TokenKind::At => {
                let span = self.current_span();
                match self.parse_declaration() {
                    Some(decl) => Statement::Nested(decl),
                    None => Statement::Opaque(span),
                }
            }
            TokenKind::AsyncKw if self.nth(1) == TokenKind::DefKw => {
                let span = self.current_span();
                match self.parse_declaration() {
                    Some(decl) => Statement::Nested(decl),
                    None => Statement::Opaque(span),
                }
            }
            _ => self.parse_opaque_statement(),
        }
    }

    /// ScopedResourceBlock = 'with' ResourceItem (',' ResourceItem)* Suite
    ///
    /// Each item is `expr` or `expr as name`; release order is the reverse
    /// of acquisition order on every exit path of the body.
    fn parse_with(&mut self, is_async: bool, span: Span) -> ScopedResourceBlock {
        self.expect(TokenKind::WithKw);
        self.push_context(ParseContext::ResourceList);
        let mut items = Vec::new();
        loop {
            let expr = self.take_until(&[
                TokenKind::AsKw,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Newline,
            ]);
            if expr.is_empty() {
                self.error(ErrorCode::E0601, "expected a resource expression");
            }
            let alias = if self.eat(TokenKind::AsKw) {
                if self.at(TokenKind::Ident) {
                    let name = SmolStr::new(self.current_text());
                    self.bump();
                    Some(name)
                } else {
                    self.error(
                        ErrorCode::E0602,
                        format!("expected a name after 'as', found {:?}", self.current_kind()),
                    );
                    None
                }
            } else {
                None
            };
            items.push(ResourceItem { expr, alias });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.pop_context();
        let (_, body) = self.parse_suite(ParseContext::ResourceBody, false);
        ScopedResourceBlock {
            items,
            is_async,
            body,
            span,
        }
    }

    /// Consume one statement without interpreting it. A compound statement
    /// (`if`, `for`, `try`, ...) takes its indented block with it.
    fn parse_opaque_statement(&mut self) -> Statement {
        let span = self.current_span();
        self.skip_until(&[TokenKind::Newline]);
        self.eat(TokenKind::Newline);
        if self.at(TokenKind::Indent) {
            self.skip_balanced_block();
        }
        Statement::Opaque(span)
    }
}
