//! Abstract syntax tree for Python-like declarations
//!
//! A closed, owned tree: every node owns its children, no sharing, no
//! parent pointers. The tree is built in one parse pass and is normally
//! discarded after symbol extraction.
//!
//! Statement bodies are opaque except for the constructs the extractor
//! needs: scoped resource blocks (`with` / `async with`) and nested
//! declarations.

use smol_str::SmolStr;

use crate::base::Span;

/// One parsed source unit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    /// Leading bare string literal, if the unit starts with one
    pub docstring: Option<DocString>,
    /// Top-level declarations, in source order
    pub members: Vec<Declaration>,
}

impl Module {
    pub fn is_empty(&self) -> bool {
        self.docstring.is_none() && self.members.is_empty()
    }
}

/// A named declaration that produces a symbol record
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Function(FunctionDecl),
    Class(ClassDecl),
    Field(FieldDecl),
}

impl Declaration {
    pub fn name(&self) -> &SmolStr {
        match self {
            Self::Function(f) => &f.name,
            Self::Class(c) => &c.name,
            Self::Field(f) => &f.name,
        }
    }

    /// Span of the declaration name
    pub fn span(&self) -> Span {
        match self {
            Self::Function(f) => f.span,
            Self::Class(c) => c.span,
            Self::Field(f) => f.span,
        }
    }
}

/// `def name(params) -> ret:` with optional `async` and decorators
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: SmolStr,
    pub params: Vec<Parameter>,
    pub return_ty: Option<TypeAnnotation>,
    pub docstring: Option<DocString>,
    /// Decorators in source order (last listed is syntactically closest)
    pub decorators: Vec<Decorator>,
    pub is_async: bool,
    pub body: Vec<Statement>,
    /// Span of the function name
    pub span: Span,
}

/// `class Name(bases):` with optional decorators
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: SmolStr,
    /// Base references as written, e.g. `Base` or `abc.ABC`
    pub bases: Vec<SmolStr>,
    pub docstring: Option<DocString>,
    pub decorators: Vec<Decorator>,
    /// Methods, fields, and nested classes, in source order
    pub members: Vec<Declaration>,
    /// Span of the class name
    pub span: Span,
}

/// A field declaration in a class body: `name: Type = value` or `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: SmolStr,
    pub annotation: Option<TypeAnnotation>,
    /// Assigned value as written, kept opaque
    pub value: Option<String>,
    pub span: Span,
}

/// How a parameter binds its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Plain,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
}

/// One entry of a parameter list
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: SmolStr,
    pub kind: ParameterKind,
    pub annotation: Option<TypeAnnotation>,
    /// Default expression as written, kept opaque
    pub default: Option<String>,
    pub span: Span,
}

/// A type annotation as written in source
///
/// `text` may be empty when the annotation marker was present but nothing
/// followed it; that case is distinct from "no annotation at all".
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub text: String,
    pub span: Span,
}

/// A bare string literal in docstring position, quotes included
#[derive(Debug, Clone, PartialEq)]
pub struct DocString {
    pub raw: String,
    pub span: Span,
}

/// `@name` or `@name(args)`, attached to the following declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    /// Dotted decorator name as written, e.g. `dataclass` or `functools.wraps`
    pub name: SmolStr,
    /// Argument span as written, without the enclosing parentheses
    pub arguments: Option<String>,
    pub span: Span,
}

impl Decorator {
    /// The decorator as it appeared in source, arguments included
    pub fn display(&self) -> String {
        match &self.arguments {
            Some(args) => format!("{}({})", self.name, args),
            None => self.name.to_string(),
        }
    }
}

/// A statement in a function or resource block body
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `with` / `async with` block
    ScopedResource(ScopedResourceBlock),
    /// A declaration nested in a body
    Nested(Declaration),
    /// Anything else; only the span is kept
    Opaque(Span),
}

/// `[async] with item (',' item)*: body`
///
/// Resources are released in reverse acquisition order on every exit path
/// of the body; the parser only records the structure.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedResourceBlock {
    pub items: Vec<ResourceItem>,
    pub is_async: bool,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// One acquired resource: `expr` or `expr as name`
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceItem {
    pub expr: String,
    pub alias: Option<SmolStr>,
}
