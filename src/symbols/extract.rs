//! Symbol extraction — a single depth-first traversal of the AST.
//!
//! For each function, class, or field declaration, in source order, one
//! `SymbolRecord` is appended. Methods get a qualified name of
//! `ClassName.methodName` and lose the conventional receiver parameter in
//! the rendered signature. Scoped resource blocks never produce records;
//! declarations nested inside them do.
//!
//! Extraction performs no validation beyond what the parser guarantees: a
//! syntactically accepted tree is always extractable.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::parser::errors::{Diagnostic, ErrorCode};
use crate::parser::{ClassDecl, Declaration, FieldDecl, FunctionDecl, Module, Statement};

use super::context::ExtractionContext;
use super::helpers::normalize_docstring;
use super::signature::{render_class_signature, render_field_signature, render_function_signature};
use super::types::{ExtractionResult, SymbolKind, SymbolRecord};

/// Extract all symbols from a parsed module.
pub fn extract_symbols(module: &Module) -> ExtractionResult {
    let mut result = ExtractionResult::default();
    let mut context = ExtractionContext::new();
    let members: Vec<&Declaration> = module.members.iter().collect();
    extract_scope(&mut result, &mut context, &members, false);
    result
}

/// Extract one scope's declarations, flagging duplicates as shadowing.
/// Shadowing is not an error: language semantics allow it, so the later
/// declaration only gets a Warning.
fn extract_scope(
    result: &mut ExtractionResult,
    context: &mut ExtractionContext,
    declarations: &[&Declaration],
    in_class: bool,
) {
    let mut seen: FxHashMap<SmolStr, u32> = FxHashMap::default();
    for declaration in declarations {
        let name = declaration.name();
        let span = declaration.span();
        if let Some(first_line) = seen.get(name) {
            result.diagnostics.push(Diagnostic::warning(
                format!(
                    "declaration of `{name}` shadows an earlier declaration on line {first_line} in the same scope"
                ),
                span.start.line,
                span.start.column,
                ErrorCode::E0303,
            ));
        } else {
            seen.insert(name.clone(), span.start.line);
        }
        match declaration {
            Declaration::Function(func) => extract_function(result, context, func, in_class),
            Declaration::Class(class) => extract_class(result, context, class),
            Declaration::Field(field) => extract_field(result, context, field),
        }
    }
}

fn extract_function(
    result: &mut ExtractionResult,
    context: &mut ExtractionContext,
    func: &FunctionDecl,
    in_class: bool,
) {
    let kind = if in_class {
        SymbolKind::Method
    } else {
        SymbolKind::Function
    };
    result.symbols.push(SymbolRecord {
        name: Arc::from(func.name.as_str()),
        qualified_name: Arc::from(context.qualified_name(&func.name)),
        kind,
        signature: render_function_signature(func, kind),
        docstring: func.docstring.as_ref().map(|d| normalize_docstring(&d.raw)),
        decorators: func.decorators.iter().map(|d| d.display()).collect(),
        is_async: func.is_async,
        source_line: func.span.start.line,
    });

    let nested = nested_declarations(&func.body);
    if !nested.is_empty() {
        context.push_scope(&func.name);
        extract_scope(result, context, &nested, false);
        context.pop_scope();
    }
}

fn extract_class(result: &mut ExtractionResult, context: &mut ExtractionContext, class: &ClassDecl) {
    result.symbols.push(SymbolRecord {
        name: Arc::from(class.name.as_str()),
        qualified_name: Arc::from(context.qualified_name(&class.name)),
        kind: SymbolKind::Class,
        signature: render_class_signature(class),
        docstring: class.docstring.as_ref().map(|d| normalize_docstring(&d.raw)),
        decorators: class.decorators.iter().map(|d| d.display()).collect(),
        is_async: false,
        source_line: class.span.start.line,
    });

    context.push_scope(&class.name);
    let members: Vec<&Declaration> = class.members.iter().collect();
    extract_scope(result, context, &members, true);
    context.pop_scope();
}

fn extract_field(result: &mut ExtractionResult, context: &mut ExtractionContext, field: &FieldDecl) {
    result.symbols.push(SymbolRecord {
        name: Arc::from(field.name.as_str()),
        qualified_name: Arc::from(context.qualified_name(&field.name)),
        kind: SymbolKind::Field,
        signature: render_field_signature(field),
        docstring: None,
        decorators: Vec::new(),
        is_async: false,
        source_line: field.span.start.line,
    });
}

/// Declarations nested in a statement body, in source order. Scoped
/// resource blocks are transparent: their bodies are searched, but the
/// blocks themselves never yield declarations.
fn nested_declarations(body: &[Statement]) -> Vec<&Declaration> {
    let mut out = Vec::new();
    collect_nested(body, &mut out);
    out
}

fn collect_nested<'a>(body: &'a [Statement], out: &mut Vec<&'a Declaration>) {
    for statement in body {
        match statement {
            Statement::Nested(declaration) => out.push(declaration),
            Statement::ScopedResource(block) => collect_nested(&block.body, out),
            Statement::Opaque(_) => {}
        }
    }
}
