//! Signature rendering for the symbol table.
//!
//! Convention: `name(p1: T1 = d1, p2: T2) -> R`. An omitted annotation
//! renders as the explicit untyped marker rather than being dropped, so
//! "no annotation present" stays distinguishable from "annotation present
//! but empty".

use crate::parser::{ClassDecl, FieldDecl, FunctionDecl, Parameter, ParameterKind};

use super::SymbolKind;
use super::helpers::is_receiver;

/// Marker rendered where a type annotation was omitted.
pub const UNTYPED_MARKER: &str = "?";

pub(super) fn render_function_signature(func: &FunctionDecl, kind: SymbolKind) -> String {
    let mut rendered: Vec<String> = Vec::new();
    for (index, param) in func.params.iter().enumerate() {
        if index == 0 && kind == SymbolKind::Method && is_receiver(param, &func.decorators) {
            continue;
        }
        rendered.push(render_parameter(param));
    }
    let ret = func
        .return_ty
        .as_ref()
        .map(|t| t.text.as_str())
        .unwrap_or(UNTYPED_MARKER);
    format!("{}({}) -> {}", func.name, rendered.join(", "), ret)
}

fn render_parameter(param: &Parameter) -> String {
    let prefix = match param.kind {
        ParameterKind::Plain => "",
        ParameterKind::VarPositional => "*",
        ParameterKind::VarKeyword => "**",
    };
    let ty = param
        .annotation
        .as_ref()
        .map(|a| a.text.as_str())
        .unwrap_or(UNTYPED_MARKER);
    let mut out = format!("{}{}: {}", prefix, param.name, ty);
    if let Some(default) = &param.default {
        out.push_str(&format!(" = {default}"));
    }
    out
}

pub(super) fn render_class_signature(class: &ClassDecl) -> String {
    if class.bases.is_empty() {
        class.name.to_string()
    } else {
        let bases: Vec<&str> = class.bases.iter().map(|b| b.as_str()).collect();
        format!("{}({})", class.name, bases.join(", "))
    }
}

pub(super) fn render_field_signature(field: &FieldDecl) -> String {
    let ty = field
        .annotation
        .as_ref()
        .map(|a| a.text.as_str())
        .unwrap_or(UNTYPED_MARKER);
    let mut out = format!("{}: {}", field.name, ty);
    if let Some(value) = &field.value {
        out.push_str(&format!(" = {value}"));
    }
    out
}
