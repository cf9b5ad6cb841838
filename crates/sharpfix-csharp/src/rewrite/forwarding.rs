//! Forwarding bodies for composite methods.
//!
//! The body of a method is replaced with a call of the same method on every
//! element of a collection member. How the results combine depends on the
//! method's return shape:
//!
//! | Shape          | Body                                                   |
//! |----------------|--------------------------------------------------------|
//! | `void`         | `foreach (var item in _m) { item.M(args); }`           |
//! | `bool`         | `return _m.All(item => item.M(args));`                 |
//! | `Task`         | `return Task.WhenAll(_m.Select(item => item.M(args)));` |
//! | `Task<bool>`   | `All` over the awaited results                         |
//!
//! `async` methods await instead of returning the task.

use sharpfix_cst::make;
use sharpfix_cst::nodes::{AstNode, MethodDeclaration};
use sharpfix_cst::SyntaxNode;

use super::usings::ensure_usings;
use super::{line_indent, with_trivia_of, Layout};
use crate::helpers::{classify_method_return_shape, ReturnShape};
use crate::semantic::{RefKind, SemanticModel};

const LINQ: &str = "System.Linq";
const TASKS: &str = "System.Threading.Tasks";

/// Replace `method`'s body with one forwarding to every element of `member`.
/// Returns the new root.
pub fn forward_to_member(
    model: &SemanticModel,
    method: &MethodDeclaration,
    member: &str,
) -> Option<SyntaxNode> {
    let symbol = model.declared_symbol(method.syntax())?;
    let shape = classify_method_return_shape(model, symbol)?;
    let body = method.body()?;

    let arguments: Vec<String> = model
        .symbol(symbol)
        .parameters
        .iter()
        .map(|&p| {
            let parameter = model.symbol(p);
            let prefix = match parameter.ref_kind {
                RefKind::Value => "",
                RefKind::Ref => "ref ",
                RefKind::Out => "out ",
                RefKind::In => "in ",
            };
            format!("{prefix}{}", parameter.name)
        })
        .collect();
    let call = format!("item.{}({})", method.name(), arguments.join(", "));

    let layout = Layout::of(&method.syntax().root());
    let indent = line_indent(body.syntax());
    let statement = forwarding_statement(shape, method.is_async(), member, &call, &indent, &layout);
    let block = make::block(&[statement], &indent, &layout.unit, &layout.newline).ok()?;
    let new_root = body.syntax().replace_with(with_trivia_of(body.syntax(), block));

    let usings: &[&str] = match shape {
        ReturnShape::Void => &[],
        ReturnShape::Boolean => &[LINQ],
        ReturnShape::Task | ReturnShape::TaskOfBoolean => &[LINQ, TASKS],
    };
    ensure_usings(&new_root, usings)
}

fn forwarding_statement(
    shape: ReturnShape,
    is_async: bool,
    member: &str,
    call: &str,
    indent: &str,
    layout: &Layout,
) -> String {
    let select = format!("Task.WhenAll({member}.Select(item => {call}))");
    match (shape, is_async) {
        (ReturnShape::Void, _) => {
            let inner = format!("{indent}{}", layout.unit);
            let nl = &layout.newline;
            format!(
                "foreach (var item in {member}){nl}{inner}{{{nl}{inner}{unit}{call};{nl}{inner}}}",
                unit = layout.unit
            )
        }
        (ReturnShape::Boolean, _) => format!("return {member}.All(item => {call});"),
        (ReturnShape::Task, true) => format!("await {select};"),
        (ReturnShape::Task, false) => format!("return {select};"),
        (ReturnShape::TaskOfBoolean, true) => {
            format!("return (await {select}).All(result => result);")
        }
        (ReturnShape::TaskOfBoolean, false) => {
            format!("return Task.FromResult({member}.All(item => {call}.Result));")
        }
    }
}
