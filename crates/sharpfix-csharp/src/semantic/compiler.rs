//! Compiler diagnostics the fix providers repair.
//!
//! These stand in for the diagnostics a full compiler would raise. Each is
//! computed from the semantic model and reported in document order.

use sharpfix_core::diagnostic::{Diagnostic, RuleDescriptor, Severity};
use sharpfix_cst::nodes::{AstNode, MethodDeclaration, ObjectCreationExpression, ReturnStatement};
use sharpfix_cst::{SyntaxKind, SyntaxNode};

use super::binder::Bound;
use super::flow;
use super::library::WellKnown;
use super::symbols::TypeRef;
use super::SemanticModel;

// ============================================================================
// Descriptors
// ============================================================================

const CATEGORY: &str = "Compiler";

/// Not all code paths return a value.
pub const CS0161: RuleDescriptor = RuleDescriptor {
    id: "CS0161",
    category: CATEGORY,
    default_severity: Severity::Error,
    enabled_by_default: true,
};

/// No overload matches the delegate.
pub const CS0123: RuleDescriptor = RuleDescriptor {
    id: "CS0123",
    category: CATEGORY,
    default_severity: Severity::Error,
    enabled_by_default: true,
};

/// A method group has the wrong return type for the delegate.
pub const CS0407: RuleDescriptor = RuleDescriptor {
    id: "CS0407",
    category: CATEGORY,
    default_severity: Severity::Error,
    enabled_by_default: true,
};

/// An async method lacks `await` operators.
pub const CS1998: RuleDescriptor = RuleDescriptor {
    id: "CS1998",
    category: CATEGORY,
    default_severity: Severity::Warning,
    enabled_by_default: true,
};

/// An async method returns a task where a result is expected.
pub const CS4016: RuleDescriptor = RuleDescriptor {
    id: "CS4016",
    category: CATEGORY,
    default_severity: Severity::Error,
    enabled_by_default: true,
};

/// Every compiler descriptor, in id order.
pub const DESCRIPTORS: [&RuleDescriptor; 5] = [&CS0123, &CS0161, &CS0407, &CS1998, &CS4016];

// ============================================================================
// Analysis
// ============================================================================

/// All compiler diagnostics for the model's tree, sorted by location.
pub fn diagnostics(model: &SemanticModel) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for node in model.root().descendants() {
        diagnostics.extend(node_diagnostics(model, &node));
    }
    diagnostics.sort_by_key(|d| d.span);
    diagnostics
}

/// Compiler diagnostics raised by `node` itself.
///
/// Methods raise CS0161, CS1998 and CS4016; object creations raise CS0123
/// and CS0407. Other nodes raise nothing.
pub fn node_diagnostics(model: &SemanticModel, node: &SyntaxNode) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    match node.kind() {
        SyntaxKind::MethodDeclaration => {
            if let Some(method) = MethodDeclaration::cast(node.clone()) {
                diagnostics.extend(missing_return(model, &method));
                diagnostics.extend(async_without_await(&method));
                diagnostics.extend(task_returned_from_async(model, &method));
            }
        }
        SyntaxKind::ObjectCreationExpression => {
            diagnostics.extend(delegate_mismatch(model, node));
        }
        _ => {}
    }
    diagnostics
}

/// The declared return type of a method, or `None` when it does not bind.
fn return_type(model: &SemanticModel, method: &MethodDeclaration) -> Option<TypeRef> {
    let symbol = model.declared_symbol(method.syntax())?;
    model.symbol(symbol).ty.clone()
}

/// CS0161: a non-void method whose block body can complete normally.
/// Iterators and bodies the parser could not fully read are skipped.
fn missing_return(model: &SemanticModel, method: &MethodDeclaration) -> Option<Diagnostic> {
    let body = method.body()?;
    let ty = return_type(model, method)?;
    if ty.is_void() {
        return None;
    }
    // `async Task` behaves like a void method.
    let is_plain_task = model.well_known(WellKnown::Task).as_ref() == Some(&ty);
    if method.is_async() && is_plain_task {
        return None;
    }
    let body = body.syntax();
    if flow::is_iterator(body) || flow::has_unknown(body) || !flow::end_point_reachable(body) {
        return None;
    }
    let identifier = method.identifier()?;
    Some(Diagnostic::new(&CS0161, identifier.span(), vec![method.name()]))
}

/// CS1998: an `async` method whose body never awaits.
fn async_without_await(method: &MethodDeclaration) -> Option<Diagnostic> {
    if !method.is_async() {
        return None;
    }
    let body = match method.body() {
        Some(block) => block.syntax().clone(),
        None => method.expression_body()?.syntax().clone(),
    };
    if flow::contains_await(&body) || flow::has_unknown(&body) {
        return None;
    }
    let identifier = method.identifier()?;
    Some(Diagnostic::new(&CS1998, identifier.span(), Vec::new()))
}

/// CS4016: `return` of a task inside an `async` method returning `Task<T>`.
fn task_returned_from_async(model: &SemanticModel, method: &MethodDeclaration) -> Vec<Diagnostic> {
    if !method.is_async() {
        return Vec::new();
    }
    let Some(body) = method.body().filter(|b| !flow::has_unknown(b.syntax())) else {
        return Vec::new();
    };
    let Some(result) = return_type(model, method).and_then(|ty| model.task_result_type(&ty)) else {
        return Vec::new();
    };
    flow::return_statements(body.syntax())
        .into_iter()
        .filter_map(ReturnStatement::cast)
        .filter_map(|statement| statement.expression())
        .filter(|expression| {
            model.type_of(expression).is_some_and(|ty| {
                model.is_task_type(&ty) && !model.is_implicitly_convertible(&ty, &result)
            })
        })
        .map(|expression| {
            Diagnostic::new(&CS4016, expression.span(), vec![model.type_display(&result)])
        })
        .collect()
}

/// CS0123 or CS0407 for `new D(M)` where `M` does not convert to `D`.
fn delegate_mismatch(model: &SemanticModel, node: &SyntaxNode) -> Option<Diagnostic> {
    let creation = ObjectCreationExpression::cast(node.clone())?;
    let delegate = model.resolve_type(&creation.ty()?)?;
    let (invoke, invoke_substitution) = model.delegate_invoke(&delegate)?;
    let arguments = creation.arguments();
    let [argument] = arguments.as_slice() else {
        return None;
    };
    let expression = argument.expression()?;
    let Bound::MethodGroup(group) = model.bind(&expression) else {
        return None;
    };
    if model
        .bind_method_group_conversion(&expression, &delegate)
        .symbol
        .is_some()
    {
        return None;
    }
    let first = *group.methods.first()?;
    let method_name = model.symbol(first).name.clone();
    let parameters_match = group.methods.iter().copied().find(|&method| {
        model.parameters_match_delegate(method, &group.substitution, invoke, &invoke_substitution)
    });
    let span = argument.syntax().span();
    match parameters_match {
        Some(method) => {
            let returned = model
                .symbol(method)
                .ty
                .as_ref()
                .map(|ty| model.type_display(&group.substitution.apply(ty)))
                .unwrap_or_default();
            Some(Diagnostic::new(&CS0407, span, vec![method_name, returned]))
        }
        None => Some(Diagnostic::new(
            &CS0123,
            span,
            vec![method_name, model.type_display(&delegate)],
        )),
    }
}
