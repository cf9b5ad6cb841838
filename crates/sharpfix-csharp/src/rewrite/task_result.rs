//! Moving values in and out of `Task.FromResult`.
//!
//! An `async` method that never awaits can drop `async` if every returned
//! value is wrapped in `Task.FromResult`. Going the other way, an `async`
//! method returning `Task.FromResult(e)` should return `e`.

use sharpfix_core::patch::Span;
use sharpfix_cst::make;
use sharpfix_cst::nodes::{AstNode, InvocationExpression, MethodDeclaration, ReturnStatement};
use sharpfix_cst::{GreenElement, SyntaxKind, SyntaxNode, TreeEdit};

use super::usings::ensure_usings;
use super::{append_statement, node_at, relocate, with_trivia_of, Layout};
use crate::semantic::flow;
use crate::semantic::{SemanticModel, WellKnown};

const TASKS: &str = "System.Threading.Tasks";
const COMPLETED: &str = "return Task.CompletedTask;";

/// True for `Task.FromResult(...)`, qualified or not, with or without type
/// arguments.
fn is_task_from_result(expression: &SyntaxNode) -> bool {
    let Some(callee) = InvocationExpression::cast(expression.clone()).and_then(|i| i.expression())
    else {
        return false;
    };
    let text: String = callee.text().chars().filter(|c| !c.is_whitespace()).collect();
    let bare = text.split('<').next().unwrap_or_default();
    bare == "Task.FromResult" || bare.ends_with(".Task.FromResult")
}

// ============================================================================
// Wrapping
// ============================================================================

/// Remove `async` from `method` and wrap what it returns so it still
/// type-checks. Returns the new root.
pub fn wrap_in_task_result(model: &SemanticModel, method: &MethodDeclaration) -> Option<SyntaxNode> {
    method.async_keyword()?;
    let symbol = model.declared_symbol(method.syntax())?;
    let return_type = model.symbol(symbol).ty.clone()?;
    let generic = model.task_result_type(&return_type).is_some();
    let plain = model.well_known(WellKnown::Task).as_ref() == Some(&return_type);

    let mut edit = TreeEdit::new();
    match (method.body(), method.expression_body()) {
        (Some(body), _) => {
            for statement in flow::return_statements(body.syntax()) {
                let expression = ReturnStatement::cast(statement.clone()).and_then(|r| r.expression());
                match expression {
                    Some(e) if generic && !is_task_from_result(&e) => {
                        let wrapped = make::expression(&format!("Task.FromResult({})", e.trimmed_text())).ok()?;
                        edit.replace_node(&e, with_trivia_of(&e, wrapped));
                    }
                    None if plain => {
                        let completed = make::statement(COMPLETED).ok()?;
                        edit.replace_node(&statement, with_trivia_of(&statement, completed));
                    }
                    _ => {}
                }
            }
        }
        (None, Some(arrow)) => {
            let e = arrow.syntax().children().next()?;
            if plain {
                return None;
            }
            if generic && !is_task_from_result(&e) {
                let wrapped = make::expression(&format!("Task.FromResult({})", e.trimmed_text())).ok()?;
                edit.replace_node(&e, with_trivia_of(&e, wrapped));
            }
        }
        (None, None) => return None,
    }
    let mut root = edit.apply(&method.syntax().root());

    if plain {
        let current = MethodDeclaration::cast(relocate(method.syntax(), &root)?)?;
        if let Some(body) = current.body() {
            if flow::end_point_reachable(body.syntax()) {
                let appended = append_statement(&body, COMPLETED, &Layout::of(&root))?;
                root = body.syntax().replace_with(appended);
            }
        }
    }

    let current = relocate(method.syntax(), &root)?;
    let root = remove_async(&current)?;
    if generic || plain {
        ensure_usings(&root, &[TASKS])
    } else {
        Some(root)
    }
}

/// Drop the `async` modifier, keeping the indentation it carried.
fn remove_async(method: &SyntaxNode) -> Option<SyntaxNode> {
    let green = method.green();
    let index = green.children().iter().position(|child| {
        child
            .as_token()
            .is_some_and(|t| t.kind() == SyntaxKind::AsyncKeyword)
    })?;
    let keyword = green.children()[index].as_token()?;
    let next = green.children().get(index + 1)?;
    let mut leading = keyword.leading_trivia().to_vec();
    let next = match next {
        GreenElement::Node(node) => {
            leading.extend(node.leading_trivia().iter().cloned());
            GreenElement::Node(node.with_leading_trivia(leading))
        }
        GreenElement::Token(token) => {
            leading.extend(token.leading_trivia().iter().cloned());
            GreenElement::Token(token.with_leading_trivia(leading))
        }
    };
    let rebuilt = green.splice_children(index..index + 2, vec![next]);
    Some(method.replace_with(rebuilt))
}

// ============================================================================
// Unwrapping
// ============================================================================

/// Replace `Task.FromResult(e)` covering exactly `span` with `e`. Returns the
/// new root.
pub fn unwrap_task_from_result(root: &SyntaxNode, span: Span) -> Option<SyntaxNode> {
    let invocation = node_at(root, span, SyntaxKind::InvocationExpression)?;
    if !is_task_from_result(&invocation) {
        return None;
    }
    let arguments = InvocationExpression::cast(invocation.clone())?.arguments();
    let [argument] = arguments.as_slice() else {
        return None;
    };
    let value = argument.expression()?;
    let replacement = with_trivia_of(&invocation, value.green().clone());
    Some(invocation.replace_with(replacement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn wrap(source: &str) -> String {
        let document = Document::parse("Test.cs", source).unwrap();
        let model = document.semantic_model();
        let method = document
            .root()
            .descendants()
            .find_map(MethodDeclaration::cast)
            .unwrap();
        wrap_in_task_result(&model, &method).unwrap().text()
    }

    #[test]
    fn generic_returns_are_wrapped() {
        let source = r#"using System.Threading.Tasks;

class C
{
    public async Task<int> Get(bool flag)
    {
        if (flag)
        {
            return 1;
        }
        return Task.FromResult(2).Result;
    }
}
"#;
        let expected = r#"using System.Threading.Tasks;

class C
{
    public Task<int> Get(bool flag)
    {
        if (flag)
        {
            return Task.FromResult(1);
        }
        return Task.FromResult(Task.FromResult(2).Result);
    }
}
"#;
        assert_eq!(wrap(source), expected);
    }

    #[test]
    fn plain_tasks_complete_explicitly() {
        let source = "using System.Threading.Tasks;\n\nclass C\n{\n    async Task Run()\n    {\n        Log();\n    }\n}\n";
        let expected = "using System.Threading.Tasks;\n\nclass C\n{\n    Task Run()\n    {\n        Log();\n        return Task.CompletedTask;\n    }\n}\n";
        assert_eq!(wrap(source), expected);
    }

    #[test]
    fn one_line_plain_task_body_stays_on_one_line() {
        let source = "using System.Threading.Tasks;\n\nclass C\n{\n    async Task Run() { System.Console.WriteLine(1); }\n}\n";
        let expected = "using System.Threading.Tasks;\n\nclass C\n{\n    Task Run() { System.Console.WriteLine(1); return Task.CompletedTask; }\n}\n";
        assert_eq!(wrap(source), expected);
    }

    #[test]
    fn existing_from_result_is_not_rewrapped() {
        let source = "using System.Threading.Tasks;\n\nclass C\n{\n    async Task<int> Get() => Task.FromResult(1);\n}\n";
        assert_eq!(
            wrap(source),
            "using System.Threading.Tasks;\n\nclass C\n{\n    Task<int> Get() => Task.FromResult(1);\n}\n"
        );
    }

    #[test]
    fn from_result_is_unwrapped() {
        let source = "class C\n{\n    async Task<int> Get()\n    {\n        return Task.FromResult(5);\n    }\n}\n";
        let start = source.find("Task.FromResult").unwrap();
        let span = Span::new(start, start + "Task.FromResult(5)".len());
        let root = sharpfix_cst::parse(source).unwrap().root().clone();
        let fixed = unwrap_task_from_result(&root, span).unwrap();
        assert!(fixed.text().contains("        return 5;\n"));
    }
}
