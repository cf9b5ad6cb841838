//! Control flow over statements.
//!
//! Reachability follows the language rules for the supported statement
//! forms without constant folding beyond the literal `true`. Lambdas,
//! anonymous methods and local functions are separate functions and never
//! contribute to the enclosing region. Labels are assumed to be jump
//! targets, so a labeled statement is always reachable.

use sharpfix_cst::nodes::{
    AstNode, Block, BlockWrapperStatement, DoStatement, ForStatement, IfStatement,
    LabeledStatement, LiteralExpression, LockStatement, SwitchSection, SwitchStatement,
    TryStatement, UsingStatement, WhileStatement,
};
use sharpfix_cst::{SyntaxKind, SyntaxNode};

/// True when control can flow off the end of `statement`.
///
/// A block's end is reachable when every statement in it completes
/// normally. Loops with a `true` condition complete only through a `break`.
pub fn end_point_reachable(statement: &SyntaxNode) -> bool {
    match statement.kind() {
        SyntaxKind::Block => sequence_completes(
            &Block::cast(statement.clone())
                .map(|b| b.statements())
                .unwrap_or_default(),
        ),
        SyntaxKind::ReturnStatement
        | SyntaxKind::ThrowStatement
        | SyntaxKind::BreakStatement
        | SyntaxKind::ContinueStatement
        | SyntaxKind::GotoStatement
        | SyntaxKind::YieldBreakStatement => false,
        SyntaxKind::IfStatement => {
            let Some(conditional) = IfStatement::cast(statement.clone()) else {
                return true;
            };
            let else_statement = conditional.else_clause().and_then(|e| e.statement());
            match (conditional.statement(), else_statement) {
                (Some(then), Some(otherwise)) => {
                    end_point_reachable(&then) || end_point_reachable(&otherwise)
                }
                _ => true,
            }
        }
        SyntaxKind::WhileStatement => {
            let infinite = WhileStatement::cast(statement.clone())
                .and_then(|w| w.condition())
                .is_some_and(|c| is_literal_true(&c));
            !infinite || has_break_targeting(statement)
        }
        SyntaxKind::ForStatement => {
            let infinite = ForStatement::cast(statement.clone())
                .is_some_and(|f| f.condition().is_none_or(|c| is_literal_true(&c)));
            !infinite || has_break_targeting(statement)
        }
        SyntaxKind::DoStatement => {
            let Some(do_statement) = DoStatement::cast(statement.clone()) else {
                return true;
            };
            if has_break_targeting(statement) {
                return true;
            }
            let infinite = do_statement.condition().is_some_and(|c| is_literal_true(&c));
            let body_completes = do_statement
                .statement()
                .is_none_or(|body| end_point_reachable(&body) || has_continue_targeting(statement));
            !infinite && body_completes
        }
        SyntaxKind::TryStatement => {
            let Some(try_statement) = TryStatement::cast(statement.clone()) else {
                return true;
            };
            let finally_completes = try_statement
                .finally_block()
                .is_none_or(|f| end_point_reachable(f.syntax()));
            let body_completes = try_statement
                .block()
                .is_none_or(|b| end_point_reachable(b.syntax()));
            let any_catch_completes = try_statement
                .catches()
                .iter()
                .any(|c| c.block().is_none_or(|b| end_point_reachable(b.syntax())));
            finally_completes && (body_completes || any_catch_completes)
        }
        SyntaxKind::SwitchStatement => {
            let Some(switch) = SwitchStatement::cast(statement.clone()) else {
                return true;
            };
            let sections = switch.sections();
            !sections.iter().any(has_default_label)
                || has_break_targeting(statement)
                || sections.iter().any(|s| sequence_completes(&s.statements()))
        }
        SyntaxKind::UsingStatement => UsingStatement::cast(statement.clone())
            .and_then(|u| u.statement())
            .is_none_or(|body| end_point_reachable(&body)),
        SyntaxKind::LockStatement => LockStatement::cast(statement.clone())
            .and_then(|l| l.statement())
            .is_none_or(|body| end_point_reachable(&body)),
        SyntaxKind::LabeledStatement => LabeledStatement::cast(statement.clone())
            .and_then(|l| l.statement())
            .is_none_or(|inner| end_point_reachable(&inner)),
        SyntaxKind::CheckedStatement | SyntaxKind::UnsafeStatement => {
            BlockWrapperStatement::cast(statement.clone())
                .and_then(|w| w.block())
                .is_none_or(|b| end_point_reachable(b.syntax()))
        }
        _ => true,
    }
}

/// True when control can leave the last of `statements`. A label makes the
/// statement after an unreachable one reachable again.
fn sequence_completes(statements: &[SyntaxNode]) -> bool {
    let mut reachable = true;
    for statement in statements {
        if statement.kind() == SyntaxKind::LabeledStatement {
            reachable = true;
        }
        if reachable {
            reachable = end_point_reachable(statement);
        }
    }
    reachable
}

/// `default:`, or a `case` that matches everything: `case _:` or
/// `case var x:` without a `when` clause.
fn has_default_label(section: &SwitchSection) -> bool {
    section.labels().iter().any(|label| match label.kind() {
        SyntaxKind::DefaultSwitchLabel => true,
        SyntaxKind::CasePatternSwitchLabel => {
            label.child_of_kind(SyntaxKind::WhenClause).is_none()
                && label.children().any(|c| {
                    matches!(c.kind(), SyntaxKind::DiscardPattern | SyntaxKind::VarPattern)
                })
        }
        _ => false,
    })
}

/// Statements inside `region` that transfer control out of it: `return`,
/// `throw`, `yield break`, jumps whose target lies outside the region.
pub fn exit_points(region: &SyntaxNode) -> Vec<SyntaxNode> {
    let mut exits = Vec::new();
    visit_outside_functions(region, &mut |node| match node.kind() {
        SyntaxKind::ReturnStatement
        | SyntaxKind::ThrowStatement
        | SyntaxKind::YieldBreakStatement => exits.push(node.clone()),
        SyntaxKind::BreakStatement | SyntaxKind::ContinueStatement => {
            if jump_target(node, region).is_none() {
                exits.push(node.clone());
            }
        }
        SyntaxKind::GotoStatement => {
            if !goto_stays_in(node, region) {
                exits.push(node.clone());
            }
        }
        _ => {}
    });
    exits
}

/// True when `body` contains an `await`, `await foreach` or `await using`
/// outside nested functions.
pub fn contains_await(body: &SyntaxNode) -> bool {
    let mut found = false;
    visit_outside_functions(body, &mut |node| {
        found |= node.kind() == SyntaxKind::AwaitExpression
            || (matches!(
                node.kind(),
                SyntaxKind::ForEachStatement
                    | SyntaxKind::UsingStatement
                    | SyntaxKind::LocalDeclarationStatement
            ) && node.token_of_kind(SyntaxKind::AwaitKeyword).is_some());
    });
    found
}

/// `return` statements of `body`, excluding those of nested functions.
pub fn return_statements(body: &SyntaxNode) -> Vec<SyntaxNode> {
    let mut returns = Vec::new();
    visit_outside_functions(body, &mut |node| {
        if node.kind() == SyntaxKind::ReturnStatement {
            returns.push(node.clone());
        }
    });
    returns
}

/// True when `body` is an iterator: it has `yield return` or `yield break`
/// outside nested functions.
pub fn is_iterator(body: &SyntaxNode) -> bool {
    let mut found = false;
    visit_outside_functions(body, &mut |node| {
        found |= matches!(
            node.kind(),
            SyntaxKind::YieldReturnStatement | SyntaxKind::YieldBreakStatement
        );
    });
    found
}

/// True when `body` holds statements or members the parser kept opaque.
pub fn has_unknown(body: &SyntaxNode) -> bool {
    body.descendants().any(|n| n.kind().is_unknown())
}

// ----------------------------------------------------------------------------
// Jumps
// ----------------------------------------------------------------------------

fn is_loop(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ForStatement
            | SyntaxKind::ForEachStatement
            | SyntaxKind::WhileStatement
            | SyntaxKind::DoStatement
    )
}

/// The statement a `break` or `continue` targets, if it lies within
/// `region`. `break` also leaves a `switch`.
fn jump_target(jump: &SyntaxNode, region: &SyntaxNode) -> Option<SyntaxNode> {
    let breaks = jump.kind() == SyntaxKind::BreakStatement;
    for ancestor in jump.ancestors().skip(1) {
        if is_loop(ancestor.kind()) || (breaks && ancestor.kind() == SyntaxKind::SwitchStatement) {
            return Some(ancestor);
        }
        if ancestor == *region || ancestor.kind().is_nested_function() {
            return None;
        }
    }
    None
}

/// True when a `goto` lands inside `region`: its label is declared there,
/// or for `goto case` and `goto default`, its switch is.
fn goto_stays_in(goto: &SyntaxNode, region: &SyntaxNode) -> bool {
    match goto.token_of_kind(SyntaxKind::Identifier) {
        Some(label) => region.descendants().any(|n| {
            LabeledStatement::cast(n)
                .and_then(|l| l.label())
                .is_some_and(|t| t.text() == label.text())
        }),
        None => goto
            .ancestors()
            .skip(1)
            .take_while(|a| a != region && !a.kind().is_nested_function())
            .any(|a| a.kind() == SyntaxKind::SwitchStatement),
    }
}

fn has_jump_targeting(statement: &SyntaxNode, kind: SyntaxKind) -> bool {
    let mut found = false;
    visit_outside_functions(statement, &mut |node| {
        if node.kind() == kind {
            found |= jump_target(node, statement).is_none_or(|target| target == *statement);
        }
    });
    found
}

fn has_break_targeting(statement: &SyntaxNode) -> bool {
    has_jump_targeting(statement, SyntaxKind::BreakStatement)
}

fn has_continue_targeting(statement: &SyntaxNode) -> bool {
    has_jump_targeting(statement, SyntaxKind::ContinueStatement)
}

fn is_literal_true(expression: &SyntaxNode) -> bool {
    LiteralExpression::cast(expression.clone())
        .and_then(|l| l.token())
        .is_some_and(|t| t.kind() == SyntaxKind::TrueKeyword)
}

/// Pre-order walk of `root` that does not enter nested functions below it.
fn visit_outside_functions(root: &SyntaxNode, f: &mut dyn FnMut(&SyntaxNode)) {
    f(root);
    for child in root.children() {
        if !child.kind().is_nested_function() {
            visit_outside_functions(&child, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharpfix_cst::nodes::MethodDeclaration;

    fn method_body(body: &str) -> SyntaxNode {
        let source = format!("class C {{ int M(bool a) {body} }}");
        let tree = sharpfix_cst::parse(&source).expect("parse");
        let method = tree
            .root()
            .descendants()
            .find_map(MethodDeclaration::cast)
            .expect("method");
        method.body().expect("body").syntax().clone()
    }

    fn first_of_kind(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
        root.descendants().find(|n| n.kind() == kind).expect("node")
    }

    #[test]
    fn empty_body_end_is_reachable() {
        assert!(end_point_reachable(&method_body("{ }")));
    }

    #[test]
    fn return_makes_end_unreachable() {
        assert!(!end_point_reachable(&method_body("{ var x = 1; return x; }")));
    }

    #[test]
    fn if_without_else_falls_through() {
        assert!(end_point_reachable(&method_body("{ if (a) { return 1; } }")));
    }

    #[test]
    fn if_else_both_returning_is_unreachable() {
        assert!(!end_point_reachable(&method_body(
            "{ if (a) { return 1; } else { throw new System.Exception(); } }"
        )));
    }

    #[test]
    fn infinite_loop_without_break_is_unreachable() {
        assert!(!end_point_reachable(&method_body("{ while (true) { } }")));
        assert!(!end_point_reachable(&method_body("{ for (;;) { } }")));
        assert!(end_point_reachable(&method_body("{ while (true) { break; } }")));
    }

    #[test]
    fn nested_loop_break_does_not_escape() {
        assert!(!end_point_reachable(&method_body(
            "{ while (true) { while (a) { break; } } }"
        )));
    }

    #[test]
    fn try_finally_reachability() {
        assert!(!end_point_reachable(&method_body("{ try { return 1; } finally { } }")));
        assert!(end_point_reachable(&method_body(
            "{ try { return 1; } catch (System.Exception) { } }"
        )));
    }

    #[test]
    fn exit_points_count_returns_and_throws() {
        let body = method_body("{ if (a) { return 1; } else { } }");
        let conditional = IfStatement::cast(first_of_kind(&body, SyntaxKind::IfStatement)).expect("if");
        let then = conditional.statement().expect("then");
        let otherwise = conditional.else_clause().and_then(|e| e.statement()).expect("else");
        assert_eq!(exit_points(&then).len(), 1);
        assert!(exit_points(&otherwise).is_empty());
    }

    #[test]
    fn exit_points_skip_inner_breaks_and_lambdas() {
        let body = method_body(
            "{ { while (a) { break; } System.Func<int> f = () => { return 1; }; } return 0; }",
        );
        let inner = body
            .children()
            .find(|n| n.kind() == SyntaxKind::Block)
            .expect("inner block");
        assert!(exit_points(&inner).is_empty());
    }

    #[test]
    fn await_inside_lambda_is_not_counted() {
        let body = method_body("{ System.Func<System.Threading.Tasks.Task> f = async () => await System.Threading.Tasks.Task.Delay(1); return 0; }");
        assert!(!contains_await(&body));
        let body = method_body("{ await System.Threading.Tasks.Task.Delay(1); return 0; }");
        assert!(contains_await(&body));
    }

    #[test]
    fn return_statements_exclude_lambdas() {
        let body = method_body("{ System.Func<int> f = () => { return 1; }; return 2; }");
        assert_eq!(return_statements(&body).len(), 1);
    }

    #[test]
    fn switch_with_default_and_no_break_is_unreachable() {
        assert!(!end_point_reachable(&method_body(
            "{ switch (a) { case true: return 1; default: throw new System.Exception(); } }"
        )));
        assert!(!end_point_reachable(&method_body(
            "{ switch (a) { case true: return 1; case var other: return 0; } }"
        )));
    }

    #[test]
    fn switch_without_default_or_with_break_falls_through() {
        assert!(end_point_reachable(&method_body("{ switch (a) { case true: return 1; } }")));
        assert!(end_point_reachable(&method_body(
            "{ switch (a) { case true: break; default: return 0; } }"
        )));
        assert!(end_point_reachable(&method_body(
            "{ switch (a) { case bool b when b: return 1; case var x when x: return 0; } }"
        )));
    }

    #[test]
    fn break_in_switch_does_not_leave_the_loop() {
        assert!(!end_point_reachable(&method_body(
            "{ while (true) { switch (a) { default: break; } } }"
        )));
    }

    #[test]
    fn wrapped_statements_take_the_inner_reachability() {
        assert!(!end_point_reachable(&method_body("{ lock (this) { return 1; } }")));
        assert!(!end_point_reachable(&method_body("{ unchecked { return 1; } }")));
        assert!(end_point_reachable(&method_body("{ lock (this) { } }")));
    }

    #[test]
    fn labels_make_code_after_goto_reachable() {
        assert!(end_point_reachable(&method_body(
            "{ if (a) goto Done; return 1; Done: ; }"
        )));
        assert!(!end_point_reachable(&method_body("{ Again: if (a) goto Again; return 1; }")));
    }

    #[test]
    fn goto_exits_only_when_its_label_is_outside() {
        let body = method_body("{ if (a) { goto Done; } if (!a) { Loop: goto Loop; } Done: return 0; }");
        let branches: Vec<SyntaxNode> = body
            .descendants()
            .filter_map(IfStatement::cast)
            .filter_map(|i| i.statement())
            .collect();
        assert_eq!(exit_points(&branches[0]).len(), 1);
        assert!(exit_points(&branches[1]).is_empty());
    }

    #[test]
    fn yield_marks_iterators() {
        assert!(is_iterator(&method_body("{ yield return 1; }")));
        assert!(is_iterator(&method_body("{ yield break; }")));
        assert!(!end_point_reachable(&method_body("{ yield break; }")));
        assert!(!is_iterator(&method_body(
            "{ System.Collections.Generic.IEnumerable<int> Inner() { yield return 1; } return 0; }"
        )));
    }

    #[test]
    fn local_functions_are_separate_bodies() {
        let body = method_body("{ int Inner() { return 1; } return 2; }");
        assert_eq!(return_statements(&body).len(), 1);
        let body = method_body("{ async System.Threading.Tasks.Task Inner() { await Run(); } return 2; }");
        assert!(!contains_await(&body));
    }

    #[test]
    fn await_foreach_and_await_using_count_as_awaits() {
        assert!(contains_await(&method_body("{ await foreach (var x in Items()) { } return 0; }")));
        assert!(contains_await(&method_body("{ await using var s = Open(); return 0; }")));
        assert!(contains_await(&method_body("{ await using (Open()) { } return 0; }")));
    }

    #[test]
    fn opaque_statements_are_reported() {
        assert!(has_unknown(&method_body("{ fixed (byte* p = buffer) { } return 0; }")));
        assert!(!has_unknown(&method_body("{ return 0; }")));
    }
}
