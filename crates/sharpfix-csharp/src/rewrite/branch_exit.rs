//! `throw` injection for `if` branches that never leave the method.
//!
//! Every `if` in a method is visited bottom-up. A branch is in one of two
//! states once visited: it already has an exit point (`return`, `throw`, or
//! a jump out of the branch), or it needs one. Branches that need one get
//! `throw new NotImplementedException();` as their first statement; a
//! branch that is a single statement is wrapped in a block first. Because
//! inner branches are fixed first, an outer branch containing a fixed inner
//! `if` already has an exit and is left alone.

use sharpfix_cst::make;
use sharpfix_cst::nodes::{AstNode, Block, IfStatement, MethodDeclaration};
use sharpfix_cst::{
    rewrite, GreenElement, GreenNode, Rewriter, SyntaxAnnotation, SyntaxKind, SyntaxNode,
    TreeEdit, Trivia, TriviaKind,
};

use super::usings::ensure_usings;
use super::{line_indent, Layout};
use crate::semantic::flow;

const THROW: &str = "throw new NotImplementedException();";

/// Whether a visited branch already leaves the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BranchState {
    NeedsExit,
    HasExit,
}

fn classify_branch(branch: &SyntaxNode) -> BranchState {
    if flow::exit_points(branch).is_empty() {
        BranchState::NeedsExit
    } else {
        BranchState::HasExit
    }
}

/// Inject throws into every exit-less branch of `method`, annotate the root
/// with the method name and return type, and return the new root.
///
/// Returns `None` when there is nothing to fix.
pub fn inject_branch_exits(method: &MethodDeclaration) -> Option<SyntaxNode> {
    let layout = Layout::of(&method.syntax().root());
    let mut injector = BranchExitInjector {
        layout: &layout,
        fixed: 0,
    };
    let new_root = rewrite(&mut injector, method.syntax());
    if injector.fixed == 0 {
        return None;
    }
    let new_root = ensure_usings(&new_root, &["System"])?;
    let return_type = method
        .return_type()
        .map(|t| t.trimmed_text())
        .unwrap_or_default();
    let annotated = new_root
        .green()
        .with_annotation(SyntaxAnnotation::member(method.name()))
        .with_annotation(SyntaxAnnotation::type_name(return_type));
    Some(SyntaxNode::new_root(annotated))
}

struct BranchExitInjector<'a> {
    layout: &'a Layout,
    fixed: usize,
}

impl Rewriter for BranchExitInjector<'_> {
    fn leave_node(&mut self, node: &SyntaxNode, rebuilt: GreenNode) -> GreenNode {
        if node.kind() != SyntaxKind::IfStatement {
            return rebuilt;
        }
        let (Some(original), Some(current)) = (
            IfStatement::cast(node.clone()),
            IfStatement::cast(SyntaxNode::new_root(rebuilt.clone())),
        ) else {
            return rebuilt;
        };

        let original_branches = [
            original.statement(),
            original.else_clause().and_then(|e| e.statement()),
        ];
        let current_branches = [
            current.statement(),
            current.else_clause().and_then(|e| e.statement()),
        ];

        let mut edit = TreeEdit::new();
        for (before, after) in original_branches.iter().zip(&current_branches) {
            let (Some(before), Some(after)) = (before, after) else {
                continue;
            };
            if classify_branch(after) == BranchState::HasExit {
                continue;
            }
            if let Some(replacement) = self.add_exit(before, after) {
                edit.replace_node(after, replacement);
                self.fixed += 1;
            }
        }
        if edit.is_empty() {
            return rebuilt;
        }
        edit.apply(current.syntax()).green().clone()
    }
}

impl BranchExitInjector<'_> {
    /// `after` with a leading throw. `before` is the same branch in the
    /// input tree, where line indentation can still be measured.
    fn add_exit(&self, before: &SyntaxNode, after: &SyntaxNode) -> Option<GreenNode> {
        match Block::cast(after.clone()) {
            Some(block) => self.prepend_to_block(before, &block),
            None => self.wrap_in_block(before, after),
        }
    }

    fn prepend_to_block(&self, before: &SyntaxNode, block: &Block) -> Option<GreenNode> {
        let open = block.open_brace()?;
        let multi_line = open
            .trailing_trivia()
            .iter()
            .any(|t| t.kind() == TriviaKind::EndOfLine);
        let statement = make::statement(THROW).ok()?;
        let statement = if multi_line {
            let indent = format!("{}{}", line_indent(before), self.layout.unit);
            statement
                .with_leading_trivia(vec![Trivia::whitespace(indent)])
                .with_trailing_trivia(vec![Trivia::end_of_line(self.layout.newline.clone())])
        } else {
            let spaced = open
                .trailing_trivia()
                .last()
                .is_some_and(|t| t.kind() == TriviaKind::Whitespace);
            let leading = if spaced {
                Vec::new()
            } else {
                vec![Trivia::whitespace(" ")]
            };
            statement
                .with_leading_trivia(leading)
                .with_trailing_trivia(vec![Trivia::whitespace(" ")])
        };
        Some(
            block
                .syntax()
                .green()
                .insert_children(1, vec![GreenElement::Node(statement)]),
        )
    }

    fn wrap_in_block(&self, before: &SyntaxNode, after: &SyntaxNode) -> Option<GreenNode> {
        let owner = before.parent()?;
        let indent = line_indent(&owner);
        let block = make::block(
            &[THROW.to_string(), after.trimmed_text()],
            &indent,
            &self.layout.unit,
            &self.layout.newline,
        )
        .ok()?;
        let starts_line = !make::indentation_of(before).is_empty();
        let leading = if starts_line {
            vec![Trivia::whitespace(indent)]
        } else {
            after.green().leading_trivia().to_vec()
        };
        Some(
            block
                .with_leading_trivia(leading)
                .with_trailing_trivia(after.green().trailing_trivia().to_vec()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inject(source: &str) -> Option<String> {
        let tree = sharpfix_cst::parse(source).unwrap();
        let method = tree
            .root()
            .descendants()
            .find_map(MethodDeclaration::cast)
            .unwrap();
        inject_branch_exits(&method).map(|root| root.text())
    }

    #[test]
    fn block_branches_get_a_leading_throw() {
        let source = "using System;\n\nclass C\n{\n    int M(bool a)\n    {\n        if (a)\n        {\n            // keep\n            Log();\n        }\n        else\n        {\n            return 1;\n        }\n    }\n}\n";
        let expected = "using System;\n\nclass C\n{\n    int M(bool a)\n    {\n        if (a)\n        {\n            throw new NotImplementedException();\n            // keep\n            Log();\n        }\n        else\n        {\n            return 1;\n        }\n    }\n}\n";
        assert_eq!(inject(source).unwrap(), expected);
    }

    #[test]
    fn single_statements_are_wrapped() {
        let source = "using System;\n\nclass C\n{\n    int M(bool a)\n    {\n        if (a)\n            Log();\n        return 1;\n    }\n}\n";
        let expected = "using System;\n\nclass C\n{\n    int M(bool a)\n    {\n        if (a)\n        {\n            throw new NotImplementedException();\n            Log();\n        }\n        return 1;\n    }\n}\n";
        assert_eq!(inject(source).unwrap(), expected);
    }

    #[test]
    fn inner_fix_satisfies_outer_branch() {
        let source = "using System;\n\nclass C\n{\n    int M(bool a, bool b)\n    {\n        if (a)\n        {\n            if (b)\n            {\n                Log();\n            }\n        }\n        return 1;\n    }\n}\n";
        let fixed = inject(source).unwrap();
        assert_eq!(fixed.matches("throw new NotImplementedException();").count(), 1);
        assert!(fixed.contains("            {\n                throw new NotImplementedException();\n                Log();\n"));
    }

    #[test]
    fn fixed_methods_are_left_alone() {
        let source = "class C\n{\n    int M(bool a)\n    {\n        if (a)\n        {\n            return 2;\n        }\n        return 1;\n    }\n}\n";
        assert!(inject(source).is_none());
    }

    #[test]
    fn missing_system_using_is_added() {
        let source = "class C\n{\n    int M(bool a)\n    {\n        if (a) { Log(); }\n        return 1;\n    }\n}\n";
        let fixed = inject(source).unwrap();
        assert!(fixed.starts_with("using System;\n\nclass C"));
        assert!(fixed.contains("if (a) { throw new NotImplementedException(); Log(); }"));
    }
}
