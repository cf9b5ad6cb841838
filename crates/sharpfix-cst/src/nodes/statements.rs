// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Statements.

use super::{child, children, AstNode, VariableDeclaration};
use crate::kind::SyntaxKind;
use crate::red::{SyntaxElement, SyntaxNode, SyntaxToken};

ast_node!(Block => Block);
ast_node!(LocalDeclarationStatement => LocalDeclarationStatement);
ast_node!(ExpressionStatement => ExpressionStatement);
ast_node!(IfStatement => IfStatement);
ast_node!(ElseClause => ElseClause);
ast_node!(ReturnStatement => ReturnStatement);
ast_node!(ThrowStatement => ThrowStatement);
ast_node!(ForEachStatement => ForEachStatement);
ast_node!(ForStatement => ForStatement);
ast_node!(WhileStatement => WhileStatement);
ast_node!(DoStatement => DoStatement);
ast_node!(TryStatement => TryStatement);
ast_node!(CatchClause => CatchClause);
ast_node!(UsingStatement => UsingStatement);
ast_node!(SwitchStatement => SwitchStatement);
ast_node!(SwitchSection => SwitchSection);
ast_node!(LockStatement => LockStatement);
ast_node!(LabeledStatement => LabeledStatement);
ast_node!(
    /// `checked { }`, `unchecked { }` and `unsafe { }`.
    BlockWrapperStatement => CheckedStatement | UnsafeStatement
);

fn first_statement(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.children().find(|c| c.kind().is_statement())
}

fn first_expression(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.children().find(|c| c.kind().is_expression())
}

impl Block {
    pub fn statements(&self) -> Vec<SyntaxNode> {
        self.0.children().filter(|c| c.kind().is_statement()).collect()
    }

    pub fn open_brace(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::OpenBrace)
    }

    pub fn close_brace(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::CloseBrace)
    }
}

impl LocalDeclarationStatement {
    pub fn declaration(&self) -> Option<VariableDeclaration> {
        child(&self.0)
    }

    pub fn is_const(&self) -> bool {
        self.0.token_of_kind(SyntaxKind::ConstKeyword).is_some()
    }
}

impl ExpressionStatement {
    pub fn expression(&self) -> Option<SyntaxNode> {
        first_expression(&self.0)
    }
}

impl IfStatement {
    pub fn condition(&self) -> Option<SyntaxNode> {
        first_expression(&self.0)
    }

    pub fn statement(&self) -> Option<SyntaxNode> {
        first_statement(&self.0)
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        child(&self.0)
    }
}

impl ElseClause {
    pub fn statement(&self) -> Option<SyntaxNode> {
        first_statement(&self.0)
    }
}

impl ReturnStatement {
    pub fn expression(&self) -> Option<SyntaxNode> {
        first_expression(&self.0)
    }
}

impl ThrowStatement {
    pub fn expression(&self) -> Option<SyntaxNode> {
        first_expression(&self.0)
    }
}

impl ForEachStatement {
    pub fn ty(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_syntax())
    }

    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    /// The collection being iterated.
    pub fn expression(&self) -> Option<SyntaxNode> {
        let mut after_in = false;
        for element in self.0.children_with_tokens() {
            match element {
                SyntaxElement::Token(t) if t.kind() == SyntaxKind::InKeyword => after_in = true,
                SyntaxElement::Node(n) if after_in => return Some(n),
                _ => {}
            }
        }
        None
    }

    pub fn statement(&self) -> Option<SyntaxNode> {
        first_statement(&self.0)
    }
}

impl ForStatement {
    /// Nodes in the section after `section` semicolons, inside the parens.
    fn section(&self, section: usize) -> Vec<SyntaxNode> {
        let mut semicolons = 0;
        let mut nodes = Vec::new();
        for element in self.0.children_with_tokens() {
            match element {
                SyntaxElement::Token(t) if t.kind() == SyntaxKind::Semicolon => semicolons += 1,
                SyntaxElement::Token(t) if t.kind() == SyntaxKind::CloseParen => break,
                SyntaxElement::Node(n) if semicolons == section => nodes.push(n),
                _ => {}
            }
        }
        nodes
    }

    pub fn declaration(&self) -> Option<VariableDeclaration> {
        self.section(0).into_iter().find_map(VariableDeclaration::cast)
    }

    pub fn initializers(&self) -> Vec<SyntaxNode> {
        self.section(0)
            .into_iter()
            .filter(|n| n.kind().is_expression())
            .collect()
    }

    pub fn condition(&self) -> Option<SyntaxNode> {
        self.section(1).into_iter().next()
    }

    pub fn incrementors(&self) -> Vec<SyntaxNode> {
        self.section(2)
    }

    pub fn statement(&self) -> Option<SyntaxNode> {
        first_statement(&self.0)
    }
}

impl WhileStatement {
    pub fn condition(&self) -> Option<SyntaxNode> {
        first_expression(&self.0)
    }

    pub fn statement(&self) -> Option<SyntaxNode> {
        first_statement(&self.0)
    }
}

impl DoStatement {
    pub fn statement(&self) -> Option<SyntaxNode> {
        first_statement(&self.0)
    }

    pub fn condition(&self) -> Option<SyntaxNode> {
        first_expression(&self.0)
    }
}

impl TryStatement {
    pub fn block(&self) -> Option<Block> {
        child(&self.0)
    }

    pub fn catches(&self) -> Vec<CatchClause> {
        children(&self.0)
    }

    pub fn finally_block(&self) -> Option<Block> {
        child(&self.0.child_of_kind(SyntaxKind::FinallyClause)?)
    }
}

impl CatchClause {
    pub fn exception_type(&self) -> Option<SyntaxNode> {
        self.0
            .child_of_kind(SyntaxKind::CatchDeclaration)?
            .children()
            .find(|c| c.kind().is_type_syntax())
    }

    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0
            .child_of_kind(SyntaxKind::CatchDeclaration)?
            .token_of_kind(SyntaxKind::Identifier)
    }

    pub fn block(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl UsingStatement {
    pub fn declaration(&self) -> Option<VariableDeclaration> {
        child(&self.0)
    }

    pub fn expression(&self) -> Option<SyntaxNode> {
        first_expression(&self.0)
    }

    pub fn statement(&self) -> Option<SyntaxNode> {
        first_statement(&self.0)
    }
}

impl SwitchStatement {
    /// The governing expression, without the parentheses.
    pub fn expression(&self) -> Option<SyntaxNode> {
        first_expression(&self.0)
    }

    pub fn sections(&self) -> Vec<SwitchSection> {
        children(&self.0)
    }
}

impl SwitchSection {
    /// `case` and `default` labels, in source order.
    pub fn labels(&self) -> Vec<SyntaxNode> {
        self.0
            .children()
            .filter(|c| {
                matches!(
                    c.kind(),
                    SyntaxKind::CaseSwitchLabel
                        | SyntaxKind::CasePatternSwitchLabel
                        | SyntaxKind::DefaultSwitchLabel
                )
            })
            .collect()
    }

    pub fn statements(&self) -> Vec<SyntaxNode> {
        self.0.children().filter(|c| c.kind().is_statement()).collect()
    }
}

impl LockStatement {
    pub fn expression(&self) -> Option<SyntaxNode> {
        first_expression(&self.0)
    }

    pub fn statement(&self) -> Option<SyntaxNode> {
        first_statement(&self.0)
    }
}

impl LabeledStatement {
    pub fn label(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    pub fn statement(&self) -> Option<SyntaxNode> {
        first_statement(&self.0)
    }
}

impl BlockWrapperStatement {
    pub fn block(&self) -> Option<Block> {
        child(&self.0)
    }
}
