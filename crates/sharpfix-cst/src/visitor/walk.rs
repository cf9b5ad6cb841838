// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk functions driving a [`Visitor`] over a tree.

use super::traits::{VisitResult, Visitor};
use crate::nodes::{
    Argument, ArrayCreationExpression, AstNode, AwaitExpression, Block, CompilationUnit,
    ConstructorDeclaration, DelegateDeclaration, DoStatement, EnumDeclaration,
    ExpressionStatement, FieldDeclaration, ForEachStatement, ForStatement, IdentifierName,
    IfStatement, ImplicitArrayCreationExpression, InvocationExpression, LambdaExpression,
    LocalDeclarationStatement, MemberAccessExpression, MethodDeclaration, NamespaceDeclaration,
    ObjectCreationExpression, PropertyDeclaration, ReturnStatement, ThrowStatement,
    TryStatement, TypeDeclaration, UsingDirective, UsingStatement, WhileStatement,
};
use crate::red::SyntaxNode;

/// Generates `visit_typed` and `leave_typed`, which cast a node to the first
/// matching typed view and call the corresponding visitor method.
macro_rules! typed_dispatch {
    ($($base_name:ident : $node_type:ident),* $(,)?) => {
        paste::paste! {
            fn visit_typed<V: Visitor + ?Sized>(visitor: &mut V, node: &SyntaxNode) -> VisitResult {
                let kind = node.kind();
                $(
                    if $node_type::can_cast(kind) {
                        if let Some(typed) = $node_type::cast(node.clone()) {
                            return visitor.[<visit_ $base_name>](&typed);
                        }
                    }
                )*
                VisitResult::Continue
            }

            fn leave_typed<V: Visitor + ?Sized>(visitor: &mut V, node: &SyntaxNode) {
                let kind = node.kind();
                $(
                    if $node_type::can_cast(kind) {
                        if let Some(typed) = $node_type::cast(node.clone()) {
                            visitor.[<leave_ $base_name>](&typed);
                            return;
                        }
                    }
                )*
            }
        }
    };
}

typed_dispatch! {
    compilation_unit: CompilationUnit,
    using_directive: UsingDirective,
    namespace_declaration: NamespaceDeclaration,
    type_declaration: TypeDeclaration,
    enum_declaration: EnumDeclaration,
    delegate_declaration: DelegateDeclaration,
    method_declaration: MethodDeclaration,
    constructor_declaration: ConstructorDeclaration,
    property_declaration: PropertyDeclaration,
    field_declaration: FieldDeclaration,
    block: Block,
    local_declaration_statement: LocalDeclarationStatement,
    expression_statement: ExpressionStatement,
    if_statement: IfStatement,
    return_statement: ReturnStatement,
    throw_statement: ThrowStatement,
    foreach_statement: ForEachStatement,
    for_statement: ForStatement,
    while_statement: WhileStatement,
    do_statement: DoStatement,
    try_statement: TryStatement,
    using_statement: UsingStatement,
    identifier_name: IdentifierName,
    member_access_expression: MemberAccessExpression,
    invocation_expression: InvocationExpression,
    argument: Argument,
    object_creation_expression: ObjectCreationExpression,
    array_creation_expression: ArrayCreationExpression,
    implicit_array_creation_expression: ImplicitArrayCreationExpression,
    lambda_expression: LambdaExpression,
    await_expression: AwaitExpression,
}

/// Walk `node` and its descendants in document order.
///
/// Returns `VisitResult::Stop` if the visitor stopped the traversal, and
/// `VisitResult::Continue` otherwise.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, node: &SyntaxNode) -> VisitResult {
    let mut result = visitor.visit_node(node);
    if result == VisitResult::Continue {
        result = visit_typed(visitor, node);
    }
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for child in node.children() {
                if walk(visitor, &child) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    leave_typed(visitor, node);
    visitor.leave_node(node);
    VisitResult::Continue
}
