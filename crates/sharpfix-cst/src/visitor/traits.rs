// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor trait definitions.

use crate::nodes::{
    // Declarations
    CompilationUnit, ConstructorDeclaration, DelegateDeclaration, EnumDeclaration,
    FieldDeclaration, MethodDeclaration, NamespaceDeclaration, PropertyDeclaration,
    TypeDeclaration, UsingDirective,
    // Statements
    Block, DoStatement, ExpressionStatement, ForEachStatement, ForStatement, IfStatement,
    LocalDeclarationStatement, ReturnStatement, ThrowStatement, TryStatement, UsingStatement,
    WhileStatement,
    // Expressions
    Argument, ArrayCreationExpression, AwaitExpression, IdentifierName,
    ImplicitArrayCreationExpression, InvocationExpression, LambdaExpression,
    MemberAccessExpression, ObjectCreationExpression,
};
use crate::red::SyntaxNode;

/// Result of visiting a node - controls traversal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// The walker will not descend into this node's children, but `leave_*`
    /// will still be called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called.
    Stop,
}

/// Macro to generate visitor trait method signatures.
///
/// This macro generates pairs of `visit_*` and `leave_*` methods with default
/// implementations that return `VisitResult::Continue` and do nothing,
/// respectively.
macro_rules! visitor_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Visit a [`", stringify!($node_type), "`] node.")]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, node: &$node_type) -> VisitResult {
                    VisitResult::Continue
                }

                $(#[$meta])*
                #[doc = concat!("Leave a [`", stringify!($node_type), "`] node.")]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, node: &$node_type) {}
            )*
        }
    };
}

/// Immutable visitor over a syntax tree.
///
/// [`Visitor::visit_node`] sees every node. When it returns anything other
/// than `Continue` the typed method is not called for that node.
pub trait Visitor {
    /// Called for every node before its typed `visit_*` method.
    #[allow(unused_variables)]
    fn visit_node(&mut self, node: &SyntaxNode) -> VisitResult {
        VisitResult::Continue
    }

    /// Called for every node after its typed `leave_*` method.
    #[allow(unused_variables)]
    fn leave_node(&mut self, node: &SyntaxNode) {}

    // Declarations
    visitor_methods! {
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
    }

    // Statements
    visitor_methods! {
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
    }

    // Expressions
    visitor_methods! {
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
}
