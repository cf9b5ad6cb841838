// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Compilation units, namespaces, types and members.

use super::{child, children, has_modifier};
use crate::kind::SyntaxKind;
use crate::nodes::{Block, ParameterList, TypeParameterList};
use crate::red::{SyntaxNode, SyntaxToken};

ast_node!(CompilationUnit => CompilationUnit);
ast_node!(UsingDirective => UsingDirective);
ast_node!(
    /// Block-form or file-scoped namespace.
    NamespaceDeclaration => NamespaceDeclaration | FileScopedNamespaceDeclaration
);
ast_node!(
    /// Class, interface or struct.
    TypeDeclaration => ClassDeclaration | InterfaceDeclaration | StructDeclaration
);
ast_node!(EnumDeclaration => EnumDeclaration);
ast_node!(DelegateDeclaration => DelegateDeclaration);
ast_node!(BaseList => BaseList);
ast_node!(AttributeList => AttributeList);
ast_node!(MethodDeclaration => MethodDeclaration);
ast_node!(ConstructorDeclaration => ConstructorDeclaration);
ast_node!(PropertyDeclaration => PropertyDeclaration);
ast_node!(AccessorDeclaration => GetAccessorDeclaration | SetAccessorDeclaration | InitAccessorDeclaration);
ast_node!(FieldDeclaration => FieldDeclaration);
ast_node!(VariableDeclaration => VariableDeclaration);
ast_node!(VariableDeclarator => VariableDeclarator);
ast_node!(ArrowExpressionClause => ArrowExpressionClause);

/// True for nodes that can appear as members of a namespace or type.
pub fn is_member_kind(kind: SyntaxKind) -> bool {
    kind.is_type_declaration()
        || matches!(
            kind,
            SyntaxKind::NamespaceDeclaration
                | SyntaxKind::FileScopedNamespaceDeclaration
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::ConstructorDeclaration
                | SyntaxKind::PropertyDeclaration
                | SyntaxKind::FieldDeclaration
        )
}

fn members_of(node: &SyntaxNode) -> Vec<SyntaxNode> {
    node.children().filter(|c| is_member_kind(c.kind())).collect()
}

impl CompilationUnit {
    pub fn usings(&self) -> Vec<UsingDirective> {
        children(&self.0)
    }

    pub fn members(&self) -> Vec<SyntaxNode> {
        members_of(&self.0)
    }
}

impl UsingDirective {
    pub fn is_static(&self) -> bool {
        self.0.token_of_kind(SyntaxKind::StaticKeyword).is_some()
    }

    /// Alias name of `using Alias = Name;`.
    pub fn alias(&self) -> Option<String> {
        let name_equals = self.0.child_of_kind(SyntaxKind::NameEquals)?;
        Some(name_equals.first_token()?.text().to_string())
    }

    /// The imported name.
    pub fn name(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_syntax())
    }
}

impl NamespaceDeclaration {
    pub fn name(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_syntax())
    }

    pub fn is_file_scoped(&self) -> bool {
        self.0.kind() == SyntaxKind::FileScopedNamespaceDeclaration
    }

    pub fn usings(&self) -> Vec<UsingDirective> {
        children(&self.0)
    }

    pub fn members(&self) -> Vec<SyntaxNode> {
        members_of(&self.0)
    }
}

impl TypeDeclaration {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.0.child_tokens().find(|t| {
            matches!(
                t.kind(),
                SyntaxKind::ClassKeyword | SyntaxKind::InterfaceKeyword | SyntaxKind::StructKeyword
            )
        })
    }

    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    pub fn name(&self) -> String {
        self.identifier()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    pub fn type_parameters(&self) -> Vec<String> {
        child::<TypeParameterList>(&self.0)
            .map(|list| list.names())
            .unwrap_or_default()
    }

    pub fn base_list(&self) -> Option<BaseList> {
        child(&self.0)
    }

    pub fn is_static(&self) -> bool {
        has_modifier(&self.0, SyntaxKind::StaticKeyword)
    }

    pub fn members(&self) -> Vec<SyntaxNode> {
        members_of(&self.0)
    }
}

impl EnumDeclaration {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    pub fn member_names(&self) -> Vec<SyntaxToken> {
        self.0
            .children()
            .filter(|c| c.kind() == SyntaxKind::EnumMemberDeclaration)
            .filter_map(|c| c.token_of_kind(SyntaxKind::Identifier))
            .collect()
    }
}

impl DelegateDeclaration {
    pub fn return_type(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_syntax())
    }

    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    pub fn type_parameters(&self) -> Vec<String> {
        child::<TypeParameterList>(&self.0)
            .map(|list| list.names())
            .unwrap_or_default()
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        child(&self.0)
    }
}

impl BaseList {
    pub fn types(&self) -> Vec<SyntaxNode> {
        self.0
            .children()
            .filter(|c| c.kind() == SyntaxKind::SimpleBaseType)
            .filter_map(|c| c.children().next())
            .collect()
    }
}

impl AttributeList {
    /// Names of the attributes in the list.
    pub fn names(&self) -> Vec<String> {
        self.0
            .children()
            .filter(|c| c.kind() == SyntaxKind::Attribute)
            .filter_map(|c| c.children().next())
            .map(|name| name.trimmed_text())
            .collect()
    }
}

impl MethodDeclaration {
    pub fn return_type(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_syntax())
    }

    /// Interface name of an explicit implementation (`void IFoo.Bar()`).
    pub fn explicit_interface(&self) -> Option<SyntaxNode> {
        self.0
            .child_of_kind(SyntaxKind::ExplicitInterfaceSpecifier)?
            .children()
            .next()
    }

    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    pub fn name(&self) -> String {
        self.identifier()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    pub fn type_parameters(&self) -> Vec<String> {
        child::<TypeParameterList>(&self.0)
            .map(|list| list.names())
            .unwrap_or_default()
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }

    pub fn expression_body(&self) -> Option<ArrowExpressionClause> {
        child(&self.0)
    }

    pub fn is_async(&self) -> bool {
        has_modifier(&self.0, SyntaxKind::AsyncKeyword)
    }

    pub fn is_static(&self) -> bool {
        has_modifier(&self.0, SyntaxKind::StaticKeyword)
    }

    pub fn async_keyword(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::AsyncKeyword)
    }
}

impl ConstructorDeclaration {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        child(&self.0)
    }

    /// `: this(...)` or `: base(...)`.
    pub fn initializer(&self) -> Option<SyntaxNode> {
        self.0.child_of_kind(SyntaxKind::ConstructorInitializer)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }

    pub fn expression_body(&self) -> Option<ArrowExpressionClause> {
        child(&self.0)
    }

    pub fn is_static(&self) -> bool {
        has_modifier(&self.0, SyntaxKind::StaticKeyword)
    }
}

impl PropertyDeclaration {
    pub fn ty(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_syntax())
    }

    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    pub fn accessors(&self) -> Vec<AccessorDeclaration> {
        self.0
            .child_of_kind(SyntaxKind::AccessorList)
            .map(|list| children(&list))
            .unwrap_or_default()
    }

    pub fn expression_body(&self) -> Option<ArrowExpressionClause> {
        child(&self.0)
    }

    /// Value of `{ get; } = value;`.
    pub fn initializer(&self) -> Option<SyntaxNode> {
        self.0
            .child_of_kind(SyntaxKind::EqualsValueClause)?
            .children()
            .next()
    }

    pub fn is_static(&self) -> bool {
        has_modifier(&self.0, SyntaxKind::StaticKeyword)
    }
}

impl AccessorDeclaration {
    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }

    pub fn expression_body(&self) -> Option<ArrowExpressionClause> {
        child(&self.0)
    }
}

impl FieldDeclaration {
    pub fn declaration(&self) -> Option<VariableDeclaration> {
        child(&self.0)
    }

    pub fn is_static(&self) -> bool {
        has_modifier(&self.0, SyntaxKind::StaticKeyword)
            || has_modifier(&self.0, SyntaxKind::ConstKeyword)
    }
}

impl VariableDeclaration {
    pub fn ty(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_syntax())
    }

    pub fn declarators(&self) -> Vec<VariableDeclarator> {
        children(&self.0)
    }
}

impl VariableDeclarator {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    pub fn name(&self) -> String {
        self.identifier()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    pub fn initializer(&self) -> Option<SyntaxNode> {
        self.0
            .child_of_kind(SyntaxKind::EqualsValueClause)?
            .children()
            .next()
    }
}

impl ArrowExpressionClause {
    pub fn expression(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }
}
