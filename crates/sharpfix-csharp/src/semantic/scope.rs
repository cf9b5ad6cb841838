//! Resolving type syntax against the symbol table.
//!
//! Type names are looked up from the position of the syntax outward: type
//! parameters of enclosing methods and types, nested types, then each
//! enclosing namespace followed by its using directives, and finally the
//! global namespace and the compilation unit's usings.

use std::collections::HashMap;

use sharpfix_core::patch::Span;
use sharpfix_cst::nodes::{
    ArrayType, AstNode, CompilationUnit, GenericName, IdentifierName, NamespaceDeclaration,
    NullableType, PredefinedType, QualifiedName, UsingDirective,
};
use sharpfix_cst::{SyntaxKind, SyntaxNode};

use super::library::WellKnown;
use super::symbols::{SymbolId, SymbolTable, TypeRef};

/// Identity of a declaring node within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey {
    kind: SyntaxKind,
    span: Span,
}

impl NodeKey {
    pub(crate) fn of(node: &SyntaxNode) -> Self {
        NodeKey {
            kind: node.kind(),
            span: node.span(),
        }
    }
}

/// Declaring nodes and the symbols they declare.
pub(crate) type NodeMap = HashMap<NodeKey, SymbolId>;

/// A name that resolved to a namespace or a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceOrType {
    Namespace(SymbolId),
    Type(TypeRef),
}

/// Type lookup over one table and the node map of the tree being bound.
#[derive(Clone, Copy)]
pub(crate) struct Scopes<'a> {
    pub(crate) table: &'a SymbolTable,
    pub(crate) nodes: &'a NodeMap,
}

impl<'a> Scopes<'a> {
    pub(crate) fn new(table: &'a SymbolTable, nodes: &'a NodeMap) -> Self {
        Scopes { table, nodes }
    }

    pub(crate) fn declared(&self, node: &SyntaxNode) -> Option<SymbolId> {
        self.nodes.get(&NodeKey::of(node)).copied()
    }

    pub(crate) fn well_known(&self, well_known: WellKnown) -> Option<TypeRef> {
        well_known.symbol(self.table).map(TypeRef::named)
    }

    /// The type named by a type syntax node.
    ///
    /// Returns `None` for names that do not resolve and for `var`.
    pub(crate) fn resolve_type(&self, ty: &SyntaxNode) -> Option<TypeRef> {
        match self.resolve_namespace_or_type(ty)? {
            NamespaceOrType::Type(ty) => Some(ty),
            NamespaceOrType::Namespace(_) => None,
        }
    }

    pub(crate) fn resolve_namespace_or_type(&self, ty: &SyntaxNode) -> Option<NamespaceOrType> {
        match ty.kind() {
            SyntaxKind::PredefinedType => {
                let keyword = PredefinedType::cast(ty.clone())?.keyword()?;
                if keyword.kind() == SyntaxKind::VoidKeyword {
                    return Some(NamespaceOrType::Type(TypeRef::Void));
                }
                let well_known = WellKnown::from_keyword(keyword.text())?;
                self.well_known(well_known).map(NamespaceOrType::Type)
            }
            SyntaxKind::IdentifierName => {
                let name = IdentifierName::cast(ty.clone())?.text();
                self.lookup(ty, &name, &[])
            }
            SyntaxKind::GenericName => {
                let generic = GenericName::cast(ty.clone())?;
                let args = generic
                    .type_arguments()
                    .iter()
                    .map(|arg| self.resolve_type(arg))
                    .collect::<Option<Vec<_>>>()?;
                self.lookup(ty, &generic.text(), &args)
            }
            SyntaxKind::QualifiedName => {
                let qualified = QualifiedName::cast(ty.clone())?;
                let left = self.resolve_namespace_or_type(&qualified.left()?)?;
                self.resolve_right(&left, &qualified.right()?)
            }
            SyntaxKind::ArrayType => {
                let array = ArrayType::cast(ty.clone())?;
                let element = self.resolve_type(&array.element_type()?)?;
                let ty = array
                    .ranks()
                    .into_iter()
                    .rev()
                    .fold(element, |element, rank| TypeRef::Array {
                        element: Box::new(element),
                        rank,
                    });
                Some(NamespaceOrType::Type(ty))
            }
            SyntaxKind::NullableType => {
                let element = NullableType::cast(ty.clone())?.element_type()?;
                self.resolve_namespace_or_type(&element)
            }
            _ => None,
        }
    }

    /// Resolve `right` as a member of the namespace or type `left`.
    fn resolve_right(&self, left: &NamespaceOrType, right: &SyntaxNode) -> Option<NamespaceOrType> {
        let (name, args) = self.simple_name(right)?;
        match left {
            NamespaceOrType::Namespace(ns) => self.in_namespace(*ns, &name, &args),
            NamespaceOrType::Type(ty) => {
                let nested = self.nested_type(ty.symbol()?, &name, args.len())?;
                Some(NamespaceOrType::Type(TypeRef::generic(nested, args)))
            }
        }
    }

    /// Name and resolved type arguments of an identifier or generic name.
    fn simple_name(&self, node: &SyntaxNode) -> Option<(String, Vec<TypeRef>)> {
        match node.kind() {
            SyntaxKind::IdentifierName => {
                Some((IdentifierName::cast(node.clone())?.text(), Vec::new()))
            }
            SyntaxKind::GenericName => {
                let generic = GenericName::cast(node.clone())?;
                let args = generic
                    .type_arguments()
                    .iter()
                    .map(|arg| self.resolve_type(arg))
                    .collect::<Option<Vec<_>>>()?;
                Some((generic.text(), args))
            }
            _ => None,
        }
    }

    fn in_namespace(&self, ns: SymbolId, name: &str, args: &[TypeRef]) -> Option<NamespaceOrType> {
        if let Some(ty) = self.table.type_member(ns, name, args.len()) {
            return Some(NamespaceOrType::Type(TypeRef::generic(ty, args.to_vec())));
        }
        if args.is_empty() {
            return self
                .table
                .child_namespace(ns, name)
                .map(NamespaceOrType::Namespace);
        }
        None
    }

    /// Look up a simple type or namespace name from the position of `at`.
    pub(crate) fn lookup(&self, at: &SyntaxNode, name: &str, args: &[TypeRef]) -> Option<NamespaceOrType> {
        let arity = args.len();
        // For each namespace declaration, the namespace declared around it.
        let mut enclosing_namespaces = at
            .ancestors()
            .filter(|a| {
                matches!(
                    a.kind(),
                    SyntaxKind::NamespaceDeclaration | SyntaxKind::FileScopedNamespaceDeclaration
                )
            })
            .filter_map(|a| self.declared(&a))
            .collect::<Vec<_>>()
            .into_iter()
            .skip(1);

        for ancestor in at.ancestors() {
            match ancestor.kind() {
                SyntaxKind::MethodDeclaration | SyntaxKind::DelegateDeclaration => {
                    if let Some(found) = self.type_parameter(&ancestor, name, arity) {
                        return Some(found);
                    }
                }
                kind if kind.is_type_declaration() => {
                    if let Some(found) = self.type_parameter(&ancestor, name, arity) {
                        return Some(found);
                    }
                    let Some(symbol) = self.declared(&ancestor) else {
                        continue;
                    };
                    if let Some(nested) = self.nested_type(symbol, name, arity) {
                        return Some(NamespaceOrType::Type(TypeRef::generic(nested, args.to_vec())));
                    }
                }
                SyntaxKind::NamespaceDeclaration | SyntaxKind::FileScopedNamespaceDeclaration => {
                    let Some(ns) = self.declared(&ancestor) else {
                        continue;
                    };
                    let outer = enclosing_namespaces
                        .next()
                        .unwrap_or_else(|| self.table.global_namespace());
                    if let Some(found) = self.in_namespace(ns, name, args) {
                        return Some(found);
                    }
                    let usings = NamespaceDeclaration::cast(ancestor.clone())
                        .map(|n| n.usings())
                        .unwrap_or_default();
                    if let Some(found) = self.in_usings(&usings, name, args) {
                        return Some(found);
                    }
                    // Outer parts of a dotted name: `namespace A.B` also searches `A`.
                    let mut current = self.table.get(ns).container;
                    while let Some(part) = current.filter(|&p| p != outer) {
                        if let Some(found) = self.in_namespace(part, name, args) {
                            return Some(found);
                        }
                        current = self.table.get(part).container;
                    }
                }
                SyntaxKind::CompilationUnit => {
                    let global = self.table.global_namespace();
                    if let Some(found) = self.in_namespace(global, name, args) {
                        return Some(found);
                    }
                    let usings = CompilationUnit::cast(ancestor.clone())
                        .map(|n| n.usings())
                        .unwrap_or_default();
                    if let Some(found) = self.in_usings(&usings, name, args) {
                        return Some(found);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn type_parameter(&self, declaration: &SyntaxNode, name: &str, arity: usize) -> Option<NamespaceOrType> {
        if arity != 0 {
            return None;
        }
        let owner = self.declared(declaration)?;
        let index = self
            .table
            .get(owner)
            .type_parameters
            .iter()
            .position(|p| p == name)?;
        Some(NamespaceOrType::Type(TypeRef::Parameter { owner, index }))
    }

    /// A nested type of `ty` or of one of its base types.
    pub(crate) fn nested_type(&self, ty: SymbolId, name: &str, arity: usize) -> Option<SymbolId> {
        let mut visited = Vec::new();
        let mut pending = vec![ty];
        while let Some(current) = pending.pop() {
            if visited.contains(&current) {
                continue;
            }
            visited.push(current);
            if let Some(found) = self.table.type_member(current, name, arity) {
                return Some(found);
            }
            pending.extend(self.table.get(current).bases.iter().filter_map(TypeRef::symbol));
        }
        None
    }

    fn in_usings(&self, usings: &[UsingDirective], name: &str, args: &[TypeRef]) -> Option<NamespaceOrType> {
        if args.is_empty() {
            let aliased = usings
                .iter()
                .filter(|u| u.alias().as_deref() == Some(name))
                .find_map(|u| self.using_target(u));
            if aliased.is_some() {
                return aliased;
            }
        }
        usings
            .iter()
            .filter(|u| u.alias().is_none() && !u.is_static())
            .filter_map(|u| match self.using_target(u)? {
                NamespaceOrType::Namespace(ns) => Some(ns),
                NamespaceOrType::Type(_) => None,
            })
            .find_map(|ns| {
                let ty = self.table.type_member(ns, name, args.len())?;
                Some(NamespaceOrType::Type(TypeRef::generic(ty, args.to_vec())))
            })
    }

    /// What a using directive names, resolved from the global namespace.
    pub(crate) fn using_target(&self, using: &UsingDirective) -> Option<NamespaceOrType> {
        self.resolve_from_global(&using.name()?)
    }

    /// Resolve a possibly qualified name starting at the global namespace.
    pub(crate) fn resolve_from_global(&self, name: &SyntaxNode) -> Option<NamespaceOrType> {
        match name.kind() {
            SyntaxKind::QualifiedName => {
                let qualified = QualifiedName::cast(name.clone())?;
                let left = self.resolve_from_global(&qualified.left()?)?;
                self.resolve_right(&left, &qualified.right()?)
            }
            SyntaxKind::IdentifierName | SyntaxKind::GenericName => {
                let (simple, args) = self.simple_name(name)?;
                self.in_namespace(self.table.global_namespace(), &simple, &args)
            }
            _ => self.resolve_namespace_or_type(name),
        }
    }

    /// Namespaces brought into scope at `at` by using directives and by the
    /// enclosing namespace declarations, innermost first.
    pub(crate) fn imported_namespaces(&self, at: &SyntaxNode) -> Vec<SymbolId> {
        let mut namespaces = Vec::new();
        for ancestor in at.ancestors() {
            let usings = match ancestor.kind() {
                SyntaxKind::NamespaceDeclaration | SyntaxKind::FileScopedNamespaceDeclaration => {
                    let mut current = self.declared(&ancestor);
                    while let Some(ns) = current {
                        if !namespaces.contains(&ns) {
                            namespaces.push(ns);
                        }
                        current = self.table.get(ns).container;
                    }
                    NamespaceDeclaration::cast(ancestor.clone())
                        .map(|n| n.usings())
                        .unwrap_or_default()
                }
                SyntaxKind::CompilationUnit => CompilationUnit::cast(ancestor.clone())
                    .map(|n| n.usings())
                    .unwrap_or_default(),
                _ => continue,
            };
            for using in usings.iter().filter(|u| u.alias().is_none() && !u.is_static()) {
                if let Some(NamespaceOrType::Namespace(ns)) = self.using_target(using) {
                    if !namespaces.contains(&ns) {
                        namespaces.push(ns);
                    }
                }
            }
        }
        let global = self.table.global_namespace();
        if !namespaces.contains(&global) {
            namespaces.push(global);
        }
        namespaces
    }

    /// Types imported with `using static` at `at`.
    pub(crate) fn static_imports(&self, at: &SyntaxNode) -> Vec<SymbolId> {
        let mut types = Vec::new();
        for ancestor in at.ancestors() {
            let usings = match ancestor.kind() {
                SyntaxKind::NamespaceDeclaration | SyntaxKind::FileScopedNamespaceDeclaration => {
                    NamespaceDeclaration::cast(ancestor.clone())
                        .map(|n| n.usings())
                        .unwrap_or_default()
                }
                SyntaxKind::CompilationUnit => CompilationUnit::cast(ancestor.clone())
                    .map(|n| n.usings())
                    .unwrap_or_default(),
                _ => continue,
            };
            for using in usings.iter().filter(|u| u.is_static()) {
                if let Some(NamespaceOrType::Type(ty)) = self.using_target(using) {
                    if let Some(symbol) = ty.symbol() {
                        types.push(symbol);
                    }
                }
            }
        }
        types
    }
}
