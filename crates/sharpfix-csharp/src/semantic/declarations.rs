//! Declaring the symbols of a tree.
//!
//! Declaration runs in three passes so that every name a signature mentions
//! is already declared when the signature is resolved:
//!
//! 1. Namespaces and types, nested types included.
//! 2. Base lists, and the `Invoke` method of each delegate.
//! 3. Methods, constructors, properties, fields and their parameters.
//!
//! Locals and lambda parameters are declared afterwards by the semantic
//! model, because `var` needs expression types.

use sharpfix_cst::nodes::{
    has_modifier, AstNode, ConstructorDeclaration, DelegateDeclaration, EnumDeclaration,
    FieldDeclaration, MethodDeclaration, NamespaceDeclaration, Parameter, ParameterList,
    PropertyDeclaration, TypeDeclaration,
};
use sharpfix_cst::{SyntaxKind, SyntaxNode, SyntaxToken};

use super::scope::{NodeKey, NodeMap, Scopes};
use super::symbols::{Modifiers, RefKind, Symbol, SymbolId, SymbolKind, SymbolTable, TypeRef};

/// Name given to constructor symbols.
pub const CONSTRUCTOR_NAME: &str = ".ctor";

/// Declare the reference library. Its symbols carry no spans.
pub(crate) fn declare_library(table: &mut SymbolTable, root: &SyntaxNode) {
    Declarer::new(table, false).run(root);
}

/// Declare a document's namespaces, types and members.
pub(crate) fn declare_document(table: &mut SymbolTable, root: &SyntaxNode) -> NodeMap {
    Declarer::new(table, true).run(root)
}

struct Declarer<'t> {
    table: &'t mut SymbolTable,
    nodes: NodeMap,
    record_spans: bool,
    types: Vec<(SymbolId, SyntaxNode)>,
}

impl<'t> Declarer<'t> {
    fn new(table: &'t mut SymbolTable, record_spans: bool) -> Self {
        Declarer {
            table,
            nodes: NodeMap::new(),
            record_spans,
            types: Vec::new(),
        }
    }

    fn run(mut self, root: &SyntaxNode) -> NodeMap {
        let global = self.table.global_namespace();
        self.declare_namespace_members(root, global);

        let types = std::mem::take(&mut self.types);
        for (symbol, node) in &types {
            self.declare_bases(*symbol, node);
        }
        for (symbol, node) in &types {
            self.declare_type_members(*symbol, node);
        }
        self.nodes
    }

    fn add(&mut self, mut symbol: Symbol, node: &SyntaxNode, identifier: Option<&SyntaxToken>) -> SymbolId {
        if self.record_spans {
            symbol.declaration = Some(node.span());
            symbol.identifier = identifier.map(SyntaxToken::span);
        }
        let id = self.table.add(symbol);
        self.nodes.insert(NodeKey::of(node), id);
        id
    }

    fn scopes(&self) -> Scopes<'_> {
        Scopes::new(self.table, &self.nodes)
    }

    // ------------------------------------------------------------------
    // Pass 1: namespaces and types
    // ------------------------------------------------------------------

    fn declare_namespace_members(&mut self, parent: &SyntaxNode, container: SymbolId) {
        for child in parent.children() {
            match child.kind() {
                SyntaxKind::NamespaceDeclaration | SyntaxKind::FileScopedNamespaceDeclaration => {
                    let Some(namespace) = NamespaceDeclaration::cast(child.clone()) else {
                        continue;
                    };
                    let name = namespace
                        .name()
                        .map(|n| n.trimmed_text())
                        .unwrap_or_default();
                    let mut ns = container;
                    for part in name.split('.').map(str::trim).filter(|p| !p.is_empty()) {
                        ns = self.table.namespace(ns, part);
                    }
                    self.nodes.insert(NodeKey::of(&child), ns);
                    self.declare_namespace_members(&child, ns);
                }
                kind if kind.is_type_declaration() => self.declare_type(&child, container),
                _ => {}
            }
        }
    }

    fn declare_type(&mut self, node: &SyntaxNode, container: SymbolId) {
        let kind = match node.kind() {
            SyntaxKind::ClassDeclaration => SymbolKind::Class,
            SyntaxKind::InterfaceDeclaration => SymbolKind::Interface,
            SyntaxKind::StructDeclaration => SymbolKind::Struct,
            SyntaxKind::EnumDeclaration => SymbolKind::Enum,
            SyntaxKind::DelegateDeclaration => SymbolKind::Delegate,
            _ => return,
        };
        let (identifier, type_parameters) = if let Some(ty) = TypeDeclaration::cast(node.clone()) {
            (ty.identifier(), ty.type_parameters())
        } else if let Some(delegate) = DelegateDeclaration::cast(node.clone()) {
            (delegate.identifier(), delegate.type_parameters())
        } else if let Some(en) = EnumDeclaration::cast(node.clone()) {
            (en.identifier(), Vec::new())
        } else {
            return;
        };
        let Some(identifier) = identifier else {
            return;
        };

        let mut symbol = Symbol::new(kind, identifier.text());
        symbol.container = Some(container);
        symbol.type_parameters = type_parameters;
        symbol.modifiers = modifiers_of(node);
        let id = self.add(symbol, node, Some(&identifier));
        self.types.push((id, node.clone()));

        if let Some(en) = EnumDeclaration::cast(node.clone()) {
            for member in en.member_names() {
                let mut symbol = Symbol::new(SymbolKind::EnumMember, member.text());
                symbol.container = Some(id);
                symbol.modifiers.is_const = true;
                symbol.ty = Some(TypeRef::named(id));
                self.add(symbol, &member.parent(), Some(&member));
            }
            return;
        }
        for child in node.children().filter(|c| c.kind().is_type_declaration()) {
            self.declare_type(&child, id);
        }
    }

    // ------------------------------------------------------------------
    // Pass 2: base lists and delegate signatures
    // ------------------------------------------------------------------

    fn declare_bases(&mut self, symbol: SymbolId, node: &SyntaxNode) {
        if let Some(ty) = TypeDeclaration::cast(node.clone()) {
            let bases: Vec<TypeRef> = ty
                .base_list()
                .map(|list| list.types())
                .unwrap_or_default()
                .iter()
                .filter_map(|base| self.scopes().resolve_type(base))
                .collect();
            self.table.get_mut(symbol).bases = bases;
            return;
        }
        let Some(delegate) = DelegateDeclaration::cast(node.clone()) else {
            return;
        };
        let return_type = delegate
            .return_type()
            .and_then(|ty| self.scopes().resolve_type(&ty));
        let mut invoke = Symbol::new(SymbolKind::Method, "Invoke");
        invoke.container = Some(symbol);
        invoke.ty = return_type;
        let invoke = self.table.add(invoke);
        if let Some(list) = delegate.parameter_list() {
            self.declare_parameters(&list, invoke);
        }
    }

    // ------------------------------------------------------------------
    // Pass 3: members
    // ------------------------------------------------------------------

    fn declare_type_members(&mut self, container: SymbolId, node: &SyntaxNode) {
        let is_interface = node.kind() == SyntaxKind::InterfaceDeclaration;
        for member in node.children() {
            match member.kind() {
                SyntaxKind::MethodDeclaration => self.declare_method(&member, container, is_interface),
                SyntaxKind::ConstructorDeclaration => self.declare_constructor(&member, container),
                SyntaxKind::PropertyDeclaration => self.declare_property(&member, container),
                SyntaxKind::FieldDeclaration => self.declare_fields(&member, container),
                _ => {}
            }
        }
    }

    fn declare_method(&mut self, node: &SyntaxNode, container: SymbolId, is_interface: bool) {
        let Some(method) = MethodDeclaration::cast(node.clone()) else {
            return;
        };
        let Some(identifier) = method.identifier() else {
            return;
        };
        let mut symbol = Symbol::new(SymbolKind::Method, identifier.text());
        symbol.container = Some(container);
        symbol.type_parameters = method.type_parameters();
        symbol.modifiers = modifiers_of(node);
        symbol.modifiers.is_abstract |= is_interface;
        let id = self.add(symbol, node, Some(&identifier));

        let return_type = method
            .return_type()
            .and_then(|ty| self.scopes().resolve_type(&ty));
        let explicit_interface = method
            .explicit_interface()
            .and_then(|ty| self.scopes().resolve_type(&ty));
        let symbol = self.table.get_mut(id);
        symbol.ty = return_type;
        symbol.explicit_interface = explicit_interface;

        if let Some(list) = method.parameter_list() {
            self.declare_parameters(&list, id);
        }
    }

    fn declare_constructor(&mut self, node: &SyntaxNode, container: SymbolId) {
        let Some(constructor) = ConstructorDeclaration::cast(node.clone()) else {
            return;
        };
        let mut symbol = Symbol::new(SymbolKind::Constructor, CONSTRUCTOR_NAME);
        symbol.container = Some(container);
        symbol.modifiers = modifiers_of(node);
        symbol.ty = Some(TypeRef::Void);
        let id = self.add(symbol, node, constructor.identifier().as_ref());
        if let Some(list) = constructor.parameter_list() {
            self.declare_parameters(&list, id);
        }
    }

    fn declare_property(&mut self, node: &SyntaxNode, container: SymbolId) {
        let Some(property) = PropertyDeclaration::cast(node.clone()) else {
            return;
        };
        let Some(identifier) = property.identifier() else {
            return;
        };
        let ty = property.ty().and_then(|ty| self.scopes().resolve_type(&ty));
        let mut symbol = Symbol::new(SymbolKind::Property, identifier.text());
        symbol.container = Some(container);
        symbol.modifiers = modifiers_of(node);
        symbol.ty = ty;
        self.add(symbol, node, Some(&identifier));
    }

    fn declare_fields(&mut self, node: &SyntaxNode, container: SymbolId) {
        let Some(declaration) = FieldDeclaration::cast(node.clone()).and_then(|f| f.declaration()) else {
            return;
        };
        let ty = declaration
            .ty()
            .and_then(|ty| self.scopes().resolve_type(&ty));
        let modifiers = modifiers_of(node);
        for declarator in declaration.declarators() {
            let Some(identifier) = declarator.identifier() else {
                continue;
            };
            let mut symbol = Symbol::new(SymbolKind::Field, identifier.text());
            symbol.container = Some(container);
            symbol.modifiers = modifiers;
            symbol.ty = ty.clone();
            self.add(symbol, declarator.syntax(), Some(&identifier));
        }
    }

    fn declare_parameters(&mut self, list: &ParameterList, owner: SymbolId) {
        for parameter in list.parameters() {
            let ty = parameter.ty().and_then(|ty| self.scopes().resolve_type(&ty));
            let mut symbol = parameter_symbol(&parameter, owner);
            symbol.ty = ty;
            let id = self.add(symbol, parameter.syntax(), parameter.identifier().as_ref());
            self.table.get_mut(owner).parameters.push(id);
        }
    }
}

/// A parameter symbol without its type.
pub(crate) fn parameter_symbol(parameter: &Parameter, owner: SymbolId) -> Symbol {
    let mut symbol = Symbol::new(SymbolKind::Parameter, parameter.name());
    symbol.container = Some(owner);
    symbol.ref_kind = ref_kind_of(parameter.syntax());
    symbol.modifiers.is_this = parameter.is_this();
    symbol.modifiers.is_params = parameter.is_params();
    symbol.modifiers.has_default = parameter.default_value().is_some();
    symbol
}

fn ref_kind_of(node: &SyntaxNode) -> RefKind {
    node.child_tokens()
        .find_map(|t| match t.kind() {
            SyntaxKind::RefKeyword => Some(RefKind::Ref),
            SyntaxKind::OutKeyword => Some(RefKind::Out),
            SyntaxKind::InKeyword => Some(RefKind::In),
            _ => None,
        })
        .unwrap_or_default()
}

fn modifiers_of(node: &SyntaxNode) -> Modifiers {
    Modifiers {
        is_static: has_modifier(node, SyntaxKind::StaticKeyword),
        is_async: has_modifier(node, SyntaxKind::AsyncKeyword),
        is_abstract: has_modifier(node, SyntaxKind::AbstractKeyword),
        is_extern: has_modifier(node, SyntaxKind::ExternKeyword),
        is_const: has_modifier(node, SyntaxKind::ConstKeyword),
        ..Modifiers::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::library;

    fn declare(source: &str) -> (SymbolTable, NodeMap, SyntaxNode) {
        let tree = sharpfix_cst::parse(source).unwrap();
        let mut table = library::table().clone();
        let nodes = declare_document(&mut table, tree.root());
        (table, nodes, tree.root().clone())
    }

    #[test]
    fn dotted_namespaces_nest() {
        let (table, _, _) = declare("namespace A.B { class C { } }");
        let ns = table.namespace_by_path("A.B").unwrap();
        let c = table.type_member(ns, "C", 0).unwrap();
        assert_eq!(table.qualified_name(c), "A.B.C");
        assert!(table.get(c).declaration.is_some());
    }

    #[test]
    fn members_resolve_library_types() {
        let source = "using System.Collections.Generic;\nclass C\n{\n    private List<int> _items;\n    public string Name { get; }\n    public void Add(int value, ref string note) { }\n}\n";
        let (table, _, _) = declare(source);
        let c = table.type_by_path("C", 0).unwrap();
        let field = table.members_named(c, "_items")[0];
        let list = table.type_by_path("System.Collections.Generic.List", 1).unwrap();
        assert_eq!(table.get(field).ty.as_ref().and_then(|t| t.symbol()), Some(list));
        let add = table.members_named(c, "Add")[0];
        let params = &table.get(add).parameters;
        assert_eq!(params.len(), 2);
        assert_eq!(table.get(params[1]).ref_kind, RefKind::Ref);
        assert_eq!(table.get(add).ty, Some(TypeRef::Void));
    }

    #[test]
    fn method_type_parameters_are_owned_by_the_method() {
        let (table, _, _) = declare("class C { T Pick<T>(T a, T b) { return a; } }");
        let c = table.type_by_path("C", 0).unwrap();
        let pick = table.members_named(c, "Pick")[0];
        assert_eq!(
            table.get(pick).ty,
            Some(TypeRef::Parameter {
                owner: pick,
                index: 0
            })
        );
    }

    #[test]
    fn base_lists_are_resolved() {
        let source = "using System;\ninterface IRun : IDisposable { void Run(); }\nclass Runner : IRun { public void Run() { } public void Dispose() { } }\n";
        let (table, _, _) = declare(source);
        let runner = table.type_by_path("Runner", 0).unwrap();
        let run = table.type_by_path("IRun", 0).unwrap();
        assert_eq!(table.get(runner).bases, vec![TypeRef::named(run)]);
        let dispose = table.type_by_path("System.IDisposable", 0).unwrap();
        assert_eq!(table.get(run).bases, vec![TypeRef::named(dispose)]);
    }

    #[test]
    fn declaring_nodes_are_recorded() {
        let (table, nodes, root) = declare("class C { int _a, _b; }");
        let declarators: Vec<_> = root
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::VariableDeclarator)
            .collect();
        assert_eq!(declarators.len(), 2);
        let second = nodes[&NodeKey::of(&declarators[1])];
        assert_eq!(table.get(second).name, "_b");
    }
}
