//! Semantic model for one document.
//!
//! The model declares the document's symbols on top of a clone of the
//! reference library, then answers questions about the tree:
//!
//! - [`SemanticModel::declared_symbol`]: the symbol a declaration introduces
//! - [`SemanticModel::symbol_info`]: what a name or call refers to
//! - [`SemanticModel::type_of`]: the type of an expression
//! - [`SemanticModel::bind_method_group_conversion`]: speculative conversion
//!   of a method group to a delegate type
//! - [`flow`]: reachability, exit points and `await` detection
//! - [`compiler`]: the compiler diagnostics the fix providers repair
//!
//! Binding is best effort. Names that do not resolve produce `None` rather
//! than errors, and callers treat `None` as "not applicable".

mod binder;
pub mod compiler;
mod declarations;
pub mod flow;
pub mod library;
mod scope;
pub mod symbols;
mod types;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use sharpfix_cst::nodes::{
    AstNode, CatchClause, ForEachStatement, LambdaExpression, MemberAccessExpression,
    VariableDeclaration,
};
use sharpfix_cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use declarations::CONSTRUCTOR_NAME;
pub use library::WellKnown;
pub use scope::NamespaceOrType;
pub use symbols::{Modifiers, RefKind, Substitution, Symbol, SymbolId, SymbolKind, SymbolTable, TypeRef};

use scope::{NodeKey, NodeMap, Scopes};

// ============================================================================
// Symbol Info
// ============================================================================

/// Why binding produced candidates instead of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateReason {
    #[default]
    None,
    OverloadResolutionFailure,
    /// A method group that was not invoked or converted.
    MemberGroup,
    Ambiguous,
}

/// What a piece of syntax refers to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolInfo {
    pub symbol: Option<SymbolId>,
    pub candidates: Vec<SymbolId>,
    pub candidate_reason: CandidateReason,
}

impl SymbolInfo {
    pub fn none() -> Self {
        SymbolInfo::default()
    }

    pub fn of(symbol: SymbolId) -> Self {
        SymbolInfo {
            symbol: Some(symbol),
            ..SymbolInfo::default()
        }
    }

    pub fn failed(candidates: Vec<SymbolId>, reason: CandidateReason) -> Self {
        SymbolInfo {
            symbol: None,
            candidates,
            candidate_reason: reason,
        }
    }
}

// ============================================================================
// Semantic Model
// ============================================================================

/// Symbols and bindings for one syntax tree.
#[derive(Debug, Clone)]
pub struct SemanticModel {
    root: SyntaxNode,
    table: SymbolTable,
    nodes: NodeMap,
    /// Member accesses through static classes, grouped by class.
    static_class_accesses: OnceCell<IndexMap<SymbolId, Vec<SyntaxNode>>>,
}

impl SemanticModel {
    /// Declare and bind `root`, which should be a compilation unit.
    pub fn new(root: SyntaxNode) -> Self {
        let mut table = library::table().clone();
        let nodes = declarations::declare_document(&mut table, &root);
        let mut model = SemanticModel {
            root,
            table,
            nodes,
            static_class_accesses: OnceCell::new(),
        };
        model.declare_locals();
        model
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        self.table.get(id)
    }

    pub(crate) fn scopes(&self) -> Scopes<'_> {
        Scopes::new(&self.table, &self.nodes)
    }

    /// The symbol declared by a declaration node.
    ///
    /// Declaration nodes are namespace, type, method, constructor, property,
    /// parameter and variable declarator nodes, foreach statements and catch
    /// declarations.
    pub fn declared_symbol(&self, node: &SyntaxNode) -> Option<SymbolId> {
        self.nodes.get(&NodeKey::of(node)).copied()
    }

    /// The node that declares `symbol` in this tree.
    pub fn declaration_node(&self, symbol: SymbolId) -> Option<SyntaxNode> {
        let span = self.symbol(symbol).declaration?;
        let outer = self.root.find_node(span)?;
        outer
            .descendants()
            .filter(|n| n.span() == span)
            .find(|n| self.declared_symbol(n) == Some(symbol))
    }

    /// The type a type syntax node names.
    pub fn resolve_type(&self, ty: &SyntaxNode) -> Option<TypeRef> {
        self.scopes().resolve_type(ty)
    }

    /// The library type `well_known`.
    pub fn well_known(&self, well_known: WellKnown) -> Option<TypeRef> {
        self.scopes().well_known(well_known)
    }

    /// The innermost method, constructor, property or field symbol around `node`.
    pub fn enclosing_member(&self, node: &SyntaxNode) -> Option<SymbolId> {
        node.ancestors()
            .filter(|a| {
                matches!(
                    a.kind(),
                    SyntaxKind::MethodDeclaration
                        | SyntaxKind::ConstructorDeclaration
                        | SyntaxKind::PropertyDeclaration
                )
            })
            .find_map(|a| self.declared_symbol(&a))
    }

    /// The innermost type symbol around `node`.
    pub fn enclosing_type(&self, node: &SyntaxNode) -> Option<SymbolId> {
        node.ancestors()
            .filter(|a| a.kind().is_type_declaration())
            .find_map(|a| self.declared_symbol(&a))
    }

    /// The static class and static member of `Type.Member`, when `node` is
    /// a member access whose qualifier names a static class and whose member
    /// is one of that class's own static members.
    pub fn static_class_access(&self, node: &SyntaxNode) -> Option<(SymbolId, SymbolId)> {
        let access = MemberAccessExpression::cast(node.clone())?;
        let type_symbol = self.symbol_info(&access.expression()?).symbol?;
        let ty = self.symbol(type_symbol);
        if ty.kind != SymbolKind::Class || !ty.is_static() {
            return None;
        }
        let info = self.symbol_info(node);
        let member = info.symbol.or_else(|| info.candidates.first().copied())?;
        let member_symbol = self.symbol(member);
        if !member_symbol.is_static() || member_symbol.container != Some(type_symbol) {
            return None;
        }
        Some((type_symbol, member))
    }

    /// Every [`SemanticModel::static_class_access`] in the tree, grouped by
    /// class in order of first access, each group in document order.
    ///
    /// Computed on first use and kept for the model's lifetime.
    pub fn static_class_accesses(&self) -> &IndexMap<SymbolId, Vec<SyntaxNode>> {
        self.static_class_accesses.get_or_init(|| {
            let mut grouped: IndexMap<SymbolId, Vec<SyntaxNode>> = IndexMap::new();
            for node in self.root.descendants() {
                if node.kind() != SyntaxKind::MemberAccessExpression {
                    continue;
                }
                if let Some((type_symbol, _)) = self.static_class_access(&node) {
                    grouped.entry(type_symbol).or_default().push(node);
                }
            }
            grouped
        })
    }

    // ------------------------------------------------------------------
    // Locals
    // ------------------------------------------------------------------

    /// Declare locals, foreach and catch variables, and lambda parameters in
    /// document order, so a `var` initializer sees earlier locals.
    fn declare_locals(&mut self) {
        let root = self.root.clone();
        for node in root.descendants() {
            match node.kind() {
                SyntaxKind::VariableDeclaration => {
                    let local_context = node.parent().is_some_and(|p| {
                        matches!(
                            p.kind(),
                            SyntaxKind::LocalDeclarationStatement
                                | SyntaxKind::ForStatement
                                | SyntaxKind::UsingStatement
                        )
                    });
                    if local_context {
                        self.declare_variables(&node);
                    }
                }
                SyntaxKind::ForEachStatement => self.declare_foreach_variable(&node),
                SyntaxKind::CatchClause => self.declare_catch_variable(&node),
                kind if kind.is_lambda() => self.declare_lambda_parameters(&node),
                _ => {}
            }
        }
    }

    fn add_local(&mut self, mut symbol: Symbol, node: &SyntaxNode, identifier: Option<SyntaxToken>) {
        symbol.container = self.enclosing_member(node).or_else(|| self.enclosing_type(node));
        symbol.declaration = Some(node.span());
        symbol.identifier = identifier.map(|t| t.span());
        let id = self.table.add(symbol);
        self.nodes.insert(NodeKey::of(node), id);
    }

    fn declare_variables(&mut self, node: &SyntaxNode) {
        let Some(declaration) = VariableDeclaration::cast(node.clone()) else {
            return;
        };
        let declared_type = declaration.ty().filter(|ty| !is_var(ty));
        let is_const = node
            .parent()
            .is_some_and(|p| p.token_of_kind(SyntaxKind::ConstKeyword).is_some());
        for declarator in declaration.declarators() {
            let ty = match &declared_type {
                Some(ty) => self.resolve_type(ty),
                None => declarator.initializer().and_then(|init| self.type_of(&init)),
            };
            let mut symbol = Symbol::new(SymbolKind::Local, declarator.name());
            symbol.ty = ty;
            symbol.modifiers.is_const = is_const;
            self.add_local(symbol, declarator.syntax(), declarator.identifier());
        }
    }

    fn declare_foreach_variable(&mut self, node: &SyntaxNode) {
        let Some(foreach) = ForEachStatement::cast(node.clone()) else {
            return;
        };
        let Some(identifier) = foreach.identifier() else {
            return;
        };
        let ty = match foreach.ty().filter(|ty| !is_var(ty)) {
            Some(ty) => self.resolve_type(&ty),
            None => foreach
                .expression()
                .and_then(|e| self.type_of(&e))
                .and_then(|collection| self.element_type(&collection)),
        };
        let mut symbol = Symbol::new(SymbolKind::Local, identifier.text());
        symbol.ty = ty;
        self.add_local(symbol, node, Some(identifier));
    }

    fn declare_catch_variable(&mut self, node: &SyntaxNode) {
        let Some(catch) = CatchClause::cast(node.clone()) else {
            return;
        };
        let (Some(identifier), Some(declaration)) = (
            catch.identifier(),
            node.child_of_kind(SyntaxKind::CatchDeclaration),
        ) else {
            return;
        };
        let ty = catch.exception_type().and_then(|ty| self.resolve_type(&ty));
        let mut symbol = Symbol::new(SymbolKind::Local, identifier.text());
        symbol.ty = ty;
        self.add_local(symbol, &declaration, Some(identifier));
    }

    fn declare_lambda_parameters(&mut self, node: &SyntaxNode) {
        let Some(lambda) = LambdaExpression::cast(node.clone()) else {
            return;
        };
        for parameter in lambda.parameters() {
            let ty = parameter.ty().and_then(|ty| self.resolve_type(&ty));
            let owner = self.enclosing_member(node).unwrap_or(self.table.global_namespace());
            let mut symbol = declarations::parameter_symbol(&parameter, owner);
            symbol.ty = ty;
            symbol.declaration = Some(parameter.syntax().span());
            symbol.identifier = parameter.identifier().map(|t| t.span());
            let id = self.table.add(symbol);
            self.nodes.insert(NodeKey::of(parameter.syntax()), id);
        }
    }
}

/// True for the implicit type `var`.
fn is_var(ty: &SyntaxNode) -> bool {
    ty.kind() == SyntaxKind::IdentifierName && ty.trimmed_text() == "var"
}
