//! Symbols, type references and the symbol table.
//!
//! Every symbol lives in one [`SymbolTable`] arena and is addressed by a
//! [`SymbolId`]. Namespaces and types list their members; members point back
//! at their container. Library symbols have no declaration span.

use std::fmt;

use sharpfix_core::patch::Span;

// ============================================================================
// Identifiers and Kinds
// ============================================================================

/// Index of a symbol in its [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn new(id: u32) -> Self {
        SymbolId(id)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sym_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
    Method,
    Constructor,
    Property,
    Field,
    EnumMember,
    Parameter,
    Local,
}

impl SymbolKind {
    pub fn is_type(self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Interface
                | SymbolKind::Struct
                | SymbolKind::Enum
                | SymbolKind::Delegate
        )
    }

    /// Members that can be read as values.
    pub fn is_value(self) -> bool {
        matches!(
            self,
            SymbolKind::Property
                | SymbolKind::Field
                | SymbolKind::EnumMember
                | SymbolKind::Parameter
                | SymbolKind::Local
        )
    }

    /// Types whose values are references.
    pub fn is_reference_type(self) -> bool {
        matches!(
            self,
            SymbolKind::Class | SymbolKind::Interface | SymbolKind::Delegate
        )
    }
}

/// How an argument is passed to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefKind {
    #[default]
    Value,
    Ref,
    Out,
    In,
}

/// Declaration modifiers relevant to binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_async: bool,
    pub is_abstract: bool,
    pub is_extern: bool,
    pub is_const: bool,
    /// `this` on an extension method's first parameter.
    pub is_this: bool,
    pub is_params: bool,
    pub has_default: bool,
}

// ============================================================================
// Type References
// ============================================================================

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A class, interface, struct, enum or delegate with its type arguments.
    Named { symbol: SymbolId, args: Vec<TypeRef> },
    Array { element: Box<TypeRef>, rank: usize },
    /// The `index`-th type parameter of the type or method `owner`.
    Parameter { owner: SymbolId, index: usize },
    Void,
}

impl TypeRef {
    pub fn named(symbol: SymbolId) -> Self {
        TypeRef::Named {
            symbol,
            args: Vec::new(),
        }
    }

    pub fn generic(symbol: SymbolId, args: Vec<TypeRef>) -> Self {
        TypeRef::Named { symbol, args }
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    /// The named symbol, if this is a named type.
    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            TypeRef::Named { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }

    pub fn args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Named { args, .. } => args,
            _ => &[],
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Void)
    }

    /// True if any type parameter occurs in this type.
    pub fn mentions_type_parameter(&self) -> bool {
        match self {
            TypeRef::Parameter { .. } => true,
            TypeRef::Named { args, .. } => args.iter().any(TypeRef::mentions_type_parameter),
            TypeRef::Array { element, .. } => element.mentions_type_parameter(),
            TypeRef::Void => false,
        }
    }
}

/// Type arguments bound to the type parameters of generic types and methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: Vec<(SymbolId, Vec<TypeRef>)>,
}

impl Substitution {
    pub fn new() -> Self {
        Substitution::default()
    }

    /// The bindings a constructed type gives its own type parameters.
    pub fn of(ty: &TypeRef) -> Self {
        let mut substitution = Substitution::new();
        if let TypeRef::Named { symbol, args } = ty {
            if !args.is_empty() {
                substitution.bind(*symbol, args.clone());
            }
        }
        substitution
    }

    pub fn bind(&mut self, owner: SymbolId, args: Vec<TypeRef>) {
        match self.bindings.iter_mut().find(|(o, _)| *o == owner) {
            Some((_, existing)) => *existing = args,
            None => self.bindings.push((owner, args)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Combine two substitutions; `other` wins for owners bound in both.
    pub fn merged(&self, other: &Substitution) -> Substitution {
        let mut merged = self.clone();
        for (owner, args) in &other.bindings {
            merged.bind(*owner, args.clone());
        }
        merged
    }

    pub fn apply(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Parameter { owner, index } => self
                .bindings
                .iter()
                .find(|(o, _)| o == owner)
                .and_then(|(_, args)| args.get(*index))
                .cloned()
                .unwrap_or_else(|| ty.clone()),
            TypeRef::Named { symbol, args } => TypeRef::Named {
                symbol: *symbol,
                args: args.iter().map(|a| self.apply(a)).collect(),
            },
            TypeRef::Array { element, rank } => TypeRef::Array {
                element: Box::new(self.apply(element)),
                rank: *rank,
            },
            TypeRef::Void => TypeRef::Void,
        }
    }
}

// ============================================================================
// Symbols
// ============================================================================

/// A declared entity.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub kind: SymbolKind,
    pub name: String,
    pub container: Option<SymbolId>,
    /// Span of the declaring node; `None` for library symbols.
    pub declaration: Option<Span>,
    /// Span of the declared name.
    pub identifier: Option<Span>,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<String>,
    /// Base class and interfaces of a type, in declaration order.
    pub bases: Vec<TypeRef>,
    /// Members of a namespace or type.
    pub members: Vec<SymbolId>,
    /// Type of a value symbol, or return type of a method or delegate.
    pub ty: Option<TypeRef>,
    pub parameters: Vec<SymbolId>,
    pub ref_kind: RefKind,
    /// Interface named by an explicit implementation (`void IFoo.Bar()`).
    pub explicit_interface: Option<TypeRef>,
}

impl Symbol {
    pub fn new(kind: SymbolKind, name: impl Into<String>) -> Self {
        Symbol {
            id: SymbolId(0),
            kind,
            name: name.into(),
            container: None,
            declaration: None,
            identifier: None,
            modifiers: Modifiers::default(),
            type_parameters: Vec::new(),
            bases: Vec::new(),
            members: Vec::new(),
            ty: None,
            parameters: Vec::new(),
            ref_kind: RefKind::Value,
            explicit_interface: None,
        }
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static || self.modifiers.is_const
    }

    pub fn is_from_library(&self) -> bool {
        self.declaration.is_none()
    }

    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }
}

// ============================================================================
// Symbol Table
// ============================================================================

/// Arena of symbols rooted at the global namespace.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    /// A table holding only the global namespace.
    pub fn new() -> Self {
        SymbolTable {
            symbols: vec![Symbol::new(SymbolKind::Namespace, "")],
        }
    }

    pub fn global_namespace(&self) -> SymbolId {
        SymbolId(0)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    /// Add `symbol` to the table and to its container's member list.
    pub(crate) fn add(&mut self, mut symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        symbol.id = id;
        let container = symbol.container;
        let is_member = !matches!(symbol.kind, SymbolKind::Parameter | SymbolKind::Local);
        self.symbols.push(symbol);
        if let Some(container) = container {
            if is_member {
                self.get_mut(container).members.push(id);
            }
        }
        id
    }

    /// The child namespace `name` of `parent`, created when missing.
    pub(crate) fn namespace(&mut self, parent: SymbolId, name: &str) -> SymbolId {
        if let Some(existing) = self.child_namespace(parent, name) {
            return existing;
        }
        let mut symbol = Symbol::new(SymbolKind::Namespace, name);
        symbol.container = Some(parent);
        self.add(symbol)
    }

    pub fn child_namespace(&self, parent: SymbolId, name: &str) -> Option<SymbolId> {
        self.get(parent)
            .members
            .iter()
            .copied()
            .find(|&m| self.get(m).kind == SymbolKind::Namespace && self.get(m).name == name)
    }

    /// Resolve a dotted namespace path from the global namespace.
    pub fn namespace_by_path(&self, path: &str) -> Option<SymbolId> {
        path.split('.')
            .filter(|part| !part.is_empty())
            .try_fold(self.global_namespace(), |ns, part| {
                self.child_namespace(ns, part)
            })
    }

    /// Members of `container` called `name`.
    pub fn members_named(&self, container: SymbolId, name: &str) -> Vec<SymbolId> {
        self.get(container)
            .members
            .iter()
            .copied()
            .filter(|&m| self.get(m).name == name)
            .collect()
    }

    /// The type `name` with `arity` type parameters declared in `container`.
    pub fn type_member(&self, container: SymbolId, name: &str, arity: usize) -> Option<SymbolId> {
        self.members_named(container, name).into_iter().find(|&m| {
            let symbol = self.get(m);
            symbol.kind.is_type() && symbol.arity() == arity
        })
    }

    /// Look up a type by its fully qualified name, e.g. `System.Threading.Tasks.Task`.
    pub fn type_by_path(&self, path: &str, arity: usize) -> Option<SymbolId> {
        let (namespace, name) = match path.rfind('.') {
            Some(dot) => (self.namespace_by_path(&path[..dot])?, &path[dot + 1..]),
            None => (self.global_namespace(), path),
        };
        self.type_member(namespace, name, arity)
    }

    /// Dotted name from the global namespace, without type arguments.
    pub fn qualified_name(&self, id: SymbolId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(symbol) = current.map(|c| self.get(c)) {
            if !symbol.name.is_empty() {
                parts.push(symbol.name.as_str());
            }
            current = symbol.container;
        }
        parts.reverse();
        parts.join(".")
    }

    /// The innermost type containing `id` (itself when it is a type).
    pub fn containing_type(&self, id: SymbolId) -> Option<SymbolId> {
        let mut current = Some(id);
        while let Some(symbol) = current.map(|c| self.get(c)) {
            if symbol.kind.is_type() {
                return Some(symbol.id);
            }
            current = symbol.container;
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}
