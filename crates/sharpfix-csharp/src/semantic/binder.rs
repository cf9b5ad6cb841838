//! Expression binding, name lookup and overload resolution.

use sharpfix_cst::nodes::{
    Argument, AstNode, AwaitExpression, BinaryExpression, CastExpression, CatchClause,
    ConditionalExpression, DefaultExpression, ElementAccessExpression, ForEachStatement,
    ForStatement, GenericName, IdentifierName, ImplicitArrayCreationExpression,
    InvocationExpression, LambdaExpression, LiteralExpression, LocalDeclarationStatement,
    MemberAccessExpression, ObjectCreationExpression, ParameterList, ParenthesizedExpression,
    PostfixUnaryExpression, PrefixUnaryExpression, UsingStatement, VariableDeclaration,
};
use sharpfix_cst::{SyntaxKind, SyntaxNode};

use super::declarations::CONSTRUCTOR_NAME;
use super::library::WellKnown;
use super::scope::NamespaceOrType;
use super::symbols::{RefKind, Substitution, SymbolId, SymbolKind, TypeRef};
use super::{CandidateReason, SemanticModel, SymbolInfo};

/// What an expression denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Bound {
    Namespace(SymbolId),
    Type(TypeRef),
    Value {
        ty: Option<TypeRef>,
        symbol: Option<SymbolId>,
    },
    MethodGroup(MethodGroup),
    Unknown,
}

impl Bound {
    fn value(ty: Option<TypeRef>) -> Self {
        Bound::Value { ty, symbol: None }
    }
}

/// Methods found for one name, with what binding learned about the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MethodGroup {
    pub(crate) methods: Vec<SymbolId>,
    /// Type arguments of the receiver's type.
    pub(crate) substitution: Substitution,
    /// Receiver type when the methods are extension methods.
    pub(crate) extension_receiver: Option<TypeRef>,
    /// Explicit method type arguments (`M<int>`).
    pub(crate) type_arguments: Vec<TypeRef>,
}

/// An argument as overload resolution sees it.
#[derive(Debug, Clone)]
struct ArgumentInfo {
    name: Option<String>,
    ref_kind: RefKind,
    /// `None` for lambdas, `null` and expressions that did not bind.
    ty: Option<TypeRef>,
}

impl SemanticModel {
    // ------------------------------------------------------------------
    // Public entry points
    // ------------------------------------------------------------------

    /// The type of an expression.
    pub fn type_of(&self, expression: &SyntaxNode) -> Option<TypeRef> {
        match self.bind(expression) {
            Bound::Value { ty, .. } => ty,
            _ => None,
        }
    }

    /// What a name, member access, invocation or object creation refers to.
    pub fn symbol_info(&self, node: &SyntaxNode) -> SymbolInfo {
        if let Some(parent) = node.parent() {
            let is_accessed_name = parent.kind() == SyntaxKind::MemberAccessExpression
                && MemberAccessExpression::cast(parent.clone())
                    .and_then(|m| m.name())
                    .is_some_and(|name| name == *node);
            if is_accessed_name {
                return self.symbol_info(&parent);
            }
        }
        match node.kind() {
            SyntaxKind::InvocationExpression => {
                let Some(invocation) = InvocationExpression::cast(node.clone()) else {
                    return SymbolInfo::none();
                };
                let Some(callee) = invocation.expression() else {
                    return SymbolInfo::none();
                };
                match self.bind(&callee) {
                    Bound::MethodGroup(group) => {
                        let args = self.argument_infos(&invocation.arguments());
                        match self.resolve_overload(&group, &args) {
                            Some((method, _)) => SymbolInfo::of(method),
                            None => SymbolInfo::failed(
                                group.methods,
                                CandidateReason::OverloadResolutionFailure,
                            ),
                        }
                    }
                    Bound::Value { ty: Some(ty), .. } => self
                        .delegate_invoke(&ty)
                        .map_or_else(SymbolInfo::none, |(invoke, _)| SymbolInfo::of(invoke)),
                    _ => SymbolInfo::none(),
                }
            }
            SyntaxKind::ObjectCreationExpression => self
                .bind_object_creation(node)
                .1
                .map_or_else(SymbolInfo::none, SymbolInfo::of),
            _ => {
                let invoked = node.parent().is_some_and(|p| {
                    p.kind() == SyntaxKind::InvocationExpression
                        && p.children().next().is_some_and(|callee| callee == *node)
                });
                if invoked {
                    if let Some(parent) = node.parent() {
                        return self.symbol_info(&parent);
                    }
                }
                match self.bind(node) {
                    Bound::Value {
                        symbol: Some(symbol),
                        ..
                    } => SymbolInfo::of(symbol),
                    Bound::Type(ty) => ty.symbol().map_or_else(SymbolInfo::none, SymbolInfo::of),
                    Bound::Namespace(ns) => SymbolInfo::of(ns),
                    Bound::MethodGroup(group) if group.methods.len() == 1 => {
                        SymbolInfo::of(group.methods[0])
                    }
                    Bound::MethodGroup(group) => {
                        SymbolInfo::failed(group.methods, CandidateReason::MemberGroup)
                    }
                    _ => SymbolInfo::none(),
                }
            }
        }
    }

    /// Bind `expression` as a method group converted to `delegate`.
    ///
    /// The method group conversion succeeds when a method in the group has
    /// the delegate's parameter count, each delegate parameter converts to
    /// the method's parameter by identity or reference conversion with
    /// matching ref kinds, and the method's return type converts to the
    /// delegate's. On failure the whole group is returned as candidates.
    pub fn bind_method_group_conversion(&self, expression: &SyntaxNode, delegate: &TypeRef) -> SymbolInfo {
        let Bound::MethodGroup(group) = self.bind(expression) else {
            return SymbolInfo::none();
        };
        let Some((invoke, invoke_substitution)) = self.delegate_invoke(delegate) else {
            return SymbolInfo::failed(group.methods, CandidateReason::OverloadResolutionFailure);
        };
        let found = group.methods.iter().copied().find(|&method| {
            self.parameters_match_delegate(method, &group.substitution, invoke, &invoke_substitution)
                && self.return_matches_delegate(method, &group.substitution, invoke, &invoke_substitution)
        });
        match found {
            Some(method) => SymbolInfo::of(method),
            None => SymbolInfo::failed(group.methods, CandidateReason::OverloadResolutionFailure),
        }
    }

    /// True when `method`'s parameters accept the arguments of `invoke`.
    pub fn parameters_match_delegate(
        &self,
        method: SymbolId,
        method_substitution: &Substitution,
        invoke: SymbolId,
        invoke_substitution: &Substitution,
    ) -> bool {
        let method_params = &self.symbol(method).parameters;
        let invoke_params = &self.symbol(invoke).parameters;
        if method_params.len() != invoke_params.len() {
            return false;
        }
        method_params.iter().zip(invoke_params).all(|(&m, &d)| {
            let (m, d) = (self.symbol(m), self.symbol(d));
            if m.ref_kind != d.ref_kind {
                return false;
            }
            match (&m.ty, &d.ty) {
                (Some(mt), Some(dt)) => self.is_reference_convertible(
                    &invoke_substitution.apply(dt),
                    &method_substitution.apply(mt),
                ),
                _ => false,
            }
        })
    }

    /// True when `method`'s return type converts to the return type of `invoke`.
    pub fn return_matches_delegate(
        &self,
        method: SymbolId,
        method_substitution: &Substitution,
        invoke: SymbolId,
        invoke_substitution: &Substitution,
    ) -> bool {
        match (&self.symbol(method).ty, &self.symbol(invoke).ty) {
            (Some(TypeRef::Void), Some(TypeRef::Void)) => true,
            (Some(TypeRef::Void), _) | (_, Some(TypeRef::Void)) => false,
            (Some(mt), Some(dt)) => self.is_reference_convertible(
                &method_substitution.apply(mt),
                &invoke_substitution.apply(dt),
            ),
            _ => false,
        }
    }

    /// Symbols a simple name could refer to at `at`: locals, parameters,
    /// members of enclosing types and members of statically imported types.
    ///
    /// Namespaces and top-level types are not included.
    pub fn lookup_value(&self, at: &SyntaxNode, name: &str) -> Vec<SymbolId> {
        for ancestor in at.ancestors() {
            let found = self.values_in_scope(&ancestor, name);
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    // ------------------------------------------------------------------
    // Binding
    // ------------------------------------------------------------------

    pub(crate) fn bind(&self, expression: &SyntaxNode) -> Bound {
        match expression.kind() {
            SyntaxKind::ParenthesizedExpression => ParenthesizedExpression::cast(expression.clone())
                .and_then(|p| p.expression())
                .map_or(Bound::Unknown, |inner| self.bind(&inner)),
            SyntaxKind::LiteralExpression => Bound::value(self.literal_type(expression)),
            SyntaxKind::IdentifierName => {
                let name = IdentifierName::cast(expression.clone())
                    .map(|n| n.text())
                    .unwrap_or_default();
                self.bind_simple_name(expression, &name, Vec::new())
            }
            SyntaxKind::GenericName => {
                let Some(generic) = GenericName::cast(expression.clone()) else {
                    return Bound::Unknown;
                };
                let args = generic
                    .type_arguments()
                    .iter()
                    .filter_map(|a| self.resolve_type(a))
                    .collect();
                self.bind_simple_name(expression, &generic.text(), args)
            }
            SyntaxKind::PredefinedType | SyntaxKind::QualifiedName | SyntaxKind::ArrayType => {
                match self.scopes().resolve_namespace_or_type(expression) {
                    Some(NamespaceOrType::Type(ty)) => Bound::Type(ty),
                    Some(NamespaceOrType::Namespace(ns)) => Bound::Namespace(ns),
                    None => Bound::Unknown,
                }
            }
            SyntaxKind::ThisExpression => {
                Bound::value(self.enclosing_type(expression).map(|t| self.self_type(t)))
            }
            SyntaxKind::BaseExpression => Bound::value(
                self.enclosing_type(expression)
                    .and_then(|t| self.symbol(t).bases.first().cloned()),
            ),
            SyntaxKind::MemberAccessExpression => self.bind_member_access(expression),
            SyntaxKind::InvocationExpression => self.bind_invocation(expression),
            SyntaxKind::ElementAccessExpression => {
                Bound::value(self.element_access_type(expression))
            }
            SyntaxKind::ObjectCreationExpression => {
                let (ty, constructor) = self.bind_object_creation(expression);
                Bound::Value {
                    ty,
                    symbol: constructor,
                }
            }
            SyntaxKind::ArrayCreationExpression => Bound::value(
                expression
                    .child_of_kind(SyntaxKind::ArrayType)
                    .and_then(|ty| self.resolve_type(&ty)),
            ),
            SyntaxKind::ImplicitArrayCreationExpression => Bound::value(
                ImplicitArrayCreationExpression::cast(expression.clone())
                    .and_then(|a| a.initializer())
                    .and_then(|init| init.expressions().first().cloned())
                    .and_then(|first| self.type_of(&first))
                    .map(TypeRef::array),
            ),
            SyntaxKind::BinaryExpression => Bound::value(self.binary_type(expression)),
            SyntaxKind::IsPatternExpression => Bound::value(self.well_known(WellKnown::Boolean)),
            SyntaxKind::AssignmentExpression => Bound::value(
                expression
                    .children()
                    .next()
                    .and_then(|left| self.type_of(&left)),
            ),
            SyntaxKind::PrefixUnaryExpression => {
                let Some(prefix) = PrefixUnaryExpression::cast(expression.clone()) else {
                    return Bound::Unknown;
                };
                if prefix.operator() == Some(SyntaxKind::Exclamation) {
                    return Bound::value(self.well_known(WellKnown::Boolean));
                }
                Bound::value(prefix.operand().and_then(|o| self.type_of(&o)))
            }
            SyntaxKind::PostfixUnaryExpression => Bound::value(
                PostfixUnaryExpression::cast(expression.clone())
                    .and_then(|p| p.operand())
                    .and_then(|o| self.type_of(&o)),
            ),
            SyntaxKind::AwaitExpression => {
                let awaited = AwaitExpression::cast(expression.clone())
                    .and_then(|a| a.expression())
                    .and_then(|e| self.type_of(&e));
                Bound::value(awaited.and_then(|ty| {
                    if self.is_well_known_task(&ty) {
                        Some(TypeRef::Void)
                    } else {
                        self.task_result_type(&ty)
                    }
                }))
            }
            SyntaxKind::ConditionalExpression => {
                let Some(conditional) = ConditionalExpression::cast(expression.clone()) else {
                    return Bound::Unknown;
                };
                let when_true = conditional.when_true().and_then(|e| self.type_of(&e));
                Bound::value(
                    when_true.or_else(|| conditional.when_false().and_then(|e| self.type_of(&e))),
                )
            }
            SyntaxKind::CastExpression => Bound::value(
                CastExpression::cast(expression.clone())
                    .and_then(|c| c.ty())
                    .and_then(|ty| self.resolve_type(&ty)),
            ),
            SyntaxKind::TypeOfExpression => {
                Bound::value(self.table.type_by_path("System.Type", 0).map(TypeRef::named))
            }
            SyntaxKind::DefaultExpression => Bound::value(
                DefaultExpression::cast(expression.clone())
                    .and_then(|d| d.ty())
                    .and_then(|ty| self.resolve_type(&ty)),
            ),
            kind if kind.is_lambda() => Bound::value(None),
            _ => Bound::Unknown,
        }
    }

    /// The type of `this` inside a type declaration.
    fn self_type(&self, ty: SymbolId) -> TypeRef {
        let args = (0..self.symbol(ty).arity())
            .map(|index| TypeRef::Parameter { owner: ty, index })
            .collect();
        TypeRef::generic(ty, args)
    }

    fn is_well_known_task(&self, ty: &TypeRef) -> bool {
        self.well_known(WellKnown::Task).as_ref() == Some(ty)
    }

    fn literal_type(&self, literal: &SyntaxNode) -> Option<TypeRef> {
        let literal = LiteralExpression::cast(literal.clone())?;
        let token = literal.token()?;
        let well_known = match token.kind() {
            SyntaxKind::StringLiteral => WellKnown::String,
            SyntaxKind::CharacterLiteral => WellKnown::Char,
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => WellKnown::Boolean,
            SyntaxKind::NumericLiteral => numeric_literal_type(token.text()),
            _ => return None,
        };
        self.well_known(well_known)
    }

    fn binary_type(&self, expression: &SyntaxNode) -> Option<TypeRef> {
        let binary = BinaryExpression::cast(expression.clone())?;
        let operator = binary.operator()?;
        match operator {
            SyntaxKind::AmpersandAmpersand
            | SyntaxKind::BarBar
            | SyntaxKind::EqualsEquals
            | SyntaxKind::ExclamationEquals
            | SyntaxKind::Less
            | SyntaxKind::LessEquals
            | SyntaxKind::GreaterEquals
            | SyntaxKind::IsKeyword => self.well_known(WellKnown::Boolean),
            SyntaxKind::Greater if !binary.is_right_shift() => self.well_known(WellKnown::Boolean),
            SyntaxKind::AsKeyword => binary.right().and_then(|r| self.resolve_type(&r)),
            _ => {
                let left = binary.left().and_then(|l| self.type_of(&l));
                let right = binary.right().and_then(|r| self.type_of(&r));
                let string = self.well_known(WellKnown::String);
                if operator == SyntaxKind::Plus && (left == string || right == string) && string.is_some() {
                    return string;
                }
                match (left, right) {
                    (Some(l), Some(r)) if self.is_implicitly_convertible(&l, &r) && l != r => Some(r),
                    (Some(l), _) => Some(l),
                    (None, r) => r,
                }
            }
        }
    }

    fn element_access_type(&self, expression: &SyntaxNode) -> Option<TypeRef> {
        let access = ElementAccessExpression::cast(expression.clone())?;
        let receiver = self.type_of(&access.expression()?)?;
        match &receiver {
            TypeRef::Array { element, .. } => Some((**element).clone()),
            TypeRef::Named { args, .. } => {
                if self.well_known(WellKnown::String).as_ref() == Some(&receiver) {
                    return self.well_known(WellKnown::Char);
                }
                // List<T>, IList<T> and Dictionary<TKey, TValue> index to their last argument.
                args.last().cloned()
            }
            _ => None,
        }
    }

    fn bind_simple_name(&self, at: &SyntaxNode, name: &str, type_arguments: Vec<TypeRef>) -> Bound {
        let values = self.lookup_value(at, name);
        if let Some(&first) = values.first() {
            let symbol = self.symbol(first);
            if symbol.kind == SymbolKind::Method {
                let substitution = self
                    .enclosing_type(at)
                    .map(|t| Substitution::of(&self.self_type(t)))
                    .unwrap_or_default();
                return Bound::MethodGroup(MethodGroup {
                    methods: values,
                    substitution,
                    extension_receiver: None,
                    type_arguments,
                });
            }
            if symbol.kind.is_type() {
                return Bound::Type(TypeRef::generic(first, type_arguments));
            }
            return Bound::Value {
                ty: symbol.ty.clone(),
                symbol: Some(first),
            };
        }
        match self.scopes().lookup(at, name, &type_arguments) {
            Some(NamespaceOrType::Type(ty)) => Bound::Type(ty),
            Some(NamespaceOrType::Namespace(ns)) => Bound::Namespace(ns),
            None => Bound::Unknown,
        }
    }

    fn bind_member_access(&self, expression: &SyntaxNode) -> Bound {
        let Some(access) = MemberAccessExpression::cast(expression.clone()) else {
            return Bound::Unknown;
        };
        let (Some(receiver), Some(name_node)) = (access.expression(), access.name()) else {
            return Bound::Unknown;
        };
        let name = access.name_text();
        let type_arguments: Vec<TypeRef> = GenericName::cast(name_node)
            .map(|g| {
                g.type_arguments()
                    .iter()
                    .filter_map(|a| self.resolve_type(a))
                    .collect()
            })
            .unwrap_or_default();

        match self.bind(&receiver) {
            Bound::Namespace(ns) => {
                if let Some(ty) = self.table.type_member(ns, &name, type_arguments.len()) {
                    return Bound::Type(TypeRef::generic(ty, type_arguments));
                }
                self.table
                    .child_namespace(ns, &name)
                    .map_or(Bound::Unknown, Bound::Namespace)
            }
            Bound::Type(ty) => self.bind_member(&ty, &name, type_arguments),
            Bound::Value { ty: Some(ty), .. } => {
                let bound = self.bind_member(&ty, &name, type_arguments.clone());
                if bound != Bound::Unknown {
                    return bound;
                }
                let extensions = self.extension_methods(expression, &name);
                if extensions.is_empty() {
                    return Bound::Unknown;
                }
                Bound::MethodGroup(MethodGroup {
                    methods: extensions,
                    substitution: Substitution::new(),
                    extension_receiver: Some(ty),
                    type_arguments,
                })
            }
            _ => Bound::Unknown,
        }
    }

    /// Bind `name` as a member of `ty`.
    fn bind_member(
        &self,
        ty: &TypeRef,
        name: &str,
        type_arguments: Vec<TypeRef>,
    ) -> Bound {
        let Some((members, substitution)) = self.lookup_members(ty, name) else {
            return Bound::Unknown;
        };
        let first = self.symbol(members[0]);
        if first.kind == SymbolKind::Method {
            return Bound::MethodGroup(MethodGroup {
                methods: members,
                substitution,
                extension_receiver: None,
                type_arguments,
            });
        }
        if first.kind.is_type() {
            return Bound::Type(TypeRef::generic(first.id, type_arguments));
        }
        Bound::Value {
            ty: first.ty.as_ref().map(|t| substitution.apply(t)),
            symbol: Some(first.id),
        }
    }

    /// Members named `name` on `ty` or the nearest base type declaring one,
    /// with the substitution for that level.
    pub(crate) fn lookup_members(&self, ty: &TypeRef, name: &str) -> Option<(Vec<SymbolId>, Substitution)> {
        let mut levels = Vec::new();
        if let TypeRef::Named { .. } = ty {
            levels.push(ty.clone());
        }
        levels.extend(self.base_types(ty));
        levels.into_iter().find_map(|level| {
            let symbol = level.symbol()?;
            let members: Vec<SymbolId> = self
                .table
                .members_named(symbol, name)
                .into_iter()
                .filter(|&m| self.symbol(m).kind != SymbolKind::Constructor)
                .collect();
            if members.is_empty() {
                None
            } else {
                Some((members, Substitution::of(&level)))
            }
        })
    }

    /// Extension methods named `name` visible at `at`.
    fn extension_methods(&self, at: &SyntaxNode, name: &str) -> Vec<SymbolId> {
        let mut methods = Vec::new();
        for ns in self.scopes().imported_namespaces(at) {
            for &ty in &self.symbol(ns).members {
                let ty = self.symbol(ty);
                if ty.kind != SymbolKind::Class || !ty.is_static() {
                    continue;
                }
                for method in self.table.members_named(ty.id, name) {
                    let is_extension = self
                        .symbol(method)
                        .parameters
                        .first()
                        .is_some_and(|&p| self.symbol(p).modifiers.is_this);
                    if is_extension && !methods.contains(&method) {
                        methods.push(method);
                    }
                }
            }
        }
        methods
    }

    fn bind_invocation(&self, expression: &SyntaxNode) -> Bound {
        let Some(invocation) = InvocationExpression::cast(expression.clone()) else {
            return Bound::Unknown;
        };
        let Some(callee) = invocation.expression() else {
            return Bound::Unknown;
        };
        match self.bind(&callee) {
            Bound::MethodGroup(group) => {
                let args = self.argument_infos(&invocation.arguments());
                match self.resolve_overload(&group, &args) {
                    Some((method, substitution)) => {
                        let ty = self
                            .symbol(method)
                            .ty
                            .as_ref()
                            .map(|t| substitution.apply(t))
                            .filter(|t| !mentions_method_parameters(t, method));
                        Bound::Value {
                            ty,
                            symbol: Some(method),
                        }
                    }
                    None => Bound::value(None),
                }
            }
            Bound::Value { ty: Some(ty), .. } => {
                let Some((invoke, substitution)) = self.delegate_invoke(&ty) else {
                    return Bound::value(None);
                };
                Bound::value(self.symbol(invoke).ty.as_ref().map(|t| substitution.apply(t)))
            }
            _ => Bound::value(None),
        }
    }

    /// Type and chosen constructor of `new T(...)`.
    fn bind_object_creation(&self, expression: &SyntaxNode) -> (Option<TypeRef>, Option<SymbolId>) {
        let Some(creation) = ObjectCreationExpression::cast(expression.clone()) else {
            return (None, None);
        };
        let Some(ty) = creation.ty().and_then(|t| self.resolve_type(&t)) else {
            return (None, None);
        };
        let Some(symbol) = ty.symbol() else {
            return (Some(ty), None);
        };
        let constructors = self.table.members_named(symbol, CONSTRUCTOR_NAME);
        if constructors.is_empty() {
            return (Some(ty), None);
        }
        let group = MethodGroup {
            methods: constructors,
            substitution: Substitution::of(&ty),
            extension_receiver: None,
            type_arguments: Vec::new(),
        };
        let args = self.argument_infos(&creation.arguments());
        let constructor = self.resolve_overload(&group, &args).map(|(c, _)| c);
        (Some(ty), constructor)
    }

    // ------------------------------------------------------------------
    // Scopes
    // ------------------------------------------------------------------

    /// Value symbols named `name` declared by the scope `scope`.
    fn values_in_scope(&self, scope: &SyntaxNode, name: &str) -> Vec<SymbolId> {
        let declarators_named = |declaration: Option<VariableDeclaration>| -> Vec<SymbolId> {
            declaration
                .map(|d| d.declarators())
                .unwrap_or_default()
                .iter()
                .filter(|d| d.name() == name)
                .filter_map(|d| self.declared_symbol(d.syntax()))
                .collect()
        };
        match scope.kind() {
            SyntaxKind::Block => scope
                .children()
                .filter_map(LocalDeclarationStatement::cast)
                .flat_map(|statement| declarators_named(statement.declaration()))
                .collect(),
            SyntaxKind::ForEachStatement => {
                let matches = ForEachStatement::cast(scope.clone())
                    .and_then(|f| f.identifier())
                    .is_some_and(|id| id.text() == name);
                if matches {
                    self.declared_symbol(scope).into_iter().collect()
                } else {
                    Vec::new()
                }
            }
            SyntaxKind::ForStatement => {
                declarators_named(ForStatement::cast(scope.clone()).and_then(|f| f.declaration()))
            }
            SyntaxKind::UsingStatement => {
                declarators_named(UsingStatement::cast(scope.clone()).and_then(|u| u.declaration()))
            }
            SyntaxKind::CatchClause => {
                let matches = CatchClause::cast(scope.clone())
                    .and_then(|c| c.identifier())
                    .is_some_and(|id| id.text() == name);
                if !matches {
                    return Vec::new();
                }
                scope
                    .child_of_kind(SyntaxKind::CatchDeclaration)
                    .and_then(|d| self.declared_symbol(&d))
                    .into_iter()
                    .collect()
            }
            kind if kind.is_lambda() => LambdaExpression::cast(scope.clone())
                .map(|l| l.parameters())
                .unwrap_or_default()
                .iter()
                .filter(|p| p.name() == name)
                .filter_map(|p| self.declared_symbol(p.syntax()))
                .collect(),
            SyntaxKind::MethodDeclaration
            | SyntaxKind::ConstructorDeclaration
            | SyntaxKind::DelegateDeclaration => scope
                .children()
                .filter_map(ParameterList::cast)
                .flat_map(|list| list.parameters())
                .filter(|p| p.name() == name)
                .filter_map(|p| self.declared_symbol(p.syntax()))
                .collect(),
            kind if kind.is_type_declaration() => {
                let Some(ty) = self.declared_symbol(scope) else {
                    return Vec::new();
                };
                self.lookup_members(&self.self_type(ty), name)
                    .map(|(members, _)| members)
                    .unwrap_or_default()
            }
            SyntaxKind::NamespaceDeclaration
            | SyntaxKind::FileScopedNamespaceDeclaration
            | SyntaxKind::CompilationUnit => {
                // Only this scope's own `using static` directives count here.
                let imports = self.scopes().static_imports(scope);
                let outer = scope
                    .parent()
                    .map(|p| self.scopes().static_imports(&p))
                    .unwrap_or_default();
                imports
                    .into_iter()
                    .filter(|ty| !outer.contains(ty))
                    .flat_map(|ty| self.table.members_named(ty, name))
                    .filter(|&m| {
                        let member = self.symbol(m);
                        member.is_static() || member.kind.is_type()
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Overload resolution
    // ------------------------------------------------------------------

    fn argument_infos(&self, arguments: &[Argument]) -> Vec<ArgumentInfo> {
        arguments
            .iter()
            .map(|argument| ArgumentInfo {
                name: argument.name(),
                ref_kind: match argument.ref_kind() {
                    Some(SyntaxKind::RefKeyword) => RefKind::Ref,
                    Some(SyntaxKind::OutKeyword) => RefKind::Out,
                    Some(SyntaxKind::InKeyword) => RefKind::In,
                    _ => RefKind::Value,
                },
                ty: argument.expression().and_then(|e| self.type_of(&e)),
            })
            .collect()
    }

    /// The best applicable method of `group`, with the substitution for its
    /// type parameters.
    fn resolve_overload(&self, group: &MethodGroup, args: &[ArgumentInfo]) -> Option<(SymbolId, Substitution)> {
        let mut args = args.to_vec();
        if let Some(receiver) = &group.extension_receiver {
            args.insert(
                0,
                ArgumentInfo {
                    name: None,
                    ref_kind: RefKind::Value,
                    ty: Some(receiver.clone()),
                },
            );
        }
        let mut best: Option<(SymbolId, Substitution, usize)> = None;
        for &method in &group.methods {
            let Some((substitution, score)) = self.applicability(method, group, &args) else {
                continue;
            };
            let better = match &best {
                Some((_, _, best_score)) => score > *best_score,
                None => true,
            };
            if better {
                best = Some((method, substitution, score));
            }
        }
        best.map(|(method, substitution, _)| (method, substitution))
    }

    /// Substitution and exact-match count when `method` accepts `args`.
    fn applicability(
        &self,
        method: SymbolId,
        group: &MethodGroup,
        args: &[ArgumentInfo],
    ) -> Option<(Substitution, usize)> {
        let symbol = self.symbol(method);
        let params = &symbol.parameters;

        // Match each argument to a parameter index.
        let mut matched: Vec<usize> = Vec::with_capacity(args.len());
        for (position, arg) in args.iter().enumerate() {
            let index = match &arg.name {
                Some(name) => params.iter().position(|&p| self.symbol(p).name == *name)?,
                None if position < params.len() => position,
                None => {
                    let last = params.len().checked_sub(1)?;
                    if !self.symbol(params[last]).modifiers.is_params {
                        return None;
                    }
                    last
                }
            };
            matched.push(index);
        }
        for (index, &param) in params.iter().enumerate() {
            let param = self.symbol(param);
            let supplied = matched.contains(&index);
            if !supplied && !param.modifiers.has_default && !param.modifiers.is_params {
                return None;
            }
        }

        let mut substitution = group.substitution.clone();
        if symbol.arity() > 0 {
            let inferred = if group.type_arguments.len() == symbol.arity() {
                group.type_arguments.clone()
            } else {
                self.infer_type_arguments(method, &matched, args)
            };
            substitution.bind(method, inferred);
        }

        let mut score = 0;
        for (arg, index) in args.iter().zip(&matched) {
            let param = self.symbol(params[*index]);
            if param.ref_kind != arg.ref_kind {
                return None;
            }
            let (Some(arg_ty), Some(param_ty)) = (&arg.ty, &param.ty) else {
                continue;
            };
            let mut param_ty = substitution.apply(param_ty);
            if param.modifiers.is_params {
                if let TypeRef::Array { element, .. } = &param_ty {
                    if !matches!(arg_ty, TypeRef::Array { .. }) {
                        param_ty = (**element).clone();
                    }
                }
            }
            if param_ty.mentions_type_parameter() {
                continue;
            }
            if *arg_ty == param_ty {
                score += 1;
            } else if !self.is_implicitly_convertible(arg_ty, &param_ty) {
                return None;
            }
        }
        Some((substitution, score))
    }

    /// Method type arguments inferred from argument types; unresolved
    /// parameters stay as themselves.
    fn infer_type_arguments(&self, method: SymbolId, matched: &[usize], args: &[ArgumentInfo]) -> Vec<TypeRef> {
        let symbol = self.symbol(method);
        let mut inferred: Vec<Option<TypeRef>> = vec![None; symbol.arity()];
        for (arg, index) in args.iter().zip(matched) {
            let Some(arg_ty) = &arg.ty else {
                continue;
            };
            if let Some(param_ty) = &self.symbol(symbol.parameters[*index]).ty {
                self.unify(param_ty, arg_ty, method, &mut inferred);
            }
        }
        inferred
            .into_iter()
            .enumerate()
            .map(|(index, ty)| ty.unwrap_or(TypeRef::Parameter { owner: method, index }))
            .collect()
    }

    fn unify(&self, param: &TypeRef, arg: &TypeRef, method: SymbolId, inferred: &mut [Option<TypeRef>]) {
        match param {
            TypeRef::Parameter { owner, index } if *owner == method => {
                if let Some(slot) = inferred.get_mut(*index) {
                    if slot.is_none() {
                        *slot = Some(arg.clone());
                    }
                }
            }
            TypeRef::Array { element, .. } => {
                if let TypeRef::Array { element: arg_element, .. } = arg {
                    self.unify(element, arg_element, method, inferred);
                }
            }
            TypeRef::Named { symbol, args } if !args.is_empty() => {
                if let Some(base) = self.as_base(arg, *symbol) {
                    for (p, a) in args.iter().zip(base.args()) {
                        self.unify(p, a, method, inferred);
                    }
                }
            }
            _ => {}
        }
    }
}

fn mentions_method_parameters(ty: &TypeRef, method: SymbolId) -> bool {
    match ty {
        TypeRef::Parameter { owner, .. } => *owner == method,
        TypeRef::Named { args, .. } => args.iter().any(|a| mentions_method_parameters(a, method)),
        TypeRef::Array { element, .. } => mentions_method_parameters(element, method),
        TypeRef::Void => false,
    }
}

fn numeric_literal_type(text: &str) -> WellKnown {
    let lower = text.to_ascii_lowercase();
    let is_hex = lower.starts_with("0x");
    if lower.ends_with("ul") || lower.ends_with("lu") {
        WellKnown::UInt64
    } else if lower.ends_with('l') {
        WellKnown::Int64
    } else if lower.ends_with('u') {
        WellKnown::UInt32
    } else if lower.ends_with('m') {
        WellKnown::Decimal
    } else if !is_hex && lower.ends_with('f') {
        WellKnown::Single
    } else if !is_hex && (lower.ends_with('d') || lower.contains('.') || lower.contains('e')) {
        WellKnown::Double
    } else {
        WellKnown::Int32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_literal_suffixes() {
        assert_eq!(numeric_literal_type("42"), WellKnown::Int32);
        assert_eq!(numeric_literal_type("42L"), WellKnown::Int64);
        assert_eq!(numeric_literal_type("4.2"), WellKnown::Double);
        assert_eq!(numeric_literal_type("4.2f"), WellKnown::Single);
        assert_eq!(numeric_literal_type("4.2m"), WellKnown::Decimal);
        assert_eq!(numeric_literal_type("0xFF"), WellKnown::Int32);
        assert_eq!(numeric_literal_type("1e3"), WellKnown::Double);
    }
}
