//! Type relationships: base types, conversions and display.

use indexmap::IndexSet;

use super::library::WellKnown;
use super::symbols::{Substitution, SymbolId, SymbolKind, TypeRef};
use super::SemanticModel;

/// Implicit numeric conversions, as (from, to) pairs.
const NUMERIC_WIDENING: &[(WellKnown, &[WellKnown])] = &[
    (
        WellKnown::Byte,
        &[
            WellKnown::Int16,
            WellKnown::Int32,
            WellKnown::Int64,
            WellKnown::UInt32,
            WellKnown::UInt64,
            WellKnown::Single,
            WellKnown::Double,
            WellKnown::Decimal,
        ],
    ),
    (
        WellKnown::Int16,
        &[
            WellKnown::Int32,
            WellKnown::Int64,
            WellKnown::Single,
            WellKnown::Double,
            WellKnown::Decimal,
        ],
    ),
    (
        WellKnown::Char,
        &[
            WellKnown::Int32,
            WellKnown::Int64,
            WellKnown::UInt32,
            WellKnown::UInt64,
            WellKnown::Single,
            WellKnown::Double,
            WellKnown::Decimal,
        ],
    ),
    (
        WellKnown::Int32,
        &[
            WellKnown::Int64,
            WellKnown::Single,
            WellKnown::Double,
            WellKnown::Decimal,
        ],
    ),
    (
        WellKnown::UInt32,
        &[
            WellKnown::Int64,
            WellKnown::UInt64,
            WellKnown::Single,
            WellKnown::Double,
            WellKnown::Decimal,
        ],
    ),
    (
        WellKnown::Int64,
        &[WellKnown::Single, WellKnown::Double, WellKnown::Decimal],
    ),
    (
        WellKnown::UInt64,
        &[WellKnown::Single, WellKnown::Double, WellKnown::Decimal],
    ),
    (WellKnown::Single, &[WellKnown::Double]),
];

impl SemanticModel {
    fn is_well_known(&self, ty: &TypeRef, well_known: WellKnown) -> bool {
        ty.symbol().is_some() && ty.symbol() == well_known.symbol(&self.table) && ty.args().is_empty()
    }

    fn well_known_of(&self, ty: &TypeRef) -> Option<WellKnown> {
        let symbol = ty.symbol()?;
        WellKnown::KEYWORD_TYPES
            .into_iter()
            .find(|w| w.symbol(&self.table) == Some(symbol))
    }

    /// True for class, interface, delegate, array and type-parameter types.
    pub fn is_reference_type(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Named { symbol, .. } => self.symbol(*symbol).kind.is_reference_type(),
            TypeRef::Array { .. } => true,
            TypeRef::Parameter { .. } | TypeRef::Void => false,
        }
    }

    /// Base class and all interfaces of `ty`, transitively, with type
    /// arguments substituted. `ty` itself is not included.
    pub fn base_types(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let mut seen: IndexSet<TypeRef> = IndexSet::new();
        let mut pending = match ty {
            TypeRef::Array { element, .. } => {
                let mut bases: Vec<TypeRef> = Vec::new();
                if let Some(array) = self.well_known(WellKnown::Array) {
                    bases.push(array);
                }
                if let Some(enumerable) = WellKnown::IEnumerableOfT.symbol(&self.table) {
                    bases.push(TypeRef::generic(enumerable, vec![(**element).clone()]));
                }
                for path in [
                    "System.Collections.Generic.IList",
                    "System.Collections.Generic.ICollection",
                    "System.Collections.Generic.IReadOnlyList",
                    "System.Collections.Generic.IReadOnlyCollection",
                ] {
                    if let Some(symbol) = self.table.type_by_path(path, 1) {
                        bases.push(TypeRef::generic(symbol, vec![(**element).clone()]));
                    }
                }
                bases
            }
            TypeRef::Named { symbol, .. } => {
                let substitution = Substitution::of(ty);
                self.symbol(*symbol)
                    .bases
                    .iter()
                    .map(|b| substitution.apply(b))
                    .collect()
            }
            _ => Vec::new(),
        };
        pending.reverse();
        while let Some(next) = pending.pop() {
            if !seen.insert(next.clone()) {
                continue;
            }
            if let TypeRef::Named { symbol, .. } = &next {
                let substitution = Substitution::of(&next);
                let mut bases: Vec<TypeRef> = self
                    .symbol(*symbol)
                    .bases
                    .iter()
                    .map(|b| substitution.apply(b))
                    .collect();
                bases.reverse();
                pending.extend(bases);
            }
        }
        if let Some(object) = self.well_known(WellKnown::Object) {
            if *ty != object {
                seen.insert(object);
            }
        }
        seen.into_iter().collect()
    }

    /// All interfaces `ty` implements.
    pub fn all_interfaces(&self, ty: &TypeRef) -> Vec<TypeRef> {
        self.base_types(ty)
            .into_iter()
            .filter(|b| {
                b.symbol()
                    .is_some_and(|s| self.symbol(s).kind == SymbolKind::Interface)
            })
            .collect()
    }

    /// `ty` or its base type whose symbol is `target`.
    pub fn as_base(&self, ty: &TypeRef, target: SymbolId) -> Option<TypeRef> {
        if ty.symbol() == Some(target) {
            return Some(ty.clone());
        }
        self.base_types(ty)
            .into_iter()
            .find(|b| b.symbol() == Some(target))
    }

    /// Identity or implicit reference conversion.
    pub fn is_reference_convertible(&self, from: &TypeRef, to: &TypeRef) -> bool {
        if from == to {
            return true;
        }
        if !self.is_reference_type(from) {
            return false;
        }
        self.base_types(from).contains(to)
    }

    /// Implicit conversion, including boxing and numeric widening.
    pub fn is_implicitly_convertible(&self, from: &TypeRef, to: &TypeRef) -> bool {
        if from == to || self.is_well_known(to, WellKnown::Object) {
            return true;
        }
        if let (Some(from), Some(to)) = (self.well_known_of(from), self.well_known_of(to)) {
            return NUMERIC_WIDENING
                .iter()
                .any(|(f, targets)| *f == from && targets.contains(&to));
        }
        if matches!(from, TypeRef::Void) || matches!(to, TypeRef::Void) {
            return false;
        }
        self.base_types(from).contains(to)
    }

    /// Element type of an enumerable type.
    pub fn element_type(&self, collection: &TypeRef) -> Option<TypeRef> {
        if let TypeRef::Array { element, .. } = collection {
            return Some((**element).clone());
        }
        if self.is_well_known(collection, WellKnown::String) {
            return self.well_known(WellKnown::Char);
        }
        let enumerable = WellKnown::IEnumerableOfT.symbol(&self.table)?;
        self.as_base(collection, enumerable)?.args().first().cloned()
    }

    /// `T` of `Task<T>`.
    pub fn task_result_type(&self, ty: &TypeRef) -> Option<TypeRef> {
        let task_of = WellKnown::TaskOfT.symbol(&self.table)?;
        if ty.symbol() == Some(task_of) {
            return ty.args().first().cloned();
        }
        None
    }

    /// True for `Task` and `Task<T>`.
    pub fn is_task_type(&self, ty: &TypeRef) -> bool {
        self.is_well_known(ty, WellKnown::Task) || self.task_result_type(ty).is_some()
    }

    /// The `Invoke` method of a delegate type, with the delegate's type
    /// arguments.
    pub fn delegate_invoke(&self, delegate: &TypeRef) -> Option<(SymbolId, Substitution)> {
        let symbol = delegate.symbol()?;
        if self.symbol(symbol).kind != SymbolKind::Delegate {
            return None;
        }
        let invoke = self.table.members_named(symbol, "Invoke").into_iter().next()?;
        Some((invoke, Substitution::of(delegate)))
    }

    /// C# spelling of a type, with keywords for built-in types and simple
    /// names for the rest.
    pub fn type_display(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Void => "void".to_string(),
            TypeRef::Parameter { owner, index } => self
                .symbol(*owner)
                .type_parameters
                .get(*index)
                .cloned()
                .unwrap_or_default(),
            TypeRef::Array { element, rank } => {
                format!("{}[{}]", self.type_display(element), ",".repeat(rank.saturating_sub(1)))
            }
            TypeRef::Named { symbol, args } => {
                if let Some(keyword) = self.well_known_of(ty).and_then(WellKnown::keyword) {
                    return keyword.to_string();
                }
                let name = &self.symbol(*symbol).name;
                if args.is_empty() {
                    name.clone()
                } else {
                    let args: Vec<String> = args.iter().map(|a| self.type_display(a)).collect();
                    format!("{}<{}>", name, args.join(", "))
                }
            }
        }
    }
}
