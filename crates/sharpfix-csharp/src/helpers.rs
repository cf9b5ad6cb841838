//! Symbol queries shared by detectors and fix providers.
//!
//! Every helper answers "not applicable" with `None` or `false`. None of
//! them fail or panic on code that does not bind.

use indexmap::{IndexMap, IndexSet};
use sharpfix_cst::nodes::{ancestor, Argument, AstNode, ObjectCreationExpression};
use sharpfix_cst::{SyntaxKind, SyntaxNode};

use crate::semantic::{
    CandidateReason, SemanticModel, Substitution, SymbolId, SymbolInfo, SymbolKind, TypeRef,
    WellKnown,
};

// ============================================================================
// Types
// ============================================================================

/// The type a type declaration introduces, with its own type parameters as
/// arguments.
pub fn declared_type(model: &SemanticModel, symbol: SymbolId) -> TypeRef {
    let arity = model.symbol(symbol).type_parameters.len();
    let args = (0..arity)
        .map(|index| TypeRef::Parameter { owner: symbol, index })
        .collect();
    TypeRef::generic(symbol, args)
}

/// `T` when `ty` is `IEnumerable<T>`, `T[]`, or implements `IEnumerable<T>`.
pub fn try_get_enumerable_element_type(model: &SemanticModel, ty: &TypeRef) -> Option<TypeRef> {
    let enumerable = WellKnown::IEnumerableOfT.symbol(model.table())?;
    model.as_base(ty, enumerable)?.args().first().cloned()
}

fn is_interface(model: &SemanticModel, ty: &TypeRef) -> bool {
    ty.symbol()
        .is_some_and(|s| model.symbol(s).kind == SymbolKind::Interface)
}

// ============================================================================
// Interface forwarding
// ============================================================================

/// Fields and properties of `class` holding collections of an interface the
/// class itself implements, grouped by that interface in declaration order.
pub fn find_interface_member_candidates(
    model: &SemanticModel,
    class: SymbolId,
) -> IndexMap<TypeRef, IndexSet<SymbolId>> {
    let implemented = model.all_interfaces(&declared_type(model, class));
    let mut candidates: IndexMap<TypeRef, IndexSet<SymbolId>> = IndexMap::new();
    for &member in &model.symbol(class).members {
        let symbol = model.symbol(member);
        if !matches!(symbol.kind, SymbolKind::Field | SymbolKind::Property) {
            continue;
        }
        let Some(element) = symbol
            .ty
            .as_ref()
            .and_then(|ty| try_get_enumerable_element_type(model, ty))
        else {
            continue;
        };
        if is_interface(model, &element) && implemented.contains(&element) {
            candidates.entry(element).or_default().insert(member);
        }
    }
    candidates
}

/// True when `method` implements a member of `interface` or of any interface
/// it inherits from.
pub fn is_method_candidate_for_forwarding(
    model: &SemanticModel,
    interface: &TypeRef,
    method: SymbolId,
) -> bool {
    let Some(owner) = model.symbol(method).container else {
        return false;
    };
    let mut visited: IndexSet<TypeRef> = IndexSet::new();
    let mut worklist = vec![interface.clone()];
    while let Some(current) = worklist.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        let Some(symbol) = current.symbol() else {
            continue;
        };
        let implements = model.symbol(symbol).members.iter().any(|&member| {
            implementation_for_interface_member(model, owner, &current, member) == Some(method)
        });
        if implements {
            return true;
        }
        let substitution = Substitution::of(&current);
        worklist.extend(
            model
                .symbol(symbol)
                .bases
                .iter()
                .map(|base| substitution.apply(base)),
        );
    }
    false
}

/// The member of `ty` (or a base class) implementing `member` of `interface`.
///
/// Explicit implementations win over implicit ones, and a derived class wins
/// over its base classes.
pub fn implementation_for_interface_member(
    model: &SemanticModel,
    ty: SymbolId,
    interface: &TypeRef,
    member: SymbolId,
) -> Option<SymbolId> {
    let wanted = model.symbol(member);
    let interface_substitution = Substitution::of(interface);
    let own = declared_type(model, ty);
    let mut levels = vec![own.clone()];
    levels.extend(
        model
            .base_types(&own)
            .into_iter()
            .filter(|base| !is_interface(model, base)),
    );
    for level in &levels {
        let Some(level_symbol) = level.symbol() else {
            continue;
        };
        let level_substitution = Substitution::of(level);
        let matching: Vec<SymbolId> = model
            .table()
            .members_named(level_symbol, &wanted.name)
            .into_iter()
            .filter(|&candidate| {
                signatures_match(
                    model,
                    member,
                    &interface_substitution,
                    candidate,
                    &level_substitution,
                )
            })
            .collect();
        let explicit = matching.iter().copied().find(|&candidate| {
            model.symbol(candidate).explicit_interface.as_ref() == Some(interface)
        });
        if explicit.is_some() {
            return explicit;
        }
        let implicit = matching
            .iter()
            .copied()
            .find(|&candidate| model.symbol(candidate).explicit_interface.is_none());
        if implicit.is_some() {
            return implicit;
        }
    }
    None
}

/// Same kind, arity, parameter types and ref kinds once both sides are
/// substituted. Method type parameters correspond by position.
fn signatures_match(
    model: &SemanticModel,
    wanted: SymbolId,
    wanted_substitution: &Substitution,
    candidate: SymbolId,
    candidate_substitution: &Substitution,
) -> bool {
    let (w, c) = (model.symbol(wanted), model.symbol(candidate));
    if w.kind != c.kind
        || w.type_parameters.len() != c.type_parameters.len()
        || w.parameters.len() != c.parameters.len()
    {
        return false;
    }
    let mut wanted_substitution = wanted_substitution.clone();
    if !w.type_parameters.is_empty() {
        let positional = (0..c.type_parameters.len())
            .map(|index| TypeRef::Parameter {
                owner: candidate,
                index,
            })
            .collect();
        wanted_substitution.bind(wanted, positional);
    }
    w.parameters.iter().zip(&c.parameters).all(|(&wp, &cp)| {
        let (wp, cp) = (model.symbol(wp), model.symbol(cp));
        wp.ref_kind == cp.ref_kind
            && match (&wp.ty, &cp.ty) {
                (Some(wt), Some(ct)) => {
                    wanted_substitution.apply(wt) == candidate_substitution.apply(ct)
                }
                _ => false,
            }
    })
}

// ============================================================================
// Return shapes
// ============================================================================

/// Return types a forwarding body can be synthesized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    Void,
    Boolean,
    Task,
    TaskOfBoolean,
}

impl ReturnShape {
    /// Nothing to combine: `void` or a plain `Task`.
    pub fn is_void_like(self) -> bool {
        matches!(self, ReturnShape::Void | ReturnShape::Task)
    }

    pub fn returns_boolean(self) -> bool {
        matches!(self, ReturnShape::Boolean | ReturnShape::TaskOfBoolean)
    }

    pub fn returns_task_wrapping(self) -> bool {
        matches!(self, ReturnShape::Task | ReturnShape::TaskOfBoolean)
    }
}

/// The [`ReturnShape`] of `method`, or `None` for any other return type.
pub fn classify_method_return_shape(model: &SemanticModel, method: SymbolId) -> Option<ReturnShape> {
    let ty = model.symbol(method).ty.as_ref()?;
    if ty.is_void() {
        return Some(ReturnShape::Void);
    }
    let boolean = model.well_known(WellKnown::Boolean)?;
    if *ty == boolean {
        return Some(ReturnShape::Boolean);
    }
    if model.well_known(WellKnown::Task).as_ref() == Some(ty) {
        return Some(ReturnShape::Task);
    }
    match model.task_result_type(ty) {
        Some(result) if result == boolean => Some(ReturnShape::TaskOfBoolean),
        _ => None,
    }
}

// ============================================================================
// Delegate conversions
// ============================================================================

/// A method group that failed to convert to a delegate type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDelegateBinding {
    /// The delegate's `Invoke` method.
    pub invoke: SymbolId,
    /// The delegate's type arguments.
    pub delegate_substitution: Substitution,
    /// The speculative binding, with the group's methods as candidates.
    pub info: SymbolInfo,
}

/// For `new D(M)`, given the argument or the creation expression, bind `M`
/// against `D` speculatively.
///
/// Returns the result only when binding failed by overload resolution and
/// left candidates to rewrite.
pub fn try_resolve_overload_candidate_for_failed_binding(
    model: &SemanticModel,
    node: &SyntaxNode,
) -> Option<FailedDelegateBinding> {
    let (creation, argument) = match node.kind() {
        SyntaxKind::Argument => {
            let creation = ancestor::<ObjectCreationExpression>(node)?;
            (creation, Argument::cast(node.clone())?)
        }
        SyntaxKind::ObjectCreationExpression => {
            let creation = ObjectCreationExpression::cast(node.clone())?;
            let first = creation.arguments().into_iter().next()?;
            (creation, first)
        }
        _ => return None,
    };
    let delegate = model.resolve_type(&creation.ty()?)?;
    let (invoke, delegate_substitution) = model.delegate_invoke(&delegate)?;
    let info = model.bind_method_group_conversion(&argument.expression()?, &delegate);
    let failed = info.symbol.is_none()
        && info.candidate_reason == CandidateReason::OverloadResolutionFailure
        && !info.candidates.is_empty();
    failed.then_some(FailedDelegateBinding {
        invoke,
        delegate_substitution,
        info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use sharpfix_cst::nodes::{MethodDeclaration, TypeDeclaration};

    fn model(source: &str) -> std::sync::Arc<SemanticModel> {
        Document::parse("Test.cs", source).unwrap().semantic_model()
    }

    fn type_named(model: &SemanticModel, name: &str) -> SymbolId {
        model
            .root()
            .descendants()
            .filter_map(TypeDeclaration::cast)
            .find(|t| t.name() == name)
            .and_then(|t| model.declared_symbol(t.syntax()))
            .unwrap()
    }

    fn method_named(model: &SemanticModel, name: &str) -> SymbolId {
        model
            .root()
            .descendants()
            .filter_map(MethodDeclaration::cast)
            .find(|m| m.name() == name)
            .and_then(|m| model.declared_symbol(m.syntax()))
            .unwrap()
    }

    const COMPOSITE: &str = r#"
using System.Collections.Generic;
using System.Threading.Tasks;

interface IBase { void Reset(); }
interface IRunner : IBase { void Run(int times); bool Check(); Task<bool> CheckAsync(); string Name(); }

class Composite : IRunner
{
    private List<IRunner> _items;
    private IRunner[] _array;
    public IEnumerable<IRunner> Children { get; }
    private List<string> _names;

    public void Run(int times) { }
    public bool Check() { throw new System.NotImplementedException(); }
    public Task<bool> CheckAsync() { throw new System.NotImplementedException(); }
    public string Name() { return ""; }
    public void Reset() { }
    public void Unrelated() { }
}
"#;

    #[test]
    fn enumerable_element_types() {
        let model = model(COMPOSITE);
        let composite = type_named(&model, "Composite");
        let runner = TypeRef::named(type_named(&model, "IRunner"));
        for &member in &model.symbol(composite).members {
            let symbol = model.symbol(member);
            let element = symbol
                .ty
                .as_ref()
                .and_then(|ty| try_get_enumerable_element_type(&model, ty));
            match symbol.name.as_str() {
                "_items" | "_array" | "Children" => assert_eq!(element.as_ref(), Some(&runner)),
                "_names" => assert_eq!(element, model.well_known(WellKnown::String)),
                _ => {}
            }
        }
    }

    #[test]
    fn candidates_group_members_by_interface() {
        let model = model(COMPOSITE);
        let composite = type_named(&model, "Composite");
        let candidates = find_interface_member_candidates(&model, composite);
        assert_eq!(candidates.len(), 1);
        let (interface, members) = candidates.first().unwrap();
        assert_eq!(interface.symbol(), Some(type_named(&model, "IRunner")));
        let names: Vec<&str> = members
            .iter()
            .map(|&m| model.symbol(m).name.as_str())
            .collect();
        assert_eq!(names, vec!["_items", "_array", "Children"]);
    }

    #[test]
    fn inherited_interface_members_are_forwarding_candidates() {
        let model = model(COMPOSITE);
        let runner = TypeRef::named(type_named(&model, "IRunner"));
        assert!(is_method_candidate_for_forwarding(&model, &runner, method_named(&model, "Run")));
        assert!(is_method_candidate_for_forwarding(&model, &runner, method_named(&model, "Reset")));
        assert!(!is_method_candidate_for_forwarding(
            &model,
            &runner,
            method_named(&model, "Unrelated")
        ));
    }

    #[test]
    fn return_shapes() {
        let model = model(COMPOSITE);
        let shape = |name| classify_method_return_shape(&model, method_named(&model, name));
        assert_eq!(shape("Run"), Some(ReturnShape::Void));
        assert_eq!(shape("Check"), Some(ReturnShape::Boolean));
        assert_eq!(shape("CheckAsync"), Some(ReturnShape::TaskOfBoolean));
        assert_eq!(shape("Name"), None);
        assert!(ReturnShape::Task.is_void_like());
        assert!(ReturnShape::TaskOfBoolean.returns_boolean());
        assert!(!ReturnShape::Boolean.returns_task_wrapping());
    }

    #[test]
    fn explicit_implementation_wins() {
        let model = model(
            "interface I { void M(); }\nclass C : I { public void M() { } void I.M() { } }\n",
        );
        let class = type_named(&model, "C");
        let interface = TypeRef::named(type_named(&model, "I"));
        let member = model.symbol(interface.symbol().unwrap()).members[0];
        let found = implementation_for_interface_member(&model, class, &interface, member).unwrap();
        assert!(model.symbol(found).explicit_interface.is_some());
    }

    #[test]
    fn failed_delegate_binding_reports_candidates() {
        let model = model(
            "delegate int Producer(int x);\nclass C\n{\n    string Make(string s) { return s; }\n    void Use() { var p = new Producer(Make); }\n}\n",
        );
        let argument = model
            .root()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::Argument)
            .unwrap();
        let failed = try_resolve_overload_candidate_for_failed_binding(&model, &argument).unwrap();
        assert_eq!(model.symbol(failed.invoke).name, "Invoke");
        assert_eq!(failed.info.candidates, vec![method_named(&model, "Make")]);

        let creation = argument.ancestors().find(|n| n.kind() == SyntaxKind::ObjectCreationExpression).unwrap();
        assert!(try_resolve_overload_candidate_for_failed_binding(&model, &creation).is_some());
    }

    #[test]
    fn successful_conversion_is_not_reported() {
        let model = model(
            "delegate int Producer(int x);\nclass C\n{\n    int Make(int s) { return s; }\n    void Use() { var p = new Producer(Make); }\n}\n",
        );
        let argument = model
            .root()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::Argument)
            .unwrap();
        assert!(try_resolve_overload_candidate_for_failed_binding(&model, &argument).is_none());
    }
}
