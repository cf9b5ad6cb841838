//! `using static` import of a static class.

use sharpfix_cst::nodes::AstNode;
use sharpfix_cst::{SyntaxNode, TreeEdit};

use super::usings::add_using;
use crate::detectors::static_import::static_accesses_of;
use crate::semantic::{SemanticModel, SymbolId};

/// Import `type_name` statically and drop the qualifier from every access to
/// its static members. Accesses where the bare name already means something
/// else keep their qualifier.
pub fn import_type_as_static(model: &SemanticModel, type_name: &str) -> Option<SyntaxNode> {
    let type_symbol = model.table().type_by_path(type_name, 0)?;
    let root = model.root();

    let mut edit = TreeEdit::new();
    for access in static_accesses_of(model, type_symbol) {
        let name = model.symbol(access.member).name.clone();
        if !binds_only_to(model, access.access.syntax(), &name, type_symbol) {
            continue;
        }
        let Some(simple_name) = access.access.name() else {
            continue;
        };
        let replacement = simple_name
            .green()
            .with_leading_trivia(access.access.syntax().green().leading_trivia().to_vec());
        edit.replace_node(access.access.syntax(), replacement);
    }

    let unqualified = edit.apply(root);
    add_using(&unqualified, type_name, true)
}

/// True when `name` at `at` is free, or already refers to a member of
/// `type_symbol`.
fn binds_only_to(model: &SemanticModel, at: &SyntaxNode, name: &str, type_symbol: SymbolId) -> bool {
    model
        .lookup_value(at, name)
        .into_iter()
        .all(|found| model.symbol(found).container == Some(type_symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn import(source: &str) -> String {
        let document = Document::parse("Test.cs", source).unwrap();
        let model = document.semantic_model();
        import_type_as_static(&model, "System.Math").unwrap().text()
    }

    #[test]
    fn qualifiers_are_dropped_and_import_added() {
        let source = r#"using System;

class C
{
    double M(double x)
    {
        return Math.Sqrt(x) + Math.PI + Math.Max(1, 2);
    }
}
"#;
        let expected = r#"using System;
using static System.Math;

class C
{
    double M(double x)
    {
        return Sqrt(x) + PI + Max(1, 2);
    }
}
"#;
        assert_eq!(import(source), expected);
    }

    #[test]
    fn shadowed_names_keep_their_qualifier() {
        let source = r#"using System;

class C
{
    int Max(int a, int b) => a;

    int M()
    {
        var Abs = 3;
        return Math.Max(1, 2) + Math.Abs(Abs) + Math.Min(1, 2);
    }
}
"#;
        let fixed = import(source);
        assert!(fixed.contains("return Math.Max(1, 2) + Math.Abs(Abs) + Min(1, 2);"));
        assert!(fixed.contains("using static System.Math;"));
    }
}
