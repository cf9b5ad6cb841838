//! Using directive insertion.

use sharpfix_cst::make;
use sharpfix_cst::nodes::{AstNode, CompilationUnit, NamespaceDeclaration, UsingDirective};
use sharpfix_cst::{GreenElement, SyntaxNode, Trivia};

use super::{line_indent, Layout};

/// `name` without whitespace or a `global::` prefix.
fn normalize(name: &str) -> String {
    let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .strip_prefix("global::")
        .map(str::to_string)
        .unwrap_or(compact)
}

/// True when some using directive under `root` already imports `name`.
pub fn has_using(root: &SyntaxNode, name: &str, is_static: bool) -> bool {
    let wanted = normalize(name);
    root.descendants()
        .filter_map(UsingDirective::cast)
        .filter(|u| u.alias().is_none() && u.is_static() == is_static)
        .filter_map(|u| u.name())
        .any(|n| normalize(&n.text()) == wanted)
}

/// Add `using [static] name;` after the last using directive, or at the top
/// of the file when there is none. Returns `root` unchanged when an
/// equivalent directive exists.
pub fn add_using(root: &SyntaxNode, name: &str, is_static: bool) -> Option<SyntaxNode> {
    if has_using(root, name, is_static) {
        return Some(root.clone());
    }
    let layout = Layout::of(root);
    let keyword = if is_static { "using static" } else { "using" };
    let directive = make::using_directive(&format!("{keyword} {name};")).ok()?;

    let unit = CompilationUnit::cast(root.clone())?;
    let last_using = unit.usings().last().cloned().or_else(|| {
        unit.members()
            .into_iter()
            .find_map(NamespaceDeclaration::cast)
            .and_then(|ns| ns.usings().last().cloned())
    });

    match last_using {
        Some(last) => {
            let last = last.syntax();
            let parent = last.parent()?;
            let directive = directive
                .with_leading_trivia(vec![Trivia::whitespace(line_indent(last))])
                .with_trailing_trivia(vec![Trivia::end_of_line(layout.newline)]);
            let rebuilt = parent
                .green()
                .insert_children(last.index() + 1, vec![GreenElement::Node(directive)]);
            Some(parent.replace_with(rebuilt))
        }
        None => {
            let directive =
                directive.with_trailing_trivia(vec![Trivia::end_of_line(layout.newline.clone())]);
            let green = root.green();
            let mut rebuilt = green.insert_children(0, vec![GreenElement::Node(directive)]);
            if let Some(GreenElement::Node(first)) = green.children().first() {
                let mut leading = vec![Trivia::end_of_line(layout.newline)];
                leading.extend(first.leading_trivia().iter().cloned());
                rebuilt = rebuilt.replace_child(1, first.with_leading_trivia(leading).into());
            }
            Some(SyntaxNode::new_root(rebuilt))
        }
    }
}

/// Add every namespace in `names` that is not imported yet.
pub fn ensure_usings(root: &SyntaxNode, names: &[&str]) -> Option<SyntaxNode> {
    let mut current = root.clone();
    for name in names {
        current = add_using(&current, name, false)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SyntaxNode {
        sharpfix_cst::parse(source).unwrap().root().clone()
    }

    #[test]
    fn inserts_after_last_using() {
        let root = parse("using System;\nusing System.IO;\n\nclass C { }\n");
        let fixed = add_using(&root, "System.Linq", false).unwrap();
        assert_eq!(
            fixed.text(),
            "using System;\nusing System.IO;\nusing System.Linq;\n\nclass C { }\n"
        );
    }

    #[test]
    fn inserts_at_top_without_usings() {
        let root = parse("class C { }\n");
        let fixed = add_using(&root, "System.Math", true).unwrap();
        assert_eq!(fixed.text(), "using static System.Math;\n\nclass C { }\n");
    }

    #[test]
    fn existing_directive_is_kept() {
        let root = parse("using static System.Math;\nclass C { }\n");
        let fixed = add_using(&root, "System.Math", true).unwrap();
        assert_eq!(fixed.text(), root.text());
        assert!(!has_using(&root, "System.Math", false));
    }

    #[test]
    fn namespace_usings_are_extended() {
        let root = parse("namespace N\n{\n    using System;\n\n    class C { }\n}\n");
        let fixed = ensure_usings(&root, &["System", "System.Linq"]).unwrap();
        assert_eq!(
            fixed.text(),
            "namespace N\n{\n    using System;\n    using System.Linq;\n\n    class C { }\n}\n"
        );
    }
}
