// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Text edits between two versions of a tree.
//!
//! [`diff_trees`] walks both green trees in parallel. Shared or equivalent
//! subtrees produce nothing. Where the children of two nodes line up one to
//! one the walk recurses; elsewhere the changed run of children is replaced
//! as text. The edits are in document order, never overlap, and turn the old
//! text into the new text.

use sharpfix_core::patch::{Span, TextEdit};

use crate::green::{GreenElement, GreenNode};
use crate::red::SyntaxNode;

/// Edits that turn `old`'s full text into `new`'s full text.
pub fn diff_trees(old: &SyntaxNode, new: &SyntaxNode) -> Vec<TextEdit> {
    let mut edits = Vec::new();
    diff_nodes(old.green(), new.green(), old.full_span().start, &mut edits);
    edits
}

fn diff_nodes(old: &GreenNode, new: &GreenNode, offset: usize, edits: &mut Vec<TextEdit>) {
    if old.is_equivalent_to(new) {
        return;
    }
    if old.kind() != new.kind() {
        edits.push(TextEdit::replace(
            Span::new(offset, offset + old.full_len()),
            new.text(),
        ));
        return;
    }

    let old_children = old.children();
    let new_children = new.children();

    let prefix = old_children
        .iter()
        .zip(new_children)
        .take_while(|(a, b)| a.is_equivalent_to(b))
        .count();
    let max_suffix = old_children.len().min(new_children.len()) - prefix;
    let suffix = old_children
        .iter()
        .rev()
        .zip(new_children.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a.is_equivalent_to(b))
        .count();

    let old_middle = &old_children[prefix..old_children.len() - suffix];
    let new_middle = &new_children[prefix..new_children.len() - suffix];
    let start = offset
        + old_children[..prefix]
            .iter()
            .map(GreenElement::full_len)
            .sum::<usize>();

    if same_kinds(old_middle, new_middle) {
        diff_aligned(old_middle, new_middle, start, edits);
        return;
    }

    // A run of children added or removed at one end of the changed range,
    // with the rest lining up, stays a local insertion or deletion.
    if new_middle.len() > old_middle.len() {
        let extra = new_middle.len() - old_middle.len();
        if same_kinds(old_middle, &new_middle[extra..]) {
            edits.push(TextEdit::insert(start, elements_text(&new_middle[..extra])));
            diff_aligned(old_middle, &new_middle[extra..], start, edits);
            return;
        }
        if same_kinds(old_middle, &new_middle[..old_middle.len()]) {
            let end = diff_aligned(old_middle, &new_middle[..old_middle.len()], start, edits);
            edits.push(TextEdit::insert(
                end,
                elements_text(&new_middle[old_middle.len()..]),
            ));
            return;
        }
    } else if old_middle.len() > new_middle.len() {
        let extra = old_middle.len() - new_middle.len();
        if same_kinds(&old_middle[extra..], new_middle) {
            let removed: usize = old_middle[..extra].iter().map(GreenElement::full_len).sum();
            edits.push(TextEdit::delete(Span::new(start, start + removed)));
            diff_aligned(&old_middle[extra..], new_middle, start + removed, edits);
            return;
        }
        if same_kinds(&old_middle[..new_middle.len()], new_middle) {
            let end = diff_aligned(&old_middle[..new_middle.len()], new_middle, start, edits);
            let removed: usize = old_middle[new_middle.len()..]
                .iter()
                .map(GreenElement::full_len)
                .sum();
            edits.push(TextEdit::delete(Span::new(end, end + removed)));
            return;
        }
    }

    let old_len: usize = old_middle.iter().map(GreenElement::full_len).sum();
    edits.push(TextEdit::replace(
        Span::new(start, start + old_len),
        elements_text(new_middle),
    ));
}

fn same_kinds(old: &[GreenElement], new: &[GreenElement]) -> bool {
    old.len() == new.len() && old.iter().zip(new).all(|(a, b)| a.kind() == b.kind())
}

/// Diff children that line up one to one. Returns the offset after the
/// last old child.
fn diff_aligned(
    old: &[GreenElement],
    new: &[GreenElement],
    mut start: usize,
    edits: &mut Vec<TextEdit>,
) -> usize {
    for (a, b) in old.iter().zip(new) {
        match (a, b) {
            (GreenElement::Node(a), GreenElement::Node(b)) => diff_nodes(a, b, start, edits),
            _ if a.is_equivalent_to(b) => {}
            _ => edits.push(TextEdit::replace(
                Span::new(start, start + a.full_len()),
                element_text(b),
            )),
        }
        start += a.full_len();
    }
    start
}

fn elements_text(elements: &[GreenElement]) -> String {
    elements.iter().map(element_text).collect()
}

fn element_text(element: &GreenElement) -> String {
    let mut out = String::new();
    element.write_to(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_compilation_unit;
    use crate::red::TreeEdit;
    use crate::{make, SyntaxKind};
    use sharpfix_core::patch::EditSet;

    fn root(source: &str) -> SyntaxNode {
        SyntaxNode::new_root(parse_compilation_unit(source).unwrap())
    }

    fn apply(source: &str, edits: Vec<TextEdit>) -> String {
        let mut set = EditSet::new();
        for edit in edits {
            set.offer(edit);
        }
        set.apply(source).unwrap()
    }

    #[test]
    fn test_identical_trees_have_no_edits() {
        let old = root("class C { void M() { } }");
        let new = root("class C { void M() { } }");
        assert!(diff_trees(&old, &new).is_empty());
    }

    #[test]
    fn test_token_replacement_is_local() {
        let source = "class C\n{\n    int M() { return Math.Max(1, 2); }\n}\n";
        let old = root(source);
        let access = old
            .descendants()
            .find(|n| n.kind() == SyntaxKind::MemberAccessExpression)
            .unwrap();
        let new = access.replace_with(make::identifier_name("Max"));
        let edits = diff_trees(&old, &new);
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].span, access.full_span());
        assert_eq!(apply(source, edits), new.text());
    }

    #[test]
    fn test_inserted_statement_is_an_insertion() {
        let source = "class C\n{\n    void M()\n    {\n        Run();\n    }\n}\n";
        let old = root(source);
        let block = old
            .descendants()
            .find(|n| n.kind() == SyntaxKind::Block)
            .unwrap();
        let throw = make::statement("        throw new NotImplementedException();\n").unwrap();
        // After the open brace.
        let new_block = block.green().insert_children(1, vec![throw.into()]);
        let new = block.replace_with(new_block);
        let edits = diff_trees(&old, &new);
        assert_eq!(edits.len(), 1);
        assert!(edits[0].span.is_empty());
        assert_eq!(apply(source, edits), new.text());
    }

    #[test]
    fn test_separate_changes_produce_separate_edits() {
        let source = "class C\n{\n    int A() { return X.F(); }\n    int B() { return X.G(); }\n}\n";
        let old = root(source);
        let accesses: Vec<_> = old
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::MemberAccessExpression)
            .collect();
        let mut edit = TreeEdit::new();
        edit.replace_node(&accesses[0], make::identifier_name("F"));
        edit.replace_node(&accesses[1], make::identifier_name("G"));
        let new = edit.apply(&old);
        let edits = diff_trees(&old, &new);
        assert_eq!(edits.len(), 2);
        assert!(edits[0].span.end <= edits[1].span.start);
        assert_eq!(apply(source, edits), new.text());
    }

    #[test]
    fn test_inserted_sibling_keeps_changed_neighbour_local() {
        let source = "using System;\n\nclass C\n{\n    int A() { return X.F(); }\n}\n";
        let old = root(source);
        let access = old
            .descendants()
            .find(|n| n.kind() == SyntaxKind::MemberAccessExpression)
            .unwrap();
        let changed = access.replace_with(make::identifier_name("F"));
        let using = make::using_directive("using System.Linq;\n").unwrap();
        let new_green = changed.green().insert_children(1, vec![using.into()]);
        let new = SyntaxNode::new_root(new_green);

        let edits = diff_trees(&old, &new);
        assert_eq!(edits.len(), 2);
        assert!(edits[0].span.is_empty());
        assert_eq!(edits[0].new_text, "using System.Linq;\n");
        assert_eq!(edits[1].span, access.full_span());
        assert_eq!(apply(source, edits), new.text());
    }
}
