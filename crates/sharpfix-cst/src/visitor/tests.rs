// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use super::*;
use crate::green::{Trivia, TriviaKind};
use crate::kind::SyntaxKind;
use crate::make;
use crate::nodes::{
    AstNode, IdentifierName, LambdaExpression, MemberAccessExpression, MethodDeclaration,
};
use crate::parser::parse_compilation_unit;
use crate::red::SyntaxNode;
use crate::GreenNode;

fn root(source: &str) -> SyntaxNode {
    SyntaxNode::new_root(parse_compilation_unit(source).unwrap())
}

const SOURCE: &str = r#"class C
{
    // first
    void A() { Run(x => x.Go()); }
    /* second */
    void B() { Stop(); }
}
"#;

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    skip_lambdas: bool,
    stop_at: Option<String>,
}

impl Visitor for Recorder {
    fn visit_method_declaration(&mut self, node: &MethodDeclaration) -> VisitResult {
        self.events.push(format!("visit {}", node.name()));
        if self.stop_at.as_deref() == Some(node.name().as_str()) {
            return VisitResult::Stop;
        }
        VisitResult::Continue
    }

    fn leave_method_declaration(&mut self, node: &MethodDeclaration) {
        self.events.push(format!("leave {}", node.name()));
    }

    fn visit_lambda_expression(&mut self, _node: &LambdaExpression) -> VisitResult {
        if self.skip_lambdas {
            VisitResult::SkipChildren
        } else {
            VisitResult::Continue
        }
    }

    fn visit_identifier_name(&mut self, node: &IdentifierName) -> VisitResult {
        self.events.push(node.text());
        VisitResult::Continue
    }
}

#[test]
fn test_walk_order() {
    let mut recorder = Recorder::default();
    let result = walk(&mut recorder, &root(SOURCE));
    assert_eq!(result, VisitResult::Continue);
    assert_eq!(
        recorder.events,
        vec!["visit A", "Run", "x", "Go", "leave A", "visit B", "Stop", "leave B"]
    );
}

#[test]
fn test_walk_skip_children() {
    let mut recorder = Recorder {
        skip_lambdas: true,
        ..Recorder::default()
    };
    walk(&mut recorder, &root(SOURCE));
    assert_eq!(
        recorder.events,
        vec!["visit A", "Run", "leave A", "visit B", "Stop", "leave B"]
    );
}

#[test]
fn test_walk_stop() {
    let mut recorder = Recorder {
        stop_at: Some("B".to_string()),
        ..Recorder::default()
    };
    let result = walk(&mut recorder, &root(SOURCE));
    assert_eq!(result, VisitResult::Stop);
    assert_eq!(
        recorder.events,
        vec!["visit A", "Run", "x", "Go", "leave A", "visit B"]
    );
}

#[test]
fn test_visit_node_sees_every_node() {
    struct Counter(usize);
    impl Visitor for Counter {
        fn visit_node(&mut self, _node: &SyntaxNode) -> VisitResult {
            self.0 += 1;
            VisitResult::Continue
        }
    }
    let root = root(SOURCE);
    let mut counter = Counter(0);
    walk(&mut counter, &root);
    assert_eq!(counter.0, root.descendants().count());
}

struct Unqualify;

impl Rewriter for Unqualify {
    fn rewrite_node(&mut self, node: &SyntaxNode) -> Option<GreenNode> {
        let access = MemberAccessExpression::cast(node.clone())?;
        let green = make::identifier_name(&access.name_text());
        Some(green.with_leading_trivia(node.green().leading_trivia().to_vec()))
    }
}

#[test]
fn test_rewriter_replaces_and_shares() {
    let source = "class C { int A() { return Math.Max(1, 2); } int B() { return 0; } }";
    let root = root(source);
    let new_root = rewrite(&mut Unqualify, &root);
    assert_eq!(
        new_root.text(),
        "class C { int A() { return Max(1, 2); } int B() { return 0; } }"
    );
    let old_b = root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::MethodDeclaration)
        .nth(1)
        .unwrap();
    let new_b = new_root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::MethodDeclaration)
        .nth(1)
        .unwrap();
    assert!(old_b.green().ptr_eq(new_b.green()));
}

#[test]
fn test_rewriter_without_changes_returns_same_root() {
    let root = root("class C { }");
    let new_root = rewrite(&mut Unqualify, &root);
    assert!(new_root.green().ptr_eq(root.green()));
}

#[test]
fn test_trivia_rewriter_replaces_comments() {
    let root = root(SOURCE);
    let mut rewriter = TriviaRewriter::new(|trivia: &Trivia| {
        trivia.kind().is_comment().then(Trivia::elastic_marker)
    });
    let new_root = rewrite(&mut rewriter, &root);
    let text = new_root.text();
    assert!(!text.contains("first"));
    assert!(!text.contains("second"));
    assert!(text.contains("void A()"));
    let markers = new_root
        .descendant_tokens()
        .iter()
        .flat_map(|t| t.leading_trivia().to_vec())
        .filter(|t| t.kind() == TriviaKind::ElasticMarker)
        .count();
    assert_eq!(markers, 2);
}

#[test]
fn test_rewrite_subtree_returns_new_root() {
    let root = root(SOURCE);
    let method_a = root
        .descendants()
        .find_map(MethodDeclaration::cast)
        .filter(|m| m.name() == "A")
        .unwrap();
    let mut rewriter = TriviaRewriter::new(|trivia: &Trivia| {
        trivia.kind().is_comment().then(Trivia::elastic_marker)
    });
    let new_root = rewrite(&mut rewriter, method_a.syntax());
    assert_eq!(new_root.kind(), SyntaxKind::CompilationUnit);
    assert!(!new_root.text().contains("first"));
    assert!(new_root.text().contains("second"));
}
