// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node constructors.
//!
//! Nodes are built by parsing source text, so a constructed node always has
//! the same shape the parser produces for the same text. Trivia inside the
//! text is kept verbatim; callers set the outer trivia to fit the insertion
//! point.

use crate::green::{GreenNode, GreenToken, Trivia, TriviaKind};
use crate::kind::SyntaxKind;
use crate::parser::{self, ParseResult};
use crate::red::{SyntaxNode, SyntaxToken};

pub fn statement(text: &str) -> ParseResult<GreenNode> {
    parser::parse_statement(text)
}

pub fn expression(text: &str) -> ParseResult<GreenNode> {
    parser::parse_expression(text)
}

pub fn member(text: &str) -> ParseResult<GreenNode> {
    parser::parse_member(text)
}

pub fn type_syntax(text: &str) -> ParseResult<GreenNode> {
    parser::parse_type(text)
}

pub fn using_directive(text: &str) -> ParseResult<GreenNode> {
    parser::parse_using_directive(text)
}

/// A block holding `statements`, one per line.
///
/// The braces sit at `indent`; statements are indented one `unit` deeper.
/// The block has no outer trivia.
pub fn block(
    statements: &[String],
    indent: &str,
    unit: &str,
    newline: &str,
) -> ParseResult<GreenNode> {
    let mut text = String::from("{");
    text.push_str(newline);
    for statement in statements {
        text.push_str(indent);
        text.push_str(unit);
        text.push_str(statement);
        text.push_str(newline);
    }
    text.push_str(indent);
    text.push('}');
    parser::parse_statement(&text)
}

pub fn token(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(kind, text)
}

pub fn identifier(name: &str) -> GreenToken {
    GreenToken::new(SyntaxKind::Identifier, name)
}

/// An `IdentifierName` node for `name` with no trivia.
pub fn identifier_name(name: &str) -> GreenNode {
    GreenNode::new(SyntaxKind::IdentifierName, vec![identifier(name).into()])
}

/// Whitespace that starts the line holding `node`'s first token.
///
/// Taken from the first token's leading trivia after its last line break.
/// A node that does not start a line reports an empty indentation.
pub fn indentation_of(node: &SyntaxNode) -> String {
    let Some(token) = node.first_token() else {
        return String::new();
    };
    let leading = token.leading_trivia();
    let after_break = leading
        .iter()
        .rposition(|t| t.kind() == TriviaKind::EndOfLine)
        .map_or(0, |index| index + 1);
    let starts_line = after_break > 0 || follows_line_break(&token);
    if !starts_line {
        return String::new();
    }
    leading[after_break..]
        .iter()
        .take_while(|t| t.kind() == TriviaKind::Whitespace)
        .map(Trivia::text)
        .collect()
}

/// True when the token before `token` ends with a line break.
fn follows_line_break(token: &SyntaxToken) -> bool {
    let start = token.full_span().start;
    if start == 0 {
        return true;
    }
    token
        .parent()
        .root()
        .descendant_tokens()
        .into_iter()
        .take_while(|t| t.full_span().end <= start)
        .last()
        .is_some_and(|previous| {
            previous
                .trailing_trivia()
                .last()
                .is_some_and(|t| t.kind() == TriviaKind::EndOfLine)
        })
}
