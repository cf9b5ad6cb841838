// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Skipping statements and members the grammar does not cover.
//!
//! The skipped tokens run to the first `;` or balanced `}` at bracket depth
//! zero. The `}` closing the enclosing block is never consumed, and reaching
//! end of file is still an error.

use super::{node, ParseResult, Parser};
use crate::green::GreenNode;
use crate::kind::SyntaxKind;

impl Parser {
    /// A statement, or its tokens as an `UnknownStatement`.
    pub(crate) fn statement_or_skipped(&mut self) -> ParseResult<GreenNode> {
        self.or_skipped(Parser::statement, SyntaxKind::UnknownStatement)
    }

    /// A member, or its tokens as an `UnknownMember`.
    pub(crate) fn member_or_skipped(&mut self) -> ParseResult<GreenNode> {
        self.or_skipped(Parser::member, SyntaxKind::UnknownMember)
    }

    fn or_skipped(
        &mut self,
        parse: fn(&mut Parser) -> ParseResult<GreenNode>,
        kind: SyntaxKind,
    ) -> ParseResult<GreenNode> {
        if !self.recover {
            return parse(self);
        }
        let start = self.save();
        match parse(self) {
            Ok(parsed) => Ok(parsed),
            Err(err) => {
                self.restore(start);
                self.skip_tokens(kind).ok_or(err)
            }
        }
    }

    fn skip_tokens(&mut self, kind: SyntaxKind) -> Option<GreenNode> {
        let start = self.save();
        let mut children = Vec::new();
        let mut depth = 0usize;
        loop {
            match self.peek() {
                SyntaxKind::EndOfFile => {
                    self.restore(start);
                    return None;
                }
                SyntaxKind::CloseBrace if depth == 0 => break,
                SyntaxKind::OpenBrace | SyntaxKind::OpenParen | SyntaxKind::OpenBracket => {
                    depth += 1;
                    children.push(self.bump());
                }
                SyntaxKind::CloseBrace => {
                    depth -= 1;
                    children.push(self.bump());
                    if depth == 0 && !continues_after_block(self.peek()) {
                        break;
                    }
                }
                SyntaxKind::CloseParen | SyntaxKind::CloseBracket => {
                    depth = depth.saturating_sub(1);
                    children.push(self.bump());
                }
                SyntaxKind::Semicolon => {
                    children.push(self.bump());
                    if depth == 0 {
                        break;
                    }
                }
                _ => children.push(self.bump()),
            }
        }
        if children.is_empty() {
            return None;
        }
        Some(node(kind, children))
    }
}

/// Tokens after a balanced `}` that keep the same statement or member going.
fn continues_after_block(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        Semicolon
            | Comma
            | Dot
            | OpenParen
            | OpenBracket
            | CloseParen
            | CloseBracket
            | Question
            | QuestionQuestion
            | Equals
            | EqualsGreater
            | ElseKeyword
            | CatchKeyword
            | FinallyKeyword
    )
}
