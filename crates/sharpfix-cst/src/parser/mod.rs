// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Recursive-descent parser for the supported C# subset.
//!
//! The parser runs over the token vector produced by the tokenizer and builds
//! green nodes directly. Ambiguous constructs (local declarations versus
//! expressions, casts versus parenthesized expressions, generic names versus
//! comparisons) are resolved by saving the cursor, attempting one reading and
//! restoring on failure.
//!
//! When parsing a whole file, a statement or member that cannot be read is
//! kept as an opaque `UnknownStatement` or `UnknownMember` holding its
//! tokens, so one unsupported construct does not fail the file. Fragment
//! entry points never recover.
//!
//! Every entry point consumes its whole input. The compilation unit keeps the
//! end-of-file token; fragment entry points fold the end-of-file trivia into
//! the fragment's last token so that the fragment text is still complete.

mod declarations;
mod errors;
mod expressions;
mod patterns;
mod recovery;
mod statements;
mod types;

pub use errors::ParseError;

use crate::green::{GreenElement, GreenNode, GreenToken, Trivia};
use crate::kind::SyntaxKind;
use crate::tokenizer::tokenize;

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse a whole source file.
pub fn parse_compilation_unit(source: &str) -> ParseResult<GreenNode> {
    let mut parser = Parser::new(source)?;
    parser.compilation_unit()
}

/// Parse a single statement.
pub fn parse_statement(source: &str) -> ParseResult<GreenNode> {
    Parser::new(source)?.fragment(Parser::statement)
}

/// Parse a single expression.
pub fn parse_expression(source: &str) -> ParseResult<GreenNode> {
    Parser::new(source)?.fragment(Parser::expression)
}

/// Parse a single type or namespace member declaration.
pub fn parse_member(source: &str) -> ParseResult<GreenNode> {
    Parser::new(source)?.fragment(Parser::member)
}

/// Parse a type.
pub fn parse_type(source: &str) -> ParseResult<GreenNode> {
    Parser::new(source)?.fragment(Parser::type_syntax)
}

/// Parse a `using` directive.
pub fn parse_using_directive(source: &str) -> ParseResult<GreenNode> {
    Parser::new(source)?.fragment(Parser::using_directive)
}

pub(crate) struct Parser {
    tokens: Vec<GreenToken>,
    /// Absolute offset of each token's text.
    offsets: Vec<usize>,
    pos: usize,
    /// Skip unreadable statements and members instead of failing.
    recover: bool,
}

impl Parser {
    fn new(source: &str) -> ParseResult<Parser> {
        let tokens = tokenize(source)?;
        let mut offsets = Vec::with_capacity(tokens.len());
        let mut offset = 0;
        for token in &tokens {
            offsets.push(offset + token.leading_len());
            offset += token.full_len();
        }
        Ok(Parser {
            tokens,
            offsets,
            pos: 0,
            recover: false,
        })
    }

    fn compilation_unit(&mut self) -> ParseResult<GreenNode> {
        self.recover = true;
        let mut children = Vec::new();
        self.usings_and_members(&mut children, SyntaxKind::EndOfFile)?;
        children.push(self.expect(SyntaxKind::EndOfFile)?);
        Ok(GreenNode::new(SyntaxKind::CompilationUnit, children))
    }

    fn fragment(
        mut self,
        parse: fn(&mut Parser) -> ParseResult<GreenNode>,
    ) -> ParseResult<GreenNode> {
        let node = parse(&mut self)?;
        if !self.at(SyntaxKind::EndOfFile) {
            return Err(self.error("unexpected trailing input"));
        }
        let rest = self.current().leading_trivia();
        if rest.is_empty() {
            return Ok(node);
        }
        let mut trailing: Vec<Trivia> = node.trailing_trivia().to_vec();
        trailing.extend(rest.iter().cloned());
        Ok(node.with_trailing_trivia(trailing))
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    fn current(&self) -> &GreenToken {
        let index = self.pos.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub(crate) fn peek(&self) -> SyntaxKind {
        self.current().kind()
    }

    pub(crate) fn peek_at(&self, n: usize) -> SyntaxKind {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[index].kind()
    }

    pub(crate) fn peek_text(&self) -> &str {
        self.current().text()
    }

    pub(crate) fn peek_text_at(&self, n: usize) -> &str {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[index].text()
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == kind
    }

    /// Current token is the identifier `text` (a contextual keyword).
    pub(crate) fn at_contextual(&self, text: &str) -> bool {
        self.at(SyntaxKind::Identifier) && self.peek_text() == text
    }

    pub(crate) fn bump(&mut self) -> GreenElement {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token.into()
    }

    /// Consume the current token, re-kinding it.
    pub(crate) fn bump_as(&mut self, kind: SyntaxKind) -> GreenElement {
        let token = self.current().with_kind(kind);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token.into()
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind, children: &mut Vec<GreenElement>) -> bool {
        if self.at(kind) {
            children.push(self.bump());
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> ParseResult<GreenElement> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.error(&format!(
                "expected {}, found {}",
                describe(kind),
                self.describe_current()
            )))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> ParseResult<GreenElement> {
        self.expect(SyntaxKind::Identifier)
    }

    pub(crate) fn error(&self, message: &str) -> ParseError {
        let index = self.pos.min(self.offsets.len() - 1);
        ParseError::new(self.offsets[index], message)
    }

    fn describe_current(&self) -> String {
        match self.peek() {
            SyntaxKind::EndOfFile => "end of file".to_string(),
            _ => format!("'{}'", self.peek_text()),
        }
    }

    pub(crate) fn save(&self) -> usize {
        self.pos
    }

    pub(crate) fn restore(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Run `attempt`, rewinding the cursor when it fails.
    pub(crate) fn try_parse<T>(
        &mut self,
        attempt: impl FnOnce(&mut Parser) -> ParseResult<T>,
    ) -> Option<T> {
        let start = self.save();
        match attempt(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.restore(start);
                None
            }
        }
    }

    /// Token `n` ahead has no trivia between it and the next token.
    pub(crate) fn adjacent_to_next(&self, n: usize) -> bool {
        self.adjacent_to_next_index(self.pos + n)
    }

    /// The previous token has no trivia between it and the current token.
    pub(crate) fn adjacent_to_previous(&self) -> bool {
        self.pos > 0 && self.adjacent_to_next_index(self.pos - 1)
    }

    fn adjacent_to_next_index(&self, index: usize) -> bool {
        match (self.tokens.get(index), self.tokens.get(index + 1)) {
            (Some(a), Some(b)) => a.trailing_trivia().is_empty() && b.leading_trivia().is_empty(),
            _ => false,
        }
    }

    /// Index of the token after the `)` matching the `(` at offset `n`.
    pub(crate) fn skip_parens(&self, n: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut index = n;
        loop {
            match self.peek_at(index) {
                SyntaxKind::OpenParen => depth += 1,
                SyntaxKind::CloseParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(index + 1);
                    }
                }
                SyntaxKind::EndOfFile => return None,
                _ => {}
            }
            index += 1;
        }
    }

    /// Parse `open item (, item)* close` into `children`.
    pub(crate) fn separated(
        &mut self,
        open: SyntaxKind,
        close: SyntaxKind,
        children: &mut Vec<GreenElement>,
        mut item: impl FnMut(&mut Parser) -> ParseResult<GreenNode>,
    ) -> ParseResult<()> {
        children.push(self.expect(open)?);
        if !self.at(close) {
            loop {
                children.push(item(self)?.into());
                if !self.eat(SyntaxKind::Comma, children) {
                    break;
                }
            }
        }
        children.push(self.expect(close)?);
        Ok(())
    }
}

pub(crate) fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(kind, children)
}

fn describe(kind: SyntaxKind) -> String {
    use SyntaxKind::*;
    let text = match kind {
        Identifier => "identifier",
        EndOfFile => "end of file",
        OpenBrace => "'{'",
        CloseBrace => "'}'",
        OpenParen => "'('",
        CloseParen => "')'",
        OpenBracket => "'['",
        CloseBracket => "']'",
        Semicolon => "';'",
        Comma => "','",
        Colon => "':'",
        Equals => "'='",
        Greater => "'>'",
        Less => "'<'",
        EqualsGreater => "'=>'",
        other => return format!("{:?}", other),
    };
    text.to_string()
}

#[cfg(test)]
mod tests;
