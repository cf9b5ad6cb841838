// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! C# tokenizer producing trivia-carrying green tokens.
//!
//! Every byte of the input ends up in exactly one token, either as token text
//! or as leading or trailing trivia, so concatenating the tokens reproduces
//! the source. The last token is always [`SyntaxKind::EndOfFile`], whose
//! leading trivia holds whatever follows the final real token.
//!
//! Contextual keywords (`async`, `await`, `get`, ...) are produced as
//! [`SyntaxKind::Identifier`]; the parser re-kinds them where they act as
//! keywords. `>` is always a single token so that nested type argument lists
//! close cleanly; shift operators are recognized by adjacency.


use crate::green::{GreenToken, Trivia, TriviaKind};
use crate::kind::SyntaxKind;
use crate::parser::ParseError;

/// Tokenize `source` into green tokens ending with an end-of-file token.
pub fn tokenize(source: &str) -> Result<Vec<GreenToken>, ParseError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer { src, pos: 0 }
    }

    fn run(mut self) -> Result<Vec<GreenToken>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let leading = self.leading_trivia()?;
            if self.pos >= self.src.len() {
                tokens.push(GreenToken::with_trivia(
                    SyntaxKind::EndOfFile,
                    "",
                    leading,
                    Vec::new(),
                ));
                return Ok(tokens);
            }
            let start = self.pos;
            let kind = self.scan_token()?;
            let text = &self.src[start..self.pos];
            let trailing = self.trailing_trivia()?;
            tokens.push(GreenToken::with_trivia(kind, text, leading, trailing));
        }
    }

    // ------------------------------------------------------------------
    // Character access
    // ------------------------------------------------------------------

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, offset: usize, message: &str) -> ParseError {
        ParseError::new(offset, message)
    }

    /// True when only spaces or tabs precede the cursor on its line.
    fn at_line_start(&self) -> bool {
        self.src[..self.pos]
            .chars()
            .rev()
            .take_while(|c| *c != '\n' && *c != '\r')
            .all(|c| c == ' ' || c == '\t')
    }

    // ------------------------------------------------------------------
    // Trivia
    // ------------------------------------------------------------------

    fn leading_trivia(&mut self) -> Result<Vec<Trivia>, ParseError> {
        let mut trivia = Vec::new();
        loop {
            if let Some(piece) = self.whitespace_or_eol() {
                trivia.push(piece);
            } else if self.rest().starts_with("//") {
                let kind = if self.rest().starts_with("///") && !self.rest().starts_with("////") {
                    TriviaKind::DocumentationComment
                } else {
                    TriviaKind::SingleLineComment
                };
                trivia.push(self.rest_of_line(kind));
            } else if self.rest().starts_with("/*") {
                trivia.push(self.block_comment()?);
            } else if self.peek() == Some('#') && self.at_line_start() {
                trivia.push(self.rest_of_line(TriviaKind::Directive));
            } else {
                return Ok(trivia);
            }
        }
    }

    fn trailing_trivia(&mut self) -> Result<Vec<Trivia>, ParseError> {
        let mut trivia = Vec::new();
        loop {
            match self.whitespace_or_eol() {
                Some(piece) => {
                    let done = piece.kind() == TriviaKind::EndOfLine;
                    trivia.push(piece);
                    if done {
                        return Ok(trivia);
                    }
                }
                None if self.rest().starts_with("//") => {
                    trivia.push(self.rest_of_line(TriviaKind::SingleLineComment));
                }
                None if self.rest().starts_with("/*") => {
                    trivia.push(self.block_comment()?);
                }
                None => return Ok(trivia),
            }
        }
    }

    fn whitespace_or_eol(&mut self) -> Option<Trivia> {
        let start = self.pos;
        match self.peek()? {
            '\r' => {
                self.pos += 1;
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
                Some(Trivia::end_of_line(&self.src[start..self.pos]))
            }
            '\n' => {
                self.pos += 1;
                Some(Trivia::end_of_line("\n"))
            }
            c if c.is_whitespace() => {
                self.eat_while(|c| c.is_whitespace() && c != '\r' && c != '\n');
                Some(Trivia::whitespace(&self.src[start..self.pos]))
            }
            _ => None,
        }
    }

    fn rest_of_line(&mut self, kind: TriviaKind) -> Trivia {
        let start = self.pos;
        self.eat_while(|c| c != '\r' && c != '\n');
        Trivia::new(kind, &self.src[start..self.pos])
    }

    fn block_comment(&mut self) -> Result<Trivia, ParseError> {
        let start = self.pos;
        match self.src[start + 2..].find("*/") {
            Some(end) => {
                self.pos = start + 2 + end + 2;
                Ok(Trivia::new(
                    TriviaKind::MultiLineComment,
                    &self.src[start..self.pos],
                ))
            }
            None => Err(self.error(start, "unterminated comment")),
        }
    }

    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------

    fn scan_token(&mut self) -> Result<SyntaxKind, ParseError> {
        let start = self.pos;
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(SyntaxKind::EndOfFile),
        };

        if is_identifier_start(c) {
            self.eat_while(is_identifier_part);
            let text = &self.src[start..self.pos];
            return Ok(SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier));
        }
        if c.is_ascii_digit() || (c == '.' && self.peek_nth(1).is_some_and(|d| d.is_ascii_digit()))
        {
            self.number();
            return Ok(SyntaxKind::NumericLiteral);
        }

        if matches!(c, '"' | '$') && self.raw_string(start)? {
            return Ok(SyntaxKind::StringLiteral);
        }

        match (c, self.peek_nth(1), self.peek_nth(2)) {
            ('@', Some('"'), _) => {
                self.pos += 1;
                self.verbatim_string(start)?;
                return Ok(SyntaxKind::StringLiteral);
            }
            ('@', Some(n), _) if is_identifier_start(n) => {
                self.pos += 1;
                self.eat_while(is_identifier_part);
                return Ok(SyntaxKind::Identifier);
            }
            ('$', Some('"'), _) => {
                self.pos += 1;
                self.interpolated_string(start, false)?;
                return Ok(SyntaxKind::StringLiteral);
            }
            ('$', Some('@'), Some('"')) | ('@', Some('$'), Some('"')) => {
                self.pos += 2;
                self.interpolated_string(start, true)?;
                return Ok(SyntaxKind::StringLiteral);
            }
            ('"', _, _) => {
                self.regular_string(start)?;
                return Ok(SyntaxKind::StringLiteral);
            }
            ('\'', _, _) => {
                self.character(start)?;
                return Ok(SyntaxKind::CharacterLiteral);
            }
            _ => {}
        }

        match punctuation(self.rest()) {
            Some((kind, len)) => {
                self.pos += len;
                Ok(kind)
            }
            None => Err(self.error(start, &format!("unexpected character '{}'", c))),
        }
    }

    fn number(&mut self) {
        let rest = self.rest();
        let radix_prefix = ["0x", "0X", "0b", "0B"];
        if radix_prefix.iter().any(|prefix| rest.starts_with(prefix)) {
            self.pos += 2;
            self.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
        } else {
            self.eat_while(|c| c.is_ascii_digit() || c == '_');
            if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|d| d.is_ascii_digit()) {
                self.pos += 1;
                self.eat_while(|c| c.is_ascii_digit() || c == '_');
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                let sign = matches!(self.peek_nth(1), Some('+' | '-'));
                let digit_at = if sign { 2 } else { 1 };
                if self.peek_nth(digit_at).is_some_and(|d| d.is_ascii_digit()) {
                    self.pos += digit_at;
                    self.eat_while(|c| c.is_ascii_digit());
                }
            }
        }
        self.eat_while(|c| matches!(c, 'u' | 'U' | 'l' | 'L' | 'f' | 'F' | 'd' | 'D' | 'm' | 'M'));
    }

    fn regular_string(&mut self, start: usize) -> Result<(), ParseError> {
        self.pos += 1;
        loop {
            match self.bump() {
                Some('"') => return Ok(()),
                Some('\\') => {
                    self.bump();
                }
                Some('\r' | '\n') | None => {
                    return Err(self.error(start, "unterminated string literal"));
                }
                Some(_) => {}
            }
        }
    }

    /// `"""..."""` and `$"""..."""`, closed by the same run of quotes that
    /// opened them. Returns false when the cursor is not at a raw string.
    fn raw_string(&mut self, start: usize) -> Result<bool, ParseError> {
        let rest = self.rest();
        let dollars = rest.len() - rest.trim_start_matches('$').len();
        let quotes = rest[dollars..].len() - rest[dollars..].trim_start_matches('"').len();
        if quotes < 3 {
            return Ok(false);
        }
        let body = dollars + quotes;
        let delimiter = &rest[dollars..body];
        match rest[body..].find(delimiter) {
            Some(end) => {
                self.pos += body + end + quotes;
                Ok(true)
            }
            None => Err(self.error(start, "unterminated raw string literal")),
        }
    }

    fn verbatim_string(&mut self, start: usize) -> Result<(), ParseError> {
        self.pos += 1;
        loop {
            match self.bump() {
                Some('"') if self.peek() == Some('"') => {
                    self.pos += 1;
                }
                Some('"') => return Ok(()),
                Some(_) => {}
                None => return Err(self.error(start, "unterminated string literal")),
            }
        }
    }

    /// Interpolated strings are a single token; holes are skipped by brace
    /// depth, honoring string literals nested inside them.
    fn interpolated_string(&mut self, start: usize, verbatim: bool) -> Result<(), ParseError> {
        self.pos += 1;
        loop {
            match self.bump() {
                Some('"') if verbatim && self.peek() == Some('"') => {
                    self.pos += 1;
                }
                Some('"') => return Ok(()),
                Some('\\') if !verbatim => {
                    self.bump();
                }
                Some('{') if self.peek() == Some('{') => {
                    self.pos += 1;
                }
                Some('{') => self.interpolation_hole(start)?,
                Some('\r' | '\n') if !verbatim => {
                    return Err(self.error(start, "unterminated string literal"));
                }
                Some(_) => {}
                None => return Err(self.error(start, "unterminated string literal")),
            }
        }
    }

    fn interpolation_hole(&mut self, start: usize) -> Result<(), ParseError> {
        let mut depth = 1usize;
        while depth > 0 {
            let here = self.pos;
            match self.peek() {
                Some('{') => {
                    self.pos += 1;
                    depth += 1;
                }
                Some('}') => {
                    self.pos += 1;
                    depth -= 1;
                }
                Some('"') => self.regular_string(here)?,
                Some('@') if self.peek_nth(1) == Some('"') => {
                    self.pos += 1;
                    self.verbatim_string(here)?;
                }
                Some('\'') => self.character(here)?,
                Some(_) => {
                    self.bump();
                }
                None => return Err(self.error(start, "unterminated string literal")),
            }
        }
        Ok(())
    }

    fn character(&mut self, start: usize) -> Result<(), ParseError> {
        self.pos += 1;
        loop {
            match self.bump() {
                Some('\'') => return Ok(()),
                Some('\\') => {
                    self.bump();
                }
                Some('\r' | '\n') | None => {
                    return Err(self.error(start, "unterminated character literal"));
                }
                Some(_) => {}
            }
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_part(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Longest punctuation match at the start of `rest`.
fn punctuation(rest: &str) -> Option<(SyntaxKind, usize)> {
    use SyntaxKind::*;
    const TABLE: &[(&str, SyntaxKind)] = &[
        ("??=", QuestionQuestionEquals),
        ("??", QuestionQuestion),
        ("==", EqualsEquals),
        ("=>", EqualsGreater),
        ("!=", ExclamationEquals),
        ("<<=", LessLessEquals),
        ("<=", LessEquals),
        ("<<", LessLess),
        (">=", GreaterEquals),
        ("++", PlusPlus),
        ("+=", PlusEquals),
        ("--", MinusMinus),
        ("-=", MinusEquals),
        ("*=", AsteriskEquals),
        ("/=", SlashEquals),
        ("%=", PercentEquals),
        ("&&", AmpersandAmpersand),
        ("&=", AmpersandEquals),
        ("||", BarBar),
        ("|=", BarEquals),
        ("^=", CaretEquals),
        ("{", OpenBrace),
        ("}", CloseBrace),
        ("(", OpenParen),
        (")", CloseParen),
        ("[", OpenBracket),
        ("]", CloseBracket),
        (";", Semicolon),
        (",", Comma),
        ("..", DotDot),
        (".", Dot),
        ("::", ColonColon),
        (":", Colon),
        ("?", Question),
        ("=", Equals),
        ("!", Exclamation),
        ("<", Less),
        (">", Greater),
        ("+", Plus),
        ("-", Minus),
        ("*", Asterisk),
        ("/", Slash),
        ("%", Percent),
        ("&", Ampersand),
        ("|", Bar),
        ("^", Caret),
        ("~", Tilde),
    ];
    TABLE
        .iter()
        .find(|(text, _)| rest.starts_with(text))
        .map(|(text, kind)| (*kind, text.len()))
}
