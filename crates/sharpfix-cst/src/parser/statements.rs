// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Statements.

use super::{node, ParseResult, Parser};
use crate::green::{GreenElement, GreenNode};
use crate::kind::SyntaxKind;

impl Parser {
    pub(crate) fn block(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::OpenBrace)?];
        while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
            children.push(self.statement_or_skipped()?.into());
        }
        children.push(self.expect(SyntaxKind::CloseBrace)?);
        Ok(node(SyntaxKind::Block, children))
    }

    pub(crate) fn statement(&mut self) -> ParseResult<GreenNode> {
        match self.peek() {
            SyntaxKind::OpenBrace => self.block(),
            SyntaxKind::Semicolon => Ok(node(SyntaxKind::EmptyStatement, vec![self.bump()])),
            SyntaxKind::IfKeyword => self.if_statement(),
            SyntaxKind::ReturnKeyword => self.jump_with_expression(SyntaxKind::ReturnStatement),
            SyntaxKind::ThrowKeyword => self.jump_with_expression(SyntaxKind::ThrowStatement),
            SyntaxKind::BreakKeyword => self.keyword_statement(SyntaxKind::BreakStatement),
            SyntaxKind::ContinueKeyword => self.keyword_statement(SyntaxKind::ContinueStatement),
            SyntaxKind::ForeachKeyword => self.foreach_statement(Vec::new()),
            SyntaxKind::ForKeyword => self.for_statement(),
            SyntaxKind::WhileKeyword => self.while_statement(),
            SyntaxKind::DoKeyword => self.do_statement(),
            SyntaxKind::TryKeyword => self.try_statement(),
            SyntaxKind::SwitchKeyword => self.switch_statement(),
            SyntaxKind::LockKeyword => self.lock_statement(),
            SyntaxKind::GotoKeyword => self.goto_statement(),
            SyntaxKind::UsingKeyword if self.peek_at(1) == SyntaxKind::OpenParen => {
                self.using_statement(Vec::new())
            }
            SyntaxKind::CheckedKeyword | SyntaxKind::UncheckedKeyword
                if self.peek_at(1) == SyntaxKind::OpenBrace =>
            {
                let keyword = self.bump();
                let block = self.block()?;
                Ok(node(SyntaxKind::CheckedStatement, vec![keyword, block.into()]))
            }
            SyntaxKind::UnsafeKeyword if self.peek_at(1) == SyntaxKind::OpenBrace => {
                let keyword = self.bump();
                let block = self.block()?;
                Ok(node(SyntaxKind::UnsafeStatement, vec![keyword, block.into()]))
            }
            SyntaxKind::Identifier
                if self.peek_text() == "yield"
                    && matches!(
                        self.peek_at(1),
                        SyntaxKind::ReturnKeyword | SyntaxKind::BreakKeyword
                    ) =>
            {
                self.yield_statement()
            }
            SyntaxKind::Identifier
                if self.peek_text() == "await"
                    && matches!(
                        self.peek_at(1),
                        SyntaxKind::ForeachKeyword | SyntaxKind::UsingKeyword
                    ) =>
            {
                let prefix = vec![self.bump_as(SyntaxKind::AwaitKeyword)];
                match self.peek() {
                    SyntaxKind::ForeachKeyword => self.foreach_statement(prefix),
                    _ if self.peek_at(1) == SyntaxKind::OpenParen => self.using_statement(prefix),
                    _ => self.local_declaration_statement(prefix),
                }
            }
            SyntaxKind::Identifier if self.peek_at(1) == SyntaxKind::Colon => {
                let label = self.bump();
                let colon = self.bump();
                let statement = self.statement()?;
                Ok(node(
                    SyntaxKind::LabeledStatement,
                    vec![label, colon, statement.into()],
                ))
            }
            _ => {
                if let Some(function) = self.try_parse(Parser::local_function_statement) {
                    return Ok(function);
                }
                if let Some(local) = self.try_parse(|p| p.local_declaration_statement(Vec::new()))
                {
                    return Ok(local);
                }
                let expression = self.expression()?;
                let semicolon = self.expect(SyntaxKind::Semicolon)?;
                Ok(node(
                    SyntaxKind::ExpressionStatement,
                    vec![expression.into(), semicolon],
                ))
            }
        }
    }

    /// `[const|using] Type name [= value], ...;`
    fn local_declaration_statement(
        &mut self,
        mut children: Vec<GreenElement>,
    ) -> ParseResult<GreenNode> {
        if !self.eat(SyntaxKind::ConstKeyword, &mut children) {
            self.eat(SyntaxKind::UsingKeyword, &mut children);
        }
        let ty = self.parse_type(true)?;
        if ty.kind() == SyntaxKind::IdentifierName && ty.text().trim() == "await" {
            return Err(self.error("await expression"));
        }
        if !(self.at(SyntaxKind::Identifier)
            && matches!(
                self.peek_at(1),
                SyntaxKind::Equals | SyntaxKind::Semicolon | SyntaxKind::Comma
            ))
        {
            return Err(self.error("not a local declaration"));
        }
        let identifier = self.bump();
        children.push(self.variable_declaration_rest(ty, identifier)?.into());
        children.push(self.expect(SyntaxKind::Semicolon)?);
        Ok(node(SyntaxKind::LocalDeclarationStatement, children))
    }

    fn if_statement(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::IfKeyword)?];
        children.push(self.expect(SyntaxKind::OpenParen)?);
        children.push(self.expression()?.into());
        children.push(self.expect(SyntaxKind::CloseParen)?);
        children.push(self.statement()?.into());
        if self.at(SyntaxKind::ElseKeyword) {
            let keyword = self.bump();
            let statement = self.statement()?;
            children.push(node(SyntaxKind::ElseClause, vec![keyword, statement.into()]).into());
        }
        Ok(node(SyntaxKind::IfStatement, children))
    }

    /// `return [expr];` and `throw [expr];`
    fn jump_with_expression(&mut self, kind: SyntaxKind) -> ParseResult<GreenNode> {
        let mut children = vec![self.bump()];
        if !self.at(SyntaxKind::Semicolon) {
            children.push(self.expression()?.into());
        }
        children.push(self.expect(SyntaxKind::Semicolon)?);
        Ok(node(kind, children))
    }

    fn keyword_statement(&mut self, kind: SyntaxKind) -> ParseResult<GreenNode> {
        let keyword = self.bump();
        let semicolon = self.expect(SyntaxKind::Semicolon)?;
        Ok(node(kind, vec![keyword, semicolon]))
    }

    /// `[await] foreach (Type name in collection) body`, or a deconstructing
    /// `foreach (var (a, b) in pairs)`.
    fn foreach_statement(&mut self, mut children: Vec<GreenElement>) -> ParseResult<GreenNode> {
        children.push(self.expect(SyntaxKind::ForeachKeyword)?);
        children.push(self.expect(SyntaxKind::OpenParen)?);
        let variable = self.try_parse(|p| {
            let ty = p.parse_type(true)?;
            let identifier = p.expect_identifier()?;
            if !p.at(SyntaxKind::InKeyword) {
                return Err(p.error("expected 'in'"));
            }
            Ok((ty, identifier))
        });
        match variable {
            Some((ty, identifier)) => {
                children.push(ty.into());
                children.push(identifier);
            }
            None => children.push(self.deconstruction_target()?.into()),
        }
        children.push(self.expect(SyntaxKind::InKeyword)?);
        children.push(self.expression()?.into());
        children.push(self.expect(SyntaxKind::CloseParen)?);
        children.push(self.statement()?.into());
        Ok(node(SyntaxKind::ForEachStatement, children))
    }

    /// `for (init; condition; incrementors) body`
    fn for_statement(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::ForKeyword)?];
        children.push(self.expect(SyntaxKind::OpenParen)?);
        if !self.at(SyntaxKind::Semicolon) {
            let declaration = self.try_parse(|p| {
                let ty = p.parse_type(true)?;
                if !(p.at(SyntaxKind::Identifier)
                    && matches!(
                        p.peek_at(1),
                        SyntaxKind::Equals | SyntaxKind::Semicolon | SyntaxKind::Comma
                    ))
                {
                    return Err(p.error("not a declaration"));
                }
                let identifier = p.bump();
                p.variable_declaration_rest(ty, identifier)
            });
            match declaration {
                Some(declaration) => children.push(declaration.into()),
                None => loop {
                    children.push(self.expression()?.into());
                    if !self.eat(SyntaxKind::Comma, &mut children) {
                        break;
                    }
                },
            }
        }
        children.push(self.expect(SyntaxKind::Semicolon)?);
        if !self.at(SyntaxKind::Semicolon) {
            children.push(self.expression()?.into());
        }
        children.push(self.expect(SyntaxKind::Semicolon)?);
        if !self.at(SyntaxKind::CloseParen) {
            loop {
                children.push(self.expression()?.into());
                if !self.eat(SyntaxKind::Comma, &mut children) {
                    break;
                }
            }
        }
        children.push(self.expect(SyntaxKind::CloseParen)?);
        children.push(self.statement()?.into());
        Ok(node(SyntaxKind::ForStatement, children))
    }

    fn while_statement(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::WhileKeyword)?];
        children.push(self.expect(SyntaxKind::OpenParen)?);
        children.push(self.expression()?.into());
        children.push(self.expect(SyntaxKind::CloseParen)?);
        children.push(self.statement()?.into());
        Ok(node(SyntaxKind::WhileStatement, children))
    }

    fn do_statement(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::DoKeyword)?];
        children.push(self.statement()?.into());
        children.push(self.expect(SyntaxKind::WhileKeyword)?);
        children.push(self.expect(SyntaxKind::OpenParen)?);
        children.push(self.expression()?.into());
        children.push(self.expect(SyntaxKind::CloseParen)?);
        children.push(self.expect(SyntaxKind::Semicolon)?);
        Ok(node(SyntaxKind::DoStatement, children))
    }

    fn try_statement(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::TryKeyword)?];
        children.push(self.block()?.into());
        while self.at(SyntaxKind::CatchKeyword) {
            let mut clause = vec![self.bump()];
            if self.at(SyntaxKind::OpenParen) {
                let mut declaration = vec![self.bump()];
                declaration.push(self.parse_type(true)?.into());
                if self.at(SyntaxKind::Identifier) {
                    declaration.push(self.bump());
                }
                declaration.push(self.expect(SyntaxKind::CloseParen)?);
                clause.push(node(SyntaxKind::CatchDeclaration, declaration).into());
            }
            if self.at_contextual("when") {
                let mut filter = vec![self.bump_as(SyntaxKind::WhenKeyword)];
                filter.push(self.expect(SyntaxKind::OpenParen)?);
                filter.push(self.expression()?.into());
                filter.push(self.expect(SyntaxKind::CloseParen)?);
                clause.push(node(SyntaxKind::CatchFilterClause, filter).into());
            }
            clause.push(self.block()?.into());
            children.push(node(SyntaxKind::CatchClause, clause).into());
        }
        if self.at(SyntaxKind::FinallyKeyword) {
            let keyword = self.bump();
            let block = self.block()?;
            children.push(node(SyntaxKind::FinallyClause, vec![keyword, block.into()]).into());
        }
        if children.len() == 2 {
            return Err(self.error("expected 'catch' or 'finally'"));
        }
        Ok(node(SyntaxKind::TryStatement, children))
    }

    /// `[await] using (resource) body`
    fn using_statement(&mut self, mut children: Vec<GreenElement>) -> ParseResult<GreenNode> {
        children.push(self.expect(SyntaxKind::UsingKeyword)?);
        children.push(self.expect(SyntaxKind::OpenParen)?);
        let declaration = self.try_parse(|p| {
            let ty = p.parse_type(true)?;
            if !(p.at(SyntaxKind::Identifier) && p.peek_at(1) == SyntaxKind::Equals) {
                return Err(p.error("not a declaration"));
            }
            let identifier = p.bump();
            p.variable_declaration_rest(ty, identifier)
        });
        match declaration {
            Some(declaration) => children.push(declaration.into()),
            None => children.push(self.expression()?.into()),
        }
        children.push(self.expect(SyntaxKind::CloseParen)?);
        children.push(self.statement()?.into());
        Ok(node(SyntaxKind::UsingStatement, children))
    }

    /// `switch (value) { case ...: statements default: statements }`
    fn switch_statement(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::SwitchKeyword)?];
        let parenthesized = self.try_parse(|p| {
            let open = p.expect(SyntaxKind::OpenParen)?;
            let value = p.expression()?;
            let close = p.expect(SyntaxKind::CloseParen)?;
            Ok([open, value.into(), close])
        });
        match parenthesized {
            Some(parts) => children.extend(parts),
            // `switch (a, b)`: the parens belong to the tuple
            None => children.push(self.expression()?.into()),
        }
        children.push(self.expect(SyntaxKind::OpenBrace)?);
        while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
            children.push(self.switch_section()?.into());
        }
        children.push(self.expect(SyntaxKind::CloseBrace)?);
        Ok(node(SyntaxKind::SwitchStatement, children))
    }

    fn at_switch_label(&self) -> bool {
        self.at(SyntaxKind::CaseKeyword)
            || (self.at(SyntaxKind::DefaultKeyword) && self.peek_at(1) == SyntaxKind::Colon)
    }

    fn switch_section(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        while self.at_switch_label() {
            children.push(self.switch_label()?.into());
        }
        if children.is_empty() {
            return Err(self.error("expected 'case' or 'default'"));
        }
        while !self.at(SyntaxKind::CloseBrace)
            && !self.at(SyntaxKind::EndOfFile)
            && !self.at_switch_label()
        {
            children.push(self.statement_or_skipped()?.into());
        }
        Ok(node(SyntaxKind::SwitchSection, children))
    }

    /// `default:`, `case constant:` or `case pattern [when condition]:`
    fn switch_label(&mut self) -> ParseResult<GreenNode> {
        if self.at(SyntaxKind::DefaultKeyword) {
            let keyword = self.bump();
            let colon = self.expect(SyntaxKind::Colon)?;
            return Ok(node(SyntaxKind::DefaultSwitchLabel, vec![keyword, colon]));
        }
        let keyword = self.expect(SyntaxKind::CaseKeyword)?;
        let pattern = self.pattern()?;
        let constant = match pattern.children() {
            [value] if pattern.kind() == SyntaxKind::ConstantPattern => Some(value.clone()),
            _ => None,
        };
        match constant {
            Some(value) if !self.at_contextual("when") => {
                let colon = self.expect(SyntaxKind::Colon)?;
                Ok(node(SyntaxKind::CaseSwitchLabel, vec![keyword, value, colon]))
            }
            _ => {
                let mut children = vec![keyword, pattern.into()];
                if self.at_contextual("when") {
                    children.push(self.when_clause()?.into());
                }
                children.push(self.expect(SyntaxKind::Colon)?);
                Ok(node(SyntaxKind::CasePatternSwitchLabel, children))
            }
        }
    }

    fn lock_statement(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::LockKeyword)?];
        children.push(self.expect(SyntaxKind::OpenParen)?);
        children.push(self.expression()?.into());
        children.push(self.expect(SyntaxKind::CloseParen)?);
        children.push(self.statement()?.into());
        Ok(node(SyntaxKind::LockStatement, children))
    }

    /// `yield return value;` and `yield break;`
    fn yield_statement(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.bump_as(SyntaxKind::YieldKeyword)];
        if self.eat(SyntaxKind::BreakKeyword, &mut children) {
            children.push(self.expect(SyntaxKind::Semicolon)?);
            return Ok(node(SyntaxKind::YieldBreakStatement, children));
        }
        children.push(self.expect(SyntaxKind::ReturnKeyword)?);
        children.push(self.expression()?.into());
        children.push(self.expect(SyntaxKind::Semicolon)?);
        Ok(node(SyntaxKind::YieldReturnStatement, children))
    }

    /// `goto label;`, `goto case value;` and `goto default;`
    fn goto_statement(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::GotoKeyword)?];
        match self.peek() {
            SyntaxKind::CaseKeyword => {
                children.push(self.bump());
                children.push(self.expression()?.into());
            }
            SyntaxKind::DefaultKeyword => children.push(self.bump()),
            _ => children.push(self.expect_identifier()?),
        }
        children.push(self.expect(SyntaxKind::Semicolon)?);
        Ok(node(SyntaxKind::GotoStatement, children))
    }

    /// `[static] [async] Type Name<T>(parameters) body`
    fn local_function_statement(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        loop {
            match self.peek() {
                SyntaxKind::StaticKeyword
                | SyntaxKind::UnsafeKeyword
                | SyntaxKind::ExternKeyword => children.push(self.bump()),
                SyntaxKind::Identifier
                    if self.peek_text() == "async"
                        && (self.peek_at(1) == SyntaxKind::Identifier
                            || self.peek_at(1).is_predefined_type()
                            || self.peek_at(1) == SyntaxKind::StaticKeyword) =>
                {
                    children.push(self.bump_as(SyntaxKind::AsyncKeyword));
                }
                _ => break,
            }
        }
        children.push(self.parse_type(true)?.into());
        children.push(self.expect_identifier()?);
        if self.at(SyntaxKind::Less) {
            children.push(self.type_parameter_list()?.into());
        }
        if !self.at(SyntaxKind::OpenParen) {
            return Err(self.error("not a local function"));
        }
        children.push(self.parameter_list()?.into());
        self.constraint_clauses(&mut children)?;
        match self.peek() {
            SyntaxKind::OpenBrace => children.push(self.block()?.into()),
            SyntaxKind::EqualsGreater => {
                children.push(self.arrow_expression_clause()?.into());
                children.push(self.expect(SyntaxKind::Semicolon)?);
            }
            _ => return Err(self.error("expected local function body")),
        }
        Ok(node(SyntaxKind::LocalFunctionStatement, children))
    }
}
