// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Using directives, namespaces, type declarations and members.

use super::{node, ParseResult, Parser};
use crate::green::{GreenElement, GreenNode};
use crate::kind::SyntaxKind;

impl Parser {
    /// Using directives and members up to (not including) `terminator`.
    pub(crate) fn usings_and_members(
        &mut self,
        children: &mut Vec<GreenElement>,
        terminator: SyntaxKind,
    ) -> ParseResult<()> {
        while !self.at(terminator) && !self.at(SyntaxKind::EndOfFile) {
            let global_using =
                self.at_contextual("global") && self.peek_at(1) == SyntaxKind::UsingKeyword;
            if self.at(SyntaxKind::UsingKeyword) || global_using {
                children.push(self.using_directive()?.into());
            } else if self.at_global_attribute() {
                children.push(self.attribute_list()?.into());
            } else {
                children.push(self.member_or_skipped()?.into());
            }
        }
        Ok(())
    }

    /// `[assembly: ...]` and `[module: ...]` stand alone.
    fn at_global_attribute(&self) -> bool {
        self.at(SyntaxKind::OpenBracket)
            && self.peek_at(1) == SyntaxKind::Identifier
            && matches!(self.peek_text_at(1), "assembly" | "module")
            && self.peek_at(2) == SyntaxKind::Colon
    }

    /// `[global] using [static] [Alias =] Name;`
    pub(crate) fn using_directive(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        if self.at_contextual("global") {
            children.push(self.bump_as(SyntaxKind::GlobalKeyword));
        }
        children.push(self.expect(SyntaxKind::UsingKeyword)?);
        self.eat(SyntaxKind::StaticKeyword, &mut children);
        if self.at(SyntaxKind::Identifier) && self.peek_at(1) == SyntaxKind::Equals {
            let alias = self.identifier_name()?;
            let equals = self.bump();
            children.push(node(SyntaxKind::NameEquals, vec![alias.into(), equals]).into());
        }
        children.push(self.name(true)?.into());
        children.push(self.expect(SyntaxKind::Semicolon)?);
        Ok(node(SyntaxKind::UsingDirective, children))
    }

    /// Any namespace, type or type member declaration.
    pub(crate) fn member(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        while self.at(SyntaxKind::OpenBracket) {
            children.push(self.attribute_list()?.into());
        }
        self.modifiers(&mut children);

        match self.peek() {
            SyntaxKind::NamespaceKeyword => self.namespace_declaration(children),
            SyntaxKind::ClassKeyword => {
                self.type_declaration(children, SyntaxKind::ClassDeclaration)
            }
            SyntaxKind::InterfaceKeyword => {
                self.type_declaration(children, SyntaxKind::InterfaceDeclaration)
            }
            SyntaxKind::StructKeyword => {
                self.type_declaration(children, SyntaxKind::StructDeclaration)
            }
            SyntaxKind::EnumKeyword => self.enum_declaration(children),
            SyntaxKind::DelegateKeyword => self.delegate_declaration(children),
            SyntaxKind::EventKeyword => self.event_declaration(children),
            SyntaxKind::ImplicitKeyword | SyntaxKind::ExplicitKeyword => {
                self.conversion_operator_declaration(children)
            }
            SyntaxKind::Tilde => self.destructor_declaration(children),
            SyntaxKind::Identifier
                if self.peek_text() == "record"
                    && matches!(
                        self.peek_at(1),
                        SyntaxKind::Identifier
                            | SyntaxKind::ClassKeyword
                            | SyntaxKind::StructKeyword
                    ) =>
            {
                children.push(self.bump_as(SyntaxKind::RecordKeyword));
                if matches!(
                    self.peek(),
                    SyntaxKind::ClassKeyword | SyntaxKind::StructKeyword
                ) {
                    children.push(self.bump());
                }
                self.type_declaration_rest(children, SyntaxKind::RecordDeclaration)
            }
            SyntaxKind::Identifier if self.peek_at(1) == SyntaxKind::OpenParen => {
                self.constructor_declaration(children)
            }
            _ => self.typed_member(children),
        }
    }

    fn modifiers(&mut self, children: &mut Vec<GreenElement>) {
        loop {
            let next = self.peek_at(1);
            if self.peek().is_modifier() {
                children.push(self.bump());
            } else if self.at_contextual("async")
                && (next == SyntaxKind::Identifier
                    || next.is_predefined_type()
                    || next.is_modifier())
            {
                children.push(self.bump_as(SyntaxKind::AsyncKeyword));
            } else if self.at_contextual("partial")
                && (matches!(
                    next,
                    SyntaxKind::ClassKeyword
                        | SyntaxKind::StructKeyword
                        | SyntaxKind::InterfaceKeyword
                        | SyntaxKind::VoidKeyword
                ) || (next == SyntaxKind::Identifier && self.peek_text_at(1) == "record"))
            {
                children.push(self.bump_as(SyntaxKind::PartialKeyword));
            } else if self.at_contextual("required")
                && (next == SyntaxKind::Identifier
                    || next.is_predefined_type()
                    || next.is_modifier())
            {
                children.push(self.bump_as(SyntaxKind::RequiredKeyword));
            } else {
                return;
            }
        }
    }

    fn attribute_list(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::OpenBracket)?];
        if self.peek_at(1) == SyntaxKind::Colon
            && matches!(
                self.peek(),
                SyntaxKind::Identifier | SyntaxKind::ReturnKeyword
            )
        {
            children.push(self.bump());
            children.push(self.bump());
        }
        loop {
            let mut attribute = vec![self.name(true)?.into()];
            if self.at(SyntaxKind::OpenParen) {
                attribute.push(self.argument_list()?.into());
            }
            children.push(node(SyntaxKind::Attribute, attribute).into());
            if !self.eat(SyntaxKind::Comma, &mut children) {
                break;
            }
        }
        children.push(self.expect(SyntaxKind::CloseBracket)?);
        Ok(node(SyntaxKind::AttributeList, children))
    }

    // ------------------------------------------------------------------
    // Namespaces and types
    // ------------------------------------------------------------------

    fn namespace_declaration(&mut self, mut children: Vec<GreenElement>) -> ParseResult<GreenNode> {
        children.push(self.expect(SyntaxKind::NamespaceKeyword)?);
        children.push(self.name(false)?.into());
        if self.eat(SyntaxKind::Semicolon, &mut children) {
            self.usings_and_members(&mut children, SyntaxKind::EndOfFile)?;
            return Ok(node(SyntaxKind::FileScopedNamespaceDeclaration, children));
        }
        children.push(self.expect(SyntaxKind::OpenBrace)?);
        self.usings_and_members(&mut children, SyntaxKind::CloseBrace)?;
        children.push(self.expect(SyntaxKind::CloseBrace)?);
        self.eat(SyntaxKind::Semicolon, &mut children);
        Ok(node(SyntaxKind::NamespaceDeclaration, children))
    }

    fn type_declaration(
        &mut self,
        mut children: Vec<GreenElement>,
        kind: SyntaxKind,
    ) -> ParseResult<GreenNode> {
        children.push(self.bump());
        self.type_declaration_rest(children, kind)
    }

    /// Name, type parameters, primary constructor, bases, constraints and
    /// body (or `;`).
    fn type_declaration_rest(
        &mut self,
        mut children: Vec<GreenElement>,
        kind: SyntaxKind,
    ) -> ParseResult<GreenNode> {
        children.push(self.expect_identifier()?);
        if self.at(SyntaxKind::Less) {
            children.push(self.type_parameter_list()?.into());
        }
        if self.at(SyntaxKind::OpenParen) {
            children.push(self.parameter_list()?.into());
        }
        if self.at(SyntaxKind::Colon) {
            children.push(self.base_list()?.into());
        }
        self.constraint_clauses(&mut children)?;
        if self.eat(SyntaxKind::Semicolon, &mut children) {
            return Ok(node(kind, children));
        }
        children.push(self.expect(SyntaxKind::OpenBrace)?);
        while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
            children.push(self.member_or_skipped()?.into());
        }
        children.push(self.expect(SyntaxKind::CloseBrace)?);
        self.eat(SyntaxKind::Semicolon, &mut children);
        Ok(node(kind, children))
    }

    fn enum_declaration(&mut self, mut children: Vec<GreenElement>) -> ParseResult<GreenNode> {
        children.push(self.expect(SyntaxKind::EnumKeyword)?);
        children.push(self.expect_identifier()?);
        if self.at(SyntaxKind::Colon) {
            children.push(self.base_list()?.into());
        }
        children.push(self.expect(SyntaxKind::OpenBrace)?);
        while !self.at(SyntaxKind::CloseBrace) {
            let mut member = Vec::new();
            while self.at(SyntaxKind::OpenBracket) {
                member.push(self.attribute_list()?.into());
            }
            member.push(self.expect_identifier()?);
            if self.at(SyntaxKind::Equals) {
                member.push(self.equals_value_clause()?.into());
            }
            children.push(node(SyntaxKind::EnumMemberDeclaration, member).into());
            if !self.eat(SyntaxKind::Comma, &mut children) {
                break;
            }
        }
        children.push(self.expect(SyntaxKind::CloseBrace)?);
        self.eat(SyntaxKind::Semicolon, &mut children);
        Ok(node(SyntaxKind::EnumDeclaration, children))
    }

    fn delegate_declaration(&mut self, mut children: Vec<GreenElement>) -> ParseResult<GreenNode> {
        children.push(self.expect(SyntaxKind::DelegateKeyword)?);
        children.push(self.parse_type(true)?.into());
        children.push(self.expect_identifier()?);
        if self.at(SyntaxKind::Less) {
            children.push(self.type_parameter_list()?.into());
        }
        children.push(self.parameter_list()?.into());
        self.constraint_clauses(&mut children)?;
        children.push(self.expect(SyntaxKind::Semicolon)?);
        Ok(node(SyntaxKind::DelegateDeclaration, children))
    }

    fn base_list(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::Colon)?];
        loop {
            let ty = self.parse_type(true)?;
            let mut base = vec![ty.into()];
            if self.at(SyntaxKind::OpenParen) {
                base.push(self.argument_list()?.into());
            }
            children.push(node(SyntaxKind::SimpleBaseType, base).into());
            if !self.eat(SyntaxKind::Comma, &mut children) {
                break;
            }
        }
        Ok(node(SyntaxKind::BaseList, children))
    }

    pub(crate) fn type_parameter_list(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        self.separated(SyntaxKind::Less, SyntaxKind::Greater, &mut children, |p| {
            let mut parameter = Vec::new();
            while p.at(SyntaxKind::OpenBracket) {
                parameter.push(p.attribute_list()?.into());
            }
            if !p.eat(SyntaxKind::InKeyword, &mut parameter) {
                p.eat(SyntaxKind::OutKeyword, &mut parameter);
            }
            parameter.push(p.expect_identifier()?);
            Ok(node(SyntaxKind::TypeParameter, parameter))
        })?;
        Ok(node(SyntaxKind::TypeParameterList, children))
    }

    /// `where T : class, IFoo, new()` clauses.
    pub(crate) fn constraint_clauses(&mut self, children: &mut Vec<GreenElement>) -> ParseResult<()> {
        while self.at_contextual("where") {
            let mut clause = vec![self.bump_as(SyntaxKind::WhereKeyword)];
            clause.push(self.identifier_name()?.into());
            clause.push(self.expect(SyntaxKind::Colon)?);
            loop {
                match self.peek() {
                    SyntaxKind::ClassKeyword | SyntaxKind::StructKeyword => {
                        clause.push(self.bump());
                        self.eat(SyntaxKind::Question, &mut clause);
                    }
                    SyntaxKind::NewKeyword => {
                        clause.push(self.bump());
                        clause.push(self.expect(SyntaxKind::OpenParen)?);
                        clause.push(self.expect(SyntaxKind::CloseParen)?);
                    }
                    _ => clause.push(self.parse_type(true)?.into()),
                }
                if !self.eat(SyntaxKind::Comma, &mut clause) {
                    break;
                }
            }
            children.push(node(SyntaxKind::TypeParameterConstraintClause, clause).into());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    fn constructor_declaration(
        &mut self,
        mut children: Vec<GreenElement>,
    ) -> ParseResult<GreenNode> {
        children.push(self.expect_identifier()?);
        children.push(self.parameter_list()?.into());
        if self.at(SyntaxKind::Colon) {
            let mut initializer = vec![self.bump()];
            match self.peek() {
                SyntaxKind::ThisKeyword | SyntaxKind::BaseKeyword => initializer.push(self.bump()),
                _ => return Err(self.error("expected 'this' or 'base'")),
            }
            initializer.push(self.argument_list()?.into());
            children.push(node(SyntaxKind::ConstructorInitializer, initializer).into());
        }
        self.member_body(&mut children)?;
        Ok(node(SyntaxKind::ConstructorDeclaration, children))
    }

    /// `~Name() body`
    fn destructor_declaration(
        &mut self,
        mut children: Vec<GreenElement>,
    ) -> ParseResult<GreenNode> {
        children.push(self.expect(SyntaxKind::Tilde)?);
        children.push(self.expect_identifier()?);
        children.push(self.parameter_list()?.into());
        self.member_body(&mut children)?;
        Ok(node(SyntaxKind::DestructorDeclaration, children))
    }

    /// `event Type Name;` or `event Type Name { add {} remove {} }`
    fn event_declaration(&mut self, mut children: Vec<GreenElement>) -> ParseResult<GreenNode> {
        children.push(self.expect(SyntaxKind::EventKeyword)?);
        let ty = self.parse_type(true)?;
        let (specifier, identifier) = self.member_name()?;
        if self.at(SyntaxKind::OpenBrace) {
            children.push(ty.into());
            children.extend(specifier.map(GreenElement::from));
            children.push(identifier);
            children.push(self.accessor_list()?.into());
            return Ok(node(SyntaxKind::EventDeclaration, children));
        }
        if specifier.is_some() {
            return Err(self.error("expected event accessors"));
        }
        children.push(self.variable_declaration_rest(ty, identifier)?.into());
        children.push(self.expect(SyntaxKind::Semicolon)?);
        Ok(node(SyntaxKind::EventFieldDeclaration, children))
    }

    /// `implicit operator T(S value) body` and the `explicit` form.
    fn conversion_operator_declaration(
        &mut self,
        mut children: Vec<GreenElement>,
    ) -> ParseResult<GreenNode> {
        children.push(self.bump());
        children.push(self.expect(SyntaxKind::OperatorKeyword)?);
        children.push(self.parse_type(true)?.into());
        children.push(self.parameter_list()?.into());
        self.member_body(&mut children)?;
        Ok(node(SyntaxKind::ConversionOperatorDeclaration, children))
    }

    /// `Type operator +(A a, B b) body`. The operator may span several
    /// tokens (`>>`, `>>>`).
    fn operator_declaration(
        &mut self,
        mut children: Vec<GreenElement>,
        ty: GreenNode,
    ) -> ParseResult<GreenNode> {
        children.push(ty.into());
        children.push(self.expect(SyntaxKind::OperatorKeyword)?);
        let mut operator_tokens = 0;
        while operator_tokens < 3
            && !self.at(SyntaxKind::OpenParen)
            && !self.at(SyntaxKind::EndOfFile)
        {
            children.push(self.bump());
            operator_tokens += 1;
        }
        if operator_tokens == 0 {
            return Err(self.error("expected operator"));
        }
        children.push(self.parameter_list()?.into());
        self.member_body(&mut children)?;
        Ok(node(SyntaxKind::OperatorDeclaration, children))
    }

    /// `Type this[parameters] { accessors }` or `=> value;`
    fn indexer_declaration(
        &mut self,
        mut children: Vec<GreenElement>,
        ty: GreenNode,
    ) -> ParseResult<GreenNode> {
        children.push(ty.into());
        children.push(self.expect(SyntaxKind::ThisKeyword)?);
        let mut parameters = Vec::new();
        self.separated(
            SyntaxKind::OpenBracket,
            SyntaxKind::CloseBracket,
            &mut parameters,
            Parser::parameter,
        )?;
        children.push(node(SyntaxKind::BracketedParameterList, parameters).into());
        if self.at(SyntaxKind::OpenBrace) {
            children.push(self.accessor_list()?.into());
        } else {
            children.push(self.arrow_expression_clause()?.into());
            children.push(self.expect(SyntaxKind::Semicolon)?);
        }
        Ok(node(SyntaxKind::IndexerDeclaration, children))
    }

    /// Methods, properties, indexers, operators and fields: everything that
    /// starts with a type.
    fn typed_member(&mut self, children: Vec<GreenElement>) -> ParseResult<GreenNode> {
        let ty = self.parse_type(true)?;
        match self.peek() {
            SyntaxKind::OperatorKeyword => self.operator_declaration(children, ty),
            SyntaxKind::ThisKeyword => self.indexer_declaration(children, ty),
            _ => self.named_member(children, ty),
        }
    }

    fn named_member(
        &mut self,
        mut children: Vec<GreenElement>,
        ty: GreenNode,
    ) -> ParseResult<GreenNode> {
        let (specifier, identifier) = self.member_name()?;

        match self.peek() {
            SyntaxKind::OpenParen | SyntaxKind::Less => {
                children.push(ty.into());
                children.extend(specifier.map(GreenElement::from));
                children.push(identifier);
                if self.at(SyntaxKind::Less) {
                    children.push(self.type_parameter_list()?.into());
                }
                children.push(self.parameter_list()?.into());
                self.constraint_clauses(&mut children)?;
                self.member_body(&mut children)?;
                Ok(node(SyntaxKind::MethodDeclaration, children))
            }
            SyntaxKind::OpenBrace => {
                children.push(ty.into());
                children.extend(specifier.map(GreenElement::from));
                children.push(identifier);
                children.push(self.accessor_list()?.into());
                if self.at(SyntaxKind::Equals) {
                    children.push(self.equals_value_clause()?.into());
                    children.push(self.expect(SyntaxKind::Semicolon)?);
                }
                Ok(node(SyntaxKind::PropertyDeclaration, children))
            }
            SyntaxKind::EqualsGreater => {
                children.push(ty.into());
                children.extend(specifier.map(GreenElement::from));
                children.push(identifier);
                children.push(self.arrow_expression_clause()?.into());
                children.push(self.expect(SyntaxKind::Semicolon)?);
                Ok(node(SyntaxKind::PropertyDeclaration, children))
            }
            _ if specifier.is_none() => {
                let declaration = self.variable_declaration_rest(ty, identifier)?;
                children.push(declaration.into());
                children.push(self.expect(SyntaxKind::Semicolon)?);
                Ok(node(SyntaxKind::FieldDeclaration, children))
            }
            _ => Err(self.error("expected method or property body")),
        }
    }

    /// The member identifier, split off an explicit interface prefix
    /// (`IFoo.Bar`) when present.
    fn member_name(&mut self) -> ParseResult<(Option<GreenNode>, GreenElement)> {
        if !(self.at(SyntaxKind::Identifier)
            && matches!(self.peek_at(1), SyntaxKind::Dot | SyntaxKind::Less))
        {
            return Ok((None, self.expect_identifier()?));
        }
        let start = self.save();
        let name = self.name(true)?;
        if name.kind() != SyntaxKind::QualifiedName {
            // `Method<T>(...)`: rewind and let the caller read type parameters.
            self.restore(start);
            return Ok((None, self.expect_identifier()?));
        }
        let parts = name.children();
        let member = parts[2]
            .as_node()
            .filter(|right| right.kind() == SyntaxKind::IdentifierName)
            .and_then(|right| right.children().first().cloned())
            .ok_or_else(|| self.error("expected member name"))?;
        let specifier = node(
            SyntaxKind::ExplicitInterfaceSpecifier,
            vec![parts[0].clone(), parts[1].clone()],
        );
        Ok((Some(specifier), member))
    }

    /// `Type name [= value] (, name [= value])*` after type and first name.
    pub(crate) fn variable_declaration_rest(
        &mut self,
        ty: GreenNode,
        identifier: GreenElement,
    ) -> ParseResult<GreenNode> {
        let mut children = vec![ty.into()];
        let mut identifier = identifier;
        loop {
            let mut declarator = vec![identifier];
            if self.at(SyntaxKind::Equals) {
                declarator.push(self.equals_value_clause()?.into());
            }
            children.push(node(SyntaxKind::VariableDeclarator, declarator).into());
            if !self.eat(SyntaxKind::Comma, &mut children) {
                break;
            }
            identifier = self.expect_identifier()?;
        }
        Ok(node(SyntaxKind::VariableDeclaration, children))
    }

    pub(crate) fn equals_value_clause(&mut self) -> ParseResult<GreenNode> {
        let equals = self.expect(SyntaxKind::Equals)?;
        let value = if self.at(SyntaxKind::OpenBrace) {
            self.initializer_expression()?
        } else {
            self.expression()?
        };
        Ok(node(SyntaxKind::EqualsValueClause, vec![equals, value.into()]))
    }

    pub(crate) fn arrow_expression_clause(&mut self) -> ParseResult<GreenNode> {
        let arrow = self.expect(SyntaxKind::EqualsGreater)?;
        let body = self.expression()?;
        Ok(node(SyntaxKind::ArrowExpressionClause, vec![arrow, body.into()]))
    }

    /// Block, `=> expr;` or `;`.
    fn member_body(&mut self, children: &mut Vec<GreenElement>) -> ParseResult<()> {
        match self.peek() {
            SyntaxKind::OpenBrace => children.push(self.block()?.into()),
            SyntaxKind::EqualsGreater => {
                children.push(self.arrow_expression_clause()?.into());
                children.push(self.expect(SyntaxKind::Semicolon)?);
            }
            _ => children.push(self.expect(SyntaxKind::Semicolon)?),
        }
        Ok(())
    }

    fn accessor_list(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::OpenBrace)?];
        while !self.at(SyntaxKind::CloseBrace) {
            let mut accessor = Vec::new();
            while self.at(SyntaxKind::OpenBracket) {
                accessor.push(self.attribute_list()?.into());
            }
            while matches!(
                self.peek(),
                SyntaxKind::PrivateKeyword
                    | SyntaxKind::ProtectedKeyword
                    | SyntaxKind::InternalKeyword
            ) {
                accessor.push(self.bump());
            }
            let (keyword, kind) = match self.peek_text() {
                "get" => (SyntaxKind::GetKeyword, SyntaxKind::GetAccessorDeclaration),
                "set" => (SyntaxKind::SetKeyword, SyntaxKind::SetAccessorDeclaration),
                "init" => (SyntaxKind::InitKeyword, SyntaxKind::InitAccessorDeclaration),
                "add" => (SyntaxKind::AddKeyword, SyntaxKind::AddAccessorDeclaration),
                "remove" => (SyntaxKind::RemoveKeyword, SyntaxKind::RemoveAccessorDeclaration),
                _ => return Err(self.error("expected accessor")),
            };
            accessor.push(self.bump_as(keyword));
            self.member_body(&mut accessor)?;
            children.push(node(kind, accessor).into());
        }
        children.push(self.expect(SyntaxKind::CloseBrace)?);
        Ok(node(SyntaxKind::AccessorList, children))
    }

    pub(crate) fn parameter_list(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        self.separated(
            SyntaxKind::OpenParen,
            SyntaxKind::CloseParen,
            &mut children,
            Parser::parameter,
        )?;
        Ok(node(SyntaxKind::ParameterList, children))
    }

    pub(crate) fn parameter(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        while self.at(SyntaxKind::OpenBracket) {
            children.push(self.attribute_list()?.into());
        }
        while matches!(
            self.peek(),
            SyntaxKind::ThisKeyword
                | SyntaxKind::RefKeyword
                | SyntaxKind::OutKeyword
                | SyntaxKind::InKeyword
                | SyntaxKind::ParamsKeyword
        ) {
            children.push(self.bump());
        }
        children.push(self.parse_type(true)?.into());
        children.push(self.expect_identifier()?);
        if self.at(SyntaxKind::Equals) {
            children.push(self.equals_value_clause()?.into());
        }
        Ok(node(SyntaxKind::Parameter, children))
    }
}
