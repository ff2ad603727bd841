//! Declaration parsing implementation
//!
//! This module handles the top-level productions of a TypeDef file:
//!
//! - Enum definitions: `enum Name { A, B, C }`
//! - Type definitions: `type Name : Parent { ... }`
//! - Member fields: `type-name field-name []? (= value)?`
//!
//! # Grammar
//!
//! ```text
//! definition      ::= "enum" enum_definition | "type" type_definition
//! enum_definition ::= WORD "{" (WORD ","*)+ "}"
//! type_definition ::= WORD (":" WORD)? "{" (field ","*)* "}"
//! field           ::= WORD WORD ("[" "]")? ("=" value)?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::{Token, TokenKind};
use log::debug;

/// Names need at least one character other than `_`.
fn is_blank_name(name: &str) -> bool {
    name.bytes().all(|c| c == b'_')
}

impl<'a, 'src> Parser<'a, 'src> {
    /// Dispatch on the top-level keyword, already taken from the sequence.
    pub(crate) fn parse_definition(
        &mut self,
        first: Token<'src>,
    ) -> Result<Definition<'src>, ParseError<'src>> {
        match first.kind {
            TokenKind::Word if first.text == "enum" => self.parse_enum_definition(first),
            TokenKind::Word if first.text == "type" => self.parse_type_definition(first),
            TokenKind::Word => Err(ParseError::syntax(
                format!("expected either 'enum' or 'type'; got '{}'", first.text),
                first,
            )),
            TokenKind::RBrace => Err(ParseError::syntax(
                "unmatched close-brace at top-level, did you add too many }s?",
                first,
            )),
            _ => Err(ParseError::syntax(
                format!(
                    "unexpected '{}' at top-level, expecting keywords 'enum' or 'type'",
                    first.text
                ),
                first,
            )),
        }
    }

    /// Parse enum definition: enum Name { members }
    pub(crate) fn parse_enum_definition(
        &mut self,
        keyword: Token<'src>,
    ) -> Result<Definition<'src>, ParseError<'src>> {
        let name = self.take_identifier("enum name", "'enum' keyword")?;
        let mut def = EnumDefinition::new(keyword, name);

        self.take_open_brace("enum name")?;
        self.process_list("enum member", |_, member| {
            Self::parse_enum_member(&mut def, member)
        })
        .map_err(|err| err.context(format_args!("enum '{}'", name.text)))?;

        if def.members().is_empty() {
            return Err(ParseError::semantic(
                format!(
                    "enum '{}' has no members: enums must have at least one member",
                    name.text
                ),
                name,
            ));
        }

        Ok(Definition::Enum(def))
    }

    fn parse_enum_member(
        def: &mut EnumDefinition<'src>,
        member: Token<'src>,
    ) -> Result<(), ParseError<'src>> {
        if !member.is(TokenKind::Word) {
            return Err(Self::expected_identifier(
                "member name (identifier), or '}'",
                "enum member list",
                member,
            ));
        }

        if def.lookup(member.text).is_some() {
            return Err(ParseError::semantic(
                format!("duplicate enum member, '{}'", member.text),
                member,
            ));
        }

        if is_blank_name(member.text) {
            return Err(ParseError::semantic(
                format!("invalid enum member name, '{}'", member.text),
                member,
            ));
        }

        let ordinal = def.push_member(member);
        debug!("enum {} member {} = {}", def.name.text, member.text, ordinal);
        Ok(())
    }

    /// Parse type definition: type Name (: Parent)? { fields }
    pub(crate) fn parse_type_definition(
        &mut self,
        keyword: Token<'src>,
    ) -> Result<Definition<'src>, ParseError<'src>> {
        let name = self.take_identifier("type name", "'type' keyword")?;

        if self.tokens.is_empty() {
            return Err(Self::unexpected_eoi("after type name, expected ':' or '{'"));
        }

        let parent = if self.tokens.take_front_if(TokenKind::Colon).is_some() {
            Some(self.parse_type_parent(name)?)
        } else if self.tokens.peek_ahead(TokenKind::LBrace) {
            None
        } else {
            return Err(self.not_expected(
                format_args!("type name ({})", name.text),
                "':' or '{'",
            ));
        };

        let mut def = TypeDefinition::new(keyword, name, parent);

        self.take_open_brace("type name")?;
        self.process_list("type member", |parser, type_name| {
            parser.parse_type_member(&mut def, type_name)
        })
        .map_err(|err| err.context(format_args!("type '{}'", name.text)))?;

        Ok(Definition::Type(def))
    }

    /// Parent type name, after the colon. Only direct self-parenting is
    /// rejected; the parent does not need to exist.
    fn parse_type_parent(
        &mut self,
        type_name: Token<'src>,
    ) -> Result<Token<'src>, ParseError<'src>> {
        let parent = self.take_identifier("parent type name", "colon")?;

        if parent.text == type_name.text {
            return Err(ParseError::semantic(
                format!("type {} cannot have itself as a parent", type_name.text),
                parent,
            ));
        }

        Ok(parent)
    }

    fn parse_type_member(
        &mut self,
        def: &mut TypeDefinition<'src>,
        type_name: Token<'src>,
    ) -> Result<(), ParseError<'src>> {
        let field = self.parse_field_definition(type_name)?;

        if def.field(field.name.text).is_some() {
            return Err(ParseError::semantic(
                format!("duplicate field, '{}'", field.name.text),
                field.name,
            ));
        }

        debug!(
            "type {} adding member {} {}{}",
            def.name.text,
            field.type_name.text,
            field.name.text,
            if field.is_array { "[]" } else { "" }
        );
        def.push_field(field);
        Ok(())
    }

    /// Parse a member field, starting after its type name
    pub(crate) fn parse_field_definition(
        &mut self,
        type_name: Token<'src>,
    ) -> Result<FieldDefinition<'src>, ParseError<'src>> {
        if !type_name.is(TokenKind::Word) {
            return Err(Self::expected_identifier(
                "field type name, or '}'",
                "type definition",
                type_name,
            ));
        }

        let name = self.take_identifier("field name", "field type name")?;
        if is_blank_name(name.text) {
            return Err(ParseError::semantic(
                format!("invalid field name, '{}'", name.text),
                name,
            ));
        }

        let mut field = FieldDefinition::new(type_name, name);
        field.is_array = self.parse_array_marker()?;

        if self.tokens.take_front_if(TokenKind::Equals).is_some() {
            let Some(first) = self.tokens.take_front() else {
                return Err(Self::unexpected_eoi(format_args!(
                    "after '=', expected default value for '{}'",
                    name.text
                )));
            };
            field.default = Some(self.parse_value(first)?);
        }

        Ok(field)
    }

    /// `[]` after a field name. Arrays are dynamically sized, so anything
    /// between the brackets is an error.
    fn parse_array_marker(&mut self) -> Result<bool, ParseError<'src>> {
        let Some(open) = self.tokens.take_front_if(TokenKind::LBracket) else {
            return Ok(false);
        };

        if self.tokens.take_front_if(TokenKind::RBracket).is_some() {
            return Ok(true);
        }

        match self.tokens.front() {
            None => Err(Self::unexpected_eoi("after open bracket ('[')")),
            Some(token) => Err(ParseError::semantic(
                format!(
                    "expected close bracket (']') after open bracket ('['), got '{}': \
                     arrays are dynamic and cannot have a fixed size",
                    token.text
                ),
                if token.is(TokenKind::Integer) { token } else { open },
            )),
        }
    }
}
