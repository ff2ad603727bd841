//! Default value parsing
//!
//! Values appear after `=` in a field definition:
//!
//! ```text
//! value    ::= scalar | enum_ref | compound
//! scalar   ::= "true" | "false" | INTEGER | FLOAT | STRING
//! enum_ref ::= WORD "::" WORD
//! compound ::= "{" ((WORD "=" value | value) ","*)* "}"
//! ```
//!
//! A compound is resolved once all of its children are known: `{}` is a
//! unit, a list of `name = value` pairs is an object, and any other list is
//! an array. Children must all share one [`ValueKind`].

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::{Token, TokenKind};
use log::trace;

impl<'a, 'src> Parser<'a, 'src> {
    /// Parse a value whose first token has already been taken.
    pub(crate) fn parse_value(
        &mut self,
        first: Token<'src>,
    ) -> Result<Value<'src>, ParseError<'src>> {
        if first.is(TokenKind::LBrace) {
            return self.parse_compound(first);
        }

        match self.parse_scalar(first)? {
            Some(value) => Ok(value),
            None => Err(ParseError::syntax(
                format!(
                    "expected a string, number, boolean, enum::label, array, or object; got {} '{}'",
                    first.kind, first.text
                ),
                first,
            )),
        }
    }

    /// Literals and enum references. `Ok(None)` means `first` does not
    /// start either.
    fn parse_scalar(
        &mut self,
        first: Token<'src>,
    ) -> Result<Option<Value<'src>>, ParseError<'src>> {
        let kind = match first.kind {
            TokenKind::Word if first.text == "true" || first.text == "false" => ScalarKind::Bool,
            TokenKind::Word if self.tokens.peek_ahead(TokenKind::Scope) => {
                self.tokens.take_front();
                return self.parse_enum_value(first).map(Some);
            }
            TokenKind::Integer => ScalarKind::Int,
            TokenKind::Float => ScalarKind::Float,
            TokenKind::String => ScalarKind::String,
            _ => return Ok(None),
        };

        Ok(Some(Value::Scalar(ScalarValue::new(kind, first))))
    }

    /// `Type::Member`, after the scope operator.
    fn parse_enum_value(
        &mut self,
        enum_type: Token<'src>,
    ) -> Result<Value<'src>, ParseError<'src>> {
        let member = self.take_identifier("enum member name", "scope operator ('::')")?;
        Ok(Value::Enum(EnumValue { enum_type, member }))
    }

    /// `name = value`, after the equals sign.
    fn parse_field_value(
        &mut self,
        field_name: Token<'src>,
    ) -> Result<Value<'src>, ParseError<'src>> {
        let Some(first) = self.tokens.take_front() else {
            return Err(Self::unexpected_eoi(format_args!(
                "after field assignment ('{} =')",
                field_name.text
            )));
        };

        let value = self.parse_value(first)?;
        Ok(Value::Field(FieldValue {
            field_name,
            value: Box::new(value),
        }))
    }

    /// Brace-enclosed list, after the opening brace. Children are collected
    /// as they come; the list is only resolved once its closing brace is seen.
    fn parse_compound(
        &mut self,
        open: Token<'src>,
    ) -> Result<Value<'src>, ParseError<'src>> {
        let mut values: Vec<Value<'src>> = Vec::new();

        let close = self
            .process_list("compound value", |parser, first| {
                let value = if first.is(TokenKind::Word)
                    && parser.tokens.peek_ahead(TokenKind::Equals)
                {
                    parser.tokens.take_front();
                    parser.parse_field_value(first)?
                } else {
                    parser.parse_value(first)?
                };
                values.push(value);
                Ok(())
            })
            .map_err(|err| err.context("compound value"))?;

        let resolved = resolve_compound(&values).map_err(|err| err.context("compound value"))?;
        trace!("compound {:?} with {} values", resolved, values.len());

        Ok(Value::Compound(CompoundValue {
            open,
            close,
            values,
            resolved,
        }))
    }
}

/// Decide what a finished list is. The first child's kind is the reference;
/// every other child must match it.
fn resolve_compound<'src>(values: &[Value<'src>]) -> Result<CompoundKind, ParseError<'src>> {
    let Some((first, rest)) = values.split_first() else {
        return Ok(CompoundKind::Unit);
    };

    let expected = first.kind();
    if let Some(mismatch) = rest.iter().find(|value| value.kind() != expected) {
        return Err(ParseError::semantic(
            format!(
                "invalid compound mixes types ({expected} and {})",
                mismatch.kind()
            ),
            mismatch.token(),
        ));
    }

    Ok(match expected {
        ValueKind::Field => CompoundKind::Object,
        _ => CompoundKind::Array,
    })
}
