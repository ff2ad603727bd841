// AST (Abstract Syntax Tree) definitions for TypeDef schemas

use crate::parser::parse::{ErrorKind, ParseError};
use crate::parser::token::Token;
use log::debug;
use rustc_hash::FxHashMap;
use std::fmt;

/// Kinds of scalar literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    String,
}

/// Literal value backed by its source token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarValue<'src> {
    pub kind: ScalarKind,
    pub token: Token<'src>,
}

impl<'src> ScalarValue<'src> {
    pub fn new(kind: ScalarKind, token: Token<'src>) -> Self {
        Self { kind, token }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ScalarKind::Bool => Some(self.token.text == "true"),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.kind {
            ScalarKind::Int => self.token.text.parse().ok(),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self.kind {
            ScalarKind::Int | ScalarKind::Float => self.token.text.parse().ok(),
            _ => None,
        }
    }

    /// String contents without the surrounding quotes.
    pub fn as_str(&self) -> Option<&'src str> {
        match self.kind {
            ScalarKind::String => self
                .token
                .text
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"')),
            _ => None,
        }
    }
}

/// Scoped enum reference, `Type::Member`. Not resolved against any enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue<'src> {
    pub enum_type: Token<'src>,
    pub member: Token<'src>,
}

/// Object member, `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue<'src> {
    pub field_name: Token<'src>,
    pub value: Box<Value<'src>>,
}

/// What a brace-enclosed list turned out to be once all of its children
/// were seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundKind {
    /// `{}`: could be an empty array or an empty object.
    Unit,
    Array,
    Object,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundValue<'src> {
    pub open: Token<'src>,
    pub close: Token<'src>,
    pub values: Vec<Value<'src>>,
    pub resolved: CompoundKind,
}

impl CompoundValue<'_> {
    /// Kind shared by every child, `None` for an empty compound.
    pub fn element_kind(&self) -> Option<ValueKind> {
        self.values.first().map(Value::kind)
    }
}

/// Coarse classification used to check compound homogeneity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    String,
    Enum,
    Field,
    Compound,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Enum => "enum value",
            ValueKind::Field => "field value",
            ValueKind::Compound => "compound value",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A default value, possibly nested.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'src> {
    Scalar(ScalarValue<'src>),
    Enum(EnumValue<'src>),
    Field(FieldValue<'src>),
    Compound(CompoundValue<'src>),
}

impl<'src> Value<'src> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(scalar) => match scalar.kind {
                ScalarKind::Bool => ValueKind::Bool,
                ScalarKind::Int => ValueKind::Int,
                ScalarKind::Float => ValueKind::Float,
                ScalarKind::String => ValueKind::String,
            },
            Value::Enum(_) => ValueKind::Enum,
            Value::Field(_) => ValueKind::Field,
            Value::Compound(_) => ValueKind::Compound,
        }
    }

    /// The token that introduced this value.
    pub fn token(&self) -> Token<'src> {
        match self {
            Value::Scalar(scalar) => scalar.token,
            Value::Enum(value) => value.enum_type,
            Value::Field(field) => field.field_name,
            Value::Compound(compound) => compound.open,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue<'src>> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&CompoundValue<'src>> {
        match self {
            Value::Compound(compound) => Some(compound),
            _ => None,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(scalar) => f.write_str(scalar.token.text),
            Value::Enum(value) => {
                write!(f, "{}::{}", value.enum_type.text, value.member.text)
            }
            Value::Field(field) => {
                write!(f, "{} = {}", field.field_name.text, field.value)
            }
            Value::Compound(compound) if compound.values.is_empty() => {
                f.write_str("{}")
            }
            Value::Compound(compound) => {
                f.write_str("{ ")?;
                for (i, value) in compound.values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

/// Member field of a type definition
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition<'src> {
    pub type_name: Token<'src>,
    pub name: Token<'src>,
    pub is_array: bool,
    pub default: Option<Value<'src>>,
}

impl<'src> FieldDefinition<'src> {
    pub fn new(type_name: Token<'src>, name: Token<'src>) -> Self {
        Self {
            type_name,
            name,
            is_array: false,
            default: None,
        }
    }
}

/// Enum definition. Member ordinals are 0-based declaration order.
#[derive(Debug, Clone)]
pub struct EnumDefinition<'src> {
    pub keyword: Token<'src>,
    pub name: Token<'src>,
    members: Vec<Token<'src>>,
    lookup: FxHashMap<&'src str, usize>,
}

impl<'src> EnumDefinition<'src> {
    pub fn new(keyword: Token<'src>, name: Token<'src>) -> Self {
        Self {
            keyword,
            name,
            members: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    pub fn members(&self) -> &[Token<'src>] {
        &self.members
    }

    /// Ordinal of the member called `name`.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    /// Append a member, returning its ordinal. The caller checks uniqueness.
    pub(crate) fn push_member(&mut self, member: Token<'src>) -> usize {
        let ordinal = self.members.len();
        self.lookup.insert(member.text, ordinal);
        self.members.push(member);
        ordinal
    }
}

/// User-defined type definition.
///
/// The parent is kept as a name: it may be declared later in the file, or
/// not at all, so nothing here resolves it.
#[derive(Debug, Clone)]
pub struct TypeDefinition<'src> {
    pub keyword: Token<'src>,
    pub name: Token<'src>,
    pub parent: Option<Token<'src>>,
    fields: Vec<FieldDefinition<'src>>,
    lookup: FxHashMap<&'src str, usize>,
}

impl<'src> TypeDefinition<'src> {
    pub fn new(
        keyword: Token<'src>,
        name: Token<'src>,
        parent: Option<Token<'src>>,
    ) -> Self {
        Self {
            keyword,
            name,
            parent,
            fields: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDefinition<'src>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition<'src>> {
        self.lookup.get(name).map(|&i| &self.fields[i])
    }

    /// Append a field. The caller checks uniqueness.
    pub(crate) fn push_field(&mut self, field: FieldDefinition<'src>) {
        self.lookup.insert(field.name.text, self.fields.len());
        self.fields.push(field);
    }
}

/// Top-level named declaration
#[derive(Debug, Clone)]
pub enum Definition<'src> {
    Enum(EnumDefinition<'src>),
    Type(TypeDefinition<'src>),
}

impl<'src> Definition<'src> {
    pub fn name(&self) -> Token<'src> {
        match self {
            Definition::Enum(def) => def.name,
            Definition::Type(def) => def.name,
        }
    }

    /// The `enum`/`type` keyword token.
    pub fn keyword(&self) -> Token<'src> {
        match self {
            Definition::Enum(def) => def.keyword,
            Definition::Type(def) => def.keyword,
        }
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            Definition::Enum(_) => "enum",
            Definition::Type(_) => "type",
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDefinition<'src>> {
        match self {
            Definition::Enum(def) => Some(def),
            Definition::Type(_) => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeDefinition<'src>> {
        match self {
            Definition::Type(def) => Some(def),
            Definition::Enum(_) => None,
        }
    }
}

/// Parsed file: definitions in declaration order plus a name index.
#[derive(Debug, Clone, Default)]
pub struct Ast<'src> {
    nodes: Vec<Definition<'src>>,
    definitions: FxHashMap<&'src str, usize>,
}

impl<'src> Ast<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under its name. A name can only be defined
    /// once; the first definition is kept.
    pub fn define(
        &mut self,
        definition: Definition<'src>,
    ) -> Result<&'src str, ParseError<'src>> {
        let name = definition.name();
        if self.definitions.contains_key(name.text) {
            return Err(ParseError::new(
                ErrorKind::Semantic,
                format!("duplicate definition, '{}' redefinition", name.text),
                Some(name),
            ));
        }

        debug!("defined {} {}", definition.node_type(), name.text);
        self.definitions.insert(name.text, self.nodes.len());
        self.nodes.push(definition);
        Ok(name.text)
    }

    pub fn get(&self, name: &str) -> Option<&Definition<'src>> {
        self.definitions.get(name).map(|&i| &self.nodes[i])
    }

    pub fn definitions(&self) -> &[Definition<'src>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
