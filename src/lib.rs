//! # Introduction
//!
//! `typedef` is the front end for a small schema language: it reads enum and
//! record type definitions, with optional default values, and builds a
//! registry of named definitions for later stages (code generation,
//! validation) to consume.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Tokens → TokenSequence → Parser → Ast
//! ```
//!
//! 1. [`parser::lexer`]: splits the source into [`Token`]s that borrow it.
//! 2. [`parser::sequence`]: the cursor the parser consumes tokens through.
//! 3. [`parser::parse`]: parses one top-level definition per call and
//!    registers it in the [`Ast`].
//!
//! ## Example
//!
//! ```
//! let ast = typedef::parse("enum Color { RED, GREEN } type Pen { Color ink = Color::RED }")
//!     .unwrap();
//! assert_eq!(ast.len(), 2);
//! assert!(ast.get("Pen").is_some());
//! ```
//!
//! Parsing stops at the first diagnostic. Definitions registered before it
//! stay in the [`Ast`].

pub mod parser;

pub use parser::ast::{Ast, Definition, Value};
pub use parser::lexer::{scan, ScanError, Scanner, ScannerConfig};
pub use parser::parse::{ErrorKind, ParseError, Parser};
pub use parser::sequence::TokenSequence;
pub use parser::token::{SourceLocation, Token, TokenKind};

/// Scan and parse a whole source buffer.
pub fn parse(source: &str) -> Result<Ast<'_>, ParseError<'_>> {
    let tokens = scan(source)?;
    let ast = Parser::new(&tokens).parse_file()?;
    Ok(ast)
}
