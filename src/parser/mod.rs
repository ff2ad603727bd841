//! TypeDef schema parser
//!
//! This module transforms TypeDef source text into an AST of named
//! definitions:
//! - [`token`] / [`lexer`]: Tokenization (source text → tokens)
//! - [`sequence`]: Cursor over the scanned tokens
//! - [`parse`]: Parser coordinator and diagnostics (tokens → AST)
//! - [`declarations`] / [`values`]: Grammar productions
//! - [`ast`]: AST node definitions and the definition registry
//!
//! # Language
//!
//! - `enum Name { A, B, C }`
//! - `type Name : Parent { type-name field-name []? (= default)? ... }`
//! - Defaults: booleans, integers, floats, strings, `Enum::Member`, and
//!   brace-enclosed arrays or objects
//! - `//` and `/* */` comments; commas between list items are optional
//!
//! # Parser Implementation
//!
//! Hand-written scanner and recursive descent parser. Tokens borrow the
//! source buffer, so the source must outlive every token, node and
//! diagnostic derived from it.

pub mod ast;
pub mod declarations;
pub mod lexer;
pub mod parse;
pub mod sequence;
pub mod token;
pub mod values;
