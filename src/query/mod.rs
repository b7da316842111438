#![forbid(unsafe_code)]

//! Statement language: tokenizer, parser and executor.
//!
//! Text flows through [`lexer`] into [`parser`], which builds the
//! declarations in [`ast`] for the whole statement before [`executor`] touches
//! the graph.

/// Statement-scoped declarations.
pub mod ast;

/// Lexical, syntax and binding errors.
pub mod errors;

/// Clause evaluation against the graph store.
pub mod executor;

/// Tokenizer.
pub mod lexer;

/// Recursive-descent parser.
pub mod parser;

pub use errors::QueryError;
pub use executor::{Executor, QueryResult, ResultSet};
pub use parser::parse;
