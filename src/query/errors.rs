#![forbid(unsafe_code)]
#![allow(missing_docs)]

use thiserror::Error;

use crate::query::lexer::Symbol;

/// Failures raised while turning statement text into declarations.
///
/// Any of these aborts the whole statement before the graph is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The next token did not match the grammar.
    #[error("unexpected symbol '{found}', expected '{expected}'")]
    UnexpectedSymbol { found: Symbol, expected: Symbol },
    /// Input ran out (or stopped tokenizing) while a symbol was required.
    #[error("expected symbol '{expected}' but reached end of input")]
    UnexpectedEnd { expected: Symbol },
    /// An identifier was referenced before any node pattern bound it.
    #[error("unidentified variable '{name}'")]
    UnidentifiedVariable { name: String },
    /// A statement started with a word that is not a command keyword.
    #[error("unknown command '{found}'")]
    UnknownCommand { found: String },
    /// The statement nests deeper than the configured parser limit.
    #[error("statement nesting exceeds depth {max}")]
    NestingTooDeep { max: usize },
}
