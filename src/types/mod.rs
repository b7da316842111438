#![forbid(unsafe_code)]

//! Identifier types and the crate-wide error.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::primitives::skipmap::IndexError;
use crate::query::errors::QueryError;

/// Stable handle to a vertex in the graph arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct VertexId(pub u32);

impl VertexId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors surfaced by the graph engine.
#[derive(Debug, Error)]
pub enum NuonError {
    /// The ordered index could not complete an operation.
    #[error("index: {0}")]
    Index(#[from] IndexError),
    /// The statement failed to tokenize, parse or resolve.
    #[error("{0}")]
    Query(#[from] QueryError),
    /// A vertex handle did not refer to a live vertex.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// The operation exists in the API but is not wired up.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
    /// Writing results failed.
    #[error("i/o: {0}")]
    Io(#[from] io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NuonError>;
