//! Property-graph storage layered on the ordered index.
//!
//! Vertices carry an instance counter, an adjacency list and a property list.
//! Type vertices are keyed by a bare label and enumerate their instances via
//! `member` edges; instance vertices are keyed `"<label>:<N>"`.

mod graph;
mod render;
mod vertex;

/// Graph store and scan predicate.
pub use graph::{Graph, PropertyFilter, MEMBER_EDGE};

/// Vertex, edge and property records.
pub use vertex::{Edge, Property, Vertex};
