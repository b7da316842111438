//! Low-level building blocks shared by the storage layer.

/// Probabilistic ordered index mapping byte-string keys to values.
pub mod skipmap;
