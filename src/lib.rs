//! Nuon: a small in-memory property graph with a pattern language.
//!
//! Vertices are registered in an ordered skip-list index, grouped under type
//! vertices by `member` edges, and queried with `CREATE` / `MATCH ... SET`
//! statements.
//!
//! ```
//! let mut db = nuon::Database::new();
//! db.execute(r#"CREATE (p:Person {name:"Matt"}), (q:Person {name:"Jordan"}), (p)-[:knows]->(q)"#)
//!     .unwrap();
//! let out = db.execute(r#"MATCH (p:Person {name:"Matt"})"#).unwrap();
//! assert_eq!(
//!     out.rows().collect::<Vec<_>>(),
//!     vec![r#"{name:"Matt",knows:{name:"Jordan"}}"#]
//! );
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod db;
pub mod primitives;
pub mod query;
pub mod storage;
pub mod types;

pub use db::{Config, Database};
pub use query::{QueryError, QueryResult};
pub use types::{NuonError, Result, VertexId};
