//! Database handle: owns the graph and runs statements end to end.

mod config;

pub use config::Config;

use tracing::debug;

use crate::query::{parse, Executor, QueryResult};
use crate::storage::Graph;
use crate::types::Result;

/// In-memory graph database.
///
/// Statements are parsed in full before execution, so a statement that fails
/// to parse leaves the graph untouched. Nothing is persisted.
#[derive(Debug)]
pub struct Database {
    graph: Graph,
    config: Config,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    /// Creates an empty database with default options.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty database with `config`.
    pub fn with_config(config: Config) -> Self {
        debug!(
            max_level = config.max_level,
            seed = ?config.seed,
            max_parse_depth = config.max_parse_depth,
            "db.open"
        );
        Self {
            graph: Graph::with_config(&config),
            config,
        }
    }

    /// Options the database was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read access to the underlying store.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Write access to the underlying store.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Parses and runs one statement.
    pub fn execute(&mut self, statement: &str) -> Result<QueryResult> {
        let stmt = parse(statement, self.config.max_parse_depth)?;
        debug!(clauses = stmt.clauses.len(), "db.execute");
        Executor::new(&mut self.graph).execute(&stmt)
    }
}
