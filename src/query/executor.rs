//! Statement executor.
//!
//! Clauses run in order against one [`Graph`]. A `CREATE` materializes its
//! node and edge declarations; a `MATCH` scans, renders each result set as it
//! is produced, then applies its `SET` items (edges first, then properties)
//! to the vertices bound by the scan. `RETURN` items are carried but do
//! nothing.

use tracing::debug;

use crate::query::ast::{Clause, CreateClause, MatchClause, Pattern, Statement};
use crate::query::errors::QueryError;
use crate::storage::{Graph, PropertyFilter, MEMBER_EDGE};
use crate::types::{Result, VertexId};

/// One scan's worth of output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSet {
    /// Matched vertices in scan order.
    pub vertices: Vec<VertexId>,
    /// Each vertex rendered at scan time, before any `SET` ran.
    pub rows: Vec<String>,
}

/// Materialised result returned by [`Executor::execute`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Result sets in the order the scans ran.
    pub result_sets: Vec<ResultSet>,
}

impl QueryResult {
    /// Every rendered row across all result sets.
    pub fn rows(&self) -> impl Iterator<Item = &str> + '_ {
        self.result_sets
            .iter()
            .flat_map(|set| set.rows.iter().map(String::as_str))
    }
}

/// Runs parsed statements against a graph.
#[derive(Debug)]
pub struct Executor<'g> {
    graph: &'g mut Graph,
}

impl<'g> Executor<'g> {
    /// Binds an executor to `graph`.
    pub fn new(graph: &'g mut Graph) -> Self {
        Self { graph }
    }

    /// Executes every clause of `stmt` in order.
    pub fn execute(&mut self, stmt: &Statement) -> Result<QueryResult> {
        let mut result = QueryResult::default();
        for clause in &stmt.clauses {
            match clause {
                Clause::Create(create) => self.run_create(create)?,
                Clause::Match(matched) => self.run_match(matched, &mut result)?,
            }
        }
        Ok(result)
    }

    fn run_create(&mut self, clause: &CreateClause) -> Result<()> {
        let pattern = &clause.pattern;
        let mut bound = Vec::with_capacity(pattern.nodes.len());
        for decl in &pattern.nodes {
            let Some(label) = decl.label.as_deref() else {
                return Err(QueryError::UnidentifiedVariable {
                    name: decl.ident.clone().unwrap_or_default(),
                }
                .into());
            };
            let type_id = self.graph.type_vertex(label)?;
            let key = self.graph.mint_instance_key(label)?;
            let id = self.graph.set_vertex(&key, None)?;
            self.graph.add_edge(type_id, id, MEMBER_EDGE)?;
            // Applied last to first, so properties land in reverse order.
            for (k, v) in decl.props.iter().rev() {
                self.graph.set_property(id, k, v)?;
            }
            bound.push(id);
        }

        let mut linked = 0usize;
        for edge in &pattern.edges {
            let (Some(&from), Some(&to)) = (bound.get(edge.left.0), bound.get(edge.right.0))
            else {
                continue;
            };
            if from == to {
                continue;
            }
            self.graph.add_edge(from, to, &edge.label)?;
            linked += 1;
        }
        debug!(
            nodes = bound.len(),
            edges = linked,
            skipped = pattern.edges.len() - linked,
            "query.create"
        );
        Ok(())
    }

    fn run_match(&mut self, clause: &MatchClause, result: &mut QueryResult) -> Result<()> {
        let pattern = &clause.pattern;
        let mut bound: Vec<Vec<VertexId>> = vec![Vec::new(); pattern.nodes.len()];

        for (slot, decl) in bound.iter_mut().zip(&pattern.nodes) {
            if decl.props.is_empty() {
                *slot = self.graph.scan_vertices(None, None);
                result.result_sets.push(self.render(slot));
                continue;
            }
            // Filters scan last to first; the first declared one binds.
            for (key, value) in decl.props.iter().rev() {
                let filter = PropertyFilter::new(key, value);
                *slot = self.graph.scan_vertices(decl.label.as_deref(), Some(filter));
                result.result_sets.push(self.render(slot));
            }
        }
        debug!(
            nodes = pattern.nodes.len(),
            bound = bound.iter().map(Vec::len).sum::<usize>(),
            "query.match"
        );

        for set in &clause.edge_sets {
            let left = binding(pattern, &bound, &set.left)?;
            let right = binding(pattern, &bound, &set.right)?;
            for &from in left {
                for &to in right.iter().filter(|&&to| to != from) {
                    self.graph.add_edge(from, to, &set.label)?;
                }
            }
        }
        for set in &clause.node_sets {
            for &id in binding(pattern, &bound, &set.ident)? {
                self.graph.set_property(id, &set.key, &set.value)?;
            }
        }
        if !clause.returns.is_empty() {
            debug!(items = clause.returns.len(), "query.return.ignored");
        }
        Ok(())
    }

    fn render(&self, vertices: &[VertexId]) -> ResultSet {
        ResultSet {
            vertices: vertices.to_vec(),
            rows: vertices
                .iter()
                .map(|&id| self.graph.render_vertex(id))
                .collect(),
        }
    }
}

fn binding<'b>(
    pattern: &Pattern,
    bound: &'b [Vec<VertexId>],
    ident: &str,
) -> Result<&'b [VertexId]> {
    pattern
        .lookup(ident)
        .and_then(|node| bound.get(node.0))
        .map(Vec::as_slice)
        .ok_or_else(|| {
            QueryError::UnidentifiedVariable {
                name: ident.to_owned(),
            }
            .into()
        })
}
