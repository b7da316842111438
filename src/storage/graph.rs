use tracing::debug;

use crate::db::Config;
use crate::primitives::skipmap::{IndexError, SkipMap};
use crate::storage::vertex::Vertex;
use crate::types::{NuonError, Result, VertexId};

/// Label of the edges linking a type vertex to each of its instances.
pub const MEMBER_EDGE: &str = "member";

/// Property predicate applied by [`Graph::scan_vertices`].
///
/// Matching is a prefix test: the stored value matches when it starts with
/// `value`. A filter longer than the stored value never matches.
#[derive(Clone, Copy, Debug)]
pub struct PropertyFilter<'a> {
    /// Property name to look up on each candidate.
    pub key: &'a str,
    /// Expected prefix of the stored value.
    pub value: &'a str,
}

impl<'a> PropertyFilter<'a> {
    /// Builds a filter for `key` / `value`.
    pub fn new(key: &'a str, value: &'a str) -> Self {
        Self { key, value }
    }

    /// Tests `vertex` against the filter.
    pub fn matches(&self, vertex: &Vertex) -> bool {
        vertex
            .property(self.key)
            .is_some_and(|stored| stored.as_bytes().starts_with(self.value.as_bytes()))
    }
}

/// In-memory property graph layered on the ordered index.
///
/// Vertices live in an arena addressed by [`VertexId`]; the index maps string
/// identities (a bare label for type vertices, `"<label>:<N>"` for instances)
/// to those handles. Rebinding a key leaves the previous vertex in the arena,
/// where edges may still reach it.
#[derive(Debug)]
pub struct Graph {
    index: SkipMap<VertexId>,
    vertices: Vec<Vertex>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Creates an empty graph with default options.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates an empty graph sized and seeded from `config`.
    pub fn with_config(config: &Config) -> Self {
        Self {
            index: SkipMap::with_options(config.max_level, config.seed),
            vertices: Vec::with_capacity(config.vertex_capacity),
        }
    }

    /// Number of keys registered in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` when no key has been registered.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Registered keys in index order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.index
            .keys()
            .filter_map(|key| std::str::from_utf8(key).ok())
    }

    /// Borrows the vertex behind `id`.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex> {
        self.vertices
            .get_mut(id.index())
            .ok_or(NuonError::NotFound("vertex"))
    }

    /// Resolves `key` to its vertex handle.
    pub fn get_vertex(&self, key: &str) -> Option<VertexId> {
        self.index.get(key.as_bytes()).copied()
    }

    /// Binds `key` to `vertex`, or to a fresh empty vertex when `None`.
    pub fn set_vertex(&mut self, key: &str, vertex: Option<Vertex>) -> Result<VertexId> {
        let id = self.alloc(vertex.unwrap_or_default())?;
        self.index.set(key.as_bytes(), id)?;
        Ok(id)
    }

    /// Vertex removal is not wired into any statement.
    pub fn remove_vertex(&mut self, _key: &str) -> Result<()> {
        Err(NuonError::Unsupported("vertex removal"))
    }

    /// Fetches the type vertex for `label`, registering an empty one if needed.
    pub fn type_vertex(&mut self, label: &str) -> Result<VertexId> {
        match self.get_vertex(label) {
            Some(id) => Ok(id),
            None => {
                debug!(label, "graph.type_vertex.create");
                self.set_vertex(label, None)
            }
        }
    }

    /// Reads and advances the label's counter, yielding `"<label>:<N>"`.
    pub fn mint_instance_key(&mut self, label: &str) -> Result<String> {
        let type_id = self.type_vertex(label)?;
        let n = self.vertex_mut(type_id)?.next_instance();
        Ok(format!("{label}:{n}"))
    }

    /// Appends an edge from `from` to `to`.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, label: &str) -> Result<()> {
        if self.vertex(to).is_none() {
            return Err(NuonError::NotFound("vertex"));
        }
        self.vertex_mut(from)?.add_edge(to, label);
        Ok(())
    }

    /// Edge removal is not wired into any statement.
    pub fn remove_edge(&mut self, _from: VertexId, _label: &str) -> Result<()> {
        Err(NuonError::Unsupported("edge removal"))
    }

    /// Sets `key` on `id`, overwriting an existing value.
    pub fn set_property(&mut self, id: VertexId, key: &str, value: &str) -> Result<()> {
        self.vertex_mut(id)?.set_property(key, value);
        Ok(())
    }

    /// Reads `key` from `id`.
    pub fn get_property(&self, id: VertexId, key: &str) -> Option<&str> {
        self.vertex(id)?.property(key)
    }

    /// Removes `key` from `id`, returning the old value.
    pub fn remove_property(&mut self, id: VertexId, key: &str) -> Result<Option<String>> {
        Ok(self.vertex_mut(id)?.remove_property(key))
    }

    /// Collects vertices, optionally restricted to one label and one property.
    ///
    /// With a label, candidates are the destinations of the type vertex's
    /// member edges in creation order; an unknown label yields nothing.
    /// Without one, every index entry is a candidate in key order. Vertices
    /// carrying no properties at all are never returned.
    pub fn scan_vertices(
        &self,
        label: Option<&str>,
        filter: Option<PropertyFilter<'_>>,
    ) -> Vec<VertexId> {
        let keep = |id: &VertexId| {
            self.vertex(*id).is_some_and(|vertex| {
                !vertex.properties().is_empty()
                    && filter.as_ref().map_or(true, |f| f.matches(vertex))
            })
        };
        match label {
            Some(label) => {
                let Some(type_vertex) = self.get_vertex(label).and_then(|id| self.vertex(id))
                else {
                    return Vec::new();
                };
                type_vertex
                    .edges()
                    .iter()
                    .filter(|edge| edge.label == MEMBER_EDGE)
                    .map(|edge| edge.to)
                    .filter(keep)
                    .collect()
            }
            None => self.index.iter().map(|(_, id)| *id).filter(keep).collect(),
        }
    }

    fn alloc(&mut self, vertex: Vertex) -> Result<VertexId> {
        let raw = u32::try_from(self.vertices.len())
            .map_err(|_| IndexError::OutOfMemory { requested: 1 })?;
        self.vertices
            .try_reserve(1)
            .map_err(|_| IndexError::OutOfMemory { requested: 1 })?;
        self.vertices.push(vertex);
        Ok(VertexId(raw))
    }
}
