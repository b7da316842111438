use crate::types::VertexId;

/// Outgoing edge stored on its source vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Relationship label.
    pub label: String,
    /// Destination vertex.
    pub to: VertexId,
}

/// Key/value pair attached to a vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    /// Property name, unique per vertex.
    pub key: String,
    /// Property value.
    pub value: String,
}

/// Graph vertex: an instance counter, outgoing edges and properties.
///
/// The counter is only meaningful on type vertices, where it mints the `N`
/// of `"<label>:<N>"` instance keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vertex {
    idx: u64,
    edges: Vec<Edge>,
    properties: Vec<Property>,
}

impl Vertex {
    /// Creates an empty vertex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of the instance counter.
    pub fn counter(&self) -> u64 {
        self.idx
    }

    /// Returns the counter and advances it by one.
    pub fn next_instance(&mut self) -> u64 {
        let id = self.idx;
        self.idx += 1;
        id
    }

    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Properties in insertion order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Appends an edge at the tail of the adjacency list.
    pub fn add_edge(&mut self, to: VertexId, label: &str) {
        self.edges.push(Edge {
            label: label.to_owned(),
            to,
        });
    }

    /// Writes `key`, replacing the value in place when the key already exists.
    pub fn set_property(&mut self, key: &str, value: &str) {
        match self.properties.iter_mut().find(|prop| prop.key == key) {
            Some(prop) => {
                prop.value.clear();
                prop.value.push_str(value);
            }
            None => self.properties.push(Property {
                key: key.to_owned(),
                value: value.to_owned(),
            }),
        }
    }

    /// Reads the value stored under `key`.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|prop| prop.key == key)
            .map(|prop| prop.value.as_str())
    }

    /// Deletes `key`, returning its value.
    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        let pos = self.properties.iter().position(|prop| prop.key == key)?;
        Some(self.properties.remove(pos).value)
    }
}
