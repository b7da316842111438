use crate::primitives::skipmap::MAX_LEVEL;

/// Engine options applied when a [`super::Database`] is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Height ceiling for the vertex index (clamped to `1..=32`).
    pub max_level: usize,
    /// Fixed seed for index node heights; random when `None`.
    pub seed: Option<u64>,
    /// Maximum parser recursion depth for a single statement.
    pub max_parse_depth: usize,
    /// Initial capacity of the vertex arena.
    pub vertex_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_level: MAX_LEVEL,
            seed: None,
            max_parse_depth: 128,
            vertex_capacity: 1024,
        }
    }
}

impl Config {
    /// Sets the index height ceiling.
    pub fn max_level(mut self, levels: usize) -> Self {
        self.max_level = levels.clamp(1, MAX_LEVEL);
        self
    }

    /// Pins the index RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the parser recursion limit.
    pub fn max_parse_depth(mut self, depth: usize) -> Self {
        self.max_parse_depth = depth.max(1);
        self
    }

    /// Sets the initial vertex arena capacity.
    pub fn vertex_capacity(mut self, capacity: usize) -> Self {
        self.vertex_capacity = capacity;
        self
    }
}
