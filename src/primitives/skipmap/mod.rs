#![forbid(unsafe_code)]

//! Probabilistic ordered index keyed by byte strings.
//!
//! Nodes live in an arena and link to each other by slot number; slot `0` is
//! the sentinel head, which is as tall as the configured ceiling. Keys compare
//! with full-length lexicographic byte ordering, so `b"ab" < b"abc"` and two
//! keys are equal only when they have the same length and contents.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::trace;

/// Hard ceiling on the number of levels a map may grow to.
pub const MAX_LEVEL: usize = 32;

const HEAD: usize = 0;

/// Failures reported by the index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Growing the node arena or a link array failed.
    #[error("out of memory while allocating {requested} index slot(s)")]
    OutOfMemory {
        /// Number of elements the failed reservation asked for.
        requested: usize,
    },
}

struct Node<V> {
    key: Box<[u8]>,
    value: Option<V>,
    next: Vec<Option<usize>>,
}

/// Ordered map from byte-string keys to owned values.
pub struct SkipMap<V> {
    nodes: Vec<Node<V>>,
    free: Vec<usize>,
    height: usize,
    max_level: usize,
    len: usize,
    rng: ChaCha8Rng,
}

impl<V> SkipMap<V> {
    /// Creates an empty map with the default ceiling and a random seed.
    pub fn new() -> Self {
        Self::with_options(MAX_LEVEL, None)
    }

    /// Creates an empty map with an explicit height ceiling and optional seed.
    ///
    /// `max_level` is clamped to `1..=MAX_LEVEL`. A fixed seed makes node
    /// heights, and therefore the internal shape, reproducible.
    pub fn with_options(max_level: usize, seed: Option<u64>) -> Self {
        let max_level = max_level.clamp(1, MAX_LEVEL);
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        let head = Node {
            key: Box::default(),
            value: None,
            next: vec![None; max_level],
        };
        Self {
            nodes: vec![head],
            free: Vec::new(),
            height: 0,
            max_level,
            len: 0,
            rng,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of populated levels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Configured height ceiling.
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Inserts `value` under `key`, replacing (and dropping) any previous value.
    ///
    /// Returns `Ok(true)` when a new entry was created and `Ok(false)` when an
    /// existing entry was overwritten in place.
    pub fn set(&mut self, key: &[u8], value: V) -> Result<bool, IndexError> {
        let mut update = self.descend(key);

        if let Some(existing) = self.nodes[update[0]].next[0] {
            if &*self.nodes[existing].key == key {
                self.nodes[existing].value = Some(value);
                return Ok(false);
            }
        }

        let height = self.random_height();
        if height > self.height {
            for slot in update.iter_mut().take(height).skip(self.height) {
                *slot = HEAD;
            }
            trace!(from = self.height, to = height, "skipmap.grow");
            self.height = height;
        }

        let mut next = Vec::new();
        next.try_reserve_exact(height)
            .map_err(|_| IndexError::OutOfMemory { requested: height })?;
        next.resize(height, None);
        let node = Node {
            key: key.into(),
            value: Some(value),
            next,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes
                    .try_reserve(1)
                    .map_err(|_| IndexError::OutOfMemory { requested: 1 })?;
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        for (level, &prev) in update.iter().enumerate().take(height) {
            self.nodes[slot].next[level] = self.nodes[prev].next[level];
            self.nodes[prev].next[level] = Some(slot);
        }
        self.len += 1;
        Ok(true)
    }

    /// Looks up the value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.find(key).and_then(|slot| self.nodes[slot].value.as_ref())
    }

    /// Mutable lookup of the value stored under `key`.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let slot = self.find(key)?;
        self.nodes[slot].value.as_mut()
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.find(key).is_some()
    }

    /// Unlinks `key` and hands back its value.
    ///
    /// Empty top levels are trimmed from the tracked height afterwards.
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        let update = self.descend(key);
        let target = self.nodes[update[0]].next[0]?;
        if &*self.nodes[target].key != key {
            return None;
        }

        for (level, &prev) in update.iter().enumerate().take(self.height) {
            if self.nodes[prev].next[level] != Some(target) {
                break;
            }
            self.nodes[prev].next[level] = self.nodes[target].next[level];
        }
        while self.height > 0 && self.nodes[HEAD].next[self.height - 1].is_none() {
            self.height -= 1;
        }
        trace!(height = self.height, "skipmap.remove");

        let node = &mut self.nodes[target];
        node.key = Box::default();
        node.next = Vec::new();
        let value = node.value.take();
        self.free.push(target);
        self.len -= 1;
        value
    }

    /// Walks the base level front to back. Each call starts from the head.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            map: self,
            cursor: self.nodes[HEAD].next[0],
        }
    }

    /// Walks the base level yielding keys only.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.iter().map(|(key, _)| key)
    }

    fn descend(&self, key: &[u8]) -> [usize; MAX_LEVEL] {
        let mut update = [HEAD; MAX_LEVEL];
        let mut cursor = HEAD;
        for level in (0..self.height).rev() {
            while let Some(next) = self.nodes[cursor].next[level] {
                if &*self.nodes[next].key < key {
                    cursor = next;
                } else {
                    break;
                }
            }
            update[level] = cursor;
        }
        update
    }

    fn find(&self, key: &[u8]) -> Option<usize> {
        let update = self.descend(key);
        let candidate = self.nodes[update[0]].next[0]?;
        (&*self.nodes[candidate].key == key).then_some(candidate)
    }

    // Geometric with p = 1/2: one level plus a level for every low zero bit.
    fn random_height(&mut self) -> usize {
        let bits: u32 = self.rng.gen();
        (bits.trailing_zeros() as usize + 1).min(self.max_level)
    }
}

impl<V> Default for SkipMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for SkipMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipMap")
            .field("len", &self.len)
            .field("height", &self.height)
            .field("max_level", &self.max_level)
            .finish()
    }
}

/// Iterator over `(key, value)` pairs in ascending key order.
pub struct Iter<'a, V> {
    map: &'a SkipMap<V>,
    cursor: Option<usize>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        while let Some(slot) = self.cursor {
            let node = &map.nodes[slot];
            self.cursor = node.next[0];
            if let Some(value) = node.value.as_ref() {
                return Some((&node.key[..], value));
            }
        }
        None
    }
}

impl<'a, V> IntoIterator for &'a SkipMap<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
