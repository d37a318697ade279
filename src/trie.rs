//! Prefix trie
//!
//! Paths are inserted into a [`TrieBuilder`], which merges labels shared at
//! the same depth. Once every path is in, the builder is frozen into a
//! read-only [`Trie`].

use std::collections::HashMap;
use std::hash::Hash;

/// Mutable trie used while paths are being inserted
#[derive(Debug, Clone)]
pub struct TrieBuilder<T> {
    children: Vec<(T, TrieBuilder<T>)>,
    index: HashMap<T, usize>,
}

impl<T> Default for TrieBuilder<T> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> TrieBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one path, reusing every existing node whose label matches at
    /// the same depth
    pub fn insert<I>(&mut self, path: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut node = self;
        for label in path {
            node = node.child_mut(label);
        }
    }

    fn child_mut(&mut self, label: T) -> &mut TrieBuilder<T> {
        let position = match self.index.get(&label) {
            Some(&position) => position,
            None => {
                self.children.push((label.clone(), TrieBuilder::new()));
                let position = self.children.len() - 1;
                self.index.insert(label, position);
                position
            }
        };
        &mut self.children[position].1
    }

    /// Freezes the builder
    pub fn build(self) -> Trie<T> {
        Trie {
            entries: self
                .children
                .into_iter()
                .map(|(label, child)| (label, child.build()))
                .collect(),
        }
    }
}

/// Read-only trie; children keep the order in which they were first inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie<T> {
    entries: Vec<(T, Trie<T>)>,
}

impl<T> Trie<T> {
    /// Number of distinct direct children
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(T, Trie<T>)] {
        &self.entries
    }
}

impl<T: PartialEq> Trie<T> {
    /// Returns the child reached through `label`, if any
    pub fn get(&self, label: &T) -> Option<&Trie<T>> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == label)
            .map(|(_, child)| child)
    }
}

impl<T: Clone + Eq + Hash> Trie<T> {
    /// Builds a trie from a complete collection of paths
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = T>,
    {
        let mut builder = TrieBuilder::new();
        for path in paths {
            builder.insert(path);
        }
        builder.build()
    }
}
