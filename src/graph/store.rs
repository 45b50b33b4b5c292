//! Append-only, deduplicated triple store with pure merge.
//!
//! A [`GraphStore`] is a named collection of triples plus the namespace of
//! the source it was assembled from. It grows monotonically (insertion only,
//! never deletion) and behaves as a set: inserting a structurally identical
//! triple twice has no additional effect. Iteration order is insertion order,
//! stable across repeated calls, so downstream projections are reproducible.

use std::collections::HashSet;

use crate::ident::{Identifier, Namespace};

use super::Triple;

/// A named, namespaced, deduplicated set of triples.
#[derive(Clone)]
pub struct GraphStore {
    name: String,
    namespace: Namespace,
    /// Insertion-ordered triples; `seen` guards against duplicates.
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
}

impl GraphStore {
    /// Create a new empty store.
    pub fn new(name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            name: name.into(),
            namespace,
            triples: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// The store's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace of the source this store was assembled from.
    ///
    /// Individual triples carry their own namespaces; after a merge the
    /// store-level namespace is informational only.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Insert a triple. Idempotent: returns `true` only if the triple was new.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.seen.contains(&triple) {
            return false;
        }
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// Insert every triple from an iterator, returning how many were new.
    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) -> usize {
        triples
            .into_iter()
            .filter(|t| self.insert(t.clone()))
            .count()
    }

    /// Whether the store contains a structurally identical triple.
    pub fn contains(&self, triple: &Triple) -> bool {
        self.seen.contains(triple)
    }

    /// Merge two stores into a new one holding the union of their triple
    /// sets. Neither input is mutated; the union is commutative and
    /// associative over triple sets. The new store keeps the left operand's
    /// namespace and joins the names.
    pub fn merge(&self, other: &GraphStore) -> GraphStore {
        let mut merged = GraphStore::new(
            format!("{}+{}", self.name, other.name),
            self.namespace.clone(),
        );
        merged.extend(self.triples.iter().cloned());
        merged.extend(other.triples.iter().cloned());
        merged
    }

    /// Iterate the triples in insertion order.
    ///
    /// The iterator is lazy and restartable; calling this again on an
    /// unchanged store yields the same sequence.
    pub fn triples(&self) -> impl Iterator<Item = &Triple> + '_ {
        self.triples.iter()
    }

    /// Distinct subjects in first-appearance order: the store's entities.
    pub fn subjects(&self) -> Vec<&Identifier> {
        let mut seen: HashSet<&Identifier> = HashSet::new();
        self.triples
            .iter()
            .map(|t| &t.subject)
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Number of distinct entities (subjects).
    pub fn entity_count(&self) -> usize {
        self.subjects().len()
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the store holds no triples.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("name", &self.name)
            .field("namespace", &self.namespace.prefix())
            .field("triples", &self.triples.len())
            .finish()
    }
}
