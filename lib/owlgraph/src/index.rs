//! Ordered, indexed collections of graph entities.

use crate::edge::EdgeId;
use crate::node::NodeId;
use rustc_hash::{FxHashMap, FxHashSet};
use std::iter::Copied;
use std::slice;

/// An ordered set of edges, also indexed by predicate URI.
///
/// Used for the incoming and outgoing edges of each node and for the graph-wide edge index.
/// Several edges may share a predicate: a class can have many `rdfs:subClassOf` edges.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    order: Vec<EdgeId>,
    members: FxHashSet<EdgeId>,
    by_predicate: FxHashMap<String, Vec<EdgeId>>,
}

impl EdgeSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The edges in insertion order.
    #[inline]
    pub fn iter(&self) -> Copied<slice::Iter<'_, EdgeId>> {
        self.order.iter().copied()
    }

    /// The `index`-th edge in insertion order.
    #[inline]
    pub fn nth(&self, index: usize) -> Option<EdgeId> {
        self.order.get(index).copied()
    }

    #[inline]
    pub fn contains(&self, edge: EdgeId) -> bool {
        self.members.contains(&edge)
    }

    #[inline]
    pub fn contains_predicate(&self, predicate: &str) -> bool {
        self.by_predicate.contains_key(predicate)
    }

    /// The edges with the given predicate, in insertion order.
    pub fn for_predicate(&self, predicate: &str) -> &[EdgeId] {
        self.by_predicate.get(predicate).map_or(&[], Vec::as_slice)
    }

    /// Adds the edge at the end. Returns `false` if it was already there.
    pub(crate) fn insert(&mut self, predicate: &str, edge: EdgeId) -> bool {
        if !self.members.insert(edge) {
            return false;
        }
        self.order.push(edge);
        self.by_predicate
            .entry(predicate.into())
            .or_default()
            .push(edge);
        true
    }

    /// Removes the edge. Returns `false` if it was not there.
    pub(crate) fn remove(&mut self, predicate: &str, edge: EdgeId) -> bool {
        if !self.members.remove(&edge) {
            return false;
        }
        self.order.retain(|e| *e != edge);
        if let Some(bucket) = self.by_predicate.get_mut(predicate) {
            bucket.retain(|e| *e != edge);
            if bucket.is_empty() {
                self.by_predicate.remove(predicate);
            }
        }
        true
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = EdgeId;
    type IntoIter = Copied<slice::Iter<'a, EdgeId>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An ordered map from URI to node.
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    order: Vec<NodeId>,
    by_uri: FxHashMap<String, NodeId>,
}

impl NodeSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[inline]
    pub fn get(&self, uri: &str) -> Option<NodeId> {
        self.by_uri.get(uri).copied()
    }

    #[inline]
    pub fn contains(&self, uri: &str) -> bool {
        self.by_uri.contains_key(uri)
    }

    /// The nodes in insertion order.
    #[inline]
    pub fn iter(&self) -> Copied<slice::Iter<'_, NodeId>> {
        self.order.iter().copied()
    }

    #[inline]
    pub fn nth(&self, index: usize) -> Option<NodeId> {
        self.order.get(index).copied()
    }

    /// Indexes the node under `uri`. Does nothing and returns `false` if the URI is already taken.
    pub(crate) fn insert(&mut self, uri: &str, node: NodeId) -> bool {
        if self.by_uri.contains_key(uri) {
            return false;
        }
        self.by_uri.insert(uri.into(), node);
        self.order.push(node);
        true
    }

    /// Unindexes `uri` only if it currently maps to `node`.
    pub(crate) fn remove(&mut self, uri: &str, node: NodeId) -> bool {
        if self.by_uri.get(uri) != Some(&node) {
            return false;
        }
        self.by_uri.remove(uri);
        self.order.retain(|n| *n != node);
        true
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = NodeId;
    type IntoIter = Copied<slice::Iter<'a, NodeId>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
