//! The [`Graph`] arena and its indexes.
//!
//! Nodes and edges live in two arenas owned by the graph and refer to each other through
//! [`NodeId`] and [`EdgeId`] handles.
//! Three indexes sit on top of the arenas:
//! * the nodes, keyed by URI (literals excluded),
//! * the literals, keyed by their [ID](crate::Literal::id),
//! * the edges, in insertion order and by predicate.
//!
//! Usage example:
//! ```
//! use owlgraph::vocab::{owl, rdfs};
//! use owlgraph::{Graph, ResourceKind};
//!
//! let mut graph = Graph::new();
//! let animal = graph.add_node("http://example.com/zoo#Animal");
//! let dog = graph.resolve_resource(
//!     Some("http://example.com/zoo#Dog"),
//!     ResourceKind::Class,
//!     owl::CLASS,
//! );
//! let edge = graph.new_edge(rdfs::SUB_CLASS_OF);
//! graph.attach_parent_node(edge, dog);
//! graph.attach_child_node(edge, animal);
//! graph.add_edge(edge);
//!
//! // Animal turns out to be a class too: it is promoted and keeps its incoming edge
//! let promoted = graph.resolve_resource(
//!     Some("http://example.com/zoo#Animal"),
//!     ResourceKind::Class,
//!     owl::CLASS,
//! );
//! assert_ne!(promoted, animal);
//! assert_eq!(graph.edge(edge).child(), Some(promoted));
//! assert_eq!(graph.get("http://example.com/zoo#Animal"), Some(promoted));
//! ```

use crate::edge::{Edge, EdgeId};
use crate::error::GraphError;
use crate::index::{EdgeSet, NodeSet};
use crate::namespace::Namespaces;
use crate::node::{Literal, Node, NodeId, NodeKind, PropertyKind, ResourceKind};
use crate::visitor::{Visitor, dispatch};
use crate::vocab::{BLANK_NODE_PREFIX, rdf};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

const FIRST_BLANK_ID: u64 = 10_000;

/// An in-memory ontology graph.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: NodeSet,
    literal_index: NodeSet,
    edge_index: EdgeSet,
    namespaces: Namespaces,
    next_blank_id: u64,
    generated_blank_uris: FxHashSet<String>,
    memberships: FxHashMap<NodeId, Vec<NodeId>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            node_index: NodeSet::default(),
            literal_index: NodeSet::default(),
            edge_index: EdgeSet::default(),
            namespaces: Namespaces::default(),
            next_blank_id: FIRST_BLANK_ID,
            generated_blank_uris: FxHashSet::default(),
            memberships: FxHashMap::default(),
        }
    }
}

impl Graph {
    /// Creates an empty graph.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node behind a handle.
    ///
    /// Panics if the handle comes from another graph.
    #[inline]
    pub fn node(&self, node: NodeId) -> &Node {
        &self.nodes[node.index()]
    }

    /// Returns the edge behind a handle.
    ///
    /// Panics if the handle comes from another graph.
    #[inline]
    pub fn edge(&self, edge: EdgeId) -> &Edge {
        &self.edges[edge.index()]
    }

    /// The non-literal nodes, keyed by URI.
    #[inline]
    pub fn nodes(&self) -> &NodeSet {
        &self.node_index
    }

    /// The literals, keyed by literal ID.
    #[inline]
    pub fn literals(&self) -> &NodeSet {
        &self.literal_index
    }

    /// The indexed edges.
    #[inline]
    pub fn edges(&self) -> &EdgeSet {
        &self.edge_index
    }

    #[inline]
    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    #[inline]
    pub fn namespaces_mut(&mut self) -> &mut Namespaces {
        &mut self.namespaces
    }

    /// Looks up a node by URI, then a literal by ID.
    pub fn get(&self, uri: &str) -> Option<NodeId> {
        self.node_index
            .get(uri)
            .or_else(|| self.literal_index.get(uri))
    }

    #[inline]
    pub fn node_id(&self, uri: &str) -> Option<NodeId> {
        self.node_index.get(uri)
    }

    #[inline]
    pub fn literal_id(&self, id: &str) -> Option<NodeId> {
        self.literal_index.get(id)
    }

    /// Checks if the node is reachable from the node or literal index.
    ///
    /// Nodes retired by a type promotion and nodes never inserted are not.
    pub fn is_indexed(&self, node: NodeId) -> bool {
        let n = self.node(node);
        let index = if n.is_literal() {
            &self.literal_index
        } else {
            &self.node_index
        };
        index.get(n.uri()) == Some(node)
    }

    /// Returns the node with this URI, creating and indexing a plain node if there is none.
    pub fn add_node(&mut self, uri: &str) -> NodeId {
        if let Some(node) = self.node_index.get(uri) {
            return node;
        }
        let node = self.push_node(Node::new(uri, NodeKind::Plain));
        self.node_index.insert(uri, node);
        node
    }

    /// Creates a plain node without indexing it. See [`insert_node`](Self::insert_node).
    pub fn new_node(&mut self, uri: impl Into<String>) -> NodeId {
        self.push_node(Node::new(uri, NodeKind::Plain))
    }

    /// Creates a typed resource without indexing it.
    ///
    /// Its type edge to the `type_uri` node is created, attached and indexed.
    pub fn new_resource(
        &mut self,
        uri: impl Into<String>,
        kind: ResourceKind,
        type_uri: &str,
    ) -> NodeId {
        let type_node = self.add_node(type_uri);
        let type_edge = self.push_edge(Edge::new(rdf::TYPE));
        let node = self.push_node(Node::new(uri, NodeKind::Resource { kind, type_edge }));
        self.attach_parent_node(type_edge, node);
        self.attach_child_node(type_edge, type_node);
        self.add_edge(type_edge);
        node
    }

    /// Creates an empty collection.
    ///
    /// Collections are reached through the edges pointing to them and are not indexed
    /// unless [`insert_node`](Self::insert_node) is called.
    pub fn new_collection(&mut self, uri: impl Into<String>) -> NodeId {
        self.push_node(Node::new(uri, NodeKind::Collection(Vec::new())))
    }

    /// Indexes a node created by one of the `new_*` constructors.
    ///
    /// If another node is already indexed under the same URI, nothing happens and `false` is returned:
    /// the existing node stays the one the URI resolves to.
    pub fn insert_node(&mut self, node: NodeId) -> bool {
        let n = &self.nodes[node.index()];
        let inserted = if n.is_literal() {
            self.literal_index.insert(n.uri(), node)
        } else {
            self.node_index.insert(n.uri(), node)
        };
        if !inserted {
            debug!("{} is already indexed, ignoring {node}", n.uri());
        }
        inserted
    }

    /// Returns the literal with this value, language tag and datatype, creating it if needed.
    ///
    /// Empty language tags and datatypes are treated as absent.
    pub fn add_literal(
        &mut self,
        value: impl Into<String>,
        language: Option<&str>,
        datatype: Option<&str>,
    ) -> NodeId {
        let literal = Literal::new(value, language, datatype);
        let id = literal.id();
        if let Some(node) = self.literal_index.get(&id) {
            return node;
        }
        let node = self.push_node(Node::new(id.clone(), NodeKind::Literal(literal)));
        self.literal_index.insert(&id, node);
        node
    }

    /// Creates a detached edge without indexing it.
    pub fn new_edge(&mut self, predicate: impl Into<String>) -> EdgeId {
        self.push_edge(Edge::new(predicate))
    }

    /// Indexes an edge. Returns `false` if it was already indexed.
    pub fn add_edge(&mut self, edge: EdgeId) -> bool {
        self.edge_index
            .insert(self.edges[edge.index()].predicate(), edge)
    }

    /// Removes a node from its index.
    ///
    /// The edges attached to it are left untouched: detach them first.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        let n = &self.nodes[node.index()];
        if n.is_literal() {
            self.literal_index.remove(n.uri(), node)
        } else {
            self.node_index.remove(n.uri(), node)
        }
    }

    /// Removes an edge from the edge index.
    ///
    /// The edge stays attached to its nodes: detach it first.
    pub fn remove_edge(&mut self, edge: EdgeId) -> bool {
        self.edge_index
            .remove(self.edges[edge.index()].predicate(), edge)
    }

    pub fn set_node_language(&mut self, node: NodeId, language: Option<&str>) {
        self.nodes[node.index()].set_language(language.map(Into::into));
    }

    pub fn set_edge_language(&mut self, edge: EdgeId, language: Option<&str>) {
        self.edges[edge.index()].set_language(language.map(Into::into));
    }

    /// Generates a new blank node URI `blankID:<n>`.
    ///
    /// URIs already used by a node of the graph are skipped.
    pub fn fresh_blank_uri(&mut self) -> String {
        loop {
            let uri = format!("{BLANK_NODE_PREFIX}{}", self.next_blank_id);
            self.next_blank_id += 1;
            if !self.node_index.contains(&uri) {
                self.generated_blank_uris.insert(uri.clone());
                return uri;
            }
        }
    }

    /// The blank node URI `blankID:<name>` for an explicitly named blank node.
    pub fn named_blank_uri(name: &str) -> String {
        format!("{BLANK_NODE_PREFIX}{name}")
    }

    /// Checks if the URI was produced by [`fresh_blank_uri`](Self::fresh_blank_uri).
    pub fn is_generated_blank_uri(&self, uri: &str) -> bool {
        self.generated_blank_uris.contains(uri)
    }

    /// Returns the resource of the given kind for this URI, creating or promoting it if needed.
    ///
    /// * Without URI a fresh blank node is created.
    /// * If the URI already names a node of the same kind, that node is returned.
    ///   If the requested type differs from the type it has (individuals of several classes),
    ///   an extra `rdf:type` edge records it.
    /// * A generic property requested for any existing property keeps the existing node
    ///   and records the extra type the same way.
    /// * Otherwise the existing node is [promoted](Self::promote).
    pub fn resolve_resource(
        &mut self,
        uri: Option<&str>,
        kind: ResourceKind,
        type_uri: &str,
    ) -> NodeId {
        let uri = match uri {
            Some(uri) => uri.to_owned(),
            None => self.fresh_blank_uri(),
        };
        let Some(existing) = self.node_index.get(&uri) else {
            let node = self.new_resource(uri.as_str(), kind, type_uri);
            self.node_index.insert(&uri, node);
            return node;
        };
        let current = self.node(existing).resource_kind();
        let keep = current == Some(kind)
            || (kind == ResourceKind::Property(PropertyKind::Generic)
                && current.is_some_and(ResourceKind::is_property));
        if keep {
            self.add_type_statement(existing, type_uri);
            return existing;
        }
        self.promote(existing, kind, type_uri)
    }

    /// Replaces a node by a new typed resource with the same URI.
    ///
    /// Every edge attached to the old node is moved to the new one, in order, after the new type edge.
    /// Collections listing the old node list the new one instead.
    /// The old node is retired from the index: its handle stays valid but nothing refers to it anymore.
    pub fn promote(&mut self, node: NodeId, kind: ResourceKind, type_uri: &str) -> NodeId {
        let uri = self.node(node).uri().to_owned();
        let language = self.node(node).language().map(ToOwned::to_owned);
        let promoted = self.new_resource(uri.as_str(), kind, type_uri);
        self.nodes[promoted.index()].set_language(language);
        self.move_edges(node, promoted);
        if let Some(collections) = self.memberships.remove(&node) {
            for collection in &collections {
                if let Ok(members) = self.nodes[collection.index()].collection_members_mut() {
                    for member in members.iter_mut().filter(|m| **m == node) {
                        *member = promoted;
                    }
                }
            }
            self.memberships.insert(promoted, collections);
        }
        if self.node_index.remove(&uri, node) {
            self.node_index.insert(&uri, promoted);
        }
        debug!("Promoted {uri} to {kind}");
        promoted
    }

    /// Adds an `rdf:type` edge from `node` to the `type_uri` node unless one already exists.
    ///
    /// Returns the new edge.
    pub fn add_type_statement(&mut self, node: NodeId, type_uri: &str) -> Option<EdgeId> {
        let type_node = self.add_node(type_uri);
        if self.has_child_edge(node, rdf::TYPE, type_node) {
            return None;
        }
        let edge = self.new_edge(rdf::TYPE);
        self.attach_parent_node(edge, node);
        self.attach_child_node(edge, type_node);
        self.add_edge(edge);
        Some(edge)
    }

    /// Checks if `parent` has an outgoing edge with this predicate to `child`.
    pub fn has_child_edge(&self, parent: NodeId, predicate: &str, child: NodeId) -> bool {
        self.node(parent)
            .child_edges()
            .for_predicate(predicate)
            .iter()
            .any(|e| self.edge(*e).child() == Some(child))
    }

    /// Appends a member to a collection.
    pub fn collection_push(
        &mut self,
        collection: NodeId,
        member: NodeId,
    ) -> Result<(), GraphError> {
        self.collection_members_mut(collection)?.push(member);
        self.memberships.entry(member).or_default().push(collection);
        Ok(())
    }

    /// Removes the first occurrence of a member. Returns `false` if it is not a member.
    pub fn collection_remove(
        &mut self,
        collection: NodeId,
        member: NodeId,
    ) -> Result<bool, GraphError> {
        let members = self.collection_members_mut(collection)?;
        let Some(position) = members.iter().position(|m| *m == member) else {
            return Ok(false);
        };
        members.remove(position);
        self.forget_membership(collection, member);
        Ok(true)
    }

    /// Removes every occurrence of a member and returns how many there were.
    pub fn collection_remove_all(
        &mut self,
        collection: NodeId,
        member: NodeId,
    ) -> Result<usize, GraphError> {
        let members = self.collection_members_mut(collection)?;
        let before = members.len();
        members.retain(|m| *m != member);
        let removed = before - members.len();
        for _ in 0..removed {
            self.forget_membership(collection, member);
        }
        Ok(removed)
    }

    /// The ordered members of a collection.
    pub fn collection_members(&self, collection: NodeId) -> Result<&[NodeId], GraphError> {
        let node = self.node(collection);
        node.collection_members()
            .ok_or_else(|| GraphError::NotACollection {
                uri: node.uri().into(),
            })
    }

    /// The collections `node` is a member of, once per membership.
    pub fn memberships(&self, node: NodeId) -> &[NodeId] {
        self.memberships.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Copies the nodes of `source` and their outgoing edges into this graph, matching nodes by URI.
    ///
    /// Literals are recreated with [`add_literal`](Self::add_literal) so equal literals are shared.
    /// Typed resources are copied as plain nodes: their type survives as an `rdf:type` edge.
    /// If `skip_duplicate_edges` is set, an edge is not copied when the destination parent already has
    /// an edge with the same predicate to the same child.
    pub fn merge(&mut self, source: &Self, skip_duplicate_edges: bool) {
        for source_node in source.nodes() {
            let parent = self.add_node(source.node(source_node).uri());
            for source_edge in source.node(source_node).child_edges() {
                let source_edge = source.edge(source_edge);
                let Some(source_child) = source_edge.child() else {
                    continue;
                };
                let child = self.import_node(source, source_child);
                if skip_duplicate_edges
                    && self.has_child_edge(parent, source_edge.predicate(), child)
                {
                    continue;
                }
                let edge = self.new_edge(source_edge.predicate());
                self.set_edge_language(edge, source_edge.language());
                self.attach_parent_node(edge, parent);
                self.attach_child_node(edge, child);
                self.add_edge(edge);
            }
        }
    }

    /// Calls the `visitor` method matching the kind of `node`.
    pub fn accept<C: ?Sized, V: Visitor<C> + ?Sized>(
        &self,
        node: NodeId,
        visitor: &mut V,
        context: &mut C,
    ) -> Result<(), V::Error> {
        dispatch(self, node, visitor, context)
    }

    /// Attaches `edge` as an outgoing edge of `node`, detaching it from its previous parent.
    ///
    /// Same as [`attach_parent_node`](Self::attach_parent_node) seen from the node side.
    #[inline]
    pub fn attach_child_edge(&mut self, node: NodeId, edge: EdgeId) {
        self.attach_parent_node(edge, node);
    }

    /// Attaches `edge` as an incoming edge of `node`, detaching it from its previous child.
    ///
    /// If `node` already has an incoming edge with the same predicate coming from the same parent,
    /// nothing happens and `false` is returned. Edges without parent share the same missing parent.
    pub fn attach_parent_edge(&mut self, node: NodeId, edge: EdgeId) -> bool {
        let e = self.edge(edge);
        let incoming = self.node(node).parent_edges();
        let duplicate = incoming.contains(edge)
            || incoming
                .for_predicate(e.predicate())
                .iter()
                .any(|other| self.edge(*other).parent() == e.parent());
        if duplicate {
            return false;
        }
        self.attach_child_node(edge, node);
        true
    }

    /// Makes `node` the child of `edge`, detaching the previous child.
    pub fn attach_child_node(&mut self, edge: EdgeId, node: NodeId) {
        self.detach_child_node(edge);
        let e = &mut self.edges[edge.index()];
        e.set_child(Some(node));
        self.nodes[node.index()]
            .parent_edges_mut()
            .insert(e.predicate(), edge);
    }

    /// Makes `node` the parent of `edge`, detaching the previous parent.
    pub fn attach_parent_node(&mut self, edge: EdgeId, node: NodeId) {
        self.detach_parent_node(edge);
        let e = &mut self.edges[edge.index()];
        e.set_parent(Some(node));
        self.nodes[node.index()]
            .child_edges_mut()
            .insert(e.predicate(), edge);
    }

    /// Detaches `edge` from the outgoing edges of `node`. Returns the edge if it was attached there.
    pub fn detach_child_edge(&mut self, node: NodeId, edge: EdgeId) -> Option<EdgeId> {
        if self.edge(edge).parent() != Some(node) {
            return None;
        }
        self.detach_parent_node(edge).map(|_| edge)
    }

    /// Detaches `edge` from the incoming edges of `node`. Returns the edge if it was attached there.
    pub fn detach_parent_edge(&mut self, node: NodeId, edge: EdgeId) -> Option<EdgeId> {
        if self.edge(edge).child() != Some(node) {
            return None;
        }
        self.detach_child_node(edge).map(|_| edge)
    }

    /// Detaches the child of `edge` and returns it.
    pub fn detach_child_node(&mut self, edge: EdgeId) -> Option<NodeId> {
        let e = &mut self.edges[edge.index()];
        let child = e.set_child(None)?;
        self.nodes[child.index()]
            .parent_edges_mut()
            .remove(e.predicate(), edge);
        Some(child)
    }

    /// Detaches the parent of `edge` and returns it.
    pub fn detach_parent_node(&mut self, edge: EdgeId) -> Option<NodeId> {
        let e = &mut self.edges[edge.index()];
        let parent = e.set_parent(None)?;
        self.nodes[parent.index()]
            .child_edges_mut()
            .remove(e.predicate(), edge);
        Some(parent)
    }

    /// Re-links every incoming and outgoing edge of `source` to `destination`, keeping their order.
    pub fn move_edges(&mut self, source: NodeId, destination: NodeId) {
        if source == destination {
            return;
        }
        let incoming = self.node(source).parent_edges().iter().collect::<Vec<_>>();
        for edge in incoming {
            self.attach_child_node(edge, destination);
        }
        let outgoing = self.node(source).child_edges().iter().collect::<Vec<_>>();
        for edge in outgoing {
            self.attach_parent_node(edge, destination);
        }
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn push_edge(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId::new(self.edges.len());
        self.edges.push(edge);
        id
    }

    fn collection_members_mut(
        &mut self,
        collection: NodeId,
    ) -> Result<&mut Vec<NodeId>, GraphError> {
        self.nodes[collection.index()].collection_members_mut()
    }

    fn forget_membership(&mut self, collection: NodeId, member: NodeId) {
        if let Some(collections) = self.memberships.get_mut(&member) {
            if let Some(position) = collections.iter().position(|c| *c == collection) {
                collections.remove(position);
            }
        }
    }

    fn import_node(&mut self, source: &Self, node: NodeId) -> NodeId {
        let n = source.node(node);
        match n.kind() {
            NodeKind::Literal(literal) => {
                self.add_literal(literal.value(), literal.language(), literal.datatype())
            }
            NodeKind::Collection(members) => {
                let members = members
                    .iter()
                    .map(|member| self.import_node(source, *member))
                    .collect::<Vec<_>>();
                let collection =
                    self.push_node(Node::new(n.uri(), NodeKind::Collection(members.clone())));
                for member in members {
                    self.memberships.entry(member).or_default().push(collection);
                }
                collection
            }
            NodeKind::Plain | NodeKind::Resource { .. } => self.add_node(n.uri()),
        }
    }
}
