//! OwlGraph is the in-memory data model of an OWL ontology as it is written in RDF/XML.
//!
//! The graph keeps every statement of the document as an [`Edge`] between two [`Node`]s.
//! Nodes whose OWL construct is known are typed resources ([classes](ResourceKind::Class),
//! [properties](ResourceKind::Property), [individuals](ResourceKind::Individual)...), and a node is
//! promoted in place when a later statement reveals its kind.
//!
//! Nodes and edges are owned by the [`Graph`] and manipulated through [`NodeId`] and [`EdgeId`] handles.
//!
//! Usage example:
//! ```
//! use owlgraph::vocab::rdfs;
//! use owlgraph::Graph;
//!
//! let mut graph = Graph::new();
//! let dog = graph.add_node("http://example.com/zoo#Dog");
//! let label = graph.add_literal("Dog", Some("en"), None);
//! let edge = graph.new_edge(rdfs::LABEL);
//! graph.attach_parent_node(edge, dog);
//! graph.attach_child_node(edge, label);
//! graph.add_edge(edge);
//!
//! assert!(graph.node(dog).child_edges().contains(edge));
//! assert_eq!(graph.get("Dog@en"), Some(label));
//! ```

mod edge;
mod error;
mod graph;
mod index;
mod namespace;
mod node;
mod visitor;
pub mod vocab;

pub use crate::edge::{Edge, EdgeId};
pub use crate::error::GraphError;
pub use crate::graph::Graph;
pub use crate::index::{EdgeSet, NodeSet};
pub use crate::namespace::Namespaces;
pub use crate::node::{Literal, Node, NodeId, NodeKind, PropertyKind, ResourceKind, is_blank_uri};
pub use crate::visitor::Visitor;
