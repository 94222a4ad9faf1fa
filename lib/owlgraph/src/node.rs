use crate::edge::EdgeId;
use crate::error::GraphError;
use crate::index::EdgeSet;
use crate::vocab::{BLANK_NODE_PREFIX, owl, rdfs};
use std::fmt;

/// Handle to a [`Node`] stored in a [`Graph`](crate::Graph).
///
/// Handles stay valid for the graph lifetime. A node retired by a type promotion keeps its handle,
/// but it is no longer reachable from the graph indexes nor from any edge.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// The OWL construct a [typed resource](NodeKind::Resource) stands for.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ResourceKind {
    Class,
    Restriction,
    DataRange,
    Datatype,
    Property(PropertyKind),
    Individual,
    Ontology,
}

/// The flavours of [`ResourceKind::Property`].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PropertyKind {
    /// A property whose only known type is a characteristic like `owl:FunctionalProperty`.
    Generic,
    Datatype,
    Object,
    Annotation,
    Ontology,
}

impl ResourceKind {
    /// The type node URI every resource of this kind points to, if the kind has a fixed one.
    ///
    /// Individuals and generic properties take their type from the document.
    pub const fn canonical_type(self) -> Option<&'static str> {
        match self {
            Self::Class => Some(owl::CLASS),
            Self::Restriction => Some(owl::RESTRICTION),
            Self::DataRange => Some(owl::DATA_RANGE),
            Self::Datatype => Some(rdfs::DATATYPE),
            Self::Property(PropertyKind::Datatype) => Some(owl::DATATYPE_PROPERTY),
            Self::Property(PropertyKind::Object) => Some(owl::OBJECT_PROPERTY),
            Self::Property(PropertyKind::Annotation) => Some(owl::ANNOTATION_PROPERTY),
            Self::Property(PropertyKind::Ontology) => Some(owl::ONTOLOGY_PROPERTY),
            Self::Ontology => Some(owl::ONTOLOGY),
            Self::Property(PropertyKind::Generic) | Self::Individual => None,
        }
    }

    #[inline]
    pub const fn is_property(self) -> bool {
        matches!(self, Self::Property(_))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Class => "class",
            Self::Restriction => "restriction",
            Self::DataRange => "data range",
            Self::Datatype => "datatype",
            Self::Property(PropertyKind::Generic) => "property",
            Self::Property(PropertyKind::Datatype) => "datatype property",
            Self::Property(PropertyKind::Object) => "object property",
            Self::Property(PropertyKind::Annotation) => "annotation property",
            Self::Property(PropertyKind::Ontology) => "ontology property",
            Self::Individual => "individual",
            Self::Ontology => "ontology",
        })
    }
}

/// A literal value with an optional language tag and datatype.
///
/// ```
/// use owlgraph::Literal;
///
/// let literal = Literal::new("chat", Some("fr"), None);
/// assert_eq!(literal.id(), "chat@fr");
/// let typed = Literal::new("1", None, Some("http://www.w3.org/2001/XMLSchema#integer"));
/// assert_eq!(typed.id(), "1^^http://www.w3.org/2001/XMLSchema#integer");
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Literal {
    value: String,
    language: Option<String>,
    datatype: Option<String>,
}

impl Literal {
    /// Builds a literal. Empty language tags and datatypes are treated as absent.
    pub fn new(value: impl Into<String>, language: Option<&str>, datatype: Option<&str>) -> Self {
        Self {
            value: value.into(),
            language: language.filter(|l| !l.is_empty()).map(Into::into),
            datatype: datatype.filter(|d| !d.is_empty()).map(Into::into),
        }
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[inline]
    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }

    /// The key of the literal in the graph: `value["@"lang]["^^"datatype]`.
    pub fn id(&self) -> String {
        let mut id = self.value.clone();
        if let Some(language) = &self.language {
            id.push('@');
            id.push_str(language);
        }
        if let Some(datatype) = &self.datatype {
            id.push_str("^^");
            id.push_str(datatype);
        }
        id
    }
}

/// The closed set of node kinds.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A node whose OWL construct is not known.
    Plain,
    Literal(Literal),
    /// A typed OWL construct. `type_edge` is its `rdf:type` edge to the type node.
    Resource {
        kind: ResourceKind,
        type_edge: EdgeId,
    },
    /// An RDF list, stored as the ordered sequence of its members.
    Collection(Vec<NodeId>),
}

/// A node of the ontology graph.
#[derive(Debug, Clone)]
pub struct Node {
    uri: String,
    language: Option<String>,
    parent_edges: EdgeSet,
    child_edges: EdgeSet,
    kind: NodeKind,
}

impl Node {
    pub(crate) fn new(uri: impl Into<String>, kind: NodeKind) -> Self {
        let language = if let NodeKind::Literal(literal) = &kind {
            literal.language().map(Into::into)
        } else {
            None
        };
        Self {
            uri: uri.into(),
            language,
            parent_edges: EdgeSet::default(),
            child_edges: EdgeSet::default(),
            kind,
        }
    }

    /// The node URI. For literals it is the literal [ID](Literal::id).
    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Incoming edges, in attachment order.
    #[inline]
    pub fn parent_edges(&self) -> &EdgeSet {
        &self.parent_edges
    }

    /// Outgoing edges, in attachment order.
    #[inline]
    pub fn child_edges(&self) -> &EdgeSet {
        &self.child_edges
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the construct kind if this node is a typed resource.
    #[inline]
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        if let NodeKind::Resource { kind, .. } = self.kind {
            Some(kind)
        } else {
            None
        }
    }

    /// The distinguished `rdf:type` edge of a typed resource.
    #[inline]
    pub fn type_edge(&self) -> Option<EdgeId> {
        if let NodeKind::Resource { type_edge, .. } = self.kind {
            Some(type_edge)
        } else {
            None
        }
    }

    #[inline]
    pub fn as_literal(&self) -> Option<&Literal> {
        if let NodeKind::Literal(literal) = &self.kind {
            Some(literal)
        } else {
            None
        }
    }

    /// The ordered members if this node is a collection.
    #[inline]
    pub fn collection_members(&self) -> Option<&[NodeId]> {
        if let NodeKind::Collection(members) = &self.kind {
            Some(members)
        } else {
            None
        }
    }

    /// Blank nodes are the ones with a synthesized `blankID:` URI.
    #[inline]
    pub fn is_anonymous(&self) -> bool {
        is_blank_uri(&self.uri)
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal(_))
    }

    #[inline]
    pub fn is_collection(&self) -> bool {
        matches!(self.kind, NodeKind::Collection(_))
    }

    /// Returns `true` if the node is a plain node, a literal or a collection rather than a typed resource.
    #[inline]
    pub fn is_untyped(&self) -> bool {
        self.type_edge().is_none()
    }

    pub(crate) fn set_language(&mut self, language: Option<String>) {
        self.language = language;
    }

    pub(crate) fn parent_edges_mut(&mut self) -> &mut EdgeSet {
        &mut self.parent_edges
    }

    pub(crate) fn child_edges_mut(&mut self) -> &mut EdgeSet {
        &mut self.child_edges
    }

    pub(crate) fn collection_members_mut(&mut self) -> Result<&mut Vec<NodeId>, GraphError> {
        if let NodeKind::Collection(members) = &mut self.kind {
            Ok(members)
        } else {
            Err(GraphError::NotACollection {
                uri: self.uri.clone(),
            })
        }
    }
}

/// Checks if the URI is a synthesized blank node URI.
#[inline]
pub fn is_blank_uri(uri: &str) -> bool {
    uri.starts_with(BLANK_NODE_PREFIX)
}
