use crate::node::NodeId;
use std::fmt;

/// Handle to an [`Edge`] stored in a [`Graph`](crate::Graph).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct EdgeId(usize);

impl EdgeId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A statement `parent --predicate--> child`.
///
/// An edge is attached to at most one parent node and at most one child node at a time.
/// Its endpoints are changed through the attachment operations of [`Graph`](crate::Graph).
#[derive(Debug, Clone)]
pub struct Edge {
    predicate: String,
    language: Option<String>,
    parent: Option<NodeId>,
    child: Option<NodeId>,
}

impl Edge {
    pub(crate) fn new(predicate: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            language: None,
            parent: None,
            child: None,
        }
    }

    /// The predicate URI.
    #[inline]
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// The language tag in scope for this edge, if any.
    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// The node this edge starts from.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The node this edge points to.
    #[inline]
    pub fn child(&self) -> Option<NodeId> {
        self.child
    }

    pub(crate) fn set_language(&mut self, language: Option<String>) {
        self.language = language;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) -> Option<NodeId> {
        std::mem::replace(&mut self.parent, parent)
    }

    pub(crate) fn set_child(&mut self, child: Option<NodeId>) -> Option<NodeId> {
        std::mem::replace(&mut self.child, child)
    }
}
