/// An error raised by a [`Graph`](crate::Graph) operation applied to the wrong kind of entity.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Namespace declarations are keyed by a non-empty attribute name.
    #[error("A namespace declaration must have a non-empty name")]
    EmptyNamespaceName,
    /// A collection operation was applied to a node that is not a collection.
    #[error("The node {uri} is not a collection")]
    NotACollection { uri: String },
}
