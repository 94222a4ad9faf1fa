use crate::diagnostics::Diagnostic;
use owlgraph::GraphError;
use std::io;
use std::sync::Arc;

/// Error returned when parsing or generating an OWL RDF/XML document fails.
///
/// Recoverable problems are reported as [diagnostics](crate::Diagnostics) instead.
/// [`Invalid`](Self::Invalid) is only returned when a stop flag turns a diagnostic into a failure.
#[derive(Debug, thiserror::Error)]
pub enum OwlXmlError {
    /// I/O error while reading or writing the XML document.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The document is not well-formed XML.
    #[error(transparent)]
    Xml(quick_xml::Error),
    /// The XML document structure can not be turned into an element tree.
    #[error("{0}")]
    Syntax(String),
    /// A diagnostic raised because of `stop_on_errors` or `stop_on_warnings`.
    #[error(transparent)]
    Invalid(#[from] Diagnostic),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl OwlXmlError {
    #[inline]
    pub(crate) fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }
}

impl From<quick_xml::Error> for OwlXmlError {
    #[inline]
    fn from(error: quick_xml::Error) -> Self {
        match error {
            quick_xml::Error::Io(error) => {
                Self::Io(Arc::try_unwrap(error).unwrap_or_else(|e| io::Error::new(e.kind(), e)))
            }
            _ => Self::Xml(error),
        }
    }
}

impl From<OwlXmlError> for io::Error {
    #[inline]
    fn from(error: OwlXmlError) -> Self {
        match error {
            OwlXmlError::Io(error) => error,
            OwlXmlError::Xml(error) => Self::new(io::ErrorKind::InvalidData, error),
            OwlXmlError::Syntax(error) => Self::new(io::ErrorKind::InvalidData, error),
            OwlXmlError::Invalid(error) => Self::new(io::ErrorKind::InvalidData, error),
            OwlXmlError::Graph(error) => Self::new(io::ErrorKind::InvalidInput, error),
        }
    }
}
