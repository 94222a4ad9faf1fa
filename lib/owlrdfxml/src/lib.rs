//! OwlRdfXml maps OWL ontologies written in [RDF/XML](https://www.w3.org/TR/owl-ref/#RDFSyntax)
//! to an [`owlgraph::Graph`] and back.
//!
//! The [`OwlXmlParser`] walks an XML element tree and builds the graph, promoting nodes to classes,
//! properties or individuals as the document reveals their kind.
//! The [`OwlXmlGenerator`] writes a graph back as an element tree.
//! Problems are collected as [`Diagnostics`] unless a stop flag turns them into an error.
//!
//! Parsing and writing back an ontology:
//! ```
//! use owlrdfxml::{OwlXmlGenerator, OwlXmlParser};
//!
//! let file = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//!     xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
//!     xmlns:owl="http://www.w3.org/2002/07/owl#"
//!     xml:base="http://example.com/zoo">
//!  <owl:Class rdf:ID="Dog">
//!    <rdfs:label xml:lang="en">Dog</rdfs:label>
//!  </owl:Class>
//! </rdf:RDF>"#;
//!
//! let outcome = OwlXmlParser::new().parse_reader(file.as_bytes())?;
//! let mut buffer = Vec::new();
//! OwlXmlGenerator::new().generate_to_writer(&outcome.graph, &mut buffer)?;
//! let xml = String::from_utf8_lossy(&buffer);
//! assert!(xml.contains(r#"<owl:Class rdf:ID="Dog">"#));
//! assert!(xml.contains(r#"<rdfs:label rdf:datatype="" xml:lang="en">Dog</rdfs:label>"#));
//! # Result::<_, owlrdfxml::OwlXmlError>::Ok(())
//! ```

mod diagnostics;
mod error;
mod generator;
mod names;
mod parser;
mod tree;
mod uri;

pub use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use crate::error::OwlXmlError;
pub use crate::generator::{GeneratedDocument, OwlXmlGenerator};
pub use crate::parser::{OwlXmlParser, ParseOutcome};
pub use crate::tree::{XMLNS_NAMESPACE, XmlAttribute, XmlDocument, XmlElement, XmlNode};
pub use crate::uri::{prepend_base, qualify};
