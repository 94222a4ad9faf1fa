use crate::diagnostics::{DiagnosticKind, Diagnostics, Reporter};
use crate::error::OwlXmlError;
use crate::names::{is_nc_name, split_uri};
use crate::tree::{XmlAttribute, XmlDocument, XmlElement, XmlNode};
use crate::uri::relative_reference;
use owlgraph::vocab::{BLANK_NODE_PREFIX, owl, rdf, rdfs, xml};
use owlgraph::{EdgeId, Graph, Namespaces, NodeId, NodeKind, ResourceKind, Visitor};
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::Write;
use tracing::trace;

/// Writes a [`Graph`] as an OWL [RDF/XML](https://www.w3.org/TR/owl-ref/#RDFSyntax) element tree.
///
/// Every named node with statements becomes a top-level element. Anonymous nodes are written
/// inline where they are first referenced and named objects are referenced with `rdf:resource`.
///
/// ```
/// use owlgraph::vocab::{owl, rdfs};
/// use owlgraph::{Graph, ResourceKind};
/// use owlrdfxml::OwlXmlGenerator;
///
/// let mut graph = Graph::new();
/// graph.namespaces_mut().set_base("http://example.com/zoo");
/// let dog = graph.resolve_resource(Some("http://example.com/zoo#Dog"), ResourceKind::Class, owl::CLASS);
/// let animal = graph.resolve_resource(Some("http://example.com/zoo#Animal"), ResourceKind::Class, owl::CLASS);
/// let edge = graph.new_edge(rdfs::SUB_CLASS_OF);
/// graph.attach_parent_node(edge, dog);
/// graph.attach_child_node(edge, animal);
/// graph.add_edge(edge);
///
/// let generated = OwlXmlGenerator::new().generate(&graph)?;
/// let xml = generated.document.to_xml_string()?;
/// assert!(xml.contains(r##"<owl:Class rdf:ID="Dog">"##));
/// assert!(xml.contains(r##"<rdfs:subClassOf rdf:resource="#Animal"/>"##));
/// # Result::<_, owlrdfxml::OwlXmlError>::Ok(())
/// ```
#[derive(Clone)]
#[must_use]
pub struct OwlXmlGenerator {
    stop_on_errors: bool,
    stop_on_warnings: bool,
    indentation: Option<(u8, usize)>,
}

impl Default for OwlXmlGenerator {
    fn default() -> Self {
        Self {
            stop_on_errors: false,
            stop_on_warnings: false,
            indentation: Some((b'\t', 1)),
        }
    }
}

impl OwlXmlGenerator {
    /// Builds a new [`OwlXmlGenerator`] writing with a tab indentation.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails on the first error instead of recording it.
    #[inline]
    pub fn stop_on_errors(mut self) -> Self {
        self.stop_on_errors = true;
        self
    }

    /// Fails on the first warning instead of recording it.
    #[inline]
    pub fn stop_on_warnings(mut self) -> Self {
        self.stop_on_warnings = true;
        self
    }

    #[inline]
    pub fn stop_on_errors_enabled(&self) -> bool {
        self.stop_on_errors
    }

    #[inline]
    pub fn stop_on_warnings_enabled(&self) -> bool {
        self.stop_on_warnings
    }

    /// Indents [`generate_to_writer`](Self::generate_to_writer) output with `size` times
    /// `indent_char` per level.
    #[inline]
    pub fn with_indentation(mut self, indent_char: u8, size: usize) -> Self {
        self.indentation = Some((indent_char, size));
        self
    }

    /// Writes [`generate_to_writer`](Self::generate_to_writer) output on a single line.
    #[inline]
    pub fn without_indentation(mut self) -> Self {
        self.indentation = None;
        self
    }

    /// Builds the element tree of the graph.
    pub fn generate(&self, graph: &Graph) -> Result<GeneratedDocument, OwlXmlError> {
        let base = graph.namespaces().base().unwrap_or_default().to_owned();
        let mut renderer = Renderer {
            prefixes: prefix_table(graph.namespaces()),
            base: base.clone(),
            visited: FxHashSet::default(),
            reporter: Reporter::new(self.stop_on_errors, self.stop_on_warnings),
        };
        let root = renderer.render_graph(graph)?;
        let mut document = XmlDocument::new(root);
        if !base.is_empty() {
            document = document.with_base_uri(base);
        }
        Ok(GeneratedDocument {
            document,
            diagnostics: renderer.reporter.finish(),
        })
    }

    /// Builds the element tree of the graph and writes it.
    ///
    /// ```
    /// use owlgraph::Graph;
    /// use owlrdfxml::OwlXmlGenerator;
    ///
    /// let mut buffer = Vec::new();
    /// OwlXmlGenerator::new()
    ///     .without_indentation()
    ///     .generate_to_writer(&Graph::new(), &mut buffer)?;
    /// assert!(String::from_utf8_lossy(&buffer).starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?><rdf:RDF"));
    /// # Result::<_, owlrdfxml::OwlXmlError>::Ok(())
    /// ```
    pub fn generate_to_writer<W: Write>(
        &self,
        graph: &Graph,
        write: W,
    ) -> Result<Diagnostics, OwlXmlError> {
        let generated = self.generate(graph)?;
        generated
            .document
            .write_with_indentation(write, self.indentation)?;
        Ok(generated.diagnostics)
    }
}

/// The result of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub document: XmlDocument,
    pub diagnostics: Diagnostics,
}

/// Maps namespace URIs to their prefix, with the OWL, RDF and RDFS prefixes taking precedence.
fn prefix_table(namespaces: &Namespaces) -> FxHashMap<String, String> {
    let mut prefixes = FxHashMap::default();
    for (namespace, prefix) in [
        (owl::NAMESPACE, owl::PREFIX),
        (rdf::NAMESPACE, rdf::PREFIX),
        (rdfs::NAMESPACE, rdfs::PREFIX),
    ] {
        prefixes.insert(namespace.to_owned(), prefix.to_owned());
    }
    for (name, value) in namespaces.iter() {
        if let Some(prefix) = Namespaces::declared_prefix(name).filter(|p| !p.is_empty()) {
            if !matches!(prefix, owl::PREFIX | rdf::PREFIX | rdfs::PREFIX) {
                prefixes
                    .entry(value.to_owned())
                    .or_insert_with(|| prefix.to_owned());
            }
        }
    }
    prefixes
}

struct Renderer {
    prefixes: FxHashMap<String, String>,
    base: String,
    visited: FxHashSet<NodeId>,
    reporter: Reporter,
}

impl Renderer {
    fn render_graph(&mut self, graph: &Graph) -> Result<XmlElement, OwlXmlError> {
        let mut root = XmlElement::new(Some(rdf::PREFIX), "RDF", Some(rdf::NAMESPACE));
        for (name, value) in graph.namespaces().iter() {
            root.push_attribute(namespace_attribute(name, value));
        }
        for (namespace, prefix) in [
            (rdf::NAMESPACE, rdf::PREFIX),
            (rdfs::NAMESPACE, rdfs::PREFIX),
            (owl::NAMESPACE, owl::PREFIX),
        ] {
            if !graph.namespaces().contains(&format!("xmlns:{prefix}")) {
                root.push_attribute(XmlAttribute::namespace_declaration(prefix, namespace));
            }
        }

        for node in graph.nodes() {
            let n = graph.node(node);
            if n.is_anonymous()
                || (matches!(n.kind(), NodeKind::Plain) && n.child_edges().is_empty())
            {
                continue;
            }
            graph.accept(node, self, &mut root)?;
        }
        Ok(root)
    }

    /// Writes a node element named after `type_uri` into `parent`.
    ///
    /// The statements of the node are only written the first time it is met.
    fn render_node(
        &mut self,
        graph: &Graph,
        node: NodeId,
        type_uri: &str,
        skipped_edge: Option<EdgeId>,
        parent: &mut XmlElement,
    ) -> Result<(), OwlXmlError> {
        let n = graph.node(node);
        trace!("Writing {} as {type_uri}", n.uri());
        let (mut element, skipped_edge) = match self.element_for(type_uri) {
            Some(element) => (element, skipped_edge),
            None => {
                self.reporter.error(
                    DiagnosticKind::MalformedReference,
                    format!("Cannot write type {type_uri} of {} as an XML name", n.uri()),
                )?;
                (description_element(), None)
            }
        };
        let first = self.visited.insert(node);
        if !n.is_anonymous() {
            element.push_attribute(self.identity_attribute(n.uri(), first));
        } else if n.parent_edges().len() + graph.memberships(node).len() > 1 {
            element.push_attribute(rdf_attribute("nodeID", blank_node_name(n.uri())));
        }
        if first {
            for edge in n.child_edges() {
                if Some(edge) != skipped_edge {
                    self.render_edge(graph, edge, &mut element)?;
                }
            }
        }
        parent.push_element(element);
        Ok(())
    }

    fn render_edge(
        &mut self,
        graph: &Graph,
        edge: EdgeId,
        parent: &mut XmlElement,
    ) -> Result<(), OwlXmlError> {
        let e = graph.edge(edge);
        let Some(child) = e.child() else {
            self.reporter.warning(
                DiagnosticKind::UnexpectedContent,
                format!("Skipping {} statement without object", e.predicate()),
            )?;
            return Ok(());
        };
        let Some(mut element) = self.element_for(e.predicate()) else {
            self.reporter.error(
                DiagnosticKind::MalformedReference,
                format!("Cannot write property {} as an XML name", e.predicate()),
            )?;
            return Ok(());
        };

        let c = graph.node(child);
        if c.is_literal() || c.is_collection() {
            graph.accept(child, self, &mut element)?;
        } else if c.is_anonymous() {
            if self.visited.contains(&child) {
                element.push_attribute(rdf_attribute("nodeID", blank_node_name(c.uri())));
            } else {
                graph.accept(child, self, &mut element)?;
            }
        } else {
            element.push_attribute(rdf_attribute(
                "resource",
                relative_reference(c.uri(), &self.base),
            ));
        }
        parent.push_element(element);
        Ok(())
    }

    /// `rdf:ID` for the first element of a node named inside the base, `rdf:about` otherwise.
    fn identity_attribute(&self, uri: &str, first: bool) -> XmlAttribute {
        let reference = relative_reference(uri, &self.base);
        match reference.strip_prefix('#') {
            Some(id) if first && is_nc_name(id) => rdf_attribute("ID", id),
            _ => rdf_attribute("about", reference),
        }
    }

    /// An element named after the URI, or `None` if the URI does not end with an XML name.
    ///
    /// Namespaces without prefix are declared as the default namespace of the element.
    fn element_for(&self, uri: &str) -> Option<XmlElement> {
        let (namespace, local_name) = split_uri(uri);
        if local_name.is_empty() {
            return None;
        }
        Some(match self.prefixes.get(namespace) {
            Some(prefix) => XmlElement::new(Some(prefix), local_name, Some(namespace)),
            None => {
                let mut element = XmlElement::new(None, local_name, Some(namespace));
                element.push_attribute(XmlAttribute::namespace_declaration("", namespace));
                element
            }
        })
    }
}

impl Visitor<XmlElement> for Renderer {
    type Error = OwlXmlError;

    fn visit_node(
        &mut self,
        graph: &Graph,
        node: NodeId,
        parent: &mut XmlElement,
    ) -> Result<(), OwlXmlError> {
        self.render_node(graph, node, rdf::DESCRIPTION, None, parent)
    }

    fn visit_literal(
        &mut self,
        graph: &Graph,
        node: NodeId,
        parent: &mut XmlElement,
    ) -> Result<(), OwlXmlError> {
        let Some(literal) = graph.node(node).as_literal() else {
            return Ok(());
        };
        self.reporter.message(format!("Writing {}", graph.node(node).uri()));
        if literal.datatype() == Some(rdf::XML_LITERAL) {
            parent.push_attribute(rdf_attribute("parseType", "Literal"));
            parent.push_child(XmlNode::Raw(literal.value().into()));
            return Ok(());
        }
        parent.push_attribute(rdf_attribute(
            "datatype",
            literal.datatype().unwrap_or_default(),
        ));
        if let Some(language) = literal.language() {
            parent.push_attribute(XmlAttribute::new(
                Some("xml"),
                "lang",
                Some(xml::NAMESPACE),
                language,
            ));
        }
        if !literal.value().is_empty() {
            parent.push_text(literal.value());
        }
        Ok(())
    }

    fn visit_collection(
        &mut self,
        graph: &Graph,
        node: NodeId,
        parent: &mut XmlElement,
    ) -> Result<(), OwlXmlError> {
        parent.push_attribute(rdf_attribute("parseType", "Collection"));
        for member in graph.collection_members(node)? {
            if graph.node(*member).is_literal() {
                self.reporter.warning(
                    DiagnosticKind::UnexpectedContent,
                    format!(
                        "Skipping literal {} in a collection",
                        graph.node(*member).uri()
                    ),
                )?;
                continue;
            }
            let m = graph.node(*member);
            if m.is_anonymous() && self.visited.contains(member) {
                let mut reference = description_element();
                reference.push_attribute(rdf_attribute("nodeID", blank_node_name(m.uri())));
                parent.push_element(reference);
            } else {
                graph.accept(*member, self, parent)?;
            }
        }
        Ok(())
    }

    /// Resources are named after their canonical type, or the type they point to for individuals
    /// and generic properties.
    fn visit_resource(
        &mut self,
        graph: &Graph,
        node: NodeId,
        parent: &mut XmlElement,
    ) -> Result<(), OwlXmlError> {
        let n = graph.node(node);
        let type_edge = n.type_edge();
        let type_uri = match n.resource_kind().and_then(ResourceKind::canonical_type) {
            Some(type_uri) => type_uri,
            None => type_edge
                .and_then(|e| graph.edge(e).child())
                .map_or(rdf::DESCRIPTION, |t| graph.node(t).uri()),
        };
        self.render_node(graph, node, type_uri, type_edge, parent)
    }

    fn visit_data_range(
        &mut self,
        graph: &Graph,
        node: NodeId,
        _: &mut XmlElement,
    ) -> Result<(), OwlXmlError> {
        self.reporter.message(format!(
            "Skipping data range {}",
            graph.node(node).uri()
        ));
        Ok(())
    }

    fn visit_datatype(
        &mut self,
        graph: &Graph,
        node: NodeId,
        _: &mut XmlElement,
    ) -> Result<(), OwlXmlError> {
        self.reporter
            .message(format!("Skipping datatype {}", graph.node(node).uri()));
        Ok(())
    }
}

fn description_element() -> XmlElement {
    XmlElement::new(Some(rdf::PREFIX), "Description", Some(rdf::NAMESPACE))
}

fn rdf_attribute(local_name: &str, value: impl Into<String>) -> XmlAttribute {
    XmlAttribute::new(Some(rdf::PREFIX), local_name, Some(rdf::NAMESPACE), value)
}

/// The root attribute for a namespace map entry like `xmlns:owl` or `xml:base`.
fn namespace_attribute(name: &str, value: &str) -> XmlAttribute {
    if let Some(prefix) = Namespaces::declared_prefix(name) {
        return XmlAttribute::namespace_declaration(prefix, value);
    }
    match name.split_once(':') {
        Some(("xml", local_name)) => {
            XmlAttribute::new(Some("xml"), local_name, Some(xml::NAMESPACE), value)
        }
        Some((prefix, local_name)) => XmlAttribute::new(Some(prefix), local_name, None, value),
        None => XmlAttribute::unqualified(name, value),
    }
}

/// The `rdf:nodeID` of an anonymous node. Generated counters are not XML names and get a prefix.
fn blank_node_name(uri: &str) -> String {
    let name = uri.strip_prefix(BLANK_NODE_PREFIX).unwrap_or(uri);
    if is_nc_name(name) {
        name.into()
    } else {
        format!("b{name}")
    }
}
