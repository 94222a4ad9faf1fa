use crate::diagnostics::{DiagnosticKind, Diagnostics, Reporter};
use crate::error::OwlXmlError;
use crate::names::{is_nc_name, is_whitespace};
use crate::tree::{XmlAttribute, XmlDocument, XmlElement, XmlNode};
use crate::uri::{is_absolute, prepend_base, qualify, strip_fragment};
use owlgraph::vocab::{DEFAULT_BASE_URI, owl, rdf, rdfs, xml};
use owlgraph::{EdgeId, Graph, NodeId, PropertyKind, ResourceKind};
use oxilangtag::LanguageTag;
use oxiri::{Iri, IriParseError};
use rustc_hash::FxHashSet;
use std::io::Read;
use tracing::trace;

/// Names of the RDF vocabulary that are only syntax and can not be used as node or property elements.
const SYNTAX_NAMES: [&str; 6] = ["RDF", "ID", "about", "resource", "parseType", "nodeID"];

/// RDF names with a meaning as attributes.
const RDF_ATTRIBUTE_NAMES: [&str; 8] = [
    "about",
    "resource",
    "parseType",
    "ID",
    "nodeID",
    "type",
    "datatype",
    "value",
];

const RDF_VOCABULARY: [&str; 20] = [
    "RDF",
    "Description",
    "ID",
    "about",
    "resource",
    "parseType",
    "nodeID",
    "datatype",
    "type",
    "value",
    "List",
    "first",
    "rest",
    "nil",
    "li",
    "Property",
    "Statement",
    "subject",
    "predicate",
    "object",
];

const OWL_PROPERTIES: [&str; 23] = [
    "allValuesFrom",
    "backwardCompatibleWith",
    "cardinality",
    "complementOf",
    "differentFrom",
    "disjointWith",
    "distinctMembers",
    "equivalentClass",
    "equivalentProperty",
    "hasValue",
    "imports",
    "incompatibleWith",
    "intersectionOf",
    "inverseOf",
    "maxCardinality",
    "minCardinality",
    "oneOf",
    "onProperty",
    "priorVersion",
    "sameAs",
    "someValuesFrom",
    "unionOf",
    "versionInfo",
];

/// An OWL [RDF/XML](https://www.w3.org/TR/owl-ref/#RDFSyntax) parser building a [`Graph`].
///
/// Problems in the document are recorded as [`Diagnostics`] and parsing goes on with a best-effort
/// fallback, unless [`stop_on_errors`](Self::stop_on_errors) or
/// [`stop_on_warnings`](Self::stop_on_warnings) turns them into an [`OwlXmlError::Invalid`] failure.
///
/// ```
/// use owlgraph::ResourceKind;
/// use owlrdfxml::OwlXmlParser;
///
/// let file = r##"<?xml version="1.0"?>
/// <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
///     xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
///     xmlns:owl="http://www.w3.org/2002/07/owl#"
///     xml:base="http://example.com/zoo">
///  <owl:Class rdf:ID="Dog">
///    <rdfs:subClassOf rdf:resource="#Animal"/>
///  </owl:Class>
///  <owl:Class rdf:ID="Animal"/>
/// </rdf:RDF>"##;
///
/// let outcome = OwlXmlParser::new().parse_reader(file.as_bytes())?;
/// assert!(outcome.diagnostics.is_clean());
/// let animal = outcome.graph.get("http://example.com/zoo#Animal").unwrap();
/// assert_eq!(outcome.graph.node(animal).resource_kind(), Some(ResourceKind::Class));
/// # Result::<_, owlrdfxml::OwlXmlError>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct OwlXmlParser {
    base_uri: Option<String>,
    stop_on_errors: bool,
    stop_on_warnings: bool,
}

impl OwlXmlParser {
    /// Builds a new [`OwlXmlParser`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The base URI used when the document has no `xml:base` and no known location.
    #[inline]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Result<Self, IriParseError> {
        self.base_uri = Some(Iri::parse(base_uri.into())?.into_inner());
        Ok(self)
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

    /// Reads an XML document and parses it into a new graph.
    pub fn parse_reader(&self, read: impl Read) -> Result<ParseOutcome, OwlXmlError> {
        self.parse(&XmlDocument::parse(read)?)
    }

    /// Parses a document into a new graph.
    pub fn parse(&self, document: &XmlDocument) -> Result<ParseOutcome, OwlXmlError> {
        let mut graph = Graph::new();
        let diagnostics = self.parse_into(document, &mut graph)?;
        Ok(ParseOutcome { graph, diagnostics })
    }

    /// Parses a document into an existing graph.
    ///
    /// The base URI the graph had is used if the document provides none, and is then replaced by the
    /// base of the document.
    /// If a stop flag makes the call fail, the statements parsed so far stay in the graph.
    pub fn parse_into(
        &self,
        document: &XmlDocument,
        graph: &mut Graph,
    ) -> Result<Diagnostics, OwlXmlError> {
        let mut walker = Walker {
            graph,
            reporter: Reporter::new(self.stop_on_errors, self.stop_on_warnings),
            declared_ids: FxHashSet::default(),
        };
        walker.parse_document(document, self.base_uri.as_deref())?;
        Ok(walker.reporter.finish())
    }
}

/// The result of a successful parse.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub graph: Graph,
    pub diagnostics: Diagnostics,
}

/// What an element inherits from its ancestors.
#[derive(Clone)]
struct Scope {
    base: String,
    language: Option<String>,
}

struct Walker<'a> {
    graph: &'a mut Graph,
    reporter: Reporter,
    declared_ids: FxHashSet<String>,
}

impl Walker<'_> {
    fn parse_document(
        &mut self,
        document: &XmlDocument,
        fallback_base: Option<&str>,
    ) -> Result<(), OwlXmlError> {
        let root = document.root();
        if !root.has_name(rdf::NAMESPACE, "RDF") {
            if root.local_name().eq_ignore_ascii_case("rdf") {
                self.reporter.warning(
                    DiagnosticKind::ReservedElementMisuse,
                    "Unqualified use of rdf as the root element name",
                )?;
            } else {
                self.reporter.warning(
                    DiagnosticKind::UnexpectedContent,
                    "Root element of an OWL document must be rdf:RDF",
                )?;
            }
        }

        let previous_base = self.graph.namespaces_mut().remove(xml::BASE);
        for attribute in root.attributes() {
            let name = attribute.qualified_name();
            if self.graph.namespaces().contains(&name) {
                self.reporter.warning(
                    DiagnosticKind::DuplicateDeclaration,
                    format!("Redefinition of namespace {name}"),
                )?;
            }
            self.graph.namespaces_mut().insert(name, attribute.value())?;
        }

        let base = self.document_base(document, fallback_base, previous_base)?;
        self.graph.namespaces_mut().set_base(base.as_str());
        let mut scope = Scope {
            base,
            language: None,
        };
        if let Some(language) = root.xml_attribute("lang") {
            scope.language = self.language(language)?;
        }

        for child in root.children() {
            match child {
                XmlNode::Element(element) => {
                    self.process_node(element, None, &scope)?;
                }
                XmlNode::Text(text) | XmlNode::CData(text) => {
                    self.unexpected_text(text, root)?;
                }
                XmlNode::Comment(_) | XmlNode::Raw(_) => (),
            }
        }
        Ok(())
    }

    /// The first valid base among the root `xml:base`, the document location, the fallback and the
    /// base the graph had, without fragment.
    fn document_base(
        &mut self,
        document: &XmlDocument,
        fallback_base: Option<&str>,
        previous_base: Option<String>,
    ) -> Result<String, OwlXmlError> {
        if let Some(base) = self.graph.namespaces().base().map(ToOwned::to_owned) {
            if is_absolute(&base) {
                return Ok(strip_fragment(&base).into());
            }
            self.reporter.warning(
                DiagnosticKind::MalformedReference,
                format!("{base} is not a valid xml:base URI"),
            )?;
        }
        let candidates = [document.base_uri(), fallback_base, previous_base.as_deref()];
        if let Some(base) = candidates.into_iter().flatten().find(|b| is_absolute(b)) {
            return Ok(strip_fragment(base).into());
        }
        self.reporter.warning(
            DiagnosticKind::MalformedReference,
            format!("Valid xml:base URI not found. Using {DEFAULT_BASE_URI}"),
        )?;
        Ok(DEFAULT_BASE_URI.into())
    }

    /// Turns a node element into a node, attached as the object of `parent_edge` if any.
    ///
    /// Returns the node the element stands for once all its properties are parsed: it differs from
    /// the node first built when a property promoted it.
    fn process_node(
        &mut self,
        element: &XmlElement,
        parent_edge: Option<EdgeId>,
        scope: &Scope,
    ) -> Result<NodeId, OwlXmlError> {
        trace!("Parsing node element {}", element.qualified_name());
        let scope = self.element_scope(element, scope)?;
        let uri = self.node_identity(element, &scope)?;
        let mut node = self.node_for_element(element, uri, &scope)?;
        if element.xml_attribute("lang").is_some() {
            self.graph
                .set_node_language(node, scope.language.as_deref());
        }
        if let Some(edge) = parent_edge {
            self.graph.attach_child_node(edge, node);
        }
        node = self.parse_node_attributes(element, node, &scope)?;
        for child in element.children() {
            match child {
                XmlNode::Element(property) => node = self.process_edge(property, node, &scope)?,
                XmlNode::Text(text) | XmlNode::CData(text) => {
                    self.unexpected_text(text, element)?;
                }
                XmlNode::Comment(_) | XmlNode::Raw(_) => (),
            }
        }
        Ok(node)
    }

    /// The URI given by `rdf:nodeID`, `rdf:ID` or `rdf:about`, in this order of priority.
    fn node_identity(
        &mut self,
        element: &XmlElement,
        scope: &Scope,
    ) -> Result<Option<String>, OwlXmlError> {
        let about = element.attribute(Some(rdf::NAMESPACE), "about");
        let id = element.attribute(Some(rdf::NAMESPACE), "ID");
        let node_id = element.attribute(Some(rdf::NAMESPACE), "nodeID");
        let conflict = match (about.is_some(), id.is_some(), node_id.is_some()) {
            (true, true, true) => Some("Cannot use rdf:about, rdf:ID and rdf:nodeID together"),
            (true, true, false) => Some("Cannot use rdf:about and rdf:ID together"),
            (true, false, true) => Some("Cannot use rdf:about and rdf:nodeID together"),
            (false, true, true) => Some("Cannot use rdf:ID and rdf:nodeID together"),
            _ => None,
        };
        if let Some(conflict) = conflict {
            self.reporter
                .error(DiagnosticKind::ConflictingIdentityAttributes, conflict)?;
        }

        let mut uri = None;
        if let Some(about) = about {
            uri = Some(qualify(about, &scope.base));
        }
        if let Some(id) = id {
            uri = Some(self.declare_id(id, scope)?);
        }
        if let Some(name) = node_id {
            uri = Some(self.blank_node_uri(name)?);
        }
        Ok(uri)
    }

    fn declare_id(&mut self, id: &str, scope: &Scope) -> Result<String, OwlXmlError> {
        if !is_nc_name(id) {
            self.reporter.error(
                DiagnosticKind::MalformedReference,
                format!("{id} is not an XML name"),
            )?;
        }
        let uri = prepend_base(id, &scope.base);
        if !self.declared_ids.insert(uri.clone()) {
            self.reporter.error(
                DiagnosticKind::DuplicateDeclaration,
                format!("Redefinition of rdf:ID {id}"),
            )?;
        }
        Ok(uri)
    }

    /// The URI of the blank node named by `rdf:nodeID`.
    fn blank_node_uri(&mut self, name: &str) -> Result<String, OwlXmlError> {
        if !is_nc_name(name) {
            self.reporter.error(
                DiagnosticKind::MalformedReference,
                format!("{name} is not an XML name"),
            )?;
        }
        let uri = Graph::named_blank_uri(name);
        if self.graph.is_generated_blank_uri(&uri) {
            self.reporter.error(
                DiagnosticKind::DuplicateDeclaration,
                format!("Blank node name {name} is already used by an anonymous node"),
            )?;
            return Ok(self.graph.fresh_blank_uri());
        }
        Ok(uri)
    }

    /// Builds, finds or promotes the node matching the element name.
    fn node_for_element(
        &mut self,
        element: &XmlElement,
        uri: Option<String>,
        scope: &Scope,
    ) -> Result<NodeId, OwlXmlError> {
        let local_name = element.local_name();
        match element.namespace() {
            Some(owl::NAMESPACE) => {
                if let Some((kind, type_uri, characteristic)) = owl_node_element(local_name) {
                    let node = self.graph.resolve_resource(uri.as_deref(), kind, type_uri);
                    if let Some(characteristic) = characteristic {
                        self.graph.add_type_statement(node, characteristic);
                    }
                    return Ok(node);
                }
            }
            Some(rdfs::NAMESPACE) if local_name == "Datatype" => {
                return Ok(self.graph.resolve_resource(
                    uri.as_deref(),
                    ResourceKind::Datatype,
                    rdfs::DATATYPE,
                ));
            }
            Some(rdf::NAMESPACE) if local_name == "Description" => {
                let uri = match uri {
                    Some(uri) => uri,
                    None => self.graph.fresh_blank_uri(),
                };
                return Ok(self.graph.add_node(&uri));
            }
            Some(rdf::NAMESPACE) if SYNTAX_NAMES.contains(&local_name) => {
                self.reporter.error(
                    DiagnosticKind::ReservedElementMisuse,
                    format!("Cannot use {} as a node element name", element.qualified_name()),
                )?;
            }
            _ => (),
        }
        let type_uri = match element.namespace() {
            Some(namespace) => format!("{namespace}{local_name}"),
            None => prepend_base(local_name, &scope.base),
        };
        Ok(self
            .graph
            .resolve_resource(uri.as_deref(), ResourceKind::Individual, &type_uri))
    }

    fn parse_node_attributes(
        &mut self,
        element: &XmlElement,
        mut node: NodeId,
        scope: &Scope,
    ) -> Result<NodeId, OwlXmlError> {
        for attribute in element.attributes() {
            if let Some(predicate) = self.attribute_predicate(attribute, scope, true)? {
                node = self.add_attribute_statement(node, &predicate, attribute, element, scope);
            }
        }
        Ok(node)
    }

    /// Turns a property element into an edge from `parent`.
    ///
    /// Returns the node the parent element stands for afterwards, which is a new one if an
    /// `rdf:type` statement promoted it.
    fn process_edge(
        &mut self,
        element: &XmlElement,
        parent: NodeId,
        scope: &Scope,
    ) -> Result<NodeId, OwlXmlError> {
        trace!("Parsing property element {}", element.qualified_name());
        let scope = self.element_scope(element, scope)?;
        let local_name = element.local_name();
        let predicate = match element.namespace() {
            Some(namespace) => {
                if namespace == rdf::NAMESPACE && SYNTAX_NAMES.contains(&local_name) {
                    self.reporter.error(
                        DiagnosticKind::ReservedElementMisuse,
                        format!("Cannot use {} as a property element", element.qualified_name()),
                    )?;
                }
                format!("{namespace}{local_name}")
            }
            None => {
                self.reporter.error(
                    DiagnosticKind::MalformedReference,
                    format!("Unqualified property element {local_name}"),
                )?;
                prepend_base(local_name, &scope.base)
            }
        };

        let edge = self.graph.new_edge(predicate.as_str());
        self.graph
            .set_edge_language(edge, scope.language.as_deref());
        self.graph.attach_parent_node(edge, parent);
        self.edge_object(element, edge, &scope)?;
        // the object may have promoted the parent node
        let parent = self.graph.edge(edge).parent().unwrap_or(parent);

        if predicate == rdf::TYPE {
            if let Some(object) = self.graph.edge(edge).child() {
                let type_uri = self.graph.node(object).uri().to_owned();
                if let Some(kind) = promoted_property_kind(&type_uri) {
                    let promoted = self.promote_property(parent, kind, &type_uri);
                    self.graph.attach_parent_node(edge, promoted);
                    self.graph.add_edge(edge);
                    return Ok(promoted);
                }
            }
        }

        self.parse_edge_attributes(element, edge, &scope)?;
        if self.graph.edge(edge).child().is_none() {
            let literal = self.graph.add_literal(
                "",
                scope.language.as_deref(),
                datatype(element, &scope).as_deref(),
            );
            self.graph.attach_child_node(edge, literal);
        }
        self.graph.add_edge(edge);
        Ok(parent)
    }

    /// Attaches the object of a property element to `edge`, if the element gives one.
    fn edge_object(
        &mut self,
        element: &XmlElement,
        edge: EdgeId,
        scope: &Scope,
    ) -> Result<(), OwlXmlError> {
        let resource = element.attribute(Some(rdf::NAMESPACE), "resource");
        let node_id = element.attribute(Some(rdf::NAMESPACE), "nodeID");
        let parse_type = element.attribute(Some(rdf::NAMESPACE), "parseType");
        let conflict = match (resource.is_some(), node_id.is_some(), parse_type.is_some()) {
            (true, true, true) => {
                Some("Cannot use rdf:resource, rdf:nodeID and rdf:parseType together")
            }
            (true, true, false) => Some("Cannot use rdf:resource and rdf:nodeID together"),
            (true, false, true) => Some("Cannot use rdf:resource and rdf:parseType together"),
            (false, true, true) => Some("Cannot use rdf:nodeID and rdf:parseType together"),
            _ => None,
        };
        if let Some(conflict) = conflict {
            self.reporter
                .error(DiagnosticKind::ConflictingIdentityAttributes, conflict)?;
        }

        if let Some(resource) = resource {
            let object = self.graph.add_node(&qualify(resource, &scope.base));
            self.graph.attach_child_node(edge, object);
            return Ok(());
        }
        if let Some(name) = node_id {
            let uri = self.blank_node_uri(name)?;
            let object = self.graph.add_node(&uri);
            self.graph.attach_child_node(edge, object);
            return Ok(());
        }
        if let Some(parse_type) = parse_type {
            return self.parse_type(element, edge, parse_type, scope);
        }

        let mut has_object = false;
        for child in element.child_elements() {
            if has_object {
                self.reporter.error(
                    DiagnosticKind::UnexpectedContent,
                    format!(
                        "Property element {} has more than one object",
                        element.qualified_name()
                    ),
                )?;
            }
            self.process_node(child, Some(edge), scope)?;
            has_object = true;
        }
        let text = element.text();
        if has_object {
            self.unexpected_text(&text, element)?;
        } else if !is_whitespace(&text) {
            let literal = self.graph.add_literal(
                text,
                scope.language.as_deref(),
                datatype(element, scope).as_deref(),
            );
            self.graph.attach_child_node(edge, literal);
        }
        Ok(())
    }

    fn parse_type(
        &mut self,
        element: &XmlElement,
        edge: EdgeId,
        parse_type: &str,
        scope: &Scope,
    ) -> Result<(), OwlXmlError> {
        self.reporter
            .message(format!("Parsing rdf:parseType=\"{parse_type}\""));
        match parse_type {
            "Resource" => {
                let uri = self.graph.fresh_blank_uri();
                let mut object = self.graph.add_node(&uri);
                self.graph.attach_child_node(edge, object);
                for child in element.children() {
                    match child {
                        XmlNode::Element(property) => {
                            object = self.process_edge(property, object, scope)?;
                        }
                        XmlNode::Text(text) | XmlNode::CData(text) => {
                            self.unexpected_text(text, element)?;
                        }
                        XmlNode::Comment(_) | XmlNode::Raw(_) => (),
                    }
                }
            }
            "Literal" => {
                let datatype = datatype(element, scope);
                let literal = self.graph.add_literal(
                    element.inner_xml()?,
                    scope.language.as_deref(),
                    Some(datatype.as_deref().unwrap_or(rdf::XML_LITERAL)),
                );
                self.graph.attach_child_node(edge, literal);
            }
            "Collection" => {
                let uri = self.graph.fresh_blank_uri();
                let collection = self.graph.new_collection(uri);
                for child in element.children() {
                    match child {
                        XmlNode::Element(member) => {
                            let member = self.process_node(member, None, scope)?;
                            self.graph.collection_push(collection, member)?;
                        }
                        XmlNode::Text(text) | XmlNode::CData(text) => {
                            self.unexpected_text(text, element)?;
                        }
                        XmlNode::Comment(_) | XmlNode::Raw(_) => (),
                    }
                }
                self.graph.attach_child_node(edge, collection);
            }
            _ => {
                self.reporter.error(
                    DiagnosticKind::UnknownParseType,
                    format!("Unknown parseType {parse_type}"),
                )?;
            }
        }
        Ok(())
    }

    /// Property attributes of a property element are statements about its object.
    fn parse_edge_attributes(
        &mut self,
        element: &XmlElement,
        edge: EdgeId,
        scope: &Scope,
    ) -> Result<(), OwlXmlError> {
        for attribute in element.attributes() {
            let Some(predicate) = self.attribute_predicate(attribute, scope, false)? else {
                continue;
            };
            let object = match self.graph.edge(edge).child() {
                Some(object) => object,
                None => {
                    let uri = self.graph.fresh_blank_uri();
                    let object = self.graph.add_node(&uri);
                    self.graph.attach_child_node(edge, object);
                    object
                }
            };
            if let Some(literal) = self.graph.node(object).as_literal() {
                let message = if predicate == rdf::VALUE {
                    format!(
                        "Cannot use rdf:value ({}) as property for a literal ({})",
                        attribute.value(),
                        literal.value()
                    )
                } else {
                    format!(
                        "Cannot have property {} for a literal {}",
                        attribute.qualified_name(),
                        self.graph.node(object).uri()
                    )
                };
                self.reporter
                    .error(DiagnosticKind::UnexpectedContent, message)?;
                continue;
            }
            self.add_attribute_statement(object, &predicate, attribute, element, scope);
        }
        Ok(())
    }

    /// The predicate of a property attribute, or `None` for syntax attributes and skipped ones.
    fn attribute_predicate(
        &mut self,
        attribute: &XmlAttribute,
        scope: &Scope,
        on_node: bool,
    ) -> Result<Option<String>, OwlXmlError> {
        if attribute.is_namespace_declaration() || attribute.is_xml_attribute() {
            return Ok(None);
        }
        let local_name = attribute.local_name();
        match attribute.namespace() {
            Some(rdf::NAMESPACE) => {
                if !matches!(local_name, "type" | "value")
                    && RDF_ATTRIBUTE_NAMES.contains(&local_name)
                {
                    return Ok(None);
                }
                if !RDF_VOCABULARY.contains(&local_name) {
                    self.unknown_vocabulary(attribute)?;
                }
            }
            Some(owl::NAMESPACE) => {
                if !OWL_PROPERTIES.contains(&local_name) {
                    self.unknown_vocabulary(attribute)?;
                }
            }
            Some(_) => (),
            None if on_node => {
                if RDF_ATTRIBUTE_NAMES.contains(&local_name) {
                    self.reporter.warning(
                        DiagnosticKind::UnqualifiedAttribute,
                        format!("Unqualified use of rdf:{local_name}"),
                    )?;
                }
                return Ok(Some(prepend_base(local_name, &scope.base)));
            }
            None => {
                self.reporter.error(
                    DiagnosticKind::UnqualifiedAttribute,
                    format!("Unqualified attribute: {local_name}"),
                )?;
                return Ok(None);
            }
        }
        Ok(attribute
            .namespace()
            .map(|namespace| format!("{namespace}{local_name}")))
    }

    fn unknown_vocabulary(&mut self, attribute: &XmlAttribute) -> Result<(), OwlXmlError> {
        self.reporter.warning(
            DiagnosticKind::UnknownVocabulary,
            format!(
                "Unknown OWL, RDF or XML property: {}",
                attribute.qualified_name()
            ),
        )
    }

    /// Adds the statement a property attribute stands for and returns the subject, promoted if needed.
    fn add_attribute_statement(
        &mut self,
        subject: NodeId,
        predicate: &str,
        attribute: &XmlAttribute,
        element: &XmlElement,
        scope: &Scope,
    ) -> NodeId {
        if predicate == rdf::TYPE {
            let type_uri = prepend_base(attribute.value(), &scope.base);
            if let Some(kind) = promoted_property_kind(&type_uri) {
                return self.promote_property(subject, kind, &type_uri);
            }
            let object = self.graph.add_node(&type_uri);
            self.add_statement(subject, predicate, object, scope);
            return subject;
        }
        let literal = self.graph.add_literal(
            attribute.value(),
            scope.language.as_deref(),
            datatype(element, scope).as_deref(),
        );
        self.add_statement(subject, predicate, literal, scope);
        subject
    }

    fn add_statement(&mut self, subject: NodeId, predicate: &str, object: NodeId, scope: &Scope) {
        let edge = self.graph.new_edge(predicate);
        self.graph
            .set_edge_language(edge, scope.language.as_deref());
        self.graph.attach_parent_node(edge, subject);
        self.graph.attach_child_node(edge, object);
        self.graph.add_edge(edge);
    }

    /// Promotes `node` to an object or datatype property unless it already is one.
    ///
    /// The explicit `rdf:type` statement is not kept: the type edge of the property states it.
    fn promote_property(&mut self, node: NodeId, kind: ResourceKind, type_uri: &str) -> NodeId {
        if self.graph.node(node).resource_kind() == Some(kind) {
            return node;
        }
        self.graph.promote(node, kind, type_uri)
    }

    fn element_scope(&mut self, element: &XmlElement, scope: &Scope) -> Result<Scope, OwlXmlError> {
        let mut inner = scope.clone();
        if let Some(base) = element.xml_attribute("base") {
            inner.base = strip_fragment(&qualify(base, &scope.base)).into();
        }
        if let Some(language) = element.xml_attribute("lang") {
            inner.language = self.language(language)?;
        }
        Ok(inner)
    }

    /// Checks an `xml:lang` value. The empty string removes the inherited language.
    fn language(&mut self, language: &str) -> Result<Option<String>, OwlXmlError> {
        if language.is_empty() {
            return Ok(None);
        }
        if let Err(error) = LanguageTag::parse(language) {
            self.reporter.warning(
                DiagnosticKind::MalformedReference,
                format!("{language} is not a valid language tag: {error}"),
            )?;
        }
        Ok(Some(language.into()))
    }

    fn unexpected_text(&mut self, text: &str, element: &XmlElement) -> Result<(), OwlXmlError> {
        if is_whitespace(text) {
            return Ok(());
        }
        self.reporter.error(
            DiagnosticKind::UnexpectedContent,
            format!(
                "Unexpected text '{}' in {}",
                text.trim(),
                element.qualified_name()
            ),
        )
    }
}

/// The kind, type and extra characteristic type of the OWL node elements.
fn owl_node_element(
    local_name: &str,
) -> Option<(ResourceKind, &'static str, Option<&'static str>)> {
    Some(match local_name {
        "Class" => (ResourceKind::Class, owl::CLASS, None),
        "Restriction" => (ResourceKind::Restriction, owl::RESTRICTION, None),
        "DataRange" => (ResourceKind::DataRange, owl::DATA_RANGE, None),
        "ObjectProperty" => (
            ResourceKind::Property(PropertyKind::Object),
            owl::OBJECT_PROPERTY,
            None,
        ),
        "TransitiveProperty" => (
            ResourceKind::Property(PropertyKind::Object),
            owl::OBJECT_PROPERTY,
            Some(owl::TRANSITIVE_PROPERTY),
        ),
        "SymmetricProperty" => (
            ResourceKind::Property(PropertyKind::Object),
            owl::OBJECT_PROPERTY,
            Some(owl::SYMMETRIC_PROPERTY),
        ),
        "InverseFunctionalProperty" => (
            ResourceKind::Property(PropertyKind::Object),
            owl::OBJECT_PROPERTY,
            Some(owl::INVERSE_FUNCTIONAL_PROPERTY),
        ),
        "DatatypeProperty" => (
            ResourceKind::Property(PropertyKind::Datatype),
            owl::DATATYPE_PROPERTY,
            None,
        ),
        "FunctionalProperty" => (
            ResourceKind::Property(PropertyKind::Generic),
            owl::FUNCTIONAL_PROPERTY,
            None,
        ),
        "Ontology" => (ResourceKind::Ontology, owl::ONTOLOGY, None),
        "OntologyProperty" => (
            ResourceKind::Property(PropertyKind::Ontology),
            owl::ONTOLOGY_PROPERTY,
            None,
        ),
        "AnnotationProperty" => (
            ResourceKind::Property(PropertyKind::Annotation),
            owl::ANNOTATION_PROPERTY,
            None,
        ),
        _ => return None,
    })
}

/// The property kinds an `rdf:type` statement promotes its subject to.
fn promoted_property_kind(type_uri: &str) -> Option<ResourceKind> {
    match type_uri {
        owl::OBJECT_PROPERTY => Some(ResourceKind::Property(PropertyKind::Object)),
        owl::DATATYPE_PROPERTY => Some(ResourceKind::Property(PropertyKind::Datatype)),
        _ => None,
    }
}

/// The `rdf:datatype` of the element. An empty value means no datatype.
fn datatype(element: &XmlElement, scope: &Scope) -> Option<String> {
    element
        .attribute(Some(rdf::NAMESPACE), "datatype")
        .filter(|datatype| !datatype.is_empty())
        .map(|datatype| prepend_base(datatype, &scope.base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    const HEADER: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
        xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
        xmlns:owl="http://www.w3.org/2002/07/owl#"
        xmlns:zoo="http://example.com/zoo#"
        xml:base="http://example.com/zoo">"#;

    fn parse(body: &str) -> Result<ParseOutcome, OwlXmlError> {
        OwlXmlParser::new().parse_reader(format!("{HEADER}{body}</rdf:RDF>").as_bytes())
    }

    #[test]
    fn owl_node_elements() -> Result<(), OwlXmlError> {
        let outcome = parse(
            r##"<owl:TransitiveProperty rdf:ID="partOf"/>
            <owl:FunctionalProperty rdf:ID="hasMother"/>
            <rdfs:Datatype rdf:about="http://www.w3.org/2001/XMLSchema#string"/>
            <rdf:Description rdf:about="#thing"/>"##,
        )?;
        let graph = &outcome.graph;
        let part_of = graph.get("http://example.com/zoo#partOf").unwrap();
        assert_eq!(
            graph.node(part_of).resource_kind(),
            Some(ResourceKind::Property(PropertyKind::Object))
        );
        let transitive = graph.get(owl::TRANSITIVE_PROPERTY).unwrap();
        assert!(graph.has_child_edge(part_of, rdf::TYPE, transitive));
        let has_mother = graph.get("http://example.com/zoo#hasMother").unwrap();
        assert_eq!(
            graph.node(has_mother).resource_kind(),
            Some(ResourceKind::Property(PropertyKind::Generic))
        );
        let string = graph.get("http://www.w3.org/2001/XMLSchema#string").unwrap();
        assert_eq!(graph.node(string).resource_kind(), Some(ResourceKind::Datatype));
        let thing = graph.get("http://example.com/zoo#thing").unwrap();
        assert!(graph.node(thing).is_untyped());
        Ok(())
    }

    #[test]
    fn reserved_node_element_is_an_error() -> Result<(), OwlXmlError> {
        let outcome = parse(r##"<rdf:about rdf:about="#x"/>"##)?;
        let errors = outcome.diagnostics.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), DiagnosticKind::ReservedElementMisuse);
        assert_eq!(errors[0].message(), "Cannot use rdf:about as a node element name");
        Ok(())
    }

    #[test]
    fn identity_attributes_conflict() -> Result<(), OwlXmlError> {
        let outcome = parse(r##"<owl:Class rdf:about="#A" rdf:ID="B"/>"##)?;
        let errors = outcome.diagnostics.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), DiagnosticKind::ConflictingIdentityAttributes);
        assert!(outcome.graph.get("http://example.com/zoo#B").is_some());
        assert!(outcome.graph.get("http://example.com/zoo#A").is_none());

        let outcome = parse(
            r##"<owl:Class rdf:about="#A" rdf:ID="B" rdf:nodeID="c">
                <rdfs:label>C</rdfs:label>
            </owl:Class>"##,
        )?;
        let errors = outcome.diagnostics.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message(),
            "Cannot use rdf:about, rdf:ID and rdf:nodeID together"
        );
        let graph = &outcome.graph;
        let c = graph.get(&Graph::named_blank_uri("c")).unwrap();
        assert_eq!(graph.node(c).resource_kind(), Some(ResourceKind::Class));
        assert!(graph.has_child_edge(c, rdfs::LABEL, graph.get("C").unwrap()));
        assert!(graph.get("http://example.com/zoo#A").is_none());
        assert!(graph.get("http://example.com/zoo#B").is_none());
        Ok(())
    }

    #[test]
    fn node_attributes_become_statements() -> Result<(), OwlXmlError> {
        let outcome = parse(
            r#"<zoo:Dog rdf:ID="rex" zoo:name="Rex" xml:lang="en" rdf:type="http://example.com/zoo#Pet"/>"#,
        )?;
        let graph = &outcome.graph;
        let rex = graph.get("http://example.com/zoo#rex").unwrap();
        assert_eq!(graph.node(rex).resource_kind(), Some(ResourceKind::Individual));
        let name = graph.get("Rex@en").unwrap();
        assert!(graph.has_child_edge(rex, "http://example.com/zoo#name", name));
        let dog = graph.get("http://example.com/zoo#Dog").unwrap();
        assert!(graph.has_child_edge(rex, rdf::TYPE, dog));
        let pet = graph.get("http://example.com/zoo#Pet").unwrap();
        assert!(graph.has_child_edge(rex, rdf::TYPE, pet));
        Ok(())
    }

    #[test]
    fn rdf_type_attribute_promotes_to_property() -> Result<(), OwlXmlError> {
        let outcome = parse(
            r##"<rdf:Description rdf:about="#eats" rdf:type="http://www.w3.org/2002/07/owl#ObjectProperty">
                <rdfs:label>eats</rdfs:label>
            </rdf:Description>"##,
        )?;
        let graph = &outcome.graph;
        let eats = graph.get("http://example.com/zoo#eats").unwrap();
        assert_eq!(
            graph.node(eats).resource_kind(),
            Some(ResourceKind::Property(PropertyKind::Object))
        );
        let label = graph.get("eats").unwrap();
        assert!(graph.has_child_edge(eats, rdfs::LABEL, label));
        assert_eq!(graph.node(eats).child_edges().for_predicate(rdf::TYPE).len(), 1);
        Ok(())
    }

    #[test]
    fn parse_types() -> Result<(), OwlXmlError> {
        let outcome = parse(
            r#"<owl:Class rdf:ID="Dog">
                <rdfs:comment rdf:parseType="Literal">A <b>good</b> boy</rdfs:comment>
                <zoo:owner rdf:parseType="Resource"><zoo:name>Alice</zoo:name></zoo:owner>
                <zoo:other rdf:parseType="Foo"/>
            </owl:Class>"#,
        )?;
        let graph = &outcome.graph;
        let dog = graph.get("http://example.com/zoo#Dog").unwrap();
        let comment = graph
            .get(&format!("A <b>good</b> boy^^{}", rdf::XML_LITERAL))
            .unwrap();
        assert!(graph.has_child_edge(dog, rdfs::COMMENT, comment));

        let owner_edge = graph
            .node(dog)
            .child_edges()
            .for_predicate("http://example.com/zoo#owner")[0];
        let owner = graph.edge(owner_edge).child().unwrap();
        assert!(graph.node(owner).is_anonymous());
        let alice = graph.get("Alice").unwrap();
        assert!(graph.has_child_edge(owner, "http://example.com/zoo#name", alice));

        let errors = outcome.diagnostics.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), DiagnosticKind::UnknownParseType);
        assert_eq!(errors[0].message(), "Unknown parseType Foo");
        assert_eq!(outcome.diagnostics.messages().len(), 3);
        Ok(())
    }

    #[test]
    fn dangling_edge_gets_an_empty_literal() -> Result<(), OwlXmlError> {
        let outcome = parse(
            r#"<owl:Class rdf:ID="Dog">
                <rdfs:comment/>
                <rdfs:label xml:lang="en"/>
                <zoo:age rdf:datatype="http://www.w3.org/2001/XMLSchema#integer"/>
            </owl:Class>"#,
        )?;
        assert!(outcome.diagnostics.is_clean());
        let graph = &outcome.graph;
        let dog = graph.get("http://example.com/zoo#Dog").unwrap();
        let empty = graph.get("").unwrap();
        assert!(graph.has_child_edge(dog, rdfs::COMMENT, empty));
        // the language and datatype in scope still apply to the empty value
        let tagged = graph.get("@en").unwrap();
        assert!(graph.has_child_edge(dog, rdfs::LABEL, tagged));
        let typed = graph.get("^^http://www.w3.org/2001/XMLSchema#integer").unwrap();
        assert!(graph.has_child_edge(dog, "http://example.com/zoo#age", typed));
        Ok(())
    }

    #[test]
    fn edge_attributes() -> Result<(), OwlXmlError> {
        let outcome = parse(
            r#"<owl:Class rdf:ID="Dog">
                <zoo:owner zoo:name="Bob"/>
                <rdfs:label zoo:note="x">Dog</rdfs:label>
                <rdfs:comment note="y"/>
            </owl:Class>"#,
        )?;
        let graph = &outcome.graph;
        let dog = graph.get("http://example.com/zoo#Dog").unwrap();
        let owner_edge = graph
            .node(dog)
            .child_edges()
            .for_predicate("http://example.com/zoo#owner")[0];
        let owner = graph.edge(owner_edge).child().unwrap();
        let bob = graph.get("Bob").unwrap();
        assert!(graph.has_child_edge(owner, "http://example.com/zoo#name", bob));

        let kinds = outcome
            .diagnostics
            .errors()
            .iter()
            .map(|e| e.kind())
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [DiagnosticKind::UnexpectedContent, DiagnosticKind::UnqualifiedAttribute]
        );
        Ok(())
    }

    #[test]
    fn unknown_vocabulary_and_unqualified_node_attributes_are_warnings() -> Result<(), OwlXmlError>
    {
        let outcome = parse(r#"<owl:Class rdf:ID="Dog" rdf:foo="x" about="y"/>"#)?;
        let warnings = outcome.diagnostics.warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].kind(), DiagnosticKind::UnknownVocabulary);
        assert_eq!(warnings[1].kind(), DiagnosticKind::UnqualifiedAttribute);
        assert_eq!(warnings[1].message(), "Unqualified use of rdf:about");
        assert!(warnings.iter().all(|w| w.severity() == Severity::Warning));
        let graph = &outcome.graph;
        let dog = graph.get("http://example.com/zoo#Dog").unwrap();
        assert!(
            graph
                .node(dog)
                .child_edges()
                .contains_predicate("http://example.com/zoo#about")
        );
        Ok(())
    }

    #[test]
    fn base_uri_priority() -> Result<(), OwlXmlError> {
        let body = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
            <rdf:Description rdf:ID="a"/>
        </rdf:RDF>"#;
        let document = XmlDocument::parse(body.as_bytes())?;

        let outcome = OwlXmlParser::new().parse(&document)?;
        assert_eq!(outcome.graph.namespaces().base(), Some(DEFAULT_BASE_URI));
        assert_eq!(outcome.diagnostics.warnings().len(), 1);

        let parser = OwlXmlParser::new()
            .with_base_uri("http://example.com/fallback#frag")
            .unwrap();
        let outcome = parser.parse(&document)?;
        assert_eq!(outcome.graph.namespaces().base(), Some("http://example.com/fallback"));
        assert!(outcome.graph.get("http://example.com/fallback#a").is_some());

        let outcome = parser.parse(&document.clone().with_base_uri("http://example.com/doc"))?;
        assert_eq!(outcome.graph.namespaces().base(), Some("http://example.com/doc"));
        Ok(())
    }

    #[test]
    fn xml_base_and_lang_are_inherited() -> Result<(), OwlXmlError> {
        let outcome = parse(
            r#"<owl:Class rdf:about="Dog" xml:base="http://example.org/other/" xml:lang="en">
                <rdfs:label>Dog</rdfs:label>
                <rdfs:label xml:lang="">Hund</rdfs:label>
                <rdfs:seeAlso rdf:resource="Cat"/>
            </owl:Class>"#,
        )?;
        let graph = &outcome.graph;
        let dog = graph.get("http://example.org/other/Dog").unwrap();
        assert!(graph.has_child_edge(dog, rdfs::LABEL, graph.get("Dog@en").unwrap()));
        assert!(graph.has_child_edge(dog, rdfs::LABEL, graph.get("Hund").unwrap()));
        assert!(graph.get("http://example.org/other/Cat").is_some());
        Ok(())
    }

    #[test]
    fn invalid_language_tag_is_a_warning() -> Result<(), OwlXmlError> {
        let outcome = parse(
            r#"<owl:Class rdf:ID="Dog"><rdfs:label xml:lang="e n">Dog</rdfs:label></owl:Class>"#,
        )?;
        assert_eq!(outcome.diagnostics.warnings().len(), 1);
        assert!(outcome.graph.get("Dog@e n").is_some());
        Ok(())
    }

    #[test]
    fn named_blank_node_colliding_with_a_generated_one() -> Result<(), OwlXmlError> {
        let mut graph = Graph::new();
        let generated = graph.fresh_blank_uri();
        let name = generated.trim_start_matches("blankID:");
        let document = XmlDocument::parse(
            format!(r#"{HEADER}<owl:Class rdf:nodeID="{name}"/></rdf:RDF>"#).as_bytes(),
        )?;
        let diagnostics = OwlXmlParser::new().parse_into(&document, &mut graph)?;
        assert!(
            diagnostics
                .errors()
                .iter()
                .any(|e| e.kind() == DiagnosticKind::DuplicateDeclaration)
        );
        assert!(graph.get(&generated).is_none());
        Ok(())
    }

    #[test]
    fn unexpected_text_is_an_error() -> Result<(), OwlXmlError> {
        let outcome = parse(r#"<owl:Class rdf:ID="Dog">woof</owl:Class>"#)?;
        assert_eq!(outcome.diagnostics.errors().len(), 1);
        assert_eq!(
            outcome.diagnostics.errors()[0].message(),
            "Unexpected text 'woof' in owl:Class"
        );
        Ok(())
    }
}
