//! A small XML element tree: the boundary between the XML front end and the ontology mapping.
//!
//! [`XmlDocument::parse`] builds the tree with a [`quick_xml::NsReader`] and [`XmlDocument::write`]
//! serializes it back with a [`quick_xml::Writer`].

use crate::error::OwlXmlError;
use owlgraph::vocab::xml;
use quick_xml::escape::{resolve_xml_entity, unescape_with};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{PrefixDeclaration, QName, ResolveResult};
use quick_xml::{Decoder, NsReader, Writer};
use rustc_hash::FxHashMap;
use std::io::{BufRead, BufReader, Read, Write};
use tracing::trace;

/// The namespace of the `xmlns` attributes.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// An XML document: a root element and the base URI the document was retrieved from, if known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
    base_uri: Option<String>,
}

impl XmlDocument {
    #[inline]
    pub fn new(root: XmlElement) -> Self {
        Self {
            root,
            base_uri: None,
        }
    }

    /// Sets the URI the document was retrieved from.
    ///
    /// The parser uses it when the root element has no usable `xml:base`.
    #[inline]
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    #[inline]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    #[inline]
    pub fn into_root(self) -> XmlElement {
        self.root
    }

    #[inline]
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }

    /// Reads a document.
    ///
    /// Entities declared in the internal DOCTYPE subset are expanded in text and attribute values.
    ///
    /// ```
    /// use owlrdfxml::XmlDocument;
    ///
    /// let document = XmlDocument::parse(
    ///     r#"<!DOCTYPE rdf:RDF [<!ENTITY ex "http://example.com/">]>
    ///     <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
    ///         <rdf:Description rdf:about="&ex;foo"/>
    ///     </rdf:RDF>"#
    ///         .as_bytes(),
    /// )?;
    /// let description = document.root().child_elements().next().unwrap();
    /// assert_eq!(description.local_name(), "Description");
    /// assert_eq!(
    ///     description.attribute(Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#"), "about"),
    ///     Some("http://example.com/foo")
    /// );
    /// # Result::<_, owlrdfxml::OwlXmlError>::Ok(())
    /// ```
    pub fn parse(read: impl Read) -> Result<Self, OwlXmlError> {
        let mut reader = NsReader::from_reader(BufReader::new(read));
        reader.config_mut().expand_empty_elements = true;
        TreeReader {
            reader,
            custom_entities: FxHashMap::default(),
            open: Vec::new(),
            root: None,
        }
        .read()
    }

    /// Writes the document with an XML declaration and a tab indentation.
    pub fn write<W: Write>(&self, write: W) -> Result<W, OwlXmlError> {
        self.write_with_indentation(write, Some((b'\t', 1)))
    }

    /// Writes the document with an XML declaration and, if given, an indentation of `size`
    /// times the `indent_char` byte per level.
    pub fn write_with_indentation<W: Write>(
        &self,
        write: W,
        indentation: Option<(u8, usize)>,
    ) -> Result<W, OwlXmlError> {
        let mut writer = match indentation {
            Some((indent_char, size)) => Writer::new_with_indent(write, indent_char, size),
            None => Writer::new(write),
        };
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(quick_xml::Error::from)?;
        write_element(&mut writer, &self.root)?;
        Ok(writer.into_inner())
    }

    /// Serializes the document into a string.
    pub fn to_xml_string(&self) -> Result<String, OwlXmlError> {
        let buffer = self.write(Vec::new())?;
        String::from_utf8(buffer).map_err(|e| OwlXmlError::syntax(e.to_string()))
    }
}

/// An XML element with its namespace resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    prefix: Option<String>,
    local_name: String,
    namespace: Option<String>,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Builds an element. `prefix` is the prefix the element is written with, `namespace` the
    /// namespace URI it resolves to.
    pub fn new(
        prefix: Option<&str>,
        local_name: impl Into<String>,
        namespace: Option<&str>,
    ) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()).map(Into::into),
            local_name: local_name.into(),
            namespace: namespace.map(Into::into),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The name as written in the document, like `owl:Class`.
    pub fn qualified_name(&self) -> String {
        qualified_name(self.prefix.as_deref(), &self.local_name)
    }

    /// Checks the namespace and local name.
    #[inline]
    pub fn has_name(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name == local_name
    }

    #[inline]
    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// The value of the attribute with this namespace and local name.
    pub fn attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == namespace && a.local_name == local_name)
            .map(XmlAttribute::value)
    }

    /// The value of an attribute of the `xml` namespace, like `xml:lang`.
    pub fn xml_attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.is_xml_attribute() && a.local_name == local_name)
            .map(XmlAttribute::value)
    }

    /// Appends an attribute, replacing the value of an attribute with the same qualified name.
    pub fn push_attribute(&mut self, attribute: XmlAttribute) {
        if let Some(existing) = self
            .attributes
            .iter_mut()
            .find(|a| a.prefix == attribute.prefix && a.local_name == attribute.local_name)
        {
            existing.value = attribute.value;
        } else {
            self.attributes.push(attribute);
        }
    }

    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) | XmlNode::CData(_) | XmlNode::Comment(_) | XmlNode::Raw(_) => None,
        })
    }

    pub fn has_child_elements(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// The concatenation of the text and CDATA children.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            if let XmlNode::Text(t) | XmlNode::CData(t) = child {
                text.push_str(t);
            }
        }
        text
    }

    pub fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    #[inline]
    pub fn push_element(&mut self, element: XmlElement) {
        self.push_child(XmlNode::Element(element));
    }

    /// Appends text, merging it with a directly preceding text child.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if let Some(XmlNode::Text(previous)) = self.children.last_mut() {
            previous.push_str(&text);
        } else {
            self.children.push(XmlNode::Text(text));
        }
    }

    /// Serializes the children of the element, without indentation.
    pub fn inner_xml(&self) -> Result<String, OwlXmlError> {
        let mut writer = Writer::new(Vec::new());
        for child in &self.children {
            write_node(&mut writer, child)?;
        }
        String::from_utf8(writer.into_inner()).map_err(|e| OwlXmlError::syntax(e.to_string()))
    }
}

/// An attribute of an [`XmlElement`].
///
/// Namespace declarations are attributes too, in the [`XMLNS_NAMESPACE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    prefix: Option<String>,
    local_name: String,
    namespace: Option<String>,
    value: String,
}

impl XmlAttribute {
    pub fn new(
        prefix: Option<&str>,
        local_name: impl Into<String>,
        namespace: Option<&str>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()).map(Into::into),
            local_name: local_name.into(),
            namespace: namespace.map(Into::into),
            value: value.into(),
        }
    }

    /// An unprefixed attribute in no namespace.
    #[inline]
    pub fn unqualified(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(None, local_name, None, value)
    }

    /// A `xmlns:prefix="namespace"` declaration, or `xmlns="namespace"` if `prefix` is empty.
    pub fn namespace_declaration(prefix: &str, namespace: impl Into<String>) -> Self {
        if prefix.is_empty() {
            Self::new(None, "xmlns", Some(XMLNS_NAMESPACE), namespace)
        } else {
            Self::new(Some("xmlns"), prefix, Some(XMLNS_NAMESPACE), namespace)
        }
    }

    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The name as written in the document, like `rdf:about` or `xmlns:owl`.
    pub fn qualified_name(&self) -> String {
        qualified_name(self.prefix.as_deref(), &self.local_name)
    }

    #[inline]
    pub fn is_namespace_declaration(&self) -> bool {
        self.namespace.as_deref() == Some(XMLNS_NAMESPACE)
    }

    /// Checks if the attribute is in the `xml` namespace, like `xml:lang` and `xml:base`.
    #[inline]
    pub fn is_xml_attribute(&self) -> bool {
        self.prefix.as_deref() == Some("xml") || self.namespace.as_deref() == Some(xml::NAMESPACE)
    }
}

/// A child of an [`XmlElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
    /// Serialized XML written as is.
    Raw(String),
}

fn qualified_name(prefix: Option<&str>, local_name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}:{local_name}"),
        None => local_name.into(),
    }
}

struct TreeReader<R> {
    reader: NsReader<R>,
    custom_entities: FxHashMap<String, String>,
    open: Vec<XmlElement>,
    root: Option<XmlElement>,
}

impl<R: BufRead> TreeReader<R> {
    fn read(mut self) -> Result<XmlDocument, OwlXmlError> {
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            match self.reader.read_event_into(&mut buffer)? {
                Event::Start(event) => {
                    let element = self.start_element(&event)?;
                    trace!("Reading element {}", element.qualified_name());
                    self.open.push(element);
                }
                Event::End(_) => {
                    let Some(element) = self.open.pop() else {
                        return Err(OwlXmlError::syntax("Unexpected closing tag"));
                    };
                    if let Some(parent) = self.open.last_mut() {
                        parent.push_element(element);
                    } else if self.root.is_none() {
                        self.root = Some(element);
                    } else {
                        return Err(OwlXmlError::syntax(
                            "An XML document must have a single root element",
                        ));
                    }
                }
                Event::Empty(_) => {
                    return Err(OwlXmlError::syntax(
                        "The expand_empty_elements option must be enabled",
                    ));
                }
                Event::Text(event) => {
                    let text = event
                        .unescape_with(|e| self.resolve_entity(e))
                        .map_err(quick_xml::Error::from)?
                        .into_owned();
                    if let Some(element) = self.open.last_mut() {
                        element.push_text(text);
                    }
                }
                Event::CData(event) => {
                    let text = self.decoder().decode(&event).map_err(quick_xml::Error::from)?;
                    let text = text.into_owned();
                    if let Some(element) = self.open.last_mut() {
                        element.push_child(XmlNode::CData(text));
                    }
                }
                Event::Comment(event) => {
                    let text = self.decoder().decode(&event).map_err(quick_xml::Error::from)?;
                    let text = text.into_owned();
                    if let Some(element) = self.open.last_mut() {
                        element.push_child(XmlNode::Comment(text));
                    }
                }
                Event::PI(_) => (),
                Event::Decl(decl) => {
                    if let Some(encoding) = decl.encoding() {
                        if !is_utf8(&encoding.map_err(quick_xml::Error::from)?) {
                            return Err(OwlXmlError::syntax(
                                "Only UTF-8 is supported by the OWL RDF/XML parser",
                            ));
                        }
                    }
                }
                Event::DocType(dt) => self.parse_doctype(&dt)?,
                Event::Eof => break,
            }
        }
        if !self.open.is_empty() {
            return Err(OwlXmlError::syntax("Unexpected end of the XML document"));
        }
        let root = self
            .root
            .ok_or_else(|| OwlXmlError::syntax("The XML document has no root element"))?;
        Ok(XmlDocument::new(root))
    }

    fn start_element(&self, event: &BytesStart<'_>) -> Result<XmlElement, OwlXmlError> {
        let (namespace, local_name) = self.reader.resolve_element(event.name());
        let mut element = XmlElement::new(
            self.decode_prefix(event.name())?.as_deref(),
            self.decoder()
                .decode(local_name.as_ref())
                .map_err(quick_xml::Error::from)?,
            self.resolve_namespace(event.name(), namespace)?.as_deref(),
        );
        for attribute in event.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::InvalidAttr)?;
            let value = attribute
                .decode_and_unescape_value_with(self.decoder(), |e| self.resolve_entity(e))?
                .into_owned();
            let attribute = if let Some(binding) = attribute.key.as_namespace_binding() {
                let prefix = match binding {
                    PrefixDeclaration::Named(prefix) => self
                        .decoder()
                        .decode(prefix)
                        .map_err(quick_xml::Error::from)?
                        .into_owned(),
                    PrefixDeclaration::Default => String::new(),
                };
                XmlAttribute::namespace_declaration(&prefix, value)
            } else {
                let (namespace, local_name) = self.reader.resolve_attribute(attribute.key);
                XmlAttribute::new(
                    self.decode_prefix(attribute.key)?.as_deref(),
                    self.decoder()
                        .decode(local_name.as_ref())
                        .map_err(quick_xml::Error::from)?,
                    self.resolve_namespace(attribute.key, namespace)?.as_deref(),
                    value,
                )
            };
            element.attributes.push(attribute);
        }
        Ok(element)
    }

    fn decode_prefix(&self, name: QName<'_>) -> Result<Option<String>, OwlXmlError> {
        let Some(prefix) = name.prefix() else {
            return Ok(None);
        };
        Ok(Some(
            self.decoder()
                .decode(prefix.as_ref())
                .map_err(quick_xml::Error::from)?
                .into_owned(),
        ))
    }

    fn resolve_namespace(
        &self,
        name: QName<'_>,
        namespace: ResolveResult<'_>,
    ) -> Result<Option<String>, OwlXmlError> {
        match namespace {
            ResolveResult::Bound(namespace) => Ok(Some(
                self.decoder()
                    .decode(namespace.as_ref())
                    .map_err(quick_xml::Error::from)?
                    .into_owned(),
            )),
            ResolveResult::Unbound => Ok(None),
            ResolveResult::Unknown(prefix) if prefix == b"xml" => Ok(Some(xml::NAMESPACE.into())),
            ResolveResult::Unknown(prefix) => Err(OwlXmlError::syntax(format!(
                "Unknown prefix {}: in {}",
                self.decoder()
                    .decode(&prefix)
                    .map_err(quick_xml::Error::from)?,
                self.decoder()
                    .decode(name.as_ref())
                    .map_err(quick_xml::Error::from)?
            ))),
        }
    }

    fn parse_doctype(&mut self, dt: &BytesText<'_>) -> Result<(), OwlXmlError> {
        let doctype = self
            .decoder()
            .decode(dt.as_ref())
            .map_err(quick_xml::Error::from)?
            .into_owned();
        for input in doctype.split('<').skip(1) {
            let Some(input) = input.strip_prefix("!ENTITY") else {
                continue;
            };
            let input = input.trim_start().strip_prefix('%').unwrap_or(input);
            let (entity_name, input) = input
                .trim_start()
                .split_once(|c: char| c.is_ascii_whitespace())
                .ok_or_else(|| {
                    OwlXmlError::syntax(
                        "<!ENTITY declarations should contain both an entity name and an entity value",
                    )
                })?;
            let input = input.trim_start();
            let quote = match input.chars().next() {
                Some(q @ ('"' | '\'')) => q,
                _ => {
                    return Err(OwlXmlError::syntax(
                        "<!ENTITY values should be enclosed in quotes",
                    ));
                }
            };
            let (entity_value, input) = input[1..].split_once(quote).ok_or_else(|| {
                OwlXmlError::syntax("<!ENTITY declarations values should be enclosed in quotes")
            })?;
            input.trim_start().strip_prefix('>').ok_or_else(|| {
                OwlXmlError::syntax("<!ENTITY declarations values should end with >")
            })?;

            // Resolves custom entities within the current entity definition.
            let entity_value = unescape_with(entity_value, |e| self.resolve_entity(e))
                .map_err(quick_xml::Error::from)?
                .into_owned();
            self.custom_entities
                .insert(entity_name.to_owned(), entity_value);
        }
        Ok(())
    }

    #[inline]
    fn decoder(&self) -> Decoder {
        self.reader.decoder()
    }

    fn resolve_entity(&self, e: &str) -> Option<&str> {
        resolve_xml_entity(e).or_else(|| self.custom_entities.get(e).map(String::as_str))
    }
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
) -> Result<(), OwlXmlError> {
    let name = element.qualified_name();
    let mut start = BytesStart::new(name.as_str());
    for attribute in &element.attributes {
        start.push_attribute((attribute.qualified_name().as_str(), attribute.value.as_str()));
    }
    if element.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(quick_xml::Error::from)?;
        return Ok(());
    }
    writer
        .write_event(Event::Start(start))
        .map_err(quick_xml::Error::from)?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(name.as_str())))
        .map_err(quick_xml::Error::from)?;
    Ok(())
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &XmlNode) -> Result<(), OwlXmlError> {
    let event = match node {
        XmlNode::Element(element) => return write_element(writer, element),
        XmlNode::Text(text) => Event::Text(BytesText::new(text)),
        XmlNode::CData(text) => Event::CData(BytesCData::new(text.as_str())),
        XmlNode::Comment(text) => Event::Comment(BytesText::from_escaped(text.as_str())),
        XmlNode::Raw(xml) => Event::Text(BytesText::from_escaped(xml.as_str())),
    };
    writer
        .write_event(event)
        .map_err(quick_xml::Error::from)?;
    Ok(())
}

fn is_utf8(encoding: &[u8]) -> bool {
    matches!(
        encoding.to_ascii_lowercase().as_slice(),
        b"unicode-1-1-utf-8"
            | b"unicode11utf8"
            | b"unicode20utf8"
            | b"utf-8"
            | b"utf8"
            | b"x-unicode20utf8"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    #[test]
    fn namespaces_are_resolved() -> Result<(), OwlXmlError> {
        let document = XmlDocument::parse(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns="http://example.com/" xml:base="http://example.com/base">
                <Thing rdf:ID="a" label="x"/>
            </rdf:RDF>"#
                .as_bytes(),
        )?;
        let root = document.root();
        assert!(root.has_name(RDF, "RDF"));
        assert_eq!(root.qualified_name(), "rdf:RDF");
        assert_eq!(root.xml_attribute("base"), Some("http://example.com/base"));
        let declarations = root
            .attributes()
            .iter()
            .filter(|a| a.is_namespace_declaration())
            .map(XmlAttribute::qualified_name)
            .collect::<Vec<_>>();
        assert_eq!(declarations, ["xmlns:rdf", "xmlns"]);

        let thing = root.child_elements().next().unwrap();
        assert_eq!(thing.namespace(), Some("http://example.com/"));
        assert_eq!(thing.prefix(), None);
        assert_eq!(thing.attribute(Some(RDF), "ID"), Some("a"));
        // default namespaces do not apply to attributes
        assert_eq!(thing.attribute(None, "label"), Some("x"));
        Ok(())
    }

    #[test]
    fn unknown_prefix_is_rejected() {
        assert!(matches!(
            XmlDocument::parse("<foo:bar/>".as_bytes()),
            Err(OwlXmlError::Syntax(_))
        ));
    }

    #[test]
    fn text_is_unescaped_and_merged() -> Result<(), OwlXmlError> {
        let document = XmlDocument::parse("<a>x &amp; <![CDATA[<y>]]>z</a>".as_bytes())?;
        assert_eq!(document.root().text(), "x & <y>z");
        Ok(())
    }

    #[test]
    fn write_escapes_values() -> Result<(), OwlXmlError> {
        let mut root = XmlElement::new(Some("rdf"), "RDF", Some(RDF));
        root.push_attribute(XmlAttribute::namespace_declaration("rdf", RDF));
        let mut description = XmlElement::new(Some("rdf"), "Description", Some(RDF));
        description.push_attribute(XmlAttribute::new(
            Some("rdf"),
            "about",
            Some(RDF),
            "http://example.com/?a&b",
        ));
        description.push_text("1 < 2");
        root.push_element(description);
        let xml = XmlDocument::new(root).to_xml_string()?;
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.contains(
            r#"<rdf:Description rdf:about="http://example.com/?a&amp;b">1 &lt; 2</rdf:Description>"#
        ));
        Ok(())
    }

    #[test]
    fn inner_xml_keeps_markup() -> Result<(), OwlXmlError> {
        let document =
            XmlDocument::parse(r#"<a>Some <b class="x">bold</b> text</a>"#.as_bytes())?;
        assert_eq!(
            document.root().inner_xml()?,
            r#"Some <b class="x">bold</b> text"#
        );
        Ok(())
    }
}
