//! Generation scenarios, including documents parsed back after being written.

use owlgraph::vocab::{owl, rdf, rdfs};
use owlgraph::{Graph, NodeId, ResourceKind, is_blank_uri};
use owlrdfxml::{OwlXmlError, OwlXmlGenerator, OwlXmlParser, XmlElement};
use std::collections::BTreeSet;

const ZOO_DOCUMENT: &str = r##"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
    xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
    xmlns:owl="http://www.w3.org/2002/07/owl#"
    xmlns:zoo="http://example.com/zoo#"
    xml:base="http://example.com/zoo">
  <owl:Ontology rdf:about="">
    <owl:versionInfo>1.0</owl:versionInfo>
  </owl:Ontology>
  <owl:Class rdf:ID="Animal">
    <rdfs:label xml:lang="en">Animal</rdfs:label>
    <rdfs:comment rdf:parseType="Literal">Anything <b>alive</b></rdfs:comment>
  </owl:Class>
  <owl:Class rdf:ID="Herbivore">
    <rdfs:subClassOf rdf:resource="#Animal"/>
    <rdfs:subClassOf>
      <owl:Restriction>
        <owl:onProperty rdf:resource="#eats"/>
        <owl:allValuesFrom rdf:resource="#Plant"/>
      </owl:Restriction>
    </rdfs:subClassOf>
  </owl:Class>
  <owl:Class rdf:ID="Plant"/>
  <owl:ObjectProperty rdf:ID="eats">
    <rdfs:domain rdf:resource="#Animal"/>
  </owl:ObjectProperty>
  <owl:TransitiveProperty rdf:ID="partOf"/>
  <owl:DatatypeProperty rdf:ID="age">
    <rdfs:range rdf:resource="http://www.w3.org/2001/XMLSchema#integer"/>
  </owl:DatatypeProperty>
  <zoo:Herbivore rdf:ID="bambi">
    <zoo:age rdf:datatype="http://www.w3.org/2001/XMLSchema#integer">2</zoo:age>
    <rdfs:label>Bambi</rdfs:label>
  </zoo:Herbivore>
</rdf:RDF>"##;

/// The statements of a graph with blank node URIs replaced by a placeholder.
fn statements(graph: &Graph) -> BTreeSet<(String, String, String)> {
    let name = |node: NodeId| {
        let uri = graph.node(node).uri();
        if is_blank_uri(uri) { "_".to_owned() } else { uri.to_owned() }
    };
    graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let edge = graph.edge(edge);
            Some((
                name(edge.parent()?),
                edge.predicate().to_owned(),
                name(edge.child()?),
            ))
        })
        .collect()
}

/// The named nodes of a graph with their kind.
fn named_nodes(graph: &Graph) -> BTreeSet<(String, String)> {
    graph
        .nodes()
        .iter()
        .map(|node| graph.node(node))
        .filter(|node| !node.is_anonymous())
        .map(|node| {
            let kind = node
                .resource_kind()
                .map_or_else(|| "plain".to_owned(), |kind| kind.to_string());
            (node.uri().to_owned(), kind)
        })
        .collect()
}

fn reparse(graph: &Graph) -> Result<Graph, OwlXmlError> {
    let mut buffer = Vec::new();
    let diagnostics = OwlXmlGenerator::new().generate_to_writer(graph, &mut buffer)?;
    assert!(diagnostics.is_clean());
    let outcome = OwlXmlParser::new().parse_reader(buffer.as_slice())?;
    assert!(outcome.diagnostics.is_clean());
    Ok(outcome.graph)
}

fn link(graph: &mut Graph, parent: NodeId, predicate: &str, child: NodeId) {
    let edge = graph.new_edge(predicate);
    graph.attach_parent_node(edge, parent);
    graph.attach_child_node(edge, child);
    graph.add_edge(edge);
}

fn top_level<'a>(root: &'a XmlElement, id: &str) -> Vec<&'a XmlElement> {
    root.child_elements()
        .filter(|e| {
            e.attribute(Some(rdf::NAMESPACE), "ID") == Some(id)
                || e.attribute(Some(rdf::NAMESPACE), "about")
                    .and_then(|about| about.strip_prefix('#'))
                    == Some(id)
        })
        .collect()
}

#[test]
fn round_trip_keeps_nodes_and_statements() -> Result<(), OwlXmlError> {
    let original = OwlXmlParser::new()
        .parse_reader(ZOO_DOCUMENT.as_bytes())?
        .graph;
    let parsed = reparse(&original)?;
    assert_eq!(named_nodes(&parsed), named_nodes(&original));
    assert_eq!(statements(&parsed), statements(&original));
    assert_eq!(parsed.namespaces().base(), Some("http://example.com/zoo"));
    assert_eq!(
        parsed.namespaces().get("xmlns:zoo"),
        Some("http://example.com/zoo#")
    );

    // a second trip changes nothing either
    let again = reparse(&parsed)?;
    assert_eq!(statements(&again), statements(&original));
    Ok(())
}

#[test]
fn collection_is_regenerated_in_order() -> Result<(), OwlXmlError> {
    let original = OwlXmlParser::new()
        .parse_reader(
            r##"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
    xmlns:owl="http://www.w3.org/2002/07/owl#"
    xml:base="http://example.com/zoo">
  <owl:Class rdf:ID="Pet">
    <owl:unionOf rdf:parseType="Collection">
      <owl:Class rdf:about="#X"/>
      <owl:Class rdf:about="#Y"/>
      <owl:Class rdf:about="#Z"/>
    </owl:unionOf>
  </owl:Class>
</rdf:RDF>"##
                .as_bytes(),
        )?
        .graph;

    let root = OwlXmlGenerator::new()
        .generate(&original)?
        .document
        .into_root();
    let pet = top_level(&root, "Pet");
    assert_eq!(pet.len(), 1);
    let union_of = pet[0].child_elements().next().unwrap();
    assert!(union_of.has_name(owl::NAMESPACE, "unionOf"));
    assert_eq!(
        union_of.attribute(Some(rdf::NAMESPACE), "parseType"),
        Some("Collection")
    );
    let members = union_of
        .child_elements()
        .map(|member| {
            assert!(member.has_name(owl::NAMESPACE, "Class"));
            member.attribute(Some(rdf::NAMESPACE), "ID")
        })
        .collect::<Vec<_>>();
    assert_eq!(members, [Some("X"), Some("Y"), Some("Z")]);

    // members written inside the collection are only referenced at the top level
    let x = top_level(&root, "X");
    assert_eq!(x.len(), 1);
    assert_eq!(x[0].attribute(Some(rdf::NAMESPACE), "about"), Some("#X"));
    assert!(!x[0].has_child_elements());

    let parsed = reparse(&original)?;
    let pet = parsed.get("http://example.com/zoo#Pet").unwrap();
    let edge = parsed.node(pet).child_edges().for_predicate(owl::UNION_OF)[0];
    let collection = parsed.edge(edge).child().unwrap();
    let uris = parsed
        .collection_members(collection)?
        .iter()
        .map(|m| parsed.node(*m).uri())
        .collect::<Vec<_>>();
    assert_eq!(
        uris,
        [
            "http://example.com/zoo#X",
            "http://example.com/zoo#Y",
            "http://example.com/zoo#Z"
        ]
    );
    Ok(())
}

#[test]
fn named_cycle_terminates_with_references() -> Result<(), OwlXmlError> {
    let mut graph = Graph::new();
    graph.namespaces_mut().set_base("http://example.com/zoo");
    let a = graph.resolve_resource(
        Some("http://example.com/zoo#A"),
        ResourceKind::Class,
        owl::CLASS,
    );
    let b = graph.resolve_resource(
        Some("http://example.com/zoo#B"),
        ResourceKind::Class,
        owl::CLASS,
    );
    link(&mut graph, a, rdfs::SUB_CLASS_OF, b);
    link(&mut graph, b, rdfs::SUB_CLASS_OF, a);

    let root = OwlXmlGenerator::new().generate(&graph)?.document.into_root();
    let elements = root.child_elements().collect::<Vec<_>>();
    assert_eq!(elements.len(), 2);
    let references = elements
        .iter()
        .map(|e| {
            let edge = e.child_elements().next().unwrap();
            assert!(!edge.has_child_elements());
            edge.attribute(Some(rdf::NAMESPACE), "resource")
        })
        .collect::<Vec<_>>();
    assert_eq!(references, [Some("#B"), Some("#A")]);
    Ok(())
}

#[test]
fn anonymous_cycle_terminates_with_node_ids() -> Result<(), OwlXmlError> {
    let mut graph = Graph::new();
    graph.namespaces_mut().set_base("http://example.com/zoo");
    let a = graph.resolve_resource(
        Some("http://example.com/zoo#A"),
        ResourceKind::Class,
        owl::CLASS,
    );
    let first = graph.resolve_resource(None, ResourceKind::Class, owl::CLASS);
    let second = graph.resolve_resource(None, ResourceKind::Class, owl::CLASS);
    link(&mut graph, a, rdfs::SUB_CLASS_OF, first);
    link(&mut graph, first, rdfs::SUB_CLASS_OF, second);
    link(&mut graph, second, rdfs::SUB_CLASS_OF, first);

    let parsed = reparse(&graph)?;
    assert_eq!(statements(&parsed), statements(&graph));
    let a = parsed.get("http://example.com/zoo#A").unwrap();
    let edge = parsed.node(a).child_edges().for_predicate(rdfs::SUB_CLASS_OF)[0];
    let first = parsed.edge(edge).child().unwrap();
    let edge = parsed.node(first).child_edges().for_predicate(rdfs::SUB_CLASS_OF)[0];
    let second = parsed.edge(edge).child().unwrap();
    let edge = parsed.node(second).child_edges().for_predicate(rdfs::SUB_CLASS_OF)[0];
    assert_eq!(parsed.edge(edge).child(), Some(first));
    Ok(())
}

fn anonymous_restrictions(graph: &Graph) -> Vec<NodeId> {
    graph
        .nodes()
        .iter()
        .filter(|node| {
            let n = graph.node(*node);
            n.is_anonymous() && n.resource_kind() == Some(ResourceKind::Restriction)
        })
        .collect()
}

fn only_member(graph: &Graph, class: &str, predicate: &str) -> Result<NodeId, OwlXmlError> {
    let class = graph.get(class).unwrap();
    let edge = graph.node(class).child_edges().for_predicate(predicate)[0];
    let collection = graph.edge(edge).child().unwrap();
    let members = graph.collection_members(collection)?;
    assert_eq!(members.len(), 1);
    Ok(members[0])
}

#[test]
fn anonymous_node_shared_by_an_edge_and_a_collection() -> Result<(), OwlXmlError> {
    let original = OwlXmlParser::new()
        .parse_reader(
            r##"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
    xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
    xmlns:owl="http://www.w3.org/2002/07/owl#"
    xml:base="http://example.com/zoo">
  <owl:Class rdf:ID="A">
    <rdfs:subClassOf>
      <owl:Restriction rdf:nodeID="r">
        <owl:onProperty rdf:resource="#p"/>
      </owl:Restriction>
    </rdfs:subClassOf>
  </owl:Class>
  <owl:Class rdf:ID="B">
    <owl:unionOf rdf:parseType="Collection">
      <rdf:Description rdf:nodeID="r"/>
    </owl:unionOf>
  </owl:Class>
</rdf:RDF>"##
                .as_bytes(),
        )?
        .graph;
    assert_eq!(anonymous_restrictions(&original).len(), 1);

    let parsed = reparse(&original)?;
    assert_eq!(statements(&parsed), statements(&original));
    let restrictions = anonymous_restrictions(&parsed);
    assert_eq!(restrictions.len(), 1);
    let member = only_member(&parsed, "http://example.com/zoo#B", owl::UNION_OF)?;
    assert_eq!(member, restrictions[0]);
    assert!(parsed.node(member).child_edges().contains_predicate(owl::ON_PROPERTY));
    let a = parsed.get("http://example.com/zoo#A").unwrap();
    let edge = parsed.node(a).child_edges().for_predicate(rdfs::SUB_CLASS_OF)[0];
    assert_eq!(parsed.edge(edge).child(), Some(member));
    Ok(())
}

#[test]
fn anonymous_node_shared_by_two_collections() -> Result<(), OwlXmlError> {
    let original = OwlXmlParser::new()
        .parse_reader(
            r##"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
    xmlns:owl="http://www.w3.org/2002/07/owl#"
    xml:base="http://example.com/zoo">
  <owl:Class rdf:ID="B">
    <owl:unionOf rdf:parseType="Collection">
      <owl:Restriction rdf:nodeID="r">
        <owl:onProperty rdf:resource="#p"/>
      </owl:Restriction>
    </owl:unionOf>
  </owl:Class>
  <owl:Class rdf:ID="C">
    <owl:intersectionOf rdf:parseType="Collection">
      <rdf:Description rdf:nodeID="r"/>
    </owl:intersectionOf>
  </owl:Class>
</rdf:RDF>"##
                .as_bytes(),
        )?
        .graph;

    let root = OwlXmlGenerator::new()
        .generate(&original)?
        .document
        .into_root();
    let c = top_level(&root, "C");
    assert_eq!(c.len(), 1);
    let intersection_of = c[0].child_elements().next().unwrap();
    let reference = intersection_of.child_elements().next().unwrap();
    assert!(reference.has_name(rdf::NAMESPACE, "Description"));
    assert_eq!(reference.attribute(Some(rdf::NAMESPACE), "nodeID"), Some("r"));
    assert!(!reference.has_child_elements());

    let parsed = reparse(&original)?;
    assert_eq!(statements(&parsed), statements(&original));
    let restrictions = anonymous_restrictions(&parsed);
    assert_eq!(restrictions.len(), 1);
    let union_member = only_member(&parsed, "http://example.com/zoo#B", owl::UNION_OF)?;
    let intersection_member =
        only_member(&parsed, "http://example.com/zoo#C", owl::INTERSECTION_OF)?;
    assert_eq!(union_member, restrictions[0]);
    assert_eq!(intersection_member, restrictions[0]);
    assert!(parsed.node(union_member).child_edges().contains_predicate(owl::ON_PROPERTY));
    Ok(())
}

#[test]
fn empty_literals_keep_their_language_and_datatype() -> Result<(), OwlXmlError> {
    let mut graph = Graph::new();
    graph.namespaces_mut().set_base("http://example.com/zoo");
    let dog = graph.resolve_resource(
        Some("http://example.com/zoo#Dog"),
        ResourceKind::Class,
        owl::CLASS,
    );
    let tagged = graph.add_literal("", Some("en"), None);
    link(&mut graph, dog, rdfs::LABEL, tagged);
    let typed = graph.add_literal("", None, Some("http://www.w3.org/2001/XMLSchema#string"));
    link(&mut graph, dog, rdfs::COMMENT, typed);

    let parsed = reparse(&graph)?;
    assert_eq!(statements(&parsed), statements(&graph));
    assert!(parsed.get("@en").is_some());
    assert!(parsed.get("").is_none());
    Ok(())
}

#[test]
fn indentation_is_configurable() -> Result<(), OwlXmlError> {
    let mut graph = Graph::new();
    graph.namespaces_mut().set_base("http://example.com/zoo");
    graph.resolve_resource(
        Some("http://example.com/zoo#Dog"),
        ResourceKind::Class,
        owl::CLASS,
    );
    let mut buffer = Vec::new();
    OwlXmlGenerator::new()
        .with_indentation(b' ', 2)
        .generate_to_writer(&graph, &mut buffer)?;
    let xml = String::from_utf8_lossy(&buffer);
    assert!(xml.contains("\n  <owl:Class rdf:ID=\"Dog\"/>"));
    Ok(())
}
