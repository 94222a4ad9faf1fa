//! Provides ready to use URIs for the vocabularies the ontology graph relies on.

/// Prefix of the synthesized URIs given to blank nodes.
pub const BLANK_NODE_PREFIX: &str = "blankID:";

/// Base URI used when a document declares no usable base.
pub const DEFAULT_BASE_URI: &str = "http://unknown.org/";

pub mod owl {
    //! [OWL](https://www.w3.org/TR/owl-ref/) vocabulary.

    /// The OWL namespace.
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";
    /// The usual prefix of the OWL namespace.
    pub const PREFIX: &str = "owl";

    pub const ALL_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#allValuesFrom";
    pub const ANNOTATION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AnnotationProperty";
    pub const BACKWARD_COMPATIBLE_WITH: &str =
        "http://www.w3.org/2002/07/owl#backwardCompatibleWith";
    pub const CARDINALITY: &str = "http://www.w3.org/2002/07/owl#cardinality";
    /// The class of OWL classes.
    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    pub const COMPLEMENT_OF: &str = "http://www.w3.org/2002/07/owl#complementOf";
    /// The class of enumerated data values.
    pub const DATA_RANGE: &str = "http://www.w3.org/2002/07/owl#DataRange";
    /// The class of properties linking individuals to data values.
    pub const DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    pub const DIFFERENT_FROM: &str = "http://www.w3.org/2002/07/owl#differentFrom";
    pub const DISJOINT_WITH: &str = "http://www.w3.org/2002/07/owl#disjointWith";
    pub const DISTINCT_MEMBERS: &str = "http://www.w3.org/2002/07/owl#distinctMembers";
    pub const EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";
    pub const EQUIVALENT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#equivalentProperty";
    pub const FUNCTIONAL_PROPERTY: &str = "http://www.w3.org/2002/07/owl#FunctionalProperty";
    pub const HAS_VALUE: &str = "http://www.w3.org/2002/07/owl#hasValue";
    pub const IMPORTS: &str = "http://www.w3.org/2002/07/owl#imports";
    pub const INCOMPATIBLE_WITH: &str = "http://www.w3.org/2002/07/owl#incompatibleWith";
    pub const INTERSECTION_OF: &str = "http://www.w3.org/2002/07/owl#intersectionOf";
    pub const INVERSE_FUNCTIONAL_PROPERTY: &str =
        "http://www.w3.org/2002/07/owl#InverseFunctionalProperty";
    pub const INVERSE_OF: &str = "http://www.w3.org/2002/07/owl#inverseOf";
    pub const MAX_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#maxCardinality";
    pub const MIN_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#minCardinality";
    /// The class of properties linking individuals to individuals.
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    pub const ONE_OF: &str = "http://www.w3.org/2002/07/owl#oneOf";
    pub const ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
    /// The class of ontologies.
    pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    pub const ONTOLOGY_PROPERTY: &str = "http://www.w3.org/2002/07/owl#OntologyProperty";
    pub const PRIOR_VERSION: &str = "http://www.w3.org/2002/07/owl#priorVersion";
    /// The class of property restrictions.
    pub const RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
    pub const SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";
    pub const SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";
    pub const SYMMETRIC_PROPERTY: &str = "http://www.w3.org/2002/07/owl#SymmetricProperty";
    pub const TRANSITIVE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#TransitiveProperty";
    pub const UNION_OF: &str = "http://www.w3.org/2002/07/owl#unionOf";
    pub const VERSION_INFO: &str = "http://www.w3.org/2002/07/owl#versionInfo";
}

pub mod rdf {
    //! [RDF](https://www.w3.org/TR/rdf11-concepts/) vocabulary.

    /// The RDF namespace.
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// The usual prefix of the RDF namespace.
    pub const PREFIX: &str = "rdf";

    /// Local name of the document element.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
    pub const ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
    pub const DATATYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype";
    pub const DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
    /// The first item in the subject RDF list.
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    pub const ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ID";
    /// The class of RDF lists.
    pub const LIST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#List";
    /// The empty list.
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    pub const NODE_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID";
    pub const PARSE_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType";
    /// The class of RDF properties.
    pub const PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
    pub const RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";
    /// The rest of the subject RDF list after the first item.
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    /// The subject is an instance of a class.
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// Idiomatic property used for structured values.
    pub const VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
    /// The datatype of XML literal values.
    pub const XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";
}

pub mod rdfs {
    //! [RDFS](https://www.w3.org/TR/rdf-schema/) vocabulary.

    /// The RDFS namespace.
    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// The usual prefix of the RDFS namespace.
    pub const PREFIX: &str = "rdfs";

    /// A description of the subject resource.
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    /// The class of RDF datatypes.
    pub const DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
    /// A domain of the subject property.
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    /// A human-readable name for the subject.
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// A range of the subject property.
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    /// Further information about the subject resource.
    pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
    /// The subject is a subclass of a class.
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    /// The subject is a subproperty of a property.
    pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
}

pub mod xsd {
    //! [XML Schema](https://www.w3.org/TR/xmlschema11-2/) datatypes vocabulary.

    /// The XML Schema namespace.
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
    /// The usual prefix of the XML Schema namespace.
    pub const PREFIX: &str = "xsd";

    /// true, false
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    /// Arbitrary-precision decimal numbers.
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    /// Arbitrary-size integer numbers.
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    /// Character strings.
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
}

pub mod xml {
    //! Reserved XML names.

    /// The XML namespace, bound to the `xml` prefix.
    pub const NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
    /// Namespace map key holding the base URI.
    pub const BASE: &str = "xml:base";
    pub const LANG: &str = "xml:lang";
}
