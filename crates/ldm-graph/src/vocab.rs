//! Well-known vocabulary terms
//!
//! IRIs of the RDF, RDFS, XSD, SHACL, DASH and workbench terms the property
//! model interprets.

/// RDF core terms
pub mod rdf {
    /// Namespace
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// `rdf:type`
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:List`
    pub const LIST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#List";
    /// `rdf:nil`
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

/// RDF schema terms
pub mod rdfs {
    /// Namespace
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// `rdfs:label`
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// `rdfs:comment`
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    /// `rdfs:Class`
    pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    /// `rdfs:subClassOf`
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
}

/// XML schema datatypes
pub mod xsd {
    /// Namespace
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    /// `xsd:string`
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// `xsd:boolean`
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    /// `xsd:integer`
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    /// `xsd:long`
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    /// `xsd:int`
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    /// `xsd:short`
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    /// `xsd:byte`
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
    /// `xsd:nonNegativeInteger`
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    /// `xsd:positiveInteger`
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
    /// `xsd:decimal`
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    /// `xsd:double`
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    /// `xsd:float`
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    /// `xsd:date`
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    /// `xsd:dateTime`
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    /// `xsd:time`
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
}

/// SHACL terms
pub mod sh {
    /// Namespace
    pub const NS: &str = "http://www.w3.org/ns/shacl#";
    /// `sh:NodeShape`
    pub const NODE_SHAPE: &str = "http://www.w3.org/ns/shacl#NodeShape";
    /// `sh:PropertyShape`
    pub const PROPERTY_SHAPE: &str = "http://www.w3.org/ns/shacl#PropertyShape";
    /// `sh:targetClass`
    pub const TARGET_CLASS: &str = "http://www.w3.org/ns/shacl#targetClass";
    /// `sh:property`
    pub const PROPERTY: &str = "http://www.w3.org/ns/shacl#property";
    /// `sh:path`
    pub const PATH: &str = "http://www.w3.org/ns/shacl#path";
    /// `sh:name`
    pub const NAME: &str = "http://www.w3.org/ns/shacl#name";
    /// `sh:description`
    pub const DESCRIPTION: &str = "http://www.w3.org/ns/shacl#description";
    /// `sh:order`
    pub const ORDER: &str = "http://www.w3.org/ns/shacl#order";
    /// `sh:datatype`
    pub const DATATYPE: &str = "http://www.w3.org/ns/shacl#datatype";
    /// `sh:class`
    pub const CLASS: &str = "http://www.w3.org/ns/shacl#class";
    /// `sh:minCount`
    pub const MIN_COUNT: &str = "http://www.w3.org/ns/shacl#minCount";
    /// `sh:maxCount`
    pub const MAX_COUNT: &str = "http://www.w3.org/ns/shacl#maxCount";
    /// `sh:maxLength`
    pub const MAX_LENGTH: &str = "http://www.w3.org/ns/shacl#maxLength";
    /// `sh:in`
    pub const IN: &str = "http://www.w3.org/ns/shacl#in";
    /// `sh:nodeKind`
    pub const NODE_KIND: &str = "http://www.w3.org/ns/shacl#nodeKind";
    /// `sh:IRI`
    pub const IRI: &str = "http://www.w3.org/ns/shacl#IRI";
    /// `sh:node`
    pub const NODE: &str = "http://www.w3.org/ns/shacl#node";
    /// `sh:PrefixDeclaration`
    pub const PREFIX_DECLARATION: &str = "http://www.w3.org/ns/shacl#PrefixDeclaration";
    /// `sh:prefix`
    pub const PREFIX: &str = "http://www.w3.org/ns/shacl#prefix";
    /// `sh:namespace`
    pub const NAMESPACE: &str = "http://www.w3.org/ns/shacl#namespace";
}

/// DASH terms
pub mod dash {
    /// `dash:ListShape`
    pub const LIST_SHAPE: &str = "http://datashapes.org/dash#ListShape";
}

/// Workbench specific terms
pub mod fs {
    /// Namespace
    pub const NS: &str = "https://fairspace.nl/ontology#";
    /// Deletion marker: a property whose only value is `fs:nil` has been emptied
    pub const NIL: &str = "https://fairspace.nl/ontology#nil";
    /// Flag on property and node shapes hidden from users
    pub const MACHINE_ONLY: &str = "https://fairspace.nl/ontology#machineOnly";
    /// Flag on node shapes that permit no property additions
    pub const FIXED_SHAPE: &str = "https://fairspace.nl/ontology#fixedShape";
    /// Structural properties of a fixed node shape
    pub const SYSTEM_PROPERTIES: &str = "https://fairspace.nl/ontology#systemProperties";
    /// Markdown text datatype
    pub const MARKDOWN: &str = "https://fairspace.nl/ontology#markdown";
    /// Marks the default prefix declaration
    pub const DEFAULT_NAMESPACE: &str = "https://fairspace.nl/ontology#defaultNamespace";
}
