//! Testing utilities for the LDM workspace
//!
//! Shared fixtures: a small vocabulary describing collections and people, the
//! meta-vocabulary used to edit node shapes, and matching metadata.

#![allow(missing_docs)]

use ldm_graph::vocab::{dash, fs, rdf, rdfs, sh, xsd};
use ldm_graph::{Graph, Iri, Literal, Statement, Value};

pub const EX: &str = "http://example.com/ontology#";

pub const COLLECTION: &str = "https://fairspace.nl/ontology#Collection";
pub const PERSON: &str = "http://example.com/ontology#Person";
pub const AGENT: &str = "http://example.com/ontology#Agent";

pub const COLLECTION_SHAPE: &str = "http://example.com/shapes#CollectionShape";
pub const PERSON_SHAPE: &str = "http://example.com/shapes#PersonShape";
pub const AGENT_SHAPE: &str = "http://example.com/shapes#AgentShape";

pub const NAME_SHAPE: &str = "http://example.com/shapes#name";
pub const DESCRIPTION_SHAPE: &str = "http://example.com/shapes#description";
pub const CREATED_BY_SHAPE: &str = "http://example.com/shapes#createdBy";
pub const DATE_CREATED_SHAPE: &str = "http://example.com/shapes#dateCreated";
pub const KEYWORD_SHAPE: &str = "http://example.com/shapes#keyword";
pub const STATUS_SHAPE: &str = "http://example.com/shapes#status";
pub const SIZE_SHAPE: &str = "http://example.com/shapes#size";
pub const HOMEPAGE_SHAPE: &str = "http://example.com/shapes#homepage";
pub const AUTHORS_SHAPE: &str = "http://example.com/shapes#authors";
pub const PUBLISHED_SHAPE: &str = "http://example.com/shapes#published";
pub const PERSON_NAME_SHAPE: &str = "http://example.com/shapes#personName";
pub const EMAIL_SHAPE: &str = "http://example.com/shapes#email";

pub const CREATED_BY: &str = "https://fairspace.nl/ontology#createdBy";
pub const DATE_CREATED: &str = "https://fairspace.nl/ontology#dateCreated";
pub const KEYWORD: &str = "http://example.com/ontology#keyword";
pub const STATUS: &str = "http://example.com/ontology#status";
pub const SIZE: &str = "http://example.com/ontology#size";
pub const HOMEPAGE: &str = "http://example.com/ontology#homepage";
pub const AUTHORS: &str = "http://example.com/ontology#authors";
pub const PUBLISHED: &str = "http://example.com/ontology#published";
pub const EMAIL: &str = "http://example.com/ontology#email";

pub const DRAFT: &str = "http://example.com/ontology#Draft";
pub const FINAL: &str = "http://example.com/ontology#Final";

pub const COLLECTION_1: &str = "http://example.com/iri/collection1";
pub const USER_1: &str = "http://example.com/iri/user1";
pub const PERSON_1: &str = "http://example.com/iri/person1";
pub const PERSON_2: &str = "http://example.com/iri/person2";

pub const META_NODE_SHAPE: &str = "http://example.com/meta#NodeShapeShape";
pub const META_NAME_SHAPE: &str = "http://example.com/meta#name";
pub const META_DESCRIPTION_SHAPE: &str = "http://example.com/meta#description";
pub const META_PROPERTY_SHAPE: &str = "http://example.com/meta#property";

/// Small helper for writing graphs in tests
#[derive(Debug, Default)]
pub struct GraphBuilder(Graph);

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference(mut self, s: &str, p: &str, o: &str) -> Self {
        self.0.insert(Statement::new(s, p, Iri::new(o)));
        self
    }

    pub fn literal(mut self, s: &str, p: &str, o: &str) -> Self {
        self.0.insert(Statement::new(s, p, Value::literal(o)));
        self
    }

    pub fn typed(mut self, s: &str, p: &str, o: &str, datatype: &str) -> Self {
        self.0.insert(Statement::new(s, p, Literal::typed(o, datatype)));
        self
    }

    pub fn list(mut self, s: &str, p: &str, items: &[&str]) -> Self {
        let items = items.iter().map(|i| Value::reference(*i)).collect();
        self.0.insert(Statement::new(s, p, Value::List(items)));
        self
    }

    pub fn statement(mut self, statement: Statement) -> Self {
        self.0.insert(statement);
        self
    }

    pub fn build(self) -> Graph {
        self.0
    }

    fn property_shape(self, id: &str, path: &str, name: &str, order: Option<i64>) -> Self {
        let builder = self
            .reference(id, rdf::TYPE, sh::PROPERTY_SHAPE)
            .reference(id, sh::PATH, path)
            .literal(id, sh::NAME, name);
        match order {
            Some(order) => builder.typed(id, sh::ORDER, &order.to_string(), xsd::INTEGER),
            None => builder,
        }
    }

    fn count(self, id: &str, predicate: &str, n: u32) -> Self {
        self.typed(id, predicate, &n.to_string(), xsd::INTEGER)
    }

    fn flag(self, id: &str, predicate: &str) -> Self {
        self.typed(id, predicate, "true", xsd::BOOLEAN)
    }
}

/// Vocabulary with collection, person and agent shapes
///
/// `CollectionShape` is fixed; its name and creator property shapes are
/// system properties.
pub fn vocabulary() -> Graph {
    GraphBuilder::new()
        .reference("http://example.com/ns/ex", rdf::TYPE, sh::PREFIX_DECLARATION)
        .literal("http://example.com/ns/ex", sh::PREFIX, "ex")
        .literal("http://example.com/ns/ex", sh::NAME, "Example")
        .reference("http://example.com/ns/ex", sh::NAMESPACE, EX)
        .flag("http://example.com/ns/ex", fs::DEFAULT_NAMESPACE)
        .reference("http://example.com/ns/fs", rdf::TYPE, sh::PREFIX_DECLARATION)
        .literal("http://example.com/ns/fs", sh::PREFIX, "fs")
        .reference("http://example.com/ns/fs", sh::NAMESPACE, fs::NS)
        // classes
        .reference(COLLECTION_SHAPE, rdf::TYPE, sh::NODE_SHAPE)
        .reference(COLLECTION_SHAPE, sh::TARGET_CLASS, COLLECTION)
        .literal(COLLECTION_SHAPE, sh::NAME, "Collection shape")
        .literal(COLLECTION, rdfs::LABEL, "Collection")
        .flag(COLLECTION_SHAPE, fs::FIXED_SHAPE)
        .reference(COLLECTION_SHAPE, fs::SYSTEM_PROPERTIES, NAME_SHAPE)
        .reference(COLLECTION_SHAPE, fs::SYSTEM_PROPERTIES, CREATED_BY_SHAPE)
        .reference(COLLECTION_SHAPE, sh::PROPERTY, NAME_SHAPE)
        .reference(COLLECTION_SHAPE, sh::PROPERTY, DESCRIPTION_SHAPE)
        .reference(COLLECTION_SHAPE, sh::PROPERTY, CREATED_BY_SHAPE)
        .reference(COLLECTION_SHAPE, sh::PROPERTY, DATE_CREATED_SHAPE)
        .reference(COLLECTION_SHAPE, sh::PROPERTY, KEYWORD_SHAPE)
        .reference(COLLECTION_SHAPE, sh::PROPERTY, STATUS_SHAPE)
        .reference(COLLECTION_SHAPE, sh::PROPERTY, SIZE_SHAPE)
        .reference(COLLECTION_SHAPE, sh::PROPERTY, HOMEPAGE_SHAPE)
        .reference(COLLECTION_SHAPE, sh::PROPERTY, AUTHORS_SHAPE)
        .reference(COLLECTION_SHAPE, sh::PROPERTY, PUBLISHED_SHAPE)
        .reference(AGENT_SHAPE, rdf::TYPE, sh::NODE_SHAPE)
        .reference(AGENT_SHAPE, sh::TARGET_CLASS, AGENT)
        .reference(AGENT_SHAPE, sh::PROPERTY, EMAIL_SHAPE)
        .reference(PERSON_SHAPE, rdf::TYPE, sh::NODE_SHAPE)
        .reference(PERSON_SHAPE, sh::TARGET_CLASS, PERSON)
        .reference(PERSON_SHAPE, sh::PROPERTY, PERSON_NAME_SHAPE)
        .reference(PERSON, rdfs::SUB_CLASS_OF, AGENT)
        .literal(PERSON, rdfs::LABEL, "Person")
        // property shapes
        .property_shape(NAME_SHAPE, rdfs::LABEL, "Name", Some(0))
        .reference(NAME_SHAPE, sh::DATATYPE, xsd::STRING)
        .count(NAME_SHAPE, sh::MIN_COUNT, 1)
        .count(NAME_SHAPE, sh::MAX_COUNT, 1)
        .count(NAME_SHAPE, sh::MAX_LENGTH, 40)
        .property_shape(DESCRIPTION_SHAPE, rdfs::COMMENT, "Description", Some(1))
        .reference(DESCRIPTION_SHAPE, sh::DATATYPE, xsd::STRING)
        .count(DESCRIPTION_SHAPE, sh::MAX_COUNT, 1)
        .property_shape(CREATED_BY_SHAPE, CREATED_BY, "Created by", None)
        .reference(CREATED_BY_SHAPE, sh::CLASS, PERSON)
        .count(CREATED_BY_SHAPE, sh::MAX_COUNT, 1)
        .flag(CREATED_BY_SHAPE, fs::MACHINE_ONLY)
        .property_shape(DATE_CREATED_SHAPE, DATE_CREATED, "Date created", None)
        .reference(DATE_CREATED_SHAPE, sh::DATATYPE, xsd::DATE_TIME)
        .count(DATE_CREATED_SHAPE, sh::MAX_COUNT, 1)
        .flag(DATE_CREATED_SHAPE, fs::MACHINE_ONLY)
        .property_shape(KEYWORD_SHAPE, KEYWORD, "Keyword", None)
        .reference(KEYWORD_SHAPE, sh::DATATYPE, xsd::STRING)
        .property_shape(STATUS_SHAPE, STATUS, "Status", None)
        .count(STATUS_SHAPE, sh::MAX_COUNT, 1)
        .list(STATUS_SHAPE, sh::IN, &[DRAFT, FINAL])
        .literal(DRAFT, rdfs::LABEL, "Draft")
        .literal(FINAL, rdfs::LABEL, "Final")
        .property_shape(SIZE_SHAPE, SIZE, "Size", None)
        .reference(SIZE_SHAPE, sh::DATATYPE, xsd::INTEGER)
        .count(SIZE_SHAPE, sh::MAX_COUNT, 1)
        .property_shape(HOMEPAGE_SHAPE, HOMEPAGE, "Homepage", None)
        .reference(HOMEPAGE_SHAPE, sh::NODE_KIND, sh::IRI)
        .property_shape(AUTHORS_SHAPE, AUTHORS, "Authors", None)
        .reference(AUTHORS_SHAPE, sh::CLASS, PERSON)
        .reference(AUTHORS_SHAPE, sh::NODE, dash::LIST_SHAPE)
        .count(AUTHORS_SHAPE, sh::MAX_COUNT, 1)
        .property_shape(PUBLISHED_SHAPE, PUBLISHED, "Published", None)
        .reference(PUBLISHED_SHAPE, sh::DATATYPE, xsd::BOOLEAN)
        .count(PUBLISHED_SHAPE, sh::MAX_COUNT, 1)
        .property_shape(PERSON_NAME_SHAPE, rdfs::LABEL, "Full name", Some(0))
        .reference(PERSON_NAME_SHAPE, sh::DATATYPE, xsd::STRING)
        .count(PERSON_NAME_SHAPE, sh::MAX_COUNT, 1)
        .property_shape(EMAIL_SHAPE, EMAIL, "Email", None)
        .reference(EMAIL_SHAPE, sh::DATATYPE, xsd::STRING)
        .build()
}

/// Shapes describing node shapes themselves, used when editing the vocabulary
pub fn meta_vocabulary() -> Graph {
    GraphBuilder::new()
        .reference(META_NODE_SHAPE, rdf::TYPE, sh::NODE_SHAPE)
        .reference(META_NODE_SHAPE, sh::TARGET_CLASS, sh::NODE_SHAPE)
        .reference(META_NODE_SHAPE, sh::PROPERTY, META_NAME_SHAPE)
        .reference(META_NODE_SHAPE, sh::PROPERTY, META_DESCRIPTION_SHAPE)
        .reference(META_NODE_SHAPE, sh::PROPERTY, META_PROPERTY_SHAPE)
        .property_shape(META_NAME_SHAPE, sh::NAME, "Name", Some(0))
        .reference(META_NAME_SHAPE, sh::DATATYPE, xsd::STRING)
        .count(META_NAME_SHAPE, sh::MAX_COUNT, 1)
        .property_shape(META_DESCRIPTION_SHAPE, sh::DESCRIPTION, "Description", Some(1))
        .reference(META_DESCRIPTION_SHAPE, sh::DATATYPE, xsd::STRING)
        .count(META_DESCRIPTION_SHAPE, sh::MAX_COUNT, 1)
        .property_shape(META_PROPERTY_SHAPE, sh::PROPERTY, "Properties", Some(2))
        .reference(META_PROPERTY_SHAPE, sh::CLASS, sh::PROPERTY_SHAPE)
        .build()
}

/// Metadata about one collection, its creator and two people
pub fn metadata() -> Graph {
    GraphBuilder::new()
        .reference(COLLECTION_1, rdf::TYPE, COLLECTION)
        .literal(COLLECTION_1, rdfs::LABEL, "Collection 1")
        .literal(COLLECTION_1, KEYWORD, "beta")
        .literal(COLLECTION_1, KEYWORD, "alpha")
        .reference(COLLECTION_1, CREATED_BY, USER_1)
        .typed(COLLECTION_1, DATE_CREATED, "2019-03-18T12:00:00Z", xsd::DATE_TIME)
        .reference(COLLECTION_1, STATUS, DRAFT)
        .list(COLLECTION_1, AUTHORS, &[PERSON_2, PERSON_1])
        .reference(USER_1, rdf::TYPE, PERSON)
        .literal(USER_1, rdfs::LABEL, "John")
        .reference(PERSON_1, rdf::TYPE, PERSON)
        .literal(PERSON_1, rdfs::LABEL, "Alice")
        .reference(PERSON_2, rdf::TYPE, PERSON)
        .literal(PERSON_2, rdfs::LABEL, "Bob")
        .build()
}

/// The metadata fixture as an expanded JSON-LD document
pub fn metadata_json_ld() -> serde_json::Value {
    ldm_graph::jsonld::to_json(&metadata())
}

/// Shorthand for building IRIs in assertions
pub fn iri(value: &str) -> Iri {
    Iri::new(value)
}
