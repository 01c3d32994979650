//! Namespace declarations
//!
//! Provides [`Namespace`], read from `sh:PrefixDeclaration` entries.

use ldm_graph::vocab::{fs, sh};
use ldm_graph::{Graph, Iri, Value};
use serde::{Deserialize, Serialize};

/// A declared namespace prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Identifier of the declaration
    pub id: Iri,

    /// Short prefix, e.g. `foaf`
    pub prefix: String,

    /// Namespace IRI the prefix expands to
    pub iri: String,

    /// Display label (`sh:name`)
    pub label: Option<String>,

    /// Default namespace for new terms (`fs:defaultNamespace`)
    pub is_default: bool,
}

impl Namespace {
    /// Read every prefix declaration in `graph`
    ///
    /// Declarations missing a prefix or namespace are skipped.
    #[must_use]
    pub fn all_in(graph: &Graph) -> Vec<Self> {
        graph
            .subjects_of_type(sh::PREFIX_DECLARATION)
            .into_iter()
            .filter_map(|id| Self::from_graph(graph, id))
            .collect()
    }

    fn from_graph(graph: &Graph, id: Iri) -> Option<Self> {
        let prefix = graph.first_literal(&id, sh::PREFIX)?.lexical.clone();
        let iri = graph.objects(&id, sh::NAMESPACE).find_map(|v| match v {
            Value::Reference(iri) => Some(iri.as_str().to_string()),
            Value::Literal(l) => Some(l.lexical.clone()),
            Value::List(_) => None,
        })?;
        if prefix.is_empty() || iri.is_empty() {
            tracing::debug!(declaration = %id, "skipping incomplete prefix declaration");
            return None;
        }
        Some(Self {
            label: graph
                .first_literal(&id, sh::NAME)
                .map(|l| l.lexical.clone()),
            is_default: graph.flag(&id, fs::DEFAULT_NAMESPACE),
            id,
            prefix,
            iri,
        })
    }

    /// Shorten `iri` to `prefix:local` when it lies in this namespace
    #[must_use]
    pub fn shorten(&self, iri: &Iri) -> Option<String> {
        let local = iri.as_str().strip_prefix(self.iri.as_str())?;
        (!local.is_empty()).then(|| format!("{}:{local}", self.prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldm_graph::vocab::rdf;
    use ldm_graph::{Literal, Statement};

    fn declaration(graph: &mut Graph, id: &str, prefix: &str, ns: &str) {
        graph.insert(Statement::new(id, rdf::TYPE, Iri::new(sh::PREFIX_DECLARATION)));
        graph.insert(Statement::new(id, sh::PREFIX, Value::literal(prefix)));
        graph.insert(Statement::new(id, sh::NAMESPACE, Iri::new(ns)));
    }

    #[test]
    fn reads_declarations() {
        let mut graph = Graph::new();
        declaration(&mut graph, "http://x/ns1", "foaf", "http://xmlns.com/foaf/0.1/");
        declaration(&mut graph, "http://x/ns2", "ex", "http://example.com/");
        graph.insert(Statement::new(
            "http://x/ns2",
            fs::DEFAULT_NAMESPACE,
            Value::Literal(Literal::typed("true", ldm_graph::vocab::xsd::BOOLEAN)),
        ));
        graph.insert(Statement::new("http://x/ns2", sh::NAME, Value::literal("Example")));

        let namespaces = Namespace::all_in(&graph);
        assert_eq!(namespaces.len(), 2);
        assert_eq!(namespaces[0].prefix, "foaf");
        assert!(!namespaces[0].is_default);
        assert!(namespaces[1].is_default);
        assert_eq!(namespaces[1].label.as_deref(), Some("Example"));
    }

    #[test]
    fn skips_incomplete_declarations() {
        let mut graph = Graph::new();
        graph.insert(Statement::new("http://x/ns", rdf::TYPE, Iri::new(sh::PREFIX_DECLARATION)));
        graph.insert(Statement::new("http://x/ns", sh::PREFIX, Value::literal("x")));
        assert!(Namespace::all_in(&graph).is_empty());
    }

    #[test]
    fn shortens_matching_iris() {
        let mut graph = Graph::new();
        declaration(&mut graph, "http://x/ns1", "foaf", "http://xmlns.com/foaf/0.1/");
        let ns = &Namespace::all_in(&graph)[0];
        assert_eq!(
            ns.shorten(&Iri::new("http://xmlns.com/foaf/0.1/name")).as_deref(),
            Some("foaf:name")
        );
        assert_eq!(ns.shorten(&Iri::new("http://xmlns.com/foaf/0.1/")), None);
        assert_eq!(ns.shorten(&Iri::new("http://other/name")), None);
    }
}
