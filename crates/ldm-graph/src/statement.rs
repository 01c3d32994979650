//! Statements and graphs
//!
//! Provides [`Statement`] and [`Graph`], an unordered bag of statements with
//! the lookup helpers the property model needs.

use crate::iri::Iri;
use crate::literal::{Literal, Value};
use crate::vocab::{rdf, rdfs, sh};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject, predicate, object triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    /// Subject
    pub subject: Iri,
    /// Predicate
    pub predicate: Iri,
    /// Object
    pub object: Value,
}

impl Statement {
    /// Create a statement
    #[inline]
    #[must_use]
    pub fn new(subject: impl Into<Iri>, predicate: impl Into<Iri>, object: impl Into<Value>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// A set of statements without ordering guarantee
///
/// Duplicates are kept; multiple statements may share subject and predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graph {
    statements: Vec<Statement>,
}

impl Graph {
    /// Empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement
    pub fn insert(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Add all statements of another graph
    pub fn extend_from(&mut self, other: &Graph) {
        self.statements.extend(other.statements.iter().cloned());
    }

    /// Number of statements
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the graph is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// All statements
    #[inline]
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Iterate over statements
    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Statements about `subject`
    pub fn about<'a, 'b>(&'a self, subject: &'b Iri) -> impl Iterator<Item = &'a Statement> + 'b
    where
        'a: 'b,
    {
        self.statements.iter().filter(move |s| &s.subject == subject)
    }

    /// Check if any statement has `subject` as subject
    #[must_use]
    pub fn has_subject(&self, subject: &Iri) -> bool {
        self.statements.iter().any(|s| &s.subject == subject)
    }

    /// Objects of `(subject, predicate, _)`
    pub fn objects<'a, 'b>(
        &'a self,
        subject: &'b Iri,
        predicate: &'b str,
    ) -> impl Iterator<Item = &'a Value> + 'b
    where
        'a: 'b,
    {
        self.about(subject)
            .filter(move |s| s.predicate == predicate)
            .map(|s| &s.object)
    }

    /// First referenced IRI of `(subject, predicate, _)`
    #[must_use]
    pub fn first_iri(&self, subject: &Iri, predicate: &str) -> Option<&Iri> {
        self.statements
            .iter()
            .filter(|s| &s.subject == subject && s.predicate == predicate)
            .find_map(|s| s.object.as_iri())
    }

    /// First literal of `(subject, predicate, _)`
    #[must_use]
    pub fn first_literal(&self, subject: &Iri, predicate: &str) -> Option<&Literal> {
        self.statements
            .iter()
            .filter(|s| &s.subject == subject && s.predicate == predicate)
            .find_map(|s| s.object.as_literal())
    }

    /// Parse the first literal of `(subject, predicate, _)` as integer
    #[must_use]
    pub fn first_integer(&self, subject: &Iri, predicate: &str) -> Option<i64> {
        self.objects(subject, predicate)
            .filter_map(Value::as_literal)
            .find_map(|l| l.lexical.trim().parse().ok())
    }

    /// Interpret the first literal of `(subject, predicate, _)` as boolean
    ///
    /// Missing values read as `false`.
    #[must_use]
    pub fn flag(&self, subject: &Iri, predicate: &str) -> bool {
        self.first_literal(subject, predicate)
            .is_some_and(|l| matches!(l.lexical.trim(), "true" | "1"))
    }

    /// All IRIs referenced by `(subject, predicate, _)`, list members included
    #[must_use]
    pub fn iris(&self, subject: &Iri, predicate: &str) -> Vec<Iri> {
        let mut out = Vec::new();
        for value in self.objects(subject, predicate) {
            collect_iris(value, &mut out);
        }
        out
    }

    /// Asserted `rdf:type`s of `subject`, in assertion order, without duplicates
    #[must_use]
    pub fn types_of(&self, subject: &Iri) -> Vec<Iri> {
        let set: IndexSet<Iri> = self.iris(subject, rdf::TYPE).into_iter().collect();
        set.into_iter().collect()
    }

    /// Human label of `subject` from `rdfs:label`, then `sh:name`
    #[must_use]
    pub fn label_of(&self, subject: &Iri) -> Option<&str> {
        [rdfs::LABEL, sh::NAME].into_iter().find_map(|p| {
            self.first_literal(subject, p)
                .filter(|l| !l.is_blank())
                .map(|l| l.lexical.as_str())
        })
    }

    /// Distinct subjects in first-seen order
    #[must_use]
    pub fn subjects(&self) -> IndexSet<&Iri> {
        self.statements.iter().map(|s| &s.subject).collect()
    }

    /// Subjects typed with `class`
    #[must_use]
    pub fn subjects_of_type(&self, class: &str) -> Vec<Iri> {
        let set: IndexSet<&Iri> = self
            .statements
            .iter()
            .filter(|s| s.predicate == rdf::TYPE && s.object.as_iri().is_some_and(|o| o == class))
            .map(|s| &s.subject)
            .collect();
        set.into_iter().cloned().collect()
    }

    /// Remove every `(subject, predicate, _)` statement, returning how many were dropped
    pub fn remove_property(&mut self, subject: &Iri, predicate: &Iri) -> usize {
        let before = self.statements.len();
        self.statements
            .retain(|s| !(&s.subject == subject && &s.predicate == predicate));
        before - self.statements.len()
    }

    /// Remove every statement about `subject`, returning how many were dropped
    pub fn remove_subject(&mut self, subject: &Iri) -> usize {
        let before = self.statements.len();
        self.statements.retain(|s| &s.subject != subject);
        before - self.statements.len()
    }
}

fn collect_iris(value: &Value, out: &mut Vec<Iri>) {
    match value {
        Value::Reference(iri) => out.push(iri.clone()),
        Value::List(items) => items.iter().for_each(|v| collect_iris(v, out)),
        Value::Literal(_) => {}
    }
}

impl FromIterator<Statement> for Graph {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl Extend<Statement> for Graph {
    fn extend<T: IntoIterator<Item = Statement>>(&mut self, iter: T) {
        self.statements.extend(iter);
    }
}

impl IntoIterator for Graph {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: &str = "http://example.com/s";
    const P: &str = "http://example.com/p";

    fn sample() -> Graph {
        [
            Statement::new(S, rdf::TYPE, Iri::new("http://example.com/B")),
            Statement::new(S, rdf::TYPE, Iri::new("http://example.com/A")),
            Statement::new(S, rdf::TYPE, Iri::new("http://example.com/B")),
            Statement::new(S, P, Value::literal("one")),
            Statement::new(S, P, Value::literal("two")),
            Statement::new(S, sh::NAME, Value::literal("Shape name")),
            Statement::new("http://example.com/o", P, Value::literal("other")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn types_keep_assertion_order_without_duplicates() {
        let graph = sample();
        let types = graph.types_of(&Iri::new(S));
        assert_eq!(
            types,
            vec![Iri::new("http://example.com/B"), Iri::new("http://example.com/A")]
        );
    }

    #[test]
    fn label_falls_back_to_shape_name() {
        let mut graph = sample();
        assert_eq!(graph.label_of(&Iri::new(S)), Some("Shape name"));
        graph.insert(Statement::new(S, rdfs::LABEL, Value::literal("Label")));
        assert_eq!(graph.label_of(&Iri::new(S)), Some("Label"));
    }

    #[test]
    fn objects_are_scoped_to_subject() {
        let graph = sample();
        let subject = Iri::new(S);
        assert_eq!(graph.objects(&subject, P).count(), 2);
        assert_eq!(graph.subjects().len(), 2);
    }

    #[test]
    fn lookups_outlive_their_arguments() {
        let graph = sample();
        let (values, name, first_type) = {
            let subject = Iri::new(S);
            let values: Vec<&Value> = graph.objects(&subject, P).collect();
            (values, graph.first_literal(&subject, sh::NAME), graph.first_iri(&subject, rdf::TYPE))
        };
        assert_eq!(values.len(), 2);
        assert_eq!(name.map(|l| l.lexical.as_str()), Some("Shape name"));
        assert_eq!(first_type, Some(&Iri::new("http://example.com/B")));
    }

    #[test]
    fn remove_property_only_touches_the_pair() {
        let mut graph = sample();
        let removed = graph.remove_property(&Iri::new(S), &Iri::new(P));
        assert_eq!(removed, 2);
        assert_eq!(graph.objects(&Iri::new("http://example.com/o"), P).count(), 1);
    }

    #[test]
    fn iris_include_list_members() {
        let graph: Graph = [Statement::new(
            S,
            P,
            Value::List(vec![Value::reference("http://x/1"), Value::literal("skip")]),
        )]
        .into_iter()
        .collect();
        assert_eq!(graph.iris(&Iri::new(S), P), vec![Iri::new("http://x/1")]);
    }

    #[test]
    fn flags_and_integers() {
        let graph: Graph = [
            Statement::new(S, "http://x/flag", Value::Literal(Literal::typed("true", crate::vocab::xsd::BOOLEAN))),
            Statement::new(S, "http://x/n", Value::literal(" 42 ")),
        ]
        .into_iter()
        .collect();
        let s = Iri::new(S);
        assert!(graph.flag(&s, "http://x/flag"));
        assert!(!graph.flag(&s, "http://x/missing"));
        assert_eq!(graph.first_integer(&s, "http://x/n"), Some(42));
    }
}
