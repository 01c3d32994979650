//! Resolved shapes
//!
//! Provides [`Shape`] (constraints and display metadata of one property),
//! [`ClassShape`] (what an entity of given types may have) and the
//! [`ShapeResolution`] policy for subjects with several types.

use ldm_graph::vocab::{dash, fs, sh, xsd};
use ldm_graph::{Graph, Iri, Value, ValueEntry};
use serde::{Deserialize, Serialize};

/// Longest `xsd:string` value still edited on a single line
const SINGLE_LINE_MAX_LENGTH: u32 = 255;

/// Constraints and display metadata for one property
///
/// `Shape::default()` is the open shape used when the vocabulary knows
/// nothing about a property: no label, reference valued, unbounded, editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Identifier of the property shape node, absent for the default shape
    pub id: Option<Iri>,

    /// Property this shape constrains (`sh:path`)
    pub path: Option<Iri>,

    /// Display label (`sh:name`)
    pub label: Option<String>,

    /// Help text (`sh:description`)
    pub description: Option<String>,

    /// Display priority (`sh:order`)
    pub order: Option<i64>,

    /// Literal datatype; `None` means values reference other entities
    pub datatype: Option<Iri>,

    /// Class of referenced entities (`sh:class`)
    pub class_name: Option<Iri>,

    /// Minimum number of non-empty values
    pub min_count: u32,

    /// Maximum number of non-empty values, `None` when unbounded
    pub max_count: Option<u32>,

    /// Maximum literal length (`sh:maxLength`)
    pub max_length: Option<u32>,

    /// Maintained by the system, not by users
    pub machine_only: bool,

    /// Closed enumeration (`sh:in`)
    pub allowed_values: Option<Vec<ValueEntry>>,

    /// Free-form IRI entry (`sh:nodeKind sh:IRI`)
    pub is_generic_iri_resource: bool,

    /// Values form a single `rdf:List` (`sh:node dash:ListShape`)
    pub is_rdf_list: bool,

    /// Owning node shape permits no property additions (`fs:fixedShape`)
    pub is_fixed_shape: bool,

    /// Structural properties of the owning node shape (`fs:systemProperties`)
    pub system_properties: Vec<Iri>,

    /// Long text, edited on several lines
    pub multi_line: bool,

    /// New entities of `class_name` may be created from the form
    pub allow_addition_of_entities: bool,
}

impl Shape {
    /// Read a property shape node from the vocabulary graph
    #[must_use]
    pub fn from_graph(graph: &Graph, id: &Iri) -> Self {
        let datatype = graph.first_iri(id, sh::DATATYPE).cloned();
        let max_length = count(graph, id, sh::MAX_LENGTH);
        let is_rdf_list = graph
            .first_iri(id, sh::NODE)
            .is_some_and(|n| n == dash::LIST_SHAPE);

        let allowed_values = graph.objects(id, sh::IN).next().map(|_| {
            let mut entries = Vec::new();
            for value in graph.objects(id, sh::IN) {
                collect_entries(graph, value, &mut entries);
            }
            entries
        });

        Self {
            id: Some(id.clone()),
            path: graph.first_iri(id, sh::PATH).cloned(),
            label: literal(graph, id, sh::NAME),
            description: literal(graph, id, sh::DESCRIPTION),
            order: graph.first_integer(id, sh::ORDER),
            multi_line: datatype.as_ref().is_some_and(|d| d == xsd::STRING)
                && max_length.map_or(true, |l| l > SINGLE_LINE_MAX_LENGTH),
            datatype,
            class_name: graph.first_iri(id, sh::CLASS).cloned(),
            min_count: count(graph, id, sh::MIN_COUNT).unwrap_or(0),
            max_count: if is_rdf_list {
                None
            } else {
                count(graph, id, sh::MAX_COUNT)
            },
            max_length,
            machine_only: graph.flag(id, fs::MACHINE_ONLY),
            allowed_values,
            is_generic_iri_resource: graph
                .first_iri(id, sh::NODE_KIND)
                .is_some_and(|k| k == sh::IRI),
            is_rdf_list,
            is_fixed_shape: false,
            system_properties: Vec::new(),
            allow_addition_of_entities: false,
        }
    }

    /// Check whether values are literals
    #[inline]
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.datatype.is_some()
    }

    /// Check whether this is the open default shape
    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.id.is_none()
    }
}

fn literal(graph: &Graph, id: &Iri, predicate: &str) -> Option<String> {
    graph
        .first_literal(id, predicate)
        .filter(|l| !l.is_blank())
        .map(|l| l.lexical.clone())
}

fn count(graph: &Graph, id: &Iri, predicate: &str) -> Option<u32> {
    graph
        .first_integer(id, predicate)
        .and_then(|n| u32::try_from(n).ok())
}

fn collect_entries(graph: &Graph, value: &Value, out: &mut Vec<ValueEntry>) {
    match value {
        Value::List(items) => items.iter().for_each(|v| collect_entries(graph, v, out)),
        Value::Reference(iri) => out.push(match graph.label_of(iri) {
            Some(label) => ValueEntry::labelled(iri.clone(), label),
            None => ValueEntry::reference(iri.clone()),
        }),
        Value::Literal(literal) => out.push(ValueEntry::from(literal.clone())),
    }
}

/// What an entity of the given types may have
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassShape {
    /// Asserted classes the shape was built for
    pub classes: Vec<Iri>,

    /// Node shapes that apply, own and inherited
    pub node_shapes: Vec<Iri>,

    /// Label of the first known class
    pub label: Option<String>,

    /// Any applicable node shape is fixed
    pub is_fixed_shape: bool,

    /// Union of system properties of the applicable node shapes
    pub system_properties: Vec<Iri>,

    /// Resolved shape of every declared property
    pub properties: Vec<Shape>,
}

impl ClassShape {
    /// Check whether no node shape applies
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_shapes.is_empty()
    }
}

/// Policy for picking a property shape when several asserted types declare one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeResolution {
    /// The shape declared by the class with the deepest ancestor chain wins;
    /// ties go to the earlier asserted type
    #[default]
    MostSpecific,

    /// The first asserted type declaring the property wins, nearest ancestor first
    FirstAsserted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldm_graph::{Literal, Statement};

    fn shape_graph(extra: Vec<(&str, Value)>) -> (Graph, Iri) {
        let id = Iri::new("http://x/shapes#name");
        let mut graph = Graph::new();
        graph.insert(Statement::new(id.clone(), sh::PATH, Iri::new("http://x/name")));
        graph.insert(Statement::new(id.clone(), sh::NAME, Value::literal("Name")));
        for (p, v) in extra {
            graph.insert(Statement::new(id.clone(), p, v));
        }
        (graph, id)
    }

    #[test]
    fn reads_basic_fields() {
        let (graph, id) = shape_graph(vec![
            (sh::DATATYPE, Value::reference(xsd::STRING)),
            (sh::MAX_COUNT, Value::Literal(Literal::typed("1", xsd::INTEGER))),
            (sh::MIN_COUNT, Value::literal("1")),
            (sh::ORDER, Value::literal("-3")),
            (sh::MAX_LENGTH, Value::literal("100")),
        ]);
        let shape = Shape::from_graph(&graph, &id);
        assert_eq!(shape.path, Some(Iri::new("http://x/name")));
        assert_eq!(shape.label.as_deref(), Some("Name"));
        assert_eq!(shape.min_count, 1);
        assert_eq!(shape.max_count, Some(1));
        assert_eq!(shape.order, Some(-3));
        assert!(shape.is_literal());
        assert!(!shape.multi_line);
    }

    #[test]
    fn rdf_lists_are_unbounded() {
        let (graph, id) = shape_graph(vec![
            (sh::NODE, Value::reference(dash::LIST_SHAPE)),
            (sh::MAX_COUNT, Value::literal("1")),
        ]);
        let shape = Shape::from_graph(&graph, &id);
        assert!(shape.is_rdf_list);
        assert_eq!(shape.max_count, None);
    }

    #[test]
    fn long_strings_are_multi_line() {
        let (graph, id) = shape_graph(vec![(sh::DATATYPE, Value::reference(xsd::STRING))]);
        assert!(Shape::from_graph(&graph, &id).multi_line);
    }

    #[test]
    fn closed_enumeration_is_read_from_list() {
        let (mut graph, id) = shape_graph(vec![(
            sh::IN,
            Value::List(vec![Value::reference("http://x/a"), Value::reference("http://x/b")]),
        )]);
        graph.insert(Statement::new("http://x/a", ldm_graph::vocab::rdfs::LABEL, Value::literal("A")));
        let shape = Shape::from_graph(&graph, &id);
        assert_eq!(
            shape.allowed_values,
            Some(vec![
                ValueEntry::labelled("http://x/a", "A"),
                ValueEntry::reference("http://x/b"),
            ])
        );
    }

    #[test]
    fn default_shape_is_open() {
        let shape = Shape::default();
        assert!(shape.is_default());
        assert_eq!(shape.min_count, 0);
        assert_eq!(shape.max_count, None);
        assert!(shape.allowed_values.is_none());
        assert!(!shape.is_fixed_shape);
        assert!(!shape.machine_only);
    }

    #[test]
    fn negative_counts_are_ignored() {
        let (graph, id) = shape_graph(vec![(sh::MIN_COUNT, Value::literal("-1"))]);
        assert_eq!(Shape::from_graph(&graph, &id).min_count, 0);
    }
}
