//! Vocabulary index
//!
//! Provides [`VocabularyIndex`], built once per fetched shape graph and shared
//! read-only between forms. Lookups never fail: unknown classes or properties
//! resolve to the open default [`Shape`].

use crate::namespace::Namespace;
use crate::shape::{ClassShape, Shape, ShapeResolution};
use indexmap::{IndexMap, IndexSet};
use ldm_graph::vocab::{fs, rdfs, sh};
use ldm_graph::{Graph, Iri};
use std::collections::HashMap;

/// A `sh:NodeShape` entry
#[derive(Debug, Clone)]
struct NodeShape {
    id: Iri,
    classes: Vec<Iri>,
    property_shapes: Vec<Iri>,
    is_fixed: bool,
    system_properties: Vec<Iri>,
    machine_only: bool,
}

/// Property shape candidate for a lookup
#[derive(Debug)]
struct Candidate<'a> {
    /// Position of the asserted type it was reached from
    type_position: usize,
    /// Ancestor distance from that type
    distance: usize,
    /// Longest ancestor chain of the owning class
    owner_depth: usize,
    node: &'a NodeShape,
    shape: &'a Shape,
}

/// Index over a vocabulary graph
#[derive(Debug, Clone, Default)]
pub struct VocabularyIndex {
    graph: Graph,
    node_shapes: Vec<NodeShape>,
    /// class -> node shape positions
    by_class: HashMap<Iri, Vec<usize>>,
    /// property shape id -> shape
    property_shapes: IndexMap<Iri, Shape>,
    /// property path -> property shape ids, vocabulary order
    by_path: HashMap<Iri, Vec<Iri>>,
    /// class -> direct superclasses
    superclasses: HashMap<Iri, Vec<Iri>>,
    namespaces: Vec<Namespace>,
    catalog: IndexSet<Iri>,
    resolution: ShapeResolution,
}

impl VocabularyIndex {
    /// Index a vocabulary graph
    #[must_use]
    pub fn from_graph(graph: Graph) -> Self {
        let mut index = Self::default();

        for id in graph.subjects().into_iter() {
            if graph.first_iri(id, sh::PATH).is_some() {
                let shape = Shape::from_graph(&graph, id);
                if let Some(path) = &shape.path {
                    index
                        .by_path
                        .entry(path.clone())
                        .or_default()
                        .push(id.clone());
                }
                index.property_shapes.insert(id.clone(), shape);
            }

            let parents = graph.iris(id, rdfs::SUB_CLASS_OF);
            if !parents.is_empty() {
                index.superclasses.insert(id.clone(), parents);
            }
        }

        for id in graph.subjects_of_type(sh::NODE_SHAPE) {
            let mut classes = graph.iris(&id, sh::TARGET_CLASS);
            if graph.types_of(&id).iter().any(|t| t == rdfs::CLASS) {
                classes.push(id.clone());
            }
            let node = NodeShape {
                classes,
                property_shapes: graph.iris(&id, sh::PROPERTY),
                is_fixed: graph.flag(&id, fs::FIXED_SHAPE),
                system_properties: graph.iris(&id, fs::SYSTEM_PROPERTIES),
                machine_only: graph.flag(&id, fs::MACHINE_ONLY),
                id,
            };
            let position = index.node_shapes.len();
            for class in &node.classes {
                index.by_class.entry(class.clone()).or_default().push(position);
                if !node.machine_only {
                    index.catalog.insert(class.clone());
                }
            }
            index.node_shapes.push(node);
        }

        for shape in index.property_shapes.values_mut() {
            shape.allow_addition_of_entities = shape
                .class_name
                .as_ref()
                .is_some_and(|c| index.catalog.contains(c));
        }

        index.namespaces = Namespace::all_in(&graph);
        index.graph = graph;

        tracing::debug!(
            node_shapes = index.node_shapes.len(),
            property_shapes = index.property_shapes.len(),
            namespaces = index.namespaces.len(),
            "indexed vocabulary"
        );
        index
    }

    /// Set the conflict resolution policy
    #[must_use]
    pub fn with_resolution(mut self, resolution: ShapeResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Active conflict resolution policy
    #[inline]
    #[must_use]
    pub fn resolution(&self) -> ShapeResolution {
        self.resolution
    }

    /// The indexed vocabulary graph
    #[inline]
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Check whether the vocabulary has no statements
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Shape of `property` for an entity with the given asserted types
    ///
    /// Falls back to the first labelled property shape with a matching path,
    /// then to the open default shape.
    #[must_use]
    pub fn shape_for(&self, classes: &[Iri], property: &Iri) -> Shape {
        let mut candidates = self.candidates(classes, property);
        let chosen = match self.resolution {
            ShapeResolution::MostSpecific => {
                candidates.sort_by_key(|c| {
                    (
                        std::cmp::Reverse(c.owner_depth),
                        c.type_position,
                        c.distance,
                    )
                });
                candidates.into_iter().next()
            }
            ShapeResolution::FirstAsserted => {
                candidates.sort_by_key(|c| (c.type_position, c.distance));
                candidates.into_iter().next()
            }
        };

        if let Some(candidate) = chosen {
            let mut shape = candidate.shape.clone();
            shape.is_fixed_shape = candidate.node.is_fixed;
            shape.system_properties = candidate.node.system_properties.clone();
            return shape;
        }

        self.global_shape(property).cloned().unwrap_or_default()
    }

    /// Property shape with a matching path that carries a name
    fn global_shape(&self, property: &Iri) -> Option<&Shape> {
        self.by_path
            .get(property)?
            .iter()
            .filter_map(|id| self.property_shapes.get(id))
            .find(|s| s.label.is_some())
    }

    fn candidates(&self, classes: &[Iri], property: &Iri) -> Vec<Candidate<'_>> {
        let mut out = Vec::new();
        for (type_position, class) in classes.iter().enumerate() {
            for (ancestor, distance) in self.ancestors(class) {
                for node in self.node_shapes_of(&ancestor) {
                    for shape in node
                        .property_shapes
                        .iter()
                        .filter_map(|id| self.property_shapes.get(id))
                        .filter(|s| s.path.as_ref() == Some(property))
                    {
                        out.push(Candidate {
                            type_position,
                            distance,
                            owner_depth: self.depth(&ancestor),
                            node,
                            shape,
                        });
                    }
                }
            }
        }
        out
    }

    fn node_shapes_of<'a>(&'a self, class: &Iri) -> impl Iterator<Item = &'a NodeShape> + 'a {
        self.by_class
            .get(class)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.node_shapes.get(i))
    }

    /// `class` and its ancestors with their distance, nearest first
    fn ancestors(&self, class: &Iri) -> Vec<(Iri, usize)> {
        let mut seen: IndexMap<Iri, usize> = IndexMap::new();
        seen.insert(class.clone(), 0);
        let mut cursor = 0;
        while let Some((current, distance)) = seen.get_index(cursor).map(|(c, d)| (c.clone(), *d)) {
            for parent in self.superclasses.get(&current).into_iter().flatten() {
                if !seen.contains_key(parent) {
                    seen.insert(parent.clone(), distance + 1);
                }
            }
            cursor += 1;
        }
        seen.into_iter().collect()
    }

    /// Length of the longest superclass chain above `class`
    fn depth(&self, class: &Iri) -> usize {
        fn walk(index: &VocabularyIndex, class: &Iri, path: &mut Vec<Iri>) -> usize {
            if path.contains(class) {
                return 0;
            }
            path.push(class.clone());
            let depth = index
                .superclasses
                .get(class)
                .into_iter()
                .flatten()
                .map(|parent| 1 + walk(index, parent, path))
                .max()
                .unwrap_or(0);
            path.pop();
            depth
        }
        walk(self, class, &mut Vec::new())
    }

    /// Resolved shape of every property declared for the given types
    ///
    /// Properties are listed in first-declared order: asserted types first,
    /// each followed by its ancestors.
    #[must_use]
    pub fn property_shapes_for(&self, classes: &[Iri]) -> Vec<Shape> {
        let mut paths: IndexSet<Iri> = IndexSet::new();
        for class in classes {
            for (ancestor, _) in self.ancestors(class) {
                for node in self.node_shapes_of(&ancestor) {
                    paths.extend(
                        node.property_shapes
                            .iter()
                            .filter_map(|id| self.property_shapes.get(id))
                            .filter_map(|s| s.path.clone()),
                    );
                }
            }
        }
        paths
            .iter()
            .map(|path| self.shape_for(classes, path))
            .collect()
    }

    /// What a new entity of the given types may have
    #[must_use]
    pub fn shape_for_class(&self, classes: &[Iri]) -> ClassShape {
        let mut node_shapes: IndexSet<Iri> = IndexSet::new();
        let mut system_properties: IndexSet<Iri> = IndexSet::new();
        let mut is_fixed_shape = false;

        for class in classes {
            for (ancestor, _) in self.ancestors(class) {
                for node in self.node_shapes_of(&ancestor) {
                    node_shapes.insert(node.id.clone());
                    is_fixed_shape |= node.is_fixed;
                    system_properties.extend(node.system_properties.iter().cloned());
                }
            }
        }

        ClassShape {
            classes: classes.to_vec(),
            node_shapes: node_shapes.into_iter().collect(),
            label: classes
                .iter()
                .find_map(|c| self.explicit_label(c))
                .map(str::to_string),
            is_fixed_shape,
            system_properties: system_properties.into_iter().collect(),
            properties: self.property_shapes_for(classes),
        }
    }

    /// Label from the vocabulary itself, without IRI based fallbacks
    ///
    /// Tries `rdfs:label` and `sh:name` of the entry, then the name of a
    /// property shape whose path is `iri`.
    #[must_use]
    pub fn explicit_label(&self, iri: &Iri) -> Option<&str> {
        self.graph
            .label_of(iri)
            .or_else(|| self.global_shape(iri).and_then(|s| s.label.as_deref()))
    }

    /// Human label for any IRI
    ///
    /// Falls back to `prefix:local` when a declared namespace matches, and to
    /// the local part of the IRI otherwise.
    #[must_use]
    pub fn label_of(&self, iri: &Iri) -> String {
        if let Some(label) = self.explicit_label(iri) {
            return label.to_string();
        }
        if let Some(short) = self.namespaces.iter().find_map(|ns| ns.shorten(iri)) {
            return short;
        }
        match iri.local_name() {
            "" => iri.as_str().to_string(),
            local => local.to_string(),
        }
    }

    /// Declared namespaces
    #[inline]
    #[must_use]
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Check whether the vocabulary has statements about `iri`
    #[must_use]
    pub fn contains(&self, iri: &Iri) -> bool {
        self.graph.has_subject(iri)
    }

    /// Classes with a user-facing node shape
    #[must_use]
    pub fn classes_in_catalog(&self) -> Vec<Iri> {
        self.catalog.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldm_graph::vocab::{rdf, xsd};
    use ldm_graph::{Statement, Value};

    struct Builder(Graph);

    impl Builder {
        fn node_shape(mut self, id: &str, class: &str, properties: &[&str]) -> Self {
            self.0.insert(Statement::new(id, rdf::TYPE, Iri::new(sh::NODE_SHAPE)));
            self.0.insert(Statement::new(id, sh::TARGET_CLASS, Iri::new(class)));
            for p in properties {
                self.0.insert(Statement::new(id, sh::PROPERTY, Iri::new(*p)));
            }
            self
        }

        fn property(mut self, id: &str, path: &str, name: &str, max: Option<&str>) -> Self {
            self.0.insert(Statement::new(id, sh::PATH, Iri::new(path)));
            self.0.insert(Statement::new(id, sh::NAME, Value::literal(name)));
            if let Some(max) = max {
                self.0.insert(Statement::new(id, sh::MAX_COUNT, Value::literal(max)));
            }
            self
        }

        fn sub_class(mut self, class: &str, parent: &str) -> Self {
            self.0.insert(Statement::new(class, rdfs::SUB_CLASS_OF, Iri::new(parent)));
            self
        }

        fn build(self) -> VocabularyIndex {
            VocabularyIndex::from_graph(self.0)
        }
    }

    fn conflicting() -> Builder {
        Builder(Graph::new())
            .node_shape("http://x/AShape", "http://x/A", &["http://x/a-title"])
            .node_shape("http://x/BShape", "http://x/B", &["http://x/b-title"])
            .property("http://x/a-title", "http://x/title", "A title", Some("1"))
            .property("http://x/b-title", "http://x/title", "B title", Some("3"))
            .sub_class("http://x/B", "http://x/Base")
    }

    #[test]
    fn unknown_property_yields_default_shape() {
        let index = conflicting().build();
        let shape = index.shape_for(&[Iri::new("http://x/A")], &Iri::new("http://x/unknown"));
        assert!(shape.is_default());
        assert!(!shape.is_fixed_shape);
    }

    #[test]
    fn unknown_class_falls_back_to_global_shape() {
        let index = conflicting().build();
        let shape = index.shape_for(&[Iri::new("http://x/Other")], &Iri::new("http://x/title"));
        assert_eq!(shape.label.as_deref(), Some("A title"));
    }

    #[test]
    fn most_specific_prefers_deeper_class() {
        let index = conflicting().build();
        let types = [Iri::new("http://x/A"), Iri::new("http://x/B")];
        let shape = index.shape_for(&types, &Iri::new("http://x/title"));
        assert_eq!(shape.label.as_deref(), Some("B title"));
        assert_eq!(shape.max_count, Some(3));
    }

    #[test]
    fn first_asserted_prefers_earlier_type() {
        let index = conflicting()
            .build()
            .with_resolution(ShapeResolution::FirstAsserted);
        let types = [Iri::new("http://x/A"), Iri::new("http://x/B")];
        let shape = index.shape_for(&types, &Iri::new("http://x/title"));
        assert_eq!(shape.label.as_deref(), Some("A title"));
    }

    #[test]
    fn inherits_superclass_properties() {
        let index = Builder(Graph::new())
            .node_shape("http://x/BaseShape", "http://x/Base", &["http://x/p-desc"])
            .property("http://x/p-desc", "http://x/description", "Description", None)
            .sub_class("http://x/Child", "http://x/Base")
            .build();
        let shapes = index.property_shapes_for(&[Iri::new("http://x/Child")]);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].path, Some(Iri::new("http://x/description")));
    }

    #[test]
    fn cyclic_hierarchy_terminates() {
        let index = Builder(Graph::new())
            .node_shape("http://x/AShape", "http://x/A", &["http://x/p"])
            .property("http://x/p", "http://x/prop", "Prop", None)
            .sub_class("http://x/A", "http://x/B")
            .sub_class("http://x/B", "http://x/A")
            .build();
        let shape = index.shape_for(&[Iri::new("http://x/B")], &Iri::new("http://x/prop"));
        assert_eq!(shape.label.as_deref(), Some("Prop"));
    }

    #[test]
    fn fixed_shape_flags_travel_with_property() {
        let mut index = Builder(Graph::new())
            .node_shape("http://x/AShape", "http://x/A", &["http://x/p"])
            .property("http://x/p", "http://x/prop", "Prop", None);
        index.0.insert(Statement::new(
            "http://x/AShape",
            fs::FIXED_SHAPE,
            Value::Literal(ldm_graph::Literal::typed("true", xsd::BOOLEAN)),
        ));
        index.0.insert(Statement::new("http://x/AShape", fs::SYSTEM_PROPERTIES, Iri::new("http://x/prop")));
        let index = index.build();

        let shape = index.shape_for(&[Iri::new("http://x/A")], &Iri::new("http://x/prop"));
        assert!(shape.is_fixed_shape);
        assert_eq!(shape.system_properties, vec![Iri::new("http://x/prop")]);

        let class = index.shape_for_class(&[Iri::new("http://x/A")]);
        assert!(class.is_fixed_shape);
        assert_eq!(class.node_shapes, vec![Iri::new("http://x/AShape")]);
    }

    #[test]
    fn labels_fall_back_gracefully() {
        let index = conflicting().build();
        assert_eq!(index.label_of(&Iri::new("http://x/title")), "A title");
        assert_eq!(index.label_of(&Iri::new("http://other.org/ns#thing")), "thing");
        assert_eq!(index.label_of(&Iri::new("urn:x")), "urn:x");
    }

    #[test]
    fn catalog_lists_node_shape_classes() {
        let index = conflicting().build();
        assert_eq!(
            index.classes_in_catalog(),
            vec![Iri::new("http://x/A"), Iri::new("http://x/B")]
        );
        assert!(index.contains(&Iri::new("http://x/AShape")));
        assert!(!index.contains(&Iri::new("http://x/A")));
    }
}
