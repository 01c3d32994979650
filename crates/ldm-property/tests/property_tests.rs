//! Descriptor conversion, ordering, overlay and editing against fixtures

use ldm_graph::vocab::{rdf, rdfs, sh, xsd};
use ldm_graph::{Graph, Literal, Statement, Value, ValueEntry};
use ldm_property::prelude::*;
use ldm_property::{
    compare, convert, empty_properties, from_graph, merge, sort_properties, to_graph, EditingRules,
    Updates,
};
use ldm_test_utils::*;
use ldm_vocabulary::VocabularyIndex;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::cmp::Ordering;

fn vocabulary_index() -> VocabularyIndex {
    VocabularyIndex::from_graph(vocabulary())
}

fn labels(properties: &[PropertyDescriptor]) -> Vec<&str> {
    properties.iter().map(|p| p.label.as_str()).collect()
}

#[test]
fn collection_properties_in_display_order() {
    let properties = from_graph(&metadata(), &iri(COLLECTION_1), &vocabulary_index());
    assert_eq!(
        labels(&properties),
        [
            "Name",
            "Description",
            "Authors",
            "Created by",
            "Date created",
            "Keyword",
            "Status",
            "Type",
            "Homepage",
            "Published",
            "Size",
        ]
    );
}

#[test]
fn collection_values_are_labelled_and_sorted() {
    let properties = from_graph(&metadata(), &iri(COLLECTION_1), &vocabulary_index());
    let find = |key: &str| properties.iter().find(|p| p.key == key).unwrap();

    assert_eq!(
        find(KEYWORD).values,
        vec![ValueEntry::literal("alpha"), ValueEntry::literal("beta")]
    );
    assert_eq!(find(CREATED_BY).values, vec![ValueEntry::labelled(USER_1, "John")]);
    assert_eq!(find(STATUS).values, vec![ValueEntry::labelled(DRAFT, "Draft")]);
    assert_eq!(
        find(AUTHORS).values,
        vec![ValueEntry::labelled(PERSON_2, "Bob"), ValueEntry::labelled(PERSON_1, "Alice")]
    );
    assert_eq!(find(rdf::TYPE).values, vec![ValueEntry::labelled(COLLECTION, "Collection")]);

    let name = find(rdfs::LABEL);
    assert_eq!(name.min_values_count, 1);
    assert_eq!(name.max_values_count, Some(1));
    assert!(name.is_fixed_shape);

    let created_by = find(CREATED_BY);
    assert!(created_by.machine_only);
    assert!(!created_by.is_editable);
    assert!(created_by.allow_addition_of_entities);

    assert!(find(SIZE).values.is_empty());
    assert_eq!(find(SIZE).datatype, Some(iri(xsd::INTEGER)));
}

#[test]
fn new_entity_form() {
    let properties = empty_properties(&vocabulary_index(), &[iri(PERSON)]);
    assert_eq!(labels(&properties), ["Full name", "Type", "Email"]);
    assert_eq!(properties[1].values, vec![ValueEntry::labelled(PERSON, "Person")]);
    assert!(properties.iter().filter(|p| !p.is_type()).all(|p| p.values.is_empty()));
}

#[test]
fn unshaped_predicates_use_prefixed_labels() {
    let graph: Graph = metadata()
        .into_iter()
        .chain([Statement::new(
            COLLECTION_1,
            "http://example.com/ontology#extraNote",
            Value::literal("note"),
        )])
        .collect();
    let properties = from_graph(&graph, &iri(COLLECTION_1), &vocabulary_index());
    let extra = properties
        .iter()
        .find(|p| p.key == "http://example.com/ontology#extraNote")
        .unwrap();
    assert_eq!(extra.label, "ex:extraNote");
    assert_eq!(extra.values, vec![ValueEntry::literal("note")]);
}

#[test]
fn edits_flow_through_merge_and_validation() {
    let base = from_graph(&metadata(), &iri(COLLECTION_1), &vocabulary_index());
    let name = iri(rdfs::LABEL);
    let mut edits = PendingEdits::new();
    edits.add_value(&base, &name, ValueEntry::literal("Second name")).unwrap();

    let effective = edits.merge(&base);
    let property = effective.iter().find(|p| p.key == name).unwrap();
    assert_eq!(
        ldm_property::validate_messages(property, &property.values),
        vec!["too many values: at most 1 allowed".to_string()]
    );

    edits.delete_value(&base, &name, 0).unwrap();
    edits.delete_value(&base, &name, 0).unwrap();
    let effective = edits.merge(&base);
    let property = effective.iter().find(|p| p.key == name).unwrap();
    assert_eq!(
        ldm_property::validate_messages(property, &property.values),
        vec!["too few values: at least 1 required".to_string()]
    );
}

#[test]
fn patch_for_edited_name_and_cleared_keywords() {
    let index = vocabulary_index();
    let types = [iri(COLLECTION)];
    let subject = iri(COLLECTION_1);

    let patch = to_graph(&subject, &iri(SIZE), &[ValueEntry::literal("42")], &index, &types);
    assert_eq!(patch.values, vec![Value::Literal(Literal::typed("42", xsd::INTEGER))]);

    let cleared = to_graph(&subject, &iri(KEYWORD), &[], &index, &types);
    assert!(cleared.is_deletion());
}

#[test]
fn fixed_vocabulary_shape_editing() {
    let meta = VocabularyIndex::from_graph(meta_vocabulary());
    let graph = vocabulary();
    let subject = iri(COLLECTION_SHAPE);

    let mut base = from_graph(&graph, &subject, &meta);
    EditingRules::for_subject(EditContext::Vocabulary, true, &graph, &subject).apply(&mut base);

    let editable: Vec<&str> = base
        .iter()
        .filter(|p| p.is_editable)
        .map(|p| p.key.as_str())
        .collect();
    assert_eq!(editable, [sh::PROPERTY]);

    let properties = iri(sh::PROPERTY);
    let values = &base.iter().find(|p| p.key == properties).unwrap().values;
    let name_index = values.iter().position(|v| v.id() == Some(&iri(NAME_SHAPE))).unwrap();
    let description_index = values
        .iter()
        .position(|v| v.id() == Some(&iri(DESCRIPTION_SHAPE)))
        .unwrap();

    let mut edits = PendingEdits::new();
    assert!(matches!(
        edits.delete_value(&base, &properties, name_index),
        Err(PropertyError::ProtectedValue { .. })
    ));
    assert!(edits.delete_value(&base, &properties, description_index).is_ok());
    assert!(matches!(
        edits.add_value(&base, &iri(sh::NAME), ValueEntry::literal("Renamed")),
        Err(PropertyError::NotEditable(_))
    ));
}

#[test]
fn ordering_scenarios() {
    let mut properties = vec![
        PropertyDescriptor::new("AAA", "AAA").with_values(vec![ValueEntry::literal("")]),
        PropertyDescriptor::new("BBB", "BBB").with_values(vec![ValueEntry::labelled("x", "John")]),
    ];
    sort_properties(&mut properties);
    assert_eq!(labels(&properties), ["BBB", "AAA"]);

    let mut properties = vec![
        PropertyDescriptor::new("AAA", "AAA").with_order(100),
        PropertyDescriptor::new("BBB", "BBB").with_order(90),
    ];
    sort_properties(&mut properties);
    assert_eq!(labels(&properties), ["BBB", "AAA"]);

    let mut properties = vec![
        PropertyDescriptor::new("http://x/b", "Second"),
        PropertyDescriptor::new("http://x/a", "First"),
    ];
    sort_properties(&mut properties);
    assert_eq!(labels(&properties), ["First", "Second"]);
}

fn arb_value() -> impl Strategy<Value = ValueEntry> {
    prop_oneof![
        Just(ValueEntry::literal("")),
        "[a-z]{1,4}".prop_map(ValueEntry::literal),
        "[a-z]{1,4}".prop_map(|id| ValueEntry::labelled(format!("http://x/{id}"), id)),
    ]
}

fn arb_descriptors() -> impl Strategy<Value = Vec<PropertyDescriptor>> {
    prop::collection::vec(
        (
            prop::option::of(-5i64..5),
            prop_oneof![Just("Alpha"), Just("beta"), Just("Gamma"), Just("alpha")],
            prop::collection::vec(arb_value(), 0..3),
        ),
        0..12,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (order, label, values))| {
                let mut p = PropertyDescriptor::new(format!("http://x/p{i}"), label).with_values(values);
                p.order = order;
                p
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn ordering_is_deterministic(properties in arb_descriptors()) {
        let mut forward = properties.clone();
        let mut backward: Vec<_> = properties.into_iter().rev().collect();
        sort_properties(&mut forward);
        sort_properties(&mut backward);
        prop_assert_eq!(&forward, &backward);

        for pair in forward.windows(2) {
            prop_assert_ne!(compare(&pair[0], &pair[1]), Ordering::Greater);
            if pair[0].order.is_none() {
                prop_assert!(pair[1].order.is_none());
                prop_assert!(pair[0].has_values() || !pair[1].has_values());
            }
        }
    }

    #[test]
    fn merging_no_updates_is_identity(properties in arb_descriptors()) {
        prop_assert_eq!(merge(&properties, &Updates::new()), properties);
    }

    #[test]
    fn keyword_values_round_trip(keywords in prop::collection::vec("[a-z]{1,8}", 0..6)) {
        let subject = iri(COLLECTION_1);
        let index = vocabulary_index();
        let mut graph: Graph = [Statement::new(subject.clone(), rdf::TYPE, iri(COLLECTION))].into_iter().collect();
        for keyword in &keywords {
            graph.insert(Statement::new(subject.clone(), KEYWORD, Value::literal(keyword.as_str())));
        }

        let properties = convert::from_graph(&graph, &subject, &index);
        let values = &properties.iter().find(|p| p.key == KEYWORD).unwrap().values;
        let patch = to_graph(&subject, &iri(KEYWORD), values, &index, &[iri(COLLECTION)]);

        let mut expected: Vec<String> = graph.iter().filter(|s| s.predicate == KEYWORD).map(ToString::to_string).collect();
        let mut actual: Vec<String> = if keywords.is_empty() {
            Vec::new()
        } else {
            patch.statements().iter().map(ToString::to_string).collect()
        };
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn author_lists_round_trip(authors in prop::collection::vec(prop_oneof![Just(PERSON_1), Just(PERSON_2), Just(USER_1)], 1..5)) {
        let subject = iri(COLLECTION_1);
        let index = vocabulary_index();
        let list = Value::List(authors.iter().map(|a| Value::reference(*a)).collect());
        let graph: Graph = [
            Statement::new(subject.clone(), rdf::TYPE, iri(COLLECTION)),
            Statement::new(subject.clone(), AUTHORS, list.clone()),
        ]
        .into_iter()
        .collect();

        let properties = from_graph(&graph, &subject, &index);
        let values = &properties.iter().find(|p| p.key == AUTHORS).unwrap().values;
        let patch = to_graph(&subject, &iri(AUTHORS), values, &index, &[iri(COLLECTION)]);
        prop_assert_eq!(patch.statements(), vec![Statement::new(subject, AUTHORS, list)]);
    }
}
