//! Graph helper properties

use ldm_graph::prelude::*;
use proptest::prelude::*;

fn arb_statement() -> impl Strategy<Value = Statement> {
    let subject = prop_oneof![Just("http://x/a"), Just("http://x/b"), Just("http://x/c")];
    let predicate = prop_oneof![Just(rdf::TYPE), Just(rdfs::LABEL), Just("http://x/p")];
    let object = prop_oneof![
        "[a-z]{0,6}".prop_map(Value::literal),
        prop_oneof![Just("http://x/A"), Just("http://x/B")].prop_map(Value::reference),
    ];
    (subject, predicate, object).prop_map(|(s, p, o)| Statement::new(s, p, o))
}

proptest! {
    #[test]
    fn remove_subject_is_exact(statements in prop::collection::vec(arb_statement(), 0..40)) {
        let mut graph: Graph = statements.iter().cloned().collect();
        let target = Iri::new("http://x/a");
        let about = statements.iter().filter(|s| s.subject == target).count();

        let removed = graph.remove_subject(&target);

        prop_assert_eq!(removed, about);
        prop_assert!(!graph.has_subject(&target));
        prop_assert_eq!(graph.len(), statements.len() - about);
    }

    #[test]
    fn types_are_distinct(statements in prop::collection::vec(arb_statement(), 0..40)) {
        let graph: Graph = statements.into_iter().collect();
        for subject in ["http://x/a", "http://x/b", "http://x/c"] {
            let types = graph.types_of(&Iri::new(subject));
            let mut deduped = types.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(types.len(), deduped.len());
        }
    }

    #[test]
    fn json_ld_preserves_statement_count(statements in prop::collection::vec(arb_statement(), 0..40)) {
        let graph: Graph = statements.into_iter().collect();
        let back = ldm_graph::jsonld::from_json(&ldm_graph::jsonld::to_json(&graph)).unwrap();
        prop_assert_eq!(back.len(), graph.len());
    }
}
