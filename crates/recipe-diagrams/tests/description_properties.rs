//! Property-based tests for the graph description model
//!
//! 1. Re-declaring a node keeps one node carrying the last label.
//! 2. Parallel edges between the same pair are never merged.
//! 3. Under orthogonal routing every label is an offset label.
//! 4. Conflicting label requests are rejected at finalize, not at insert.

use proptest::prelude::*;
use recipe_diagrams::prelude::*;
use recipe_diagrams::EdgeData;

fn id_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,11}"
}

fn label_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,24}"
}

fn routing_strategy() -> impl Strategy<Value = RoutingMode> {
    prop_oneof![
        Just(RoutingMode::Curved),
        Just(RoutingMode::Orthogonal),
        Just(RoutingMode::Polyline),
    ]
}

fn description(routing: RoutingMode) -> GraphDescription {
    GraphDescription::new(GraphAttributes::new("Prop").with_routing(routing))
}

proptest! {
    #[test]
    fn node_declaration_is_idempotent(
        id in id_strategy(),
        first in label_strategy(),
        second in label_strategy(),
    ) {
        let mut g = description(RoutingMode::Curved);
        g.add_kind_node(&id, &first, NodeKind::Entity);
        g.add_kind_node(&id, &second, NodeKind::Entity);

        let graph = g.finalize().unwrap();
        prop_assert_eq!(graph.node_count(), 1);
        prop_assert_eq!(&graph.get_node(&id).unwrap().label, &second);
    }
}

proptest! {
    #[test]
    fn parallel_edges_are_preserved(
        from in id_strategy(),
        to in id_strategy(),
        labels in prop::collection::vec(label_strategy(), 1..6),
        routing in routing_strategy(),
    ) {
        let mut g = description(routing);
        for label in &labels {
            g.add_labeled_edge(&from, &to, label);
        }

        let graph = g.finalize().unwrap();
        let between = graph.edges_between(&from, &to);
        prop_assert_eq!(between.len(), labels.len());
        for (edge, label) in between.iter().zip(&labels) {
            prop_assert_eq!(edge.label_text(), Some(label.as_str()));
        }
    }
}

proptest! {
    #[test]
    fn orthogonal_labels_are_offset(label in label_strategy()) {
        let mut g = description(RoutingMode::Orthogonal);
        g.add_labeled_edge("User", "Login", &label);

        let graph = g.finalize().unwrap();
        let edge = graph.edges().next().unwrap();
        prop_assert_eq!(edge.label().unwrap().attribute, LabelAttribute::Offset);
    }
}

proptest! {
    #[test]
    fn conflicting_labels_fail_at_finalize(
        routing in routing_strategy(),
        label in label_strategy(),
        xlabel in label_strategy(),
    ) {
        let mut g = description(routing);
        g.insert_edge(EdgeData::with_label("A", "B", label).with_xlabel(xlabel));
        // Still accepted at insert time
        prop_assert_eq!(g.edge_count(), 1);

        let err = g.finalize().unwrap_err();
        prop_assert!(err.is_invalid_graph());
    }
}

#[test]
fn test_login_data_is_offset() {
    let mut g = description(RoutingMode::Orthogonal);
    g.add_labeled_edge("User", "P1", "Login Data");
    let graph = g.finalize().unwrap();
    let label = graph.edges().next().unwrap().label().unwrap();
    assert_eq!(label.attribute, LabelAttribute::Offset);
    assert_eq!(label.value, "Login Data");
}

#[test]
fn test_empty_id_is_invalid() {
    let mut g = description(RoutingMode::Curved);
    g.add_kind_node("", "nameless", NodeKind::Entity);
    let err = g.finalize().unwrap_err();
    assert!(err.is_invalid_graph());
    assert!(err.to_string().contains("empty id"));
}
