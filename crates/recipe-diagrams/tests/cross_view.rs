//! Consistency checks across the independently assembled views

use recipe_diagrams::plugins::domain::{DATA_STORES, RECIPE, USER};
use recipe_diagrams::prelude::*;
use recipe_diagrams::build;

const RECIPE_VIEWS: [DiagramKind; 7] = [
    DiagramKind::DfdContext,
    DiagramKind::DfdLevel1,
    DiagramKind::DfdLevel2,
    DiagramKind::ErConceptual,
    DiagramKind::ErConceptualDashboard,
    DiagramKind::ErLogical,
    DiagramKind::ErLogicalDashboard,
];

#[test]
fn test_recipe_id_is_shared() {
    for kind in RECIPE_VIEWS {
        let graph = build(kind).unwrap();
        assert!(graph.has_node(RECIPE), "{} lacks {}", kind, RECIPE);
        assert!(
            graph.nodes().all(|n| n.id == RECIPE || !n.id.eq_ignore_ascii_case(RECIPE)),
            "{} spells RECIPE differently",
            kind
        );
    }
}

#[test]
fn test_store_ids_match_er_entities() {
    let logical = build(DiagramKind::ErLogical).unwrap();
    for store in DATA_STORES {
        assert_eq!(
            logical.get_node(store.id).map(|n| n.kind),
            Some(NodeKind::Entity),
            "store {} has no matching entity",
            store.id
        );
    }
}

#[test]
fn test_context_scenario() {
    let graph = build(DiagramKind::DfdContext).unwrap();
    let processes = graph.nodes_of_kind(NodeKind::Process);
    assert_eq!(processes.len(), 1);
    assert_eq!(processes[0].id, "System");
    assert!(graph.nodes_of_kind(NodeKind::Actor).len() >= 4);

    for store in graph.nodes_of_kind(NodeKind::Store) {
        assert_eq!(graph.edges_between("System", &store.id).len(), 1);
        assert_eq!(graph.edges_between(&store.id, "System").len(), 1);
    }
}

#[test]
fn test_same_rank_members_are_declared() {
    for kind in [DiagramKind::ErLogical, DiagramKind::ErLogicalDashboard] {
        let graph = build(kind).unwrap();
        for group in graph.rank_groups().filter(|g| g.rank_class == RankClass::Same) {
            for id in &group.member_ids {
                assert!(graph.has_node(id), "{}: {} is not a node", kind, id);
            }
        }
    }
}

#[test]
fn test_user_subtypes_in_both_er_levels() {
    for kind in [DiagramKind::ErConceptual, DiagramKind::ErLogical] {
        let graph = build(kind).unwrap();
        let is_a: Vec<_> = graph
            .out_edges(USER)
            .into_iter()
            .filter(|e| !e.is_invisible())
            .filter(|e| graph.get_node(&e.to).map(|n| n.label.as_str()) == Some("is a"))
            .collect();
        assert_eq!(is_a.len(), 3);
    }
}
