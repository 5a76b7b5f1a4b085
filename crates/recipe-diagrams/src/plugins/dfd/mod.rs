//! Data-flow diagram plugin
//!
//! Three levels of the same system: the context diagram (one process), the
//! level-1 breakdown and the level-2 refinement. All share the actor and
//! data-store vocabulary from [`domain`](super::domain), rank the role actors
//! together as peers and push the stores to the sink rank.

mod context;
mod level1;
mod level2;

pub use context::*;
pub use level1::*;
pub use level2::*;

use crate::core::{GraphAttributes, GraphDescription, NodeKind, RankClass, RoutingMode};

use super::domain::{DATA_STORES, ROLE_ACTORS, USER_ACTOR};

/// One data flow: source, target, optional label
pub(crate) type Flow = (&'static str, &'static str, Option<&'static str>);

/// Create a description with the layout shared by all data-flow levels
pub(crate) fn dfd_graph(name: &str, title: &str) -> GraphDescription {
    let attributes = GraphAttributes::new(name)
        .with_routing(RoutingMode::Orthogonal)
        .with_separation(1.5, 3.0)
        .with_title(title);
    GraphDescription::new(attributes)
}

/// Declare the generic user plus the role actors ranked as peers
pub(crate) fn add_actors(g: &mut GraphDescription) {
    g.add_kind_node(USER_ACTOR, USER_ACTOR, NodeKind::Actor);
    for (id, label) in ROLE_ACTORS {
        g.add_kind_node(id, label, NodeKind::Actor);
    }
    let roles: Vec<&str> = ROLE_ACTORS.iter().map(|(id, _)| *id).collect();
    g.add_rank_group(RankClass::Same, &roles);
}

/// Declare every data store and pin them to the sink rank
pub(crate) fn add_stores(g: &mut GraphDescription) {
    for store in DATA_STORES {
        g.add_kind_node(store.id, store.label, NodeKind::Store);
    }
    let ids: Vec<&str> = DATA_STORES.iter().map(|s| s.id).collect();
    g.add_rank_group(RankClass::Sink, &ids);
}

/// Declare processes from `(id, label)` pairs
pub(crate) fn add_processes(g: &mut GraphDescription, processes: &[(&str, &str)]) {
    for (id, label) in processes {
        g.add_kind_node(id, label, NodeKind::Process);
    }
}

pub(crate) fn add_flows(g: &mut GraphDescription, flows: &[Flow]) {
    for (from, to, label) in flows {
        match label {
            Some(label) => g.add_labeled_edge(from, to, label),
            None => g.add_simple_edge(from, to),
        }
    }
}
