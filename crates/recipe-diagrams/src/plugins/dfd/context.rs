//! Context data-flow diagram (level 0)

use tracing::{debug, span, Level};

use crate::core::{Diagram, DiagramResult, NodeKind, RenderableGraph};
use crate::plugins::domain::{ADMIN_ACTOR, CONTRIBUTOR_ACTOR, DATA_STORES, GUEST_ACTOR, USER_ACTOR};

use super::{add_actors, add_flows, add_stores, dfd_graph, Flow};

/// ID of the single process standing for the whole system
pub const SYSTEM: &str = "System";

const FLOWS: &[Flow] = &[
    (USER_ACTOR, SYSTEM, Some("Credentials / Signup Data")),
    (SYSTEM, USER_ACTOR, Some("Auth Result / Session")),
    (SYSTEM, ADMIN_ACTOR, Some("Auth Result / Session")),
    (SYSTEM, CONTRIBUTOR_ACTOR, Some("Auth Result / Session")),
    (SYSTEM, GUEST_ACTOR, Some("Auth Result / Session")),
    (CONTRIBUTOR_ACTOR, SYSTEM, Some("Browse/Search / View Detail")),
    (SYSTEM, CONTRIBUTOR_ACTOR, Some("Recipe Listings / Detail")),
    (GUEST_ACTOR, SYSTEM, Some("Browse/Search / View Detail")),
    (SYSTEM, GUEST_ACTOR, Some("Recipe Listings / Detail")),
    (CONTRIBUTOR_ACTOR, SYSTEM, Some("Likes, Favorites, Reviews")),
    (SYSTEM, CONTRIBUTOR_ACTOR, Some("Updates / Confirmations")),
    (ADMIN_ACTOR, SYSTEM, Some("Moderation / Stats Requests")),
    (SYSTEM, ADMIN_ACTOR, Some("Results / Analytics")),
];

/// The whole recipe-sharing system as one process among its actors and stores
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextDfd;

impl ContextDfd {
    pub fn new() -> Self {
        Self
    }
}

impl Diagram for ContextDfd {
    fn name(&self) -> &'static str {
        "dfd-context"
    }

    fn file_stem(&self) -> String {
        "data_flow_context".to_string()
    }

    fn description(&self) -> &'static str {
        "Context data-flow diagram (level 0)"
    }

    fn build(&self) -> DiagramResult<RenderableGraph> {
        let build_span = span!(Level::INFO, "build_dfd_context");
        let _enter = build_span.enter();

        let mut g = dfd_graph("DataFlow_Context", "Context DFD (Level 0)");
        g.set_file_stem(self.file_stem());
        add_actors(&mut g);
        g.add_kind_node(SYSTEM, "Recipe Sharing System", NodeKind::Process);
        add_stores(&mut g);

        add_flows(&mut g, FLOWS);

        // Every store is read and written by the system exactly once
        for store in DATA_STORES {
            g.add_simple_edge(SYSTEM, store.id);
            g.add_simple_edge(store.id, SYSTEM);
        }

        debug!(store_count = DATA_STORES.len(), "Context flows added");
        g.finalize()
    }
}
