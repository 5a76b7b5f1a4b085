//! Level-2 data-flow diagram
//!
//! Refines the level-1 processes into individual steps. Unlike the coarser
//! levels it has process-to-process refinement flows, e.g. credential
//! validation feeding the status check that feeds session start.

use tracing::{span, Level};

use crate::core::{Diagram, DiagramResult, RenderableGraph};
use crate::plugins::domain::{
    ACTIVITY_LOG, ADMIN_ACTOR, CONTRIBUTOR_ACTOR, DAILY_STAT, GUEST_ACTOR, RECIPE, REVIEW,
    SEARCH_HISTORY, SESSION, USER, USER_ACTOR,
};

use super::{add_actors, add_flows, add_processes, add_stores, dfd_graph, Flow};

const PROCESSES: &[(&str, &str)] = &[
    ("P10", "Validate Credentials"),
    ("P11", "Create Account"),
    ("P12", "Check Status & Role"),
    ("P13", "Start Session"),
    ("P14", "Browse/Search Recipes"),
    ("P15", "Save Search History"),
    ("P16", "View Recipe Detail"),
    ("P17", "Record View"),
    ("P18", "Toggle Like"),
    ("P19", "Toggle Favorite"),
    ("P20", "Add/Update Review"),
    ("P20b", "Delete Review"),
    ("P21a", "Validate Recipe Input"),
    ("P21", "Create/Edit Recipe"),
    ("P22", "Delete Own Recipe"),
    ("P23", "Update Profile"),
    ("P24", "Manage Users"),
    ("P25", "Manage Recipes"),
    ("P26", "View Dashboard Stats"),
    ("P27", "Review Activity Log"),
];

const FLOWS: &[Flow] = &[
    // Login
    (USER_ACTOR, "P10", Some("Login Data")),
    ("P10", USER, Some("User Lookup")),
    (USER, "P10", Some("User Record")),
    ("P10", USER_ACTOR, Some("Auth Result")),
    // Signup
    (USER_ACTOR, "P11", Some("Signup Data")),
    ("P11", USER, Some("New User (Pending)")),
    ("P11", USER_ACTOR, Some("Account Created")),
    ("P11", ACTIVITY_LOG, Some("Signup Activity")),
    ("P11", DAILY_STAT, Some("New User Stats")),
    // Status, role and session
    ("P10", "P12", Some("User Status")),
    (USER, "P12", Some("Status")),
    ("P12", "P13", Some("Admin/Contributor/Guest")),
    ("P13", SESSION, Some("Session")),
    ("P13", USER_ACTOR, Some("Session/Role")),
    ("P13", ADMIN_ACTOR, Some("Admin")),
    ("P13", CONTRIBUTOR_ACTOR, Some("Contributor")),
    ("P13", GUEST_ACTOR, Some("Guest")),
    ("P13", DAILY_STAT, Some("Active User Ping")),
    // Browse and search
    (CONTRIBUTOR_ACTOR, "P14", Some("Search / Filter")),
    (GUEST_ACTOR, "P14", Some("Search / Filter")),
    ("P14", RECIPE, Some("Recipe List")),
    ("P14", CONTRIBUTOR_ACTOR, Some("Recipe List")),
    ("P14", GUEST_ACTOR, Some("Recipe List")),
    (REVIEW, "P14", Some("Rating Lookup")),
    ("P14", "P15", Some("Search Query")),
    ("P15", SEARCH_HISTORY, Some("Search Entry")),
    // Recipe detail and view tracking
    (CONTRIBUTOR_ACTOR, "P16", Some("View Detail")),
    (GUEST_ACTOR, "P16", Some("View Detail")),
    ("P16", RECIPE, Some("Recipe Data")),
    ("P16", "P17", Some("View Event")),
    ("P17", RECIPE, Some("Viewers Update")),
    ("P17", DAILY_STAT, Some("View Stats")),
    // Likes, favorites, reviews
    (CONTRIBUTOR_ACTOR, "P18", Some("Like")),
    ("P18", RECIPE, Some("Recipe Likes")),
    (CONTRIBUTOR_ACTOR, "P19", Some("Favorite")),
    ("P19", USER, Some("User Favorites")),
    (CONTRIBUTOR_ACTOR, "P20", Some("Review")),
    ("P20", REVIEW, Some("Review Record")),
    (CONTRIBUTOR_ACTOR, "P20b", Some("Delete Review")),
    ("P20b", REVIEW, Some("Remove Review")),
    // Recipe authoring
    (CONTRIBUTOR_ACTOR, "P21a", Some("Recipe Form")),
    ("P21a", CONTRIBUTOR_ACTOR, Some("Validation Errors")),
    ("P21a", "P21", Some("Valid Data")),
    ("P21", RECIPE, Some("Recipe Save")),
    (CONTRIBUTOR_ACTOR, "P22", Some("Delete Recipe")),
    ("P22", RECIPE, Some("Remove Recipe")),
    ("P22", REVIEW, Some("Remove Reviews")),
    ("P22", USER, Some("Clean Favorites")),
    // Profile
    (CONTRIBUTOR_ACTOR, "P23", Some("Profile Updates")),
    ("P23", USER, Some("Profile Save")),
    // Administration
    (ADMIN_ACTOR, "P24", Some("User Actions")),
    ("P24", USER, Some("User Updates")),
    ("P24", ACTIVITY_LOG, Some("Admin Activity")),
    (ADMIN_ACTOR, "P25", Some("Recipe Actions")),
    ("P25", RECIPE, Some("Recipe Updates")),
    ("P25", ACTIVITY_LOG, Some("Admin Activity")),
    (ADMIN_ACTOR, "P26", Some("Stats Request")),
    ("P26", DAILY_STAT, Some("Metrics")),
    ("P26", ADMIN_ACTOR, Some("Dashboard Stats")),
    (ADMIN_ACTOR, "P27", Some("Activity Review")),
    ("P27", ACTIVITY_LOG, Some("Activity Feed")),
    ("P27", ADMIN_ACTOR, Some("Activity Feed")),
];

/// Full user and admin flows, one process per step
#[derive(Debug, Default, Clone, Copy)]
pub struct Level2Dfd;

impl Level2Dfd {
    pub fn new() -> Self {
        Self
    }
}

impl Diagram for Level2Dfd {
    fn name(&self) -> &'static str {
        "dfd-level2"
    }

    fn file_stem(&self) -> String {
        "data_flow_level2".to_string()
    }

    fn description(&self) -> &'static str {
        "Level-2 data-flow diagram (full user and admin flows)"
    }

    fn build(&self) -> DiagramResult<RenderableGraph> {
        let build_span = span!(Level::INFO, "build_dfd_level2");
        let _enter = build_span.enter();

        let mut g = dfd_graph("DataFlow_Level2", "Level 2 DFD (Full User + Admin Flows)");
        g.set_file_stem(self.file_stem());
        add_actors(&mut g);
        add_processes(&mut g, PROCESSES);
        add_stores(&mut g);
        add_flows(&mut g, FLOWS);
        g.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GraphView, NodeKind};

    fn is_process(graph: &RenderableGraph, id: &str) -> bool {
        graph
            .get_node(id)
            .map(|n| n.kind == NodeKind::Process)
            .unwrap_or(false)
    }

    #[test]
    fn test_refinement_edges() {
        let graph = Level2Dfd::new().build().unwrap();
        let refinements: Vec<_> = graph
            .edges()
            .filter(|e| is_process(&graph, &e.from) && is_process(&graph, &e.to))
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(
            refinements,
            vec![
                ("P10", "P12"),
                ("P12", "P13"),
                ("P14", "P15"),
                ("P16", "P17"),
                ("P21a", "P21"),
            ]
        );
    }

    #[test]
    fn test_login_flow_label() {
        let graph = Level2Dfd::new().build().unwrap();
        let login = graph.edges_between(USER_ACTOR, "P10");
        assert_eq!(login.len(), 1);
        assert_eq!(login[0].label_text(), Some("Login Data"));
        assert!(login[0].label().unwrap().is_offset());
    }

    #[test]
    fn test_every_flow_is_labelled() {
        let graph = Level2Dfd::new().build().unwrap();
        assert!(graph.edges().all(|e| e.label().is_some()));
        assert_eq!(graph.nodes_of_kind(NodeKind::Process).len(), 20);
    }
}
