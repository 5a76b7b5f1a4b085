//! Level-1 data-flow diagram

use tracing::{span, Level};

use crate::core::{Diagram, DiagramResult, RenderableGraph};
use crate::plugins::domain::{
    ACTIVITY_LOG, ADMIN_ACTOR, CONTRIBUTOR_ACTOR, DAILY_STAT, GUEST_ACTOR, RECIPE, REVIEW,
    SEARCH_HISTORY, SESSION, USER, USER_ACTOR,
};

use super::{add_actors, add_flows, add_processes, add_stores, dfd_graph, Flow};

const PROCESSES: &[(&str, &str)] = &[
    ("P1", "Authenticate & Register"),
    ("P2", "Session & Role Management"),
    ("P3", "Browse/Search Recipes"),
    ("P4", "View Recipe Detail"),
    ("P5", "Likes & Favorites"),
    ("P6", "Reviews & Ratings"),
    ("P6b", "Delete Review"),
    ("P7", "Create/Edit/Delete Recipe"),
    ("P8", "Profile Management"),
    ("P9", "Admin User Moderation"),
    ("P10", "Admin Recipe Moderation"),
    ("P11", "Analytics & Activity Logging"),
];

const FLOWS: &[Flow] = &[
    // Authentication
    (USER_ACTOR, "P1", Some("Login/Signup Data")),
    ("P1", USER_ACTOR, Some("Auth Result")),
    ("P1", USER, None),
    (USER, "P1", None),
    ("P1", ACTIVITY_LOG, Some("Signup Activity")),
    ("P1", DAILY_STAT, Some("New User Stats")),
    // Sessions and roles
    ("P1", "P2", Some("Session Token")),
    ("P2", SESSION, None),
    (SESSION, "P2", None),
    ("P2", USER_ACTOR, Some("Role/Status")),
    ("P2", ADMIN_ACTOR, Some("Admin")),
    ("P2", CONTRIBUTOR_ACTOR, Some("Contributor")),
    ("P2", GUEST_ACTOR, Some("Guest")),
    ("P2", DAILY_STAT, Some("Active User Ping")),
    // Browse and search
    (CONTRIBUTOR_ACTOR, "P3", Some("Search / Filter")),
    (GUEST_ACTOR, "P3", Some("Search / Filter")),
    ("P3", CONTRIBUTOR_ACTOR, Some("Recipe List")),
    ("P3", GUEST_ACTOR, Some("Recipe List")),
    ("P3", RECIPE, None),
    (RECIPE, "P3", None),
    ("P3", SEARCH_HISTORY, Some("Save Search")),
    (SEARCH_HISTORY, "P3", Some("History Entries")),
    ("P3", SEARCH_HISTORY, Some("Clear History")),
    // Recipe detail
    (CONTRIBUTOR_ACTOR, "P4", Some("Recipe ID")),
    (GUEST_ACTOR, "P4", Some("Recipe ID")),
    ("P4", CONTRIBUTOR_ACTOR, Some("Detail")),
    ("P4", GUEST_ACTOR, Some("Detail")),
    ("P4", RECIPE, None),
    (RECIPE, "P4", None),
    ("P4", DAILY_STAT, None),
    // Likes and favorites
    (CONTRIBUTOR_ACTOR, "P5", Some("Like/Favorite")),
    ("P5", USER, None),
    (USER, "P5", None),
    ("P5", RECIPE, None),
    (RECIPE, "P5", None),
    // Reviews
    (CONTRIBUTOR_ACTOR, "P6", Some("Review Data")),
    ("P6", REVIEW, None),
    (REVIEW, "P6", None),
    (CONTRIBUTOR_ACTOR, "P6b", Some("Delete Review")),
    ("P6b", REVIEW, Some("Remove Review")),
    // Recipe authoring
    (CONTRIBUTOR_ACTOR, "P7", Some("Recipe Form")),
    ("P7", RECIPE, None),
    (RECIPE, "P7", None),
    ("P7", ACTIVITY_LOG, None),
    // Profile
    (CONTRIBUTOR_ACTOR, "P8", Some("Profile Updates")),
    ("P8", USER, None),
    (USER, "P8", None),
    // Administration
    (ADMIN_ACTOR, "P9", Some("User Actions")),
    ("P9", USER, None),
    (USER, "P9", None),
    ("P9", ACTIVITY_LOG, None),
    (ADMIN_ACTOR, "P10", Some("Recipe Actions")),
    ("P10", RECIPE, None),
    (RECIPE, "P10", None),
    ("P10", ACTIVITY_LOG, None),
    (ADMIN_ACTOR, "P11", Some("Stats Request")),
    ("P11", DAILY_STAT, None),
    (DAILY_STAT, "P11", None),
    ("P11", ACTIVITY_LOG, None),
    (ACTIVITY_LOG, "P11", None),
    ("P11", ADMIN_ACTOR, Some("Dashboard Stats")),
];

/// The system broken into its major processes
#[derive(Debug, Default, Clone, Copy)]
pub struct Level1Dfd;

impl Level1Dfd {
    pub fn new() -> Self {
        Self
    }
}

impl Diagram for Level1Dfd {
    fn name(&self) -> &'static str {
        "dfd-level1"
    }

    fn file_stem(&self) -> String {
        "data_flow_level1".to_string()
    }

    fn description(&self) -> &'static str {
        "Level-1 data-flow diagram"
    }

    fn build(&self) -> DiagramResult<RenderableGraph> {
        let build_span = span!(Level::INFO, "build_dfd_level1");
        let _enter = build_span.enter();

        let mut g = dfd_graph("DataFlow_Level1", "Level 1 DFD");
        g.set_file_stem(self.file_stem());
        add_actors(&mut g);
        add_processes(&mut g, PROCESSES);
        add_stores(&mut g);
        add_flows(&mut g, FLOWS);
        g.finalize()
    }
}
