//! Application flowchart plugin
//!
//! The user journey from first visit through authentication into one of
//! three role modes. Each mode is drawn as its own cluster around an action
//! diamond that every branch returns to, and each mode's logout leads to the
//! shared `End` terminal.

use tracing::{debug, span, Level};

use crate::core::{
    Database, Diagram, DiagramResult, GraphAttributes, GraphDescription, NodeData, NodeKind,
    NodeShape, RenderableGraph, RoutingMode,
};

pub const START: &str = "Start";
pub const END: &str = "End";

const CLUSTER_COLOR: &str = "gray50";

/// One role mode: a cluster around an action hub
struct Mode {
    cluster: &'static str,
    label: &'static str,
    entry: &'static str,
    action: (&'static str, &'static str),
    /// `(choice, node id, node label)`; each branch returns to the hub
    branches: &'static [(&'static str, &'static str, &'static str)],
    logout: &'static str,
}

const GUEST_MODE: Mode = Mode {
    cluster: "guest",
    label: "User (Guest mode)",
    entry: "GuestEntry",
    action: ("GuestAction", "Action?"),
    branches: &[
        ("Browse/Search", "GuestBrowse", "View approved recipes"),
        ("View Detail", "GuestDetail", "Recipe detail page"),
        (
            "Like/Save/Review/Create/Edit",
            "GuestBlock",
            "Show message:\nPending approval",
        ),
    ],
    logout: "GuestLogout",
};

const CONTRIBUTOR_MODE: Mode = Mode {
    cluster: "contrib",
    label: "User (Contributor mode)",
    entry: "ContributorEntry",
    action: ("ContributorAction", "Action?"),
    branches: &[
        ("Browse/Search", "ContribBrowse", "View approved recipes"),
        ("View Detail", "ContribDetail", "Recipe detail page"),
        ("Like", "ContribLike", "Toggle like"),
        ("Save", "ContribSave", "Toggle favorite"),
        ("Review", "ContribReview", "Write/edit review"),
        ("Profile", "ContribProfile", "Edit profile"),
        ("Edit/Delete Own", "EditOwn", "Edit/Delete recipe"),
    ],
    logout: "ContribLogout",
};

const ADMIN_MODE: Mode = Mode {
    cluster: "admin",
    label: "Admin mode",
    entry: "AdminEntry",
    action: ("AdminAction", "Admin Action?"),
    branches: &[
        ("View Stats", "AdminStats", "View dashboard stats"),
        ("Manage Users", "AdminUsers", "Approve/Suspend/Delete users"),
        (
            "Moderate Recipes",
            "AdminRecipes",
            "Approve/Reject/Delete recipes",
        ),
        ("Review Activity", "AdminLog", "View activity log"),
    ],
    logout: "AdminLogout",
};

/// Contributor recipe creation: form, validation loop, save
const CREATE_FLOW: [(&str, &str, NodeKind); 4] = [
    ("CreateStep1", "Fill recipe form", NodeKind::Step),
    ("CreateStep2", "Form valid?", NodeKind::Decision),
    ("CreateError", "Show validation error", NodeKind::Step),
    ("CreateStep3", "Save recipe (Pending)", NodeKind::Step),
];

fn step(g: &mut GraphDescription, id: &str, label: &str) {
    g.add_kind_node(id, label, NodeKind::Step);
}

fn decision(g: &mut GraphDescription, id: &str, label: &str) {
    g.add_kind_node(id, label, NodeKind::Decision);
}

/// The enlarged diamond a mode's branches fan out from
fn action_hub(g: &mut GraphDescription, id: &str, label: &str) {
    g.insert_node(
        NodeData::new(id, label, NodeKind::Decision)
            .with_attr("width", "2")
            .with_attr("height", "1.2")
            .with_attr("fontsize", "14"),
    );
}

fn add_mode(g: &mut GraphDescription, mode: &Mode, extra_members: &[&str]) {
    let (hub, hub_label) = mode.action;
    action_hub(g, hub, hub_label);
    for (_, id, label) in mode.branches {
        step(g, id, label);
    }
    step(g, mode.logout, "Clear session");

    g.add_simple_edge(mode.entry, hub);
    for (choice, id, _) in mode.branches {
        g.add_labeled_edge(hub, id, choice);
        g.add_simple_edge(id, hub);
    }
    g.add_labeled_edge(hub, mode.logout, "Logout");

    let mut members = vec![mode.entry, hub];
    members.extend(mode.branches.iter().map(|(_, id, _)| *id));
    members.extend_from_slice(extra_members);
    members.push(mode.logout);
    g.add_cluster(mode.cluster, mode.label, Some(CLUSTER_COLOR), &members);
    debug!(cluster = mode.cluster, member_count = members.len(), "Mode cluster added");
}

fn add_authentication(g: &mut GraphDescription) {
    g.add_kind_node(START, "Start: User visits app", NodeKind::Terminal);
    decision(g, "AuthAction", "Login or Sign Up?");
    g.add_simple_edge(START, "AuthAction");

    step(g, "LoginStep1", "Enter email & password");
    decision(g, "LoginStep2", "Credentials valid?");
    step(g, "LoginError", "Show error");
    decision(g, "AdminCheck", "Admin credentials?");
    decision(g, "AccountStatus", "Account status?");
    g.add_labeled_edge("AuthAction", "LoginStep1", "Login");
    g.add_simple_edge("LoginStep1", "LoginStep2");
    g.add_labeled_edge("LoginStep2", "LoginError", "No");
    g.add_simple_edge("LoginError", "LoginStep1");
    g.add_labeled_edge("LoginStep2", "AdminCheck", "Yes");
    // Admin entry is declared with the other role entries below
    g.add_labeled_edge("AdminCheck", ADMIN_MODE.entry, "Yes");
    g.add_labeled_edge("AdminCheck", "AccountStatus", "No");
    g.add_labeled_edge("AccountStatus", GUEST_MODE.entry, "Suspended/Pending");
    g.add_labeled_edge("AccountStatus", CONTRIBUTOR_MODE.entry, "Active/Inactive");

    step(g, "SignupStep1", "Enter registration details");
    step(g, "SignupStep2", "Create user\n(role: user, status: pending)");
    step(g, "SignupStep3", "Auto-login (Pending)");
    step(g, GUEST_MODE.entry, "Enter Guest mode");
    g.add_labeled_edge("AuthAction", "SignupStep1", "Sign Up");
    g.add_simple_edge("SignupStep1", "SignupStep2");
    g.add_simple_edge("SignupStep2", "SignupStep3");
    g.add_simple_edge("SignupStep3", GUEST_MODE.entry);

    g.add_kind_node(END, "End", NodeKind::Terminal);
    g.add_labeled_edge("AuthAction", END, "Exit");

    step(g, ADMIN_MODE.entry, "Enter Admin mode");
    step(g, CONTRIBUTOR_MODE.entry, "Enter Contributor mode");
}

fn add_recipe_creation(g: &mut GraphDescription) {
    for (id, label, kind) in CREATE_FLOW {
        g.add_kind_node(id, label, kind);
    }
    let hub = CONTRIBUTOR_MODE.action.0;
    g.add_labeled_edge(hub, "CreateStep1", "Create Recipe");
    g.add_simple_edge("CreateStep1", "CreateStep2");
    g.add_labeled_edge("CreateStep2", "CreateError", "No");
    g.add_simple_edge("CreateError", "CreateStep1");
    g.add_labeled_edge("CreateStep2", "CreateStep3", "Yes");
    g.add_simple_edge("CreateStep3", hub);
}

/// The application's navigation flowchart
#[derive(Debug, Default, Clone, Copy)]
pub struct ApplicationFlowchart;

impl ApplicationFlowchart {
    pub fn new() -> Self {
        Self
    }
}

impl Diagram for ApplicationFlowchart {
    fn name(&self) -> &'static str {
        "flowchart"
    }

    fn file_stem(&self) -> String {
        "application_flowchart".to_string()
    }

    fn description(&self) -> &'static str {
        "Application flowchart: authentication and the three role modes"
    }

    fn build(&self) -> DiagramResult<RenderableGraph> {
        let build_span = span!(Level::INFO, "build_flowchart");
        let _enter = build_span.enter();

        let attributes = GraphAttributes::new("ApplicationFlowchart")
            .with_routing(RoutingMode::Orthogonal)
            .with_separation(1.0, 2.5)
            .with_default_node_shape(NodeShape::Box);
        let mut g = GraphDescription::new(attributes);
        g.set_file_stem(self.file_stem());

        add_authentication(&mut g);
        add_mode(&mut g, &GUEST_MODE, &[]);
        add_recipe_creation(&mut g);
        let create_ids: Vec<&str> = CREATE_FLOW.iter().map(|(id, _, _)| *id).collect();
        add_mode(&mut g, &CONTRIBUTOR_MODE, &create_ids);
        add_mode(&mut g, &ADMIN_MODE, &[]);

        for mode in [&GUEST_MODE, &CONTRIBUTOR_MODE, &ADMIN_MODE] {
            g.add_simple_edge(mode.logout, END);
        }
        g.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GraphView, LabelAttribute};

    fn build() -> RenderableGraph {
        ApplicationFlowchart::new().build().unwrap()
    }

    #[test]
    fn test_every_logout_reaches_end() {
        let graph = build();
        for logout in ["GuestLogout", "ContribLogout", "AdminLogout"] {
            assert_eq!(graph.edges_between(logout, END).len(), 1);
            assert_eq!(graph.get_node(logout).unwrap().label, "Clear session");
        }
        assert_eq!(graph.edges_between("AuthAction", END).len(), 1);
    }

    #[test]
    fn test_mode_clusters() {
        let graph = build();
        let clusters: Vec<_> = graph.clusters().collect();
        assert_eq!(clusters.len(), 3);
        let labels: Vec<_> = clusters.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["User (Guest mode)", "User (Contributor mode)", "Admin mode"]
        );
        for cluster in &clusters {
            assert_eq!(cluster.color.as_deref(), Some("gray50"));
            for id in &cluster.member_ids {
                assert!(graph.has_node(id), "{} not declared", id);
            }
        }
        assert_eq!(graph.cluster_of("GuestEntry").unwrap().id, "guest");
        assert_eq!(graph.cluster_of("CreateError").unwrap().id, "contrib");
        assert!(graph.cluster_of(START).is_none());
    }

    #[test]
    fn test_action_hubs_are_enlarged() {
        let graph = build();
        for hub in ["GuestAction", "ContributorAction", "AdminAction"] {
            let node = graph.get_node(hub).unwrap();
            assert_eq!(node.shape, NodeShape::Diamond);
            assert_eq!(node.attributes.get("width").map(String::as_str), Some("2"));
            assert_eq!(node.attributes.get("height").map(String::as_str), Some("1.2"));
            assert_eq!(node.attributes.get("fontsize").map(String::as_str), Some("14"));
        }
        assert!(graph.get_node("LoginStep2").unwrap().attributes.is_empty());
    }

    #[test]
    fn test_terminals_and_default_shape() {
        let graph = build();
        assert_eq!(graph.get_node(START).unwrap().shape, NodeShape::Oval);
        assert_eq!(graph.get_node(END).unwrap().shape, NodeShape::Oval);
        assert_eq!(graph.get_node("LoginStep1").unwrap().shape, NodeShape::Box);
        assert_eq!(graph.attributes().default_node_shape, Some(NodeShape::Box));
    }

    #[test]
    fn test_branch_labels_are_offset() {
        let graph = build();
        let logins = graph.edges_between("AuthAction", "LoginStep1");
        assert_eq!(logins[0].label_text(), Some("Login"));
        for edge in graph.edges() {
            if let Some(label) = edge.label() {
                assert_eq!(label.attribute, LabelAttribute::Offset);
            }
        }
    }

    #[test]
    fn test_admin_entry_referenced_before_declared() {
        let graph = build();
        assert!(graph.has_node(ADMIN_MODE.entry));
        assert!(graph.undeclared_endpoints().is_empty());
    }
}
