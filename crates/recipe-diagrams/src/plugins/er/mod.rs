//! Entity-relationship diagram plugin
//!
//! Chen-notation ER diagrams of the recipe-sharing data model at two levels
//! of detail. Both share the user subtype hierarchy and the rank layout
//! built here, and both come in two schema versions selected by
//! [`SchemaVersion`].

mod conceptual;
mod logical;

pub use conceptual::*;
pub use logical::*;

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::core::{
    DiagramError, GraphAttributes, GraphDescription, NodeKind, RankClass, RoutingMode,
};

use super::domain::{
    ACTIVITY_LOG, ADMIN, CONTRIBUTOR, DAILY_STAT, GUEST, RECIPE, REVIEW, SEARCH_HISTORY, SESSION,
    STATS_DASHBOARD, USER,
};

/// Which generation of the data model a diagram shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaVersion {
    /// Activity log plus per-day statistics tables
    #[default]
    ActivityLog,
    /// A single aggregated statistics dashboard; views are their own entity
    StatsDashboard,
}

impl SchemaVersion {
    pub fn all() -> [SchemaVersion; 2] {
        [SchemaVersion::ActivityLog, SchemaVersion::StatsDashboard]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::ActivityLog => "activity-log",
            SchemaVersion::StatsDashboard => "stats-dashboard",
        }
    }

    /// Suffix appended to diagram names and file stems
    pub(crate) fn suffix(&self) -> &'static str {
        match self {
            SchemaVersion::ActivityLog => "",
            SchemaVersion::StatsDashboard => "_dashboard",
        }
    }

    /// The entity that aggregates usage statistics
    pub fn stats_entity(&self) -> &'static str {
        match self {
            SchemaVersion::ActivityLog => DAILY_STAT,
            SchemaVersion::StatsDashboard => STATS_DASHBOARD,
        }
    }

    /// Entities pinned to the bottom rank
    pub(crate) fn bottom_entities(&self) -> Vec<&'static str> {
        match self {
            SchemaVersion::ActivityLog => vec![
                RECIPE,
                REVIEW,
                SEARCH_HISTORY,
                ACTIVITY_LOG,
                SESSION,
                DAILY_STAT,
            ],
            SchemaVersion::StatsDashboard => {
                vec![RECIPE, REVIEW, SEARCH_HISTORY, SESSION, STATS_DASHBOARD]
            }
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "activity-log" | "activity_log" | "default" => Ok(SchemaVersion::ActivityLog),
            "stats-dashboard" | "stats_dashboard" | "dashboard" => {
                Ok(SchemaVersion::StatsDashboard)
            }
            other => Err(DiagramError::UnknownDiagram {
                name: format!("schema version {}", other),
            }),
        }
    }
}

/// One cardinality-labelled connection between an entity and a relationship
pub(crate) type Connection<'a> = (&'a str, &'a str, &'a str);

/// The `is a` relationships from the base user entity to each subtype
pub(crate) const SUBTYPES: [(&str, &str); 3] = [
    ("rel_is_admin", ADMIN),
    ("rel_is_contributor", CONTRIBUTOR),
    ("rel_is_guest", GUEST),
];

pub(crate) fn er_graph(name: &str) -> GraphDescription {
    let attributes = GraphAttributes::new(name)
        .with_routing(RoutingMode::Polyline)
        .with_separation(1.0, 2.0);
    GraphDescription::new(attributes)
}

pub(crate) fn add_entities(g: &mut GraphDescription, ids: &[&str]) {
    for id in ids {
        g.add_kind_node(id, id, NodeKind::Entity);
    }
}

pub(crate) fn add_relationships(g: &mut GraphDescription, relationships: &[(&str, &str)]) {
    for (id, label) in relationships {
        g.add_kind_node(id, label, NodeKind::Relationship);
    }
}

pub(crate) fn add_connections(g: &mut GraphDescription, connections: &[Connection<'_>]) {
    for (from, to, cardinality) in connections {
        g.add_labeled_edge(from, to, cardinality);
    }
}

/// Build the user subtype hierarchy and its rank layout
///
/// Adds the `is a` relationships with their `1` / `0..1` cardinalities, pins
/// the base entity to the top rank, ranks the relationships and the subtypes
/// in one row each and threads an invisible chain through them so the
/// hierarchy reads top-down. Every subtype is anchored above `anchor`.
pub(crate) fn add_subtype_hierarchy(
    g: &mut GraphDescription,
    base: &str,
    subtypes: &[(&str, &str)],
    anchor: &str,
) {
    for (rel, subtype) in subtypes {
        g.add_kind_node(rel, "is a", NodeKind::Relationship);
        g.add_labeled_edge(base, rel, "1");
        g.add_labeled_edge(rel, subtype, "0..1");
    }

    let rels: Vec<&str> = subtypes.iter().map(|(rel, _)| *rel).collect();
    let types: Vec<&str> = subtypes.iter().map(|(_, subtype)| *subtype).collect();
    g.add_named_rank_group("rank_top", RankClass::Min, &[base]);
    g.add_named_rank_group("rank_is_a", RankClass::Same, &rels);
    g.add_named_rank_group("rank_subtypes", RankClass::Same, &types);

    let mut chain = vec![base];
    for (rel, subtype) in subtypes {
        chain.push(*rel);
        chain.push(*subtype);
    }
    g.add_invisible_chain(&chain);
    for subtype in &types {
        g.add_invisible_edge(subtype, anchor);
    }
    trace!(base, subtype_count = subtypes.len(), "Subtype hierarchy added");
}

/// Pin the schema's bottom-row entities to the maximum rank
pub(crate) fn add_bottom_rank(g: &mut GraphDescription, schema: SchemaVersion) {
    g.add_named_rank_group("rank_bottom", RankClass::Max, &schema.bottom_entities());
}

/// Attach one attribute ellipse per entry, IDs `<ENTITY>_attr_<n>` from 1
pub(crate) fn add_attributes(g: &mut GraphDescription, entity: &str, attributes: &[&str]) {
    for (index, attribute) in attributes.iter().enumerate() {
        let attr_id = format!("{}_attr_{}", entity, index + 1);
        g.add_kind_node(&attr_id, attribute, NodeKind::Attribute);
        g.add_simple_edge(entity, &attr_id);
    }
}
