//! Conceptual ER diagram: entities and relationships, no attributes

use tracing::{debug, span, Level};

use crate::core::{Diagram, DiagramResult, RenderableGraph};
use crate::plugins::domain::{
    ACTIVITY_LOG, ADMIN, CONTRIBUTOR, GUEST, RECIPE, REVIEW, SEARCH_HISTORY, SESSION, USER, VIEW,
};

use super::{
    add_bottom_rank, add_connections, add_entities, add_relationships, add_subtype_hierarchy,
    er_graph, Connection, SchemaVersion, SUBTYPES,
};

const RELATIONSHIPS: &[(&str, &str)] = &[
    ("rel_creates", "creates"),
    ("rel_moderates", "moderates"),
    ("rel_manages", "manages"),
    ("rel_views_stats", "views stats"),
    ("rel_favorites", "favorites"),
    ("rel_likes", "likes"),
    ("rel_receives", "receives"),
    ("rel_writes", "writes"),
    ("rel_searches", "searches"),
    ("rel_starts", "starts"),
    ("rel_tracks_users", "tracks users"),
    ("rel_tracks_recipes", "tracks recipes"),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct ConceptualEr {
    schema: SchemaVersion,
}

impl ConceptualEr {
    pub fn new(schema: SchemaVersion) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    fn entities(&self) -> Vec<&'static str> {
        let mut entities = vec![
            USER,
            ADMIN,
            CONTRIBUTOR,
            GUEST,
            RECIPE,
            REVIEW,
            SEARCH_HISTORY,
        ];
        match self.schema {
            SchemaVersion::ActivityLog => entities.extend([ACTIVITY_LOG, SESSION]),
            SchemaVersion::StatsDashboard => entities.extend([SESSION, VIEW]),
        }
        entities.push(self.schema.stats_entity());
        entities
    }

    fn connections(&self) -> Vec<Connection<'static>> {
        let stats = self.schema.stats_entity();
        let mut connections = vec![
            (CONTRIBUTOR, "rel_creates", "1"),
            ("rel_creates", RECIPE, "N"),
            (ADMIN, "rel_moderates", "1"),
            ("rel_moderates", RECIPE, "N"),
            (ADMIN, "rel_manages", "1"),
            ("rel_manages", USER, "N"),
            (ADMIN, "rel_views_stats", "1"),
            ("rel_views_stats", stats, "M"),
            (CONTRIBUTOR, "rel_favorites", "M"),
            ("rel_favorites", RECIPE, "M"),
            (CONTRIBUTOR, "rel_likes", "M"),
            ("rel_likes", RECIPE, "M"),
        ];
        match self.schema {
            // Each viewer role gets its own view path to the recipe
            SchemaVersion::ActivityLog => connections.extend([
                (CONTRIBUTOR, "rel_views", "M"),
                ("rel_views", RECIPE, "M"),
                (GUEST, "rel_views", "M"),
                ("rel_views", RECIPE, "M"),
            ]),
            SchemaVersion::StatsDashboard => connections.extend([
                (CONTRIBUTOR, "rel_user_views", "1"),
                (GUEST, "rel_user_views", "1"),
                ("rel_user_views", VIEW, "N"),
                (VIEW, "rel_view_recipe", "N"),
                ("rel_view_recipe", RECIPE, "1"),
            ]),
        }
        connections.extend([
            (RECIPE, "rel_receives", "1"),
            ("rel_receives", REVIEW, "N"),
            (CONTRIBUTOR, "rel_writes", "1"),
            ("rel_writes", REVIEW, "N"),
            (CONTRIBUTOR, "rel_searches", "1"),
            ("rel_searches", SEARCH_HISTORY, "N"),
            (GUEST, "rel_searches", "1"),
            ("rel_searches", SEARCH_HISTORY, "N"),
            (CONTRIBUTOR, "rel_starts", "1"),
            ("rel_starts", SESSION, "N"),
            (GUEST, "rel_starts", "1"),
            ("rel_starts", SESSION, "N"),
            (stats, "rel_tracks_users", "1"),
            ("rel_tracks_users", CONTRIBUTOR, "M"),
            ("rel_tracks_users", GUEST, "M"),
            (stats, "rel_tracks_recipes", "1"),
            ("rel_tracks_recipes", RECIPE, "M"),
        ]);
        connections
    }
}

impl Diagram for ConceptualEr {
    fn name(&self) -> &'static str {
        match self.schema {
            SchemaVersion::ActivityLog => "er-conceptual",
            SchemaVersion::StatsDashboard => "er-conceptual-dashboard",
        }
    }

    fn file_stem(&self) -> String {
        format!("er_recipe_conceptual{}", self.schema.suffix())
    }

    fn description(&self) -> &'static str {
        match self.schema {
            SchemaVersion::ActivityLog => "Conceptual ER diagram (activity log schema)",
            SchemaVersion::StatsDashboard => "Conceptual ER diagram (stats dashboard schema)",
        }
    }

    fn build(&self) -> DiagramResult<RenderableGraph> {
        let build_span = span!(Level::INFO, "build_er_conceptual", schema = %self.schema);
        let _enter = build_span.enter();

        let mut g = er_graph("ERDRecipeConceptual");
        g.set_file_stem(self.file_stem());
        add_entities(&mut g, &self.entities());
        add_relationships(&mut g, RELATIONSHIPS);
        match self.schema {
            SchemaVersion::ActivityLog => {
                add_relationships(&mut g, &[("rel_views", "views")]);
            }
            SchemaVersion::StatsDashboard => add_relationships(
                &mut g,
                &[
                    ("rel_user_views", "views"),
                    ("rel_view_recipe", "viewed recipe"),
                ],
            ),
        }

        add_subtype_hierarchy(&mut g, USER, &SUBTYPES, RECIPE);
        add_connections(&mut g, &self.connections());
        add_bottom_rank(&mut g, self.schema);

        debug!(schema = %self.schema, "Conceptual model assembled");
        g.finalize()
    }
}
