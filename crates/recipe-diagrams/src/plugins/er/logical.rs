//! Logical ER diagram
//!
//! The conceptual model with many-to-many relationships resolved into
//! junction entities (`LIKE`, `FAVORITE`, `VIEW` and the daily statistics
//! tables) and every stored column drawn as an attribute ellipse.

use tracing::{debug, span, Level};

use crate::core::{Diagram, DiagramResult, GraphDescription, NodeKind, RenderableGraph};
use crate::plugins::domain::{
    ACTIVITY_LOG, ADMIN, CONTRIBUTOR, DAILY_ACTIVE_USER, DAILY_NEW_USER, DAILY_STAT, DAILY_VIEW,
    FAVORITE, GUEST, LIKE, RECIPE, REVIEW, SEARCH_HISTORY, SESSION, STATS_DASHBOARD, USER, VIEW,
};

use super::{
    add_attributes, add_bottom_rank, add_connections, add_entities, add_relationships,
    add_subtype_hierarchy, er_graph, Connection, SchemaVersion, SUBTYPES,
};

/// Multivalued ingredient attribute and its components
pub const INGREDIENTS_ATTR: &str = "RECIPE_attr_ingredients";
const INGREDIENT_PARTS: [(&str, &str); 3] = [
    ("RECIPE_attr_ingredient_name", "name"),
    ("RECIPE_attr_ingredient_quantity", "quantity"),
    ("RECIPE_attr_ingredient_unit", "unit"),
];

const RELATIONSHIPS: &[(&str, &str)] = &[
    ("rel_creates", "creates"),
    ("rel_moderates", "moderates"),
    ("rel_manages", "manages"),
    ("rel_views_stats", "views stats"),
    ("rel_user_favorites", "favorites"),
    ("rel_favorite_recipe", "favorited recipe"),
    ("rel_user_likes", "likes"),
    ("rel_like_recipe", "liked recipe"),
    ("rel_user_views", "views"),
    ("rel_view_recipe", "viewed recipe"),
    ("rel_receives", "receives"),
    ("rel_writes", "writes"),
    ("rel_searches", "searches"),
    ("rel_starts", "starts"),
    ("rel_tracks_users", "tracks users"),
    ("rel_tracks_recipes", "tracks recipes"),
];

const DAILY_RELATIONSHIPS: &[(&str, &str)] = &[
    ("rel_daily_active", "daily active"),
    ("rel_daily_new", "daily new"),
    ("rel_daily_views", "daily views"),
    ("rel_active_user", "active user"),
    ("rel_new_user", "new user"),
    ("rel_daily_view_recipe", "daily view recipe"),
];

const DAILY_CONNECTIONS: &[Connection<'static>] = &[
    (DAILY_STAT, "rel_daily_active", "1"),
    ("rel_daily_active", DAILY_ACTIVE_USER, "N"),
    (DAILY_STAT, "rel_daily_new", "1"),
    ("rel_daily_new", DAILY_NEW_USER, "N"),
    (DAILY_STAT, "rel_daily_views", "1"),
    ("rel_daily_views", DAILY_VIEW, "N"),
    (USER, "rel_active_user", "1"),
    ("rel_active_user", DAILY_ACTIVE_USER, "N"),
    (USER, "rel_new_user", "1"),
    ("rel_new_user", DAILY_NEW_USER, "N"),
];

// Stored columns per entity. USER keeps its columns on the subtypes.
const ATTRIBUTES: &[(&str, &[&str])] = &[
    (USER, &[]),
    (ADMIN, &["user_id (PK, FK)", "role (admin)"]),
    (
        CONTRIBUTOR,
        &["user_id (PK, FK)", "role (user)", "status (active)"],
    ),
    (GUEST, &["user_id (PK, FK)", "status (pending/suspended)"]),
    (
        RECIPE,
        &[
            "recipe_id (PK)",
            "author_id (FK)",
            "status",
            "title",
            "description",
            "category",
            "prep_time",
            "cook_time",
            "servings",
            "difficulty",
            "instructions",
            "images",
            "liked_by",
            "viewed_by",
            "created_at",
        ],
    ),
    (
        REVIEW,
        &[
            "review_id (PK)",
            "recipe_id (FK)",
            "user_id (FK)",
            "username",
            "avatar",
            "rating",
            "comment",
            "unique (user_id, recipe_id)",
            "created_at",
        ],
    ),
    (
        SEARCH_HISTORY,
        &["search_id (PK)", "user_id (FK)", "query", "created_at"],
    ),
    (
        SESSION,
        &["session_id (PK)", "user_id (FK)", "started_at", "last_seen"],
    ),
    (
        LIKE,
        &["like_id (PK)", "user_id (FK)", "recipe_id (FK)", "created_at"],
    ),
    (
        FAVORITE,
        &["favorite_id (PK)", "user_id (FK)", "recipe_id (FK)", "created_at"],
    ),
    (
        VIEW,
        &[
            "view_id (PK)",
            "viewer_key",
            "viewer_type",
            "recipe_id (FK)",
            "viewed_at",
        ],
    ),
];

const ACTIVITY_LOG_ATTRIBUTES: &[(&str, &[&str])] = &[
    (
        ACTIVITY_LOG,
        &["activity_id (PK)", "time", "type", "text"],
    ),
    (DAILY_STAT, &["date_key (PK)"]),
    (
        DAILY_ACTIVE_USER,
        &["active_id (PK)", "date_key (FK)", "user_id (FK)"],
    ),
    (
        DAILY_NEW_USER,
        &["new_id (PK)", "date_key (FK)", "user_id (FK)"],
    ),
    (
        DAILY_VIEW,
        &[
            "daily_view_id (PK)",
            "date_key (FK)",
            "viewer_key",
            "viewer_type",
            "recipe_id (FK)",
            "viewed_at",
        ],
    ),
];

const DASHBOARD_ATTRIBUTES: &[(&str, &[&str])] = &[(
    STATS_DASHBOARD,
    &[
        "date_key (PK)",
        "total_users",
        "new_users_today",
        "contributors",
        "new_contributors_today",
        "published_recipes",
        "pending_recipes",
        "daily_views",
        "daily_active_users",
    ],
)];

#[derive(Debug, Default, Clone, Copy)]
pub struct LogicalEr {
    schema: SchemaVersion,
}

impl LogicalEr {
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
            SchemaVersion::ActivityLog => entities.extend([
                ACTIVITY_LOG,
                SESSION,
                DAILY_STAT,
                DAILY_ACTIVE_USER,
                DAILY_NEW_USER,
                DAILY_VIEW,
            ]),
            SchemaVersion::StatsDashboard => entities.extend([SESSION, STATS_DASHBOARD]),
        }
        entities.extend([LIKE, FAVORITE, VIEW]);
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
            (CONTRIBUTOR, "rel_user_favorites", "1"),
            ("rel_user_favorites", FAVORITE, "N"),
            (FAVORITE, "rel_favorite_recipe", "N"),
            ("rel_favorite_recipe", RECIPE, "1"),
            (CONTRIBUTOR, "rel_user_likes", "1"),
            ("rel_user_likes", LIKE, "N"),
            (LIKE, "rel_like_recipe", "N"),
            ("rel_like_recipe", RECIPE, "1"),
            (CONTRIBUTOR, "rel_user_views", "1"),
            ("rel_user_views", VIEW, "N"),
            (GUEST, "rel_user_views", "1"),
            (VIEW, "rel_view_recipe", "N"),
            ("rel_view_recipe", RECIPE, "1"),
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
        ];
        if self.schema == SchemaVersion::ActivityLog {
            connections.extend_from_slice(DAILY_CONNECTIONS);
        }
        connections.extend([
            (stats, "rel_tracks_users", "1"),
            ("rel_tracks_users", USER, "M"),
            (stats, "rel_tracks_recipes", "1"),
            ("rel_tracks_recipes", RECIPE, "M"),
        ]);
        if self.schema == SchemaVersion::ActivityLog {
            connections.extend([
                (DAILY_VIEW, "rel_daily_view_recipe", "N"),
                ("rel_daily_view_recipe", RECIPE, "1"),
            ]);
        }
        connections
    }

    fn attribute_table(&self) -> impl Iterator<Item = &'static (&'static str, &'static [&'static str])> {
        let schema_specific = match self.schema {
            SchemaVersion::ActivityLog => ACTIVITY_LOG_ATTRIBUTES,
            SchemaVersion::StatsDashboard => DASHBOARD_ATTRIBUTES,
        };
        ATTRIBUTES.iter().chain(schema_specific.iter())
    }
}

/// Draw the multivalued ingredient attribute with its three components
fn add_ingredients(g: &mut GraphDescription) {
    g.add_kind_node(INGREDIENTS_ATTR, "ingredient (multi)", NodeKind::Attribute);
    g.add_simple_edge(RECIPE, INGREDIENTS_ATTR);
    for (id, label) in INGREDIENT_PARTS {
        g.add_kind_node(id, label, NodeKind::Attribute);
        g.add_simple_edge(INGREDIENTS_ATTR, id);
    }
}

impl Diagram for LogicalEr {
    fn name(&self) -> &'static str {
        match self.schema {
            SchemaVersion::ActivityLog => "er-logical",
            SchemaVersion::StatsDashboard => "er-logical-dashboard",
        }
    }

    fn file_stem(&self) -> String {
        format!("er_recipe_logical{}", self.schema.suffix())
    }

    fn description(&self) -> &'static str {
        match self.schema {
            SchemaVersion::ActivityLog => "Logical ER diagram with attributes (activity log schema)",
            SchemaVersion::StatsDashboard => {
                "Logical ER diagram with attributes (stats dashboard schema)"
            }
        }
    }

    fn build(&self) -> DiagramResult<RenderableGraph> {
        let build_span = span!(Level::INFO, "build_er_logical", schema = %self.schema);
        let _enter = build_span.enter();

        let mut g = er_graph("ERDRecipeLogical");
        g.set_file_stem(self.file_stem());
        add_entities(&mut g, &self.entities());
        add_relationships(&mut g, RELATIONSHIPS);
        if self.schema == SchemaVersion::ActivityLog {
            add_relationships(&mut g, DAILY_RELATIONSHIPS);
        }

        add_subtype_hierarchy(&mut g, USER, &SUBTYPES, RECIPE);
        add_bottom_rank(&mut g, self.schema);
        add_connections(&mut g, &self.connections());

        let mut attribute_count = 0;
        for (entity, attributes) in self.attribute_table() {
            add_attributes(&mut g, entity, attributes);
            attribute_count += attributes.len();
        }
        add_ingredients(&mut g);

        debug!(schema = %self.schema, attribute_count, "Logical model assembled");
        g.finalize()
    }
}
