//! Shared vocabulary of the recipe-sharing domain
//!
//! Every view that shows the same real-world concept uses the node ID
//! defined here, so independently assembled diagrams can be read side by
//! side. Data stores in the data-flow diagrams reuse the ER entity IDs.

// Actors
pub const USER_ACTOR: &str = "User";
pub const ADMIN_ACTOR: &str = "Admin";
pub const CONTRIBUTOR_ACTOR: &str = "Contributor";
pub const GUEST_ACTOR: &str = "Guest";

// Entities
pub const USER: &str = "USER";
pub const ADMIN: &str = "ADMIN";
pub const CONTRIBUTOR: &str = "CONTRIBUTOR";
pub const GUEST: &str = "GUEST";
pub const RECIPE: &str = "RECIPE";
pub const REVIEW: &str = "REVIEW";
pub const SEARCH_HISTORY: &str = "SEARCH_HISTORY";
pub const ACTIVITY_LOG: &str = "ACTIVITY_LOG";
pub const SESSION: &str = "SESSION";
pub const DAILY_STAT: &str = "DAILY_STAT";
pub const DAILY_ACTIVE_USER: &str = "DAILY_ACTIVE_USER";
pub const DAILY_NEW_USER: &str = "DAILY_NEW_USER";
pub const DAILY_VIEW: &str = "DAILY_VIEW";
pub const LIKE: &str = "LIKE";
pub const FAVORITE: &str = "FAVORITE";
pub const VIEW: &str = "VIEW";
pub const STATS_DASHBOARD: &str = "STATS_DASHBOARD";

/// A persistent store shown in the data-flow diagrams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataStore {
    /// Entity ID shared with the ER diagrams
    pub id: &'static str,
    pub label: &'static str,
}

pub const USERS_DB: DataStore = DataStore {
    id: USER,
    label: "Users DB",
};
pub const RECIPES_DB: DataStore = DataStore {
    id: RECIPE,
    label: "Recipes DB",
};
pub const REVIEWS_DB: DataStore = DataStore {
    id: REVIEW,
    label: "Reviews DB",
};
pub const SEARCH_HISTORY_DB: DataStore = DataStore {
    id: SEARCH_HISTORY,
    label: "Search History",
};
pub const DAILY_STATS_DB: DataStore = DataStore {
    id: DAILY_STAT,
    label: "Daily Stats",
};
pub const ACTIVITY_LOG_DB: DataStore = DataStore {
    id: ACTIVITY_LOG,
    label: "Activity Log",
};
pub const SESSION_STORE: DataStore = DataStore {
    id: SESSION,
    label: "Session Store",
};

/// Stores in the order every data-flow diagram declares them
pub const DATA_STORES: [DataStore; 7] = [
    USERS_DB,
    RECIPES_DB,
    REVIEWS_DB,
    SEARCH_HISTORY_DB,
    DAILY_STATS_DB,
    ACTIVITY_LOG_DB,
    SESSION_STORE,
];

/// The role actors, ranked together as peers
pub const ROLE_ACTORS: [(&str, &str); 3] = [
    (ADMIN_ACTOR, "Admin"),
    (CONTRIBUTOR_ACTOR, "Contributor"),
    (GUEST_ACTOR, "Guest (Pending/Suspended)"),
];
