//! Recipe Diagrams - design diagrams of a recipe-sharing application
//!
//! Builds data-flow diagrams (context, level 1, level 2), conceptual and
//! logical ER diagrams and the application flowchart as declarative graph
//! descriptions, serializes them to DOT and renders them with Graphviz.
//!
//! # Quick Start
//!
//! ```rust
//! use recipe_diagrams::{dot_source, DiagramKind};
//!
//! let dot = dot_source(DiagramKind::DfdContext).unwrap();
//! assert!(dot.starts_with("digraph \"DataFlow_Context\""));
//! assert!(dot.contains("xlabel="));
//! ```
//!
//! # Advanced Usage
//!
//! Assemble a graph by hand; edge labels are placed for the routing mode
//! chosen up front:
//!
//! ```rust
//! use recipe_diagrams::prelude::*;
//!
//! let attributes = GraphAttributes::new("Example").with_routing(RoutingMode::Orthogonal);
//! let mut graph = GraphDescription::new(attributes);
//! graph.add_kind_node("A", "Start", NodeKind::Step);
//! graph.add_kind_node("B", "Finish", NodeKind::Step);
//! graph.add_labeled_edge("A", "B", "next");
//!
//! let graph = graph.finalize().unwrap();
//! let edge = graph.edges().next().unwrap();
//! assert_eq!(edge.label().unwrap().attribute, LabelAttribute::Offset);
//! ```

pub mod core;
pub mod plugins;

pub use core::*;
pub use plugins::orchestrator::{build, render, render_all, DiagramKind};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, Diagram, DiagramError, DiagramResult, EdgeStyle, GraphAttributes,
        GraphDescription, GraphView, LabelAttribute, NodeKind, NodeShape, OutputFormat, RankClass,
        RenderConfig, RenderableGraph, Renderer, RoutingMode,
    };
    pub use crate::plugins::er::SchemaVersion;
    pub use crate::plugins::orchestrator::DiagramKind;
}

/// Build one diagram and return its DOT source
///
/// # Example
/// ```rust
/// use recipe_diagrams::{dot_source, DiagramKind};
///
/// let dot = dot_source(DiagramKind::ErLogical).unwrap();
/// assert!(dot.contains("\"RECIPE_attr_ingredients\""));
/// ```
pub fn dot_source(kind: DiagramKind) -> DiagramResult<String> {
    let graph = build(kind)?;
    Ok(core::dot::to_dot(&graph))
}

/// Render every diagram with the default configuration
///
/// Writes PNG files to `out/` using the `dot` binary (or the one named by
/// `RECIPE_DIAGRAMS_DOT`). Fails on the first diagram that could not be
/// rendered; use [`render_all`] to collect every outcome instead.
pub fn render_default() -> DiagramResult<Vec<std::path::PathBuf>> {
    render_all(&RenderConfig::default())
        .into_iter()
        .map(|(_, result)| result)
        .collect()
}
