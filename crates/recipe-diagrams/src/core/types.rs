//! Core type definitions for graph descriptions
//!
//! This module contains the fundamental types shared by every diagram:
//! node kinds and shapes, edge styles, rank constraints, routing modes and
//! the global layout attributes handed to Graphviz.

use std::collections::BTreeMap;
use std::fmt;

/// Semantic role of a node within a diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// External actor (data-flow diagrams)
    Actor,
    /// Transforming process (data-flow diagrams)
    Process,
    /// Data store (data-flow diagrams)
    Store,
    /// Entity (ER diagrams)
    Entity,
    /// Chen-notation relationship (ER diagrams)
    Relationship,
    /// Entity attribute (logical ER diagram)
    Attribute,
    /// Plain processing step (flowchart)
    Step,
    /// Decision point (flowchart)
    Decision,
    /// Start or end point (flowchart)
    Terminal,
}

impl NodeKind {
    /// Shape used when the caller does not ask for a specific one
    pub fn default_shape(&self) -> NodeShape {
        match self {
            NodeKind::Actor => NodeShape::Rectangle,
            NodeKind::Process => NodeShape::Circle,
            NodeKind::Store => NodeShape::Cylinder,
            NodeKind::Entity | NodeKind::Step => NodeShape::Box,
            NodeKind::Relationship | NodeKind::Decision => NodeShape::Diamond,
            NodeKind::Attribute => NodeShape::Ellipse,
            NodeKind::Terminal => NodeShape::Oval,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Actor => write!(f, "actor"),
            NodeKind::Process => write!(f, "process"),
            NodeKind::Store => write!(f, "store"),
            NodeKind::Entity => write!(f, "entity"),
            NodeKind::Relationship => write!(f, "relationship"),
            NodeKind::Attribute => write!(f, "attribute"),
            NodeKind::Step => write!(f, "step"),
            NodeKind::Decision => write!(f, "decision"),
            NodeKind::Terminal => write!(f, "terminal"),
        }
    }
}

/// Graphviz node shapes used by the diagrams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum NodeShape {
    #[default]
    Box,
    Rectangle,
    Circle,
    Cylinder,
    Diamond,
    Ellipse,
    Oval,
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeShape::Box => write!(f, "box"),
            NodeShape::Rectangle => write!(f, "rectangle"),
            NodeShape::Circle => write!(f, "circle"),
            NodeShape::Cylinder => write!(f, "cylinder"),
            NodeShape::Diamond => write!(f, "diamond"),
            NodeShape::Ellipse => write!(f, "ellipse"),
            NodeShape::Oval => write!(f, "oval"),
        }
    }
}

/// Visual style of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EdgeStyle {
    /// Drawn edge
    #[default]
    Normal,
    /// Layout-only edge that is never drawn (`style=invis`)
    Invisible,
}

impl EdgeStyle {
    pub fn is_invisible(&self) -> bool {
        matches!(self, EdgeStyle::Invisible)
    }
}

impl fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeStyle::Normal => write!(f, "solid"),
            EdgeStyle::Invisible => write!(f, "invis"),
        }
    }
}

/// Rank constraint applied to the members of a rank group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankClass {
    /// All members on the minimum rank
    Min,
    /// All members on the maximum rank
    Max,
    /// All members on the same rank as each other
    Same,
    /// Maximum rank, exclusively
    Sink,
}

impl fmt::Display for RankClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankClass::Min => write!(f, "min"),
            RankClass::Max => write!(f, "max"),
            RankClass::Same => write!(f, "same"),
            RankClass::Sink => write!(f, "sink"),
        }
    }
}

/// Edge routing mode (Graphviz `splines`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum RoutingMode {
    #[default]
    Curved,
    /// Axis-aligned segments; inline labels detach from their edges
    Orthogonal,
    Polyline,
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingMode::Curved => write!(f, "curved"),
            RoutingMode::Orthogonal => write!(f, "ortho"),
            RoutingMode::Polyline => write!(f, "polyline"),
        }
    }
}

/// A node in the graph with all its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Unique identifier within one graph
    pub id: String,
    /// Display label (may differ from id)
    pub label: String,
    pub kind: NodeKind,
    pub shape: NodeShape,
    /// Extra Graphviz node attributes, e.g. `width` or `fontsize`
    pub attributes: BTreeMap<String, String>,
}

impl NodeData {
    /// Create a node using the kind's default shape
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self::with_shape(id, label, kind, kind.default_shape())
    }

    /// Create a node with an explicit shape
    pub fn with_shape(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: NodeKind,
        shape: NodeShape,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            shape,
            attributes: BTreeMap::new(),
        }
    }

    /// Attach an extra Graphviz attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A directed edge with optional label requests
///
/// `label` is the primary request, resolved by the label-placement adapter
/// according to the routing mode. `xlabel` is an explicit request for an
/// offset label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeData {
    /// Source node ID
    pub from: String,
    /// Target node ID
    pub to: String,
    pub label: Option<String>,
    pub xlabel: Option<String>,
    pub style: EdgeStyle,
}

impl EdgeData {
    /// Create an unlabeled, visible edge
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
            xlabel: None,
            style: EdgeStyle::Normal,
        }
    }

    /// Create an edge with a primary label
    pub fn with_label(
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(from, to)
        }
    }

    /// Create an invisible layout-only edge
    pub fn invisible(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            style: EdgeStyle::Invisible,
            ..Self::new(from, to)
        }
    }

    /// Add an explicit offset label request
    pub fn with_xlabel(mut self, xlabel: impl Into<String>) -> Self {
        self.xlabel = Some(xlabel.into());
        self
    }
}

/// Nodes pinned together (or to an extreme) on the rank axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroup {
    /// Optional subgraph name, e.g. `rank_subtypes`
    pub name: Option<String>,
    pub rank_class: RankClass,
    pub member_ids: Vec<String>,
}

impl RankGroup {
    pub fn new(rank_class: RankClass, member_ids: Vec<String>) -> Self {
        Self {
            name: None,
            rank_class,
            member_ids,
        }
    }

    pub fn named(name: impl Into<String>, rank_class: RankClass, member_ids: Vec<String>) -> Self {
        Self {
            name: Some(name.into()),
            rank_class,
            member_ids,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.member_ids.iter().any(|m| m == id)
    }
}

/// A boxed section of the diagram laid out on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub id: String,
    pub label: String,
    /// Border color
    pub color: Option<String>,
    /// Node IDs drawn inside the cluster, in declaration order
    pub member_ids: Vec<String>,
}

impl Cluster {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: None,
            member_ids: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.member_ids.extend(members.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.member_ids.iter().any(|m| m == id)
    }
}

/// Graph-wide layout attributes
#[derive(Debug, Clone, PartialEq)]
pub struct GraphAttributes {
    /// Graph name (`digraph <name>`)
    pub name: String,
    /// Title drawn at the top of the diagram
    pub title: Option<String>,
    /// File name (without extension) of rendered artifacts; the graph name when unset
    pub file_stem: Option<String>,
    pub routing: RoutingMode,
    /// Minimum space between nodes on one rank, in inches
    pub node_sep: f32,
    /// Minimum space between ranks, in inches
    pub rank_sep: f32,
    pub font_family: String,
    /// Node shape applied when a node does not set one
    pub default_node_shape: Option<NodeShape>,
}

impl GraphAttributes {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_routing(mut self, routing: RoutingMode) -> Self {
        self.routing = routing;
        self
    }

    pub fn with_separation(mut self, node_sep: f32, rank_sep: f32) -> Self {
        self.node_sep = node_sep;
        self.rank_sep = rank_sep;
        self
    }

    pub fn with_file_stem(mut self, file_stem: impl Into<String>) -> Self {
        self.file_stem = Some(file_stem.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_default_node_shape(mut self, shape: NodeShape) -> Self {
        self.default_node_shape = Some(shape);
        self
    }
}

impl Default for GraphAttributes {
    fn default() -> Self {
        Self {
            name: "G".to_string(),
            title: None,
            file_stem: None,
            routing: RoutingMode::Curved,
            node_sep: 1.0,
            rank_sep: 2.0,
            font_family: "Arial".to_string(),
            default_node_shape: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shapes() {
        assert_eq!(NodeKind::Actor.default_shape(), NodeShape::Rectangle);
        assert_eq!(NodeKind::Process.default_shape(), NodeShape::Circle);
        assert_eq!(NodeKind::Store.default_shape(), NodeShape::Cylinder);
        assert_eq!(NodeKind::Entity.default_shape(), NodeShape::Box);
        assert_eq!(NodeKind::Relationship.default_shape(), NodeShape::Diamond);
        assert_eq!(NodeKind::Attribute.default_shape(), NodeShape::Ellipse);
        assert_eq!(NodeKind::Decision.default_shape(), NodeShape::Diamond);
        assert_eq!(NodeKind::Terminal.default_shape(), NodeShape::Oval);
    }

    #[test]
    fn test_graphviz_keywords() {
        assert_eq!(RoutingMode::Orthogonal.to_string(), "ortho");
        assert_eq!(RoutingMode::Polyline.to_string(), "polyline");
        assert_eq!(RoutingMode::Curved.to_string(), "curved");
        assert_eq!(RankClass::Sink.to_string(), "sink");
        assert_eq!(RankClass::Same.to_string(), "same");
        assert_eq!(EdgeStyle::Invisible.to_string(), "invis");
        assert_eq!(NodeShape::Cylinder.to_string(), "cylinder");
    }

    #[test]
    fn test_edge_data_constructors() {
        let edge = EdgeData::new("A", "B");
        assert_eq!(edge.from, "A");
        assert_eq!(edge.to, "B");
        assert!(edge.label.is_none());
        assert_eq!(edge.style, EdgeStyle::Normal);

        let labeled = EdgeData::with_label("A", "B", "Yes");
        assert_eq!(labeled.label.as_deref(), Some("Yes"));

        let hidden = EdgeData::invisible("A", "B");
        assert!(hidden.style.is_invisible());

        let both = EdgeData::with_label("A", "B", "x").with_xlabel("y");
        assert_eq!(both.xlabel.as_deref(), Some("y"));
    }

    #[test]
    fn test_node_data_attributes() {
        let node = NodeData::new("Q", "Action?", NodeKind::Decision)
            .with_attr("width", "2")
            .with_attr("fontsize", "14");
        assert_eq!(node.shape, NodeShape::Diamond);
        assert_eq!(node.attributes.get("width").map(String::as_str), Some("2"));
        assert_eq!(node.attributes.len(), 2);
    }

    #[test]
    fn test_cluster_members() {
        let cluster = Cluster::new("guest", "Guest mode")
            .with_color("gray50")
            .with_members(["A", "B"]);
        assert!(cluster.contains("A"));
        assert!(!cluster.contains("C"));
        assert_eq!(cluster.color.as_deref(), Some("gray50"));
    }

    #[test]
    fn test_graph_attribute_defaults() {
        let attrs = GraphAttributes::new("Demo");
        assert_eq!(attrs.name, "Demo");
        assert_eq!(attrs.routing, RoutingMode::Curved);
        assert_eq!(attrs.font_family, "Arial");
        assert!(attrs.file_stem.is_none());

        let named = attrs.with_file_stem("er_recipe_logical");
        assert_eq!(named.file_stem.as_deref(), Some("er_recipe_logical"));
    }
}
