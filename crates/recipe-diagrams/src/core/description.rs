//! Graph description model
//!
//! [`GraphDescription`] is the mutable builder every diagram assembler writes
//! into. [`GraphDescription::finalize`] consumes it and yields an immutable
//! [`RenderableGraph`] ready for a [`Renderer`](super::Renderer).
//!
//! Edges may reference nodes that were never declared. Graphviz creates
//! such nodes implicitly, and several diagrams rely on that, so the model
//! does not reject them.

use std::collections::HashMap;

use tracing::{debug, info, span, trace, warn, Level};

use super::label::{place, LabelPlacementDirective, LabelRequest};
use super::{
    Cluster, Database, DiagramError, DiagramResult, EdgeData, EdgeStyle, GraphAttributes,
    GraphView, NodeData, NodeKind, NodeShape, RankClass, RankGroup, RoutingMode,
};

/// An edge whose label requests have been resolved by the placement adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedEdge {
    pub from: String,
    pub to: String,
    pub style: EdgeStyle,
    /// Resolved label directives; a valid edge carries at most one
    pub labels: Vec<LabelPlacementDirective>,
}

impl PlacedEdge {
    /// The label directive of this edge, if any
    pub fn label(&self) -> Option<&LabelPlacementDirective> {
        self.labels.first()
    }

    /// The label text of this edge, if any
    pub fn label_text(&self) -> Option<&str> {
        self.label().map(|l| l.value.as_str())
    }

    pub fn is_invisible(&self) -> bool {
        self.style.is_invisible()
    }
}

/// Node, edge and constraint storage shared by builder and snapshot
#[derive(Debug, Clone, Default)]
struct GraphContents {
    /// Nodes indexed by ID
    nodes: HashMap<String, NodeData>,
    /// Node IDs in first-declaration order
    node_order: Vec<String>,
    /// Edges in insertion order
    edges: Vec<PlacedEdge>,
    rank_groups: Vec<RankGroup>,
    clusters: Vec<Cluster>,
}

/// Mutable graph description owned by one diagram assembler
#[derive(Debug, Clone)]
pub struct GraphDescription {
    attributes: GraphAttributes,
    contents: GraphContents,
    /// Problems found during insertion, reported by `finalize`
    problems: Vec<String>,
}

impl GraphDescription {
    /// Create an empty description with the given layout attributes
    ///
    /// The routing mode is fixed here so every edge label is placed under
    /// the same policy.
    pub fn new(attributes: GraphAttributes) -> Self {
        trace!(graph = %attributes.name, routing = %attributes.routing, "Creating graph description");
        Self {
            attributes,
            contents: GraphContents::default(),
            problems: Vec::new(),
        }
    }

    /// Routing mode all edge labels are placed for
    pub fn routing(&self) -> RoutingMode {
        self.attributes.routing
    }

    /// Set the title drawn at the top of the diagram
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.attributes.title = Some(title.into());
    }

    /// Set the file name (without extension) rendered artifacts are written to
    pub fn set_file_stem(&mut self, file_stem: impl Into<String>) {
        self.attributes.file_stem = Some(file_stem.into());
    }

    /// Declare a node; re-declaring an ID overwrites its label, kind and shape
    pub fn add_node(&mut self, id: &str, label: &str, kind: NodeKind, shape: NodeShape) {
        self.insert_node(NodeData::with_shape(id, label, kind, shape));
    }

    /// Declare a node with its kind's default shape
    pub fn add_kind_node(&mut self, id: &str, label: &str, kind: NodeKind) {
        self.insert_node(NodeData::new(id, label, kind));
    }

    /// Add an edge with an optional primary label
    pub fn add_edge(&mut self, from: &str, to: &str, label: Option<&str>, style: EdgeStyle) {
        let mut edge = EdgeData::new(from, to);
        edge.label = label.map(str::to_string);
        edge.style = style;
        self.insert_edge(edge);
    }

    /// Add an unlabeled, visible edge
    pub fn add_simple_edge(&mut self, from: &str, to: &str) {
        self.insert_edge(EdgeData::new(from, to));
    }

    /// Add a visible edge with a primary label
    pub fn add_labeled_edge(&mut self, from: &str, to: &str, label: &str) {
        self.insert_edge(EdgeData::with_label(from, to, label));
    }

    /// Add an edge with an explicitly offset label
    pub fn add_offset_labeled_edge(&mut self, from: &str, to: &str, xlabel: &str) {
        self.insert_edge(EdgeData::new(from, to).with_xlabel(xlabel));
    }

    /// Add a layout-only edge that is never drawn
    pub fn add_invisible_edge(&mut self, from: &str, to: &str) {
        self.insert_edge(EdgeData::invisible(from, to));
    }

    /// Add invisible edges between each consecutive pair of IDs
    pub fn add_invisible_chain(&mut self, ids: &[&str]) {
        for pair in ids.windows(2) {
            self.add_invisible_edge(pair[0], pair[1]);
        }
    }

    /// Add an unnamed rank group
    pub fn add_rank_group(&mut self, rank_class: RankClass, member_ids: &[&str]) {
        self.insert_rank_group(RankGroup::new(rank_class, to_owned_ids(member_ids)));
    }

    /// Add a rank group emitted as a named subgraph
    pub fn add_named_rank_group(&mut self, name: &str, rank_class: RankClass, member_ids: &[&str]) {
        self.insert_rank_group(RankGroup::named(name, rank_class, to_owned_ids(member_ids)));
    }

    /// Add a cluster drawing the given nodes
    pub fn add_cluster(&mut self, id: &str, label: &str, color: Option<&str>, member_ids: &[&str]) {
        let mut cluster = Cluster::new(id, label).with_members(member_ids.iter().copied());
        if let Some(color) = color {
            cluster = cluster.with_color(color);
        }
        self.insert_cluster(cluster);
    }

    /// Freeze the description into a renderable snapshot
    ///
    /// Fails only when an edge carries more than one label directive or a
    /// node was declared with an empty ID. Everything else, including
    /// undeclared endpoints and conflicting rank groups, is left for the
    /// renderer to judge.
    pub fn finalize(self) -> DiagramResult<RenderableGraph> {
        let finalize_span = span!(Level::DEBUG, "finalize", graph = %self.attributes.name);
        let _enter = finalize_span.enter();

        let mut problems = self.problems;
        for (index, edge) in self.contents.edges.iter().enumerate() {
            if edge.labels.len() > 1 {
                let placements: Vec<String> = edge
                    .labels
                    .iter()
                    .map(|l| format!("{}={:?}", l.attribute, l.value))
                    .collect();
                problems.push(format!(
                    "edge #{} {} -> {} requests conflicting label placements ({})",
                    index,
                    edge.from,
                    edge.to,
                    placements.join(", ")
                ));
            }
        }

        if !problems.is_empty() {
            warn!(problem_count = problems.len(), "Graph description rejected");
            return Err(DiagramError::invalid_graph(problems.join("; ")));
        }

        let graph = RenderableGraph {
            attributes: self.attributes,
            contents: self.contents,
        };
        let undeclared = graph.undeclared_endpoints();
        if !undeclared.is_empty() {
            debug!(count = undeclared.len(), ids = ?undeclared, "Edges reference undeclared nodes");
        }
        info!(
            graph = %graph.name(),
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            rank_group_count = graph.contents.rank_groups.len(),
            "Graph description finalized"
        );
        Ok(graph)
    }
}

impl GraphView for GraphDescription {
    fn attributes(&self) -> &GraphAttributes {
        &self.attributes
    }

    fn get_node(&self, id: &str) -> Option<&NodeData> {
        self.contents.nodes.get(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.contents.nodes()
    }

    fn edges(&self) -> impl Iterator<Item = &PlacedEdge> {
        self.contents.edges.iter()
    }

    fn rank_groups(&self) -> impl Iterator<Item = &RankGroup> {
        self.contents.rank_groups.iter()
    }

    fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.contents.clusters.iter()
    }

    fn node_count(&self) -> usize {
        self.contents.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.contents.edges.len()
    }
}

impl Database for GraphDescription {
    fn insert_node(&mut self, node: NodeData) {
        trace!(node_id = %node.id, node_label = %node.label, node_kind = %node.kind, "Adding node");
        if node.id.is_empty() {
            self.problems
                .push(format!("node labelled {:?} has an empty id", node.label));
            return;
        }
        if !self.contents.nodes.contains_key(&node.id) {
            self.contents.node_order.push(node.id.clone());
        }
        self.contents.nodes.insert(node.id.clone(), node);
    }

    fn insert_edge(&mut self, edge: EdgeData) {
        trace!(
            edge_from = %edge.from,
            edge_to = %edge.to,
            edge_label = ?edge.label,
            edge_xlabel = ?edge.xlabel,
            edge_style = %edge.style,
            "Adding edge"
        );
        if edge.from.is_empty() || edge.to.is_empty() {
            self.problems.push(format!(
                "edge {:?} -> {:?} has an empty endpoint",
                edge.from, edge.to
            ));
            return;
        }

        let routing = self.attributes.routing;
        let mut labels = Vec::new();
        if let Some(text) = edge.label.as_deref() {
            labels.push(place(routing, &LabelRequest::primary(text)));
        }
        if let Some(text) = edge.xlabel.as_deref() {
            labels.push(place(routing, &LabelRequest::secondary(text)));
        }

        self.contents.edges.push(PlacedEdge {
            from: edge.from,
            to: edge.to,
            style: edge.style,
            labels,
        });
    }

    fn insert_rank_group(&mut self, group: RankGroup) {
        trace!(rank = %group.rank_class, members = ?group.member_ids, "Adding rank group");
        self.contents.rank_groups.push(group);
    }

    fn insert_cluster(&mut self, cluster: Cluster) {
        trace!(cluster_id = %cluster.id, member_count = cluster.member_ids.len(), "Adding cluster");
        self.contents.clusters.push(cluster);
    }
}

/// Immutable, finalized graph description
#[derive(Debug, Clone)]
pub struct RenderableGraph {
    attributes: GraphAttributes,
    contents: GraphContents,
}

impl RenderableGraph {
    /// Graph name
    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    pub fn routing(&self) -> RoutingMode {
        self.attributes.routing
    }

    /// File name (without extension) for rendered artifacts
    pub fn file_stem(&self) -> &str {
        self.attributes
            .file_stem
            .as_deref()
            .unwrap_or(&self.attributes.name)
    }
}

impl GraphView for RenderableGraph {
    fn attributes(&self) -> &GraphAttributes {
        &self.attributes
    }

    fn get_node(&self, id: &str) -> Option<&NodeData> {
        self.contents.nodes.get(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.contents.nodes()
    }

    fn edges(&self) -> impl Iterator<Item = &PlacedEdge> {
        self.contents.edges.iter()
    }

    fn rank_groups(&self) -> impl Iterator<Item = &RankGroup> {
        self.contents.rank_groups.iter()
    }

    fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.contents.clusters.iter()
    }

    fn node_count(&self) -> usize {
        self.contents.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.contents.edges.len()
    }
}

impl GraphContents {
    fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }
}

fn to_owned_ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LabelAttribute;

    fn ortho() -> GraphDescription {
        GraphDescription::new(GraphAttributes::new("T").with_routing(RoutingMode::Orthogonal))
    }

    fn polyline() -> GraphDescription {
        GraphDescription::new(GraphAttributes::new("T").with_routing(RoutingMode::Polyline))
    }

    #[test]
    fn test_redeclared_node_is_overwritten() {
        let mut g = polyline();
        g.add_node("A", "First", NodeKind::Actor, NodeShape::Rectangle);
        g.add_node("B", "Other", NodeKind::Store, NodeShape::Cylinder);
        g.add_node("A", "Second", NodeKind::Process, NodeShape::Circle);

        assert_eq!(g.node_count(), 2);
        let a = g.get_node("A").unwrap();
        assert_eq!(a.label, "Second");
        assert_eq!(a.kind, NodeKind::Process);
        assert_eq!(a.shape, NodeShape::Circle);

        // First-declaration order is kept
        let ids: Vec<_> = g.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut g = polyline();
        g.add_labeled_edge("A", "B", "x");
        g.add_labeled_edge("A", "B", "y");

        let graph = g.finalize().unwrap();
        let between = graph.edges_between("A", "B");
        assert_eq!(between.len(), 2);
        assert_eq!(between[0].label_text(), Some("x"));
        assert_eq!(between[1].label_text(), Some("y"));
    }

    #[test]
    fn test_edges_to_undeclared_nodes_are_allowed() {
        let mut g = ortho();
        g.add_kind_node("A", "A", NodeKind::Step);
        g.add_simple_edge("A", "Later");

        let graph = g.finalize().unwrap();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.undeclared_endpoints().contains("Later"));
    }

    #[test]
    fn test_orthogonal_labels_become_offset() {
        let mut g = ortho();
        g.add_edge("U", "P", Some("Login Data"), EdgeStyle::Normal);
        let graph = g.finalize().unwrap();
        let edge = graph.edges().next().unwrap();
        assert_eq!(edge.label().unwrap().attribute, LabelAttribute::Offset);
    }

    #[test]
    fn test_polyline_labels_stay_inline() {
        let mut g = polyline();
        g.add_labeled_edge("USER", "rel", "1");
        let graph = g.finalize().unwrap();
        let edge = graph.edges().next().unwrap();
        assert_eq!(edge.label().unwrap().attribute, LabelAttribute::Inline);
    }

    #[test]
    fn test_conflicting_labels_fail_at_finalize() {
        let mut g = polyline();
        g.insert_edge(EdgeData::with_label("A", "B", "inline").with_xlabel("offset"));
        // Insertion itself does not fail
        g.add_simple_edge("B", "C");
        assert_eq!(g.edge_count(), 2);

        let err = g.finalize().unwrap_err();
        assert!(err.is_invalid_graph());
        assert!(err.to_string().contains("A -> B"));
    }

    #[test]
    fn test_two_offset_labels_conflict_under_ortho() {
        let mut g = ortho();
        g.insert_edge(EdgeData::with_label("A", "B", "one").with_xlabel("two"));
        assert!(g.finalize().is_err());
    }

    #[test]
    fn test_explicit_offset_label_alone_is_valid() {
        let mut g = polyline();
        g.add_offset_labeled_edge("A", "B", "N");
        let graph = g.finalize().unwrap();
        assert!(graph.edges().next().unwrap().label().unwrap().is_offset());
    }

    #[test]
    fn test_empty_node_id_is_invalid() {
        let mut g = polyline();
        g.add_kind_node("", "nameless", NodeKind::Entity);
        assert!(g.finalize().unwrap_err().is_invalid_graph());
    }

    #[test]
    fn test_rank_groups_are_all_kept() {
        let mut g = polyline();
        g.add_rank_group(RankClass::Min, &["A"]);
        g.add_rank_group(RankClass::Min, &["B"]);
        g.add_named_rank_group("rank_pair", RankClass::Same, &["C", "D"]);

        let graph = g.finalize().unwrap();
        let groups: Vec<_> = graph.rank_groups().collect();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2].name.as_deref(), Some("rank_pair"));
        assert!(groups[2].contains("D"));
    }

    #[test]
    fn test_invisible_chain() {
        let mut g = polyline();
        g.add_invisible_chain(&["A", "B", "C"]);
        let graph = g.finalize().unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edges().all(|e| e.is_invisible() && e.label().is_none()));
    }

    #[test]
    fn test_cluster_lookup() {
        let mut g = ortho();
        g.add_kind_node("X", "X", NodeKind::Step);
        g.add_cluster("guest", "Guest", Some("gray50"), &["X"]);
        let graph = g.finalize().unwrap();
        assert_eq!(graph.cluster_of("X").unwrap().id, "guest");
        assert_eq!(graph.cluster_of("X").unwrap().color.as_deref(), Some("gray50"));
        assert!(graph.cluster_of("Y").is_none());
    }

    #[test]
    fn test_uncolored_cluster() {
        let mut g = ortho();
        g.add_cluster("admin", "Admin", None, &["X"]);
        let graph = g.finalize().unwrap();
        assert!(graph.cluster_of("X").unwrap().color.is_none());
    }

    #[test]
    fn test_title_and_routing() {
        let mut g = ortho();
        g.set_title("Level 1 DFD");
        assert_eq!(g.routing(), RoutingMode::Orthogonal);
        let graph = g.finalize().unwrap();
        assert_eq!(graph.attributes().title.as_deref(), Some("Level 1 DFD"));
        assert_eq!(graph.name(), "T");
        // Without an explicit stem, artifacts are named after the graph
        assert_eq!(graph.file_stem(), "T");
    }

    #[test]
    fn test_file_stem_overrides_graph_name() {
        let mut g = ortho();
        g.set_file_stem("data_flow_level1");
        let graph = g.finalize().unwrap();
        assert_eq!(graph.name(), "T");
        assert_eq!(graph.file_stem(), "data_flow_level1");
    }
}
