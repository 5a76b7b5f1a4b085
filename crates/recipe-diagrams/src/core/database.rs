//! Core traits for graph description storage
//!
//! [`GraphView`] is the read side shared by the mutable
//! [`GraphDescription`](super::GraphDescription) and the finalized
//! [`RenderableGraph`](super::RenderableGraph). [`Database`] adds the
//! write side used while a diagram is being assembled.

use std::collections::BTreeSet;

use super::{Cluster, EdgeData, GraphAttributes, NodeData, NodeKind, PlacedEdge, RankGroup};

/// Read access to a graph description
pub trait GraphView {
    /// Graph-wide layout attributes
    fn attributes(&self) -> &GraphAttributes;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&NodeData>;

    /// Iterate over declared nodes in first-declaration order
    fn nodes(&self) -> impl Iterator<Item = &NodeData>;

    /// Iterate over edges in insertion order
    fn edges(&self) -> impl Iterator<Item = &PlacedEdge>;

    /// Iterate over rank groups in declaration order
    fn rank_groups(&self) -> impl Iterator<Item = &RankGroup>;

    /// Iterate over clusters in declaration order
    fn clusters(&self) -> impl Iterator<Item = &Cluster>;

    /// Get the number of declared nodes
    fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Get the number of edges, parallel edges included
    fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Check if a node has been declared
    fn has_node(&self, id: &str) -> bool {
        self.get_node(id).is_some()
    }

    /// Get all edges from one node to another
    fn edges_between(&self, from: &str, to: &str) -> Vec<&PlacedEdge> {
        self.edges()
            .filter(|e| e.from == from && e.to == to)
            .collect()
    }

    /// Get all edges leaving a node
    fn out_edges(&self, from: &str) -> Vec<&PlacedEdge> {
        self.edges().filter(|e| e.from == from).collect()
    }

    /// Get all nodes of one kind
    fn nodes_of_kind(&self, kind: NodeKind) -> Vec<&NodeData> {
        self.nodes().filter(|n| n.kind == kind).collect()
    }

    /// Edge endpoints that were never declared as nodes
    ///
    /// The renderer materialises these on its own.
    fn undeclared_endpoints(&self) -> BTreeSet<String> {
        self.edges()
            .flat_map(|e| [e.from.as_str(), e.to.as_str()])
            .filter(|id| !self.has_node(id))
            .map(str::to_string)
            .collect()
    }

    /// Get the cluster that draws a node, if any
    fn cluster_of(&self, node_id: &str) -> Option<&Cluster> {
        self.clusters().find(|c| c.contains(node_id))
    }
}

/// Write access used while assembling a diagram
///
/// Insertion never fails; irregularities are reported when the description
/// is finalized, so a batch of insertions is never interrupted mid-build.
pub trait Database: GraphView + Send + Sync {
    /// Declare a node, overwriting any previous declaration with the same ID
    fn insert_node(&mut self, node: NodeData);

    /// Append an edge; parallel edges are kept
    fn insert_edge(&mut self, edge: EdgeData);

    /// Append a rank constraint
    fn insert_rank_group(&mut self, group: RankGroup);

    /// Append a cluster
    fn insert_cluster(&mut self, cluster: Cluster);
}
