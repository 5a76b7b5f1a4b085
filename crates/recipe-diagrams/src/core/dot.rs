//! DOT serialization of finalized graphs
//!
//! Produces the Graphviz input for a [`RenderableGraph`]. Statement order is
//! deterministic: graph attributes, free nodes, clusters, rank groups, edges.

use std::fmt::{self, Write};

use tracing::{debug, trace};

use super::{Cluster, GraphView, NodeData, PlacedEdge, RankGroup, RenderableGraph};

const INDENT: &str = "    ";

/// Serialize a finalized graph to DOT source text
pub fn to_dot(graph: &RenderableGraph) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_dot(graph, &mut out);
    debug!(graph = %graph.name(), bytes = out.len(), "Serialized graph to DOT");
    out
}

/// Serialize a finalized graph into any formatter sink
pub fn write_dot<W: Write>(graph: &RenderableGraph, out: &mut W) -> fmt::Result {
    let attrs = graph.attributes();
    writeln!(out, "digraph {} {{", quote(&attrs.name))?;

    let mut graph_attrs = vec![
        ("rankdir", "TB".to_string()),
        ("splines", attrs.routing.to_string()),
        ("nodesep", attrs.node_sep.to_string()),
        ("ranksep", attrs.rank_sep.to_string()),
        ("overlap", "false".to_string()),
    ];
    if let Some(title) = &attrs.title {
        graph_attrs.push(("label", quote(title)));
        graph_attrs.push(("labelloc", "t".to_string()));
    }
    writeln!(out, "{INDENT}graph [{}];", join_attrs(&graph_attrs))?;

    let mut node_defaults = Vec::new();
    if let Some(shape) = attrs.default_node_shape {
        node_defaults.push(("shape", shape.to_string()));
    }
    node_defaults.push(("fontname", quote(&attrs.font_family)));
    writeln!(out, "{INDENT}node [{}];", join_attrs(&node_defaults))?;
    writeln!(out, "{INDENT}edge [fontname={}];", quote(&attrs.font_family))?;

    let clusters: Vec<&Cluster> = graph.clusters().collect();
    let owning_cluster = |id: &str| clusters.iter().position(|c| c.contains(id));

    for node in graph.nodes() {
        if owning_cluster(&node.id).is_none() {
            write_node(out, node, 1)?;
        }
    }

    for (index, cluster) in clusters.iter().enumerate() {
        trace!(cluster_id = %cluster.id, "Writing cluster");
        writeln!(out, "{INDENT}subgraph {} {{", quote(&cluster_name(&cluster.id)))?;
        writeln!(out, "{INDENT}{INDENT}label={};", quote(&cluster.label))?;
        if let Some(color) = &cluster.color {
            writeln!(out, "{INDENT}{INDENT}color={};", quote(color))?;
        }
        for member in &cluster.member_ids {
            // A node is drawn by the first cluster that lists it
            if owning_cluster(member) != Some(index) {
                continue;
            }
            match graph.get_node(member) {
                Some(node) => write_node(out, node, 2)?,
                None => writeln!(out, "{INDENT}{INDENT}{};", quote(member))?,
            }
        }
        writeln!(out, "{INDENT}}}")?;
    }

    for group in graph.rank_groups() {
        write_rank_group(out, group)?;
    }

    for edge in graph.edges() {
        write_edge(out, edge)?;
    }

    writeln!(out, "}}")
}

fn write_node<W: Write>(out: &mut W, node: &NodeData, depth: usize) -> fmt::Result {
    let mut attrs = vec![
        ("label", quote(&node.label)),
        ("shape", node.shape.to_string()),
    ];
    for (key, value) in &node.attributes {
        attrs.push((key.as_str(), quote(value)));
    }
    writeln!(
        out,
        "{}{} [{}];",
        INDENT.repeat(depth),
        quote(&node.id),
        join_attrs(&attrs)
    )
}

fn write_rank_group<W: Write>(out: &mut W, group: &RankGroup) -> fmt::Result {
    match &group.name {
        Some(name) => write!(out, "{INDENT}subgraph {} {{ ", quote(name))?,
        None => write!(out, "{INDENT}{{ ")?,
    }
    write!(out, "rank={};", group.rank_class)?;
    for member in &group.member_ids {
        write!(out, " {};", quote(member))?;
    }
    writeln!(out, " }}")
}

fn write_edge<W: Write>(out: &mut W, edge: &PlacedEdge) -> fmt::Result {
    let mut attrs = Vec::new();
    for directive in &edge.labels {
        attrs.push((directive.attribute.as_str(), quote(&directive.value)));
    }
    if edge.is_invisible() {
        attrs.push(("style", edge.style.to_string()));
    }

    write!(out, "{INDENT}{} -> {}", quote(&edge.from), quote(&edge.to))?;
    if !attrs.is_empty() {
        write!(out, " [{}]", join_attrs(&attrs))?;
    }
    writeln!(out, ";")
}

fn join_attrs(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Graphviz only draws subgraphs as boxes when their name starts with `cluster`
fn cluster_name(id: &str) -> String {
    if id.starts_with("cluster") {
        id.to_string()
    } else {
        format!("cluster_{id}")
    }
}

/// Quote a DOT identifier or string value
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
