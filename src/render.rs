use std::fmt::Write;

use crate::error::ConvertError;
use crate::filter::{EDGE_RULES, NODE_RULES, attr_block};
use crate::model::{Graph, Object};
use crate::partition::{ResolvedEdge, Subgraph, partition};

fn node_stmt(node: &Object) -> String {
    format!("{}{}", node.display_name(), attr_block(&node.attrs, &NODE_RULES))
}

fn edge_stmt(edge: &ResolvedEdge<'_>, arrow: &str) -> String {
    format!(
        "{} {arrow} {}{}",
        edge.tail.display_name(),
        edge.head.display_name(),
        attr_block(edge.attrs, &EDGE_RULES)
    )
}

// A subgraph's own attributes are never rendered; only its header name and
// its members appear.
fn subgraph_stmt(subgraph: &Subgraph<'_>, arrow: &str) -> String {
    let mut out = String::from("subgraph");
    let name = subgraph.header.display_name();
    if !name.is_empty() {
        let _ = write!(out, " {name}");
    }
    out.push_str(" {");
    for node in &subgraph.nodes {
        let _ = write!(out, "\n\t\t{}", node_stmt(node));
    }
    for edge in &subgraph.edges {
        let _ = write!(out, "\n\t\t{}", edge_stmt(edge, arrow));
    }
    out.push_str("\n\t}");
    out
}

fn header(graph: &Graph) -> String {
    let mut out = String::new();
    if graph.strict {
        out.push_str("strict ");
    }
    out.push_str(if graph.directed { "digraph" } else { "graph" });
    let name = crate::model::display_name(&graph.name);
    if !name.is_empty() {
        let _ = write!(out, " {name}");
    }
    out.push_str(" {");
    out
}

/// Assemble the full DOT document: header, subgraphs, top-level nodes, then
/// top-level edges (always after the nodes, whatever the input interleaving),
/// closing brace. No trailing newline; the caller owns line termination.
pub fn render(graph: &Graph) -> Result<String, ConvertError> {
    let split = partition(graph)?;
    let arrow = if graph.directed { "->" } else { "--" };

    let mut out = header(graph);
    for subgraph in &split.subgraphs {
        let _ = write!(out, "\n\t{}", subgraph_stmt(subgraph, arrow));
    }
    for node in &split.nodes {
        let _ = write!(out, "\n\t{}", node_stmt(node));
    }
    for edge in &split.edges {
        let _ = write!(out, "\n\t{}", edge_stmt(edge, arrow));
    }
    out.push_str("\n}");
    Ok(out)
}
