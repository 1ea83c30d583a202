use serde::Deserialize;
use serde_json::{Map, Value};

/// One xdot JSON document as Graphviz emits it: a flat object list, a flat
/// edge list, and a count of how many leading objects are subgraph headers.
///
/// Structural fields are typed here; every other key (label, shape, color,
/// the `_draw_` family, ...) falls through into the flattened `attrs` map in
/// document order.
#[derive(Debug, Clone, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub strict: bool,
    #[serde(rename = "_subgraph_cnt", default)]
    pub subgraph_cnt: usize,
    pub objects: Vec<Object>,
    pub edges: Vec<Edge>,
}

/// A node or a subgraph header. The distinction is positional in the source
/// format (first `_subgraph_cnt` entries of `objects` are headers); only the
/// partitioner applies that rule.
#[derive(Debug, Clone, Deserialize)]
pub struct Object {
    #[serde(rename = "_gvid")]
    pub gvid: i64,
    #[serde(default)]
    pub name: String,
    /// Member node ids, present on subgraph headers.
    #[serde(default)]
    pub nodes: Vec<i64>,
    /// Member edge ids, present on subgraph headers.
    #[serde(default)]
    pub edges: Vec<i64>,
    /// Nested subgraph ids. Parsed so they stay out of `attrs`; nesting
    /// itself is not rendered (the model is one flat subgraph layer).
    #[serde(default)]
    pub subgraphs: Vec<i64>,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge {
    #[serde(rename = "_gvid")]
    pub gvid: i64,
    pub tail: i64,
    pub head: i64,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

/// The name as it should appear in DOT output. Empty names and the
/// `%`-prefixed synthetic names Graphviz invents for anonymous items render
/// as no name at all.
pub fn display_name(name: &str) -> &str {
    if name.starts_with('%') { "" } else { name }
}

impl Object {
    pub fn display_name(&self) -> &str {
        display_name(&self.name)
    }
}

pub fn parse(input: &str) -> Result<Graph, serde_json::Error> {
    serde_json::from_str(input)
}
