use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::error::ConvertError;
use crate::model::{Edge, Graph, Object};

/// An edge whose endpoint ids have been resolved to the objects they name.
#[derive(Debug)]
pub struct ResolvedEdge<'a> {
    pub gvid: i64,
    pub tail: &'a Object,
    pub head: &'a Object,
    pub attrs: &'a Map<String, Value>,
}

/// A subgraph header together with its resolved members.
#[derive(Debug)]
pub struct Subgraph<'a> {
    pub header: &'a Object,
    pub nodes: Vec<&'a Object>,
    pub edges: Vec<ResolvedEdge<'a>>,
}

/// The whole graph split into subgraph-owned and top-level items. Every
/// sequence follows input document order, so identical input always yields
/// identical output.
#[derive(Debug)]
pub struct Partition<'a> {
    pub subgraphs: Vec<Subgraph<'a>>,
    pub nodes: Vec<&'a Object>,
    pub edges: Vec<ResolvedEdge<'a>>,
}

/// Id-to-record lookup tables, built once per conversion. The source format
/// encodes all cross-references as integer ids into the flat lists; every
/// lookup goes through here and a miss is always a named error.
struct Index<'a> {
    objects: HashMap<i64, &'a Object>,
    edges: HashMap<i64, &'a Edge>,
}

impl<'a> Index<'a> {
    fn build(graph: &'a Graph) -> Result<Self, ConvertError> {
        let mut objects = HashMap::with_capacity(graph.objects.len());
        for object in &graph.objects {
            if objects.insert(object.gvid, object).is_some() {
                return Err(ConvertError::DuplicateObject { id: object.gvid });
            }
        }
        let mut edges = HashMap::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            if edges.insert(edge.gvid, edge).is_some() {
                return Err(ConvertError::DuplicateEdge { id: edge.gvid });
            }
        }
        Ok(Self { objects, edges })
    }

    fn resolve_edge(&self, edge: &'a Edge) -> Result<ResolvedEdge<'a>, ConvertError> {
        let endpoint = |node: i64| {
            self.objects
                .get(&node)
                .copied()
                .ok_or(ConvertError::DanglingEdge { edge: edge.gvid, node })
        };
        Ok(ResolvedEdge {
            gvid: edge.gvid,
            tail: endpoint(edge.tail)?,
            head: endpoint(edge.head)?,
            attrs: &edge.attrs,
        })
    }
}

pub fn partition(graph: &Graph) -> Result<Partition<'_>, ConvertError> {
    if graph.subgraph_cnt > graph.objects.len() {
        return Err(ConvertError::SubgraphCount {
            count: graph.subgraph_cnt,
            total: graph.objects.len(),
        });
    }

    let index = Index::build(graph)?;

    // First `subgraph_cnt` objects are headers; the positional convention
    // stops here.
    let mut subgraphs = Vec::with_capacity(graph.subgraph_cnt);
    let mut owned_nodes: HashSet<i64> = HashSet::new();
    let mut owned_edges: HashSet<i64> = HashSet::new();
    for header in &graph.objects[..graph.subgraph_cnt] {
        let mut nodes = Vec::with_capacity(header.nodes.len());
        for &id in &header.nodes {
            let node = index.objects.get(&id).copied().ok_or(
                ConvertError::DanglingMemberNode { subgraph: header.gvid, node: id },
            )?;
            nodes.push(node);
            owned_nodes.insert(id);
        }
        let mut edges = Vec::with_capacity(header.edges.len());
        for &id in &header.edges {
            let edge = index.edges.get(&id).copied().ok_or(
                ConvertError::DanglingMemberEdge { subgraph: header.gvid, edge: id },
            )?;
            edges.push(index.resolve_edge(edge)?);
            owned_edges.insert(id);
        }
        subgraphs.push(Subgraph { header, nodes, edges });
    }

    let nodes = graph.objects[graph.subgraph_cnt..]
        .iter()
        .filter(|object| !owned_nodes.contains(&object.gvid))
        .collect();

    let edges = graph
        .edges
        .iter()
        .filter(|edge| !owned_edges.contains(&edge.gvid))
        .map(|edge| index.resolve_edge(edge))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Partition { subgraphs, nodes, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse;
    use pretty_assertions::assert_eq;

    fn graph(input: &str) -> Graph {
        parse(input).unwrap()
    }

    #[test]
    fn flat_graph_has_no_subgraphs() {
        let g = graph(
            r#"{"_subgraph_cnt":0,
                "objects":[{"_gvid":0,"name":"a"},{"_gvid":1,"name":"b"}],
                "edges":[{"_gvid":0,"tail":0,"head":1}]}"#,
        );
        let p = partition(&g).unwrap();
        assert!(p.subgraphs.is_empty());
        assert_eq!(p.nodes.len(), 2);
        assert_eq!(p.edges.len(), 1);
        assert_eq!(p.edges[0].tail.name, "a");
        assert_eq!(p.edges[0].head.name, "b");
    }

    #[test]
    fn subgraph_members_leave_the_top_level() {
        let g = graph(
            r#"{"_subgraph_cnt":1,
                "objects":[
                    {"_gvid":0,"name":"cluster_0","nodes":[1,2],"edges":[0]},
                    {"_gvid":1,"name":"a"},
                    {"_gvid":2,"name":"b"},
                    {"_gvid":3,"name":"c"}],
                "edges":[
                    {"_gvid":0,"tail":1,"head":2},
                    {"_gvid":1,"tail":2,"head":3}]}"#,
        );
        let p = partition(&g).unwrap();
        assert_eq!(p.subgraphs.len(), 1);
        assert_eq!(p.subgraphs[0].header.name, "cluster_0");
        assert_eq!(p.subgraphs[0].nodes.len(), 2);
        assert_eq!(p.subgraphs[0].edges.len(), 1);
        // only `c` and the crossing edge stay at the top level
        let top: Vec<&str> = p.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(top, vec!["c"]);
        assert_eq!(p.edges.len(), 1);
        assert_eq!(p.edges[0].gvid, 1);
    }

    #[test]
    fn every_item_lands_in_exactly_one_scope() {
        let g = graph(
            r#"{"_subgraph_cnt":2,
                "objects":[
                    {"_gvid":0,"name":"cluster_0","nodes":[2],"edges":[0]},
                    {"_gvid":1,"name":"cluster_1","nodes":[3],"edges":[]},
                    {"_gvid":2,"name":"a"},
                    {"_gvid":3,"name":"b"},
                    {"_gvid":4,"name":"c"}],
                "edges":[
                    {"_gvid":0,"tail":2,"head":3},
                    {"_gvid":1,"tail":3,"head":4}]}"#,
        );
        let p = partition(&g).unwrap();

        let mut node_ids: Vec<i64> = p
            .subgraphs
            .iter()
            .flat_map(|sg| sg.nodes.iter().map(|n| n.gvid))
            .chain(p.nodes.iter().map(|n| n.gvid))
            .collect();
        node_ids.sort_unstable();
        assert_eq!(node_ids, vec![2, 3, 4]);

        let mut edge_ids: Vec<i64> = p
            .subgraphs
            .iter()
            .flat_map(|sg| sg.edges.iter().map(|e| e.gvid))
            .chain(p.edges.iter().map(|e| e.gvid))
            .collect();
        edge_ids.sort_unstable();
        assert_eq!(edge_ids, vec![0, 1]);
    }

    #[test]
    fn dangling_edge_tail_is_an_error() {
        let g = graph(
            r#"{"objects":[{"_gvid":0,"name":"a"}],
                "edges":[{"_gvid":0,"tail":9,"head":0}]}"#,
        );
        let err = partition(&g).unwrap_err();
        assert_eq!(err.to_string(), "edge 0 references unknown node 9");
    }

    #[test]
    fn dangling_edge_head_is_an_error() {
        let g = graph(
            r#"{"objects":[{"_gvid":0,"name":"a"}],
                "edges":[{"_gvid":0,"tail":0,"head":7}]}"#,
        );
        let err = partition(&g).unwrap_err();
        assert_eq!(err.to_string(), "edge 0 references unknown node 7");
    }

    #[test]
    fn dangling_member_node_is_an_error() {
        let g = graph(
            r#"{"_subgraph_cnt":1,
                "objects":[{"_gvid":0,"name":"cluster_0","nodes":[5],"edges":[]}],
                "edges":[]}"#,
        );
        let err = partition(&g).unwrap_err();
        assert_eq!(err.to_string(), "subgraph 0 lists unknown member node 5");
    }

    #[test]
    fn dangling_member_edge_is_an_error() {
        let g = graph(
            r#"{"_subgraph_cnt":1,
                "objects":[{"_gvid":0,"name":"cluster_0","nodes":[],"edges":[4]}],
                "edges":[]}"#,
        );
        let err = partition(&g).unwrap_err();
        assert_eq!(err.to_string(), "subgraph 0 lists unknown member edge 4");
    }

    #[test]
    fn duplicate_object_id_is_an_error() {
        let g = graph(
            r#"{"objects":[{"_gvid":0,"name":"a"},{"_gvid":0,"name":"b"}],"edges":[]}"#,
        );
        let err = partition(&g).unwrap_err();
        assert_eq!(err.to_string(), "duplicate object id 0");
    }

    #[test]
    fn duplicate_edge_id_is_an_error() {
        let g = graph(
            r#"{"objects":[{"_gvid":0,"name":"a"}],
                "edges":[{"_gvid":1,"tail":0,"head":0},{"_gvid":1,"tail":0,"head":0}]}"#,
        );
        let err = partition(&g).unwrap_err();
        assert_eq!(err.to_string(), "duplicate edge id 1");
    }

    #[test]
    fn subgraph_count_past_the_object_list_is_an_error() {
        let g = graph(r#"{"_subgraph_cnt":3,"objects":[{"_gvid":0}],"edges":[]}"#);
        let err = partition(&g).unwrap_err();
        assert_eq!(err.to_string(), "subgraph count 3 exceeds the 1 objects present");
    }

    #[test]
    fn partition_is_debug_printable() {
        // unwrap_err in the error tests needs Debug on the Ok side too
        let g = graph(
            r#"{"_subgraph_cnt":1,
                "objects":[
                    {"_gvid":0,"name":"cluster_0","nodes":[1],"edges":[0]},
                    {"_gvid":1,"name":"a"}],
                "edges":[{"_gvid":0,"tail":1,"head":1}]}"#,
        );
        let p = partition(&g).unwrap();
        let dump = format!("{p:?}");
        assert!(dump.contains("cluster_0"), "got: {dump}");
        assert!(dump.contains("ResolvedEdge"), "got: {dump}");
    }

    #[test]
    fn partition_is_deterministic() {
        let input = r#"{"_subgraph_cnt":1,
            "objects":[
                {"_gvid":0,"name":"cluster_0","nodes":[1],"edges":[1]},
                {"_gvid":1,"name":"a"},
                {"_gvid":2,"name":"b"}],
            "edges":[
                {"_gvid":0,"tail":1,"head":2},
                {"_gvid":1,"tail":1,"head":1}]}"#;
        let g = graph(input);
        let first: Vec<i64> = partition(&g).unwrap().edges.iter().map(|e| e.gvid).collect();
        let second: Vec<i64> = partition(&g).unwrap().edges.iter().map(|e| e.gvid).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![0]);
    }
}
