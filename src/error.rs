use thiserror::Error;

/// Everything that can go wrong between reading the JSON text and
/// producing the DOT document. Any variant aborts the whole conversion;
/// there is no partial output.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid xdot json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate object id {id}")]
    DuplicateObject { id: i64 },

    #[error("duplicate edge id {id}")]
    DuplicateEdge { id: i64 },

    #[error("edge {edge} references unknown node {node}")]
    DanglingEdge { edge: i64, node: i64 },

    #[error("subgraph {subgraph} lists unknown member node {node}")]
    DanglingMemberNode { subgraph: i64, node: i64 },

    #[error("subgraph {subgraph} lists unknown member edge {edge}")]
    DanglingMemberEdge { subgraph: i64, edge: i64 },

    #[error("subgraph count {count} exceeds the {total} objects present")]
    SubgraphCount { count: usize, total: usize },
}
