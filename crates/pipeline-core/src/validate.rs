//! Pipeline validation entry point

use crate::cycle::is_acyclic;
use crate::model::{NodeId, PipelineEdge, PipelineNode, ValidationResult};

/// Count the submitted nodes and edges and check that they form a DAG.
///
/// Counts are taken from the raw input: duplicate and dangling edges are
/// included in `num_edges` even though cycle detection ignores them.
pub fn validate(nodes: &[PipelineNode], edges: &[PipelineEdge]) -> ValidationResult {
    let num_nodes = nodes.len();
    let num_edges = edges.len();

    for (i, node) in nodes.iter().enumerate() {
        tracing::debug!(
            "Node {}: id={}, type={}",
            i + 1,
            node.id,
            node.node_type.as_deref().unwrap_or("unknown")
        );
    }
    for (i, edge) in edges.iter().enumerate() {
        tracing::debug!(
            "Edge {}: {} -> {}",
            i + 1,
            edge.source.as_ref().map_or("unknown", NodeId::as_str),
            edge.target.as_ref().map_or("unknown", NodeId::as_str)
        );
    }

    let is_dag = is_acyclic(nodes, edges);

    tracing::info!(
        num_nodes,
        num_edges,
        is_dag,
        "Validated pipeline: {}",
        if is_dag { "valid DAG" } else { "contains cycles" }
    );

    ValidationResult {
        num_nodes,
        num_edges,
        is_dag,
    }
}
