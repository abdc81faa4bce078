//! Core data structures for submitted pipelines

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque node identifier, as assigned by the pipeline editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A single node of a submitted pipeline.
///
/// Only `id` takes part in validation. Everything else the editor sends
/// (position, data, dimensions, ...) is kept in `extra` untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineNode {
    pub id: NodeId,
    /// Display type of the node ("customInput", "llm", ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PipelineNode {
    pub fn new(id: impl Into<NodeId>) -> Self {
        PipelineNode {
            id: id.into(),
            node_type: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }
}

/// A directed edge between two pipeline nodes.
///
/// The editor can submit half-connected edges, so either endpoint may be
/// missing. Such edges are counted but never reach the adjacency map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeId>,
    /// Output port on the source node. Not interpreted.
    #[serde(rename = "sourceHandle", default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    /// Input port on the target node. Not interpreted.
    #[serde(rename = "targetHandle", default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PipelineEdge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        PipelineEdge {
            id: None,
            source: Some(source.into()),
            target: Some(target.into()),
            source_handle: None,
            target_handle: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Both endpoints, if the edge is fully connected.
    pub fn endpoints(&self) -> Option<(&NodeId, &NodeId)> {
        match (&self.source, &self.target) {
            (Some(source), Some(target)) => Some((source, target)),
            _ => None,
        }
    }
}

/// A decoded pipeline submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pipeline {
    #[serde(default)]
    pub nodes: Vec<PipelineNode>,
    #[serde(default)]
    pub edges: Vec<PipelineEdge>,
}

impl Pipeline {
    pub fn new(nodes: Vec<PipelineNode>, edges: Vec<PipelineEdge>) -> Self {
        Pipeline { nodes, edges }
    }

    /// Validate this pipeline. See [`crate::validate`].
    pub fn validate(&self) -> ValidationResult {
        crate::validate::validate(&self.nodes, &self.edges)
    }
}

/// Outcome of validating one pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Number of submitted nodes.
    pub num_nodes: usize,
    /// Number of submitted edges, duplicates and dangling edges included.
    pub num_edges: usize,
    /// Whether the pipeline is a directed acyclic graph.
    pub is_dag: bool,
}
