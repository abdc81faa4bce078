//! Adjacency map built from a pipeline's node and edge lists

use std::collections::{HashMap, HashSet};

use crate::model::{NodeId, PipelineEdge, PipelineNode};

/// Per-node set of directly reachable nodes.
///
/// Keys are exactly the submitted node identifiers, isolated nodes included.
/// Neighbor sets are unordered and hold each target once, however many
/// parallel edges were submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyMap {
    inner: HashMap<NodeId, HashSet<NodeId>>,
}

impl AdjacencyMap {
    /// Build the map from node identifiers and `(source, target)` pairs.
    ///
    /// Edges whose source is not a known node are skipped. Targets are not
    /// checked: a dangling target ends up as a neighbor with no entry of its own.
    pub fn build<'a, N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = &'a NodeId>,
        E: IntoIterator<Item = (&'a NodeId, &'a NodeId)>,
    {
        let mut inner: HashMap<NodeId, HashSet<NodeId>> = nodes
            .into_iter()
            .map(|id| (id.clone(), HashSet::new()))
            .collect();

        for (source, target) in edges {
            match inner.get_mut(source) {
                Some(neighbors) => {
                    if neighbors.insert(target.clone()) {
                        tracing::trace!("Added edge: {} -> {}", source, target);
                    }
                }
                None => {
                    tracing::debug!("Skipping edge from unknown node: {} -> {}", source, target);
                }
            }
        }

        AdjacencyMap { inner }
    }

    /// Build the map straight from decoded pipeline nodes and edges.
    ///
    /// Edges missing either endpoint are skipped.
    pub fn from_pipeline(nodes: &[PipelineNode], edges: &[PipelineEdge]) -> Self {
        Self::build(
            nodes.iter().map(|n| &n.id),
            edges.iter().filter_map(|e| {
                let endpoints = e.endpoints();
                if endpoints.is_none() {
                    tracing::debug!("Skipping half-connected edge {:?}", e.id);
                }
                endpoints
            }),
        )
    }

    /// Direct successors of `id`, or `None` if `id` is not a known node.
    pub fn neighbors(&self, id: &str) -> Option<&HashSet<NodeId>> {
        self.inner.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains_key(id)
    }

    /// Number of distinct nodes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over every node identifier, in no particular order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.inner.keys()
    }

    /// Number of distinct `(source, target)` pairs that survived construction.
    pub fn edge_count(&self) -> usize {
        self.inner.values().map(HashSet::len).sum()
    }

    /// Iterate over every node together with its neighbor set.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &HashSet<NodeId>)> {
        self.inner.iter()
    }
}
