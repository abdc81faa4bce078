//! Cycle detection over a pipeline's adjacency map
//!
//! Depth-first search with an explicit stack of `(node, remaining neighbors)`
//! frames, so arbitrarily long chains never touch the thread's call stack.
//! Each node moves `Unvisited -> InProgress -> Done` exactly once. Meeting an
//! `InProgress` node means we walked back onto the active path: a cycle.
//! Meeting a `Done` node is harmless re-convergence (e.g. a diamond).

use std::collections::HashMap;
use std::collections::hash_set;

use crate::adjacency::AdjacencyMap;
use crate::model::{NodeId, PipelineEdge, PipelineNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    /// On the active DFS path.
    InProgress,
    /// Fully explored, no cycle reachable from here.
    Done,
}

/// An edge that closes a cycle: `to` was still on the active path when
/// `from` reached it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackEdge {
    pub from: NodeId,
    pub to: NodeId,
}

fn state_of(states: &HashMap<&NodeId, VisitState>, id: &NodeId) -> VisitState {
    states.get(id).copied().unwrap_or(VisitState::Unvisited)
}

/// Find one back edge in `adjacency`, if any.
///
/// Which back edge is reported depends on hash iteration order; only its
/// presence is meaningful. Neighbors without an entry in the map (dangling
/// targets) are sinks and cannot close a cycle.
pub fn find_back_edge(adjacency: &AdjacencyMap) -> Option<BackEdge> {
    let mut states: HashMap<&NodeId, VisitState> = HashMap::with_capacity(adjacency.len());
    let mut stack: Vec<(&NodeId, hash_set::Iter<'_, NodeId>)> = Vec::new();

    for (root, root_neighbors) in adjacency.iter() {
        if state_of(&states, root) != VisitState::Unvisited {
            continue;
        }

        tracing::trace!("DFS root: {}", root);
        states.insert(root, VisitState::InProgress);
        stack.push((root, root_neighbors.iter()));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let Some(next) = frame.1.next() else {
                states.insert(node, VisitState::Done);
                stack.pop();
                continue;
            };

            match state_of(&states, next) {
                VisitState::InProgress => {
                    return Some(BackEdge {
                        from: node.clone(),
                        to: next.clone(),
                    });
                }
                VisitState::Done => {}
                VisitState::Unvisited => match adjacency.neighbors(next.as_str()) {
                    Some(neighbors) => {
                        states.insert(next, VisitState::InProgress);
                        stack.push((next, neighbors.iter()));
                    }
                    None => {
                        states.insert(next, VisitState::Done);
                    }
                },
            }
        }
    }

    None
}

/// Whether the graph described by `nodes` and `edges` has no directed cycle.
///
/// An empty node list counts as acyclic. That is a convention callers rely
/// on, not something graph theory forces.
pub fn is_acyclic(nodes: &[PipelineNode], edges: &[PipelineEdge]) -> bool {
    if nodes.is_empty() {
        tracing::debug!("Empty graph, treating as a valid DAG");
        return true;
    }

    let adjacency = AdjacencyMap::from_pipeline(nodes, edges);
    tracing::debug!(
        "Checking {} nodes / {} distinct edges for cycles",
        adjacency.len(),
        adjacency.edge_count()
    );

    match find_back_edge(&adjacency) {
        Some(back_edge) => {
            tracing::warn!("Cycle detected: {} -> {} (back edge)", back_edge.from, back_edge.to);
            false
        }
        None => true,
    }
}
