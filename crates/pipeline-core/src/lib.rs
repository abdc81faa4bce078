//! Pipeline Core: pipeline data model, adjacency builder, and DAG check

pub mod model;
pub mod adjacency;
pub mod cycle;
pub mod validate;


pub use model::{NodeId, PipelineNode, PipelineEdge, Pipeline, ValidationResult};
pub use adjacency::AdjacencyMap;
pub use cycle::{BackEdge, find_back_edge, is_acyclic};
pub use validate::validate;
