//! Decoding of the `pipeline` form field into core types

use pipeline_core::{Pipeline, PipelineEdge, PipelineNode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Parse a raw pipeline JSON document.
///
/// Missing `nodes`/`edges` keys mean empty lists; present but non-array
/// values are rejected.
pub fn decode_pipeline(raw: &str) -> Result<Pipeline, ApiError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        tracing::debug!("JSON parsing failed: {}", e);
        ApiError::InvalidJson
    })?;

    let Value::Object(mut object) = value else {
        tracing::debug!("Pipeline payload is not a JSON object");
        return Err(ApiError::InvalidJson);
    };

    let nodes = take_list(&mut object, "nodes", "Nodes")?;
    let edges = take_list(&mut object, "edges", "Edges")?;

    tracing::debug!("Extracted {} nodes, {} edges", nodes.len(), edges.len());

    Ok(Pipeline::new(
        decode_elements::<PipelineNode>(nodes, "node")?,
        decode_elements::<PipelineEdge>(edges, "edge")?,
    ))
}

fn take_list(
    object: &mut Map<String, Value>,
    key: &str,
    field: &'static str,
) -> Result<Vec<Value>, ApiError> {
    match object.remove(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ApiError::NotAList { field }),
    }
}

fn decode_elements<T: DeserializeOwned>(
    items: Vec<Value>,
    kind: &'static str,
) -> Result<Vec<T>, ApiError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| ApiError::InvalidElement {
                kind,
                index,
                message: e.to_string(),
            })
        })
        .collect()
}
