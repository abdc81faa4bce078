//! REST API handlers for the pipeline server

use axum::{
    extract::rejection::FormRejection,
    response::{IntoResponse, Json},
    Form,
};
use pipeline_core::ValidationResult;
use serde::Deserialize;
use serde_json::json;

use crate::decode::decode_pipeline;
use crate::error::ApiError;

/// Form body of `POST /pipelines/parse`.
#[derive(Debug, Deserialize)]
pub struct ParseForm {
    /// JSON document holding `nodes` and `edges`.
    pub pipeline: String,
}

/// Health check endpoint
pub async fn read_root() -> impl IntoResponse {
    Json(json!({ "Ping": "Pong" }))
}

/// Count nodes and edges of the submitted pipeline and check it is a DAG
pub async fn parse_pipeline(
    form: Result<Form<ParseForm>, FormRejection>,
) -> Result<Json<ValidationResult>, ApiError> {
    let Form(form) = form?;
    tracing::info!("New pipeline validation request ({} bytes)", form.pipeline.len());

    let pipeline = decode_pipeline(&form.pipeline)?;
    let result = pipeline.validate();

    Ok(Json(result))
}
