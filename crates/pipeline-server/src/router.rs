//! Axum router setup for the pipeline server

use std::any::Any;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::ApiError,
    handlers::{parse_pipeline, read_root},
    ServerConfig,
};

/// Create the axum router with all routes
pub fn create_router(config: &ServerConfig) -> anyhow::Result<Router> {
    let cors = cors_layer(&config.allowed_origins)?;

    Ok(Router::new()
        .route("/", get(read_root))
        .route("/pipelines/parse", post(parse_pipeline))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Credentialed CORS for the configured frontend origins.
///
/// Wildcards are not allowed together with credentials, so `*` is rejected
/// as an origin, and methods and headers are mirrored from the preflight.
fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    if origins.iter().any(|origin| origin.trim() == "*") {
        anyhow::bail!("Wildcard CORS origin \"*\" cannot be used with credentials; list explicit origins");
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin: {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(message).into_response()
}
