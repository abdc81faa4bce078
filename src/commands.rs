//! CLI command implementations

use anyhow::Context;
use pipeline_core::ValidationResult;
use pipeline_server::{decode::decode_pipeline, PipelineServer, ServerConfig};
use std::io::Read;
use std::path::Path;

pub async fn serve(host: String, port: u16, allowed_origins: Vec<String>) -> anyhow::Result<()> {
    tracing::info!("Starting pipeline validator on {}:{}", host, port);

    let config = ServerConfig {
        host,
        port,
        allowed_origins,
    };
    PipelineServer::new(config).start().await
}

pub fn validate(file: &Path) -> anyhow::Result<()> {
    let result = validate_file(file)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Read a pipeline document from `file` ("-" for stdin) and validate it.
fn validate_file(file: &Path) -> anyhow::Result<ValidationResult> {
    let raw = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read pipeline from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };

    let pipeline = decode_pipeline(&raw).with_context(|| format!("Rejected {}", file.display()))?;
    tracing::info!(
        "Loaded {} nodes, {} edges from {}",
        pipeline.nodes.len(),
        pipeline.edges.len(),
        file.display()
    );

    Ok(pipeline.validate())
}
