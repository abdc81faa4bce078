//! Pipeline validator CLI entry point

use clap::{Parser, Subcommand};
use pipeline_server::DEFAULT_FRONTEND_ORIGIN;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "pipeline-validator")]
#[command(about = "Validate pipeline graphs: node/edge counts and DAG check", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PIPELINE_PORT", default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, env = "PIPELINE_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Browser origin allowed by CORS (repeatable, or comma separated)
        #[arg(
            long = "allow-origin",
            env = "PIPELINE_ALLOWED_ORIGINS",
            value_delimiter = ',',
            default_value = DEFAULT_FRONTEND_ORIGIN
        )]
        allowed_origins: Vec<String>,
    },
    /// Validate a pipeline JSON file and print the result
    Validate {
        /// Path to the pipeline JSON, or "-" for stdin
        file: PathBuf,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded before parsing so PIPELINE_* values reach clap's env fallbacks.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "pipeline_validator={0},pipeline_core={0},pipeline_server={0},tower_http={0}",
                log_level
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) => {
            if let Some(problem) = env_file_problem(e) {
                tracing::warn!("Ignoring .env file: {}", problem);
            }
        }
    }

    tracing::debug!("Pipeline validator v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve {
            port,
            host,
            allowed_origins,
        } => commands::serve(host, port, allowed_origins).await,
        Commands::Validate { file } => commands::validate(&file),
        Commands::Version => {
            println!("pipeline-validator v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// A `.env` that fails to load is worth reporting unless it simply does not exist.
fn env_file_problem(err: dotenvy::Error) -> Option<dotenvy::Error> {
    if err.not_found() { None } else { Some(err) }
}
