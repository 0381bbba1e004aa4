//! Productsearch API Server
//!
//! HTTP API server for hybrid semantic and keyword product search.

use anyhow::Context;
use clap::Parser;
use productsearch_api::{bootstrap, routes, telemetry};
use productsearch_config::{
    ApplicationConfig, ConfigurationLoader, EnvironmentSource, TomlFileSource, Validate,
};
use tracing::{error, info};

/// Productsearch API server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional configuration file path (TOML format)
    #[arg(long, short = 'c')]
    config: Option<String>,

    /// Bind host, overriding configuration
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding configuration
    #[arg(long, short = 'p')]
    port: Option<u16>,
}

fn load_config(args: &Args) -> anyhow::Result<ApplicationConfig> {
    let mut loader = ConfigurationLoader::new();
    if let Some(path) = &args.config {
        loader = loader.add_source(Box::new(TomlFileSource::new(path)));
    }
    let mut config = loader
        .add_source(Box::new(EnvironmentSource))
        .load()
        .context("Failed to load configuration")?;

    if let Some(host) = &args.host {
        config.api.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    config.validate().context("Invalid configuration")?;

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    productsearch_common::initialize_environment();

    let args = Args::parse();
    let config = load_config(&args)?;

    let _log_guards = telemetry::init_tracing(&config.telemetry)?;

    info!(
        service = %config.telemetry.service_name,
        index = %config.document_index.index_name,
        "Starting productsearch API server"
    );

    let state = bootstrap::initialize_app_state(&config)?;
    let app = routes::create_router(state);

    let addr = config.api.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
