//! Entry point for the `barky-gateway` HTTP server.

use std::sync::Arc;

use barky_core::ResourceStore;
use barky_gateway::{
    config::GatewayConfig,
    persist::{load_store, save_store},
    routes::create_router,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = match GatewayConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = match &config.data_file {
        Some(path) => match load_store(path).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load snapshot");
                std::process::exit(1);
            }
        },
        None => ResourceStore::new(),
    };

    if config.seed_examples {
        match store.seed_examples() {
            Ok(false) => info!("store not empty, skipping example records"),
            Ok(true) => {}
            Err(e) => tracing::error!(error = %e, "failed to seed example records"),
        }
    }

    let store = Arc::new(store);
    let app = create_router(Arc::clone(&store));

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, "barky-gateway listening");

    if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }

    if let Some(path) = &config.data_file {
        if let Err(e) = save_store(path, &store).await {
            tracing::error!(error = %e, "failed to write snapshot");
            std::process::exit(1);
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
