use std::error::Error;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::oneshot;

use hemascope::api::rest::RestApi;
use hemascope::config::load_config;
use hemascope::hematology::classifier::Classifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = load_config(Path::new("config.yaml"))
        .map_err(|e| Box::<dyn Error>::from(e))?;

    let classifier = Arc::new(Classifier::new());
    let api = RestApi::new(Arc::clone(&classifier));

    log::info!("Starting server on {}:{}", config.api.host, config.api.port);

    // Create a channel for shutdown signal
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    // Set up server with graceful shutdown
    let routes = api.routes();
    let addr: SocketAddr = format!("{}:{}", config.api.host, config.api.port).parse()?;

    // Create server future but don't run it yet
    let (_, server) = warp::serve(routes)
        .bind_with_graceful_shutdown(addr, async move {
            shutdown_rx.await.ok();
            log::info!("Shutting down server...");
        });

    // Create task for running the server
    let server_handle = tokio::spawn(server);

    // Wait for Ctrl+C
    signal::ctrl_c().await?;
    log::info!("Ctrl+C received, starting graceful shutdown");

    // Start shutdown process
    shutdown_tx.send(()).ok();

    // Wait for server to exit
    server_handle.await.map_err(|e| Box::<dyn Error>::from(e))?;

    log::info!("Server shutdown complete");
    Ok(())
}
