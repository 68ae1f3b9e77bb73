use log::{debug, info};
use simplelog::{Config as LogConfig, SimpleLogger};

use battleship_api::{config::Config, store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {

    let config = Config::from_env()?;

    // set up logging facility
    let _ = SimpleLogger::init(config.log_level, LogConfig::default());
    info!("Starting..");
    debug!("database_url: {:?}", config.database_url);

    let pool = store::connect(&config.database_url, config.max_connections).await?;
    store::init_schema(&pool).await?;

    // Define routes
    let app = battleship_api::app(pool.clone());

    // Start the server
    debug!("Listening on {}", config.listen_addr);
    axum::Server::bind(&config.listen_addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Every connection is released before we exit
    pool.close().await;
    info!("Stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Unable to listen for shutdown signal: {}", err);
    }
    info!("Shutting down..");
}
