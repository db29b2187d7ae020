use paramserve::config::Config;
use paramserve::params::ParameterStore;
use paramserve::server::{WorkerPool, listener};
use paramserve::site::Site;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    if let Err(e) = start().await {
        tracing::error!("Unable to start the server: {:#}", e);
        std::process::exit(1);
    }
}

async fn start() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    let site = Site::from_config(&cfg.static_files, ParameterStore::new());
    let pool = WorkerPool::new(cfg.server.max_threads, cfg.server.queue_capacity, site);
    let socket = listener::bind(&cfg).await?;

    tokio::select! {
        res = listener::run(socket, &pool) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    // In-flight connections are dropped with the runtime.
    Ok(())
}
