use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

use crate::config::Config;
use crate::server::pool::WorkerPool;

/// Pause after a failed accept, so a persistent error such as running out
/// of file descriptors does not spin the loop.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    Ok(listener)
}

/// Accepts connections forever, handing each one to the pool.
///
/// A failed accept is logged and retried after [`ACCEPT_BACKOFF`].
pub async fn run(listener: TcpListener, pool: &WorkerPool<TcpStream>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                backoff_after_accept_error(&e).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        pool.submit(socket, peer.to_string()).await?;
    }
}

async fn backoff_after_accept_error(e: &std::io::Error) {
    tracing::error!(error = %e, "Failed to accept connection");
    tokio::time::sleep(ACCEPT_BACKOFF).await;
}
