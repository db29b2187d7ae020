//! Fixed-size connection worker pool.
//!
//! `size` workers pull accepted streams from one bounded queue and run each
//! connection to completion before taking the next. There are no read or
//! write timeouts: a peer that stalls mid-request keeps its worker busy, and
//! once every worker is stalled new connections wait in the queue.

use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

use crate::http::connection::Connection;
use crate::site::Site;

struct Job<S> {
    stream: S,
    peer: String,
}

pub struct WorkerPool<S> {
    sender: mpsc::Sender<Job<S>>,
    workers: Vec<JoinHandle<()>>,
}

impl<S> WorkerPool<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    /// Spawns `size` workers behind a queue holding up to `queue_capacity`
    /// waiting connections.
    pub fn new(size: usize, queue_capacity: usize, site: Site) -> Self {
        let (sender, receiver) = mpsc::channel::<Job<S>>(queue_capacity.max(1));
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size)
            .map(|id| {
                let receiver = Arc::clone(&receiver);
                let site = site.clone();
                tokio::spawn(worker_loop(id, receiver, site))
            })
            .collect();

        tracing::info!(workers = size, queue_capacity, "Worker pool started");

        Self { sender, workers }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Hands a connection to the pool, waiting only while the queue is full.
    pub async fn submit(&self, stream: S, peer: impl Into<String>) -> anyhow::Result<()> {
        self.sender
            .send(Job {
                stream,
                peer: peer.into(),
            })
            .await
            .map_err(|_| anyhow::anyhow!("worker pool is shut down"))
    }

    /// Stops accepting work, lets queued connections finish and joins the workers.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        drop(self.sender);
        for worker in self.workers {
            worker.await.context("worker task panicked")?;
        }
        Ok(())
    }
}

async fn worker_loop<S>(id: usize, receiver: Arc<Mutex<mpsc::Receiver<Job<S>>>>, site: Site)
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    loop {
        let job = receiver.lock().await.recv().await;
        let Some(Job { stream, peer }) = job else {
            break;
        };

        tracing::debug!(worker = id, peer = %peer, "Handling connection");

        let mut conn = Connection::new(stream, site.clone());
        if let Err(e) = conn.run().await {
            tracing::error!("Connection error from {}: {}", peer, e);
        }
    }

    tracing::debug!(worker = id, "Worker stopped");
}
