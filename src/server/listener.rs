use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::info;

use crate::http::connection::Connection;
use crate::server::router::Router;

const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// The server: a route table plus the connection policy knobs.
///
/// Constructed once, then shared immutably by every connection task.
pub struct Server {
    router: Arc<Router>,
    idle_timeout: Duration,
    max_connections: Option<usize>,
}

impl Server {
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_connections: None,
        }
    }

    /// Sets how long an idle connection may wait for its next request.
    pub fn idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Caps the number of concurrently served connections.
    ///
    /// Without a cap, every accepted connection is spawned immediately and
    /// the number of in-flight connections is unbounded.
    pub fn max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = Some(max_connections);
        self
    }

    /// Binds the address and serves until the accept loop fails.
    pub async fn run(&self, listen_addr: &str) -> anyhow::Result<()> {
        let listener = TcpListener::bind(listen_addr).await?;
        info!("Listening on {}", listen_addr);
        self.serve(listener).await
    }

    /// Serves connections from an already-bound listener.
    ///
    /// Spawns one task per accepted connection; when a connection cap is
    /// configured, accepting waits for a free permit. Connection errors are
    /// logged and never propagate out of the accept loop.
    pub async fn serve(&self, listener: TcpListener) -> anyhow::Result<()> {
        let permits = self
            .max_connections
            .map(|n| Arc::new(Semaphore::new(n)));

        loop {
            let (socket, peer) = listener.accept().await?;
            let permit = match &permits {
                Some(semaphore) => Some(semaphore.clone().acquire_owned().await?),
                None => None,
            };
            tracing::debug!("Accepted connection from {}", peer);

            let router = self.router.clone();
            let idle_timeout = self.idle_timeout;
            tokio::spawn(async move {
                let mut conn = Connection::new(socket, router, idle_timeout);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {:#}", peer, e);
                }
                drop(permit);
            });
        }
    }
}
