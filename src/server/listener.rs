use std::io::ErrorKind;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{Config, ServedRoot};
use crate::http::connection::Connection;

/// Binds the configured address, failing with a readable message if the port is taken.
pub async fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let addr = cfg.listen_addr();
    match TcpListener::bind(&addr).await {
        Ok(listener) => Ok(listener),
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            anyhow::bail!("port {} is already in use", cfg.port)
        }
        Err(e) => Err(e).with_context(|| format!("failed to bind {addr}")),
    }
}

/// Resolves the served root, binds, then serves until the task is dropped.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let root = cfg.served_root()?;
    info!("Serving directory {}", root.path().display());

    let listener = bind(cfg).await?;
    info!("Listening on {}", listener.local_addr()?);
    info!("Open http://localhost:{} in a browser", cfg.port);

    serve(listener, root, cfg.max_body_bytes()).await
}

/// Pause after a failed accept (e.g. EMFILE) before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections forever, one task per connection.
///
/// Request bodies larger than `max_body` bytes are refused with 400.
pub async fn serve(listener: TcpListener, root: ServedRoot, max_body: usize) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!(error = %e, "Failed to accept connection");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let root = root.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, root, max_body);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
