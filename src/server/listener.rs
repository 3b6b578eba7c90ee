use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::http::connection::Connection;

/// Pending-connection queue length handed to `listen`.
pub const CONNECTION_BACKLOG: u32 = 5;

/// Owns the listening socket for the life of the server.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Binds with `SO_REUSEADDR` and a backlog of [`CONNECTION_BACKLOG`].
    pub async fn bind(addr: &str) -> anyhow::Result<Self> {
        let addr = tokio::net::lookup_host(addr)
            .await
            .with_context(|| format!("resolving listen address {addr}"))?
            .next()
            .with_context(|| format!("no address for {addr}"))?;

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .context("socket creation failed")?;

        socket.set_reuseaddr(true).context("setsockopt failed")?;
        socket
            .bind(addr)
            .with_context(|| format!("bind to {addr} failed"))?;
        let inner = socket.listen(CONNECTION_BACKLOG).context("listen failed")?;

        Ok(Self { inner })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.inner.local_addr()?)
    }

    pub async fn accept(&self) -> std::io::Result<(TcpStream, SocketAddr)> {
        self.inner.accept().await
    }

    /// Accepts forever, one detached task per connection. Accept failures
    /// are logged and the loop carries on.
    pub async fn serve(self, cfg: Arc<ServerConfig>) -> anyhow::Result<()> {
        loop {
            let (socket, peer) = match self.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    error!(error = %e, "client accept failed");
                    continue;
                }
            };
            info!("Accepted connection from {}", peer);

            let config = Arc::clone(&cfg);
            tokio::spawn(async move {
                let mut conn = Connection::new(socket, peer, config);
                if let Err(e) = conn.run().await {
                    error!("Connection error from {}: {:#}", peer, e);
                }
            });
        }
    }
}

pub async fn run(cfg: Arc<ServerConfig>) -> anyhow::Result<()> {
    let listener = Listener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    info!("Serving directory: {}", cfg.directory);

    listener.serve(cfg).await
}
