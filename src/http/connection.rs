use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::http::parser::{parse_http_request, read_request};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::router;

/// Drives exactly one request/response exchange, then closes.
///
/// `peer` comes from `accept`, which resolves it together with the socket.
pub struct Connection<S> {
    stream: S,
    peer: SocketAddr,
    config: Arc<ServerConfig>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, config: Arc<ServerConfig>) -> Self {
        Self {
            stream,
            peer,
            config,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let peer = self.peer;
        debug!(peer = %peer, "Client connected");

        let result = self.drive(peer).await;

        // The socket is closed whatever happened above.
        if let Err(e) = self.stream.shutdown().await {
            debug!(peer = %peer, error = %e, "shutdown failed");
        }

        result
    }

    async fn drive(&mut self, peer: SocketAddr) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    let req = self.read_request().await;
                    if req.invalid {
                        warn!(peer = %peer, "Invalid request, no response sent");
                        self.state = ConnectionState::Closed;
                    } else {
                        self.state = ConnectionState::Processing(req);
                    }
                }

                ConnectionState::Processing(req) => {
                    debug!(
                        peer = %peer,
                        method = %req.method,
                        path = %req.path,
                        version = %req.version,
                        host = ?req.host,
                        user_agent = ?req.user_agent,
                        accept = ?req.accept,
                        content_type = ?req.content_type,
                        content_length = req.content_length(),
                        body_len = req.body.len(),
                        "Parsed request"
                    );

                    let response = router::handle_request(req, &self.config).await;
                    info!(
                        peer = %peer,
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Sending response"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    writer
                        .write_to_stream(&mut self.stream)
                        .await
                        .context("failed to send response")?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// One capped read, parsed. A failed read gives an invalid request.
    pub async fn read_request(&mut self) -> Request {
        match read_request(&mut self.stream).await {
            Ok(buf) => parse_http_request(&buf),
            Err(e) => {
                warn!(error = %e, "Failed to read request from the client");
                Request::invalid()
            }
        }
    }
}
