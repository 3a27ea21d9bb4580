//! tarpc transport for the feedstore server

use crate::config::ServerConfig;
use crate::handler::Handler;
use crate::protocol::FeedService;
use feedstore::FeedBackend;
use futures::prelude::*;
use std::net::SocketAddr;
use std::sync::Arc;
use tarpc::server::{BaseChannel, Channel};
use tarpc::tokio_serde::formats::Json;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tracing::{Instrument, debug, error, info, info_span};

/// Serve `backend` on `listener` with default limits until `shutdown` resolves.
pub async fn run_server(
    listener: TcpListener,
    backend: Arc<dyn FeedBackend>,
    shutdown: impl Future<Output = ()> + Unpin + Send + 'static,
) -> anyhow::Result<()> {
    run_server_with_config(listener, backend, ServerConfig::default(), shutdown).await
}

/// Serve `backend` on `listener` until `shutdown` resolves.
///
/// Connections are independent: each gets its own channel, bounded by
/// `config.max_concurrent_requests`, and its own tracing span.
pub async fn run_server_with_config(
    listener: TcpListener,
    backend: Arc<dyn FeedBackend>,
    config: ServerConfig,
    mut shutdown: impl Future<Output = ()> + Unpin + Send + 'static,
) -> anyhow::Result<()> {
    config.validate().map_err(anyhow::Error::msg)?;
    let handler = Handler::new(backend);

    info!(
        "feedstore RPC server listening on {} (max {} requests per connection)",
        listener.local_addr()?,
        config.max_concurrent_requests
    );

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((socket, peer)) => {
                    let span = info_span!("connection", %peer);
                    tokio::spawn(
                        serve_connection(socket, peer, handler.clone(), config.clone())
                            .instrument(span),
                    );
                }
                Err(e) => error!("Accept error: {}", e),
            },
            _ = &mut shutdown => {
                info!("Shutdown signal received, stopping server...");
                break;
            }
        }
    }

    Ok(())
}

async fn serve_connection(
    socket: TcpStream,
    peer: SocketAddr,
    handler: Handler,
    config: ServerConfig,
) {
    debug!("Accepted connection from {}", peer);

    let codec = LengthDelimitedCodec::builder()
        .max_frame_length(config.max_frame_length)
        .new_codec();
    let transport = tarpc::serde_transport::new(Framed::new(socket, codec), Json::default());

    BaseChannel::with_defaults(transport)
        .max_concurrent_requests(config.max_concurrent_requests)
        .execute(handler.serve())
        .for_each(|response| async move {
            tokio::spawn(response.in_current_span());
        })
        .await;

    debug!("Connection from {} closed", peer);
}
