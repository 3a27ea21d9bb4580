use clap::Parser;
use feedstore::MemoryBackend;
use feedstore_server::{ServerConfig, run_server_with_config};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Requests a single connection may have in flight
    #[arg(long, default_value_t = 256)]
    max_concurrent_requests: usize,

    /// Largest accepted request frame in bytes
    #[arg(long, default_value_t = 8 * 1024 * 1024)]
    max_frame_length: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedstore_server=info,feedstore=info,info".into()),
        )
        .init();

    let args = Args::parse();

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Opening in-memory feed store");
    let backend = Arc::new(MemoryBackend::new());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl_c signal: {}", e);
        }
    };

    let config = ServerConfig::default()
        .with_max_concurrent_requests(args.max_concurrent_requests)
        .with_max_frame_length(args.max_frame_length);

    run_server_with_config(listener, backend, config, Box::pin(shutdown)).await?;

    Ok(())
}
