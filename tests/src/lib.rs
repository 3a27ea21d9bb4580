//! Harness for end-to-end tests.
//!
//! `FeedStore` and `RemoteBackend` are blocking, so the server runs on its
//! own runtime in a background thread instead of inside the test.

use feedstore::{FeedStore, MemoryBackend, Result};
use feedstore_client::{ClientConfig, RemoteBackend};
use feedstore_server::run_server;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::oneshot;

pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Start a server over a fresh in-memory backend on an ephemeral port.
    pub fn start() -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let listener = runtime.block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))?;
        let addr = listener.local_addr()?;

        let (tx, rx) = oneshot::channel::<()>();
        let thread = std::thread::Builder::new()
            .name("feedstore-test-server".into())
            .spawn(move || {
                let shutdown = async {
                    let _ = rx.await;
                };
                let backend = Arc::new(MemoryBackend::new());
                if let Err(e) = runtime.block_on(run_server(listener, backend, Box::pin(shutdown))) {
                    eprintln!("test server exited with error: {}", e);
                }
            })?;

        Ok(Self {
            addr,
            shutdown: Some(tx),
            thread: Some(thread),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.addr).with_request_timeout(Duration::from_secs(2))
    }

    /// A new store session backed by this server.
    pub fn store(&self) -> Result<FeedStore> {
        let backend = RemoteBackend::connect(&self.client_config())?;
        FeedStore::builder().backend(Arc::new(backend)).build()
    }

    /// Stop accepting, drop open connections and wait for the server thread.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.stop();
    }
}
