//! Transport layer for the feedstore client
//!
//! - `rpc` - async tarpc client
//! - `blocking` - `FeedBackend` adapter driving the RPC client on its own runtime

pub mod blocking;
pub mod rpc;
