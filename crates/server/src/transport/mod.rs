//! Transport layer for the feedstore server
//!
//! - `rpc` - tarpc over length-delimited JSON frames on TCP

pub mod rpc;
