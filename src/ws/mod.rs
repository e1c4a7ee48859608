//! Supervised WebSocket connections for the ticker streams
//!
//! A connection runs in its own task and reports frames and lifecycle
//! events on an mpsc channel. Failed sessions are retried with exponential
//! backoff. An optional outgoing channel carries subscribe requests and
//! text pings.

mod client;
mod types;

pub use client::WsClient;
pub use types::{Backoff, WsConfig, WsError, WsEvent};
