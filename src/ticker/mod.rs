//! Normalized ticker data
//!
//! Both exchanges are mapped into these shapes before anything is displayed.

mod types;

pub use types::{sort_by_change_desc, Exchange, SymbolChange, TickerPrice, TickerUpdate};

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Trait for streaming ticker implementations
#[async_trait]
pub trait TickerFeed: Send + Sync {
    /// Subscribe to ticker updates
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<TickerUpdate>>;
}
