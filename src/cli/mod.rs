//! CLI interface for coin-panel
//!
//! Provides subcommands for:
//! - `top`: 24h movers board with 5m/10m columns
//! - `watch`: live board from the WebSocket ticker streams
//! - `prices`: latest prices for a few symbols
//! - `window`: rolling window change for a few symbols
//! - `pairs`: tradable pairs on an exchange
//! - `candles`: Bitget candle history
//! - `format`: run the price formatter on raw values
//! - `proxy`: check a proxy before using it
//! - `ping`: exchange connectivity
//! - `config`: show the effective configuration

mod candles;
mod format;
mod pairs;
mod ping;
mod prices;
mod proxy;
mod top;
mod watch;
mod window;

pub use candles::CandlesArgs;
pub use format::FormatArgs;
pub use pairs::PairsArgs;
pub use ping::PingArgs;
pub use prices::PricesArgs;
pub use proxy::ProxyArgs;
pub use top::TopArgs;
pub use watch::WatchArgs;
pub use window::WindowArgs;

use crate::config::Config;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "coin-panel")]
#[command(about = "Terminal price dashboard for Binance and Bitget spot tickers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the 24h movers board
    Top(TopArgs),
    /// Stream a live board
    Watch(WatchArgs),
    /// Show latest prices
    Prices(PricesArgs),
    /// Show price change over a rolling window
    Window(WindowArgs),
    /// List tradable pairs
    Pairs(PairsArgs),
    /// Show Bitget candle history
    Candles(CandlesArgs),
    /// Format raw price values
    Format(FormatArgs),
    /// Check a proxy
    Proxy(ProxyArgs),
    /// Check exchange connectivity
    Ping(PingArgs),
    /// Show configuration
    Config,
}

/// Symbols from the command line, or the configured ones when none given
pub(crate) fn symbols_or_default(symbols: &[String], config: &Config) -> Vec<String> {
    let list = if symbols.is_empty() {
        &config.dashboard.symbols
    } else {
        symbols
    };
    list.iter().map(|s| s.to_uppercase()).collect()
}

/// Print the effective configuration
pub fn print_config(config: &Config) {
    println!("Current configuration:");
    println!(
        "  Binance: {} / {} (quote {})",
        config.binance.rest_url, config.binance.ws_url, config.binance.quote_asset
    );
    println!("  Bitget: {} / {}", config.bitget.rest_url, config.bitget.ws_url);
    match config.proxy.active_url() {
        Some(url) => println!("  Proxy: {}", url),
        None => println!("  Proxy: off"),
    }
    println!(
        "  Poll: {}ms between requests, refresh every {}s",
        config.poll.request_delay_ms, config.poll.refresh_interval_secs
    );
    println!(
        "  Dashboard: {} (limit {}, small prices {:?})",
        config.dashboard.symbols.join(","),
        config.dashboard.limit,
        config.dashboard.small_number_style
    );
}
