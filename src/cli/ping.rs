//! Ping command: exchange connectivity

use crate::app::AppContext;
use chrono::Utc;
use clap::Args;
use std::time::Instant;

#[derive(Args, Debug)]
pub struct PingArgs {}

impl PingArgs {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let binance = ctx.binance();

        let started = Instant::now();
        binance.ping().await?;
        println!("Binance {}: {:?}", binance.base_url(), started.elapsed());

        let server_time = binance.server_time().await?;
        let skew = Utc::now() - server_time;
        println!(
            "  Server time: {} (local skew {}ms)",
            server_time.to_rfc3339(),
            skew.num_milliseconds()
        );

        let started = Instant::now();
        match ctx.bitget().tickers(Some("BTCUSDT")).await {
            Ok(_) => println!("Bitget: {:?}", started.elapsed()),
            Err(e) => println!("Bitget: unreachable ({})", e),
        }
        Ok(())
    }
}
