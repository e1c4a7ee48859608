//! Candles command

use crate::app::AppContext;
use crate::bitget::Granularity;
use chrono::Utc;
use clap::Args;

#[derive(Args, Debug)]
pub struct CandlesArgs {
    /// Symbol, e.g. BTCUSDT
    pub symbol: String,

    /// Candle interval: 1min, 5min, 15min, 30min, 1h, 4h, 12h, 1day, 1week
    #[arg(short, long, default_value = "1min")]
    pub granularity: Granularity,

    /// Number of candles (at most 200)
    #[arg(short, long, default_value = "20")]
    pub limit: u32,
}

impl CandlesArgs {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let candles = ctx
            .bitget()
            .history_candles(&self.symbol, self.granularity, Utc::now(), self.limit)
            .await?;

        let fmt = ctx.formatter();
        println!(
            "{:<20} {:>16} {:>16} {:>16} {:>16}",
            "Time", "Open", "High", "Low", "Close"
        );
        for candle in &candles {
            println!(
                "{:<20} {:>16} {:>16} {:>16} {:>16}",
                candle.open_time.format("%Y-%m-%d %H:%M"),
                fmt.format(Some(candle.open)),
                fmt.format(Some(candle.high)),
                fmt.format(Some(candle.low)),
                fmt.format(Some(candle.close)),
            );
        }
        Ok(())
    }
}
