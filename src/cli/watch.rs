//! Watch command: live board from the ticker streams

use super::symbols_or_default;
use crate::app::AppContext;
use crate::dashboard::render_table;
use crate::ticker::Exchange;
use clap::Args;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Symbols to stream (defaults to the configured list)
    pub symbols: Vec<String>,

    /// Exchange to stream from
    #[arg(short, long, default_value = "binance")]
    pub exchange: Exchange,

    /// Stop after this many updates
    #[arg(long)]
    pub count: Option<usize>,
}

impl WatchArgs {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let symbols = symbols_or_default(&self.symbols, ctx.config());
        let feed = ctx.feed(self.exchange, symbols);
        let mut updates = feed.subscribe().await?;

        let mut board = ctx.board();
        let mut seen = 0usize;
        let mut redraw = tokio::time::interval(std::time::Duration::from_secs(1));
        let mut dirty = false;

        loop {
            tokio::select! {
                update = updates.recv() => {
                    let Some(update) = update else {
                        tracing::warn!("Ticker stream ended");
                        break;
                    };
                    tracing::trace!(symbol = %update.symbol, price = %update.last_price, "Ticker update");
                    board.apply_update(&update);
                    dirty = true;
                    seen += 1;
                    if self.count.is_some_and(|count| seen >= count) {
                        break;
                    }
                }
                _ = redraw.tick() => {
                    if dirty {
                        print!("{}", render_table(&board.rows(), ctx.formatter()));
                        println!();
                        dirty = false;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    break;
                }
            }
        }

        if dirty {
            print!("{}", render_table(&board.rows(), ctx.formatter()));
        }
        Ok(())
    }
}
