//! Window command: change over a rolling window

use super::symbols_or_default;
use crate::app::AppContext;
use crate::binance::{WindowSize, MAX_WINDOW_SYMBOLS};
use crate::dashboard::render_table;
use clap::Args;

#[derive(Args, Debug)]
pub struct WindowArgs {
    /// Symbols to query (defaults to the configured list)
    pub symbols: Vec<String>,

    /// Window size, e.g. 5m, 4h, 1d
    #[arg(short, long, default_value = "5m")]
    pub window: WindowSize,
}

impl WindowArgs {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let symbols = symbols_or_default(&self.symbols, ctx.config());
        let client = ctx.binance();
        let window = &self.window;

        let chunks: Vec<Vec<String>> = symbols
            .chunks(MAX_WINDOW_SYMBOLS)
            .map(<[String]>::to_vec)
            .collect();
        let results = ctx
            .queue()
            .run(chunks, |chunk| {
                let client = &client;
                async move { client.window_prices(&chunk, window).await }
            })
            .await;

        let mut rows = Vec::with_capacity(symbols.len());
        for result in results {
            rows.extend(result?);
        }
        crate::ticker::sort_by_change_desc(&mut rows);

        println!("Change over {}", window);
        print!("{}", render_table(&rows, ctx.formatter()));
        Ok(())
    }
}
