//! Prices command

use super::symbols_or_default;
use crate::app::AppContext;
use crate::format::symbol_format;
use clap::Args;

#[derive(Args, Debug)]
pub struct PricesArgs {
    /// Symbols to price (defaults to the configured list)
    pub symbols: Vec<String>,
}

impl PricesArgs {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let symbols = symbols_or_default(&self.symbols, ctx.config());
        let prices = ctx.binance().prices(&symbols).await?;

        for price in prices {
            println!(
                "{:<10} {}",
                symbol_format(&price.symbol),
                ctx.formatter().format(Some(price.price))
            );
        }
        Ok(())
    }
}
