//! Pairs command

use crate::app::AppContext;
use crate::ticker::Exchange;
use clap::Args;

#[derive(Args, Debug)]
pub struct PairsArgs {
    /// Exchange to list
    #[arg(short, long, default_value = "binance")]
    pub exchange: Exchange,

    /// Only pairs quoted in this asset
    #[arg(short, long)]
    pub quote: Option<String>,
}

impl PairsArgs {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let quote = self.quote.as_deref().map(str::to_uppercase);
        let quoted = |q: &str| quote.as_deref().map_or(true, |want| want == q);

        let pairs: Vec<String> = match self.exchange {
            Exchange::Binance => ctx
                .binance()
                .exchange_symbols()
                .await?
                .into_iter()
                .filter(|s| s.is_trading() && quoted(&s.quote_asset))
                .map(|s| s.symbol)
                .collect(),
            Exchange::Bitget => ctx
                .bitget()
                .trading_pairs()
                .await?
                .into_iter()
                .filter(|p| p.is_online() && quoted(&p.quote_coin))
                .map(|p| p.symbol)
                .collect(),
        };

        for pair in &pairs {
            println!("{}", pair);
        }
        tracing::info!(exchange = %self.exchange, count = pairs.len(), "Listed pairs");
        Ok(())
    }
}
