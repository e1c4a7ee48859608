//! Top command: the 24h movers board

use crate::app::AppContext;
use crate::dashboard::{refresh_windows, render_table, Board};
use crate::ticker::Exchange;
use clap::Args;

#[derive(Args, Debug)]
pub struct TopArgs {
    /// Exchange to read from
    #[arg(short, long, default_value = "binance")]
    pub exchange: Exchange,

    /// Maximum rows shown (overrides config, 0 = all)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Skip the 5m/10m columns
    #[arg(long)]
    pub no_windows: bool,

    /// Keep refreshing at the configured interval
    #[arg(short, long)]
    pub follow: bool,
}

impl TopArgs {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let mut board = match self.limit {
            Some(limit) => Board::new(limit),
            None => ctx.board(),
        };
        let windows = !self.no_windows;

        if !self.follow {
            refresh_board(ctx, &mut board, self.exchange, windows).await?;
            print!("{}", render_table(&board.rows(), ctx.formatter()));
            return Ok(());
        }

        let mut interval = tokio::time::interval(ctx.config().poll.refresh_interval());
        loop {
            interval.tick().await;
            if follow_tick(ctx, &mut board, self.exchange, windows).await {
                print!("{}", render_table(&board.rows(), ctx.formatter()));
                println!();
            }
        }
    }
}

/// One refresh of a followed board
///
/// A failed refresh leaves the last rows in place and returns `false`; the
/// next tick tries again.
pub(crate) async fn follow_tick(
    ctx: &AppContext,
    board: &mut Board,
    exchange: Exchange,
    windows: bool,
) -> bool {
    match refresh_board(ctx, board, exchange, windows).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(%exchange, error = %e, rows = board.len(), "Board refresh failed, keeping last rows");
            false
        }
    }
}

/// Reload the 24h snapshot and, for Binance, the window columns
pub(crate) async fn refresh_board(
    ctx: &AppContext,
    board: &mut Board,
    exchange: Exchange,
    windows: bool,
) -> anyhow::Result<()> {
    let snapshot = match exchange {
        Exchange::Binance => ctx.binance().hr24().await?,
        Exchange::Bitget => {
            ctx.bitget()
                .symbol_changes(&ctx.config().binance.quote_asset)
                .await?
        }
    };
    tracing::debug!(%exchange, rows = snapshot.len(), "Loaded 24h snapshot");
    board.load_snapshot(snapshot);

    // Rolling windows are a Binance endpoint
    if windows && exchange == Exchange::Binance {
        let failed = refresh_windows(board, &ctx.binance(), &ctx.queue()).await;
        if failed > 0 {
            tracing::warn!(failed, "Some window columns could not be refreshed");
        }
    }
    Ok(())
}
