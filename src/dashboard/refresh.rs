//! Window column refresh through the request queue

use super::board::{Board, WindowColumn};
use crate::binance::{BinanceClient, MAX_WINDOW_SYMBOLS};
use crate::schedule::RequestQueue;

/// Fetch the 5m and 10m columns for every visible symbol
///
/// Symbols are requested in chunks the exchange accepts, one request at a
/// time through `queue`. Failed chunks are logged and skipped; the number of
/// failed requests is returned.
pub async fn refresh_windows(
    board: &mut Board,
    client: &BinanceClient,
    queue: &RequestQueue,
) -> usize {
    let symbols = board.symbols();
    if symbols.is_empty() {
        return 0;
    }

    let tasks: Vec<(WindowColumn, Vec<String>)> = WindowColumn::ALL
        .iter()
        .flat_map(|&column| {
            symbols
                .chunks(MAX_WINDOW_SYMBOLS)
                .map(move |chunk| (column, chunk.to_vec()))
        })
        .collect();

    tracing::debug!(
        symbols = symbols.len(),
        requests = tasks.len(),
        "Refreshing window columns"
    );

    let results = queue
        .run(tasks, |(column, chunk)| async move {
            let result = client.window_prices(&chunk, &column.window_size()).await;
            (column, result)
        })
        .await;

    let mut failed = 0;
    for (column, result) in results {
        match result {
            Ok(rows) => board.apply_window(column, &rows),
            Err(e) => {
                failed += 1;
                tracing::warn!(?column, error = %e, "Window refresh failed");
            }
        }
    }
    failed
}
