//! Table cell helpers

use std::fmt::Display;

/// Strip the quote asset (and leveraged-token suffix) from a symbol
///
/// Only the first occurrence of each suffix is removed, so `BTCUSDT`
/// renders as `BTC` and `ETHUPUSDT` as `ETH`.
pub fn symbol_format(symbol: &str) -> String {
    symbol
        .replacen("UPUSDT", "", 1)
        .replacen("DOWNUSDT", "", 1)
        .replacen("USDT", "", 1)
}

/// Render a percentage cell, e.g. `2.5 %`
pub fn percentage_format(value: impl Display) -> String {
    format!("{} %", value)
}

/// Pad single digit numbers with a leading zero
pub fn padding_zero(num: u32) -> String {
    format!("{:02}", num)
}
