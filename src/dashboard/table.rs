//! Plain-text ticker table

use crate::format::{percentage_format, symbol_format, MagnitudeFormatter};
use crate::ticker::SymbolChange;
use rust_decimal::Decimal;

const HEADERS: [&str; 5] = ["Symbol", "Price", "24h", "5m", "10m"];

fn percent_cell(value: Option<Decimal>) -> String {
    value.map(percentage_format).unwrap_or_default()
}

/// Render rows as a fixed-width table, one line per row
///
/// The symbol column is left aligned, the rest right aligned. Missing window
/// values render as empty cells.
pub fn render_table(rows: &[SymbolChange], formatter: &MagnitudeFormatter) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                symbol_format(&row.symbol),
                formatter.format(Some(row.last_price)),
                percentage_format(row.price_change_percent),
                percent_cell(row.m5_change_percent),
                percent_cell(row.m10_change_percent),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    for line in &cells {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == 0 {
            line.push_str(&format!("{:<width$}", cell, width = width));
        } else {
            line.push_str(&format!("  {:>width$}", cell, width = width));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
