//! Board state: one row per symbol, merged from snapshots and streams

use crate::binance::WindowSize;
use crate::telemetry::{set_gauge, GaugeMetric};
use crate::ticker::{SymbolChange, TickerUpdate};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Short window columns shown next to the 24h change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowColumn {
    FiveMinutes,
    TenMinutes,
}

impl WindowColumn {
    pub const ALL: [WindowColumn; 2] = [WindowColumn::FiveMinutes, WindowColumn::TenMinutes];

    /// Rolling window requested for this column
    pub fn window_size(self) -> WindowSize {
        let minutes = match self {
            WindowColumn::FiveMinutes => 5,
            WindowColumn::TenMinutes => 10,
        };
        WindowSize::minutes(minutes).unwrap_or_default()
    }
}

/// Rows keyed by symbol
#[derive(Debug, Clone, Default)]
pub struct Board {
    rows: HashMap<String, SymbolChange>,
    limit: Option<usize>,
}

impl Board {
    /// Create a board showing at most `limit` rows (0 = all)
    pub fn new(limit: usize) -> Self {
        Self {
            rows: HashMap::new(),
            limit: (limit > 0).then_some(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace all rows with a fresh snapshot
    ///
    /// Window columns already known for a symbol are carried over until the
    /// next window refresh.
    pub fn load_snapshot(&mut self, snapshot: Vec<SymbolChange>) {
        let mut rows = HashMap::with_capacity(snapshot.len());
        for mut row in snapshot {
            if let Some(old) = self.rows.get(&row.symbol) {
                row.m5_change_percent = row.m5_change_percent.or(old.m5_change_percent);
                row.m10_change_percent = row.m10_change_percent.or(old.m10_change_percent);
            }
            rows.insert(row.symbol.clone(), row);
        }
        self.rows = rows;
        set_gauge(GaugeMetric::BoardRows, self.rows.len() as f64);
    }

    /// Fill one window column from rolling window results
    ///
    /// Symbols not on the board are ignored.
    pub fn apply_window(&mut self, column: WindowColumn, changes: &[SymbolChange]) {
        for change in changes {
            if let Some(row) = self.rows.get_mut(&change.symbol) {
                let percent = Some(change.price_change_percent);
                match column {
                    WindowColumn::FiveMinutes => row.m5_change_percent = percent,
                    WindowColumn::TenMinutes => row.m10_change_percent = percent,
                }
            }
        }
    }

    /// Apply a streamed update, adding the symbol if it is new
    pub fn apply_update(&mut self, update: &TickerUpdate) {
        let change = update.change_percent();
        match self.rows.get_mut(&update.symbol) {
            Some(row) => {
                row.last_price = update.last_price;
                if let Some(change) = change {
                    row.price_change_percent = change;
                }
            }
            None => {
                let row = SymbolChange::new(
                    update.symbol.clone(),
                    update.last_price,
                    change.unwrap_or(Decimal::ZERO),
                );
                self.rows.insert(update.symbol.clone(), row);
                set_gauge(GaugeMetric::BoardRows, self.rows.len() as f64);
            }
        }
    }

    /// Visible rows, biggest 24h gainers first
    pub fn rows(&self) -> Vec<SymbolChange> {
        let mut rows: Vec<SymbolChange> = self.rows.values().cloned().collect();
        // Ties fall back to the symbol so redraws don't shuffle rows
        rows.sort_by(|a, b| {
            b.price_change_percent
                .cmp(&a.price_change_percent)
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
        rows
    }

    /// Symbols of the visible rows, in display order
    pub fn symbols(&self) -> Vec<String> {
        self.rows().into_iter().map(|r| r.symbol).collect()
    }
}
