//! Display formatting for ticker tables
//!
//! Provides the magnitude-aware price formatter plus the small helpers the
//! table renderer uses for symbols and percentages.

mod cell;
mod magnitude;
mod marker;

pub use cell::{padding_zero, percentage_format, symbol_format};
pub use magnitude::{
    format_price, MagnitudeFormatter, PriceInput, SmallNumberStyle, DEFAULT_FRACTION_DIGITS,
    DEFAULT_SIGNIFICANT_DIGITS,
};
pub use marker::{CompactMarker, MarkerParseError};
