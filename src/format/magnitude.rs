//! Magnitude-aware price formatting
//!
//! Prices with magnitude at or above 0.001 are rendered with a fixed number of
//! fractional digits. Anything smaller would be mostly zeros at that
//! precision, so it keeps its first significant digits behind a
//! [`CompactMarker`] instead (or scientific notation, when configured).
//!
//! The zero run and significant digits are read from the input's own text,
//! never from a re-stringified float, so exchange price strings keep their
//! exact digits.

use super::marker::CompactMarker;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::borrow::Cow;

/// Fractional digits for fixed output, matching exchange tick sizes
pub const DEFAULT_FRACTION_DIGITS: usize = 5;

/// Significant digits kept for values below 0.001
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 3;

/// Values whose magnitude times this scale is below 1 count as very small
const SMALL_SCALE: f64 = 1000.0;

/// How values below 0.001 are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmallNumberStyle {
    /// `0.0{3}123`
    #[default]
    Marker,
    /// `1.23e-4`
    Scientific,
}

/// A price as it arrives at the display boundary
#[derive(Debug, Clone, PartialEq)]
pub enum PriceInput<'a> {
    /// Native number
    Number(f64),
    /// Numeric text, e.g. an exchange price string
    Text(Cow<'a, str>),
    /// Exact decimal
    Decimal(Decimal),
}

impl From<f64> for PriceInput<'_> {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

impl From<i64> for PriceInput<'_> {
    fn from(value: i64) -> Self {
        PriceInput::Number(value as f64)
    }
}

impl From<Decimal> for PriceInput<'_> {
    fn from(value: Decimal) -> Self {
        PriceInput::Decimal(value)
    }
}

impl<'a> From<&'a str> for PriceInput<'a> {
    fn from(value: &'a str) -> Self {
        PriceInput::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for PriceInput<'a> {
    fn from(value: &'a String) -> Self {
        PriceInput::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for PriceInput<'_> {
    fn from(value: String) -> Self {
        PriceInput::Text(Cow::Owned(value))
    }
}

impl PriceInput<'_> {
    /// Parsed value plus the plain decimal text the digit split reads from
    ///
    /// Returns `None` for empty, unparseable, or non-finite input.
    fn resolve(&self) -> Option<(f64, Cow<'_, str>)> {
        match self {
            PriceInput::Number(value) => {
                if !value.is_finite() {
                    return None;
                }
                Some((*value, Cow::Owned(value.to_string())))
            }
            PriceInput::Decimal(value) => Some((value.to_f64()?, Cow::Owned(value.to_string()))),
            PriceInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let value: f64 = trimmed.parse().ok()?;
                if !value.is_finite() {
                    return None;
                }
                // Exponent notation has no fractional digits to split
                if trimmed.contains(|c: char| c == 'e' || c == 'E') {
                    Some((value, Cow::Owned(value.to_string())))
                } else {
                    Some((value, Cow::Borrowed(trimmed)))
                }
            }
        }
    }
}

/// Formats prices into compact strings for ticker tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnitudeFormatter {
    fraction_digits: usize,
    significant_digits: usize,
    small_style: SmallNumberStyle,
}

impl Default for MagnitudeFormatter {
    fn default() -> Self {
        Self {
            fraction_digits: DEFAULT_FRACTION_DIGITS,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
            small_style: SmallNumberStyle::Marker,
        }
    }
}

impl MagnitudeFormatter {
    /// Create a formatter with 5 fractional digits and the marker style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendering style for values below 0.001
    pub fn small_style(mut self, style: SmallNumberStyle) -> Self {
        self.small_style = style;
        self
    }

    /// Set the number of fractional digits for fixed output
    pub fn fraction_digits(mut self, digits: usize) -> Self {
        self.fraction_digits = digits;
        self
    }

    /// Set how many significant digits small values keep (at least 1)
    pub fn significant_digits(mut self, digits: usize) -> Self {
        self.significant_digits = digits.max(1);
        self
    }

    /// Format an optional price
    ///
    /// Absent or unparseable input yields an empty string.
    pub fn format<'a>(&self, price: Option<impl Into<PriceInput<'a>>>) -> String {
        match price {
            Some(price) => self.format_input(&price.into()),
            None => String::new(),
        }
    }

    /// Format a price that is known to be present
    pub fn format_input(&self, input: &PriceInput<'_>) -> String {
        let Some((value, text)) = input.resolve() else {
            return String::new();
        };

        // Also catches negative zero and text below the f64 range
        if value == 0.0 {
            return match self.marker(&text) {
                Some(marker) => self.small_from_marker(&marker),
                None => self.fixed(0.0),
            };
        }

        if value.abs() * SMALL_SCALE >= 1.0 {
            return self.fixed(value);
        }

        match self.small_style {
            SmallNumberStyle::Marker => match self.marker(&text) {
                Some(marker) => marker.to_string(),
                None => self.fixed(value),
            },
            SmallNumberStyle::Scientific => {
                format!("{:.*e}", self.significant_digits - 1, value)
            }
        }
    }

    /// Split the fractional text into its zero run and significant digits
    ///
    /// Returns `None` when there is no fractional part or it is all zeros.
    pub fn marker(&self, text: &str) -> Option<CompactMarker> {
        let negative = text.starts_with('-');
        let (_, fractional) = text.split_once('.')?;
        let end = fractional
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(fractional.len());
        let fractional = &fractional[..end];

        let leading_zeros = fractional.find(|c: char| c != '0')?;
        let digits_end = (leading_zeros + self.significant_digits).min(fractional.len());

        Some(CompactMarker::new(
            negative,
            leading_zeros,
            &fractional[leading_zeros..digits_end],
        ))
    }

    /// Render a value the float parse lost, from its text digits alone
    fn small_from_marker(&self, marker: &CompactMarker) -> String {
        match self.small_style {
            SmallNumberStyle::Marker => marker.to_string(),
            SmallNumberStyle::Scientific => {
                let mut digits = marker.digits.chars();
                let mut out = String::new();
                if marker.negative {
                    out.push('-');
                }
                out.extend(digits.next());
                if self.significant_digits > 1 {
                    out.push('.');
                    let rest: String = digits.collect();
                    out.push_str(&format!("{:0<1$}", rest, self.significant_digits - 1));
                }
                out.push_str(&format!("e-{}", marker.leading_zeros + 1));
                out
            }
        }
    }

    fn fixed(&self, value: f64) -> String {
        format!("{:.*}", self.fraction_digits, value)
    }
}

/// Format a price with the default formatter
pub fn format_price<'a>(price: Option<impl Into<PriceInput<'a>>>) -> String {
    MagnitudeFormatter::default().format(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn decode(formatted: &str) -> CompactMarker {
        formatted.parse().unwrap()
    }

    #[test]
    fn test_absent_is_empty() {
        assert_eq!(format_price(None::<f64>), "");
        assert_eq!(format_price(None::<&str>), "");
    }

    #[test]
    fn test_unparseable_is_empty() {
        assert_eq!(format_price(Some("abc")), "");
        assert_eq!(format_price(Some("")), "");
        assert_eq!(format_price(Some("   ")), "");
        assert_eq!(format_price(Some("12.5.3")), "");
    }

    #[test]
    fn test_non_finite_is_empty() {
        assert_eq!(format_price(Some(f64::NAN)), "");
        assert_eq!(format_price(Some(f64::INFINITY)), "");
        assert_eq!(format_price(Some("inf")), "");
        assert_eq!(format_price(Some("NaN")), "");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_price(Some(0.0)), "0.00000");
        assert_eq!(format_price(Some(0_i64)), "0.00000");
        assert_eq!(format_price(Some("0")), "0.00000");
        assert_eq!(format_price(Some("0.000000")), "0.00000");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_price(Some(-0.0)), "0.00000");
        assert_eq!(format_price(Some("-0.00")), "0.00000");
    }

    #[test]
    fn test_text_below_float_range_keeps_marker() {
        let input = format!("0.{}5", "0".repeat(400));
        let expected = "0.0{400}5";
        assert_eq!(format_price(Some(input.as_str())), expected);

        let negative = format!("-{}", input);
        assert_eq!(format_price(Some(negative.as_str())), format!("-{}", expected));

        let marker = decode(expected);
        assert_eq!(marker.leading_zeros, 400);
        assert_eq!(marker.digits, "5");
    }

    #[test]
    fn test_text_below_float_range_scientific() {
        let input = format!("0.{}12345", "0".repeat(400));
        let formatter = MagnitudeFormatter::new().small_style(SmallNumberStyle::Scientific);
        assert_eq!(formatter.format(Some(input.as_str())), "1.23e-401");

        let single = MagnitudeFormatter::new()
            .small_style(SmallNumberStyle::Scientific)
            .significant_digits(1);
        assert_eq!(single.format(Some(input.as_str())), "1e-401");

        let short = format!("-0.{}5", "0".repeat(400));
        assert_eq!(formatter.format(Some(short.as_str())), "-5.00e-401");
        assert_eq!(formatter.format(Some("0.0000")), "0.00000");
    }

    #[test]
    fn test_large_values_fixed() {
        assert_eq!(format_price(Some(1234.5)), "1234.50000");
        assert_eq!(format_price(Some("43251.87000000")), "43251.87000");
        assert_eq!(format_price(Some(1.0)), "1.00000");
    }

    #[test]
    fn test_sub_one_values_fixed() {
        assert_eq!(format_price(Some(0.5)), "0.50000");
        assert_eq!(format_price(Some("0.123456")), "0.12346");
        assert_eq!(format_price(Some(0.001)), "0.00100");
    }

    #[test]
    fn test_small_value_marker() {
        let formatted = format_price(Some(0.00012345));
        assert_eq!(formatted, "0.0{3}123");

        let marker = decode(&formatted);
        assert_eq!(marker.leading_zeros, 3);
        assert_eq!(marker.digits, "123");
    }

    #[test]
    fn test_small_value_from_exchange_string() {
        assert_eq!(format_price(Some("0.00000008035")), "0.0{7}803");
        assert_eq!(format_price(Some("0.00000080")), "0.0{6}80");
        assert_eq!(format_price(Some("0.000999")), "0.0{3}999");
    }

    #[test]
    fn test_marker_digits_truncated_at_string_end() {
        assert_eq!(format_price(Some("0.00001")), "0.0{4}1");
        assert_eq!(format_price(Some("0.000012")), "0.0{4}12");
    }

    #[test]
    fn test_marker_uses_original_text() {
        // More digits than an f64 can hold; the split still reads the text
        let formatted = format_price(Some("0.000123999999999999999999"));
        assert_eq!(formatted, "0.0{3}123");
    }

    #[test]
    fn test_exponent_text() {
        assert_eq!(format_price(Some("1e-7")), "0.0{6}1");
        assert_eq!(format_price(Some("2.5E3")), "2500.00000");
    }

    #[test]
    fn test_decimal_input() {
        assert_eq!(format_price(Some(dec!(0.00012345))), "0.0{3}123");
        assert_eq!(format_price(Some(dec!(67000.1))), "67000.10000");
    }

    #[test]
    fn test_negative_keeps_sign() {
        assert_eq!(format_price(Some(-0.5)), "-0.50000");
        assert_eq!(format_price(Some(-1234.5)), "-1234.50000");

        let formatted = format_price(Some(-0.00012345));
        assert_eq!(formatted, "-0.0{3}123");
        let marker = decode(&formatted);
        assert!(marker.negative);
        assert_eq!(marker.leading_zeros, 3);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(format_price(Some(" 42 ")), "42.00000");
    }

    #[test]
    fn test_idempotent_fixed_output() {
        for input in ["1234.5", "0.5", "0", "0.001", "98765.432109", "-3.2"] {
            let once = format_price(Some(input));
            let twice = format_price(Some(once.as_str()));
            assert_eq!(once, twice, "input {}", input);
        }
    }

    #[test]
    fn test_marker_round_trips_to_value() {
        let formatted = format_price(Some("0.00012345"));
        assert_eq!(decode(&formatted).to_decimal(), Some(dec!(0.000123)));
    }

    #[test]
    fn test_scientific_style() {
        let formatter = MagnitudeFormatter::new().small_style(SmallNumberStyle::Scientific);
        assert_eq!(formatter.format(Some(0.00012345)), "1.23e-4");
        assert_eq!(formatter.format(Some(0.5)), "0.50000");
        assert_eq!(formatter.format(Some(0.0)), "0.00000");
    }

    #[test]
    fn test_custom_digits() {
        let formatter = MagnitudeFormatter::new()
            .fraction_digits(2)
            .significant_digits(2);
        assert_eq!(formatter.format(Some(1234.567)), "1234.57");
        assert_eq!(formatter.format(Some("0.00012345")), "0.0{3}12");
    }

    #[test]
    fn test_significant_digits_minimum() {
        let formatter = MagnitudeFormatter::new().significant_digits(0);
        assert_eq!(formatter.format(Some("0.00012345")), "0.0{3}1");
    }

    #[test]
    fn test_marker_none_without_fraction() {
        let formatter = MagnitudeFormatter::new();
        assert!(formatter.marker("0").is_none());
        assert!(formatter.marker("0.0000").is_none());
    }
}
