//! Integration tests for price formatting

use coin_panel::format::{format_price, CompactMarker, MagnitudeFormatter, SmallNumberStyle};
use rust_decimal_macros::dec;

#[test]
fn test_missing_and_garbage_input() {
    assert_eq!(format_price(None::<f64>), "");
    assert_eq!(format_price(Some("abc")), "");
    assert_eq!(format_price(Some("")), "");
    assert_eq!(format_price(Some(f64::NAN)), "");
}

#[test]
fn test_fixed_fraction_values() {
    assert_eq!(format_price(Some(0_i64)), "0.00000");
    assert_eq!(format_price(Some(1234.5)), "1234.50000");
    assert_eq!(format_price(Some(0.5)), "0.50000");
    assert_eq!(format_price(Some("0.001")), "0.00100");
    assert_eq!(format_price(Some(-2.25)), "-2.25000");
}

#[test]
fn test_small_values_keep_significant_digits() {
    let formatted = format_price(Some("0.00012345"));
    let marker: CompactMarker = formatted.parse().unwrap();
    assert_eq!(marker.leading_zeros, 3);
    assert_eq!(marker.digits, "123");
    assert!(!marker.negative);

    let formatted = format_price(Some("-0.000000803"));
    let marker: CompactMarker = formatted.parse().unwrap();
    assert!(marker.negative);
    assert_eq!(marker.leading_zeros, 6);
    assert_eq!(marker.digits, "803");
}

#[test]
fn test_exchange_string_prices() {
    // Prices as Binance sends them
    assert_eq!(format_price(Some("42000.10000000")), "42000.10000");
    assert_eq!(format_price(Some("0.00000102")), "0.0{5}102");
    assert_eq!(format_price(Some(dec!(0.00000102))), "0.0{5}102");
}

#[test]
fn test_fixed_output_is_stable() {
    for value in ["1234.5", "0.5", "0.001", "0", "-7.125"] {
        let once = format_price(Some(value));
        let twice = format_price(Some(once.as_str()));
        assert_eq!(once, twice, "reformatting {}", value);
    }
}

#[test]
fn test_scientific_style() {
    let formatter = MagnitudeFormatter::new().small_style(SmallNumberStyle::Scientific);
    assert_eq!(formatter.format(Some(0.00012345)), "1.23e-4");
    assert_eq!(formatter.format(Some(1.5)), "1.50000");
}

#[test]
fn test_zero_run_longer_than_float_range() {
    let text = format!("0.{}5", "0".repeat(400));
    let formatted = format_price(Some(text.as_str()));
    assert_eq!(formatted, format!("0.0{{{}}}5", 400));

    let marker: CompactMarker = formatted.parse().unwrap();
    assert_eq!(marker.leading_zeros, 400);
    assert_eq!(marker.digits, "5");
}
