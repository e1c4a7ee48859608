//! Integration tests for configuration loading

use coin_panel::app::AppContext;
use coin_panel::config::Config;
use coin_panel::format::SmallNumberStyle;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_example_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();

    assert_eq!(config.binance.quote_asset, "USDT");
    assert_eq!(config.poll.request_delay(), Duration::from_millis(300));
    assert_eq!(config.dashboard.small_number_style, SmallNumberStyle::Marker);
    assert!(!config.proxy.enabled);
}

#[test]
fn test_partial_config_builds_context() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [poll]
        request_delay_ms = 50

        [dashboard]
        limit = 5
        small_number_style = "scientific"
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    let ctx = AppContext::new(config).unwrap();

    assert_eq!(ctx.queue().delay(), Duration::from_millis(50));
    assert_eq!(ctx.formatter().format(Some("0.0000123")), "1.23e-5");
}

#[test]
fn test_malformed_config_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[poll\nrequest_delay_ms = ").unwrap();
    assert!(Config::load(file.path()).is_err());
}
