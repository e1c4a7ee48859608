//! End-to-end board tests against mocked exchange APIs

use coin_panel::app::AppContext;
use coin_panel::config::Config;
use coin_panel::dashboard::{refresh_windows, render_table};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(server: &MockServer) -> AppContext {
    let mut config = Config::default();
    config.binance.rest_url = server.uri();
    config.bitget.rest_url = server.uri();
    config.poll.request_delay_ms = 0;
    AppContext::new(config).unwrap()
}

#[tokio::test]
async fn test_binance_board() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/24hr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"symbol": "BTCUSDT", "lastPrice": "42000.10", "priceChangePercent": "1.20"},
            {"symbol": "BTCUPUSDT", "lastPrice": "12.3", "priceChangePercent": "30.00"},
            {"symbol": "PEPEUSDT", "lastPrice": "0.00000102", "priceChangePercent": "-3.10"}
        ])))
        .mount(&server)
        .await;
    for (window, change) in [("5m", "0.50"), ("10m", "0.90")] {
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker"))
            .and(query_param("windowSize", window))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"symbol": "PEPEUSDT", "lastPrice": "0.00000102", "priceChangePercent": change}
            ])))
            .mount(&server)
            .await;
    }

    let ctx = context(&server);
    let mut board = ctx.board();
    board.load_snapshot(ctx.binance().hr24().await.unwrap());
    let failed = refresh_windows(&mut board, &ctx.binance(), &ctx.queue()).await;
    assert_eq!(failed, 0);

    let rows = board.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].symbol, "BTCUSDT");
    assert_eq!(rows[1].m5_change_percent, Some(dec!(0.50)));
    assert_eq!(rows[1].m10_change_percent, Some(dec!(0.90)));

    let table = render_table(&rows, ctx.formatter());
    let pepe = table.lines().find(|l| l.starts_with("PEPE")).unwrap();
    assert!(pepe.contains("0.0{5}102"));
    assert!(pepe.contains("0.90 %"));
}

#[tokio::test]
async fn test_bitget_board() {
    let server = MockServer::start().await;
    let ticker = |symbol: &str, last: &str, change: &str| {
        json!({
            "symbol": symbol, "high24h": last, "open": last, "low24h": last, "lastPr": last,
            "quoteVolume": "1", "baseVolume": "1", "usdtVolume": "1", "bidPr": last,
            "askPr": last, "bidSz": "1", "askSz": "1", "openUtc": last,
            "ts": "1695808949356", "changeUtc24h": "0", "change24h": change
        })
    };
    Mock::given(method("GET"))
        .and(path("/api/v2/spot/market/tickers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "00000",
            "msg": "success",
            "requestTime": 1695808949356_i64,
            "data": [ticker("OGUSDT", "4.81", "0.153"), ticker("ETHUSDT", "2200", "-0.01")]
        })))
        .mount(&server)
        .await;

    let ctx = context(&server);
    let mut board = ctx.board();
    board.load_snapshot(ctx.bitget().symbol_changes("USDT").await.unwrap());

    let table = render_table(&board.rows(), ctx.formatter());
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("OG"));
    assert!(lines[1].contains("4.81000"));
    assert!(lines[1].contains("15.3"));
    assert!(lines[2].starts_with("ETH"));
}
