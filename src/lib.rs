//! coin-panel: terminal price dashboard for Binance and Bitget spot tickers
//!
//! This library provides the core components for:
//! - Compact price formatting for ticker tables
//! - Binance and Bitget REST clients
//! - WebSocket ticker streams with reconnection
//! - Sequential request queue for rate-limited polling
//! - Optional HTTP proxy routing
//! - A sortable ticker board rendered as a plain-text table
//! - Structured logging and Prometheus metrics

pub mod app;
pub mod binance;
pub mod bitget;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod http;
pub mod proxy;
pub mod schedule;
pub mod telemetry;
pub mod ticker;
pub mod ws;
