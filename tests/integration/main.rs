//! Integration tests for coin-panel

mod board_test;
mod config_test;
mod format_test;
