//! Ticker board and table rendering

mod board;
mod refresh;
mod table;

pub use board::{Board, WindowColumn};
pub use refresh::refresh_windows;
pub use table::render_table;
