//! Rules module - win and draw detection.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{WIN_LINES, Win, WinLine, find_win};
