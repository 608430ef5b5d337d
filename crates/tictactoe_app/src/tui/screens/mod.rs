//! Screen implementations.

mod board;
mod start;

pub use board::BoardScreen;
pub use start::{MAX_NAME_LEN, NameEntryScreen};
