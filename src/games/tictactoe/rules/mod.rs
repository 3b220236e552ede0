//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). The monitor calls them
//! while holding its lock; they never touch shared state themselves.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, has_line};
