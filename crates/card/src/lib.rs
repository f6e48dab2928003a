//! Bingo card core.
//!
//! Turns an item pool into a shuffled 5x5 [`Card`] with a fixed `FREE`
//! center, tracks which squares a player has marked ([`MarkState`],
//! [`PlayerBoard`]) and evaluates the 12 winning lines ([`has_win`]).
//!
//! Nothing in this crate touches the network or a rendering framework;
//! the presentation layer drives it through [`PlayerBoard::toggle`].

mod board;
mod card;
mod error;
mod win;

pub use board::{BoardEvent, MarkState, PlayerBoard, ToggleOutcome, toggle};
pub use card::{Card, generate, generate_with};
pub use error::CardError;
pub use win::{WIN_LINES, WinLine, has_win};

/// Cards are `GRID_SIZE` x `GRID_SIZE`.
pub const GRID_SIZE: usize = 5;

/// Total number of cells on a card.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Number of pool items placed on a card (every cell except the center).
pub const ITEMS_PER_CARD: usize = CELL_COUNT - 1;

/// Row and column index of the center cell.
pub const CENTER: usize = GRID_SIZE / 2;

/// Sentinel text of the center cell.
pub const FREE_SPACE: &str = "FREE";
