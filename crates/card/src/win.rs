//! Win detection over a marked grid.

use std::fmt;

use crate::GRID_SIZE;
use crate::board::MarkState;

/// One of the 12 lines that completes a bingo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinLine {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

/// All winning lines in evaluation priority: rows, then columns, then the
/// two diagonals.
pub const WIN_LINES: [WinLine; 2 * GRID_SIZE + 2] = [
    WinLine::Row(0),
    WinLine::Row(1),
    WinLine::Row(2),
    WinLine::Row(3),
    WinLine::Row(4),
    WinLine::Column(0),
    WinLine::Column(1),
    WinLine::Column(2),
    WinLine::Column(3),
    WinLine::Column(4),
    WinLine::MainDiagonal,
    WinLine::AntiDiagonal,
];

impl WinLine {
    /// The `(row, col)` coordinates covered by this line.
    pub fn cells(self) -> [(usize, usize); GRID_SIZE] {
        std::array::from_fn(|i| match self {
            WinLine::Row(r) => (r, i),
            WinLine::Column(c) => (i, c),
            WinLine::MainDiagonal => (i, i),
            WinLine::AntiDiagonal => (i, GRID_SIZE - 1 - i),
        })
    }

    fn is_complete(self, marks: &MarkState) -> bool {
        self.cells()
            .iter()
            .all(|&(row, col)| marks.is_marked(row, col))
    }
}

impl fmt::Display for WinLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinLine::Row(r) => write!(f, "row {}", r + 1),
            WinLine::Column(c) => write!(f, "column {}", c + 1),
            WinLine::MainDiagonal => f.write_str("main diagonal"),
            WinLine::AntiDiagonal => f.write_str("anti-diagonal"),
        }
    }
}

/// Returns the first complete line in [`WIN_LINES`] order, if any.
pub fn has_win(marks: &MarkState) -> Option<WinLine> {
    WIN_LINES.into_iter().find(|line| line.is_complete(marks))
}
