//! Per-player mark tracking.
//!
//! [`MarkState`] is a plain value and [`toggle`] is a pure transition;
//! [`PlayerBoard`] pairs a state with the card it overlays for callers
//! that want a single owned object.

use crate::GRID_SIZE;
use crate::card::Card;
use crate::error::CardError;
use crate::win::{WinLine, has_win};

/// Which cells of a card are marked. Starts all unmarked, including the
/// center cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkState {
    cells: [[bool; GRID_SIZE]; GRID_SIZE],
}

impl MarkState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `(row, col)` is marked. Out-of-bounds cells are
    /// never marked.
    pub fn is_marked(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Returns a copy with `(row, col)` flipped.
    pub fn toggled(mut self, row: usize, col: usize) -> Result<Self, CardError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(CardError::OutOfBounds { row, col })?;
        *cell = !*cell;
        Ok(self)
    }

    /// Number of marked cells.
    pub fn count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&m| m).count()
    }
}

/// Flips one cell and evaluates the result.
///
/// Returns the new state and the winning line, if one is now complete.
pub fn toggle(
    state: MarkState,
    row: usize,
    col: usize,
) -> Result<(MarkState, Option<WinLine>), CardError> {
    let next = state.toggled(row, col)?;
    let win = has_win(&next);
    Ok((next, win))
}

/// Something the presentation layer should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    SquareToggled { row: usize, col: usize, marked: bool },
    LineCompleted(WinLine),
}

/// Result of [`PlayerBoard::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub row: usize,
    pub col: usize,
    /// Whether the cell is marked after the toggle.
    pub marked: bool,
    /// The complete line, if the board now has one.
    pub win: Option<WinLine>,
}

impl ToggleOutcome {
    /// The events this toggle produces, in render order.
    pub fn events(&self) -> impl Iterator<Item = BoardEvent> + use<> {
        let toggled = BoardEvent::SquareToggled {
            row: self.row,
            col: self.col,
            marked: self.marked,
        };
        std::iter::once(toggled).chain(self.win.map(BoardEvent::LineCompleted))
    }
}

/// A card together with one player's marks.
#[derive(Debug, Clone)]
pub struct PlayerBoard {
    card: Card,
    marks: MarkState,
}

impl PlayerBoard {
    pub fn new(card: Card) -> Self {
        Self {
            card,
            marks: MarkState::new(),
        }
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn marks(&self) -> &MarkState {
        &self.marks
    }

    /// Flips `(row, col)` and reports whether a line is complete.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<ToggleOutcome, CardError> {
        let (marks, win) = toggle(self.marks, row, col)?;
        self.marks = marks;
        Ok(ToggleOutcome {
            row,
            col,
            marked: marks.is_marked(row, col),
            win,
        })
    }

    /// The currently complete line, if any.
    pub fn winning_line(&self) -> Option<WinLine> {
        has_win(&self.marks)
    }
}
