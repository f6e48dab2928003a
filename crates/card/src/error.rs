//! Error types for card generation and marking.

/// Errors produced by the card core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("not enough items for a card: need {required}, got {available}")]
    InsufficientItems { required: usize, available: usize },

    #[error("card needs exactly {expected} items, got {actual}")]
    WrongItemCount { expected: usize, actual: usize },

    #[error("cell ({row}, {col}) is outside the card")]
    OutOfBounds { row: usize, col: usize },
}
