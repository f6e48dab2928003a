//! Player side of the bingo protocol.
//!
//! [`join`] connects to a host, performs the announcement / request /
//! response handshake and hands back the game title, the announced item
//! pool and an assembled [`Card`](bingo_card::Card). Each call is a single
//! attempt; retrying is left to the user.

mod join;

pub use join::{JoinConfig, JoinedGame, join, join_with};

use bingo_card::CardError;
use bingo_protocol::ProtocolError;

/// Errors produced while joining a game.
#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    #[error("could not connect to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out connecting to {0}")]
    ConnectTimeout(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("host sent an invalid card: {0}")]
    InvalidCard(String),
}

impl From<CardError> for JoinError {
    fn from(e: CardError) -> Self {
        JoinError::InvalidCard(e.to_string())
    }
}
