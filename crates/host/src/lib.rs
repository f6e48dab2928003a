//! Bingo game host.
//!
//! Owns a [`GameSession`] (title, item pool, connected players) and runs a
//! TCP accept loop that serves each connecting player one freshly
//! shuffled card. Failures on one connection are logged and never reach
//! other connections or the caller.

mod handler;
mod server;
mod session;

pub use server::{HostConfig, HostHandle, HostServer, start_hosting};
pub use session::{ClientState, ConnectedClient, GameSession};

use std::net::SocketAddr;

use bingo_card::CardError;
use bingo_protocol::ProtocolError;

/// Errors produced by the host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("could not bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid game setup: {0}")]
    InvalidSetup(String),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
