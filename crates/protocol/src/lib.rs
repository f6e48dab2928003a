//! Wire protocol between a bingo host and its players.
//!
//! One TCP connection serves one player exactly one card:
//!
//! ```text
//! Host -> Player:  {"title": "...", "items": ["...", ...]}
//! Player -> Host:  {"action": "get_card"}
//! Host -> Player:  {"card": ["...", ... 24 items, row-major, center skipped]}
//! ```
//!
//! # Framing
//!
//! See [`wire`] for the length-prefixed framing carried on the socket.

pub mod codec;
pub mod error;
pub mod messages;
pub mod wire;

pub use codec::{decode, encode};
pub use error::ProtocolError;
pub use messages::{Action, CardRequest, CardResponse, GameAnnouncement, Message, MessageKind};
pub use wire::{read_message, read_message_timeout, write_message};

use std::time::Duration;

/// Default TCP port a host listens on.
pub const DEFAULT_PORT: u16 = 5555;

/// Largest frame body accepted from a peer (1 MiB).
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Default time to wait for the next message from a peer.
pub const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Default time allowed for a player to reach the host.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
