//! Error types for the wire protocol.

use crate::messages::MessageKind;

/// Errors produced while encoding, framing or decoding messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed message: {0}")]
    Malformed(String),

    #[error("failed to encode message: {0}")]
    Marshal(String),

    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },

    #[error("expected {expected}, got {got}")]
    UnexpectedMessage {
        expected: MessageKind,
        got: MessageKind,
    },

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("timed out waiting for {0}")]
    Timeout(MessageKind),
}
