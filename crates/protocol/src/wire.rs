//! Length-prefixed framing.
//!
//! # Wire format
//!
//! ```text
//! PER MESSAGE:
//!   [4 bytes BE: body_len]
//!   [body_len bytes: UTF-8 JSON body]
//! ```
//!
//! A receiver reads exactly `body_len` bytes, so neither side relies on the
//! peer closing its write half to delimit a message.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::codec::{decode, encode};
use crate::error::ProtocolError;
use crate::messages::{Message, MessageKind};
use crate::MAX_FRAME_SIZE;

/// Encodes and writes one framed message, then flushes.
pub async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    message: &Message,
) -> Result<(), ProtocolError> {
    let body = encode(message)?;
    if body.len() > MAX_FRAME_SIZE {
        return Err(ProtocolError::FrameTooLarge {
            size: body.len(),
            max: MAX_FRAME_SIZE,
        });
    }

    writer.write_u32(body.len() as u32).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads and decodes one framed message.
///
/// EOF before or inside a frame is reported as
/// [`ProtocolError::ConnectionClosed`].
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Message, ProtocolError> {
    let len = reader.read_u32().await.map_err(eof_as_closed)? as usize;
    if len > MAX_FRAME_SIZE {
        return Err(ProtocolError::FrameTooLarge {
            size: len,
            max: MAX_FRAME_SIZE,
        });
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await.map_err(eof_as_closed)?;
    decode(&body)
}

/// Reads one message, giving up after `timeout`.
///
/// `expected` only labels the timeout error; the message itself is
/// returned as-is.
pub async fn read_message_timeout<R: AsyncRead + Unpin>(
    reader: &mut R,
    expected: MessageKind,
    timeout: Duration,
) -> Result<Message, ProtocolError> {
    match tokio::time::timeout(timeout, read_message(reader)).await {
        Ok(result) => result,
        Err(_) => Err(ProtocolError::Timeout(expected)),
    }
}

fn eof_as_closed(e: std::io::Error) -> ProtocolError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        ProtocolError::ConnectionClosed
    } else {
        ProtocolError::Io(e)
    }
}
