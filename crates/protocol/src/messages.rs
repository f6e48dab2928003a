//! Message bodies exchanged during the join handshake and the untagged
//! [`Message`] envelope that recognises them by their fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Sent by the host as soon as a player connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAnnouncement {
    pub title: String,
    pub items: Vec<String>,
}

/// Actions a player can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "get_card")]
    GetCard,
}

/// Sent by the player after the announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRequest {
    pub action: Action,
}

impl CardRequest {
    pub fn get_card() -> Self {
        Self {
            action: Action::GetCard,
        }
    }
}

/// The player's card: 24 items in row-major order with the center skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardResponse {
    pub card: Vec<String>,
}

/// Any message that can appear on a connection.
///
/// Messages carry no type tag on the wire; the variant is recognised by
/// its required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Announcement(GameAnnouncement),
    Request(CardRequest),
    Response(CardResponse),
}

/// Discriminant of a [`Message`], used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Announcement,
    Request,
    Response,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MessageKind::Announcement => "game announcement",
            MessageKind::Request => "card request",
            MessageKind::Response => "card response",
        })
    }
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Announcement(_) => MessageKind::Announcement,
            Message::Request(_) => MessageKind::Request,
            Message::Response(_) => MessageKind::Response,
        }
    }

    /// Unwraps an announcement, or reports what arrived instead.
    pub fn into_announcement(self) -> Result<GameAnnouncement, ProtocolError> {
        match self {
            Message::Announcement(a) => Ok(a),
            other => Err(other.unexpected(MessageKind::Announcement)),
        }
    }

    /// Unwraps a card request, or reports what arrived instead.
    pub fn into_request(self) -> Result<CardRequest, ProtocolError> {
        match self {
            Message::Request(r) => Ok(r),
            other => Err(other.unexpected(MessageKind::Request)),
        }
    }

    /// Unwraps a card response, or reports what arrived instead.
    pub fn into_response(self) -> Result<CardResponse, ProtocolError> {
        match self {
            Message::Response(r) => Ok(r),
            other => Err(other.unexpected(MessageKind::Response)),
        }
    }

    fn unexpected(&self, expected: MessageKind) -> ProtocolError {
        ProtocolError::UnexpectedMessage {
            expected,
            got: self.kind(),
        }
    }
}

impl From<GameAnnouncement> for Message {
    fn from(value: GameAnnouncement) -> Self {
        Message::Announcement(value)
    }
}

impl From<CardRequest> for Message {
    fn from(value: CardRequest) -> Self {
        Message::Request(value)
    }
}

impl From<CardResponse> for Message {
    fn from(value: CardResponse) -> Self {
        Message::Response(value)
    }
}
