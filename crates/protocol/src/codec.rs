//! JSON encoding of message bodies.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ProtocolError;

/// Serializes a message body to UTF-8 JSON.
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(message).map_err(|e| ProtocolError::Marshal(e.to_string()))
}

/// Parses a message body.
///
/// Fails with [`ProtocolError::Malformed`] on invalid JSON or missing
/// required fields.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProtocolError> {
    serde_json::from_slice(bytes).map_err(|e| ProtocolError::Malformed(e.to_string()))
}
