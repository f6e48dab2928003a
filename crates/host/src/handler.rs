//! Per-connection handshake: announce, await the card request, deal.

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

use bingo_protocol::{CardResponse, Message, MessageKind, read_message_timeout, write_message};

use crate::HostError;
use crate::session::{ClientState, GameSession};

/// How a handshake that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Served {
    /// The player was sent a card.
    Dealt,
    /// Hosting stopped before the player asked for a card.
    Cancelled,
}

/// Serves one player exactly one card, then closes the connection.
pub(crate) async fn serve_player(
    session: &GameSession,
    client_id: u64,
    mut stream: TcpStream,
    read_timeout: Duration,
    cancel: &CancellationToken,
) -> Result<Served, HostError> {
    write_message(&mut stream, &Message::from(session.announcement())).await?;
    session.set_client_state(client_id, ClientState::AnnouncementSent).await;

    session.set_client_state(client_id, ClientState::AwaitingRequest).await;
    let message = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(Served::Cancelled),
        result = read_message_timeout(&mut stream, MessageKind::Request, read_timeout) => result?,
    };
    let request = message.into_request()?;
    tracing::debug!(client_id, action = ?request.action, "card requested");

    let card = session.deal_card()?;
    let response = CardResponse { card: card.items() };
    write_message(&mut stream, &Message::from(response)).await?;
    session.set_client_state(client_id, ClientState::CardSent).await;

    // The card is out; a failed close changes nothing for the player.
    if let Err(e) = stream.shutdown().await {
        tracing::debug!(client_id, "shutdown after dealing failed: {e}");
    }
    Ok(Served::Dealt)
}
