use std::collections::HashSet;
use std::time::Duration;

use tokio::net::TcpStream;

use bingo_card::{Card, FREE_SPACE};
use bingo_protocol::{
    CONNECT_TIMEOUT, CardRequest, Message, MessageKind, READ_TIMEOUT, read_message_timeout,
    write_message,
};

use crate::JoinError;

/// Timeouts applied to a join attempt.
#[derive(Debug, Clone)]
pub struct JoinConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
        }
    }
}

/// Everything a player receives from the host.
#[derive(Debug, Clone)]
pub struct JoinedGame {
    pub title: String,
    /// The host's full item pool, as announced.
    pub items: Vec<String>,
    pub card: Card,
}

/// Joins the game at `host:port` with default timeouts.
pub async fn join(host: &str, port: u16) -> Result<JoinedGame, JoinError> {
    join_with(host, port, &JoinConfig::default()).await
}

/// Joins the game at `host:port`.
pub async fn join_with(host: &str, port: u16, config: &JoinConfig) -> Result<JoinedGame, JoinError> {
    let addr = format!("{host}:{port}");

    let mut stream =
        match tokio::time::timeout(config.connect_timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(s)) => {
                tracing::info!(%addr, "connected to host");
                s
            }
            Ok(Err(source)) => return Err(JoinError::Connection { addr, source }),
            Err(_) => return Err(JoinError::ConnectTimeout(addr)),
        };

    let announcement =
        read_message_timeout(&mut stream, MessageKind::Announcement, config.read_timeout)
            .await?
            .into_announcement()?;
    tracing::debug!(
        title = %announcement.title,
        items = announcement.items.len(),
        "game announced"
    );

    write_message(&mut stream, &Message::from(CardRequest::get_card())).await?;

    let response = read_message_timeout(&mut stream, MessageKind::Response, config.read_timeout)
        .await?
        .into_response()?;
    drop(stream);

    check_card_items(&response.card, &announcement.items)?;
    let card = Card::from_items(response.card)?;

    tracing::info!(title = %announcement.title, "card received");
    Ok(JoinedGame {
        title: announcement.title,
        items: announcement.items,
        card,
    })
}

/// Every dealt item must come from the announced pool, at most once, and
/// never be the center square's text.
fn check_card_items(card: &[String], pool: &[String]) -> Result<(), JoinError> {
    let pool: HashSet<&str> = pool.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    for item in card {
        if item == FREE_SPACE {
            return Err(JoinError::InvalidCard(format!(
                "{FREE_SPACE:?} is only allowed at the center"
            )));
        }
        if !pool.contains(item.as_str()) {
            return Err(JoinError::InvalidCard(format!("{item:?} was not announced")));
        }
        if !seen.insert(item.as_str()) {
            return Err(JoinError::InvalidCard(format!("{item:?} dealt twice")));
        }
    }
    Ok(())
}
