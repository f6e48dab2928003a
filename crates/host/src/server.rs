//! Host TCP server.
//!
//! Binds `0.0.0.0:<port>`, then accepts players on a background task
//! until shut down. Each accepted connection gets its own task.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use bingo_card::Card;
use bingo_protocol::{DEFAULT_PORT, READ_TIMEOUT};

use crate::HostError;
use crate::handler::{Served, serve_player};
use crate::session::GameSession;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// TCP port to listen on (0 = OS-assigned).
    pub port: u16,
    /// How long a connected player may stay silent before being dropped.
    pub read_timeout: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            read_timeout: READ_TIMEOUT,
        }
    }
}

/// Deals cards for one [`GameSession`] over TCP.
pub struct HostServer {
    session: Arc<GameSession>,
    config: HostConfig,
    cancel: CancellationToken,
}

impl HostServer {
    pub fn new(session: GameSession, config: HostConfig) -> Self {
        Self {
            session: Arc::new(session),
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Binds the listener, deals the host's own card and starts accepting
    /// players in the background.
    ///
    /// Returns as soon as the socket is bound.
    pub async fn start(self) -> Result<HostHandle, HostError> {
        let addr: SocketAddr = ([0, 0, 0, 0], self.config.port).into();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| HostError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        // The host plays too; its card never crosses the network.
        let host_card = self.session.deal_card()?;

        tracing::info!(
            session_id = %self.session.id(),
            title = %self.session.title(),
            "hosting on {local_addr}"
        );

        let task = tokio::spawn(accept_loop(
            listener,
            Arc::clone(&self.session),
            self.config.read_timeout,
            self.cancel.clone(),
        ));

        Ok(HostHandle {
            local_addr,
            session: self.session,
            host_card,
            cancel: self.cancel,
            task: Some(task),
        })
    }
}

/// Validates the setup and starts hosting on `port` with default timeouts.
pub async fn start_hosting<I, S>(
    title: impl Into<String>,
    items: I,
    port: u16,
) -> Result<HostHandle, HostError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let session = GameSession::new(title, items)?;
    let config = HostConfig {
        port,
        ..HostConfig::default()
    };
    HostServer::new(session, config).start().await
}

/// A running host. Dropping the handle stops accepting players.
pub struct HostHandle {
    local_addr: SocketAddr,
    session: Arc<GameSession>,
    host_card: Card,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl HostHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    pub fn session(&self) -> &Arc<GameSession> {
        &self.session
    }

    /// The card dealt to the hosting player.
    pub fn host_card(&self) -> &Card {
        &self.host_card
    }

    /// Signals the accept loop and any waiting handlers to stop.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Shuts down and waits for the accept loop to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("accept loop panicked: {e}");
            }
        }
    }
}

impl Drop for HostHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn accept_loop(
    listener: TcpListener,
    session: Arc<GameSession>,
    read_timeout: Duration,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("host shutting down");
                break;
            }

            result = listener.accept() => {
                match result {
                    Ok((stream, peer_addr)) => {
                        let client_id = session.register_client(peer_addr).await;
                        tracing::info!(%peer_addr, client_id, "player connected");

                        let session = Arc::clone(&session);
                        let cancel = cancel.clone();
                        tokio::spawn(async move {
                            match serve_player(&session, client_id, stream, read_timeout, &cancel).await {
                                Ok(Served::Dealt) => tracing::info!(%peer_addr, client_id, "player served"),
                                Ok(Served::Cancelled) => {
                                    tracing::debug!(%peer_addr, client_id, "host shutting down, dropped player")
                                }
                                Err(e) => tracing::warn!(%peer_addr, client_id, "connection error: {e}"),
                            }
                            session.remove_client(client_id).await;
                        });
                    }
                    Err(e) => {
                        tracing::error!("accept error: {e}");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ClientState;
    use bingo_card::{FREE_SPACE, ITEMS_PER_CARD};
    use bingo_protocol::{CardRequest, Message, MessageKind, ProtocolError, read_message, write_message};
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpStream;

    fn letters() -> Vec<String> {
        ('A'..='X').map(String::from).collect()
    }

    async fn start(read_timeout: Duration) -> HostHandle {
        let session = GameSession::new("Movie Night", letters()).unwrap();
        let config = HostConfig {
            port: 0,
            read_timeout,
        };
        HostServer::new(session, config).start().await.unwrap()
    }

    async fn connect(host: &HostHandle) -> TcpStream {
        TcpStream::connect(("127.0.0.1", host.port())).await.unwrap()
    }

    #[tokio::test]
    async fn binds_dynamic_port_and_deals_host_card() {
        let host = start(READ_TIMEOUT).await;
        assert!(host.port() > 0);
        assert_eq!(host.host_card().get(2, 2), Some(FREE_SPACE));
        assert!(host.session().clients().await.is_empty());
        host.stop().await;
    }

    #[tokio::test]
    async fn serves_one_card_per_connection() {
        let host = start(READ_TIMEOUT).await;
        let mut stream = connect(&host).await;

        let announcement = read_message(&mut stream)
            .await
            .unwrap()
            .into_announcement()
            .unwrap();
        assert_eq!(announcement.title, "Movie Night");
        assert_eq!(announcement.items, letters());

        write_message(&mut stream, &Message::from(CardRequest::get_card()))
            .await
            .unwrap();
        let response = read_message(&mut stream)
            .await
            .unwrap()
            .into_response()
            .unwrap();
        assert_eq!(response.card.len(), ITEMS_PER_CARD);
        let mut dealt = response.card.clone();
        dealt.sort();
        assert_eq!(dealt, letters());

        // Host closes after the single round trip.
        assert!(matches!(
            read_message(&mut stream).await,
            Err(ProtocolError::ConnectionClosed)
        ));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(host.session().cards_dealt(), 1);
        assert!(host.session().clients().await.is_empty());
        host.stop().await;
    }

    #[tokio::test]
    async fn bad_request_does_not_affect_other_players() {
        let host = start(READ_TIMEOUT).await;

        let mut bad = connect(&host).await;
        read_message(&mut bad).await.unwrap();
        bad.write_all(&5u32.to_be_bytes()).await.unwrap();
        bad.write_all(b"hello").await.unwrap();
        assert!(read_message(&mut bad).await.is_err());

        let mut good = connect(&host).await;
        read_message(&mut good).await.unwrap();
        write_message(&mut good, &Message::from(CardRequest::get_card()))
            .await
            .unwrap();
        let msg = read_message(&mut good).await.unwrap();
        assert_eq!(msg.kind(), MessageKind::Response);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(host.session().clients().await.is_empty());
        assert_eq!(host.session().cards_dealt(), 1);
        host.stop().await;
    }

    #[tokio::test]
    async fn wrong_message_kind_closes_connection() {
        let host = start(READ_TIMEOUT).await;
        let mut stream = connect(&host).await;
        let announcement = read_message(&mut stream).await.unwrap();

        // Echo the announcement back instead of requesting a card.
        write_message(&mut stream, &announcement).await.unwrap();
        assert!(matches!(
            read_message(&mut stream).await,
            Err(ProtocolError::ConnectionClosed)
        ));
        host.stop().await;
    }

    #[tokio::test]
    async fn silent_player_is_dropped() {
        let host = start(Duration::from_millis(100)).await;
        let mut stream = connect(&host).await;
        read_message(&mut stream).await.unwrap();

        // Never send the request; the host gives up and closes.
        assert!(read_message(&mut stream).await.is_err());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(host.session().clients().await.is_empty());
        assert_eq!(host.session().cards_dealt(), 0);
        host.stop().await;
    }

    #[tokio::test]
    async fn waiting_player_is_listed_until_it_leaves() {
        let host = start(READ_TIMEOUT).await;
        let mut stream = connect(&host).await;
        read_message(&mut stream).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        let clients = host.session().clients().await;
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].state, ClientState::AwaitingRequest);

        drop(stream);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(host.session().clients().await.is_empty());
        host.stop().await;
    }

    #[tokio::test]
    async fn shutdown_releases_waiting_players() {
        let host = start(READ_TIMEOUT).await;
        let mut stream = connect(&host).await;
        read_message(&mut stream).await.unwrap();

        let session = Arc::clone(host.session());
        host.stop().await;

        assert!(matches!(
            read_message(&mut stream).await,
            Err(ProtocolError::ConnectionClosed)
        ));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(session.clients().await.is_empty());
        assert_eq!(session.cards_dealt(), 0);
    }

    #[tokio::test]
    async fn occupied_port_is_a_bind_error() {
        let blocker = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
        let port = blocker.local_addr().unwrap().port();

        let session = GameSession::new("T", letters()).unwrap();
        let config = HostConfig {
            port,
            ..HostConfig::default()
        };
        let result = HostServer::new(session, config).start().await;
        assert!(matches!(result, Err(HostError::Bind { .. })));
    }

    #[tokio::test]
    async fn start_hosting_validates_setup() {
        let result = start_hosting("", letters(), 0).await;
        assert!(matches!(result, Err(HostError::InvalidSetup(_))));

        let host = start_hosting("Quiz", letters(), 0).await.unwrap();
        assert_eq!(host.session().title(), "Quiz");
        host.stop().await;
    }

    #[tokio::test]
    async fn shutdown_stops_accepting() {
        let host = start(READ_TIMEOUT).await;
        let port = host.port();
        host.stop().await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(TcpStream::connect(("127.0.0.1", port)).await.is_err());
    }
}
