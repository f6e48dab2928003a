//! Hosted game state.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tokio::sync::Mutex;
use uuid::Uuid;

use bingo_card::{Card, CardError, FREE_SPACE, ITEMS_PER_CARD};
use bingo_protocol::{GameAnnouncement, MAX_FRAME_SIZE};

use crate::HostError;

/// Where a player's connection is in the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Connected,
    AnnouncementSent,
    AwaitingRequest,
    CardSent,
}

/// Registry entry for one open connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedClient {
    pub id: u64,
    pub addr: SocketAddr,
    pub state: ClientState,
}

/// One hosted game: its title, the item pool cards are drawn from, and
/// the players currently connected.
///
/// The pool is fixed at construction and read concurrently by every
/// connection handler. The client registry is only touched under its
/// mutex and holds open connections only; handlers remove their entry
/// when they finish.
#[derive(Debug)]
pub struct GameSession {
    id: Uuid,
    title: String,
    pool: Vec<String>,
    clients: Mutex<Vec<ConnectedClient>>,
    next_client_id: AtomicU64,
    cards_dealt: AtomicUsize,
}

impl GameSession {
    /// Validates the operator's setup and creates a session.
    ///
    /// The title is trimmed and must not be empty. Items are trimmed,
    /// blank entries are dropped and repeats are collapsed to their first
    /// occurrence; at least 24 distinct items must remain. An item may not
    /// be the center square's `FREE` text, and the announcement carrying
    /// the pool must fit in one frame.
    pub fn new<I, S>(title: impl Into<String>, items: I) -> Result<Self, HostError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(HostError::InvalidSetup("title must not be empty".into()));
        }

        let mut seen = HashSet::new();
        let pool: Vec<String> = items
            .into_iter()
            .map(|item| item.as_ref().trim().to_string())
            .filter(|item| !item.is_empty())
            .filter(|item| seen.insert(item.clone()))
            .collect();

        if pool.iter().any(|item| item == FREE_SPACE) {
            return Err(HostError::InvalidSetup(format!(
                "{FREE_SPACE:?} is reserved for the center square"
            )));
        }

        if pool.len() < ITEMS_PER_CARD {
            return Err(CardError::InsufficientItems {
                required: ITEMS_PER_CARD,
                available: pool.len(),
            }
            .into());
        }

        let announcement = GameAnnouncement {
            title: title.clone(),
            items: pool.clone(),
        };
        let size = bingo_protocol::encode(&announcement)?.len();
        if size > MAX_FRAME_SIZE {
            return Err(HostError::InvalidSetup(format!(
                "announcement is {size} bytes, over the {MAX_FRAME_SIZE} byte frame limit"
            )));
        }

        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, %title, items = pool.len(), "game session created");

        Ok(Self {
            id,
            title,
            pool,
            clients: Mutex::new(Vec::new()),
            next_client_id: AtomicU64::new(1),
            cards_dealt: AtomicUsize::new(0),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    /// The first message every player receives.
    pub fn announcement(&self) -> GameAnnouncement {
        GameAnnouncement {
            title: self.title.clone(),
            items: self.pool.clone(),
        }
    }

    /// Draws a fresh card from the pool.
    pub fn deal_card(&self) -> Result<Card, CardError> {
        bingo_card::generate(&self.pool)
    }

    /// Records a newly accepted connection and returns its id.
    pub async fn register_client(&self, addr: SocketAddr) -> u64 {
        let id = self.next_client_id.fetch_add(1, Ordering::Relaxed);
        self.clients.lock().await.push(ConnectedClient {
            id,
            addr,
            state: ClientState::Connected,
        });
        id
    }

    /// Moves a connection to `state`. Unknown ids are ignored.
    pub async fn set_client_state(&self, id: u64, state: ClientState) {
        let mut clients = self.clients.lock().await;
        if let Some(client) = clients.iter_mut().find(|c| c.id == id) {
            if state == ClientState::CardSent && client.state != ClientState::CardSent {
                self.cards_dealt.fetch_add(1, Ordering::Relaxed);
            }
            client.state = state;
        }
    }

    /// Drops a finished connection from the registry.
    pub async fn remove_client(&self, id: u64) -> Option<ConnectedClient> {
        let mut clients = self.clients.lock().await;
        let index = clients.iter().position(|c| c.id == id)?;
        Some(clients.swap_remove(index))
    }

    /// Snapshot of the open connections.
    pub async fn clients(&self) -> Vec<ConnectedClient> {
        self.clients.lock().await.clone()
    }

    /// Number of players that have been sent a card.
    pub fn cards_dealt(&self) -> usize {
        self.cards_dealt.load(Ordering::Relaxed)
    }
}
