//! Connection-keyed game sessions.
//!
//! `SessionRegistry` is the only state shared across connections. Creation on
//! first contact goes through the DashMap entry API, so racing callers for the
//! same connection id all receive the same `Arc`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{DiceCup, ScoreSheet};

/// Opaque identity of one transport connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stable user identity supplied by the identity provider (JWT `sub`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Complete mutable game state owned by one connection.
#[derive(Debug)]
pub struct GameSession {
    pub(crate) connection_id: ConnectionId,
    pub(crate) user_id: Option<UserId>,
    pub(crate) score_sheet: ScoreSheet,
    pub(crate) dice_cup: DiceCup,
    pub(crate) started_at: OffsetDateTime,
    pub(crate) rng: StdRng,
    /// Set once the completed-game record has been handed to the statistics sink.
    pub(crate) completion_reported: bool,
}

impl GameSession {
    pub fn new(connection_id: ConnectionId, user_id: Option<UserId>, rng: StdRng) -> Self {
        Self {
            connection_id,
            user_id,
            score_sheet: ScoreSheet::new(),
            dice_cup: DiceCup::new(),
            started_at: OffsetDateTime::now_utc(),
            rng,
            completion_reported: false,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn score_sheet(&self) -> &ScoreSheet {
        &self.score_sheet
    }

    pub fn dice_cup(&self) -> &DiceCup {
        &self.dice_cup
    }

    pub fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }
}

/// Builds new sessions. A seed makes every session's dice deterministic.
#[derive(Debug, Default)]
pub struct SessionFactory {
    seed: Option<u64>,
    created: AtomicU64,
}

impl SessionFactory {
    /// Sessions roll with OS-seeded dice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session `n` (0-based, in creation order) rolls with `seed + n`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            created: AtomicU64::new(0),
        }
    }

    pub fn create(&self, connection_id: ConnectionId, user_id: Option<UserId>) -> GameSession {
        let n = self.created.fetch_add(1, Ordering::Relaxed);
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(n)),
            None => StdRng::from_os_rng(),
        };
        GameSession::new(connection_id, user_id, rng)
    }
}

pub type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<ConnectionId, SharedSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Return the session for `id`, creating it with `create` if absent.
    ///
    /// `create` runs at most once per absent key, under the shard lock.
    pub fn get_or_create<F>(&self, id: ConnectionId, create: F) -> SharedSession
    where
        F: FnOnce() -> GameSession,
    {
        self.sessions
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(create())))
            .value()
            .clone()
    }

    pub fn get(&self, id: ConnectionId) -> Option<SharedSession> {
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }

    /// Drop the session for `id`. Returns whether one existed.
    pub fn remove(&self, id: ConnectionId) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// Snapshot of the live connection ids, in no particular order.
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.sessions.iter().map(|entry| *entry.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
