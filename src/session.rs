//! Cookie-keyed, in-process session state. The only thing a session holds is
//! the shopping cart.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub const SESSION_COOKIE: &str = "sid";

/// Item id to quantity. A present key always has a quantity of at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: BTreeMap<i32, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new quantity.
    pub fn add(&mut self, item_id: i32) -> u32 {
        let quantity = self.entries.entry(item_id).or_insert(0);
        *quantity += 1;
        *quantity
    }

    /// Decrements, dropping the key when it reaches zero. Absent keys are left alone.
    pub fn subtract(&mut self, item_id: i32) {
        if let Some(quantity) = self.entries.get_mut(&item_id) {
            *quantity = quantity.saturating_sub(1);
            if *quantity == 0 {
                self.entries.remove(&item_id);
            }
        }
    }

    pub fn remove(&mut self, item_id: i32) {
        self.entries.remove(&item_id);
    }

    pub fn empty(&mut self) {
        self.entries.clear();
    }

    /// Number of distinct items, not the total quantity.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn quantity(&self, item_id: i32) -> u32 {
        self.entries.get(&item_id).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        self.entries.iter().map(|(id, qty)| (*id, *qty))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// `None` until the first item is added.
    pub cart: Option<Cart>,
}

impl SessionData {
    pub fn cart_count(&self) -> usize {
        self.cart.as_ref().map(Cart::count).unwrap_or(0)
    }
}

/// Sessions idle for at least this long are dropped by [`SessionStore::sweep`].
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct Entry {
    data: SessionData,
    last_seen: Instant,
}

impl Entry {
    fn new() -> Self {
        Self {
            data: SessionData::default(),
            last_seen: Instant::now(),
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Empty data for unknown ids; nothing is stored until the first write.
    pub async fn load(&self, id: Uuid) -> SessionData {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(&id) {
            Some(entry) => {
                entry.last_seen = Instant::now();
                entry.data.clone()
            }
            None => SessionData::default(),
        }
    }

    /// Runs `f` against the session under a single write lock, creating it
    /// if needed.
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut SessionData) -> R) -> R {
        let mut sessions = self.inner.write().await;
        let entry = sessions.entry(id).or_insert_with(Entry::new);
        entry.last_seen = Instant::now();
        f(&mut entry.data)
    }

    /// Like [`update`](Self::update) but never creates a session. `None` when
    /// the id is unknown.
    pub async fn update_existing<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionData) -> R,
    ) -> Option<R> {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(f(&mut entry.data))
    }

    /// Drops sessions idle for at least the store's ttl. Returns how many.
    pub async fn sweep(&self) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < self.ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Sweeps `store` every `period` until the runtime shuts down.
pub fn spawn_sweeper(store: SessionStore, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let removed = store.sweep().await;
            if removed > 0 {
                tracing::debug!(removed, "expired sessions swept");
            }
        }
    })
}

/// Handle to the current request's session, installed by [`session_layer`].
#[derive(Clone)]
pub struct Session {
    pub id: Uuid,
    store: SessionStore,
}

impl Session {
    pub fn new(id: Uuid, store: SessionStore) -> Self {
        Self { id, store }
    }

    pub async fn data(&self) -> SessionData {
        self.store.load(self.id).await
    }

    pub async fn cart_count(&self) -> usize {
        self.data().await.cart_count()
    }

    pub async fn update<R>(&self, f: impl FnOnce(&mut SessionData) -> R) -> R {
        self.store.update(self.id, f).await
    }

    pub async fn update_existing<R>(&self, f: impl FnOnce(&mut SessionData) -> R) -> Option<R> {
        self.store.update_existing(self.id, f).await
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("session layer is not installed")))
    }
}

pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// Attaches a [`Session`] to every request, issuing a cookie to new visitors.
pub async fn session_layer(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let existing = session_id_from_headers(request.headers());
    let id = existing.unwrap_or_else(Uuid::new_v4);
    request
        .extensions_mut()
        .insert(Session::new(id, state.sessions.clone()));

    let mut response = next.run(request).await;

    if existing.is_none() {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => tracing::warn!(error = %err, "could not build session cookie"),
        }
    }

    response
}
