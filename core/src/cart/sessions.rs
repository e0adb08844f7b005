// core/src/cart/sessions.rs

//! Defines `CartSessions`, a registry of per-visitor cart stores keyed by a
//! cart-session id.
//!
//! Opening a session constructs its store; ending it (explicitly or by idle
//! expiry) drops the registry's handle. Handles already given out stay valid
//! but are no longer reachable through the registry.

use crate::cart::store::CartStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{event, instrument, Level};
use uuid::Uuid;

#[derive(Debug)]
struct SessionEntry {
  store: CartStore,
  last_seen: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct CartSessions {
  registry: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl CartSessions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the store for `session_id`, starting an empty cart if none exists.
  pub fn open(&self, session_id: Uuid) -> CartStore {
    let now = Instant::now();
    let mut registry = self.registry.write();
    let entry = registry.entry(session_id).or_insert_with(|| {
      event!(Level::DEBUG, %session_id, "Starting cart session.");
      SessionEntry {
        store: CartStore::new(),
        last_seen: now,
      }
    });
    entry.last_seen = now;
    entry.store.clone()
  }

  /// Returns the store for an existing session without creating one.
  pub fn get(&self, session_id: Uuid) -> Option<CartStore> {
    let mut registry = self.registry.write();
    registry.get_mut(&session_id).map(|entry| {
      entry.last_seen = Instant::now();
      entry.store.clone()
    })
  }

  /// Ends a session. Returns `false` if it did not exist.
  pub fn end(&self, session_id: Uuid) -> bool {
    let removed = self.registry.write().remove(&session_id).is_some();
    if removed {
      event!(Level::DEBUG, %session_id, "Cart session ended.");
    }
    removed
  }

  /// Ends every session idle for longer than `ttl`.
  pub fn sweep_idle(&self, ttl: Duration) -> usize {
    self.sweep_idle_at(Instant::now(), ttl)
  }

  /// Same as `sweep_idle`, measuring idleness against `now`.
  #[instrument(name = "CartSessions::sweep_idle", skip(self, now), fields(ttl_secs = ttl.as_secs()))]
  pub fn sweep_idle_at(&self, now: Instant, ttl: Duration) -> usize {
    let mut registry = self.registry.write();
    let before = registry.len();
    registry.retain(|_, entry| now.saturating_duration_since(entry.last_seen) <= ttl);
    let ended = before - registry.len();
    if ended > 0 {
      event!(Level::INFO, ended, remaining = registry.len(), "Expired idle cart sessions.");
    }
    ended
  }

  pub fn len(&self) -> usize {
    self.registry.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.registry.read().is_empty()
  }
}
