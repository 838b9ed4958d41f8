//! Short-lived lookup cache for `GET /pokemons/{id}`.
//!
//! Writes never invalidate it, so a cached view can be stale for up to one
//! TTL after an update, delete or battle.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Map of values that each carry their own expiry deadline.
pub struct TtlCache<K, V> {
    slots: RwLock<HashMap<K, Slot<V>>>,
    ttl: Duration,
}

struct Slot<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Slot<V> {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store `value` until one TTL from now. Re-inserting pushes the deadline out.
    pub async fn insert(&self, key: K, value: V) {
        let expires_at = Instant::now() + self.ttl;
        self.put(key, value, expires_at).await;
    }

    #[cfg(test)]
    async fn insert_expiring_at(&self, key: K, value: V, expires_at: Instant) {
        self.put(key, value, expires_at).await;
    }

    async fn put(&self, key: K, value: V, expires_at: Instant) {
        self.slots
            .write()
            .await
            .insert(key, Slot { value, expires_at });
    }

    /// Live value for `key`. Stale slots read as absent but stay until the next purge.
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let slots = self.slots.read().await;
        slots
            .get(key)
            .filter(|slot| slot.is_live(now))
            .map(|slot| slot.value.clone())
    }

    /// Drop every stale slot, returning how many went.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut slots = self.slots.write().await;
        let before = slots.len();
        slots.retain(|_, slot| slot.is_live(now));
        before - slots.len()
    }

    /// Slot count, stale ones included.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}
