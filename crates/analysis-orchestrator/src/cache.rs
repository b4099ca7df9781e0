use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

/// Keyed TTL cache handed to the route layer as a collaborator; the
/// analysis functions themselves never consult it.
pub struct TtlCache<T: Clone> {
    entries: DashMap<String, CacheEntry<T>>,
    ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key)?;
        if Utc::now() - entry.cached_at < self.ttl {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    pub fn put(&self, key: String, data: T) {
        self.entries.insert(
            key,
            CacheEntry {
                data,
                cached_at: Utc::now(),
            },
        );
    }
}
