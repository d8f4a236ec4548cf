use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use qamus_types::WordEntry;

/// Share of records dropped when the cache is full
const EVICTION_RATIO: f64 = 0.2;

struct CacheRecord {
    value: WordEntry,
    inserted_at: Instant,
}

/// Bounded, expiring memo of provider lookups keyed by normalized query
pub struct ResultCache {
    inner: Mutex<HashMap<String, CacheRecord>>,
    capacity: usize,
    expiry: Duration,
}

impl ResultCache {
    pub fn new(capacity: usize, expiry: Duration) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            expiry,
        }
    }

    pub fn normalize_key(key: &str) -> String {
        key.trim().to_lowercase()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheRecord>> {
        // Records stay consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<WordEntry> {
        self.get_at(key, Instant::now())
    }

    /// Lookup as of `now`; expired records are removed
    pub fn get_at(&self, key: &str, now: Instant) -> Option<WordEntry> {
        let key = Self::normalize_key(key);
        let mut records = self.lock();

        let expired = match records.get(&key) {
            None => return None,
            Some(record) => now.saturating_duration_since(record.inserted_at) > self.expiry,
        };

        if expired {
            tracing::debug!("Cache record for '{}' expired", key);
            records.remove(&key);
            return None;
        }

        records.get(&key).map(|record| record.value.clone())
    }

    pub fn put(&self, key: &str, value: WordEntry) {
        self.put_at(key, value, Instant::now());
    }

    /// Insert as of `now`, evicting the oldest records first when full
    pub fn put_at(&self, key: &str, value: WordEntry, now: Instant) {
        let key = Self::normalize_key(key);
        let mut records = self.lock();

        if !records.contains_key(&key) && records.len() >= self.capacity {
            Self::evict_oldest(&mut records);
        }

        records.insert(
            key,
            CacheRecord {
                value,
                inserted_at: now,
            },
        );
    }

    fn evict_oldest(records: &mut HashMap<String, CacheRecord>) {
        let size = records.len();
        // floor(0.2 * size), at least one so the capacity bound holds for small caches
        let count = ((size as f64 * EVICTION_RATIO).floor() as usize).max(1);

        let mut by_age: Vec<(Instant, String)> = records
            .iter()
            .map(|(key, record)| (record.inserted_at, key.clone()))
            .collect();
        by_age.sort();

        for (_, key) in by_age.into_iter().take(count) {
            records.remove(&key);
        }

        tracing::debug!("Evicted {} of {} cache records", count, size);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
