//! Bounded in-memory cache for raw upstream responses.
//!
//! Entries are keyed by the sorted series set and year range. The cache holds
//! at most `capacity` entries; inserting into a full cache evicts the oldest
//! insertion, and entries older than `ttl` are treated as misses.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::models::TimeSeriesResponse;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    series_ids: Vec<String>,
    start_year: i32,
    end_year: i32,
}

impl CacheKey {
    /// Builds a key whose series order does not matter.
    pub fn new(series_ids: &[String], start_year: i32, end_year: i32) -> Self {
        let mut series_ids = series_ids.to_vec();
        series_ids.sort();
        series_ids.dedup();
        Self {
            series_ids,
            start_year,
            end_year,
        }
    }
}

struct Entry {
    response: TimeSeriesResponse,
    inserted_at: Instant,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<CacheKey, Entry>,
    order: VecDeque<CacheKey>,
}

pub struct ResponseCache {
    inner: Mutex<Inner>,
    capacity: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResponseCache {
    pub const DEFAULT_CAPACITY: usize = 256;
    pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: capacity.max(1),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<TimeSeriesResponse> {
        let mut inner = self.inner.lock();
        let fresh = inner
            .entries
            .get(key)
            .map(|entry| entry.inserted_at.elapsed() < self.ttl);

        match fresh {
            Some(true) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                inner.entries.get(key).map(|entry| entry.response.clone())
            }
            Some(false) => {
                inner.entries.remove(key);
                inner.order.retain(|k| k != key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: CacheKey, response: TimeSeriesResponse) {
        let mut inner = self.inner.lock();
        if inner.entries.contains_key(&key) {
            inner.order.retain(|k| k != &key);
        }
        while inner.entries.len() >= self.capacity && !inner.entries.contains_key(&key) {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            Entry {
                response,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY, Self::DEFAULT_TTL)
    }
}
