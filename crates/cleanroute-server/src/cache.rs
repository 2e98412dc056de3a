//! Request-level memoization.
//!
//! Pure memoization keyed on the full request input: entries only skip
//! repeated provider round-trips, they never change scoring results.
//! Route geometries are keyed on the endpoint pair; rankings additionally
//! key on the sampling density, so logically distinct requests never share
//! an entry.

use cleanroute_core::{Coordinate, ScoredRoute};
use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub trait CacheEntry {
    fn fetched_at(&self) -> Instant;
}

#[derive(Clone)]
pub struct CachedRoutes {
    pub fetched_at: Instant,
    pub routes: Vec<Vec<Coordinate>>,
}

#[derive(Clone)]
pub struct CachedRanking {
    pub fetched_at: Instant,
    pub routes: Vec<ScoredRoute>,
}

impl CacheEntry for CachedRoutes {
    fn fetched_at(&self) -> Instant {
        self.fetched_at
    }
}

impl CacheEntry for CachedRanking {
    fn fetched_at(&self) -> Instant {
        self.fetched_at
    }
}

pub type RouteCache = DashMap<String, CachedRoutes>;
pub type RankingCache = DashMap<String, CachedRanking>;

/// Cache key for a fetched route set.
pub fn endpoints_key(start: Coordinate, end: Coordinate) -> String {
    format!("{}:{}:{}:{}", start.lat, start.lon, end.lat, end.lon)
}

/// Cache key for a ranked result; includes every input that affects it.
pub fn ranking_key(start: Coordinate, end: Coordinate, samples: usize) -> String {
    format!("{}:{}", endpoints_key(start, end), samples)
}

/// Fetch a cached value if it is still within its lifetime.
pub fn get_fresh<V>(cache: &DashMap<String, V>, key: &str, ttl: Duration) -> Option<V>
where
    V: CacheEntry + Clone,
{
    let entry = cache.get(key)?;
    if entry.fetched_at().elapsed() <= ttl {
        Some(entry.value().clone())
    } else {
        None
    }
}

/// Drop expired entries, then oldest entries beyond the size cap.
pub fn prune_cache<K, V>(cache: &DashMap<K, V>, max_entries: usize, max_age: Duration)
where
    K: Clone + Eq + Hash,
    V: CacheEntry,
{
    let now = Instant::now();
    let mut entries: Vec<(K, Instant)> = cache
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().fetched_at()))
        .collect();

    for (key, fetched_at) in &entries {
        if now.duration_since(*fetched_at) > max_age {
            cache.remove(key);
        }
    }

    if cache.len() <= max_entries {
        return;
    }

    entries.sort_by_key(|(_, fetched_at)| *fetched_at);
    for (key, _) in entries {
        if cache.len() <= max_entries {
            break;
        }
        cache.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(age: Duration) -> CachedRoutes {
        CachedRoutes {
            fetched_at: Instant::now() - age,
            routes: Vec::new(),
        }
    }

    #[test]
    fn distinct_densities_use_distinct_keys() {
        let start = Coordinate::new(28.6315, 77.2167);
        let end = Coordinate::new(28.4595, 77.0266);
        assert_ne!(ranking_key(start, end, 12), ranking_key(start, end, 13));
        assert_ne!(
            endpoints_key(start, end),
            endpoints_key(end, start),
            "direction matters"
        );
    }

    #[test]
    fn fresh_entries_are_returned_and_stale_ones_are_not() {
        let cache: RouteCache = DashMap::new();
        cache.insert("a".to_string(), entry(Duration::from_secs(1)));
        cache.insert("b".to_string(), entry(Duration::from_secs(60)));

        let ttl = Duration::from_secs(30);
        assert!(get_fresh(&cache, "a", ttl).is_some());
        assert!(get_fresh(&cache, "b", ttl).is_none());
        assert!(get_fresh(&cache, "missing", ttl).is_none());
    }

    #[test]
    fn prune_removes_expired_then_oldest() {
        let cache: RouteCache = DashMap::new();
        cache.insert("old".to_string(), entry(Duration::from_secs(120)));
        cache.insert("mid".to_string(), entry(Duration::from_secs(20)));
        cache.insert("new".to_string(), entry(Duration::from_secs(1)));

        prune_cache(&cache, 1, Duration::from_secs(60));

        assert!(!cache.contains_key("old"));
        assert!(!cache.contains_key("mid"));
        assert!(cache.contains_key("new"));
    }
}
