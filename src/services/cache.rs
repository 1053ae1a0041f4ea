//! In-memory TTL cache for analysis responses.
//!
//! Memoizes repeated identical requests for the configured TTL. The cache
//! is an optimization only: the analysis path never requires it, and a
//! disabled cache changes latency, not results. Unseeded requests are never
//! cached, since their samples are intentionally non-reproducible.

use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::AnalysisResponse;
use crate::config::CacheSettings;
use crate::models::ValidatedRequest;

struct CacheEntry {
    stored_at: Instant,
    response: AnalysisResponse,
}

/// Shared TTL cache keyed by request fingerprint.
#[derive(Clone)]
pub struct ResultCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
    enabled: bool,
}

impl ResultCache {
    pub fn new(settings: &CacheSettings) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_secs(settings.ttl_secs),
            enabled: settings.enabled,
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(&CacheSettings {
            enabled: false,
            ttl_secs: 0,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Stable fingerprint of a validated request, usable as a cache key.
    pub fn fingerprint(request: &ValidatedRequest) -> String {
        let variables: Vec<String> = request.variables.iter().map(|v| v.to_string()).collect();
        let thresholds: Vec<String> = request
            .thresholds
            .iter()
            .map(|(variable, threshold)| format!("{}={}", variable, threshold))
            .collect();
        let key = format!(
            "{:.4}_{:.4}_{}_{}_{}_{:?}_{}_{}",
            request.location.latitude,
            request.location.longitude,
            request.target,
            request.years,
            request.window_days,
            request.seed,
            variables.join(","),
            thresholds.join(",")
        );
        hex::encode(Sha256::digest(key.as_bytes()))
    }

    /// Fetch a cached response if present and fresh. Stale entries are
    /// evicted on access.
    pub fn get(&self, key: &str) -> Option<AnalysisResponse> {
        if !self.enabled {
            return None;
        }

        let expired = {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.response.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.entries.write().remove(key);
        }
        None
    }

    /// Store a response under the given fingerprint.
    pub fn insert(&self, key: String, response: AnalysisResponse) {
        if !self.enabled {
            return;
        }
        self.entries.write().insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                response,
            },
        );
    }

    /// Drop every entry older than the TTL.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries
            .write()
            .retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
