//! Style-resolution provider
//!
//! Owns the default theme tree, merges each caller theme onto it once and
//! hands out the shared result.

use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use vpack_merge::merge;

use super::resolved::{fingerprint, ResolvedTheme};
use super::ThemeError;
use crate::config::DefaultTheme;

/// Cache key used for `resolve(None)`
const DEFAULTS_KEY: &str = "defaults";

/// Default number of memoized themes
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Bounded memo of resolved themes; the oldest entry is evicted first.
#[derive(Debug)]
struct ThemeCache {
    /// Caller theme fingerprint -> resolved theme
    entries: HashMap<String, Arc<ResolvedTheme>>,
    /// Insertion order, oldest first
    order: VecDeque<String>,
    capacity: usize,
}

impl ThemeCache {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn get(&self, key: &str) -> Option<Arc<ResolvedTheme>> {
        self.entries.get(key).map(Arc::clone)
    }

    /// Insert unless present; returns the cached entry either way
    fn insert(&mut self, key: String, resolved: Arc<ResolvedTheme>) -> Arc<ResolvedTheme> {
        if let Some(existing) = self.entries.get(&key) {
            return Arc::clone(existing);
        }

        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::trace!(key = %oldest, "evicted theme");
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, Arc::clone(&resolved));
        resolved
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Merges caller themes onto a default theme, memoized by value.
#[derive(Debug)]
pub struct ThemeProvider {
    defaults: Value,
    cache: Mutex<ThemeCache>,
}

impl ThemeProvider {
    pub fn new(defaults: Value) -> Self {
        Self::with_cache_capacity(defaults, DEFAULT_CACHE_CAPACITY)
    }

    /// Provider that memoizes at most `capacity` themes (minimum 1)
    pub fn with_cache_capacity(defaults: Value, capacity: usize) -> Self {
        Self {
            defaults,
            cache: Mutex::new(ThemeCache::new(capacity)),
        }
    }

    /// Provider over the library's built-in palettes
    pub fn with_builtin_defaults() -> Self {
        Self::new(DefaultTheme::default().to_value())
    }

    pub fn defaults(&self) -> &Value {
        &self.defaults
    }

    /// Resolve the effective theme for an optional caller theme.
    ///
    /// Equal caller themes (by value, key order ignored) share one merge and
    /// one `Arc` while they stay cached.
    pub fn resolve(&self, theme: Option<&Value>) -> Result<Arc<ResolvedTheme>, ThemeError> {
        let key = match theme {
            Some(theme) => fingerprint(theme)?,
            None => DEFAULTS_KEY.to_string(),
        };

        if let Some(resolved) = self.lock_cache().get(&key) {
            tracing::trace!(key = %key, "theme cache hit");
            return Ok(resolved);
        }

        // Merge outside the lock; a racing thread may merge the same theme,
        // the first insert wins
        let merged = match theme {
            Some(theme) => merge(&self.defaults, theme),
            None => self.defaults.clone(),
        };
        let resolved = Arc::new(ResolvedTheme::new(merged)?);

        tracing::debug!(
            fingerprint = %resolved.fingerprint(),
            colors = %resolved.palette_names().join(", "),
            primary_500 = ?resolved.color("primary-500"),
            success_700 = ?resolved.color("success-700"),
            "theme initialized"
        );

        Ok(self.lock_cache().insert(key, resolved))
    }

    /// Number of memoized themes
    pub fn cached_themes(&self) -> usize {
        self.lock_cache().entries.len()
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    // The cache only ever holds complete entries, so a poisoned lock is still usable
    fn lock_cache(&self) -> MutexGuard<'_, ThemeCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ThemeProvider {
    fn default() -> Self {
        Self::with_builtin_defaults()
    }
}
