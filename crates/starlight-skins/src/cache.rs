//! In-memory TTL cache for decoded skins.
//!
//! The cache is keyed by the resolved render URL and stores decoded images
//! together with their derived display metadata. Entries expire after a
//! fixed time-to-live; expiry is enforced lazily when a stale entry is
//! looked up, plus on demand via [`SkinCache::purge_expired`].

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
    time::{Duration, Instant},
};

use image::RgbaImage;

/// Default entry lifetime, matching the upstream reference.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// A cached, decoded skin.
///
/// Read-only after creation. Cloning is cheap: the pixel data is shared
/// behind an [`Arc`], so handing entries to callers never copies the image.
#[derive(Debug, Clone)]
pub struct CachedSkin {
    /// The decoded image.
    pub image: Arc<RgbaImage>,
    /// Display height derived from the requested width and the image's
    /// aspect ratio.
    pub display_height: f32,
    /// When the entry was stored.
    inserted_at: Instant,
}

impl CachedSkin {
    /// Age of this entry relative to `now`.
    #[must_use]
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }
}

/// A thread-safe, URL-keyed skin cache with a fixed time-to-live.
///
/// Cloning shares the underlying map, so a clone can be handed to each
/// component that issues render requests. The cache is an explicit object
/// owned by the host; it is dropped with the host session.
///
/// There is no size bound: age is the only removal trigger. A stale entry
/// is removed the next time it is looked up; entries that stop being looked
/// up linger until [`purge_expired`](Self::purge_expired) runs.
#[derive(Debug)]
pub struct SkinCache {
    entries: Arc<RwLock<HashMap<String, CachedSkin>>>,
    ttl: Duration,
}

impl SkinCache {
    /// Create a cache with the default 10-minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// The configured entry lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a cached skin by its render URL.
    ///
    /// Returns the entry if present and no older than the TTL. A stale
    /// entry is removed during the lookup and reported as a miss.
    #[must_use]
    pub fn lookup(&self, url: &str) -> Option<CachedSkin> {
        self.lookup_at(url, Instant::now())
    }

    fn lookup_at(&self, url: &str, now: Instant) -> Option<CachedSkin> {
        {
            let entries = self.entries.read().unwrap();
            match entries.get(url) {
                Some(entry) if entry.age(now) <= self.ttl => return Some(entry.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // The entry is stale. Re-check under the write lock: another caller
        // may have replaced it with a fresh entry in the meantime.
        let mut entries = self.entries.write().unwrap();
        if entries.get(url).is_some_and(|entry| entry.age(now) > self.ttl) {
            entries.remove(url);
            tracing::debug!(url, "evicted expired skin");
        }
        None
    }

    /// Store a decoded skin, unconditionally replacing any previous entry
    /// for the URL and stamping the current time.
    ///
    /// Returns the stored entry. The previous image is released once the
    /// last outstanding clone of its entry is dropped.
    pub fn store(&self, url: &str, image: Arc<RgbaImage>, display_height: f32) -> CachedSkin {
        self.store_at(url, image, display_height, Instant::now())
    }

    fn store_at(
        &self,
        url: &str,
        image: Arc<RgbaImage>,
        display_height: f32,
        now: Instant,
    ) -> CachedSkin {
        let entry = CachedSkin {
            image,
            display_height,
            inserted_at: now,
        };
        let mut entries = self.entries.write().unwrap();
        entries.insert(url.to_string(), entry.clone());
        entry
    }

    /// Remove every entry older than the TTL.
    ///
    /// Lazy expiry never touches entries that are no longer looked up; a
    /// host that renders a changing set of skins can run this periodically
    /// to bound memory.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    fn purge_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| entry.age(now) <= self.ttl);
        before - entries.len()
    }

    /// The number of cached entries, including any not yet expired lazily.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}

impl Default for SkinCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SkinCache {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}
