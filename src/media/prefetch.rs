// SPDX-License-Identifier: MPL-2.0
//! Image prefetch cache for faster viewer navigation.
//!
//! The viewer prefetches the images next to the current one so stepping
//! through an album does not wait on the network.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used images are evicted first
//! - **Memory-bounded**: Total cache size limited by a byte budget and an entry count
//! - **Filename-keyed**: Images indexed by their stored catalog filename
//! - **Fire-and-forget**: Prefetch tasks run detached; their failures are only logged
//!
//! # Usage
//!
//! ```ignore
//! let cache = shared_cache(PrefetchConfig::default());
//! let handles = spawn_prefetch(api.clone(), cache.clone(), vec!["a.png".into()]);
//! // later, when "a.png" is displayed
//! let bytes = cache.lock().await.get("a.png");
//! ```

use crate::application::port::CatalogApi;
use crate::config::{
    PrefetchSettings, DEFAULT_PREFETCH_COUNT, DEFAULT_PREFETCH_MAX_BYTES,
    DEFAULT_PREFETCH_MAX_IMAGES, MAX_PREFETCH_COUNT, MAX_PREFETCH_MAX_BYTES,
    MAX_PREFETCH_MAX_IMAGES, MIN_PREFETCH_MAX_BYTES, MIN_PREFETCH_MAX_IMAGES,
};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Configuration for the prefetch cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefetchConfig {
    /// Maximum cache size in bytes.
    pub max_bytes: usize,

    /// Maximum number of images to cache.
    pub max_images: usize,

    /// Number of images to prefetch in each direction (next/previous).
    pub prefetch_count: usize,

    /// Whether prefetching is enabled.
    pub enabled: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_PREFETCH_MAX_BYTES,
            max_images: DEFAULT_PREFETCH_MAX_IMAGES,
            prefetch_count: DEFAULT_PREFETCH_COUNT,
            enabled: true,
        }
    }
}

impl PrefetchConfig {
    /// Creates a new prefetch configuration with specified limits, clamped to
    /// the supported ranges.
    #[must_use]
    pub fn new(max_bytes: usize, max_images: usize, prefetch_count: usize) -> Self {
        Self {
            max_bytes: max_bytes.clamp(MIN_PREFETCH_MAX_BYTES, MAX_PREFETCH_MAX_BYTES),
            max_images: max_images.clamp(MIN_PREFETCH_MAX_IMAGES, MAX_PREFETCH_MAX_IMAGES),
            prefetch_count: prefetch_count.min(MAX_PREFETCH_COUNT),
            enabled: true,
        }
    }

    /// Creates a disabled prefetch configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

impl From<&PrefetchSettings> for PrefetchConfig {
    fn from(settings: &PrefetchSettings) -> Self {
        let config = Self::new(
            settings.max_bytes,
            settings.max_images,
            settings.prefetch_count,
        );
        Self {
            enabled: settings.enabled,
            ..config
        }
    }
}

/// Statistics about prefetch cache performance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefetchStats {
    /// Number of images currently in cache.
    pub image_count: usize,

    /// Total bytes currently used by cached images.
    pub total_bytes: usize,

    pub hits: u64,
    pub misses: u64,

    /// Number of images evicted due to limits.
    pub evictions: u64,

    pub insertions: u64,
}

impl PrefetchStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU cache of downloaded image bytes.
pub struct ImagePrefetchCache {
    cache: LruCache<String, Arc<Vec<u8>>>,
    config: PrefetchConfig,
    current_bytes: usize,
    stats: PrefetchStats,
}

impl ImagePrefetchCache {
    #[must_use]
    pub fn new(config: PrefetchConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_images).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
            config,
            current_bytes: 0,
            stats: PrefetchStats::default(),
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PrefetchConfig::default())
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Returns the number of images to prefetch in each direction.
    #[must_use]
    pub fn prefetch_count(&self) -> usize {
        self.config.prefetch_count
    }

    /// Inserts image bytes into the cache.
    ///
    /// Returns `true` if the image was inserted, `false` if caching is disabled
    /// or the image is larger than half the byte budget.
    pub fn insert(&mut self, filename: String, bytes: Vec<u8>) -> bool {
        if !self.config.enabled {
            return false;
        }

        let size = bytes.len();
        if size > self.config.max_bytes / 2 {
            return false;
        }

        if let Some(existing) = self.cache.pop(&filename) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.len());
        }

        while self.current_bytes + size > self.config.max_bytes {
            let Some((_, evicted)) = self.cache.pop_lru() else {
                break;
            };
            self.current_bytes = self.current_bytes.saturating_sub(evicted.len());
            self.stats.evictions += 1;
        }

        // A full cache evicts its LRU entry on push.
        if let Some((_, evicted)) = self.cache.push(filename, Arc::new(bytes)) {
            self.current_bytes = self.current_bytes.saturating_sub(evicted.len());
            self.stats.evictions += 1;
        }

        self.current_bytes += size;
        self.stats.insertions += 1;
        self.stats.image_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;

        true
    }

    /// Gets cached bytes by filename. Updates LRU order on access.
    pub fn get(&mut self, filename: &str) -> Option<Arc<Vec<u8>>> {
        if !self.config.enabled {
            return None;
        }

        if let Some(bytes) = self.cache.get(filename) {
            self.stats.hits += 1;
            Some(Arc::clone(bytes))
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Checks for a cached image without updating LRU order.
    #[must_use]
    pub fn contains(&self, filename: &str) -> bool {
        self.config.enabled && self.cache.contains(filename)
    }

    /// Returns the filenames not already cached.
    #[must_use]
    pub fn filenames_to_prefetch(&self, filenames: &[String]) -> Vec<String> {
        if !self.config.enabled {
            return Vec::new();
        }

        filenames
            .iter()
            .filter(|name| !self.cache.contains(name.as_str()))
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.current_bytes = 0;
        self.stats.image_count = 0;
        self.stats.total_bytes = 0;
    }

    #[must_use]
    pub fn stats(&self) -> PrefetchStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns the current memory usage in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }

    #[must_use]
    pub fn config(&self) -> &PrefetchConfig {
        &self.config
    }
}

impl std::fmt::Debug for ImagePrefetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePrefetchCache")
            .field("enabled", &self.config.enabled)
            .field("image_count", &self.cache.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .field("max_images", &self.config.max_images)
            .field("prefetch_count", &self.config.prefetch_count)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Cache shared between the viewer and its prefetch tasks.
pub type SharedPrefetchCache = Arc<Mutex<ImagePrefetchCache>>;

#[must_use]
pub fn shared_cache(config: PrefetchConfig) -> SharedPrefetchCache {
    Arc::new(Mutex::new(ImagePrefetchCache::new(config)))
}

/// Starts one detached download per uncached filename.
///
/// Returns each task handle keyed by its filename, so a caller that needs an
/// image still in flight can wait for it instead of downloading it twice.
/// Nobody has to await the handles. Downloads are not ordered relative to
/// each other or to the caller's own requests. A failed download is logged at
/// debug level and otherwise ignored.
pub async fn spawn_prefetch(
    api: Arc<dyn CatalogApi>,
    cache: SharedPrefetchCache,
    filenames: Vec<String>,
) -> Vec<(String, JoinHandle<()>)> {
    let pending = cache.lock().await.filenames_to_prefetch(&filenames);

    pending
        .into_iter()
        .map(|filename| {
            let api = Arc::clone(&api);
            let cache = Arc::clone(&cache);
            let name = filename.clone();
            let handle = tokio::spawn(async move {
                match api.fetch_image(&filename).await {
                    Ok(bytes) => {
                        cache.lock().await.insert(filename, bytes);
                    }
                    Err(err) => {
                        tracing::debug!(%filename, error = %err, "prefetch failed");
                    }
                }
            });
            (name, handle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderKey;
    use crate::infrastructure::memory::InMemoryCatalog;

    fn bytes(len: usize) -> Vec<u8> {
        vec![0u8; len]
    }

    fn small_config(max_bytes: usize, max_images: usize) -> PrefetchConfig {
        PrefetchConfig {
            max_bytes,
            max_images,
            prefetch_count: 1,
            enabled: true,
        }
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = ImagePrefetchCache::with_defaults();
        assert!(cache.is_empty());
        assert_eq!(cache.memory_usage(), 0);
    }

    #[test]
    fn insert_and_get_image() {
        let mut cache = ImagePrefetchCache::with_defaults();
        assert!(cache.insert("a.png".into(), bytes(100)));
        assert_eq!(cache.get("a.png").map(|b| b.len()), Some(100));
    }

    #[test]
    fn disabled_cache_returns_none() {
        let mut cache = ImagePrefetchCache::new(PrefetchConfig::disabled());
        assert!(!cache.insert("a.png".into(), bytes(10)));
        assert!(cache.get("a.png").is_none());
        assert!(cache.filenames_to_prefetch(&["a.png".into()]).is_empty());
    }

    #[test]
    fn byte_budget_is_respected() {
        let mut cache = ImagePrefetchCache::new(small_config(1_000, 100));
        for i in 0..15 {
            cache.insert(format!("image{i}.png"), bytes(200));
        }
        assert!(cache.memory_usage() <= 1_000);
        assert!(cache.stats().evictions > 0);
        assert!(cache.contains("image14.png"));
        assert!(!cache.contains("image0.png"));
    }

    #[test]
    fn entry_limit_keeps_byte_count_accurate() {
        let mut cache = ImagePrefetchCache::new(small_config(10_000, 2));
        for i in 0..3 {
            cache.insert(format!("image{i}.png"), bytes(100));
        }
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.memory_usage(), 200);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn large_image_not_cached() {
        let mut cache = ImagePrefetchCache::new(small_config(1_000, 10));
        assert!(!cache.insert("huge.png".into(), bytes(501)));
        assert!(cache.is_empty());
    }

    #[test]
    fn duplicate_filename_replaces_entry() {
        let mut cache = ImagePrefetchCache::with_defaults();
        cache.insert("a.png".into(), bytes(10));
        cache.insert("a.png".into(), bytes(30));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.memory_usage(), 30);
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let mut cache = ImagePrefetchCache::with_defaults();
        cache.insert("a.png".into(), bytes(10));

        let _ = cache.get("a.png");
        let _ = cache.get("missing.png");
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
        assert!((cache.stats().hit_rate() - 50.0).abs() < 0.01);
    }

    #[test]
    fn config_clamps_values() {
        let config = PrefetchConfig::new(0, 0, 100);
        assert_eq!(config.max_bytes, MIN_PREFETCH_MAX_BYTES);
        assert_eq!(config.max_images, MIN_PREFETCH_MAX_IMAGES);
        assert_eq!(config.prefetch_count, MAX_PREFETCH_COUNT);
    }

    #[test]
    fn settings_convert_with_enabled_flag() {
        let settings = PrefetchSettings {
            enabled: false,
            ..PrefetchSettings::default()
        };
        let config = PrefetchConfig::from(&settings);
        assert!(!config.enabled);
        assert_eq!(config.max_images, DEFAULT_PREFETCH_MAX_IMAGES);
    }

    #[tokio::test]
    async fn prefetch_fills_cache_and_ignores_failures() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let album = catalog.seed_album("album").await;
        catalog.seed_image(&album, "a.png", OrderKey::new(1)).await;
        let filename = catalog.list_items(&album).await.unwrap()[0]
            .filename
            .clone()
            .unwrap();

        let cache = shared_cache(PrefetchConfig::default());
        let api: Arc<dyn CatalogApi> = catalog.clone();
        let handles = spawn_prefetch(
            api.clone(),
            cache.clone(),
            vec![filename.clone(), "missing.png".to_string()],
        )
        .await;
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].0, filename);
        for (_, handle) in handles {
            handle.await.unwrap();
        }

        let mut guard = cache.lock().await;
        assert_eq!(guard.len(), 1);
        assert_eq!(guard.get(&filename).unwrap().as_slice(), b"a.png");
        drop(guard);

        let handles = spawn_prefetch(api, cache, vec![filename]).await;
        assert!(handles.is_empty());
    }
}
