//! Image preload cache
//!
//! Deduplicates image fetches by URL. A URL is fetched at most once per
//! session: later requests get the cached handle, or join the fetch that
//! is already in flight. Failures are remembered as `None` and not retried,
//! so a broken image can never stall playback.
//!
//! Entries are never evicted. That is fine for a closed gallery; the cache
//! logs a warning once it grows past `SlideshowConfig::preload_warn_threshold`.

use crate::error::{PlaybackError, Result};
use crate::lock;
use crate::types::PreloadStatus;
use async_trait::async_trait;
use futures_util::future::{self, BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A fetched image, ready to be shown
#[derive(Debug, Clone)]
pub struct ImageHandle {
    /// URL the image was fetched from
    pub url: String,

    /// Encoded image bytes
    pub data: Arc<[u8]>,
}

impl ImageHandle {
    /// Create a new handle
    pub fn new(url: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            url: url.into(),
            data: data.into(),
        }
    }
}

/// Platform image fetcher
///
/// Implementors fetch (and optionally decode) images. Browser bindings wrap
/// an `<img>` element; `FsImageLoader` reads from disk.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Fetch the image at `url`
    async fn load(&self, url: &str) -> Result<ImageHandle>;

    /// Decode a fetched image ahead of display
    ///
    /// Best-effort: the default does nothing, and errors are only logged.
    async fn decode(&self, _image: &ImageHandle) -> Result<()> {
        Ok(())
    }
}

/// Loads images from a directory on disk
///
/// URLs are mapped to files by stripping `url_prefix` and joining the rest
/// onto `root`. Paths that try to leave `root` are rejected.
pub struct FsImageLoader {
    root: PathBuf,
    url_prefix: String,
}

impl FsImageLoader {
    /// Create a loader serving `url_prefix/...` from `root`
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    fn resolve(&self, url: &str) -> Result<PathBuf> {
        let relative = url
            .strip_prefix(self.url_prefix.as_str())
            .unwrap_or(url)
            .trim_start_matches('/');

        let relative = Path::new(relative);
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if !contained || relative.as_os_str().is_empty() {
            return Err(PlaybackError::image_load(url, "path escapes image root"));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ImageLoader for FsImageLoader {
    async fn load(&self, url: &str) -> Result<ImageHandle> {
        let path = self.resolve(url)?;
        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| PlaybackError::image_load(url, e.to_string()))?;

        Ok(ImageHandle::new(url, data))
    }

    async fn decode(&self, image: &ImageHandle) -> Result<()> {
        if image.data.is_empty() {
            return Err(PlaybackError::Decode(image.url.clone()));
        }
        Ok(())
    }
}

type SharedLoad = Shared<BoxFuture<'static, Option<ImageHandle>>>;

enum CacheEntry {
    Loading(SharedLoad),
    Loaded(ImageHandle),
    Failed,
}

/// URL-keyed preload cache
pub struct PreloadCache {
    loader: Arc<dyn ImageLoader>,
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    warn_threshold: usize,
    warned: AtomicBool,
}

impl PreloadCache {
    /// Create a cache fetching through `loader`
    pub fn new(loader: Arc<dyn ImageLoader>, warn_threshold: usize) -> Self {
        Self {
            loader,
            entries: Arc::new(Mutex::new(HashMap::new())),
            warn_threshold,
            warned: AtomicBool::new(false),
        }
    }

    /// Get the image at `url`, fetching it if nobody has yet
    ///
    /// Resolves to `None` when the fetch failed. The fetch itself runs as
    /// its own task, so dropping the returned future does not cancel it.
    /// Must be called inside a tokio runtime.
    pub fn preload(&self, url: &str) -> BoxFuture<'static, Option<ImageHandle>> {
        let mut entries = lock(&self.entries);

        match entries.get(url) {
            Some(CacheEntry::Loaded(handle)) => return future::ready(Some(handle.clone())).boxed(),
            Some(CacheEntry::Failed) => return future::ready(None).boxed(),
            Some(CacheEntry::Loading(pending)) => return pending.clone().boxed(),
            None => {}
        }

        tracing::debug!("Preloading {}", url);
        let load = Self::fetch(
            Arc::clone(&self.loader),
            Arc::clone(&self.entries),
            url.to_string(),
        )
        .boxed()
        .shared();

        entries.insert(url.to_string(), CacheEntry::Loading(load.clone()));
        let size = entries.len();
        drop(entries);

        if size > self.warn_threshold && !self.warned.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                "Preload cache holds {} images and is never evicted; large galleries will keep growing it",
                size
            );
        }

        tokio::spawn(load.clone());
        load.boxed()
    }

    /// Decode a fetched image through the loader
    pub async fn decode(&self, image: &ImageHandle) -> Result<()> {
        self.loader.decode(image).await
    }

    /// Current status of `url`, if it was ever requested
    pub fn status(&self, url: &str) -> Option<PreloadStatus> {
        lock(&self.entries).get(url).map(|entry| match entry {
            CacheEntry::Loading(_) => PreloadStatus::Loading,
            CacheEntry::Loaded(_) => PreloadStatus::Loaded,
            CacheEntry::Failed => PreloadStatus::Failed,
        })
    }

    /// Number of URLs ever requested
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Whether nothing was requested yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn fetch(
        loader: Arc<dyn ImageLoader>,
        entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
        url: String,
    ) -> Option<ImageHandle> {
        let result = loader.load(&url).await;

        let mut entries = lock(&entries);
        match result {
            Ok(handle) => {
                entries.insert(url, CacheEntry::Loaded(handle.clone()));
                Some(handle)
            }
            Err(e) => {
                tracing::debug!("Image unavailable: {}", e);
                entries.insert(url, CacheEntry::Failed);
                None
            }
        }
    }
}
