use std::fmt::{self, Write};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use feed_core::{FeedQuery, Page, PageRequest};
use feed_logging::{feed_debug, feed_warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AtomicFileWriter, PersistError, RepositorySource, SourceError};

/// Pages younger than this are served without touching the network.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub fetched_at: DateTime<Utc>,
    pub page: Page,
}

/// Stable textual key for a request. The request id is not part of it.
pub fn cache_key(request: &PageRequest) -> String {
    let mut key = match &request.query {
        FeedQuery::Trending {
            language,
            min_stars,
            max_stars,
            date_from,
            date_to,
        } => {
            let mut key = format!("trending:language={}", language.as_deref().unwrap_or("*"));
            push_filter(&mut key, "min_stars", min_stars);
            push_filter(&mut key, "max_stars", max_stars);
            push_filter(&mut key, "date_from", date_from);
            push_filter(&mut key, "date_to", date_to);
            key
        }
        FeedQuery::Search { q } => format!("search:q={q}"),
        FeedQuery::AdvancedSearch {
            q,
            language,
            min_stars,
        } => {
            let mut key = format!("advanced:q={q}");
            push_filter(&mut key, "language", language);
            push_filter(&mut key, "min_stars", min_stars);
            key
        }
    };
    let _ = write!(key, ":offset={}:limit={}", request.offset, request.limit);
    key
}

fn push_filter<T: fmt::Display>(key: &mut String, name: &str, value: &Option<T>) {
    if let Some(value) = value {
        let _ = write!(key, ":{name}={value}");
    }
}

/// One JSON file per page under a cache directory.
#[derive(Debug, Clone)]
pub struct PageCache {
    writer: AtomicFileWriter,
    ttl: Duration,
}

impl PageCache {
    pub fn new(dir: PathBuf, ttl: Duration) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached page when present, intact and younger than the TTL.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<Page> {
        let path = self.writer.dir().join(file_name(key));
        let content = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                feed_warn!("Failed to read cache entry {:?}: {}", path, err);
                return None;
            }
        };
        let entry: CacheEntry = match serde_json::from_slice(&content) {
            Ok(entry) => entry,
            Err(err) => {
                feed_warn!("Discarding corrupt cache entry {:?}: {}", path, err);
                return None;
            }
        };
        if entry.key != key {
            return None;
        }
        let fresh = (now - entry.fetched_at)
            .to_std()
            .map(|age| age < self.ttl)
            .unwrap_or(false);
        fresh.then_some(entry.page)
    }

    pub fn put(&self, key: &str, page: &Page, now: DateTime<Utc>) -> Result<PathBuf, PersistError> {
        let entry = CacheEntry {
            key: key.to_string(),
            fetched_at: now,
            page: page.clone(),
        };
        self.writer.write_json(&file_name(key), &entry)
    }
}

fn file_name(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    let mut hex = String::with_capacity(16);
    for byte in digest.iter().take(8) {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    format!("page-{hex}.json")
}

/// Wraps a source with a [`PageCache`].
pub struct CachedSource<S> {
    inner: S,
    cache: PageCache,
    now: Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>,
}

impl<S: RepositorySource> CachedSource<S> {
    pub fn new(inner: S, cache: PageCache) -> Self {
        Self {
            inner,
            cache,
            now: Arc::new(Utc::now),
        }
    }

    /// Replaces the wall clock, for freshness checks in tests.
    pub fn with_clock(mut self, now: Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>) -> Self {
        self.now = now;
        self
    }
}

#[async_trait::async_trait]
impl<S: RepositorySource> RepositorySource for CachedSource<S> {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, SourceError> {
        let key = cache_key(request);
        if request.fresh {
            feed_debug!("Bypassing cache for {}", key);
        } else if let Some(page) = self.cache.get(&key, (self.now)()) {
            feed_debug!("Cache hit {}", key);
            return Ok(page);
        }

        let page = self.inner.fetch_page(request).await?;
        if let Err(err) = self.cache.put(&key, &page, (self.now)()) {
            feed_warn!("Failed to cache {}: {}", key, err);
        }
        Ok(page)
    }
}
