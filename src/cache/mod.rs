//! Cache module for incremental regeneration
//!
//! Loaded post records are kept per slug together with the time they were
//! fetched. An entry older than the revalidation window is still served, but
//! the caller is told to refresh it in the background. At most one refresh per
//! slug is in flight at a time.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

use crate::content::Post;

/// A cached record and when it was fetched
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub post: Arc<Post>,
    pub fetched_at: Instant,
}

/// Result of looking up a slug
#[derive(Debug, Clone)]
pub enum Lookup {
    /// Within the revalidation window
    Fresh(Arc<Post>),
    /// Past the window; serve it, then refresh
    Stale(Arc<Post>),
    /// Never loaded (or evicted)
    Missing,
}

/// Per-slug record cache with a fixed revalidation window
#[derive(Debug)]
pub struct PageCache {
    window: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
    refreshing: Mutex<HashSet<String>>,
}

impl PageCache {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: RwLock::new(HashMap::new()),
            refreshing: Mutex::new(HashSet::new()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub async fn lookup(&self, slug: &str) -> Lookup {
        self.lookup_at(slug, Instant::now()).await
    }

    /// Look up a slug as seen at `now`
    pub async fn lookup_at(&self, slug: &str, now: Instant) -> Lookup {
        let entries = self.entries.read().await;
        match entries.get(slug) {
            Some(entry) if now.saturating_duration_since(entry.fetched_at) < self.window => {
                Lookup::Fresh(entry.post.clone())
            }
            Some(entry) => Lookup::Stale(entry.post.clone()),
            None => Lookup::Missing,
        }
    }

    pub async fn insert(&self, slug: &str, post: Arc<Post>) {
        self.insert_at(slug, post, Instant::now()).await
    }

    pub async fn insert_at(&self, slug: &str, post: Arc<Post>, fetched_at: Instant) {
        self.entries
            .write()
            .await
            .insert(slug.to_string(), CacheEntry { post, fetched_at });
    }

    pub async fn remove(&self, slug: &str) -> Option<CacheEntry> {
        self.entries.write().await.remove(slug)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Claim the refresh for a slug; false if one is already running
    pub async fn begin_refresh(&self, slug: &str) -> bool {
        self.refreshing.lock().await.insert(slug.to_string())
    }

    pub async fn end_refresh(&self, slug: &str) {
        self.refreshing.lock().await.remove(slug);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(title: &str) -> Arc<Post> {
        Arc::new(
            serde_json::from_value(json!({
                "_id": "p1",
                "_createdAt": "2024-01-01T00:00:00Z",
                "title": title,
                "slug": { "current": "a" }
            }))
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_fresh_then_stale() {
        let cache = PageCache::new(Duration::from_secs(5));
        let start = Instant::now();
        cache.insert_at("a", post("A"), start).await;

        assert!(matches!(
            cache.lookup_at("a", start + Duration::from_secs(4)).await,
            Lookup::Fresh(_)
        ));
        match cache.lookup_at("a", start + Duration::from_secs(5)).await {
            Lookup::Stale(p) => assert_eq!(p.title, "A"),
            other => panic!("expected stale, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_and_remove() {
        let cache = PageCache::new(Duration::from_secs(5));
        assert!(matches!(cache.lookup("a").await, Lookup::Missing));
        cache.insert("a", post("A")).await;
        assert_eq!(cache.len().await, 1);
        assert!(cache.remove("a").await.is_some());
        assert_eq!(cache.len().await, 0);
        assert!(matches!(cache.lookup("a").await, Lookup::Missing));
    }

    #[tokio::test]
    async fn test_insert_replaces_snapshot() {
        let cache = PageCache::new(Duration::from_secs(5));
        let start = Instant::now();
        cache.insert_at("a", post("old"), start).await;
        cache
            .insert_at("a", post("new"), start + Duration::from_secs(10))
            .await;
        match cache.lookup_at("a", start + Duration::from_secs(11)).await {
            Lookup::Fresh(p) => assert_eq!(p.title, "new"),
            other => panic!("expected fresh, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_refresh_per_slug() {
        let cache = PageCache::new(Duration::from_secs(5));
        assert!(cache.begin_refresh("a").await);
        assert!(!cache.begin_refresh("a").await);
        assert!(cache.begin_refresh("b").await);
        cache.end_refresh("a").await;
        assert!(cache.begin_refresh("a").await);
    }
}
