//! The post page: path resolution, data loading and regeneration
//!
//! `PostPages` ties the store to the revalidation cache. Paths resolved up
//! front are loaded eagerly; other slugs are loaded on first request when the
//! fallback policy allows it.

mod paths;
mod props;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::cache::{Lookup, PageCache};
use crate::config::Fallback;
use crate::content::Post;
use crate::store::{ContentStore, StoreError};

pub use paths::{is_valid_slug, resolve_paths, StaticPaths};
pub use props::{load_props, PageProps};

/// What a request for a slug resolves to
#[derive(Debug, Clone)]
pub enum PageOutcome {
    Rendered(Arc<Post>),
    NotFound,
}

pub struct PostPages {
    store: Arc<dyn ContentStore>,
    cache: PageCache,
    fallback: Fallback,
    known: RwLock<HashSet<String>>,
    /// One gate per slug with a blocking load in progress
    loading: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PostPages {
    pub fn new(store: Arc<dyn ContentStore>, fallback: Fallback, revalidate: Duration) -> Self {
        Self {
            store,
            cache: PageCache::new(revalidate),
            fallback,
            known: RwLock::new(HashSet::new()),
            loading: Mutex::new(HashMap::new()),
        }
    }

    pub fn revalidate(&self) -> Duration {
        self.cache.window()
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Resolve every path and load it into the cache
    pub async fn prerender(&self) -> Result<StaticPaths, StoreError> {
        let paths = resolve_paths(self.store.as_ref(), self.fallback).await?;

        for slug in &paths.paths {
            match load_props(self.store.as_ref(), slug, self.revalidate()).await? {
                PageProps::Found { post, .. } => self.cache.insert(slug, Arc::new(post)).await,
                PageProps::NotFound => {
                    tracing::warn!("Resolved path {} has no post", slug);
                }
            }
        }

        self.known.write().await.extend(paths.paths.iter().cloned());
        tracing::info!("Prerendered {} posts", self.cache.len().await);
        Ok(paths)
    }

    /// Serve a slug, refreshing stale entries in the background
    pub async fn get(self: &Arc<Self>, slug: &str) -> Result<PageOutcome, StoreError> {
        match self.cache.lookup(slug).await {
            Lookup::Fresh(post) => Ok(PageOutcome::Rendered(post)),
            Lookup::Stale(post) => {
                self.spawn_refresh(slug);
                Ok(PageOutcome::Rendered(post))
            }
            Lookup::Missing => {
                if !is_valid_slug(slug) {
                    return Ok(PageOutcome::NotFound);
                }
                if self.fallback == Fallback::Disabled && !self.known.read().await.contains(slug) {
                    return Ok(PageOutcome::NotFound);
                }
                self.load(slug).await
            }
        }
    }

    /// Load a slug now and cache it if found
    ///
    /// Concurrent callers for the same slug wait on the first one and then
    /// read its result from the cache.
    async fn load(&self, slug: &str) -> Result<PageOutcome, StoreError> {
        let gate = self
            .loading
            .lock()
            .await
            .entry(slug.to_string())
            .or_default()
            .clone();
        let _guard = gate.lock().await;

        let outcome = match self.cache.lookup(slug).await {
            Lookup::Fresh(post) | Lookup::Stale(post) => Ok(PageOutcome::Rendered(post)),
            Lookup::Missing => self.fetch(slug).await,
        };
        self.loading.lock().await.remove(slug);
        outcome
    }

    async fn fetch(&self, slug: &str) -> Result<PageOutcome, StoreError> {
        match load_props(self.store.as_ref(), slug, self.revalidate()).await? {
            PageProps::Found { post, .. } => {
                let post = Arc::new(post);
                self.cache.insert(slug, post.clone()).await;
                Ok(PageOutcome::Rendered(post))
            }
            PageProps::NotFound => Ok(PageOutcome::NotFound),
        }
    }

    fn spawn_refresh(self: &Arc<Self>, slug: &str) {
        let pages = Arc::clone(self);
        let slug = slug.to_string();
        tokio::spawn(async move {
            pages.refresh(&slug).await;
        });
    }

    /// Re-fetch a slug, keeping the old snapshot if the fetch fails
    pub async fn refresh(&self, slug: &str) {
        if !self.cache.begin_refresh(slug).await {
            return;
        }

        match load_props(self.store.as_ref(), slug, self.revalidate()).await {
            Ok(PageProps::Found { post, .. }) => {
                self.cache.insert(slug, Arc::new(post)).await;
                tracing::debug!("Regenerated {}", slug);
            }
            Ok(PageProps::NotFound) => {
                self.cache.remove(slug).await;
                tracing::info!("Post {} no longer exists, evicted", slug);
            }
            Err(e) => {
                tracing::warn!("Failed to regenerate {}: {}", slug, e);
            }
        }

        self.cache.end_refresh(slug).await;
    }
}
