//! postpage-rs: blog post pages rendered from a headless content store
//!
//! Posts are fetched (joined with their author and approved comments),
//! rendered to HTML with a block serializer, and kept fresh by periodic
//! background regeneration.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod pages;
pub mod render;
pub mod server;
pub mod store;

use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

use config::{SiteConfig, StoreBackend};
use content::Post;
use helpers::ImageResolver;
use pages::PostPages;
use render::{CommentPanel, RenderContext, Serializers};
use store::{ContentStore, FileStore, SanityClient};

/// The site application
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// Static assets directory
    pub static_dir: std::path::PathBuf,
    /// Content store the pages read from
    pub store: Arc<dyn ContentStore>,
    /// Image reference resolver
    pub images: ImageResolver,
    /// Body block serializers
    pub serializers: Serializers,
}

impl Site {
    /// Create a new site from a directory, reading `_config.yml` and `.env`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let mut config = SiteConfig::load_dir(&base_dir)?;

        match dotenvy::from_path(base_dir.join(".env")) {
            Ok(()) => tracing::debug!("Loaded environment from .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        config.apply_env();

        let store: Arc<dyn ContentStore> = match config.store.backend {
            StoreBackend::Sanity => Arc::new(SanityClient::new(&config.store)?),
            StoreBackend::File => Arc::new(FileStore::open(base_dir.join(&config.store.file))?),
        };

        Ok(Self::with_store(base_dir, config, store))
    }

    /// Create a site around an existing store
    pub fn with_store<P: AsRef<Path>>(
        base_dir: P,
        config: SiteConfig,
        store: Arc<dyn ContentStore>,
    ) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let images = ImageResolver::new(&config.store);

        Self {
            config,
            base_dir,
            public_dir,
            static_dir,
            store,
            images,
            serializers: Serializers::default(),
        }
    }

    /// Page service over this site's store
    pub fn pages(&self) -> PostPages {
        PostPages::new(
            self.store.clone(),
            self.config.fallback,
            self.config.revalidate_window(),
        )
    }

    /// Render a post to a full HTML document
    pub fn render_post(&self, post: &Post, panel: CommentPanel) -> String {
        let ctx = RenderContext {
            config: &self.config,
            images: &self.images,
            serializers: &self.serializers,
            now: Utc::now(),
            panel,
        };
        render::post_document(post, &ctx)
    }

    /// Render the 404 document
    pub fn render_not_found(&self) -> String {
        render::not_found_document(&self.config)
    }

    /// Write every resolved post to the public directory
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(&self.public_dir)
    }
}
