//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    pub post_dir: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    // Rendering
    /// Seconds before a rendered page is eligible for background regeneration
    pub revalidate: u64,
    pub fallback: Fallback,
    /// Where the comment form posts to
    pub comment_endpoint: String,

    // Content store
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Medium".to_string(),
            description: String::new(),
            language: "en".to_string(),

            url: "http://localhost:3000".to_string(),
            root: "/".to_string(),
            post_dir: "post".to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            revalidate: 5,
            fallback: Fallback::Blocking,
            comment_endpoint: "/api/createComment".to_string(),

            store: StoreConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `_config.yml` from a site directory, falling back to defaults
    pub fn load_dir<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `SANITY_*` environment variables on top of the file values
    pub fn apply_env(&mut self) {
        if let Ok(project_id) = std::env::var("SANITY_PROJECT_ID") {
            self.store.project_id = project_id;
        }
        if let Ok(dataset) = std::env::var("SANITY_DATASET") {
            self.store.dataset = dataset;
        }
        if let Ok(token) = std::env::var("SANITY_API_TOKEN") {
            if !token.is_empty() {
                self.store.token = Some(token);
            }
        }
    }

    /// The revalidation window as a duration
    pub fn revalidate_window(&self) -> Duration {
        Duration::from_secs(self.revalidate)
    }
}

/// Policy for slugs that were not enumerated ahead of time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// Load and render on first request, then cache
    Blocking,
    /// Answer 404 for anything not resolved up front
    Disabled,
}

/// Which content store backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sanity,
    File,
}

/// Content store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    pub token: Option<String>,
    /// Image CDN base used to resolve image references
    pub image_cdn: String,
    /// Dataset file for the `file` backend, relative to the base directory
    pub file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sanity,
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2021-10-21".to_string(),
            use_cdn: true,
            token: None,
            image_cdn: "https://cdn.sanity.io".to_string(),
            file: "dataset.json".to_string(),
        }
    }
}
