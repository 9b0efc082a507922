//! Generate static files

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::pages::{load_props, resolve_paths, PageProps};
use crate::render::CommentPanel;
use crate::Site;

/// Output file for a post slug
pub fn output_path(site: &Site, slug: &str) -> PathBuf {
    site.public_dir
        .join(site.config.post_dir.trim_matches('/'))
        .join(slug)
        .join("index.html")
}

/// Resolve every path, render it, and write it under the public directory
pub async fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let paths = resolve_paths(site.store.as_ref(), site.config.fallback).await?;
    tracing::info!("Resolved {} posts", paths.paths.len());

    let mut written = 0;
    for slug in &paths.paths {
        let post = match load_props(site.store.as_ref(), slug, site.config.revalidate_window())
            .await?
        {
            PageProps::Found { post, .. } => post,
            PageProps::NotFound => {
                tracing::warn!("Resolved path {} has no post, skipping", slug);
                continue;
            }
        };

        let html = site.render_post(&post, CommentPanel::default());
        let output_path = output_path(site, slug);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);
        written += 1;
    }

    fs::create_dir_all(&site.public_dir)?;
    fs::write(site.public_dir.join("404.html"), site.render_not_found())?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages in {:.2}s",
        written,
        duration.as_secs_f64()
    );

    Ok(())
}
