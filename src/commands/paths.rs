//! List resolvable post paths

use anyhow::Result;

use crate::helpers::post_path;
use crate::pages::resolve_paths;
use crate::Site;

/// Print every post path the store knows about
pub async fn run(site: &Site) -> Result<()> {
    let paths = resolve_paths(site.store.as_ref(), site.config.fallback).await?;

    println!("Posts ({}):", paths.paths.len());
    for slug in &paths.paths {
        println!("  {}", post_path(&site.config, slug));
    }
    println!("Fallback: {:?}", paths.fallback);

    Ok(())
}
