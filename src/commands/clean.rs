//! Clean the public directory

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Remove everything `generate` wrote
pub fn run(public_dir: &Path) -> Result<()> {
    if public_dir.exists() {
        fs::remove_dir_all(public_dir)?;
        tracing::info!("Deleted: {:?}", public_dir);
    }

    Ok(())
}
