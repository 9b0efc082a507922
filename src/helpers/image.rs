//! Image reference resolution

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::StoreConfig;
use crate::content::ImageRef;

lazy_static! {
    /// `image-<asset id>-<width>x<height>-<format>`
    static ref IMAGE_REF: Regex =
        Regex::new(r"^image-([A-Za-z0-9]+)-(\d+x\d+)-([a-z0-9]+)$").unwrap();
}

/// Maps opaque image references to fetchable CDN URLs
#[derive(Debug, Clone)]
pub struct ImageResolver {
    cdn: String,
    project_id: String,
    dataset: String,
}

impl ImageResolver {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            cdn: config.image_cdn.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
        }
    }

    /// Resolve an image to a URL; an explicit asset URL wins over the reference
    pub fn url_for(&self, image: &ImageRef) -> Option<String> {
        if let Some(url) = &image.asset.url {
            return Some(url.clone());
        }

        let reference = image.asset.reference.as_deref()?;
        let Some(caps) = IMAGE_REF.captures(reference) else {
            tracing::warn!("Unrecognised image reference: {}", reference);
            return None;
        };

        Some(format!(
            "{}/images/{}/{}/{}-{}.{}",
            self.cdn, self.project_id, self.dataset, &caps[1], &caps[2], &caps[3]
        ))
    }
}
