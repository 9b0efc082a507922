//! Path resolution ahead of render time

use crate::config::Fallback;
use crate::store::{ContentStore, StoreError};

/// Slugs known up front, plus what to do with the rest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPaths {
    pub paths: Vec<String>,
    pub fallback: Fallback,
}

/// A slug usable as a single URL segment and output directory name
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\'])
}

/// Enumerate every post slug in the store
pub async fn resolve_paths(
    store: &dyn ContentStore,
    fallback: Fallback,
) -> Result<StaticPaths, StoreError> {
    let stubs = store.post_stubs().await?;

    let mut paths = Vec::with_capacity(stubs.len());
    for stub in stubs {
        match stub.slug {
            Some(slug) if is_valid_slug(&slug.current) => {
                if !paths.contains(&slug.current) {
                    paths.push(slug.current);
                }
            }
            Some(slug) if !slug.current.is_empty() => tracing::warn!(
                "Post {} has invalid slug {:?}, skipping",
                stub.id,
                slug.current
            ),
            _ => tracing::warn!("Post {} has no slug, skipping", stub.id),
        }
    }

    tracing::debug!("Resolved {} post paths", paths.len());
    Ok(StaticPaths { paths, fallback })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_resolve_paths() {
        let store = FileStore::from_documents(vec![
            json!({ "_id": "1", "_type": "post", "slug": { "current": "one" } }),
            json!({ "_id": "2", "_type": "post", "slug": { "current": "two" } }),
            json!({ "_id": "3", "_type": "post" }),
            json!({ "_id": "4", "_type": "post", "slug": { "current": "one" } }),
            json!({ "_id": "a", "_type": "author", "name": "Ada" }),
        ]);
        let paths = resolve_paths(&store, Fallback::Blocking).await.unwrap();
        assert_eq!(paths.paths, vec!["one", "two"]);
        assert_eq!(paths.fallback, Fallback::Blocking);
    }

    #[tokio::test]
    async fn test_unsafe_slugs_are_skipped() {
        let store = FileStore::from_documents(vec![
            json!({ "_id": "1", "_type": "post", "slug": { "current": "../../escaped" } }),
            json!({ "_id": "2", "_type": "post", "slug": { "current": "a/b" } }),
            json!({ "_id": "3", "_type": "post", "slug": { "current": "a\\b" } }),
            json!({ "_id": "4", "_type": "post", "slug": { "current": ".." } }),
            json!({ "_id": "5", "_type": "post", "slug": { "current": "" } }),
            json!({ "_id": "6", "_type": "post", "slug": { "current": "kept..fine" } }),
        ]);
        let paths = resolve_paths(&store, Fallback::Blocking).await.unwrap();
        assert_eq!(paths.paths, vec!["kept..fine"]);
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("hello-world"));
        assert!(!is_valid_slug("."));
        assert!(!is_valid_slug("x/.."));
    }
}
