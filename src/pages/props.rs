//! Per-slug page data loading

use std::time::Duration;

use crate::content::Post;
use crate::store::{ContentStore, StoreError};

/// What the page receives for a slug
#[derive(Debug, Clone, PartialEq)]
pub enum PageProps {
    Found { post: Post, revalidate: Duration },
    NotFound,
}

/// Fetch the joined record for a slug
///
/// Only approved comments survive, whatever the store returned.
pub async fn load_props(
    store: &dyn ContentStore,
    slug: &str,
    revalidate: Duration,
) -> Result<PageProps, StoreError> {
    let Some(mut post) = store.post_by_slug(slug).await? else {
        tracing::debug!(slug, "No post found");
        return Ok(PageProps::NotFound);
    };

    post.retain_approved();
    tracing::debug!(
        slug,
        id = %post.id,
        comments = post.comments.len(),
        "Loaded post"
    );

    Ok(PageProps::Found { post, revalidate })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostStub;
    use async_trait::async_trait;
    use serde_json::json;

    /// Returns comments regardless of approval, unlike the real query
    struct LeakyStore;

    #[async_trait]
    impl ContentStore for LeakyStore {
        async fn post_stubs(&self) -> Result<Vec<PostStub>, StoreError> {
            Ok(Vec::new())
        }

        async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
            if slug != "mixed" {
                return Ok(None);
            }
            let post = serde_json::from_value(json!({
                "_id": "p1",
                "_createdAt": "2024-01-01T00:00:00Z",
                "title": "Mixed",
                "slug": { "current": "mixed" },
                "comments": [
                    { "_id": "c1", "name": "A", "comment": "1", "approved": true },
                    { "_id": "c2", "name": "B", "comment": "2", "approved": false },
                    { "_id": "c3", "name": "C", "comment": "3" },
                    { "_id": "c4", "name": "D", "comment": "4", "approved": true }
                ]
            }))?;
            Ok(Some(post))
        }
    }

    #[tokio::test]
    async fn test_filters_unapproved_comments() {
        let props = load_props(&LeakyStore, "mixed", Duration::from_secs(5))
            .await
            .unwrap();
        let PageProps::Found { post, revalidate } = props else {
            panic!("expected a post");
        };
        let ids: Vec<_> = post.comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c4"]);
        assert_eq!(revalidate, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_not_found() {
        let props = load_props(&LeakyStore, "nope", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(props, PageProps::NotFound);
    }
}
