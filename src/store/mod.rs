//! Content store access
//!
//! The page only ever reads from the store. Two backends are provided: a
//! client for a Sanity-style HTTP query API and a local JSON dataset that
//! performs the same joins in process.

mod file;
pub mod query;
mod sanity;

use async_trait::async_trait;
use thiserror::Error;

use crate::content::{Post, PostStub};

pub use file::FileStore;
pub use sanity::SanityClient;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Store returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Malformed record: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Dataset error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store misconfigured: {0}")]
    Config(String),
}

/// Read-only queries the page needs from the content store
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All posts, reduced to `{_id, slug}`
    async fn post_stubs(&self) -> Result<Vec<PostStub>, StoreError>;

    /// The post with the given slug joined with its author and approved
    /// comments, or `None` if no post has that slug
    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError>;
}
