//! Local JSON dataset store
//!
//! Reads an exported dataset (a JSON array of documents) and answers the same
//! queries as the HTTP client by resolving references in process.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

use super::{ContentStore, StoreError};
use crate::content::{Post, PostStub};

/// Fields of a post document copied into the joined record
const POST_FIELDS: &[&str] = &[
    "_id",
    "_createdAt",
    "title",
    "description",
    "mainImage",
    "slug",
    "body",
];

/// In-memory store backed by a dataset export
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    documents: Vec<Value>,
}

impl FileStore {
    /// Load documents from a JSON file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path.as_ref())?;
        let documents: Vec<Value> = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded {} documents from {:?}",
            documents.len(),
            path.as_ref()
        );
        Ok(Self::from_documents(documents))
    }

    pub fn from_documents(documents: Vec<Value>) -> Self {
        Self { documents }
    }

    fn of_type<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.documents
            .iter()
            .filter(move |doc| doc.get("_type").and_then(Value::as_str) == Some(kind))
    }

    fn by_id(&self, id: &str) -> Option<&Value> {
        self.documents
            .iter()
            .find(|doc| doc.get("_id").and_then(Value::as_str) == Some(id))
    }

    /// A post's slug; posts without one are unreachable, as with the HTTP store
    fn slug_of(doc: &Value) -> Option<&str> {
        doc.pointer("/slug/current").and_then(Value::as_str)
    }

    /// Build the joined record the HTTP query would have returned
    fn join(&self, post: &Value) -> Value {
        let mut record = Map::new();
        for field in POST_FIELDS {
            if let Some(value) = post.get(*field) {
                record.insert(field.to_string(), value.clone());
            }
        }

        let author = post
            .pointer("/author/_ref")
            .and_then(Value::as_str)
            .and_then(|id| self.by_id(id))
            .map(|doc| {
                json!({
                    "name": doc.get("name").cloned().unwrap_or(Value::Null),
                    "image": doc.get("image").cloned().unwrap_or(Value::Null),
                })
            })
            .unwrap_or(Value::Null);
        record.insert("author".to_string(), author);

        let post_id = post.get("_id").and_then(Value::as_str);
        let comments: Vec<Value> = self
            .of_type("comment")
            .filter(|c| c.pointer("/post/_ref").and_then(Value::as_str) == post_id)
            .filter(|c| c.get("approved").and_then(Value::as_bool) == Some(true))
            .cloned()
            .collect();
        record.insert("comments".to_string(), Value::Array(comments));

        Value::Object(record)
    }
}

#[async_trait]
impl ContentStore for FileStore {
    async fn post_stubs(&self) -> Result<Vec<PostStub>, StoreError> {
        let stubs = self
            .of_type("post")
            .map(|doc| {
                let id = doc.get("_id").cloned().unwrap_or(Value::Null);
                let slug = Self::slug_of(doc)
                    .map(|current| json!({ "current": current }))
                    .unwrap_or(Value::Null);
                serde_json::from_value(json!({ "_id": id, "slug": slug }))
            })
            .collect::<Result<Vec<PostStub>, _>>()?;
        Ok(stubs)
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        let Some(doc) = self
            .of_type("post")
            .find(|doc| Self::slug_of(doc) == Some(slug))
        else {
            return Ok(None);
        };

        let post = serde_json::from_value(self.join(doc))?;
        Ok(Some(post))
    }
}
