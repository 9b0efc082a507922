//! Post, author and comment records as returned by the content store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::block::Block;

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A blog post joined with its author and approved comments
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Cover image
    #[serde(rename = "mainImage", default)]
    pub main_image: Option<ImageRef>,

    pub slug: Slug,

    /// Rich-text body, in document order
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<Block>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub author: Author,

    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Drop every comment that has not been approved
    pub fn retain_approved(&mut self) {
        self.comments.retain(|c| c.approved);
    }
}

/// Minimal record used for path enumeration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostStub {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub slug: Option<Slug>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Slug {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// Reference to an image asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub asset: AssetRef,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Either an opaque asset reference or an already expanded URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A reader comment attached to a post
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub post: Option<Reference>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Collected by the submission form; never rendered
    #[serde(default)]
    pub email: Option<String>,

    #[serde(rename = "comment", default, deserialize_with = "null_as_default")]
    pub content: String,

    #[serde(default)]
    pub approved: bool,
}

/// A `{_ref}` pointer to another document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub id: String,
}
