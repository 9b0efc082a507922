//! Content module - post records and their rich-text bodies

mod block;
mod post;

pub use block::{Block, ListKind, MarkDef, Span, TextBlock};
pub use post::{AssetRef, Author, Comment, ImageRef, Post, PostStub, Reference, Slug};
