//! Page rendering
//!
//! Rendering is pure: a post record plus a `RenderContext` always produce
//! the same tree.

mod document;
mod page;
pub mod panel;
mod serializer;
pub mod view;

pub use document::{not_found_document, post_document};
pub use page::{render_post, RenderContext};
pub use panel::CommentPanel;
pub use serializer::{BlockKind, BlockSerializer, LinkSerializer, Serializers};
pub use view::{Element, Node};
