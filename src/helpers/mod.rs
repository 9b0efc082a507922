//! Helper functions used while rendering pages
//!
//! Relative dates, image URLs, URL building and small HTML snippets.

mod date;
mod html;
mod image;
mod url;

pub use date::*;
pub use html::*;
pub use image::*;
pub use url::*;
