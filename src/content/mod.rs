//! Content module - the post model, markdown rendering and listing queries

mod markdown;
mod post;
pub mod query;

pub use markdown::{MarkdownRenderer, Render};
pub use post::{default_excerpt, parse_tags, Post, DEFAULT_EXCERPT_LENGTH};
pub use query::{Listing, PostQuery};
