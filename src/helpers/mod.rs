//! Helper functions shared by the store, the editor and the page renderer
//!
//! URL generation, slugs, date formatting and small HTML builders.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
