//! Create or edit a post through the admin editor

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::content::Post;
use crate::editor::Editor;
use crate::helpers::post_url;
use crate::storage::Storage;
use crate::Folio;

/// Field values given on the command line; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct PostFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<String>,
    pub date: Option<String>,
    pub cover_image: Option<String>,
}

impl PostFields {
    fn apply<S: Storage>(&self, editor: &mut Editor<'_, S>) {
        if let Some(title) = &self.title {
            editor.set_title(title);
        }
        if let Some(slug) = &self.slug {
            editor.set_slug(slug);
        }
        if let Some(content) = &self.content {
            editor.set_content(content);
        }
        if let Some(excerpt) = &self.excerpt {
            editor.set_excerpt(excerpt);
        }
        if let Some(tags) = &self.tags {
            editor.set_tags(tags);
        }
        if let Some(date) = &self.date {
            editor.set_date(date);
        }
        if let Some(cover) = &self.cover_image {
            editor.set_cover_image(cover);
        }
    }
}

/// Read post content from a file, or from stdin when no file is given
pub fn read_content(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
        }
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

/// Save a new post
pub fn create_post(folio: &Folio, fields: &PostFields) -> Result<Post> {
    let storage = folio.storage();
    let store = folio.post_store(storage.clone());
    let gate = folio.auth_gate(storage);
    let renderer = folio.renderer();

    let mut editor = Editor::open(&gate, &store, &renderer)?;
    editor.load(None)?;
    fields.apply(&mut editor);

    let post = editor.save()?;
    println!(
        "Created: \"{}\" ({}) at {}",
        post.title,
        post.id,
        post_url(&folio.config, &post.slug)
    );
    Ok(post)
}

/// Load the post with `id`, apply `fields` and save it
pub fn edit_post(folio: &Folio, id: &str, fields: &PostFields) -> Result<Post> {
    let storage = folio.storage();
    let store = folio.post_store(storage.clone());
    let gate = folio.auth_gate(storage);
    let renderer = folio.renderer();

    let mut editor = Editor::open(&gate, &store, &renderer)?;
    if !editor.load(Some(id))? {
        anyhow::bail!("No post with id {}", id);
    }
    fields.apply(&mut editor);

    let post = editor.save()?;
    println!("Updated: \"{}\" ({})", post.title, post.id);
    Ok(post)
}
