//! Delete a post after confirmation

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::content::Post;
use crate::editor::Editor;
use crate::Folio;

/// Delete the post with `id`, asking on stdin unless `yes` is set
pub fn run(folio: &Folio, id: &str, yes: bool) -> Result<bool> {
    let deleted = delete_post(folio, id, |post| yes || prompt(post))?;
    if deleted {
        println!("Deleted post {}", id);
    } else {
        println!("Kept post {}", id);
    }
    Ok(deleted)
}

/// Load the post, open the delete dialog and let `confirm` decide
///
/// Returns whether the post was removed.
pub fn delete_post<F>(folio: &Folio, id: &str, confirm: F) -> Result<bool>
where
    F: FnOnce(&Post) -> bool,
{
    let storage = folio.storage();
    let store = folio.post_store(storage.clone());
    let gate = folio.auth_gate(storage);
    let renderer = folio.renderer();

    let mut editor = Editor::open(&gate, &store, &renderer)?;
    if !editor.load(Some(id))? {
        anyhow::bail!("No post with id {}", id);
    }
    editor.request_delete()?;

    let confirmed = editor
        .posts()
        .iter()
        .find(|post| post.id == id)
        .map_or(false, confirm);
    if !confirmed {
        editor.cancel_delete();
        return Ok(false);
    }

    Ok(editor.confirm_delete()?)
}

fn prompt(post: &Post) -> bool {
    print!(
        "Are you sure you want to delete \"{}\"? This cannot be undone. [y/N] ",
        post.title
    );
    if std::io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
