//! Print a single post

use anyhow::Result;

use crate::content::query::reading_time;
use crate::content::{Post, Render};
use crate::helpers::format_date;
use crate::Folio;

/// Print the post at `slug`, as rendered HTML or as raw markdown
pub fn run(folio: &Folio, slug: &str, raw: bool) -> Result<()> {
    let store = folio.post_store(folio.storage());
    let Some(post) = store.get_by_slug(slug)? else {
        anyhow::bail!("The blog post you're looking for doesn't exist: {}", slug);
    };

    println!("{}", render_post(folio, &post, raw));
    Ok(())
}

/// Header block followed by the post body
pub fn render_post(folio: &Folio, post: &Post, raw: bool) -> String {
    let mut out = format!(
        "{}\n{} · {} min read",
        post.title,
        format_date(&post.date, &folio.config.date_format),
        reading_time(&post.content)
    );
    if !post.tags.is_empty() {
        out.push_str(&format!("\nTags: {}", post.tags.join(", ")));
    }
    out.push_str("\n\n");

    if raw {
        out.push_str(&post.content);
    } else {
        out.push_str(&folio.renderer().render(&post.content));
    }
    out
}
