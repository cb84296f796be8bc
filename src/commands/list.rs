//! List site content

use anyhow::Result;

use crate::content::query::{all_tags, newest_first};
use crate::content::{Post, PostQuery};
use crate::helpers::form_date;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, query: &PostQuery) -> Result<()> {
    let posts = folio.post_store(folio.storage()).list_all()?;

    match content_type {
        "post" | "posts" => {
            let lines = post_lines(&posts, query);
            println!("Posts ({}):", lines.len());
            for line in lines {
                println!("  {}", line);
            }
        }
        "tag" | "tags" => {
            let counts = tag_counts(&posts);
            println!("Tags ({}):", counts.len());
            for (tag, count) in counts {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}

/// One line per matching post, newest first
pub fn post_lines(posts: &[Post], query: &PostQuery) -> Vec<String> {
    newest_first(posts)
        .into_iter()
        .filter(|post| query.matches(post))
        .map(|post| {
            let tags = if post.tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", post.tags.join(", "))
            };
            format!(
                "{} - {} ({}) /blog/{}{}",
                form_date(&post.date),
                post.title,
                post.id,
                post.slug,
                tags
            )
        })
        .collect()
}

/// Tags with their post counts, most used first
pub fn tag_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = all_tags(posts)
        .into_iter()
        .map(|tag| {
            let count = posts.iter().filter(|post| post.has_tag(&tag)).count();
            (tag, count)
        })
        .collect();
    // stable, so equal counts keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
