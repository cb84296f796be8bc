//! HTML helper functions

use lazy_static::lazy_static;
use regex::Regex;

use super::url::{tag_url, url_for};
use crate::config::SiteConfig;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref SPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

/// Generate an anchor tag
///
/// # Examples
/// ```ignore
/// link_to(&config, "/about", "About") // -> <a href="/about">About</a>
/// ```
pub fn link_to(config: &SiteConfig, path: &str, text: &str) -> String {
    if is_external(path) {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            html_escape(path),
            html_escape(text)
        )
    } else {
        format!(
            r#"<a href="{}">{}</a>"#,
            url_for(config, path),
            html_escape(text)
        )
    }
}

/// Generate an image tag
pub fn image_tag(config: &SiteConfig, path: &str, alt: &str) -> String {
    let src = if is_external(path) {
        path.to_string()
    } else {
        url_for(config, path)
    };

    format!(
        r#"<img src="{}" alt="{}">"#,
        html_escape(&src),
        html_escape(alt)
    )
}

/// Render a list of tags as links into the filtered blog listing
pub fn tag_links(config: &SiteConfig, tags: &[String], active: Option<&str>) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let mut html = r#"<ul class="tag-list">"#.to_string();
    for tag in tags {
        let class = if active == Some(tag.as_str()) {
            "tag-list-link active"
        } else {
            "tag-list-link"
        };
        html.push_str(&format!(
            r#"<li class="tag-list-item"><a class="{}" href="{}">{}</a></li>"#,
            class,
            tag_url(config, tag),
            html_escape(tag)
        ));
    }
    html.push_str("</ul>");
    html
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags and collapse whitespace
pub fn strip_html(s: &str) -> String {
    let text = TAG_RE.replace_all(s, " ");
    SPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Truncate a string to `length` characters, appending `omission` when cut
///
/// The omission is added after the kept characters, so the result can be up
/// to `length + omission.len()` characters long.
pub fn truncate(s: &str, length: usize, omission: &str) -> String {
    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(length).collect();
        format!("{}{}", truncated, omission)
    }
}
