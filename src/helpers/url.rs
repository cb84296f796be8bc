//! URL and slug helper functions

use crate::config::SiteConfig;

/// Turn a title into a URL-safe slug
///
/// Lower-cases the input, collapses every run of non-alphanumeric characters
/// into a single `-` and trims separators from both ends. Non-ASCII letters
/// are transliterated first, so `"Café Olé"` becomes `"cafe-ole"`.
///
/// Titles made only of punctuation produce an empty slug. That is not an
/// error here; callers decide whether an empty slug is routable.
///
/// # Examples
/// ```ignore
/// slugify("Hello, World!") // -> "hello-world"
/// ```
pub fn slugify(title: &str) -> String {
    slug::slugify(title)
}

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/") // -> "/portfolio/blog/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Path of a post's detail page
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("blog/{}", encode_url(slug)))
}

/// Path of the blog listing filtered by a tag
pub fn tag_url(config: &SiteConfig, tag: &str) -> String {
    url_for(config, &format!("blog?tag={}", encode_url(tag)))
}

/// Encode a URL component
pub fn encode_url(path: &str) -> String {
    percent_encoding::utf8_percent_encode(path, percent_encoding::NON_ALPHANUMERIC)
        .to_string()
        .replace("%2D", "-")
}
