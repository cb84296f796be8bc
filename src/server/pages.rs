//! HTML pages for the routing surface

use crate::config::SiteConfig;
use crate::content::query::reading_time;
use crate::content::{Listing, Post, PostQuery};
use crate::helpers::{
    format_date, html_escape, image_tag, link_to, post_url, strip_html, tag_links, time_tag,
    url_for,
};

/// Navigation entries as (label, path)
const NAV_ITEMS: [(&str, &str); 4] = [
    ("Home", "/"),
    ("About", "/about"),
    ("Projects", "/projects"),
    ("Blog", "/blog"),
];

/// Wrap a page body in the site layout
pub fn layout(config: &SiteConfig, title: &str, active: &str, body: &str) -> String {
    let page_title = if title.is_empty() {
        html_escape(&config.title)
    } else {
        format!("{} | {}", html_escape(title), html_escape(&config.title))
    };

    let nav = NAV_ITEMS
        .iter()
        .map(|(label, path)| {
            let class = if *path == active { r#" class="active""# } else { "" };
            format!(
                r#"<a href="{}"{}>{}</a>"#,
                url_for(config, path),
                class,
                label
            )
        })
        .collect::<Vec<_>>()
        .join("");

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="{description}">
<meta name="generator" content="folio-rs {version}">
<title>{page_title}</title>
</head>
<body>
<header class="navbar"><a class="brand" href="{home}">{site}</a><nav>{nav}</nav></header>
<main class="container">
{body}
</main>
<footer class="footer">&copy; {author}</footer>
</body>
</html>
"#,
        lang = html_escape(&config.language),
        description = html_escape(&config.description),
        version = env!("CARGO_PKG_VERSION"),
        page_title = page_title,
        home = url_for(config, "/"),
        site = html_escape(&config.title),
        nav = nav,
        body = body,
        author = html_escape(&config.author),
    )
}

fn post_card(config: &SiteConfig, post: &Post, featured: bool) -> String {
    let class = if featured { "post-card featured" } else { "post-card" };
    let cover = post
        .cover_image
        .as_deref()
        .map(|url| image_tag(config, url, &post.title))
        .unwrap_or_default();

    format!(
        r#"<article class="{class}">{cover}<h3><a href="{url}">{title}</a></h3><p class="meta">{date} &middot; {minutes} min read</p><p class="excerpt">{excerpt}</p>{tags}</article>"#,
        class = class,
        cover = cover,
        url = post_url(config, &post.slug),
        title = html_escape(&post.title),
        date = time_tag(&post.date, &config.date_format),
        minutes = reading_time(&post.content),
        excerpt = html_escape(&strip_html(&post.excerpt)),
        tags = tag_links(config, &post.tags, None),
    )
}

/// Landing page with the most recent posts
pub fn home(config: &SiteConfig, recent: &[&Post]) -> String {
    let mut body = format!(
        r#"<section class="hero"><h1>{}</h1><p>{}</p></section>"#,
        html_escape(&config.title),
        html_escape(&config.subtitle)
    );

    if !recent.is_empty() {
        body.push_str(r#"<section class="recent"><h2>Latest Posts</h2>"#);
        for post in recent {
            body.push_str(&post_card(config, post, false));
        }
        body.push_str("</section>");
    }

    body.push_str(&format!(
        r#"<section class="connect"><h2>Let's Connect</h2><p>{}</p></section>"#,
        link_to(config, "/about", "More about me")
    ));

    layout(config, "", "/", &body)
}

/// About page; `about_html` is the rendered `about` markdown
pub fn about(config: &SiteConfig, about_html: &str) -> String {
    let body = format!(
        r#"<h1>About</h1><div class="prose">{}</div>"#,
        about_html
    );
    layout(config, "About", "/about", &body)
}

/// Projects page built from the configured project list
pub fn projects(config: &SiteConfig) -> String {
    let mut body = "<h1>Projects</h1>".to_string();

    if config.projects.is_empty() {
        body.push_str(r#"<p class="empty">Nothing here yet.</p>"#);
    }

    for project in &config.projects {
        let name = match &project.url {
            Some(url) => link_to(config, url, &project.name),
            None => html_escape(&project.name),
        };
        let tags = project
            .tags
            .iter()
            .map(|tag| format!(r#"<span class="tag">{}</span>"#, html_escape(tag)))
            .collect::<String>();
        body.push_str(&format!(
            r#"<article class="project"><h2>{}</h2><p>{}</p><div class="tags">{}</div></article>"#,
            name,
            html_escape(&project.description),
            tags
        ));
    }

    layout(config, "Projects", "/projects", &body)
}

/// Blog listing with search, tag filter and featured post
pub fn blog_index(
    config: &SiteConfig,
    listing: &Listing<'_>,
    all_tags: &[String],
    query: &PostQuery,
    missing: Option<&str>,
) -> String {
    let mut body = "<h1>Blog</h1>".to_string();

    if let Some(slug) = missing {
        body.push_str(&format!(
            r#"<div class="notice error"><strong>Post not found</strong> The blog post you're looking for doesn't exist: {}</div>"#,
            html_escape(slug)
        ));
    }

    body.push_str(&format!(
        r#"<form class="search" method="get" action="{}"><input type="search" name="q" placeholder="Search posts..." value="{}">{}</form>"#,
        url_for(config, "/blog"),
        html_escape(query.search.as_deref().unwrap_or("")),
        query
            .tag
            .as_deref()
            .map(|tag| format!(r#"<input type="hidden" name="tag" value="{}">"#, html_escape(tag)))
            .unwrap_or_default()
    ));

    let all_class = if query.tag.is_none() { "tag-list-link active" } else { "tag-list-link" };
    body.push_str(&format!(
        r#"<nav class="tags"><a class="{}" href="{}">All</a>{}</nav>"#,
        all_class,
        url_for(config, "/blog"),
        tag_links(config, all_tags, query.tag.as_deref())
    ));

    if listing.is_empty() {
        body.push_str(
            r#"<div class="empty"><h3>No posts found</h3><p>Try adjusting your search or filter criteria.</p></div>"#,
        );
    } else {
        if let Some(featured) = listing.featured {
            body.push_str(&post_card(config, featured, true));
        }
        body.push_str(r#"<div class="post-grid">"#);
        for post in &listing.others {
            body.push_str(&post_card(config, post, false));
        }
        body.push_str("</div>");
    }

    layout(config, "Blog", "/blog", &body)
}

/// Detail page of a single post
pub fn blog_post(config: &SiteConfig, post: &Post, content_html: &str, is_admin: bool) -> String {
    let back = format!(
        r#"<a class="back" href="{}">&larr; Back to all posts</a>"#,
        url_for(config, "/blog")
    );
    let cover = post
        .cover_image
        .as_deref()
        .map(|url| format!(r#"<div class="cover">{}</div>"#, image_tag(config, url, &post.title)))
        .unwrap_or_default();
    let edit_hint = if is_admin {
        format!(
            r#"<p class="admin-hint">Edit with <code>folio edit {}</code></p>"#,
            html_escape(&post.id)
        )
    } else {
        String::new()
    };

    let body = format!(
        r#"{back}<header>{cover}{tags}<h1>{title}</h1><p class="meta">{date} &middot; {minutes} min read</p>{edit_hint}</header><hr><article class="prose">{content}</article><hr><footer>{back}</footer>"#,
        back = back,
        cover = cover,
        tags = tag_links(config, &post.tags, None),
        title = html_escape(&post.title),
        date = time_tag(&post.date, &config.date_format),
        minutes = reading_time(&post.content),
        edit_hint = edit_hint,
        content = content_html,
    );

    layout(config, &post.title, "/blog", &body)
}

/// Admin overview for a logged-in admin
pub fn admin(config: &SiteConfig, posts: &[Post]) -> String {
    let mut body = "<h1>Blog Admin</h1>".to_string();

    if posts.is_empty() {
        body.push_str(r#"<p class="empty">No posts yet. Create your first one with <code>folio new</code>.</p>"#);
    } else {
        body.push_str(r#"<table class="posts"><tr><th>Title</th><th>Date</th><th>Id</th></tr>"#);
        for post in posts {
            body.push_str(&format!(
                r#"<tr><td><a href="{}">{}</a></td><td>{}</td><td><code>{}</code></td></tr>"#,
                post_url(config, &post.slug),
                html_escape(&post.title),
                format_date(&post.date, "YYYY-MM-DD"),
                html_escape(&post.id)
            ));
        }
        body.push_str("</table>");
    }

    layout(config, "Admin", "", &body)
}

/// Shown on /admin when not logged in
pub fn admin_login(config: &SiteConfig) -> String {
    let body = r#"<h1>Admin Login</h1><p>Log in with <code>folio login</code> to access the admin panel.</p>"#;
    layout(config, "Admin", "", body)
}

/// 404 page
pub fn not_found(config: &SiteConfig, path: &str) -> String {
    let body = format!(
        r#"<div class="not-found"><h1>404</h1><p>The page you are looking for doesn't exist or has been moved.</p><p><code>{}</code></p>{}</div>"#,
        html_escape(path),
        link_to(config, "/", "Back to Home")
    );
    layout(config, "Not Found", "", &body)
}

/// Generic failure page
pub fn server_error(config: &SiteConfig) -> String {
    let body = r#"<h1>Something went wrong</h1><p>The request could not be completed.</p>"#;
    layout(config, "Error", "", body)
}
