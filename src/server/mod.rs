//! Preview server for the site pages
//!
//! Serves the routing surface straight from the post store. It only reads;
//! every write goes through the CLI.

pub mod pages;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::Gate;
use crate::config::SiteConfig;
use crate::content::query::{all_tags, newest_first};
use crate::content::{Listing, PostQuery, Render};
use crate::helpers::{encode_url, url_for};
use crate::storage::Storage;
use crate::store::{PostStore, StoreError};
use crate::Folio;

/// Shared server state
pub struct SiteState {
    pub config: SiteConfig,
    pub store: PostStore<Arc<dyn Storage>>,
    pub gate: Box<dyn Gate + Send + Sync>,
    pub renderer: Box<dyn Render>,
}

/// Query string of the blog listing
#[derive(Debug, Default, Deserialize)]
pub struct BlogParams {
    pub q: Option<String>,
    pub tag: Option<String>,
    /// Slug of a post that could not be found, set by the detail route
    pub missing: Option<String>,
}

/// Build the site router
pub fn router(state: Arc<SiteState>, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route("/", get(home_handler))
        .route("/about", get(about_handler))
        .route("/projects", get(projects_handler))
        .route("/blog", get(blog_index_handler))
        .route("/blog/:slug", get(blog_post_handler))
        .route("/admin", get(admin_handler))
        .fallback(not_found_handler);

    if let Some(dir) = static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.with_state(state).layer(TraceLayer::new_for_http())
}

/// Start the preview server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let storage = folio.storage();
    let gate = folio.auth_gate(storage.clone());
    let storage: Arc<dyn Storage> = storage;

    let state = Arc::new(SiteState {
        config: folio.config.clone(),
        store: PostStore::from_config(storage, &folio.config),
        gate: Box::new(gate),
        renderer: Box::new(folio.renderer()),
    });

    let static_dir = folio.static_dir.exists().then(|| folio.static_dir.clone());
    let app = router(state, static_dir);

    // "localhost" is not a valid socket address
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn store_failure(state: &SiteState, err: StoreError) -> Response {
    tracing::error!("Store read failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(pages::server_error(&state.config)),
    )
        .into_response()
}

async fn home_handler(State(state): State<Arc<SiteState>>) -> Response {
    let posts = match state.store.list_all() {
        Ok(posts) => posts,
        Err(e) => return store_failure(&state, e),
    };

    let recent: Vec<_> = newest_first(&posts)
        .into_iter()
        .take(state.config.recent_posts)
        .collect();

    Html(pages::home(&state.config, &recent)).into_response()
}

async fn about_handler(State(state): State<Arc<SiteState>>) -> Html<String> {
    let about_html = state.renderer.render(&state.config.about);
    Html(pages::about(&state.config, &about_html))
}

async fn projects_handler(State(state): State<Arc<SiteState>>) -> Html<String> {
    Html(pages::projects(&state.config))
}

async fn blog_index_handler(
    State(state): State<Arc<SiteState>>,
    Query(params): Query<BlogParams>,
) -> Response {
    let posts = match state.store.list_all() {
        Ok(posts) => posts,
        Err(e) => return store_failure(&state, e),
    };

    let query = PostQuery::new(params.q, params.tag);
    let listing = Listing::build(&posts, &query);
    let tags = all_tags(&posts);

    Html(pages::blog_index(
        &state.config,
        &listing,
        &tags,
        &query,
        params.missing.as_deref(),
    ))
    .into_response()
}

async fn blog_post_handler(
    State(state): State<Arc<SiteState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.store.get_by_slug(&slug) {
        Ok(Some(post)) => {
            let content_html = state.renderer.render(&post.content);
            let is_admin = state.gate.is_authenticated();
            Html(pages::blog_post(&state.config, &post, &content_html, is_admin)).into_response()
        }
        Ok(None) => {
            tracing::debug!("No post with slug {}", slug);
            let target = format!(
                "{}?missing={}",
                url_for(&state.config, "/blog"),
                encode_url(&slug)
            );
            Redirect::to(&target).into_response()
        }
        Err(e) => store_failure(&state, e),
    }
}

async fn admin_handler(State(state): State<Arc<SiteState>>) -> Response {
    if !state.gate.is_authenticated() {
        return (
            StatusCode::UNAUTHORIZED,
            Html(pages::admin_login(&state.config)),
        )
            .into_response();
    }

    match state.store.list_all() {
        Ok(posts) => Html(pages::admin(&state.config, &posts)).into_response(),
        Err(e) => store_failure(&state, e),
    }
}

async fn not_found_handler(State(state): State<Arc<SiteState>>, uri: Uri) -> Response {
    tracing::warn!("404: no route for {}", uri.path());
    (
        StatusCode::NOT_FOUND,
        Html(pages::not_found(&state.config, uri.path())),
    )
        .into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
