//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub data_dir: String,
    pub storage_file: String,
    pub static_dir: String,

    // Storage keys
    pub posts_key: String,
    pub auth_key: String,

    // Writing
    pub excerpt_length: usize,
    pub slug_collision: SlugPolicy,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Date format (Moment.js style)
    pub date_format: String,

    // Home page
    pub recent_posts: usize,

    // Pages
    pub about: String,
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,

    // Admin
    #[serde(default)]
    pub admin: AdminConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            data_dir: ".folio".to_string(),
            storage_file: "storage.json".to_string(),
            static_dir: "static".to_string(),

            posts_key: "blog_posts".to_string(),
            auth_key: "admin_authenticated".to_string(),

            excerpt_length: 150,
            slug_collision: SlugPolicy::default(),
            highlight: HighlightConfig::default(),

            date_format: "MMMM DD, YYYY".to_string(),

            recent_posts: 3,

            about: String::new(),
            projects: Vec::new(),

            admin: AdminConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }
}

/// What the post store does when a saved post's slug is already used by
/// another post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugPolicy {
    /// Store the duplicate and log a warning; slug lookups return the first match
    #[default]
    Allow,
    /// Refuse the save
    Reject,
    /// Append `-2`, `-3`, ... until the slug is free
    Suffix,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

/// A project card on the projects page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub tags: Vec<String>,
}

/// Admin credential configuration
///
/// The secret is read from the environment variable named by `password_env`
/// first; `password` is only a fallback for local setups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub password_env: String,
    pub password: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password_env: "FOLIO_ADMIN_PASSWORD".to_string(),
            password: None,
        }
    }
}
