//! folio-rs: content engine for a personal portfolio and blog
//!
//! This crate keeps blog posts in a small persisted store, renders their
//! markdown, and drives an admin editor behind a password gate. A preview
//! server exposes the site's pages straight from the store.

pub mod auth;
pub mod commands;
pub mod config;
pub mod content;
pub mod editor;
pub mod helpers;
pub mod server;
pub mod storage;
pub mod store;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use auth::{AuthGate, CredentialVerifier};
use storage::FileStorage;
use store::PostStore;

/// Config file name, relative to the site directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main Folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the storage file
    pub data_dir: PathBuf,
    /// Static assets directory
    pub static_dir: PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let data_dir = base_dir.join(&config.data_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            data_dir,
            static_dir,
        }
    }

    /// Path of the storage file
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(&self.config.storage_file)
    }

    /// Open the file storage shared by the store and the auth gate
    pub fn storage(&self) -> Arc<FileStorage> {
        Arc::new(FileStorage::new(self.storage_path()))
    }

    /// The post store over `storage`
    pub fn post_store(&self, storage: Arc<FileStorage>) -> PostStore<Arc<FileStorage>> {
        PostStore::from_config(storage, &self.config)
    }

    /// The auth gate over `storage`, verifying against the configured secret
    pub fn auth_gate(
        &self,
        storage: Arc<FileStorage>,
    ) -> AuthGate<Arc<FileStorage>, Box<dyn CredentialVerifier>> {
        AuthGate::new(storage, auth::verifier_from_config(&self.config))
            .with_key(&self.config.auth_key)
    }

    /// Markdown renderer configured for this site
    pub fn renderer(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::with_options(&self.config.highlight)
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::init_site(&self.base_dir)
    }

    /// Clear all stored posts and the login flag
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
