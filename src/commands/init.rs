//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::Post;
use crate::{Folio, CONFIG_FILE};

const DEFAULT_CONFIG: &str = r#"# Folio Configuration

# Site
title: Folio
subtitle: 'Notes, projects and the occasional poem'
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
data_dir: .folio
storage_file: storage.json
static_dir: static

# Storage keys
posts_key: blog_posts
auth_key: admin_authenticated

# Writing
excerpt_length: 150
# allow | reject | suffix
slug_collision: allow
highlight:
  theme: base16-ocean.dark
  line_number: true

# Date format
date_format: MMMM DD, YYYY

# Home page
recent_posts: 3

# Pages
about: |
  Hi! This is the about page. Edit `about` in _config.yml.
projects: []

# Admin: the password is read from this environment variable
admin:
  password_env: FOLIO_ADMIN_PASSWORD
"#;

const WELCOME_POST: &str = r#"Welcome to your new blog! This post was created by `folio init`.

## Quick Start

### Log in

```bash
$ export FOLIO_ADMIN_PASSWORD=...
$ folio login
```

### Write a post

```bash
$ folio new "My New Post" --content-file post.md --tags "tech, personal"
```

### Preview the site

```bash
$ folio server
```
"#;

/// Initialize a new site in the given directory
///
/// An existing `_config.yml` is left untouched, and the welcome post is only
/// added to an empty store.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    let folio = Folio::new(target_dir)?;
    fs::create_dir_all(&folio.data_dir)?;
    fs::create_dir_all(&folio.static_dir)?;

    let store = folio.post_store(folio.storage());
    if store.list_all()?.is_empty() {
        let mut post = Post::new("Hello World", WELCOME_POST);
        post.tags = vec!["meta".to_string()];
        store.upsert(post)?;
    }

    Ok(())
}

/// Run the init command with an existing Folio instance
pub fn run(folio: &Folio) -> Result<()> {
    init_site(&folio.base_dir)
}
