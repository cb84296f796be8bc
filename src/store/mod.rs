//! Post store
//!
//! Owns the collection of posts kept under a single storage key as a JSON
//! array. Every mutation rewrites the whole collection. A missing or corrupt
//! value is an empty collection, never an error.

use chrono::{SubsecRound, Utc};
use thiserror::Error;

use crate::config::{SiteConfig, SlugPolicy};
use crate::content::{default_excerpt, Post, DEFAULT_EXCERPT_LENGTH};
use crate::storage::{Storage, StorageError};

/// Storage key holding the post collection
pub const DEFAULT_POSTS_KEY: &str = "blog_posts";

/// Post store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to encode posts: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid post: {0}")]
    Validation(String),

    #[error("Slug '{slug}' is already used by post {id}")]
    SlugTaken { slug: String, id: String },
}

/// Encode a collection for storage
pub fn encode_posts(posts: &[Post]) -> Result<String, serde_json::Error> {
    serde_json::to_string(posts)
}

/// Decode a stored collection; anything unreadable is an empty collection
pub fn decode_posts(raw: &str) -> Vec<Post> {
    match serde_json::from_str(raw) {
        Ok(posts) => posts,
        Err(e) => {
            tracing::warn!("Stored posts are corrupt, treating as empty: {}", e);
            Vec::new()
        }
    }
}

/// The persisted collection of blog posts
pub struct PostStore<S> {
    storage: S,
    key: String,
    slug_policy: SlugPolicy,
    excerpt_length: usize,
}

impl<S: Storage> PostStore<S> {
    /// Create a store with default settings
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: DEFAULT_POSTS_KEY.to_string(),
            slug_policy: SlugPolicy::default(),
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
        }
    }

    /// Create a store configured from the site config
    pub fn from_config(storage: S, config: &SiteConfig) -> Self {
        Self::new(storage)
            .with_key(&config.posts_key)
            .with_slug_policy(config.slug_collision)
            .with_excerpt_length(config.excerpt_length)
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    pub fn with_slug_policy(mut self, policy: SlugPolicy) -> Self {
        self.slug_policy = policy;
        self
    }

    pub fn with_excerpt_length(mut self, length: usize) -> Self {
        self.excerpt_length = length;
        self
    }

    pub fn excerpt_length(&self) -> usize {
        self.excerpt_length
    }

    fn load(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self
            .storage
            .get(&self.key)?
            .map(|raw| decode_posts(&raw))
            .unwrap_or_default())
    }

    fn save(&self, posts: &[Post]) -> Result<(), StoreError> {
        let encoded = encode_posts(posts)?;
        self.storage.set(&self.key, &encoded)?;
        Ok(())
    }

    /// Every stored post, in storage order
    pub fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        self.load()
    }

    /// First post whose slug matches exactly
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.load()?.into_iter().find(|post| post.slug == slug))
    }

    /// Post with the given id
    pub fn get_by_id(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.load()?.into_iter().find(|post| post.id == id))
    }

    /// Insert a new post or replace the stored post with the same id
    ///
    /// Empty `id`, `slug` and `excerpt` are filled in first. Returns the post
    /// as stored.
    pub fn upsert(&self, mut post: Post) -> Result<Post, StoreError> {
        if post.title.trim().is_empty() {
            return Err(StoreError::Validation("title is required".to_string()));
        }
        if post.content.trim().is_empty() {
            return Err(StoreError::Validation("content is required".to_string()));
        }

        // stored dates keep milliseconds only
        post.date = post.date.trunc_subsecs(3);

        let mut posts = self.load()?;

        if post.id.is_empty() {
            post.id = generate_id(&posts);
        }
        if post.slug.is_empty() {
            post.slug = post.slug_or_derived();
        }
        if post.excerpt.is_empty() {
            post.excerpt = default_excerpt(&post.content, self.excerpt_length);
        }

        post.slug = self.resolve_slug(&posts, &post)?;

        match posts.iter_mut().find(|existing| existing.id == post.id) {
            Some(existing) => {
                tracing::debug!("Replacing post {} ({})", post.id, post.slug);
                *existing = post.clone();
            }
            None => {
                tracing::debug!("Appending post {} ({})", post.id, post.slug);
                posts.push(post.clone());
            }
        }

        self.save(&posts)?;
        Ok(post)
    }

    /// Remove the post with the given id; returns whether one was removed
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut posts = self.load()?;
        let before = posts.len();
        posts.retain(|post| post.id != id);

        if posts.len() == before {
            tracing::debug!("Delete of unknown post {} ignored", id);
            return Ok(false);
        }

        self.save(&posts)?;
        tracing::debug!("Deleted post {}", id);
        Ok(true)
    }

    /// Drop the whole collection
    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(&self.key)?;
        Ok(())
    }

    /// Apply the slug policy against every other post
    fn resolve_slug(&self, posts: &[Post], post: &Post) -> Result<String, StoreError> {
        let taken_by = |slug: &str| {
            posts
                .iter()
                .find(|other| other.id != post.id && other.slug == slug)
        };

        let Some(other) = taken_by(&post.slug) else {
            return Ok(post.slug.clone());
        };

        match self.slug_policy {
            SlugPolicy::Allow => {
                tracing::warn!(
                    "Post {} shares slug '{}' with post {}; /blog/{} resolves to the first one",
                    post.id,
                    post.slug,
                    other.id,
                    post.slug
                );
                Ok(post.slug.clone())
            }
            SlugPolicy::Reject => Err(StoreError::SlugTaken {
                slug: post.slug.clone(),
                id: other.id.clone(),
            }),
            SlugPolicy::Suffix => {
                let mut n = 2;
                loop {
                    let candidate = format!("{}-{}", post.slug, n);
                    if taken_by(&candidate).is_none() {
                        tracing::info!("Slug '{}' taken, using '{}'", post.slug, candidate);
                        return Ok(candidate);
                    }
                    n += 1;
                }
            }
        }
    }
}

/// Time-based id: milliseconds since the epoch, bumped past any id in use
fn generate_id(posts: &[Post]) -> String {
    let mut millis = Utc::now().timestamp_millis();
    while posts.iter().any(|post| post.id == millis.to_string()) {
        millis += 1;
    }
    millis.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;

    fn store() -> PostStore<MemoryStorage> {
        PostStore::new(MemoryStorage::new())
    }

    fn full_post(id: &str, title: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            slug: crate::helpers::slugify(title),
            excerpt: "An excerpt".to_string(),
            content: format!("# {}\n\nBody", title),
            date: Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap(),
            cover_image: Some("https://img.example/cover.png".to_string()),
            tags: vec!["tech".to_string(), "rust".to_string()],
        }
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        assert!(store().list_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_then_list_contains_exact_post() {
        let store = store();
        let post = full_post("42", "Exact Fields");
        store.upsert(post.clone()).unwrap();

        let all = store.list_all().unwrap();
        let matching: Vec<_> = all.iter().filter(|p| p.id == "42").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0], &post);
    }

    #[test]
    fn test_upsert_fills_defaults_for_new_post() {
        let store = store();
        let before = Utc::now().trunc_subsecs(3);
        let saved = store.upsert(Post::new("Hello World", "hi")).unwrap();

        assert!(!saved.id.is_empty());
        assert!(saved.id.parse::<i64>().is_ok());
        assert_eq!(saved.slug, "hello-world");
        assert_eq!(saved.excerpt, "hi");
        assert!(saved.date >= before && saved.date <= Utc::now());
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_returns_post_as_stored() {
        let store = store();
        let mut post = full_post("", "Right Now");
        post.date = Utc::now();

        let saved = store.upsert(post).unwrap();
        assert_eq!(saved.date.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(store.list_all().unwrap()[0], saved);
        assert_eq!(store.get_by_slug("right-now").unwrap(), Some(saved.clone()));
        assert_eq!(store.get_by_id(&saved.id).unwrap(), Some(saved));
    }

    #[test]
    fn test_upsert_same_id_replaces_in_place() {
        let store = store();
        let first = store.upsert(Post::new("Hello World", "hi")).unwrap();
        let second = store.upsert(full_post("2", "Second")).unwrap();

        let mut edited = first.clone();
        edited.content = "changed".to_string();
        store.upsert(edited).unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].content, "changed");
        assert_eq!(all[1], second);
    }

    #[test]
    fn test_ids_do_not_collide_within_a_millisecond() {
        let store = store();
        let a = store.upsert(Post::new("A", "a")).unwrap();
        let b = store.upsert(Post::new("B", "b")).unwrap();
        let c = store.upsert(Post::new("C", "c")).unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_upsert_rejects_missing_fields() {
        let store = store();
        assert!(matches!(
            store.upsert(Post::new("", "content")),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.upsert(Post::new("Title", "   ")),
            Err(StoreError::Validation(_))
        ));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_get_by_slug() {
        let store = store();
        let post = store.upsert(full_post("1", "Unique Title")).unwrap();

        assert_eq!(store.get_by_slug("unique-title").unwrap(), Some(post));
        assert_eq!(store.get_by_slug("does-not-exist").unwrap(), None);
        // exact, case-sensitive match
        assert_eq!(store.get_by_slug("Unique-Title").unwrap(), None);
    }

    #[test]
    fn test_get_by_id() {
        let store = store();
        let post = store.upsert(full_post("7", "By Id")).unwrap();
        assert_eq!(store.get_by_id("7").unwrap(), Some(post));
        assert_eq!(store.get_by_id("8").unwrap(), None);
    }

    #[test]
    fn test_duplicate_slugs_resolve_to_first_inserted() {
        let store = store();
        let first = store.upsert(Post::new("Hello World", "first")).unwrap();
        let second = store.upsert(Post::new("Hello World", "second")).unwrap();

        assert_eq!(first.slug, "hello-world");
        assert_eq!(second.slug, "hello-world");
        assert_eq!(store.get_by_slug("hello-world").unwrap(), Some(first));
    }

    #[test]
    fn test_reject_policy() {
        let store = store().with_slug_policy(SlugPolicy::Reject);
        let first = store.upsert(Post::new("Hello World", "first")).unwrap();

        let err = store.upsert(Post::new("Hello World", "second")).unwrap_err();
        match err {
            StoreError::SlugTaken { slug, id } => {
                assert_eq!(slug, "hello-world");
                assert_eq!(id, first.id);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.list_all().unwrap().len(), 1);

        // re-saving the owner of the slug is fine
        let mut edited = first.clone();
        edited.content = "edited".to_string();
        assert!(store.upsert(edited).is_ok());
    }

    #[test]
    fn test_suffix_policy() {
        let store = store().with_slug_policy(SlugPolicy::Suffix);
        store.upsert(Post::new("Hello World", "1")).unwrap();
        let second = store.upsert(Post::new("Hello World", "2")).unwrap();
        let third = store.upsert(Post::new("Hello World", "3")).unwrap();

        assert_eq!(second.slug, "hello-world-2");
        assert_eq!(third.slug, "hello-world-3");
        assert_eq!(store.get_by_slug("hello-world-3").unwrap(), Some(third));
    }

    #[test]
    fn test_delete() {
        let store = store();
        let keep = store.upsert(full_post("1", "Keep")).unwrap();
        store.upsert(full_post("2", "Drop")).unwrap();

        assert!(store.delete("2").unwrap());
        let all = store.list_all().unwrap();
        assert!(all.iter().all(|p| p.id != "2"));
        assert_eq!(all, vec![keep]);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let store = store();
        store.upsert(full_post("1", "Only")).unwrap();
        let before = store.list_all().unwrap();

        assert!(!store.delete("missing").unwrap());
        assert_eq!(store.list_all().unwrap(), before);
    }

    #[test]
    fn test_corrupt_value_reads_as_empty() {
        let storage = MemoryStorage::with_entries([(DEFAULT_POSTS_KEY, "{{{ definitely not json")]);
        let store = PostStore::new(storage);
        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.get_by_slug("anything").unwrap(), None);

        // the next save replaces the corrupt value
        store.upsert(Post::new("Fresh", "start")).unwrap();
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_wrong_shape_reads_as_empty() {
        let storage = MemoryStorage::with_entries([(DEFAULT_POSTS_KEY, r#"{"id": "1"}"#)]);
        assert!(PostStore::new(storage).list_all().unwrap().is_empty());
    }

    #[test]
    fn test_codec_round_trip_preserves_order() {
        let posts = vec![full_post("3", "C"), full_post("1", "A"), full_post("2", "B")];
        let encoded = encode_posts(&posts).unwrap();
        assert_eq!(decode_posts(&encoded), posts);
    }

    #[test]
    fn test_custom_key_and_clear() {
        let storage = MemoryStorage::new();
        let store = PostStore::new(&storage).with_key("posts_v2");
        store.upsert(Post::new("Keyed", "body")).unwrap();

        assert!(storage.get("posts_v2").unwrap().is_some());
        assert!(storage.get(DEFAULT_POSTS_KEY).unwrap().is_none());

        store.clear().unwrap();
        assert!(storage.get("posts_v2").unwrap().is_none());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_excerpt_length_from_config() {
        let mut config = SiteConfig::default();
        config.excerpt_length = 5;
        let store = PostStore::from_config(MemoryStorage::new(), &config);
        let saved = store.upsert(Post::new("Long", "abcdefghij")).unwrap();
        assert_eq!(saved.excerpt, "abcde...");
    }

    #[test]
    fn test_persists_through_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let saved = PostStore::new(crate::storage::FileStorage::new(&path))
            .upsert(full_post("9", "On Disk"))
            .unwrap();

        let reopened = PostStore::new(crate::storage::FileStorage::new(&path));
        assert_eq!(reopened.list_all().unwrap(), vec![saved]);
    }
}
