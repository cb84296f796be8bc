//! Post model

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::helpers::{slugify, truncate};

/// Default excerpt length in characters
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

/// A blog post
///
/// Serialized with camelCase keys; `date` is written as ISO 8601 with
/// millisecond precision (`2024-01-15T00:00:00.000Z`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Opaque identifier, assigned once on first save
    pub id: String,

    /// Post title
    pub title: String,

    /// Slug (URL-friendly name)
    pub slug: String,

    /// Short summary shown in listings
    #[serde(default)]
    pub excerpt: String,

    /// Raw markdown content
    pub content: String,

    /// Publication date
    #[serde(with = "iso8601")]
    pub date: DateTime<Utc>,

    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Post tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Post {
    /// Create an unsaved post dated now, to the millisecond
    ///
    /// `id`, `slug` and `excerpt` are left empty and filled in when the post
    /// is stored.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            slug: String::new(),
            excerpt: String::new(),
            content: content.into(),
            date: Utc::now().trunc_subsecs(3),
            cover_image: None,
            tags: Vec::new(),
        }
    }

    /// Whether the post has been stored before
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// The explicit slug, or one derived from the title
    pub fn slug_or_derived(&self) -> String {
        if self.slug.is_empty() {
            slugify(&self.title)
        } else {
            self.slug.clone()
        }
    }

    /// Whether the post carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Build the default excerpt from markdown content
///
/// Keeps the first `length` characters and appends `...` when anything was
/// cut off.
pub fn default_excerpt(content: &str, length: usize) -> String {
    truncate(content.trim(), length, "...")
}

/// Split a comma separated tag list, dropping blanks
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// ISO 8601 with milliseconds, the format browsers produce for dates
mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Post {
        Post {
            id: "1705276800000".to_string(),
            title: "Hello World".to_string(),
            slug: "hello-world".to_string(),
            excerpt: "hi".to_string(),
            content: "hi".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            cover_image: None,
            tags: vec!["tech".to_string()],
        }
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date"], "2024-01-15T00:00:00.000Z");
        assert_eq!(json["tags"][0], "tech");
        assert!(json.get("coverImage").is_none());

        let mut with_cover = sample();
        with_cover.cover_image = Some("https://img.example/a.png".to_string());
        let json = serde_json::to_value(with_cover).unwrap();
        assert_eq!(json["coverImage"], "https://img.example/a.png");
    }

    #[test]
    fn test_deserialize_browser_record() {
        let raw = r#"{
            "id": "1712345678901",
            "title": "Poem",
            "slug": "poem",
            "excerpt": "roses...",
            "content": "roses are red",
            "date": "2024-04-05T19:34:38.901Z",
            "coverImage": "https://img.example/p.jpg",
            "tags": ["poetry", "personal"]
        }"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.id, "1712345678901");
        assert_eq!(post.cover_image.as_deref(), Some("https://img.example/p.jpg"));
        assert_eq!(post.tags, vec!["poetry", "personal"]);
        assert_eq!(post.date.timestamp_millis(), 1712345678901);
    }

    #[test]
    fn test_new_post_is_unsaved() {
        let post = Post::new("Hello World", "hi");
        assert!(post.is_new());
        assert_eq!(post.slug_or_derived(), "hello-world");
    }

    #[test]
    fn test_new_post_date_survives_encoding() {
        let post = Post::new("Hello World", "hi");
        let decoded: Post = serde_json::from_str(&serde_json::to_string(&post).unwrap()).unwrap();
        assert_eq!(decoded.date, post.date);
    }

    #[test]
    fn test_default_excerpt() {
        assert_eq!(default_excerpt("short", 150), "short");
        let long = "x".repeat(200);
        let excerpt = default_excerpt(&long, 150);
        assert_eq!(excerpt.len(), 153);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" tech, personal ,, poetry "), vec!["tech", "personal", "poetry"]);
        assert!(parse_tags("  ,  ").is_empty());
    }
}
