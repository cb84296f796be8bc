//! Editor form state

use chrono::{SubsecRound, Utc};

use super::EditorError;
use crate::content::{parse_tags, Post};
use crate::helpers::{form_date, parse_form_date, slugify};

/// The editable fields, as the user typed them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    /// Empty for a post that has not been saved yet
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Comma separated
    pub tags: String,
    pub cover_image: String,
}

impl Default for PostForm {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            slug: String::new(),
            content: String::new(),
            excerpt: String::new(),
            date: form_date(&Utc::now()),
            tags: String::new(),
            cover_image: String::new(),
        }
    }
}

impl PostForm {
    /// Populate the form from a stored post
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            date: form_date(&post.date),
            tags: post.tags.join(", "),
            cover_image: post.cover_image.clone().unwrap_or_default(),
        }
    }

    /// Set the title; the slug follows it until it is edited by hand
    pub fn set_title(&mut self, title: &str) {
        if self.slug.is_empty() || self.slug == slugify(&self.title) {
            self.slug = slugify(title);
        }
        self.title = title.to_string();
    }

    /// Validate and build the post to store
    pub fn to_post(&self) -> Result<Post, EditorError> {
        if self.title.trim().is_empty() {
            return Err(EditorError::MissingTitle);
        }
        if self.content.trim().is_empty() {
            return Err(EditorError::MissingContent);
        }

        let slug = if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            self.slug.trim().to_string()
        };
        if slug.is_empty() {
            return Err(EditorError::EmptySlug);
        }

        let date = if self.date.trim().is_empty() {
            Utc::now().trunc_subsecs(3)
        } else {
            parse_form_date(&self.date).ok_or_else(|| EditorError::InvalidDate(self.date.clone()))?
        };

        let cover_image = Some(self.cover_image.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(Post {
            id: self.id.clone(),
            title: self.title.clone(),
            slug,
            // the store fills in the default excerpt
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            date,
            cover_image,
            tags: parse_tags(&self.tags),
        })
    }
}
