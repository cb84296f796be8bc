//! Blog listing queries: search, tag filtering and the featured post

use super::Post;

/// Characters read per minute when estimating reading time
const CHARS_PER_MINUTE: usize = 1000;

/// Filter applied to the blog listing
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Case-insensitive substring matched against title, excerpt and content
    pub search: Option<String>,
    /// Exact tag the post must carry
    pub tag: Option<String>,
}

impl PostQuery {
    pub fn new(search: Option<String>, tag: Option<String>) -> Self {
        let non_blank = |s: String| if s.trim().is_empty() { None } else { Some(s) };
        Self {
            search: search.and_then(non_blank),
            tag: tag.and_then(non_blank),
        }
    }

    /// Whether a post passes the filter
    pub fn matches(&self, post: &Post) -> bool {
        let matches_search = match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                post.title.to_lowercase().contains(&term)
                    || post.excerpt.to_lowercase().contains(&term)
                    || post.content.to_lowercase().contains(&term)
            }
            None => true,
        };

        let matches_tag = self.tag.as_deref().map_or(true, |tag| post.has_tag(tag));

        matches_search && matches_tag
    }

    /// Posts passing the filter, in their original order
    pub fn filter<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts.iter().filter(|post| self.matches(post)).collect()
    }
}

/// All distinct tags in first-seen order
pub fn all_tags(posts: &[Post]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in posts.iter().flat_map(|post| &post.tags) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// The most recent post; on equal dates the earlier entry wins
pub fn featured<'a>(posts: &[&'a Post]) -> Option<&'a Post> {
    posts.iter().copied().fold(None, |latest: Option<&Post>, post| match latest {
        Some(current) if post.date <= current.date => Some(current),
        _ => Some(post),
    })
}

/// Posts sorted newest first, keeping storage order among equal dates
pub fn newest_first(posts: &[Post]) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Estimated reading time in whole minutes
pub fn reading_time(content: &str) -> usize {
    content.chars().count().div_ceil(CHARS_PER_MINUTE)
}

/// A filtered listing split into the featured post and the rest
#[derive(Debug)]
pub struct Listing<'a> {
    pub featured: Option<&'a Post>,
    pub others: Vec<&'a Post>,
}

impl<'a> Listing<'a> {
    /// Apply `query` to `posts` and pick the featured entry
    pub fn build(posts: &'a [Post], query: &PostQuery) -> Self {
        let filtered = query.filter(posts);
        let featured = featured(&filtered);
        let others = filtered
            .into_iter()
            .filter(|post| featured.map_or(true, |f| f.id != post.id))
            .collect();
        Self { featured, others }
    }

    pub fn is_empty(&self) -> bool {
        self.featured.is_none() && self.others.is_empty()
    }

    pub fn len(&self) -> usize {
        self.others.len() + usize::from(self.featured.is_some())
    }
}
