//! Admin editor workflow
//!
//! A UI-agnostic state machine over the Write/Preview tabs and the delete
//! confirmation dialog. Front ends (the CLI here) drive it through its
//! methods and read back the form, tab and preview.

mod form;

pub use form::PostForm;

use thiserror::Error;

use crate::auth::Gate;
use crate::content::{Post, Render};
use crate::store::{PostStore, StoreError};
use crate::storage::Storage;

/// Editor tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Write,
    Preview,
}

/// Editor errors
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Not logged in")]
    Unauthorized,

    #[error("Title is required")]
    MissingTitle,

    #[error("Content is required")]
    MissingContent,

    #[error("Slug is empty; use a title or slug with letters or digits")]
    EmptySlug,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("No post is loaded")]
    NothingLoaded,

    #[error("Delete was not requested")]
    DeleteNotRequested,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EditorError {
    /// Whether the error comes from form validation (the form is kept)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingTitle | Self::MissingContent | Self::EmptySlug | Self::InvalidDate(_)
        )
    }
}

/// The post editor
pub struct Editor<'a, S> {
    store: &'a PostStore<S>,
    renderer: &'a dyn Render,
    form: PostForm,
    tab: Tab,
    preview_html: String,
    delete_dialog_open: bool,
    posts: Vec<Post>,
}

impl<'a, S: Storage> Editor<'a, S> {
    /// Open the editor; only an authenticated admin gets one
    pub fn open(
        gate: &dyn Gate,
        store: &'a PostStore<S>,
        renderer: &'a dyn Render,
    ) -> Result<Self, EditorError> {
        if !gate.is_authenticated() {
            return Err(EditorError::Unauthorized);
        }

        Ok(Self {
            store,
            renderer,
            form: PostForm::default(),
            tab: Tab::Write,
            preview_html: String::new(),
            delete_dialog_open: false,
            posts: Vec::new(),
        })
    }

    /// Refresh the post list and, when `edit_id` resolves, load that post
    ///
    /// Returns whether a post was loaded. An unknown id leaves the form as it
    /// was.
    pub fn load(&mut self, edit_id: Option<&str>) -> Result<bool, EditorError> {
        self.posts = self.store.list_all()?;

        let Some(id) = edit_id else {
            return Ok(false);
        };

        match self.posts.iter().find(|post| post.id == id) {
            Some(post) => {
                self.form = PostForm::from_post(post);
                self.preview_html = self.renderer.render(&post.content);
                tracing::debug!("Editing post {}", id);
                Ok(true)
            }
            None => {
                tracing::debug!("Post {} not found, editor left empty", id);
                Ok(false)
            }
        }
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn preview_html(&self) -> &str {
        &self.preview_html
    }

    pub fn is_delete_dialog_open(&self) -> bool {
        self.delete_dialog_open
    }

    /// Posts as of the last load or save
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Whether an existing post is loaded
    pub fn is_editing(&self) -> bool {
        !self.form.id.is_empty()
    }

    /// Change the title, keeping an auto-generated slug in sync
    pub fn set_title(&mut self, title: &str) {
        self.form.set_title(title);
    }

    pub fn set_slug(&mut self, slug: &str) {
        self.form.slug = slug.to_string();
    }

    pub fn set_content(&mut self, content: &str) {
        self.form.content = content.to_string();
    }

    pub fn set_excerpt(&mut self, excerpt: &str) {
        self.form.excerpt = excerpt.to_string();
    }

    pub fn set_date(&mut self, date: &str) {
        self.form.date = date.to_string();
    }

    pub fn set_tags(&mut self, tags: &str) {
        self.form.tags = tags.to_string();
    }

    pub fn set_cover_image(&mut self, url: &str) {
        self.form.cover_image = url.to_string();
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Render the current content and switch to the preview tab
    pub fn preview(&mut self) -> &str {
        self.preview_html = self.renderer.render(&self.form.content);
        self.tab = Tab::Preview;
        &self.preview_html
    }

    /// Validate the form and store the post
    ///
    /// On a validation error nothing changes and the editor stays on the
    /// write tab. A newly created post resets the form; an edited one stays
    /// loaded with a fresh preview.
    pub fn save(&mut self) -> Result<Post, EditorError> {
        let post = match self.form.to_post() {
            Ok(post) => post,
            Err(e) => {
                self.tab = Tab::Write;
                return Err(e);
            }
        };

        let was_new = post.is_new();
        let saved = self.store.upsert(post)?;
        self.posts = self.store.list_all()?;
        tracing::info!("Saved post \"{}\" ({})", saved.title, saved.id);

        if was_new {
            self.reset();
        } else {
            self.form = PostForm::from_post(&saved);
            self.preview_html = self.renderer.render(&saved.content);
        }

        Ok(saved)
    }

    /// Open the delete confirmation for the loaded post
    pub fn request_delete(&mut self) -> Result<(), EditorError> {
        if !self.is_editing() {
            return Err(EditorError::NothingLoaded);
        }
        self.delete_dialog_open = true;
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.delete_dialog_open = false;
    }

    /// Delete the loaded post after confirmation
    pub fn confirm_delete(&mut self) -> Result<bool, EditorError> {
        if !self.delete_dialog_open {
            return Err(EditorError::DeleteNotRequested);
        }
        if !self.is_editing() {
            self.delete_dialog_open = false;
            return Err(EditorError::NothingLoaded);
        }

        let id = self.form.id.clone();
        let removed = self.store.delete(&id)?;
        self.posts = self.store.list_all()?;
        self.reset();
        tracing::info!("Deleted post {}", id);
        Ok(removed)
    }

    /// Clear the form and preview and return to the write tab
    pub fn reset(&mut self) {
        self.form = PostForm::default();
        self.preview_html.clear();
        self.tab = Tab::Write;
        self.delete_dialog_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MarkdownRenderer;
    use crate::storage::MemoryStorage;

    struct Echo;

    impl Render for Echo {
        fn render(&self, markdown: &str) -> String {
            format!("<rendered>{}</rendered>", markdown)
        }
    }

    fn store() -> PostStore<MemoryStorage> {
        PostStore::new(MemoryStorage::new())
    }

    #[test]
    fn test_open_requires_authentication() {
        let store = store();
        assert!(matches!(
            Editor::open(&false, &store, &Echo),
            Err(EditorError::Unauthorized)
        ));
        assert!(Editor::open(&true, &store, &Echo).is_ok());
    }

    #[test]
    fn test_initial_state() {
        let store = store();
        let editor = Editor::open(&true, &store, &Echo).unwrap();
        assert_eq!(editor.tab(), Tab::Write);
        assert!(editor.form().title.is_empty());
        assert_eq!(editor.form().date.len(), "2024-01-01".len());
        assert!(!editor.is_delete_dialog_open());
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_save_validation_keeps_form() {
        let store = store();
        let mut editor = Editor::open(&true, &store, &Echo).unwrap();
        editor.set_content("body");
        editor.select_tab(Tab::Preview);

        let err = editor.save().unwrap_err();
        assert!(matches!(err, EditorError::MissingTitle));
        assert!(err.is_validation());
        assert_eq!(editor.tab(), Tab::Write);
        assert_eq!(editor.form().content, "body");

        editor.set_title("Title");
        editor.set_content("");
        assert!(matches!(editor.save(), Err(EditorError::MissingContent)));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_punctuation_title_is_rejected() {
        let store = store();
        let mut editor = Editor::open(&true, &store, &Echo).unwrap();
        editor.set_title("!!!");
        editor.set_content("body");
        assert!(matches!(editor.save(), Err(EditorError::EmptySlug)));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let store = store();
        let mut editor = Editor::open(&true, &store, &Echo).unwrap();
        editor.set_title("Dated");
        editor.set_content("body");
        editor.set_date("someday");
        assert!(matches!(editor.save(), Err(EditorError::InvalidDate(_))));
    }

    #[test]
    fn test_save_new_post_resets_form() {
        let store = store();
        let mut editor = Editor::open(&true, &store, &Echo).unwrap();
        editor.load(None).unwrap();
        editor.set_title("Hello World");
        editor.set_content("hi");
        editor.set_tags("tech, , personal");
        editor.set_date("2024-01-15");

        let saved = editor.save().unwrap();
        assert_eq!(saved.slug, "hello-world");
        assert_eq!(saved.tags, vec!["tech", "personal"]);
        assert_eq!(saved.date.to_rfc3339(), "2024-01-15T00:00:00+00:00");
        assert_eq!(saved.cover_image, None);

        assert!(editor.form().title.is_empty());
        assert!(!editor.is_editing());
        assert_eq!(editor.posts().len(), 1);
    }

    #[test]
    fn test_edit_existing_keeps_id() {
        let store = store();
        let existing = store.upsert(Post::new("Hello World", "hi")).unwrap();

        let mut editor = Editor::open(&true, &store, &Echo).unwrap();
        assert!(editor.load(Some(&existing.id)).unwrap());
        assert_eq!(editor.form().title, "Hello World");
        assert_eq!(editor.preview_html(), "<rendered>hi</rendered>");

        editor.set_content("updated");
        let saved = editor.save().unwrap();

        assert_eq!(saved.id, existing.id);
        assert!(editor.is_editing());
        assert_eq!(editor.preview_html(), "<rendered>updated</rendered>");

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "updated");
    }

    #[test]
    fn test_unknown_edit_id_leaves_form_empty() {
        let store = store();
        store.upsert(Post::new("Something", "x")).unwrap();

        let mut editor = Editor::open(&true, &store, &Echo).unwrap();
        assert!(!editor.load(Some("does-not-exist")).unwrap());
        assert!(editor.form().title.is_empty());
        assert_eq!(editor.posts().len(), 1);
    }

    #[test]
    fn test_title_change_tracks_auto_slug() {
        let store = store();
        let mut editor = Editor::open(&true, &store, &Echo).unwrap();
        editor.set_title("First Draft");
        assert_eq!(editor.form().slug, "first-draft");
        editor.set_title("Final Title");
        assert_eq!(editor.form().slug, "final-title");

        editor.set_slug("custom");
        editor.set_title("Another Title");
        assert_eq!(editor.form().slug, "custom");
    }

    #[test]
    fn test_preview_does_not_persist() {
        let store = store();
        let renderer = MarkdownRenderer::new();
        let mut editor = Editor::open(&true, &store, &renderer).unwrap();
        editor.set_content("# Heading");
        let html = editor.preview().to_string();

        assert!(html.contains("<h1>Heading</h1>"));
        assert_eq!(editor.tab(), Tab::Preview);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_requires_loaded_post() {
        let store = store();
        let mut editor = Editor::open(&true, &store, &Echo).unwrap();
        assert!(matches!(editor.request_delete(), Err(EditorError::NothingLoaded)));
        assert!(matches!(editor.confirm_delete(), Err(EditorError::DeleteNotRequested)));
    }

    #[test]
    fn test_delete_flow() {
        let store = store();
        let post = store.upsert(Post::new("Doomed", "bye")).unwrap();

        let mut editor = Editor::open(&true, &store, &Echo).unwrap();
        editor.load(Some(&post.id)).unwrap();

        // cancelling keeps the post
        editor.request_delete().unwrap();
        editor.cancel_delete();
        assert!(!editor.is_delete_dialog_open());
        assert!(matches!(editor.confirm_delete(), Err(EditorError::DeleteNotRequested)));
        assert_eq!(store.list_all().unwrap().len(), 1);

        editor.request_delete().unwrap();
        assert!(editor.is_delete_dialog_open());
        assert!(editor.confirm_delete().unwrap());

        assert!(store.list_all().unwrap().is_empty());
        assert!(!editor.is_editing());
        assert!(!editor.is_delete_dialog_open());
        assert!(editor.posts().is_empty());
    }
}
