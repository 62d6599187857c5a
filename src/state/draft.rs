//! Create/edit form buffer for a post.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use crate::error::{ClientError, POST_FIELDS_REQUIRED};
use crate::net::types::{Post, PostBody};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftPost {
    pub title: String,
    pub content: String,
    /// Id of the post being edited; `None` means the form creates a new post.
    pub editing: Option<String>,
}

impl DraftPost {
    /// Load an existing post into the form for editing.
    pub fn begin_edit(&mut self, post: &Post) {
        self.title.clone_from(&post.title);
        self.content.clone_from(&post.content);
        self.editing = Some(post.id.clone());
    }

    /// Empty the form and leave edit mode.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Check the draft locally before any request is made.
    ///
    /// # Errors
    ///
    /// `ClientError::Validation` when title or content is blank.
    pub fn to_body(&self) -> Result<PostBody, ClientError> {
        validate_post_fields(&self.title, &self.content)
    }
}

/// Both fields must contain something other than whitespace.
///
/// # Errors
///
/// `ClientError::Validation` when either field is blank.
pub fn validate_post_fields(title: &str, content: &str) -> Result<PostBody, ClientError> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(ClientError::validation(POST_FIELDS_REQUIRED));
    }
    Ok(PostBody { title: title.to_owned(), content: content.to_owned() })
}
