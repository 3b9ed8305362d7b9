//! Post lifecycle: create, edit, delete, reconciled against the API.
//!
//! The manager owns the local post collection (newest first) and the pending
//! draft. None of the mutations are optimistic: local state changes only
//! after the server acknowledged the operation, so a failure always leaves
//! the previously displayed state intact.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError, NewPost, Post, PostPatch};

#[derive(Debug, Default)]
pub struct PostManager {
    posts: Vec<Post>,
    draft: Option<NewPost>,
}

impl PostManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The local collection, newest first.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn draft(&self) -> Option<&NewPost> {
        self.draft.as_ref()
    }

    /// Find a local post by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Refetch the collection. The store serves oldest first; the local copy
    /// is kept newest first so freshly created posts land on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; the local collection is left as
    /// it was.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<(), ApiError> {
        let mut posts = client.list_posts().await?;
        posts.reverse();
        self.posts = posts;
        Ok(())
    }

    /// Stage a draft for submission, replacing any previous one.
    pub fn begin_draft(&mut self, draft: NewPost) {
        self.draft = Some(draft);
    }

    /// Submit the staged draft: assign a fresh id and the current timestamp,
    /// insert via the API, and on success prepend the stored record and clear
    /// the draft. On failure the draft stays staged and nothing local moves.
    ///
    /// Returns `Ok(None)` when no draft is staged.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn submit_draft(&mut self, client: &ApiClient) -> Result<Option<Post>, ApiError> {
        let Some(draft) = self.draft.as_ref() else {
            return Ok(None);
        };

        let post = Post {
            id: Uuid::new_v4().to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            author_id: draft.author_id.clone(),
            num_likes: 0,
            num_comments: 0,
            date_published: Utc::now().timestamp_millis(),
        };

        match client.create_post(&post).await {
            Ok(created) => {
                info!(id = %created.id, "Post created");
                self.posts.insert(0, created.clone());
                self.draft = None;
                Ok(Some(created))
            }
            Err(e) => {
                warn!("Create failed, draft kept: {e}");
                Err(e)
            }
        }
    }

    /// Apply a title/description patch to a post: merge into a copy, replace
    /// on the server, and only then replace the local record. A failure
    /// (including a non-2xx status) leaves the local record untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the id is not in the local
    /// collection, or the underlying API error when the replace fails.
    pub async fn update(
        &mut self,
        client: &ApiClient,
        id: &str,
        patch: PostPatch,
    ) -> Result<Post, ApiError> {
        let index = self
            .posts
            .iter()
            .position(|post| post.id == id)
            .ok_or_else(|| ApiError::NotFound {
                kind: "post",
                id: id.to_string(),
            })?;

        let mut updated = self.posts[index].clone();
        updated.title = patch.title;
        updated.description = patch.description;

        let saved = client.update_post(&updated).await?;
        info!(id = %saved.id, "Post updated");
        self.posts[index] = saved.clone();
        Ok(saved)
    }

    /// Delete a post. Removed locally only after the server confirmed;
    /// relative order of the remaining posts is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails; the local collection is left as
    /// it was.
    pub async fn delete(&mut self, client: &ApiClient, id: &str) -> Result<(), ApiError> {
        client.delete_post(id).await?;
        info!(id = %id, "Post deleted");
        self.posts.retain(|post| post.id != id);
        Ok(())
    }
}
