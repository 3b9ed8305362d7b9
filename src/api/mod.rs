//! HTTP client for the blog REST API.
//!
//! A thin wrapper over `reqwest` that knows the four collections the API
//! exposes (`authors`, `posts`, `likes`, `comments`), decodes JSON, and maps
//! failures onto [`ApiError`]. No retries, no caching; callers own both.

mod error;
mod models;

pub use error::ApiError;
pub use models::{Author, Comment, ErrorBody, Like, NewPost, Post, PostPatch};

use reqwest::{Response, StatusCode};
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against the configured API origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent("blog-browser/0.1")
            .build()?;

        Ok(Self {
            http,
            // Url normalizes an empty path to a trailing slash; endpoints
            // append their own separator.
            base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Fetch the full author collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not valid JSON.
    pub async fn list_authors(&self) -> Result<Vec<Author>, ApiError> {
        let response = self.http.get(self.endpoint("authors")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Fetch a single author by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the author does not exist, and the
    /// usual network/API errors otherwise.
    pub async fn get_author(&self, id: &str) -> Result<Author, ApiError> {
        let response = self
            .http
            .get(self.endpoint(&format!("authors/{id}")))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                kind: "author",
                id: id.to_string(),
            });
        }
        Ok(check(response).await?.json().await?)
    }

    /// Fetch the full post collection, in store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not valid JSON.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let response = self.http.get(self.endpoint("posts")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Fetch a single post by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the post does not exist, and the
    /// usual network/API errors otherwise.
    pub async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let response = self
            .http
            .get(self.endpoint(&format!("posts/{id}")))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                kind: "post",
                id: id.to_string(),
            });
        }
        Ok(check(response).await?.json().await?)
    }

    /// Fetch all posts written by one author.
    ///
    /// The API exposes no server-side filter, so this fetches the collection
    /// and filters locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not valid JSON.
    pub async fn posts_by_author(&self, author_id: &str) -> Result<Vec<Post>, ApiError> {
        let posts = self.list_posts().await?;
        Ok(posts
            .into_iter()
            .filter(|post| post.author_id == author_id)
            .collect())
    }

    /// Insert a new post. Returns the record as the server stored it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the insert.
    pub async fn create_post(&self, post: &Post) -> Result<Post, ApiError> {
        debug!(id = %post.id, "Creating post");
        let response = self
            .http
            .post(self.endpoint("posts"))
            .json(post)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Replace an existing post wholesale. Returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; a non-2xx response surfaces the
    /// server's `{error}` message when the body carries one.
    pub async fn update_post(&self, post: &Post) -> Result<Post, ApiError> {
        debug!(id = %post.id, "Updating post");
        let response = self
            .http
            .put(self.endpoint(&format!("posts/{}", post.id)))
            .json(post)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Delete a post by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the delete.
    pub async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        debug!(id = %id, "Deleting post");
        let response = self
            .http
            .delete(self.endpoint(&format!("posts/{id}")))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Fetch the likes for one post.
    ///
    /// The API serves the whole `likes` collection; filtering by `postId`
    /// happens here.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not valid JSON.
    pub async fn likes_for_post(&self, post_id: &str) -> Result<Vec<Like>, ApiError> {
        let response = self.http.get(self.endpoint("likes")).send().await?;
        let likes: Vec<Like> = check(response).await?.json().await?;
        Ok(likes
            .into_iter()
            .filter(|like| like.post_id == post_id)
            .collect())
    }

    /// Fetch the comments for one post.
    ///
    /// Same shape as [`Self::likes_for_post`]: whole collection fetched,
    /// filtered locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not valid JSON.
    pub async fn comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>, ApiError> {
        let response = self.http.get(self.endpoint("comments")).send().await?;
        let comments: Vec<Comment> = check(response).await?.json().await?;
        Ok(comments
            .into_iter()
            .filter(|comment| comment.post_id == post_id)
            .collect())
    }
}

/// Map a non-2xx response onto [`ApiError::Api`], pulling the message out of
/// an `{error}` body when the server sent one.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}
