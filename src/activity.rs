//! Likes and comments for a post, with author names resolved.
//!
//! The API stores only author ids on likes and comments; display needs names.
//! Lookups are dispatched concurrently (one per entry) and joined before
//! anything is returned: one failed lookup fails the whole batch, there is no
//! partial result. A lookup that merely finds nothing resolves to
//! [`ANONYMOUS`] instead of failing.

use futures_util::future::try_join_all;

use crate::api::{ApiClient, ApiError, Comment, Like};

/// Display fallback when a like or comment references an unknown author.
pub const ANONYMOUS: &str = "Anonymous";

/// A like paired with its author's display name.
#[derive(Debug, Clone)]
pub struct ResolvedLike {
    pub like: Like,
    pub author_name: String,
}

/// A comment paired with its author's display name.
#[derive(Debug, Clone)]
pub struct ResolvedComment {
    pub comment: Comment,
    pub author_name: String,
}

/// Fetch a post's likes and resolve each liker's name.
///
/// # Errors
///
/// Returns an error if the likes fetch fails or any name lookup fails for a
/// reason other than the author being absent.
pub async fn likes_with_authors(
    client: &ApiClient,
    post_id: &str,
) -> Result<Vec<ResolvedLike>, ApiError> {
    let likes = client.likes_for_post(post_id).await?;

    let lookups = likes
        .iter()
        .map(|like| resolve_author_name(client, &like.author_id));
    let names = try_join_all(lookups).await?;

    Ok(likes
        .into_iter()
        .zip(names)
        .map(|(like, author_name)| ResolvedLike { like, author_name })
        .collect())
}

/// Fetch a post's comments and resolve each commenter's name.
///
/// # Errors
///
/// Returns an error if the comments fetch fails or any name lookup fails for
/// a reason other than the author being absent.
pub async fn comments_with_authors(
    client: &ApiClient,
    post_id: &str,
) -> Result<Vec<ResolvedComment>, ApiError> {
    let comments = client.comments_for_post(post_id).await?;

    let lookups = comments
        .iter()
        .map(|comment| resolve_author_name(client, &comment.author_id));
    let names = try_join_all(lookups).await?;

    Ok(comments
        .into_iter()
        .zip(names)
        .map(|(comment, author_name)| ResolvedComment {
            comment,
            author_name,
        })
        .collect())
}

async fn resolve_author_name(client: &ApiClient, author_id: &str) -> Result<String, ApiError> {
    match client.get_author(author_id).await {
        Ok(author) => Ok(author.first_name),
        Err(e) if e.is_not_found() => Ok(ANONYMOUS.to_string()),
        Err(e) => Err(e),
    }
}
