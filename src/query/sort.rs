//! Stable descending sort over post engagement counts.

use crate::api::Post;

/// Sort keys for post collections. At most one is active at a time from the
/// caller's perspective; the engine itself is stateless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSort {
    Likes,
    Comments,
}

impl PostSort {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Comments => "comments",
        }
    }
}

/// Return a copy of `posts` ordered by the chosen count, descending. The sort
/// is stable, so ties keep their original relative order. The input is never
/// mutated.
#[must_use]
pub fn sort_posts(posts: &[Post], key: PostSort) -> Vec<Post> {
    let mut sorted = posts.to_vec();
    match key {
        PostSort::Likes => sorted.sort_by(|a, b| b.num_likes.cmp(&a.num_likes)),
        PostSort::Comments => sorted.sort_by(|a, b| b.num_comments.cmp(&a.num_comments)),
    }
    sorted
}
