use serde::{Deserialize, Serialize};

/// A blog author.
///
/// Authors are read-only from this client's perspective; the backing store is
/// the only thing that creates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub num_posts: i64,
    pub num_comments: i64,
    pub num_likes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl Author {
    /// Display name shown in lists and dialogs.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A blog post.
///
/// `date_published` is epoch milliseconds, matching what the backing store
/// serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author_id: String,
    pub num_likes: i64,
    pub num_comments: i64,
    pub date_published: i64,
}

/// A like on a post. Read-only, fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub post_id: String,
    pub author_id: String,
    pub date_published: i64,
}

/// A comment on a post. Read-only, fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: String,
    pub author_id: String,
    pub text: String,
    pub date_published: i64,
}

/// Client-side draft for a post that has not been submitted yet.
///
/// The lifecycle manager turns this into a full [`Post`] (fresh id, zeroed
/// counters, current timestamp) at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub author_id: String,
}

/// Title/description patch applied to an existing post on edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPatch {
    pub title: String,
    pub description: String,
}

/// Error body the API returns on failed writes: `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
