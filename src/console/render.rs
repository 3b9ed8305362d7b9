//! Plain-text rendering for the console surface.

use chrono::{TimeZone, Utc};

use crate::activity::{ResolvedComment, ResolvedLike};
use crate::api::{Author, Post};
use crate::query::{PrefixSearch, SearchStatus};

/// Longest slice of a description shown in list rows.
const EXCERPT_CHARS: usize = 150;

pub fn author_table(authors: &[Author]) -> String {
    let mut out = format!(
        "{:<12} {:<28} {:>6} {:>9} {:>6}\n",
        "ID", "NAME", "POSTS", "COMMENTS", "LIKES"
    );
    for author in authors {
        out.push_str(&format!(
            "{:<12} {:<28} {:>6} {:>9} {:>6}\n",
            author.id,
            author.full_name(),
            author.num_posts,
            author.num_comments,
            author.num_likes,
        ));
    }
    out
}

pub fn post_table(posts: &[Post]) -> String {
    let mut out = String::new();
    for post in posts {
        out.push_str(&format!(
            "[{}] {}\n    {}\n    likes {} | comments {} | {}\n",
            post.id,
            post.title,
            excerpt(&post.description, EXCERPT_CHARS),
            post.num_likes,
            post.num_comments,
            format_date(post.date_published),
        ));
    }
    out
}

pub fn author_card(author: &Author) -> String {
    let mut out = format!(
        "{}\nposts {} | comments {} | likes {}\n",
        author.full_name(),
        author.num_posts,
        author.num_comments,
        author.num_likes,
    );
    if let Some(image) = &author.profile_image {
        out.push_str(&format!("profile image: {image}\n"));
    }
    out
}

pub fn post_card(post: &Post) -> String {
    format!(
        "{}\npublished {} by author {}\nlikes {} | comments {}\n\n{}\n",
        post.title,
        format_date(post.date_published),
        post.author_id,
        post.num_likes,
        post.num_comments,
        post.description,
    )
}

pub fn likes_list(likes: &[ResolvedLike]) -> String {
    let mut out = format!("Likes ({})\n", likes.len());
    for resolved in likes {
        out.push_str(&format!(
            "  {} — liked on {}\n",
            resolved.author_name,
            format_date(resolved.like.date_published),
        ));
    }
    out
}

pub fn comments_list(comments: &[ResolvedComment]) -> String {
    let mut out = format!("Comments ({})\n", comments.len());
    for resolved in comments {
        out.push_str(&format!(
            "  {}: {} — {}\n",
            resolved.author_name,
            resolved.comment.text,
            format_date(resolved.comment.date_published),
        ));
    }
    out
}

/// Suggestion list plus the no-results notice, matching the search status.
pub fn search_feedback<T: PrefixSearch>(
    suggestions: &[T],
    status: SearchStatus,
    query: &str,
) -> String {
    match status {
        SearchStatus::NoResults => format!("No results found for {query}\n"),
        SearchStatus::Inactive | SearchStatus::Matched => {
            let mut out = String::new();
            for (index, item) in suggestions.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", index + 1, item.suggestion_key()));
            }
            if !out.is_empty() {
                out.push_str("(pick <n> to select a suggestion)\n");
            }
            out
        }
    }
}

pub fn page_footer(current: usize, total_pages: usize) -> String {
    if total_pages == 0 {
        "no items\n".to_string()
    } else {
        format!("page {current}/{total_pages}\n")
    }
}

/// First `max` characters of `text`, with a trailing ellipsis when truncated.
/// Splits on character boundaries, not bytes.
pub fn excerpt(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn format_date(epoch_millis: i64) -> String {
    Utc.timestamp_millis_opt(epoch_millis)
        .single()
        .map_or_else(
            || "unknown date".to_string(),
            |date| date.format("%Y-%m-%d").to_string(),
        )
}
