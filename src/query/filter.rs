//! Incremental prefix search over in-memory collections.

use crate::api::{Author, Post};

/// Types searchable by case-insensitive prefix on one or more candidate
/// strings.
pub trait PrefixSearch {
    /// Candidate strings tested against the query prefix. An item is retained
    /// when any candidate matches.
    fn candidates(&self) -> Vec<String>;

    /// Canonical label a suggestion stands for; selecting the suggestion
    /// re-filters on this key exactly.
    fn suggestion_key(&self) -> String;
}

impl PrefixSearch for Author {
    fn candidates(&self) -> Vec<String> {
        vec![self.first_name.clone(), self.last_name.clone()]
    }

    // Suggestions collapse the two name fields into one key.
    fn suggestion_key(&self) -> String {
        format!("{}{}", self.first_name, self.last_name)
    }
}

impl PrefixSearch for Post {
    fn candidates(&self) -> Vec<String> {
        vec![self.title.clone()]
    }

    fn suggestion_key(&self) -> String {
        self.title.clone()
    }
}

/// Outcome of a search, so "no results" can be told apart from "no query yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// No query entered; the full collection is showing.
    Inactive,
    /// Query entered and at least one item matched.
    Matched,
    /// Query entered but nothing matched.
    NoResults,
}

/// Retain the items with a candidate string starting with `query`,
/// case-insensitively. An empty query yields the full collection unchanged.
#[must_use]
pub fn filter_by_prefix<T: PrefixSearch + Clone>(items: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return items.to_vec();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.candidates()
                .iter()
                .any(|candidate| candidate.to_lowercase().starts_with(&needle))
        })
        .cloned()
        .collect()
}

/// Retain the items whose suggestion key equals `key`, case-insensitively.
/// Used when the caller picks a suggestion instead of typing further.
#[must_use]
pub fn filter_by_exact<T: PrefixSearch + Clone>(items: &[T], key: &str) -> Vec<T> {
    let needle = key.to_lowercase();
    items
        .iter()
        .filter(|item| item.suggestion_key().to_lowercase() == needle)
        .cloned()
        .collect()
}

/// The first `limit` filtered items, as long as a query is actually active.
/// A blank query gets no suggestions regardless of the subset.
#[must_use]
pub fn suggestions<'a, T>(filtered: &'a [T], query: &str, limit: usize) -> &'a [T] {
    if query.trim().is_empty() {
        &[]
    } else {
        &filtered[..filtered.len().min(limit)]
    }
}

/// Classify the search outcome for display.
#[must_use]
pub fn search_status(filtered_len: usize, query: &str) -> SearchStatus {
    if query.trim().is_empty() {
        SearchStatus::Inactive
    } else if filtered_len == 0 {
        SearchStatus::NoResults
    } else {
        SearchStatus::Matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: &str, first: &str, last: &str) -> Author {
        Author {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            num_posts: 0,
            num_comments: 0,
            num_likes: 0,
            profile_image: None,
        }
    }

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            author_id: "1".to_string(),
            num_likes: 0,
            num_comments: 0,
            date_published: 0,
        }
    }

    #[test]
    fn test_empty_query_is_identity() {
        let authors = vec![
            author("1", "Alice", "Smith"),
            author("2", "Bob", "Jones"),
        ];
        assert_eq!(filter_by_prefix(&authors, ""), authors);
    }

    #[test]
    fn test_prefix_match_on_either_name_field() {
        let authors = vec![
            author("1", "Alice", "Smith"),
            author("2", "Bob", "Jones"),
            author("3", "Amy", "Jackson"),
            author("4", "Carol", "Anderson"),
        ];

        // First-name prefixes, order preserved.
        let filtered = filter_by_prefix(&authors, "a");
        let ids: Vec<&str> = filtered.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]); // Anderson matches on last name

        // Last-name prefix.
        let filtered = filter_by_prefix(&authors, "jo");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "2");
    }

    #[test]
    fn test_prefix_match_is_case_insensitive() {
        let posts = vec![post("1", "Rust Patterns"), post("2", "rustic cooking")];
        assert_eq!(filter_by_prefix(&posts, "RUST").len(), 2);
        assert_eq!(filter_by_prefix(&posts, "rust p").len(), 1);
    }

    #[test]
    fn test_substring_does_not_match() {
        let posts = vec![post("1", "Learning Rust")];
        assert!(filter_by_prefix(&posts, "Rust").is_empty());
    }

    #[test]
    fn test_exact_filter_on_concatenated_name() {
        let authors = vec![
            author("1", "Alice", "Smith"),
            author("2", "Alice", "Smithe"),
        ];

        let exact = filter_by_exact(&authors, "alicesmith");
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].id, "1");
    }

    #[test]
    fn test_suggestions_bounded_and_gated_on_query() {
        let posts: Vec<Post> = (0..8).map(|i| post(&i.to_string(), "Title")).collect();

        assert_eq!(suggestions(&posts, "t", 5).len(), 5);
        assert_eq!(suggestions(&posts, "t", 5)[0].id, "0");
        assert!(suggestions(&posts, "", 5).is_empty());
        assert!(suggestions(&posts, "   ", 5).is_empty());
        assert_eq!(suggestions(&posts[..2], "t", 5).len(), 2);
    }

    #[test]
    fn test_search_status() {
        assert_eq!(search_status(10, ""), SearchStatus::Inactive);
        assert_eq!(search_status(0, ""), SearchStatus::Inactive);
        assert_eq!(search_status(3, "al"), SearchStatus::Matched);
        assert_eq!(search_status(0, "zz"), SearchStatus::NoResults);
    }

    #[test]
    fn test_scenario_alice_bob_amy() {
        let authors = vec![
            author("1", "Alice", "X"),
            author("2", "Bob", "Y"),
            author("3", "Amy", "Z"),
        ];

        let filtered = filter_by_prefix(&authors, "a");
        let names: Vec<&str> = filtered.iter().map(|a| a.first_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Amy"]);

        let sugg = suggestions(&filtered, "a", 5);
        assert_eq!(sugg, filtered.as_slice());
    }
}
