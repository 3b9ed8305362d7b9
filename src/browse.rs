//! Explicit view state for a browsable list.
//!
//! A [`BrowseState`] owns the query, sort toggle, and current page for one
//! list view, and derives the visible slice by composing the pure engines in
//! [`crate::query`]. The full fetched collection stays with the caller; this
//! type never touches the network.

use std::num::NonZeroUsize;

use crate::api::Post;
use crate::query::{
    filter_by_exact, filter_by_prefix, paginate, search_status, sort_posts, suggestions,
    PostSort, PrefixSearch, SearchStatus,
};

/// The active query, if any. Typing filters by prefix; picking a suggestion
/// pins the filter to that suggestion's exact key.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ActiveQuery {
    Prefix(String),
    Exact(String),
}

/// Query/sort/page state for one list view.
#[derive(Debug, Clone)]
pub struct BrowseState {
    query: ActiveQuery,
    active_sort: Option<PostSort>,
    page: usize,
    page_size: NonZeroUsize,
    suggestion_limit: usize,
}

/// The derived visible slice: one page of the filtered (and possibly sorted)
/// collection, plus the suggestion list and search outcome.
#[derive(Debug, Clone)]
pub struct ViewPage<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    pub suggestions: Vec<T>,
    pub status: SearchStatus,
}

impl BrowseState {
    /// Fresh state: no query, no sort, page 1.
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            query: ActiveQuery::Prefix(String::new()),
            active_sort: None,
            page: 1,
            page_size,
            suggestion_limit: 5,
        }
    }

    /// Override the suggestion list bound (default 5).
    #[must_use]
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// The query text as the user sees it.
    #[must_use]
    pub fn query(&self) -> &str {
        match &self.query {
            ActiveQuery::Prefix(q) | ActiveQuery::Exact(q) => q,
        }
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn active_sort(&self) -> Option<PostSort> {
        self.active_sort
    }

    /// Set the prefix query. Always snaps back to page 1: a changed filter
    /// invalidates the old page position, and leaving it stale is how blank
    /// pages happen.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = ActiveQuery::Prefix(query.into());
        self.page = 1;
    }

    /// Pin the filter to one suggestion's exact key. Resets to page 1 and
    /// drops the suggestion list (an exact filter has nothing to suggest).
    pub fn select_suggestion<T: PrefixSearch>(&mut self, item: &T) {
        self.query = ActiveQuery::Exact(item.suggestion_key());
        self.page = 1;
    }

    /// Toggle a sort key: activating it deactivates the other, toggling the
    /// active key off restores fetch order.
    pub fn toggle_sort(&mut self, key: PostSort) {
        self.active_sort = if self.active_sort == Some(key) {
            None
        } else {
            Some(key)
        };
    }

    /// Jump to a page, 1-based. Deliberately unclamped: an out-of-range page
    /// renders empty rather than auto-correcting.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Derive the visible page of `collection`: filter, then paginate.
    #[must_use]
    pub fn visible<T: PrefixSearch + Clone>(&self, collection: &[T]) -> ViewPage<T> {
        let (filtered, suggested, status) = self.derive(collection);
        self.slice(filtered, suggested, status)
    }

    /// Derive the visible page of a post collection: filter, then sort when a
    /// key is active, then paginate. Suggestions come from the unsorted
    /// filtered subset.
    #[must_use]
    pub fn visible_posts(&self, collection: &[Post]) -> ViewPage<Post> {
        let (filtered, suggested, status) = self.derive(collection);
        let filtered = match self.active_sort {
            Some(key) => sort_posts(&filtered, key),
            None => filtered,
        };
        self.slice(filtered, suggested, status)
    }

    fn derive<T: PrefixSearch + Clone>(
        &self,
        collection: &[T],
    ) -> (Vec<T>, Vec<T>, SearchStatus) {
        let filtered = match &self.query {
            ActiveQuery::Prefix(q) => filter_by_prefix(collection, q),
            ActiveQuery::Exact(key) => filter_by_exact(collection, key),
        };
        let status = search_status(filtered.len(), self.query());
        let suggested = match &self.query {
            ActiveQuery::Prefix(q) => {
                suggestions(&filtered, q, self.suggestion_limit).to_vec()
            }
            ActiveQuery::Exact(_) => Vec::new(),
        };
        (filtered, suggested, status)
    }

    fn slice<T: Clone>(
        &self,
        filtered: Vec<T>,
        suggested: Vec<T>,
        status: SearchStatus,
    ) -> ViewPage<T> {
        let page = paginate(&filtered, self.page_size, self.page);
        ViewPage {
            items: page.items.to_vec(),
            total_pages: page.total_pages,
            suggestions: suggested,
            status,
        }
    }
}
