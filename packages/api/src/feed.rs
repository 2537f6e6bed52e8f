//! # Feed state: paging guard, merge, follow projection and filtering
//!
//! [`FeedState`] is the in-memory feed the UI renders. It does no
//! I/O: a load is split into [`begin_load`](FeedState::begin_load) (claims the
//! in-flight guard and names the page to fetch), the fetch itself
//! ([`crate::FeedLoader::fetch_page`]), and [`apply_page`](FeedState::apply_page)
//! or [`fail_load`](FeedState::fail_load). The UI can therefore keep the state in
//! a signal without holding it across an `await`.
//!
//! ## Invariants
//!
//! - `posts` never holds two posts with the same id.
//! - After every merge, `posts` is ordered by descending creation time; posts
//!   whose timestamp does not parse sort last.
//! - At most one load is in flight, and a page is never requested twice unless
//!   its previous request failed.
//! - Once a page comes back empty, `has_more` stays `false`.

use std::collections::HashSet;
use std::rc::Rc;

use crate::directory::Directory;
use crate::models::{Post, RawPost};

/// Everything fetched for one page.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub page: u32,
    pub following: HashSet<i64>,
    pub directory: Rc<Directory>,
    pub posts: Vec<RawPost>,
}

/// "All" versus "Following only" view of the loaded posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFilter {
    #[default]
    All,
    Following,
}

impl FeedFilter {
    pub fn label(self) -> &'static str {
        match self {
            FeedFilter::All => "All",
            FeedFilter::Following => "Following",
        }
    }

    pub fn matches(self, post: &Post) -> bool {
        match self {
            FeedFilter::All => true,
            FeedFilter::Following => post.is_following_author,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub posts: Vec<Post>,
    pub following: HashSet<i64>,
    /// Page the visibility sensor has advanced to (starts at 1).
    pub page: u32,
    /// Highest page whose request has started and not failed.
    requested: u32,
    /// Highest page applied.
    loaded: u32,
    pub has_more: bool,
    pub loading: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            following: HashSet::new(),
            page: 1,
            requested: 0,
            loaded: 0,
            has_more: true,
            loading: false,
        }
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the in-flight guard for the current page.
    ///
    /// Returns `None` (and changes nothing) while a load is pending, after the
    /// feed is exhausted, or when the current page was already requested.
    pub fn begin_load(&mut self) -> Option<u32> {
        if self.loading || !self.has_more || self.page <= self.requested {
            return None;
        }
        self.loading = true;
        self.requested = self.page;
        Some(self.page)
    }

    /// Merge a fetched page and release the guard.
    pub fn apply_page(&mut self, fetched: FeedPage) {
        self.loading = false;
        self.loaded = self.loaded.max(fetched.page);
        self.following = fetched.following;

        if fetched.posts.is_empty() {
            tracing::debug!("Page {} is empty; feed exhausted", fetched.page);
            self.has_more = false;
            return;
        }

        let existing: HashSet<i64> = self.posts.iter().map(|p| p.id).collect();
        let mut seen = HashSet::new();
        let fresh: Vec<Post> = fetched
            .posts
            .into_iter()
            .filter(|raw| !existing.contains(&raw.id) && seen.insert(raw.id))
            .map(|raw| Post::from_raw(raw, &fetched.directory, &self.following))
            .collect();

        tracing::debug!("Page {}: {} new posts", fetched.page, fresh.len());
        self.posts.extend(fresh);
        self.sort();
    }

    /// Release the guard after a failed fetch; the page can be requested again.
    pub fn fail_load(&mut self) {
        self.loading = false;
        self.requested = self.loaded;
    }

    /// Visibility-sensor trigger on the last rendered post.
    ///
    /// Advances to the next page when the current one has loaded; re-arms the
    /// current page when its request failed. Returns whether a load should start.
    /// Triggers that arrive while a load is pending are dropped.
    pub fn advance(&mut self) -> bool {
        if self.loading || !self.has_more {
            return false;
        }
        if self.loaded >= self.page {
            self.page += 1;
        }
        true
    }

    /// Insert a just-created post at the head of the feed.
    pub fn prepend(&mut self, post: Post) {
        if self.posts.iter().any(|p| p.id == post.id) {
            return;
        }
        self.posts.insert(0, post);
    }

    /// Record a follow change for `user_id` on the set and on every post by them.
    /// Returns how many loaded posts were updated.
    pub fn set_following(&mut self, user_id: i64, following: bool) -> usize {
        if following {
            self.following.insert(user_id);
        } else {
            self.following.remove(&user_id);
        }

        let mut updated = 0;
        for post in self.posts.iter_mut().filter(|p| p.author.id == user_id) {
            post.is_following_author = following;
            updated += 1;
        }
        updated
    }

    /// Posts that pass `filter`, in feed order.
    pub fn visible(&self, filter: FeedFilter) -> Vec<&Post> {
        self.posts.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Highest page applied so far.
    pub fn loaded_page(&self) -> u32 {
        self.loaded
    }

    /// Render key for the element that carries the visibility sensor: the last
    /// post visible under `filter`, or a placeholder when nothing is visible.
    ///
    /// The key changes with every applied page, so the sensor is mounted afresh
    /// and reports again even when the same post stays last. A failed load keeps
    /// the key; that page is retried on the next scroll.
    pub fn sensor_key(&self, filter: FeedFilter) -> String {
        match self.visible(filter).last() {
            Some(post) => format!("{}@{}", post.id, self.loaded),
            None => format!("empty@{}", self.loaded),
        }
    }

    fn sort(&mut self) {
        // Stable: equal timestamps keep arrival order.
        self.posts.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn raw(id: i64, user_id: i64, created_at: &str) -> RawPost {
        RawPost {
            id,
            user_id,
            content: format!("post {id}"),
            created_at: created_at.to_string(),
        }
    }

    fn directory() -> Rc<Directory> {
        Rc::new(
            [User::new(1, "ada"), User::new(2, "bob")]
                .into_iter()
                .map(|u| (u.id, u))
                .collect(),
        )
    }

    fn page(n: u32, posts: Vec<RawPost>, following: &[i64]) -> FeedPage {
        FeedPage {
            page: n,
            following: following.iter().copied().collect(),
            directory: directory(),
            posts,
        }
    }

    fn ids(state: &FeedState) -> Vec<i64> {
        state.posts.iter().map(|p| p.id).collect()
    }

    fn assert_invariants(state: &FeedState) {
        let unique: HashSet<i64> = state.posts.iter().map(|p| p.id).collect();
        assert_eq!(unique.len(), state.posts.len(), "duplicate ids");
        for pair in state.posts.windows(2) {
            assert!(pair[0].timestamp() >= pair[1].timestamp(), "not sorted: {:?}", ids(state));
        }
    }

    #[test]
    fn guard_blocks_concurrent_and_repeat_loads() {
        let mut state = FeedState::new();
        assert_eq!(state.begin_load(), Some(1));
        assert_eq!(state.begin_load(), None);
        assert!(!state.advance(), "trigger while loading is dropped");

        state.apply_page(page(1, vec![raw(1, 1, "2025-01-01T00:00:00Z")], &[]));
        assert!(!state.loading);
        assert_eq!(state.begin_load(), None, "page 1 already loaded");

        assert!(state.advance());
        assert_eq!(state.page, 2);
        assert_eq!(state.begin_load(), Some(2));
    }

    #[test]
    fn merge_dedups_and_resorts_whole_list() {
        let mut state = FeedState::new();
        state.begin_load();
        state.apply_page(page(
            1,
            vec![raw(1, 1, "2025-01-03T00:00:00Z"), raw(2, 2, "2025-01-01T00:00:00Z")],
            &[],
        ));
        state.advance();
        state.begin_load();
        // Overlaps id 2 and carries a post newer than everything loaded so far
        state.apply_page(page(
            2,
            vec![
                raw(2, 2, "2025-01-01T00:00:00Z"),
                raw(3, 1, "2025-01-05T00:00:00Z"),
                raw(4, 2, "2025-01-02T00:00:00Z"),
                raw(4, 2, "2025-01-02T00:00:00Z"),
            ],
            &[],
        ));

        assert_eq!(ids(&state), [3, 1, 4, 2]);
        assert_invariants(&state);
    }

    #[test]
    fn unparseable_timestamps_sort_last() {
        let mut state = FeedState::new();
        state.begin_load();
        state.apply_page(page(
            1,
            vec![raw(1, 1, "garbage"), raw(2, 1, "2025-01-01T00:00:00Z")],
            &[],
        ));
        assert_eq!(ids(&state), [2, 1]);
    }

    #[test]
    fn empty_page_exhausts_feed() {
        let mut state = FeedState::new();
        state.begin_load();
        state.apply_page(page(1, vec![], &[]));
        assert!(!state.has_more);
        assert!(!state.advance());
        assert_eq!(state.begin_load(), None);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn failed_page_is_retried_not_skipped() {
        let mut state = FeedState::new();
        state.begin_load();
        state.apply_page(page(1, vec![raw(1, 1, "2025-01-01T00:00:00Z")], &[]));
        state.advance();
        assert_eq!(state.begin_load(), Some(2));
        state.fail_load();

        assert_eq!(ids(&state), [1], "posts untouched");
        assert!(state.advance());
        assert_eq!(state.page, 2, "re-armed, not advanced");
        assert_eq!(state.begin_load(), Some(2));
    }

    #[test]
    fn follow_change_touches_only_that_author() {
        let mut state = FeedState::new();
        state.begin_load();
        state.apply_page(page(
            1,
            vec![
                raw(1, 1, "2025-01-03T00:00:00Z"),
                raw(2, 2, "2025-01-02T00:00:00Z"),
                raw(3, 1, "2025-01-01T00:00:00Z"),
            ],
            &[2],
        ));
        assert!(state.posts.iter().find(|p| p.id == 2).unwrap().is_following_author);

        assert_eq!(state.set_following(1, true), 2);
        assert!(state.following.contains(&1));
        for post in &state.posts {
            assert!(post.is_following_author, "post {}", post.id);
        }

        assert_eq!(state.set_following(2, false), 1);
        let flags: Vec<bool> = state.posts.iter().map(|p| p.is_following_author).collect();
        assert_eq!(flags, [true, false, true]);
    }

    #[test]
    fn filter_partitions_without_mutation() {
        let mut state = FeedState::new();
        state.begin_load();
        state.apply_page(page(
            1,
            vec![raw(1, 1, "2025-01-02T00:00:00Z"), raw(2, 2, "2025-01-01T00:00:00Z")],
            &[2],
        ));
        let following: Vec<i64> = state.visible(FeedFilter::Following).iter().map(|p| p.id).collect();
        assert_eq!(following, [2]);
        assert_eq!(state.visible(FeedFilter::All).len(), 2);
        assert_eq!(state.posts.len(), 2);
    }

    #[test]
    fn sensor_key_moves_when_last_visible_post_does_not() {
        let mut state = FeedState::new();
        state.begin_load();
        state.apply_page(page(
            1,
            vec![raw(1, 1, "2025-01-02T10:00:00Z"), raw(2, 2, "2025-01-02T09:00:00Z")],
            &[1],
        ));
        let last = |s: &FeedState| s.visible(FeedFilter::Following).last().map(|p| p.id);
        let first_key = state.sensor_key(FeedFilter::Following);
        assert_eq!(last(&state), Some(1));

        // Page 2 only has posts by an author the viewer does not follow
        assert!(state.advance());
        state.begin_load();
        state.apply_page(page(
            2,
            vec![raw(3, 2, "2025-01-01T10:00:00Z"), raw(4, 2, "2025-01-01T09:00:00Z")],
            &[1],
        ));
        assert_eq!(last(&state), Some(1));
        assert!(state.has_more && !state.loading);
        let second_key = state.sensor_key(FeedFilter::Following);
        assert_ne!(first_key, second_key);

        // A page of duplicates still moves the key
        assert!(state.advance());
        state.begin_load();
        state.apply_page(page(3, vec![raw(2, 2, "2025-01-02T09:00:00Z")], &[1]));
        assert_eq!(ids(&state), vec![1, 2, 3, 4]);
        let third_key = state.sensor_key(FeedFilter::Following);
        assert_ne!(third_key, second_key);

        // A failed load leaves it alone
        assert!(state.advance());
        state.begin_load();
        state.fail_load();
        assert_eq!(state.sensor_key(FeedFilter::Following), third_key);
    }

    #[test]
    fn sensor_key_without_visible_posts() {
        let mut state = FeedState::new();
        assert_eq!(state.sensor_key(FeedFilter::Following), "empty@0");
        state.begin_load();
        state.apply_page(page(1, vec![raw(1, 2, "2025-01-02T10:00:00Z")], &[]));
        assert_eq!(state.sensor_key(FeedFilter::Following), "empty@1");
        assert_eq!(state.sensor_key(FeedFilter::All), "1@1");
    }

    #[test]
    fn prepend_skips_known_ids() {
        let mut state = FeedState::new();
        state.begin_load();
        state.apply_page(page(1, vec![raw(1, 1, "2025-01-01T00:00:00Z")], &[]));

        let mut fresh = state.posts[0].clone();
        fresh.id = 9;
        state.prepend(fresh.clone());
        state.prepend(fresh);
        assert_eq!(ids(&state), [9, 1]);
    }
}
