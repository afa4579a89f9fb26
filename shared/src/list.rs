//! View state of one paginated list.
//!
//! `ListState` is a plain state machine: it hands out [`PageRequest`]s and is
//! fed the results. Requests are numbered, and only the answer to the most
//! recently issued request is applied, so a slow response for an old page
//! can never overwrite a newer one.

use tracing::{debug, warn};

use crate::api::ResourceApi;
use crate::error::ApiResult;
use crate::filter::{Filterable, Filters, Predicate, apply_filters};
use crate::models::Entity;
use crate::pagination::{
    DEFAULT_PAGE_SIZE, PageItem, PageMeta, PaginatedResponse, is_page_size_option, visible_pages,
};

/// A page load the view wants performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub seq: u64,
    pub page: u32,
    pub per_page: u32,
}

/// Why a list renders no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The collection has nothing in it; offer to create the first record.
    NoItems,
    /// Records exist but the active filters hide all of them.
    NoMatches,
}

/// What [`ListState::apply`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// The load failed; previous items are still shown.
    Failed,
    /// A newer request was issued since; the result was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<E> {
    items: Vec<E>,
    meta: PageMeta,
    filters: Filters,
    last_seq: u64,
    pending: Option<PageRequest>,
    load_failed: bool,
    loaded: bool,
}

impl<E> Default for ListState<E> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<E> ListState<E> {
    pub fn new(per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            meta: PageMeta::empty(per_page),
            filters: Filters::new(),
            last_seq: 0,
            pending: None,
            load_failed: false,
            loaded: false,
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn meta(&self) -> PageMeta {
        self.meta
    }

    pub fn current_page(&self) -> u32 {
        self.meta.page
    }

    pub fn per_page(&self) -> u32 {
        self.meta.per_page
    }

    pub fn pending(&self) -> Option<PageRequest> {
        self.pending
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// The last load failed. Cleared by the next successful one.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// At least one load has completed successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Starts a load of `page` at `per_page`, superseding any load in flight.
    /// The target lives only in the request; `meta` keeps describing the
    /// loaded page until a response for it is applied.
    pub fn issue(&mut self, page: u32, per_page: u32) -> PageRequest {
        self.last_seq += 1;
        let request = PageRequest {
            seq: self.last_seq,
            page,
            per_page,
        };
        self.pending = Some(request);
        request
    }

    /// Reloads the current page, e.g. after a save or delete.
    pub fn reload(&mut self) -> PageRequest {
        self.issue(self.meta.page, self.meta.per_page)
    }

    /// Moves to `page`. Pages outside `[1, total_pages]` are ignored and no
    /// request is produced.
    pub fn go_to_page(&mut self, page: u32) -> Option<PageRequest> {
        if !self.accepts_page(page) {
            debug!(page, total_pages = self.meta.total_pages, "ignoring out-of-range page");
            return None;
        }
        Some(self.issue(page, self.meta.per_page))
    }

    pub fn previous_page(&mut self) -> Option<PageRequest> {
        self.go_to_page(self.meta.page.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        self.go_to_page(self.meta.page.saturating_add(1))
    }

    /// Switches the page size and returns to page 1. Sizes outside the
    /// offered options are ignored.
    pub fn change_page_size(&mut self, per_page: u32) -> Option<PageRequest> {
        if !is_page_size_option(per_page) {
            debug!(per_page, "ignoring unsupported page size");
            return None;
        }
        Some(self.issue(1, per_page))
    }

    /// Feeds back the result of `request`.
    pub fn apply(
        &mut self,
        request: PageRequest,
        result: ApiResult<PaginatedResponse<E>>,
    ) -> LoadOutcome {
        if request.seq != self.last_seq {
            debug!(
                seq = request.seq,
                latest = self.last_seq,
                page = request.page,
                "dropping stale page response"
            );
            return LoadOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(response) => {
                self.meta = response.meta();
                self.items = response.items;
                self.load_failed = false;
                self.loaded = true;
                LoadOutcome::Applied
            }
            Err(error) => {
                warn!(code = %error.code(), page = request.page, "could not load page: {}", error);
                self.load_failed = true;
                LoadOutcome::Failed
            }
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn set_filter(&mut self, key: &str, predicate: Predicate) {
        self.filters.set(key, predicate);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }

    /// Empty state given how many rows survived filtering. Nothing is
    /// reported while the first load is still out.
    pub fn empty_state_for(&self, visible: usize) -> Option<EmptyState> {
        if visible > 0 || (!self.loaded && !self.load_failed) {
            return None;
        }
        if self.items.is_empty() {
            Some(EmptyState::NoItems)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    pub fn visible_pages(&self) -> Vec<PageItem> {
        visible_pages(self.meta.page, self.meta.total_pages)
    }

    fn accepts_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.meta.total_pages.max(1)
    }
}

impl<E: Filterable + Clone> ListState<E> {
    /// Rows to render: the held page with filters applied, newest first.
    pub fn filtered(&self) -> Vec<E> {
        apply_filters(&self.items, &self.filters)
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        self.empty_state_for(self.filtered().len())
    }
}

impl<E: Entity> ListState<E> {
    /// Performs `request` against `client` and applies the result.
    pub async fn fetch<C>(&mut self, client: &C, request: PageRequest) -> LoadOutcome
    where
        C: ResourceApi<E> + ?Sized,
    {
        let result = client.list(request.page, request.per_page).await;
        self.apply(request, result)
    }

    /// Loads `page` at `per_page`. Pages outside the known range and page
    /// sizes outside the offered options are rejected without a request; a
    /// new page size always starts over at page 1.
    pub async fn load_page<C>(&mut self, client: &C, page: u32, per_page: u32) -> Option<LoadOutcome>
    where
        C: ResourceApi<E> + ?Sized,
    {
        if !is_page_size_option(per_page) {
            debug!(per_page, "ignoring unsupported page size");
            return None;
        }
        let request = if per_page != self.meta.per_page {
            self.issue(1, per_page)
        } else if self.accepts_page(page) {
            self.issue(page, per_page)
        } else {
            debug!(page, total_pages = self.meta.total_pages, "ignoring out-of-range page");
            return None;
        };
        Some(self.fetch(client, request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::filter::keys;
    use crate::models::ContactGroup;
    use uuid::Uuid;

    fn group(name: &str, created_at: &str) -> ContactGroup {
        ContactGroup {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            is_active: Some(true),
            emergency_level: None,
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
        }
    }

    fn response(items: Vec<ContactGroup>, total: u64, page: u32) -> PaginatedResponse<ContactGroup> {
        PaginatedResponse {
            items,
            total,
            page,
            per_page: 10,
            total_pages: PageMeta::pages_for(total, 10),
        }
    }

    fn loaded_state() -> ListState<ContactGroup> {
        let mut state = ListState::default();
        let request = state.issue(1, 10);
        let outcome = state.apply(
            request,
            Ok(response(
                vec![
                    group("Night shift", "2024-05-01T08:00:00Z"),
                    group("Plant A", "2024-05-03T08:00:00Z"),
                ],
                23,
                1,
            )),
        );
        assert_eq!(outcome, LoadOutcome::Applied);
        state
    }

    #[test]
    fn latest_request_wins_over_a_slow_earlier_one() {
        let mut state = loaded_state();
        let slow = state.go_to_page(2).unwrap();
        let fast = state.go_to_page(3).unwrap();

        let third = response(vec![group("Third page", "2024-05-01T08:00:00Z")], 23, 3);
        assert_eq!(state.apply(fast, Ok(third)), LoadOutcome::Applied);

        let second = response(vec![group("Second page", "2024-05-01T08:00:00Z")], 23, 2);
        assert_eq!(state.apply(slow, Ok(second)), LoadOutcome::Stale);

        assert_eq!(state.current_page(), 3);
        assert_eq!(state.items()[0].name, "Third page");
        assert!(!state.is_loading());
    }

    #[test]
    fn failed_load_keeps_the_previous_page() {
        let mut state = loaded_state();
        let request = state.reload();
        let outcome = state.apply(request, Err(ApiError::Network("offline".into())));

        assert_eq!(outcome, LoadOutcome::Failed);
        assert!(state.load_failed());
        assert!(!state.is_loading());
        assert_eq!(state.items().len(), 2);
    }

    #[test]
    fn first_load_failure_leaves_the_list_empty() {
        let mut state: ListState<ContactGroup> = ListState::default();
        let request = state.issue(1, 10);
        state.apply(request, Err(ApiError::status(500, "boom")));
        assert!(state.items().is_empty());
        assert_eq!(state.empty_state(), Some(EmptyState::NoItems));
    }

    #[test]
    fn out_of_range_pages_produce_no_request() {
        let mut state = loaded_state();
        assert_eq!(state.go_to_page(0), None);
        assert_eq!(state.go_to_page(4), None);
        assert_eq!(state.previous_page(), None);
        assert!(!state.is_loading());
        assert!(state.go_to_page(3).is_some());
    }

    #[test]
    fn changing_page_size_resets_to_the_first_page() {
        let mut state = loaded_state();
        let request = state.go_to_page(3).unwrap();
        state.apply(request, Ok(response(Vec::new(), 23, 3)));

        let request = state.change_page_size(20).unwrap();
        assert_eq!((request.page, request.per_page), (1, 20));
        assert_eq!(state.pending(), Some(request));
        assert_eq!(state.change_page_size(15), None);

        let mut answer = response(Vec::new(), 23, 1);
        answer.per_page = 20;
        answer.total_pages = PageMeta::pages_for(23, 20);
        state.apply(request, Ok(answer));
        assert_eq!((state.current_page(), state.per_page()), (1, 20));
    }

    #[test]
    fn failed_page_change_keeps_the_loaded_page_metadata() {
        let mut state = loaded_state();
        let before = state.meta();

        let request = state.go_to_page(3).unwrap();
        assert_eq!(state.current_page(), 1);
        state.apply(request, Err(ApiError::Network("offline".into())));
        assert_eq!(state.meta(), before);
        assert_eq!(state.meta().item_range(), (1, 10));

        let request = state.change_page_size(50).unwrap();
        state.apply(request, Err(ApiError::Network("offline".into())));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.per_page(), 10);
        assert_eq!(state.meta().total_pages, 3);
    }

    #[test]
    fn empty_states_are_told_apart() {
        let mut state = loaded_state();
        assert_eq!(state.empty_state(), None);

        state.set_filter(keys::SEARCH, Predicate::contains("warehouse"));
        assert_eq!(state.empty_state(), Some(EmptyState::NoMatches));

        state.clear_filters();
        let request = state.reload();
        state.apply(request, Ok(response(Vec::new(), 0, 1)));
        assert_eq!(state.empty_state(), Some(EmptyState::NoItems));
    }

    #[test]
    fn nothing_is_reported_empty_before_the_first_answer() {
        let mut state: ListState<ContactGroup> = ListState::default();
        state.issue(1, 10);
        assert_eq!(state.empty_state(), None);
    }

    #[test]
    fn filtered_rows_come_newest_first() {
        let state = loaded_state();
        let names: Vec<_> = state.filtered().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Plant A", "Night shift"]);
        assert_eq!(
            state.visible_pages(),
            vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3)]
        );
    }
}
