use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use callwatch_shared::filter::keys;
use callwatch_shared::forms::{ContactGroupForm, FormState, Submission};
use callwatch_shared::pagination::visible_page_numbers;
use callwatch_shared::{
    ApiError, ApiResult, ContactGroup, ContactGroupCreate, ContactGroupUpdate, EmptyState,
    ListState, LoadOutcome, PageMeta, PaginatedResponse, Predicate, ResourceApi, Scope,
    WritableResourceApi,
};
use uuid::Uuid;

/// In-memory contact group collection that counts the requests it serves.
struct FakeGroups {
    groups: RefCell<Vec<ContactGroup>>,
    list_calls: Cell<usize>,
    offline: Cell<bool>,
}

impl FakeGroups {
    fn with(count: usize) -> Self {
        let groups = (0..count)
            .map(|i| ContactGroup {
                id: Uuid::new_v4(),
                name: format!("Group {:02}", i + 1),
                description: None,
                is_active: Some(i % 2 == 0),
                emergency_level: None,
                created_at: format!("2024-05-{:02}T08:00:00Z", i + 1),
                updated_at: format!("2024-05-{:02}T08:00:00Z", i + 1),
            })
            .collect();
        Self {
            groups: RefCell::new(groups),
            list_calls: Cell::new(0),
            offline: Cell::new(false),
        }
    }
}

#[async_trait(?Send)]
impl ResourceApi<ContactGroup> for FakeGroups {
    async fn list(&self, page: u32, per_page: u32) -> ApiResult<PaginatedResponse<ContactGroup>> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.offline.get() {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        let groups = self.groups.borrow();
        let start = ((page - 1) * per_page) as usize;
        let items = groups
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect();
        Ok(PaginatedResponse {
            items,
            total: groups.len() as u64,
            page,
            per_page,
            total_pages: PageMeta::pages_for(groups.len() as u64, per_page),
        })
    }

    async fn get(&self, id: &Uuid) -> ApiResult<ContactGroup> {
        self.groups
            .borrow()
            .iter()
            .find(|group| &group.id == id)
            .cloned()
            .ok_or_else(|| ApiError::status(404, "Contact group not found"))
    }

    async fn list_scoped(&self, _scope: &Scope<ContactGroup>) -> ApiResult<Vec<ContactGroup>> {
        Ok(Vec::new())
    }
}

#[async_trait(?Send)]
impl WritableResourceApi<ContactGroup> for FakeGroups {
    async fn create(&self, payload: &ContactGroupCreate) -> ApiResult<ContactGroup> {
        let group = ContactGroup {
            id: payload.id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            is_active: payload.is_active,
            emergency_level: payload.emergency_level,
            created_at: "2024-06-01T08:00:00Z".to_string(),
            updated_at: "2024-06-01T08:00:00Z".to_string(),
        };
        self.groups.borrow_mut().push(group.clone());
        Ok(group)
    }

    async fn update(&self, id: &Uuid, payload: &ContactGroupUpdate) -> ApiResult<ContactGroup> {
        let mut groups = self.groups.borrow_mut();
        let group = groups
            .iter_mut()
            .find(|group| &group.id == id)
            .ok_or_else(|| ApiError::status(404, "Contact group not found"))?;
        if let Some(name) = &payload.name {
            group.name = name.clone();
        }
        Ok(group.clone())
    }

    async fn delete(&self, id: &Uuid) -> ApiResult<()> {
        self.groups.borrow_mut().retain(|group| &group.id != id);
        Ok(())
    }
}

#[tokio::test]
async fn test_twenty_three_items_make_three_pages() {
    let api = FakeGroups::with(23);
    let mut list: ListState<ContactGroup> = ListState::default();

    let outcome = list.load_page(&api, 1, 10).await;

    assert_eq!(outcome, Some(LoadOutcome::Applied));
    let meta = list.meta();
    assert_eq!((meta.total, meta.page, meta.per_page, meta.total_pages), (23, 1, 10, 3));
    assert_eq!(visible_page_numbers(meta.page, meta.total_pages), vec![1, 2, 3]);
    assert_eq!(meta.item_range(), (1, 10));
}

#[tokio::test]
async fn test_ten_pages_collapse_around_either_end() {
    let api = FakeGroups::with(100);
    let mut list: ListState<ContactGroup> = ListState::default();
    list.load_page(&api, 1, 10).await;
    assert_eq!(
        visible_page_numbers(list.current_page(), list.meta().total_pages),
        vec![1, 2, 3, 4, 5, -1, 10]
    );

    list.load_page(&api, 10, 10).await;
    assert_eq!(
        visible_page_numbers(list.current_page(), list.meta().total_pages),
        vec![1, -1, 6, 7, 8, 9, 10]
    );
}

#[tokio::test]
async fn test_page_beyond_the_last_issues_no_request() {
    let api = FakeGroups::with(23);
    let mut list: ListState<ContactGroup> = ListState::default();
    list.load_page(&api, 1, 10).await;
    let calls = api.list_calls.get();

    assert_eq!(list.load_page(&api, 4, 10).await, None);
    assert_eq!(list.load_page(&api, 0, 10).await, None);
    assert_eq!(list.load_page(&api, 1, 15).await, None);
    assert_eq!(api.list_calls.get(), calls);
    assert_eq!(list.current_page(), 1);
}

#[tokio::test]
async fn test_page_size_change_starts_over_at_page_one() {
    let api = FakeGroups::with(23);
    let mut list: ListState<ContactGroup> = ListState::default();
    list.load_page(&api, 1, 10).await;
    list.load_page(&api, 3, 10).await;
    assert_eq!(list.current_page(), 3);

    let request = list.change_page_size(20).unwrap();
    assert_eq!((request.page, request.per_page), (1, 20));
    list.fetch(&api, request).await;

    assert_eq!(list.current_page(), 1);
    assert_eq!(list.meta().total_pages, 2);
    assert_eq!(list.items().len(), 20);
}

#[tokio::test]
async fn test_failed_reload_keeps_what_was_shown() {
    let api = FakeGroups::with(5);
    let mut list: ListState<ContactGroup> = ListState::default();
    list.load_page(&api, 1, 10).await;

    api.offline.set(true);
    let request = list.reload();
    assert_eq!(list.fetch(&api, request).await, LoadOutcome::Failed);

    assert!(list.load_failed());
    assert_eq!(list.items().len(), 5);
    assert_eq!(list.empty_state(), None);
}

#[tokio::test]
async fn test_failed_page_change_keeps_the_loaded_page_and_size() {
    let api = FakeGroups::with(23);
    let mut list: ListState<ContactGroup> = ListState::default();
    list.load_page(&api, 1, 10).await;
    let first_name = list.items()[0].name.clone();

    api.offline.set(true);
    assert_eq!(list.load_page(&api, 3, 10).await, Some(LoadOutcome::Failed));
    assert_eq!(list.current_page(), 1);
    assert_eq!(list.per_page(), 10);
    assert_eq!(list.meta().item_range(), (1, 10));
    assert_eq!(list.items()[0].name, first_name);

    assert_eq!(list.load_page(&api, 1, 50).await, Some(LoadOutcome::Failed));
    assert_eq!(list.current_page(), 1);
    assert_eq!(list.per_page(), 10);
    assert_eq!(list.meta().total_pages, 3);
    assert_eq!(list.items().len(), 10);

    api.offline.set(false);
    assert_eq!(list.load_page(&api, 3, 10).await, Some(LoadOutcome::Applied));
    assert_eq!(list.current_page(), 3);
    assert_eq!(list.meta().item_range(), (21, 23));
}

#[tokio::test]
async fn test_filters_narrow_the_page_and_report_no_matches() {
    let api = FakeGroups::with(6);
    let mut list: ListState<ContactGroup> = ListState::default();
    list.load_page(&api, 1, 10).await;

    list.set_filter(keys::STATUS, Predicate::equals("true"));
    let names: Vec<_> = list.filtered().into_iter().map(|group| group.name).collect();
    assert_eq!(names, vec!["Group 05", "Group 03", "Group 01"]);

    list.set_filter(keys::SEARCH, Predicate::contains("group 02"));
    assert!(list.filtered().is_empty());
    assert_eq!(list.empty_state(), Some(EmptyState::NoMatches));

    list.clear_filters();
    assert!(!list.has_active_filters());
    assert_eq!(list.filtered().len(), 6);
}

#[tokio::test]
async fn test_saving_a_form_then_reloading_shows_the_new_record() {
    let api = FakeGroups::with(0);
    let mut list: ListState<ContactGroup> = ListState::default();
    list.load_page(&api, 1, 10).await;
    assert_eq!(list.empty_state(), Some(EmptyState::NoItems));

    let mut form: FormState<ContactGroupForm> = FormState::default();
    form.open_create();
    form.values.name = "Night shift".to_string();
    let submission = form.submission().unwrap();
    assert!(matches!(submission, Submission::Create(_)));

    form.begin_saving();
    let saved = submission.send(&api).await;
    form.finish_saving(saved.is_ok());
    assert!(!form.is_open());

    let request = list.reload();
    list.fetch(&api, request).await;
    assert_eq!(list.items().len(), 1);
    assert_eq!(list.items()[0].name, "Night shift");

    form.open_edit(&list.items()[0]);
    form.values.name = "Night crew".to_string();
    form.submission().unwrap().send(&api).await.unwrap();
    assert_eq!(api.get(&list.items()[0].id).await.unwrap().name, "Night crew");
}
