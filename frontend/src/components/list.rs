// Hooks binding the shared list state machine to Yew
use std::ops::Deref;
use std::rc::Rc;

use callwatch_shared::list::{ListState, PageRequest};
use callwatch_shared::{ApiResult, Config, Entity, PaginatedResponse, Predicate, ResourceApi};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::auth::use_auth;
use crate::services::{ApiClient, Resource};

/// Page size used for the small lookups behind names and dropdowns.
pub const LOOKUP_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ListModel<E>(pub ListState<E>);

pub enum ListAction<E> {
    Reload,
    GoTo(u32),
    PageSize(u32),
    Settle(PageRequest, ApiResult<PaginatedResponse<E>>),
    SetFilter(&'static str, Predicate),
    ClearFilters,
}

impl<E: Clone + 'static> Reducible for ListModel<E> {
    type Action = ListAction<E>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        match action {
            ListAction::Reload => {
                state.reload();
            }
            ListAction::GoTo(page) => {
                if state.go_to_page(page).is_none() {
                    return self;
                }
            }
            ListAction::PageSize(size) => {
                if state.change_page_size(size).is_none() {
                    return self;
                }
            }
            ListAction::Settle(request, result) => {
                state.apply(request, result);
            }
            ListAction::SetFilter(key, predicate) => state.set_filter(key, predicate),
            ListAction::ClearFilters => state.clear_filters(),
        }
        Rc::new(ListModel(state))
    }
}

/// A list view's state plus the operations a page can trigger on it.
pub struct ListHandle<E: Clone + 'static> {
    state: UseReducerHandle<ListModel<E>>,
}

impl<E: Clone + 'static> Clone for ListHandle<E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<E: Clone + 'static> Deref for ListHandle<E> {
    type Target = ListState<E>;

    fn deref(&self) -> &Self::Target {
        &self.state.0
    }
}

impl<E: Clone + 'static> ListHandle<E> {
    pub fn reload(&self) {
        self.state.dispatch(ListAction::Reload);
    }

    pub fn on_page(&self) -> Callback<u32> {
        let state = self.state.clone();
        Callback::from(move |page| state.dispatch(ListAction::GoTo(page)))
    }

    pub fn on_page_size(&self) -> Callback<u32> {
        let state = self.state.clone();
        Callback::from(move |size| state.dispatch(ListAction::PageSize(size)))
    }

    /// Callback setting the filter under `key` from input text.
    pub fn on_filter(&self, key: &'static str, exact: bool) -> Callback<String> {
        let state = self.state.clone();
        Callback::from(move |value: String| {
            let predicate = if exact {
                Predicate::equals(value)
            } else {
                Predicate::contains(value)
            };
            state.dispatch(ListAction::SetFilter(key, predicate));
        })
    }

    pub fn on_clear_filters(&self) -> Callback<MouseEvent> {
        let state = self.state.clone();
        Callback::from(move |_| state.dispatch(ListAction::ClearFilters))
    }
}

/// The client provided at the app root, or one built from the build-time
/// configuration when rendered outside it.
#[hook]
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(|| ApiClient::new(&Config::from_build_env()))
}

/// Paginated list of `E`, loading page 1 on mount and whenever a page
/// operation issues a new request.
#[hook]
pub fn use_resource_list<E>(resource: Resource<E>) -> ListHandle<E>
where
    E: Entity + PartialEq,
{
    let auth = use_auth();
    let state = use_reducer(|| {
        let mut list = ListState::default();
        list.reload();
        ListModel(list)
    });

    {
        let state = state.clone();
        use_effect_with(state.0.pending(), move |pending| {
            if let Some(request) = *pending {
                spawn_local(async move {
                    let result = resource.list(request.page, request.per_page).await;
                    if let (Err(error), Some(auth)) = (&result, &auth) {
                        auth.expire_on(error);
                    }
                    state.dispatch(ListAction::Settle(request, result));
                });
            }
        });
    }

    ListHandle { state }
}

/// First lookup page of `E`, for resolving names and filling dropdowns.
/// Stays empty when the request fails.
#[hook]
pub fn use_lookup<E>(resource: Resource<E>) -> Rc<Vec<E>>
where
    E: Entity,
{
    let items = use_state(|| Rc::new(Vec::<E>::new()));

    {
        let items = items.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match resource.list(1, LOOKUP_PAGE_SIZE).await {
                    Ok(page) => items.set(Rc::new(page.items)),
                    Err(error) => tracing::error!(
                        code = %error.code(),
                        "could not load {} lookup: {}",
                        E::LABEL,
                        error
                    ),
                }
            });
        });
    }

    (*items).clone()
}
