// Hook binding the shared edit-form state to a resource and its list
use callwatch_shared::forms::{EntityForm, FormState};
use callwatch_shared::{Entity, WritableResourceApi};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::auth::{AuthContext, use_auth};
use super::list::ListHandle;
use crate::services::Resource;

/// Current text of the input, textarea or select that fired `e`.
pub fn event_value(e: &Event) -> String {
    let Some(target) = e.target() else {
        return String::new();
    };
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

pub fn event_checked(e: &Event) -> bool {
    e.target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.checked())
        .unwrap_or(false)
}

pub struct FormHandle<F: EntityForm + 'static> {
    state: UseStateHandle<FormState<F>>,
    errors: UseStateHandle<Vec<String>>,
    resource: Resource<F::Entity>,
    list: ListHandle<F::Entity>,
    auth: Option<AuthContext>,
}

impl<F: EntityForm + 'static> Clone for FormHandle<F> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            errors: self.errors.clone(),
            resource: self.resource.clone(),
            list: self.list.clone(),
            auth: self.auth.clone(),
        }
    }
}

impl<F: EntityForm + 'static> FormHandle<F> {
    pub fn state(&self) -> &FormState<F> {
        &self.state
    }

    pub fn values(&self) -> &F {
        &self.state.values
    }

    pub fn errors(&self) -> Vec<String> {
        (*self.errors).clone()
    }

    /// Applies `change` to the form values.
    pub fn apply(&self, change: impl FnOnce(&mut F)) {
        let mut next = (*self.state).clone();
        change(&mut next.values);
        self.state.set(next);
    }

    pub fn on_create(&self) -> Callback<MouseEvent> {
        let handle = self.clone();
        Callback::from(move |_| {
            let mut next = (*handle.state).clone();
            next.open_create();
            handle.errors.set(Vec::new());
            handle.state.set(next);
        })
    }

    pub fn on_edit(&self, entity: F::Entity) -> Callback<MouseEvent> {
        let handle = self.clone();
        Callback::from(move |_| {
            let mut next = (*handle.state).clone();
            next.open_edit(&entity);
            handle.errors.set(Vec::new());
            handle.state.set(next);
        })
    }

    pub fn on_close(&self) -> Callback<()> {
        let handle = self.clone();
        Callback::from(move |_| {
            handle.errors.set(Vec::new());
            handle.state.set(FormState::default());
        })
    }

    /// Callback writing a text field from an input or change event.
    pub fn on_text(&self, write: fn(&mut F, String)) -> Callback<Event> {
        let handle = self.clone();
        Callback::from(move |e: Event| {
            let value = event_value(&e);
            handle.apply(|values| write(values, value));
        })
    }

    pub fn on_check(&self, write: fn(&mut F, bool)) -> Callback<Event> {
        let handle = self.clone();
        Callback::from(move |e: Event| {
            let checked = event_checked(&e);
            handle.apply(|values| write(values, checked));
        })
    }

    /// Validates and sends the form. Invalid input issues no request; a
    /// successful save closes the form and reloads the list.
    pub fn on_submit(&self) -> Callback<SubmitEvent> {
        let handle = self.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let submission = match handle.state.submission() {
                Ok(submission) => submission,
                Err(error) => {
                    tracing::debug!("{} form invalid: {}", F::Entity::LABEL, error);
                    handle.errors.set(error.fields());
                    return;
                }
            };

            let mut saving = (*handle.state).clone();
            saving.begin_saving();
            handle.errors.set(Vec::new());
            handle.state.set(saving.clone());

            let handle = handle.clone();
            spawn_local(async move {
                let result = submission.send(&handle.resource).await;
                let succeeded = match result {
                    Ok(saved) => {
                        tracing::info!("saved {} {}", F::Entity::LABEL, saved.id());
                        true
                    }
                    Err(error) => {
                        tracing::error!(code = %error.code(), "could not save {}: {}", F::Entity::LABEL, error);
                        if let Some(auth) = &handle.auth {
                            auth.expire_on(&error);
                        }
                        false
                    }
                };
                saving.finish_saving(succeeded);
                handle.state.set(saving);
                if succeeded {
                    handle.list.reload();
                }
            });
        })
    }

    /// Asks for confirmation, deletes `entity`, then reloads the list.
    pub fn on_delete(&self, entity: &F::Entity, name: &str) -> Callback<MouseEvent> {
        let handle = self.clone();
        let id = *entity.id();
        let prompt = format!("Delete {} \"{}\"?", F::Entity::LABEL, name);
        Callback::from(move |_| {
            if !gloo::dialogs::confirm(&prompt) {
                return;
            }
            let handle = handle.clone();
            spawn_local(async move {
                match handle.resource.delete(&id).await {
                    Ok(()) => {
                        tracing::info!("deleted {} {}", F::Entity::LABEL, id);
                        handle.list.reload();
                    }
                    Err(error) => {
                        tracing::error!(code = %error.code(), "could not delete {}: {}", F::Entity::LABEL, error);
                        if let Some(auth) = &handle.auth {
                            auth.expire_on(&error);
                        }
                    }
                }
            });
        })
    }
}

#[hook]
pub fn use_entity_form<F>(resource: Resource<F::Entity>, list: ListHandle<F::Entity>) -> FormHandle<F>
where
    F: EntityForm + 'static,
{
    let state = use_state(FormState::<F>::default);
    let errors = use_state(Vec::<String>::new);
    let auth = use_auth();

    FormHandle {
        state,
        errors,
        resource,
        list,
        auth,
    }
}
