// Trigger phrases: an email containing one starts calls to its group
use callwatch_shared::filter::keys;
use callwatch_shared::format::truncate;
use callwatch_shared::forms::TriggerForm;
use callwatch_shared::{ContactGroup, Trigger, group_name};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::*;
use crate::services::Resource;

#[derive(Clone, PartialEq)]
enum PhraseLookup {
    Idle,
    Searching,
    Found(Trigger),
    NotFound(String),
}

#[function_component(TriggersPage)]
pub fn triggers_page() -> Html {
    let client = use_api();
    let auth = use_auth();
    let resource = Resource::<Trigger>::new(client.clone());
    let list = use_resource_list(resource.clone());
    let form = use_entity_form::<TriggerForm>(resource.clone(), list.clone());
    let groups = use_lookup(Resource::<ContactGroup>::new(client));
    let phrase = use_state(String::new);
    let lookup = use_state(|| PhraseLookup::Idle);

    let triggers = list.filtered();
    let filters = list.filters();
    let group_options: Vec<(String, String)> = groups
        .iter()
        .map(|group| (group.id.to_string(), group.name.clone()))
        .collect();

    let on_phrase = {
        let phrase = phrase.clone();
        Callback::from(move |value: String| phrase.set(value))
    };

    let on_lookup = {
        let phrase = phrase.clone();
        let lookup = lookup.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let text = phrase.trim().to_string();
            if text.is_empty() {
                lookup.set(PhraseLookup::Idle);
                return;
            }
            lookup.set(PhraseLookup::Searching);
            let resource = resource.clone();
            let lookup = lookup.clone();
            let auth = auth.clone();
            spawn_local(async move {
                match resource.by_string(&text).await {
                    Ok(trigger) => lookup.set(PhraseLookup::Found(trigger)),
                    Err(error) => {
                        tracing::debug!(code = %error.code(), "no trigger for {:?}: {}", text, error);
                        if let Some(auth) = &auth {
                            auth.expire_on(&error);
                        }
                        lookup.set(PhraseLookup::NotFound(text));
                    }
                }
            });
        })
    };

    let lookup_result = match &*lookup {
        PhraseLookup::Idle => html! {},
        PhraseLookup::Searching => html! { <span class="text-gray-400">{"Searching..."}</span> },
        PhraseLookup::Found(trigger) => html! {
            <span class="text-green-300">
                {format!("\"{}\" is handled by trigger {}", trigger.trigger_string, trigger.name)}
            </span>
        },
        PhraseLookup::NotFound(text) => html! {
            <span class="text-yellow-300">{format!("No trigger matches \"{}\"", text)}</span>
        },
    };

    let describe_group = |id: &Option<Uuid>| match id {
        Some(id) => group_name(&groups, id),
        None => "No group".to_string(),
    };

    let table = match list.empty_state() {
        Some(state) => html! {
            <EmptyStateView
                {state}
                noun="triggers"
                on_create={Some(form.on_create())}
                on_clear_filters={list.on_clear_filters()}
            />
        },
        None => html! {
            <table class="w-full text-sm">
                <thead class="bg-gray-700/50 text-gray-400 text-left">
                    <tr>
                        <th class="px-4 py-3">{"Name"}</th>
                        <th class="px-4 py-3">{"Phrase"}</th>
                        <th class="px-4 py-3">{"Group"}</th>
                        <th class="px-4 py-3">{"Priority"}</th>
                        <th class="px-4 py-3">{"Message"}</th>
                        <th class="px-4 py-3">{"Status"}</th>
                        <th class="px-4 py-3 text-right">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-700 text-gray-200">
                    {for triggers.iter().map(|trigger| {
                        let (status, tone) = if trigger.active() { ("Active", "green") } else { ("Inactive", "gray") };
                        html! {
                            <tr key={trigger.id.to_string()} class="hover:bg-gray-700/30">
                                <td class="px-4 py-3 font-medium text-white">{trigger.name.clone()}</td>
                                <td class="px-4 py-3 font-mono text-blue-300">{trigger.trigger_string.clone()}</td>
                                <td class="px-4 py-3">{describe_group(&trigger.group_id)}</td>
                                <td class="px-4 py-3">{trigger.priority_or_default()}</td>
                                <td class="px-4 py-3 text-gray-400">
                                    {truncate(trigger.custom_message.as_deref().unwrap_or_default(), 40)}
                                </td>
                                <td class="px-4 py-3"><StatusBadge label={status} {tone} /></td>
                                <td class="px-4 py-3 text-right space-x-3">
                                    <button onclick={form.on_edit(trigger.clone())} class="text-blue-400 hover:text-blue-300">{"Edit"}</button>
                                    <button onclick={form.on_delete(trigger, &trigger.name)} class="text-red-400 hover:text-red-300">{"Delete"}</button>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        },
    };

    let values = form.values().clone();
    let editing = form.state().is_editing();

    html! {
        <div class="p-6">
            <ListHeader
                title="Triggers"
                subtitle="Phrases that turn an incoming email into phone calls"
                on_create={Some(form.on_create())}
                create_label="New Trigger"
            />

            <form onsubmit={on_lookup} class="flex items-center gap-3 mb-4 text-sm">
                <SearchInput
                    value={(*phrase).clone()}
                    placeholder="Which trigger handles this phrase?"
                    on_change={on_phrase}
                />
                <button type="submit" class="px-4 py-2 bg-gray-700 text-white rounded-md hover:bg-gray-600">
                    {"Look up"}
                </button>
                {lookup_result}
            </form>

            <div class="flex flex-wrap gap-3 mb-4">
                <SearchInput
                    value={filters.value(keys::SEARCH).to_string()}
                    placeholder="Search name or phrase..."
                    on_change={list.on_filter(keys::SEARCH, false)}
                />
                <SelectFilter
                    value={filters.value(keys::GROUP).to_string()}
                    all_label="All groups"
                    options={group_options.clone()}
                    on_change={list.on_filter(keys::GROUP, true)}
                />
                <SelectFilter
                    value={filters.value(keys::STATUS).to_string()}
                    all_label="All statuses"
                    options={status_options()}
                    on_change={list.on_filter(keys::STATUS, true)}
                />
            </div>

            <LoadNotice loading={list.is_loading()} failed={list.load_failed()} noun="triggers" />

            <div class="bg-gray-800 rounded-lg border border-gray-700 overflow-hidden">
                {table}
                <Pagination meta={list.meta()} on_page={list.on_page()} on_page_size={list.on_page_size()} />
            </div>

            if form.state().is_open() {
                <Modal
                    title={if editing { "Edit Trigger" } else { "New Trigger" }}
                    on_close={form.on_close()}
                >
                    <form onsubmit={form.on_submit()}>
                        <FieldErrors fields={form.errors()} />
                        <TextField
                            label="Name"
                            required={true}
                            value={values.name.clone()}
                            on_change={form.on_text(|v, s| v.name = s)}
                        />
                        <TextField
                            label="Trigger phrase"
                            required={true}
                            value={values.trigger_string.clone()}
                            on_change={form.on_text(|v, s| v.trigger_string = s)}
                        />
                        <TextField
                            label="Description"
                            multiline={true}
                            value={values.description.clone()}
                            on_change={form.on_text(|v, s| v.description = s)}
                        />
                        <div class="grid grid-cols-2 gap-3 mb-4">
                            <div>
                                <label class="block text-sm font-medium text-gray-300 mb-1">{"Contact group"}</label>
                                <select
                                    class="w-full px-3 py-2 bg-gray-700 border border-gray-600 rounded-md text-white"
                                    onchange={form.on_text(|v, s| v.group_id = Uuid::parse_str(&s).ok())}
                                >
                                    <option value="" selected={values.group_id.is_none()}>{"No group"}</option>
                                    {for group_options.iter().map(|(id, name)| html! {
                                        <option
                                            value={id.clone()}
                                            selected={values.group_id.map(|g| g.to_string()).as_deref() == Some(id.as_str())}
                                        >
                                            {name.clone()}
                                        </option>
                                    })}
                                </select>
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-gray-300 mb-1">{"Priority"}</label>
                                <select
                                    class="w-full px-3 py-2 bg-gray-700 border border-gray-600 rounded-md text-white"
                                    onchange={form.on_text(|v, s| v.priority = s.parse().unwrap_or(1))}
                                >
                                    {for (1..=5u8).map(|priority| html! {
                                        <option value={priority.to_string()} selected={priority == values.priority}>
                                            {priority}
                                        </option>
                                    })}
                                </select>
                            </div>
                        </div>
                        <TextField
                            label="Custom call message"
                            multiline={true}
                            value={values.custom_message.clone()}
                            on_change={form.on_text(|v, s| v.custom_message = s)}
                        />
                        <CheckboxField
                            label="Active"
                            checked={values.is_active}
                            on_change={form.on_check(|v, checked| v.is_active = checked)}
                        />
                        <FormActions saving={form.state().is_saving()} {editing} on_cancel={form.on_close()} />
                    </form>
                </Modal>
            }
        </div>
    }
}
