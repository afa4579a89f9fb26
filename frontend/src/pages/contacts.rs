use callwatch_shared::filter::keys;
use callwatch_shared::forms::ContactForm;
use callwatch_shared::{CallLog, Contact, ContactGroup, Scope, group_name};
use yew::prelude::*;

use crate::components::*;
use crate::services::Resource;

fn priority_options() -> Vec<(String, String)> {
    (1..=5u8)
        .map(|priority| (priority.to_string(), format!("Priority {}", priority)))
        .collect()
}

#[function_component(ContactsPage)]
pub fn contacts_page() -> Html {
    let client = use_api();
    let resource = Resource::<Contact>::new(client.clone());
    let list = use_resource_list(resource.clone());
    let form = use_entity_form::<ContactForm>(resource, list.clone());
    let groups = use_lookup(Resource::<ContactGroup>::new(client));
    let calls_for = use_state(|| None::<Contact>);

    let contacts = list.filtered();
    let filters = list.filters();
    let group_options: Vec<(String, String)> = groups
        .iter()
        .map(|group| (group.id.to_string(), group.name.clone()))
        .collect();

    let show_calls = |contact: &Contact| {
        let calls_for = calls_for.clone();
        let contact = contact.clone();
        Callback::from(move |_: MouseEvent| calls_for.set(Some(contact.clone())))
    };
    let close_calls = {
        let calls_for = calls_for.clone();
        Callback::from(move |_| calls_for.set(None))
    };

    let table = match list.empty_state() {
        Some(state) => html! {
            <EmptyStateView
                {state}
                noun="contacts"
                on_create={Some(form.on_create())}
                on_clear_filters={list.on_clear_filters()}
            />
        },
        None => html! {
            <table class="w-full text-sm">
                <thead class="bg-gray-700/50 text-gray-400 text-left">
                    <tr>
                        <th class="px-4 py-3">{"Name"}</th>
                        <th class="px-4 py-3">{"Phone"}</th>
                        <th class="px-4 py-3">{"Role"}</th>
                        <th class="px-4 py-3">{"Groups"}</th>
                        <th class="px-4 py-3">{"Priority"}</th>
                        <th class="px-4 py-3">{"Status"}</th>
                        <th class="px-4 py-3 text-right">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-700 text-gray-200">
                    {for contacts.iter().map(|contact| {
                        let (status, tone) = if contact.active() { ("Active", "green") } else { ("Inactive", "gray") };
                        let role = match (&contact.role, &contact.department) {
                            (Some(role), Some(department)) => format!("{} · {}", role, department),
                            (Some(role), None) => role.clone(),
                            (None, Some(department)) => department.clone(),
                            (None, None) => String::new(),
                        };
                        html! {
                            <tr key={contact.id.to_string()} class="hover:bg-gray-700/30">
                                <td class="px-4 py-3 font-medium text-white">{contact.name.clone()}</td>
                                <td class="px-4 py-3">{contact.phone_number.clone()}</td>
                                <td class="px-4 py-3 text-gray-400">{role}</td>
                                <td class="px-4 py-3 space-x-1">
                                    {for contact.group_ids.iter().map(|id| html! {
                                        <StatusBadge label={group_name(&groups, id)} tone="blue" />
                                    })}
                                </td>
                                <td class="px-4 py-3">{contact.priority_or_default()}</td>
                                <td class="px-4 py-3"><StatusBadge label={status} {tone} /></td>
                                <td class="px-4 py-3 text-right space-x-3">
                                    <button onclick={show_calls(contact)} class="text-gray-300 hover:text-white">{"Calls"}</button>
                                    <button onclick={form.on_edit(contact.clone())} class="text-blue-400 hover:text-blue-300">{"Edit"}</button>
                                    <button onclick={form.on_delete(contact, &contact.name)} class="text-red-400 hover:text-red-300">{"Delete"}</button>
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
                title="Contacts"
                subtitle="People called when an email matches a trigger"
                on_create={Some(form.on_create())}
                create_label="New Contact"
            />

            <div class="flex flex-wrap gap-3 mb-4">
                <SearchInput
                    value={filters.value(keys::SEARCH).to_string()}
                    placeholder="Search name, phone, role or department..."
                    on_change={list.on_filter(keys::SEARCH, false)}
                />
                <SelectFilter
                    value={filters.value(keys::GROUP).to_string()}
                    all_label="All groups"
                    options={group_options}
                    on_change={list.on_filter(keys::GROUP, true)}
                />
                <SelectFilter
                    value={filters.value(keys::STATUS).to_string()}
                    all_label="All statuses"
                    options={status_options()}
                    on_change={list.on_filter(keys::STATUS, true)}
                />
                <SelectFilter
                    value={filters.value(keys::PRIORITY).to_string()}
                    all_label="All priorities"
                    options={priority_options()}
                    on_change={list.on_filter(keys::PRIORITY, true)}
                />
            </div>

            <LoadNotice loading={list.is_loading()} failed={list.load_failed()} noun="contacts" />

            <div class="bg-gray-800 rounded-lg border border-gray-700 overflow-hidden">
                {table}
                <Pagination meta={list.meta()} on_page={list.on_page()} on_page_size={list.on_page_size()} />
            </div>

            if form.state().is_open() {
                <Modal
                    title={if editing { "Edit Contact" } else { "New Contact" }}
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
                            label="Phone number"
                            required={true}
                            input_type="tel"
                            value={values.phone_number.clone()}
                            on_change={form.on_text(|v, s| v.phone_number = s)}
                        />
                        <div class="grid grid-cols-2 gap-3">
                            <TextField
                                label="Role"
                                value={values.role.clone()}
                                on_change={form.on_text(|v, s| v.role = s)}
                            />
                            <TextField
                                label="Department"
                                value={values.department.clone()}
                                on_change={form.on_text(|v, s| v.department = s)}
                            />
                        </div>
                        <div class="mb-4">
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
                        <div class="mb-4">
                            <span class="block text-sm font-medium text-gray-300 mb-1">
                                {"Groups"}<span class="text-red-400">{" *"}</span>
                            </span>
                            if groups.is_empty() {
                                <p class="text-sm text-gray-400">{"Create a contact group first."}</p>
                            }
                            {for groups.iter().map(|group| {
                                let id = group.id;
                                let on_toggle = {
                                    let form = form.clone();
                                    Callback::from(move |_: Event| form.apply(|v| v.toggle_group(id)))
                                };
                                html! {
                                    <label key={id.to_string()} class="flex items-center space-x-2 text-sm text-gray-300">
                                        <input
                                            type="checkbox"
                                            checked={values.group_ids.contains(&id)}
                                            onchange={on_toggle}
                                        />
                                        <span>{group.name.clone()}</span>
                                    </label>
                                }
                            })}
                        </div>
                        <CheckboxField
                            label="Active"
                            checked={values.is_active}
                            on_change={form.on_check(|v, checked| v.is_active = checked)}
                        />
                        <FormActions saving={form.state().is_saving()} {editing} on_cancel={form.on_close()} />
                    </form>
                </Modal>
            }

            if let Some(contact) = (*calls_for).clone() {
                <CallHistory
                    key={contact.id.to_string()}
                    title={format!("Calls to {}", contact.name)}
                    scope={Scope::<CallLog>::by_contact(&contact.id)}
                    on_close={close_calls}
                />
            }
        </div>
    }
}
