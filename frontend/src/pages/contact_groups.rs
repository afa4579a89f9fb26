// Contact groups: who gets called, and how urgently
use callwatch_shared::filter::keys;
use callwatch_shared::format::format_date;
use callwatch_shared::forms::ContactGroupForm;
use callwatch_shared::{Contact, ContactGroup, EmergencyLevel, Scope};
use yew::prelude::*;

use crate::components::*;
use crate::services::Resource;

pub fn level_tone(level: EmergencyLevel) -> &'static str {
    match level {
        EmergencyLevel::Low => "blue",
        EmergencyLevel::Medium => "yellow",
        EmergencyLevel::High => "orange",
        EmergencyLevel::Critical => "red",
    }
}

fn level_options() -> Vec<(String, String)> {
    EmergencyLevel::ALL
        .iter()
        .map(|level| (level.as_str().to_string(), level.label().to_string()))
        .collect()
}

#[function_component(ContactGroupsPage)]
pub fn contact_groups_page() -> Html {
    let client = use_api();
    let resource = Resource::<ContactGroup>::new(client);
    let list = use_resource_list(resource.clone());
    let form = use_entity_form::<ContactGroupForm>(resource, list.clone());
    let members_of = use_state(|| None::<ContactGroup>);

    let groups = list.filtered();
    let filters = list.filters();

    let show_members = |group: &ContactGroup| {
        let members_of = members_of.clone();
        let group = group.clone();
        Callback::from(move |_: MouseEvent| members_of.set(Some(group.clone())))
    };
    let close_members = {
        let members_of = members_of.clone();
        Callback::from(move |_| members_of.set(None))
    };

    let table = match list.empty_state() {
        Some(state) => html! {
            <EmptyStateView
                {state}
                noun="contact groups"
                on_create={Some(form.on_create())}
                on_clear_filters={list.on_clear_filters()}
            />
        },
        None => html! {
            <table class="w-full text-sm">
                <thead class="bg-gray-700/50 text-gray-400 text-left">
                    <tr>
                        <th class="px-4 py-3">{"Name"}</th>
                        <th class="px-4 py-3">{"Description"}</th>
                        <th class="px-4 py-3">{"Emergency level"}</th>
                        <th class="px-4 py-3">{"Status"}</th>
                        <th class="px-4 py-3">{"Created"}</th>
                        <th class="px-4 py-3 text-right">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-700 text-gray-200">
                    {for groups.iter().map(|group| {
                        let level = group.level();
                        let (status, tone) = if group.active() { ("Active", "green") } else { ("Inactive", "gray") };
                        html! {
                            <tr key={group.id.to_string()} class="hover:bg-gray-700/30">
                                <td class="px-4 py-3 font-medium text-white">{group.name.clone()}</td>
                                <td class="px-4 py-3 text-gray-400">{group.description.clone().unwrap_or_default()}</td>
                                <td class="px-4 py-3"><StatusBadge label={level.label()} tone={level_tone(level)} /></td>
                                <td class="px-4 py-3"><StatusBadge label={status} {tone} /></td>
                                <td class="px-4 py-3 text-gray-400">{format_date(&group.created_at)}</td>
                                <td class="px-4 py-3 text-right space-x-3">
                                    <button onclick={show_members(group)} class="text-gray-300 hover:text-white">{"Members"}</button>
                                    <button onclick={form.on_edit(group.clone())} class="text-blue-400 hover:text-blue-300">{"Edit"}</button>
                                    <button onclick={form.on_delete(group, &group.name)} class="text-red-400 hover:text-red-300">{"Delete"}</button>
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
                title="Contact Groups"
                subtitle="Groups of contacts called together when a trigger fires"
                on_create={Some(form.on_create())}
                create_label="New Group"
            />

            <div class="flex flex-wrap gap-3 mb-4">
                <SearchInput
                    value={filters.value(keys::SEARCH).to_string()}
                    placeholder="Search name or description..."
                    on_change={list.on_filter(keys::SEARCH, false)}
                />
                <SelectFilter
                    value={filters.value(keys::STATUS).to_string()}
                    all_label="All statuses"
                    options={status_options()}
                    on_change={list.on_filter(keys::STATUS, true)}
                />
                <SelectFilter
                    value={filters.value(keys::LEVEL).to_string()}
                    all_label="All levels"
                    options={level_options()}
                    on_change={list.on_filter(keys::LEVEL, true)}
                />
            </div>

            <LoadNotice loading={list.is_loading()} failed={list.load_failed()} noun="contact groups" />

            <div class="bg-gray-800 rounded-lg border border-gray-700 overflow-hidden">
                {table}
                <Pagination meta={list.meta()} on_page={list.on_page()} on_page_size={list.on_page_size()} />
            </div>

            if form.state().is_open() {
                <Modal
                    title={if editing { "Edit Contact Group" } else { "New Contact Group" }}
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
                            label="Description"
                            multiline={true}
                            value={values.description.clone()}
                            on_change={form.on_text(|v, s| v.description = s)}
                        />
                        <div class="mb-4">
                            <label class="block text-sm font-medium text-gray-300 mb-1">{"Emergency level"}</label>
                            <select
                                class="w-full px-3 py-2 bg-gray-700 border border-gray-600 rounded-md text-white"
                                onchange={form.on_text(|v, s| v.emergency_level = EmergencyLevel::parse(&s).unwrap_or_default())}
                            >
                                {for EmergencyLevel::ALL.iter().map(|level| html! {
                                    <option value={level.as_str()} selected={*level == values.emergency_level}>
                                        {level.label()}
                                    </option>
                                })}
                            </select>
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

            if let Some(group) = (*members_of).clone() {
                <GroupMembers
                    key={group.id.to_string()}
                    title={format!("Members of {}", group.name)}
                    scope={Scope::<Contact>::by_group(&group.id)}
                    on_close={close_members}
                />
            }
        </div>
    }
}
