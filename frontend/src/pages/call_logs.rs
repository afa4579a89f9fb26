use callwatch_shared::filter::keys;
use callwatch_shared::format::{format_date_time, format_duration};
use callwatch_shared::{CallLog, CallLogRow, CallStatus, Contact, apply_filters};
use yew::prelude::*;

use crate::components::*;
use crate::services::Resource;

fn status_filter_options() -> Vec<(String, String)> {
    CallStatus::ALL
        .iter()
        .map(|status| (status.as_str().to_string(), status.label().to_string()))
        .collect()
}

#[function_component(CallLogsPage)]
pub fn call_logs_page() -> Html {
    let client = use_api();
    let list = use_resource_list(Resource::<CallLog>::new(client.clone()));
    let contacts = use_lookup(Resource::<Contact>::new(client));

    // Contact names only exist in the lookup, so the search filter runs on
    // joined rows rather than on the raw page.
    let rows = apply_filters(&CallLogRow::join(list.items(), &contacts), list.filters());
    let filters = list.filters();

    let table = match list.empty_state_for(rows.len()) {
        Some(state) => html! {
            <EmptyStateView
                {state}
                noun="calls"
                on_clear_filters={list.on_clear_filters()}
            />
        },
        None => html! {
            <table class="w-full text-sm">
                <thead class="bg-gray-700/50 text-gray-400 text-left">
                    <tr>
                        <th class="px-4 py-3">{"When"}</th>
                        <th class="px-4 py-3">{"Contact"}</th>
                        <th class="px-4 py-3">{"Phone"}</th>
                        <th class="px-4 py-3">{"Status"}</th>
                        <th class="px-4 py-3">{"Duration"}</th>
                        <th class="px-4 py-3">{"Attempt"}</th>
                        <th class="px-4 py-3">{"Error"}</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-700 text-gray-200">
                    {for rows.iter().map(|row| {
                        let log = &row.log;
                        html! {
                            <tr key={log.id.to_string()} class="hover:bg-gray-700/30">
                                <td class="px-4 py-3 text-gray-400">{format_date_time(&log.created_at)}</td>
                                <td class="px-4 py-3 font-medium text-white">{row.contact_name.clone()}</td>
                                <td class="px-4 py-3">{log.phone_number.clone()}</td>
                                <td class="px-4 py-3">{call_status_badge(log)}</td>
                                <td class="px-4 py-3">{format_duration(log.duration.unwrap_or(0))}</td>
                                <td class="px-4 py-3">{log.attempt_number.unwrap_or(1)}</td>
                                <td class="px-4 py-3 text-red-300">{log.error_message.clone().unwrap_or_default()}</td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        },
    };

    html! {
        <div class="p-6">
            <ListHeader title="Call Logs" subtitle="Every call placed by the notification service" />

            <div class="flex flex-wrap gap-3 mb-4">
                <SearchInput
                    value={filters.value(keys::SEARCH).to_string()}
                    placeholder="Search contact or phone..."
                    on_change={list.on_filter(keys::SEARCH, false)}
                />
                <SelectFilter
                    value={filters.value(keys::STATUS).to_string()}
                    all_label="All statuses"
                    options={status_filter_options()}
                    on_change={list.on_filter(keys::STATUS, true)}
                />
            </div>

            <LoadNotice loading={list.is_loading()} failed={list.load_failed()} noun="call logs" />

            <div class="bg-gray-800 rounded-lg border border-gray-700 overflow-hidden">
                {table}
                <Pagination meta={list.meta()} on_page={list.on_page()} on_page_size={list.on_page_size()} />
            </div>
        </div>
    }
}
