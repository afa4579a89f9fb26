use callwatch_shared::filter::keys;
use callwatch_shared::format::{format_date_time, truncate};
use callwatch_shared::{CallLog, EmailEvent, EmailStatus, Scope, matched_triggers};
use yew::prelude::*;

use crate::components::*;
use crate::services::Resource;

const SUBJECT_PREVIEW_CHARS: usize = 60;

fn email_tone(event: &EmailEvent) -> &'static str {
    match event.status.as_deref().and_then(EmailStatus::parse) {
        Some(EmailStatus::Completed) => "green",
        Some(EmailStatus::Processed) => "blue",
        Some(EmailStatus::Failed) => "red",
        Some(EmailStatus::Pending) | None => "yellow",
    }
}

#[function_component(EmailEventsPage)]
pub fn email_events_page() -> Html {
    let client = use_api();
    let list = use_resource_list(Resource::<EmailEvent>::new(client));
    let calls_for = use_state(|| None::<EmailEvent>);

    let events = list.filtered();
    let filters = list.filters();
    let status_options: Vec<(String, String)> = EmailStatus::ALL
        .iter()
        .map(|status| (status.as_str().to_string(), status.label().to_string()))
        .collect();
    let trigger_options: Vec<(String, String)> = matched_triggers(list.items())
        .into_iter()
        .map(|trigger| (trigger.clone(), trigger))
        .collect();

    let show_calls = |event: &EmailEvent| {
        let calls_for = calls_for.clone();
        let event = event.clone();
        Callback::from(move |_: MouseEvent| calls_for.set(Some(event.clone())))
    };
    let close_calls = {
        let calls_for = calls_for.clone();
        Callback::from(move |_| calls_for.set(None))
    };

    let table = match list.empty_state() {
        Some(state) => html! {
            <EmptyStateView
                {state}
                noun="email events"
                on_clear_filters={list.on_clear_filters()}
            />
        },
        None => html! {
            <table class="w-full text-sm">
                <thead class="bg-gray-700/50 text-gray-400 text-left">
                    <tr>
                        <th class="px-4 py-3">{"Received"}</th>
                        <th class="px-4 py-3">{"From"}</th>
                        <th class="px-4 py-3">{"Subject"}</th>
                        <th class="px-4 py-3">{"Trigger"}</th>
                        <th class="px-4 py-3">{"Status"}</th>
                        <th class="px-4 py-3">{"Processed"}</th>
                        <th class="px-4 py-3 text-right">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-700 text-gray-200">
                    {for events.iter().map(|event| html! {
                        <tr key={event.id.to_string()} class="hover:bg-gray-700/30">
                            <td class="px-4 py-3 text-gray-400">{format_date_time(&event.received_at)}</td>
                            <td class="px-4 py-3 font-medium text-white">{event.from_email.clone()}</td>
                            <td class="px-4 py-3" title={event.subject.clone().unwrap_or_default()}>
                                {truncate(event.subject.as_deref().unwrap_or("(no subject)"), SUBJECT_PREVIEW_CHARS)}
                            </td>
                            <td class="px-4 py-3 font-mono text-blue-300">{event.trigger_matched.clone().unwrap_or_default()}</td>
                            <td class="px-4 py-3">
                                <StatusBadge label={event.status_label().to_string()} tone={email_tone(event)} />
                            </td>
                            <td class="px-4 py-3 text-gray-400">
                                {event.processed_at.as_deref().map(format_date_time).unwrap_or_default()}
                            </td>
                            <td class="px-4 py-3 text-right">
                                <button onclick={show_calls(event)} class="text-gray-300 hover:text-white">{"Calls"}</button>
                            </td>
                        </tr>
                    })}
                </tbody>
            </table>
        },
    };

    html! {
        <div class="p-6">
            <ListHeader title="Email Events" subtitle="Incoming emails checked against the trigger phrases" />

            <div class="flex flex-wrap gap-3 mb-4">
                <SearchInput
                    value={filters.value(keys::SEARCH).to_string()}
                    placeholder="Search sender or subject..."
                    on_change={list.on_filter(keys::SEARCH, false)}
                />
                <SelectFilter
                    value={filters.value(keys::STATUS).to_string()}
                    all_label="All statuses"
                    options={status_options}
                    on_change={list.on_filter(keys::STATUS, true)}
                />
                <SelectFilter
                    value={filters.value(keys::TRIGGER).to_string()}
                    all_label="All triggers"
                    options={trigger_options}
                    on_change={list.on_filter(keys::TRIGGER, true)}
                />
            </div>

            <LoadNotice loading={list.is_loading()} failed={list.load_failed()} noun="email events" />

            <div class="bg-gray-800 rounded-lg border border-gray-700 overflow-hidden">
                {table}
                <Pagination meta={list.meta()} on_page={list.on_page()} on_page_size={list.on_page_size()} />
            </div>

            if let Some(event) = (*calls_for).clone() {
                <CallHistory
                    key={event.id.to_string()}
                    title={format!("Calls for email from {}", event.from_email)}
                    scope={Scope::<CallLog>::by_email_event(&event.id)}
                    on_close={close_calls}
                />
            }
        </div>
    }
}
