// Modal views over the scoped collection endpoints
use callwatch_shared::format::{format_date_time, format_duration};
use callwatch_shared::{CallLog, Contact, ResourceApi, Scope};
use yew::prelude::*;
use yew_hooks::prelude::*;

use super::auth::use_auth;
use super::list::use_api;
use super::modal::Modal;
use super::stat_card::StatusBadge;
use crate::services::Resource;

fn call_tone(status: &str) -> &'static str {
    match status {
        "completed" => "green",
        "failed" => "red",
        "busy" | "no-answer" => "yellow",
        "in-progress" => "blue",
        _ => "gray",
    }
}

/// Badge for a raw call status string.
pub fn call_status_badge(log: &CallLog) -> Html {
    html! {
        <StatusBadge label={log.status_label().to_string()} tone={call_tone(&log.status)} />
    }
}

#[derive(Properties, PartialEq)]
pub struct CallHistoryProps {
    pub title: AttrValue,
    pub scope: Scope<CallLog>,
    pub on_close: Callback<()>,
}

/// Calls placed for one contact or one email event.
#[function_component(CallHistory)]
pub fn call_history(props: &CallHistoryProps) -> Html {
    let resource = Resource::<CallLog>::new(use_api());
    let auth = use_auth();
    let calls = {
        let scope = props.scope.clone();
        use_async_with_options(
            async move {
                let result = resource.list_scoped(&scope).await;
                if let (Err(error), Some(auth)) = (&result, &auth) {
                    tracing::error!(code = %error.code(), "could not load calls: {}", error);
                    auth.expire_on(error);
                }
                result
            },
            UseAsyncOptions::enable_auto(),
        )
    };

    let body = if calls.loading || (calls.data.is_none() && calls.error.is_none()) {
        html! { <p class="text-gray-400">{"Loading..."}</p> }
    } else if calls.error.is_some() {
        html! { <p class="text-red-300">{"Could not load calls."}</p> }
    } else {
        let logs = calls.data.clone().unwrap_or_default();
        if logs.is_empty() {
            html! { <p class="text-gray-400">{"No calls recorded."}</p> }
        } else {
            html! {
                <table class="w-full text-sm">
                    <thead class="text-gray-400 text-left">
                        <tr>
                            <th class="py-2">{"When"}</th>
                            <th class="py-2">{"Phone"}</th>
                            <th class="py-2">{"Status"}</th>
                            <th class="py-2">{"Duration"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-700">
                        {for logs.iter().map(|log| html! {
                            <tr key={log.id.to_string()}>
                                <td class="py-2">{format_date_time(&log.created_at)}</td>
                                <td class="py-2">{log.phone_number.clone()}</td>
                                <td class="py-2">{call_status_badge(log)}</td>
                                <td class="py-2">{format_duration(log.duration.unwrap_or(0))}</td>
                            </tr>
                        })}
                    </tbody>
                </table>
            }
        }
    };

    html! {
        <Modal title={props.title.clone()} on_close={props.on_close.clone()}>
            {body}
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
pub struct GroupMembersProps {
    pub title: AttrValue,
    pub scope: Scope<Contact>,
    pub on_close: Callback<()>,
}

#[function_component(GroupMembers)]
pub fn group_members(props: &GroupMembersProps) -> Html {
    let resource = Resource::<Contact>::new(use_api());
    let auth = use_auth();
    let members = {
        let scope = props.scope.clone();
        use_async_with_options(
            async move {
                let result = resource.list_scoped(&scope).await;
                if let (Err(error), Some(auth)) = (&result, &auth) {
                    tracing::error!(code = %error.code(), "could not load group members: {}", error);
                    auth.expire_on(error);
                }
                result
            },
            UseAsyncOptions::enable_auto(),
        )
    };

    let body = if members.loading || (members.data.is_none() && members.error.is_none()) {
        html! { <p class="text-gray-400">{"Loading..."}</p> }
    } else if members.error.is_some() {
        html! { <p class="text-red-300">{"Could not load members."}</p> }
    } else {
        let contacts = members.data.clone().unwrap_or_default();
        if contacts.is_empty() {
            html! { <p class="text-gray-400">{"This group has no contacts."}</p> }
        } else {
            html! {
                <ul class="divide-y divide-gray-700">
                    {for contacts.iter().map(|contact| html! {
                        <li key={contact.id.to_string()} class="py-2 flex justify-between">
                            <span>{contact.name.clone()}</span>
                            <span class="text-gray-400">{contact.phone_number.clone()}</span>
                        </li>
                    })}
                </ul>
            }
        }
    };

    html! {
        <Modal title={props.title.clone()} on_close={props.on_close.clone()}>
            {body}
        </Modal>
    }
}
