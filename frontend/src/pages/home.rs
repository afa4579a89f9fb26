use callwatch_shared::{CountKind, SystemCounts};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::*;
use crate::services::stats;

fn card_style(kind: CountKind) -> (&'static str, &'static str) {
    match kind {
        CountKind::ActiveTriggers => ("bolt", "yellow"),
        CountKind::Contacts => ("user", "blue"),
        CountKind::ContactGroups => ("users", "green"),
        CountKind::DailyCalls => ("phone", "red"),
    }
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let client = use_api();
    let auth = use_auth();

    let counts = use_async_with_options(
        async move {
            let result = stats::counts(&client).await;
            if let Err(error) = &result {
                tracing::error!(code = %error.code(), "could not load system counts: {}", error);
                if let Some(auth) = &auth {
                    auth.expire_on(error);
                }
            }
            result
        },
        UseAsyncOptions::enable_auto(),
    );

    let refresh = {
        let counts = counts.clone();
        Callback::from(move |_: MouseEvent| counts.run())
    };

    // Any failed count leaves every card at zero.
    let values: SystemCounts = counts.data.clone().unwrap_or_default();

    html! {
        <div class="p-6">
            <div class="flex items-center justify-between mb-6">
                <div>
                    <h1 class="text-2xl font-bold text-white">{"Overview"}</h1>
                    <p class="text-gray-400">{"Email-triggered call notifications at a glance"}</p>
                </div>
                <button
                    onclick={refresh}
                    disabled={counts.loading}
                    class="px-4 py-2 bg-gray-700 text-white rounded-md hover:bg-gray-600 disabled:opacity-50"
                >
                    {"Refresh"}
                </button>
            </div>

            if counts.error.is_some() {
                <div class="bg-red-900/40 border border-red-700 text-red-200 px-4 py-3 rounded mb-4 text-sm">
                    {"Could not load the system counts."}
                </div>
            }

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                {for CountKind::ALL.iter().map(|kind| {
                    let (icon, color) = card_style(*kind);
                    html! {
                        <StatCard
                            title={kind.label()}
                            value={values.get(*kind)}
                            {icon}
                            {color}
                            loading={counts.loading}
                        />
                    }
                })}
            </div>
        </div>
    }
}
