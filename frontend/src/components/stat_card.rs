use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: u64,
    pub icon: &'static str,
    pub color: &'static str,
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let (bg_color, text_color) = match props.color {
        "blue" => ("bg-blue-600", "text-blue-400"),
        "green" => ("bg-green-600", "text-green-400"),
        "yellow" => ("bg-yellow-600", "text-yellow-400"),
        "red" => ("bg-red-600", "text-red-400"),
        _ => ("bg-gray-600", "text-gray-400"),
    };

    let icon = match props.icon {
        "bolt" => html! {
            <svg class="w-6 h-6" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 10V3L4 14h7v7l9-11h-7z"/>
            </svg>
        },
        "user" => html! {
            <svg class="w-6 h-6" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z"/>
            </svg>
        },
        "users" => html! {
            <svg class="w-6 h-6" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4.354a4 4 0 110 5.292M15 21H3v-1a6 6 0 0112 0v1zm0 0h6v-1a6 6 0 00-9-5.197M13 7a4 4 0 11-8 0 4 4 0 018 0z"/>
            </svg>
        },
        "phone" => html! {
            <svg class="w-6 h-6" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M3 5a2 2 0 012-2h3.28a1 1 0 01.948.684l1.498 4.493a1 1 0 01-.502 1.21l-2.257 1.13a11.042 11.042 0 005.516 5.516l1.13-2.257a1 1 0 011.21-.502l4.493 1.498a1 1 0 01.684.949V19a2 2 0 01-2 2h-1C9.716 21 3 14.284 3 6V5z"/>
            </svg>
        },
        _ => html! { <span class="w-6 h-6"></span> },
    };

    html! {
        <div class="bg-gray-800 rounded-lg border border-gray-700 p-4">
            <div class={format!("p-2 rounded-lg inline-block {}", bg_color)}>
                <div class="text-white">
                    {icon}
                </div>
            </div>
            <div class="mt-3">
                if props.loading {
                    <div class="h-8 w-16 bg-gray-700 rounded animate-pulse"></div>
                } else {
                    <p class="text-2xl font-bold text-white">{props.value}</p>
                }
                <p class={format!("text-sm {}", text_color)}>{props.title.clone()}</p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub label: AttrValue,
    pub tone: &'static str,
}

/// Small coloured pill for statuses and levels.
#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let classes = match props.tone {
        "green" => "bg-green-900/50 text-green-300",
        "red" => "bg-red-900/50 text-red-300",
        "yellow" => "bg-yellow-900/50 text-yellow-300",
        "blue" => "bg-blue-900/50 text-blue-300",
        "orange" => "bg-orange-900/50 text-orange-300",
        _ => "bg-gray-700 text-gray-300",
    };
    html! {
        <span class={format!("px-2 py-0.5 rounded-full text-xs font-medium {}", classes)}>
            {props.label.clone()}
        </span>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub state: callwatch_shared::EmptyState,
    pub noun: &'static str,
    #[prop_or_default]
    pub on_create: Option<Callback<MouseEvent>>,
    pub on_clear_filters: Callback<MouseEvent>,
}

/// Placeholder row for an empty table: a create prompt when nothing exists,
/// a clear-filters prompt when filters hide everything.
#[function_component(EmptyStateView)]
pub fn empty_state_view(props: &EmptyStateProps) -> Html {
    use callwatch_shared::EmptyState;

    match props.state {
        EmptyState::NoItems => html! {
            <div class="text-center py-12 text-gray-400">
                <p>{format!("No {} yet.", props.noun)}</p>
                if let Some(on_create) = props.on_create.clone() {
                    <button onclick={on_create} class="mt-3 text-blue-400 hover:text-blue-300">
                        {"Create the first one"}
                    </button>
                }
            </div>
        },
        EmptyState::NoMatches => html! {
            <div class="text-center py-12 text-gray-400">
                <p>{format!("No {} match the current filters.", props.noun)}</p>
                <button onclick={props.on_clear_filters.clone()} class="mt-3 text-blue-400 hover:text-blue-300">
                    {"Clear filters"}
                </button>
            </div>
        },
    }
}
