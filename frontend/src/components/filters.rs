use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchInputProps {
    pub value: AttrValue,
    pub placeholder: AttrValue,
    pub on_change: Callback<String>,
}

#[function_component(SearchInput)]
pub fn search_input(props: &SearchInputProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <input
            type="text"
            value={props.value.clone()}
            placeholder={props.placeholder.clone()}
            {oninput}
            class="flex-1 min-w-48 px-3 py-2 bg-gray-700 border border-gray-600 rounded-md text-white focus:outline-none focus:ring-2 focus:ring-blue-500"
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFilterProps {
    pub value: AttrValue,
    /// Label of the empty option, which clears the filter.
    pub all_label: AttrValue,
    /// `(value, label)` pairs.
    pub options: Vec<(String, String)>,
    pub on_change: Callback<String>,
}

#[function_component(SelectFilter)]
pub fn select_filter(props: &SelectFilterProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };

    html! {
        <select
            {onchange}
            class="px-3 py-2 bg-gray-700 border border-gray-600 rounded-md text-white"
        >
            <option value="" selected={props.value.is_empty()}>{props.all_label.clone()}</option>
            {for props.options.iter().map(|(value, label)| html! {
                <option value={value.clone()} selected={props.value.as_str() == value}>
                    {label.clone()}
                </option>
            })}
        </select>
    }
}

/// Options for an active/inactive status filter.
pub fn status_options() -> Vec<(String, String)> {
    vec![
        ("true".to_string(), "Active".to_string()),
        ("false".to_string(), "Inactive".to_string()),
    ]
}

#[derive(Properties, PartialEq)]
pub struct ListHeaderProps {
    pub title: AttrValue,
    pub subtitle: AttrValue,
    #[prop_or_default]
    pub on_create: Option<Callback<MouseEvent>>,
    #[prop_or_default]
    pub create_label: AttrValue,
}

#[function_component(ListHeader)]
pub fn list_header(props: &ListHeaderProps) -> Html {
    html! {
        <div class="flex items-center justify-between mb-6">
            <div>
                <h1 class="text-2xl font-bold text-white">{props.title.clone()}</h1>
                <p class="text-gray-400">{props.subtitle.clone()}</p>
            </div>
            if let Some(on_create) = props.on_create.clone() {
                <button
                    onclick={on_create}
                    class="px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700"
                >
                    {props.create_label.clone()}
                </button>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadNoticeProps {
    pub loading: bool,
    pub failed: bool,
    pub noun: &'static str,
}

/// Loading indicator and load-failure banner above a table.
#[function_component(LoadNotice)]
pub fn load_notice(props: &LoadNoticeProps) -> Html {
    html! {
        <>
            if props.failed {
                <div class="bg-red-900/40 border border-red-700 text-red-200 px-4 py-3 rounded mb-4 text-sm">
                    {format!("Could not load {}. Showing the last loaded page.", props.noun)}
                </div>
            }
            if props.loading {
                <div class="text-sm text-gray-400 mb-2">{"Loading..."}</div>
            }
        </>
    }
}
