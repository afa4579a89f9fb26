use callwatch_shared::pagination::{PAGE_SIZE_OPTIONS, PageItem, PageMeta, visible_pages};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub meta: PageMeta,
    pub on_page: Callback<u32>,
    pub on_page_size: Callback<u32>,
}

/// Range summary, page-size selector and page-jump buttons.
#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let meta = props.meta;
    let (from, to) = meta.item_range();

    let on_size_change = {
        let on_page_size = props.on_page_size.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(size) = select.value().parse::<u32>() {
                on_page_size.emit(size);
            }
        })
    };

    let jump = |page: u32| {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| on_page.emit(page))
    };

    html! {
        <div class="flex items-center justify-between px-4 py-3 border-t border-gray-700 text-sm text-gray-300">
            <div class="flex items-center space-x-4">
                <span>{format!("Showing {} - {} of {}", from, to, meta.total)}</span>
                <label class="flex items-center space-x-2">
                    <span>{"Per page"}</span>
                    <select
                        class="bg-gray-700 border border-gray-600 rounded px-2 py-1 text-white"
                        onchange={on_size_change}
                    >
                        {for PAGE_SIZE_OPTIONS.iter().map(|size| html! {
                            <option value={size.to_string()} selected={*size == meta.per_page}>
                                {size}
                            </option>
                        })}
                    </select>
                </label>
            </div>

            if meta.total_pages > 1 {
                <nav class="flex items-center space-x-1">
                    <button
                        class="px-2 py-1 rounded hover:bg-gray-700 disabled:opacity-40"
                        disabled={!meta.has_previous()}
                        onclick={jump(meta.page.saturating_sub(1))}
                    >
                        {"‹"}
                    </button>
                    {for visible_pages(meta.page, meta.total_pages).into_iter().map(|item| match item {
                        PageItem::Page(page) => {
                            let classes = if page == meta.page {
                                "px-3 py-1 rounded bg-blue-600 text-white"
                            } else {
                                "px-3 py-1 rounded hover:bg-gray-700"
                            };
                            html! { <button class={classes} onclick={jump(page)}>{page}</button> }
                        }
                        PageItem::Ellipsis => html! { <span class="px-2 text-gray-500">{"…"}</span> },
                    })}
                    <button
                        class="px-2 py-1 rounded hover:bg-gray-700 disabled:opacity-40"
                        disabled={!meta.has_next()}
                        onclick={jump(meta.page.saturating_add(1))}
                    >
                        {"›"}
                    </button>
                </nav>
            }
        </div>
    }
}
