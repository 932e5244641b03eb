use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdClose};

use common::applied_filter::AppliedFilter;
use crate::pages::search_page::SearchContext;


/// Chips for the applied filters. Removing one searches again right away.
#[component]
pub fn SelectedFilters() -> Element {
    let ctx = use_context::<SearchContext>();
    let state = ctx.state;
    let filters = use_memo(move || state.read().applied_filters.clone());
    if filters.read().is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            id: "x-selected-filters",
            style: "
                display: flex;
                flex-direction: row;
                flex-wrap: wrap;
                align-items: center;
                gap: 8px;
                margin-bottom: 12px;
            ",
            for (i, filter) in filters.read().iter().cloned().enumerate() {
                FilterChip { key: "{i}-{filter.id}", filter }
            }
            button {
                style: "border: none; background: none; color: blue; cursor: pointer; font-size: 14px;",
                onclick: move |_| {
                    ctx.engine.clear_filters();
                    ctx.submit_search();
                },
                "Limpar filtros"
            }
        }
    }
}

#[component]
fn FilterChip(filter: AppliedFilter) -> Element {
    let ctx = use_context::<SearchContext>();
    let text = filter.display_text();
    let label = filter.label.clone();

    rsx! {
        div {
            style: "
                display: flex;
                align-items: center;
                gap: 6px;
                border: 1px solid rgba(0,0,255,0.9);
                border-radius: 1000px;
                background-color: white;
                padding: 2px 4px 2px 10px;
                font-size: 14px;
                max-width: 400px;
            ",
            span { style: "font-weight: 500; white-space: nowrap;", "{label}:" }
            span {
                style: "overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                title: "{text}",
                "{text}"
            }
            button {
                style: "border: none; background: none; cursor: pointer; display: flex;",
                title: "Remover filtro",
                onclick: move |_| {
                    ctx.engine.remove_filter(&filter.id, Some(&filter.value));
                    ctx.submit_search();
                },
                Icon { icon: MdClose, style: "width: 16px; height: 16px;" }
            }
        }
    }
}
