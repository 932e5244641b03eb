use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_action_icons::{MdDelete, MdHistory}, md_navigation_icons::MdClose}};

use common::search_state::SearchHistoryEntry;
use crate::pages::search_page::SearchContext;


#[component]
pub fn SearchHistoryList() -> Element {
    let ctx = use_context::<SearchContext>();
    let state = ctx.state;
    let history = use_memo(move || state.read().search_history.clone());
    if history.read().is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            id: "x-search-history",
            style: "padding: 10px; border-top: 1px solid rgba(0,0,0,0.1);",
            div {
                style: "display: flex; flex-direction: row; align-items: center; gap: 6px;",
                Icon { icon: MdHistory, style: "width: 18px; height: 18px; color: rgb(75, 87, 112);" }
                h2 { style: "font-size: 16px; font-weight: 500; color: rgb(75, 87, 112); flex-grow: 1;", "Buscas recentes" }
                button {
                    style: "border: none; background: none; cursor: pointer;",
                    title: "Limpar histórico",
                    onclick: move |_| ctx.engine.clear_history(),
                    Icon { icon: MdDelete, style: "width: 18px; height: 18px;" }
                }
            }
            for (index, entry) in history.read().iter().cloned().enumerate() {
                HistoryItem { key: "{index}-{entry.timestamp}", index, entry }
            }
        }
    }
}

#[component]
fn HistoryItem(index: usize, entry: SearchHistoryEntry) -> Element {
    let ctx = use_context::<SearchContext>();
    let remove_ctx = ctx.clone();
    let query = if entry.query.trim().is_empty() { "(sem termo)".to_string() } else { entry.query.clone() };
    let when = entry.timestamp.format("%d/%m/%Y %H:%M").to_string();
    let filter_count = entry.filters.len();

    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: center; gap: 6px; padding: 4px; cursor: pointer;",
            div {
                style: "flex-grow: 1; min-width: 0;",
                onclick: move |_| {
                    if ctx.engine.apply_history_item(index) {
                        ctx.submit_search();
                    }
                },
                div { style: "overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", "{query}" }
                div {
                    style: "font-size: 12px; color: rgba(0,0,0,0.5);",
                    "{when}"
                    if filter_count > 0 { " · {filter_count} filtro(s)" }
                }
            }
            button {
                style: "border: none; background: none; cursor: pointer;",
                title: "Remover do histórico",
                onclick: move |_| {
                    remove_ctx.engine.remove_history_item(index);
                },
                Icon { icon: MdClose, style: "width: 14px; height: 14px;" }
            }
        }
    }
}
