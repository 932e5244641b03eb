//! Result count and pagination.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdArrowBack, MdArrowForward}};

use crate::pages::search_page::SearchContext;

#[component]
pub fn SearchResultListControls() -> Element {
    rsx! {
        div {
            id: "x-search-results-title-row",
            style: "
                display: flex;
                flex-direction: row;
                gap: 6px;
                padding: 7px;
                margin: 1px;
                height: 56px;
                width: 100%;
            ",
            h1 {
                style: "font-size: 20px; font-weight: 300; color:rgb(75, 87, 112);  border-bottom: 1px solid rgb(75, 87, 112);",
                SearchHitCountString {}
            }
            // empty space
            div {
                style: "
                flex-grow: 1;"
            }
            ControlNextPrevPage {}
        }
    }
}

#[component]
fn ControlNextPrevPage() -> Element {
    let ctx = use_context::<SearchContext>();
    let state = ctx.state;
    let max_pages = use_memo(move || state.read().total_pages());
    let selected_page = use_memo(move || state.read().current_page.min(max_pages()).max(1));
    let can_go_to_previous_page = use_memo(move || selected_page() > 1);
    let can_go_to_next_page = use_memo(move || selected_page() < max_pages());
    let is_searching = use_memo(move || state.read().is_searching);

    let prev_ctx = ctx.clone();
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                justify-content: center;
                gap: 16px;
            ",
            NavigationButton {
                icon: MdArrowBack,
                label: "Página anterior",
                disabled: !can_go_to_previous_page() || is_searching(),
                onclick: move |_| prev_ctx.go_to_page(selected_page() - 1),
            }
            div {
                style: "
                    font-size: 16px;
                    line-height: 21px;
                    font-weight: 400;
                    background-color: white;
                    border-radius: 2px;
                    border-left: 1px solid rgba(0,0,0,0.1);
                    border-right: 1px solid rgba(0,0,0,0.1);
                    padding: 4px 26px;
                    margin-left: -28px;
                    margin-right: -28px;
                    align-items: center;
                    align-content: center;
                ",
                "{selected_page()}"
                span {
                    style: "color: rgba(0,0,0,0.5);",
                    "/{max_pages()}"
                }
            }
            NavigationButton {
                icon: MdArrowForward,
                label: "Próxima página",
                disabled: !can_go_to_next_page() || is_searching(),
                onclick: move |_| ctx.go_to_page(selected_page() + 1),
            }
        }
    }
}

#[component]
pub fn NavigationButton<I: dioxus_free_icons::IconShape + Clone + PartialEq + 'static>(icon: I, label: String, disabled: ReadSignal<bool>, onclick: Callback<()>) -> Element {
    let btn_color = use_memo(move || if *disabled.read() { "rgba(0,0,0,0.3)" } else { "rgba(0,0,0,1)" });
    let btn_cursor = use_memo(move || if *disabled.read() { "not-allowed" } else { "pointer" });
    rsx! {
        button {
            disabled: *disabled.read(),
            title: "{label}",
            style: "
                width: 32px;
                height: 32px;
                background: white;
                border-radius: 8px;
                padding: 4px;
                box-shadow: 0 2px 4px 0 rgba(0, 0, 0, 0.16);
                cursor: {btn_cursor};
            ",
            onclick: move |_| {
                if !*disabled.read() {
                    onclick(());
                }
            },
            Icon { icon: icon, style: "width: 26px; height: 26px; color: {btn_color};" }
        }
    }
}

#[component]
fn SearchHitCountString() -> Element {
    let ctx = use_context::<SearchContext>();
    let state = ctx.state.read();
    let total = state.total_documents;
    match total {
        0 => rsx! { "Nenhum documento encontrado" },
        1 => rsx! { "1 documento encontrado" },
        n => rsx! { "{n} documentos encontrados" },
    }
}
