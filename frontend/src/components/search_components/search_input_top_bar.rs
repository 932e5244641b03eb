use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_action_icons::MdSearch, md_content_icons::{MdFilterList, MdLink}}};

use crate::pages::search_page::SearchContext;


#[component]
pub fn SearchInputTopBar() -> Element {
    let ctx = use_context::<SearchContext>();
    let state = ctx.state;
    let editor_open = use_memo(move || state.read().filter_editor_open);
    let filter_count = use_memo(move || state.read().filter_count().total);
    let search_button_color = use_memo(move || if state.read().is_searching { "#6B7280" } else { "blue" });

    let input_ctx = ctx.clone();
    let search_oninput = move |event: Event<FormData>| {
        input_ctx.engine.set_query(event.value());
        input_ctx.debounced_search();
    };
    let key_ctx = ctx.clone();
    let search_onkeydown = move |event: Event<KeyboardData>| {
        if event.key() == Key::Enter {
            key_ctx.submit_search();
        }
    };
    let button_ctx = ctx.clone();
    let toggle_ctx = ctx.clone();

    rsx! {
        div {
            id: "x-search-input-search-box",
            style: "
                display:flex;
                align-items:center;
                gap: 16px;
                background-color: white;
                border-radius: 9999px;
                padding: 10px 14px;
                height: 44px;
                color: #111827;
                border: 1px solid rgba(101, 101, 101, 0.8);
                width: 500px;
                margin-left: 16px;
            ",

            button {
                style: "
                    border: none;
                    background: none;
                    cursor: pointer;
                ",
                onclick: move |_| button_ctx.submit_search(),
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:{search_button_color()};" }
            }
            input {
                r#type: "text",
                placeholder: "Buscar nos documentos dos processos",
                style: "
                    flex:1;
                    border: none;
                    outline: none;
                    background: transparent;
                    color: #111827;
                    font-size: 20px;
                    font-weight: 400;
                    font-family: Roboto, sans-serif;
                ",
                value: "{state.read().query}",
                oninput: search_oninput,
                onkeydown: search_onkeydown,
            }
        }

        TopBarButton {
            label: if filter_count() > 0 { format!("Filtros ({})", filter_count()) } else { "Filtros".to_string() },
            active: editor_open(),
            onclick: move |_| toggle_ctx.engine.set_filter_editor_open(!editor_open()),
            Icon { icon: MdFilterList, style: "width: 20px; height: 20px;" }
        }

        TopBarButton {
            label: "Copiar link".to_string(),
            active: false,
            onclick: move |_| copy_current_link(),
            Icon { icon: MdLink, style: "width: 20px; height: 20px;" }
        }
    }
}

#[component]
fn TopBarButton(label: String, active: bool, onclick: EventHandler<MouseEvent>, children: Element) -> Element {
    let border_color = if active { "rgba(0,0,255,0.9)" } else { "rgba(0,0,0,0.5)" };
    rsx! {
        button {
            style: "
                cursor: pointer;
                display: flex;
                align-items: center;
                gap: 6px;
                border: 2px solid {border_color};
                border-radius: 1000px;
                background-color: white;
                box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.1);
                padding: 6px 12px;
                font-size: 15px;
                margin-left: 16px;
                white-space: nowrap;
                flex-shrink: 0;
            ",
            onclick: move |e| onclick.call(e),
            {children}
            "{label}"
        }
    }
}

fn copy_current_link() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(url) = window.location().href() else {
        return;
    };
    let _r = window.navigator().clipboard().write_text(&url);
    dioxus::logger::tracing::info!("Link copied to clipboard: {:#?}", url);
}
