//! Error panels: one for render failures caught at the app root, one for failed searches.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_alert_icons::MdError};

/// Catches render errors under `children` and replaces them with a panel naming the boundary.
#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                let detail = format!("{err:#?}");
                rsx! {
                    ErrorPanel {
                        title: "Erro inesperado em {boundary_name}",
                        detail,
                        a { href: "/", class: "x-error-action", "Nova busca" }
                    }
                }
            },
            children
        }
    }
}

/// Shown in place of the results when a search fails; `children` hold the recovery action.
#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorPanel {
            title: "Falha na busca",
            detail: error_txt(),
            {children}
        }
    }
}

#[component]
fn ErrorPanel(title: String, detail: String, children: Element) -> Element {
    rsx! {
        section {
            role: "alert",
            style: "
                display: flex;
                flex-direction: column;
                align-items: center;
                gap: 12px;
                margin: 24px auto;
                padding: 16px;
                max-width: 640px;
                background: rgb(253, 240, 240);
                border-left: 4px solid rgb(180, 30, 30);
            ",
            div {
                style: "display: flex; flex-direction: row; align-items: center; gap: 8px; color: rgb(180, 30, 30);",
                Icon { icon: MdError, style: "width: 28px; height: 28px;" }
                h2 { style: "font-size: 22px; font-weight: 500;", "{title}" }
            }
            details {
                style: "width: 100%; font-size: 13px; color: rgba(0,0,0,0.7);",
                open: true,
                summary { "Detalhes" }
                pre { style: "white-space: pre-wrap; max-height: 320px; overflow-y: auto;", "{detail}" }
            }
            {children}
        }
    }
}
