use dioxus::prelude::*;

use common::search_result::Document;
use crate::pages::search_page::SearchContext;

/// Columns shown for each document: header and index field.
const COLUMNS: &[(&str, &str)] = &[
    ("Processo", "processo_s"),
    ("Documento", "titulo_s"),
    ("Tipo", "tipo_documento_s"),
    ("Juntada", "dt_juntada_tdt"),
    ("Contribuinte", "nome_contribuinte_s"),
];

#[component]
pub fn SearchResultsTable() -> Element {
    let ctx = use_context::<SearchContext>();
    let state = ctx.state;
    let documents = use_memo(move || state.read().documents.clone());
    let dimmed = if state.read().is_searching { "0.5" } else { "1" };

    rsx! {
        table {
            id: "x-search-results-table",
            style: "width: 100%; border-collapse: collapse; background: white; opacity: {dimmed};",
            thead {
                tr {
                    for (header, _) in COLUMNS {
                        th { style: "text-align: left; padding: 8px; border-bottom: 2px solid rgb(75, 87, 112);", "{header}" }
                    }
                    th { style: "text-align: right; padding: 8px; border-bottom: 2px solid rgb(75, 87, 112);", "Tamanho" }
                }
            }
            tbody {
                for (i, document) in documents.read().iter().cloned().enumerate() {
                    SearchResultRow { key: "{i}-{document.id().unwrap_or_default()}", document }
                }
            }
        }
    }
}

#[component]
fn SearchResultRow(document: Document) -> Element {
    let confidential = document.is_flagged("indicador_sigilo_s");
    let size = document.size_bytes().map(format_size).unwrap_or_default();
    rsx! {
        tr {
            style: "border-bottom: 1px solid rgba(0,0,0,0.08);",
            for (_, field) in COLUMNS {
                td {
                    style: "padding: 6px 8px; font-size: 14px;",
                    "{cell_text(&document, field)}"
                }
            }
            td {
                style: "padding: 6px 8px; font-size: 14px; text-align: right; white-space: nowrap;",
                if confidential {
                    span { style: "color: darkred; margin-right: 6px;", title: "Documento sigiloso", "sigiloso" }
                }
                "{size}"
            }
        }
    }
}

fn cell_text(document: &Document, field: &str) -> String {
    match document.fields.get(field) {
        Some(serde_json::Value::String(s)) if field.ends_with("_tdt") => s.get(..10).unwrap_or(s).to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn format_size(bytes: i64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes.max(0) as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
