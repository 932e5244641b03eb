//! Filter editor: one input per catalog entry, grouped by category.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_content_icons::MdAdd};

use common::{
    applied_filter::{AppliedFilter, DateRange, FilterValue, NumberRange},
    filter_catalog::{self, FilterDefinition, FilterValueType},
};
use crate::pages::search_page::SearchContext;


#[component]
pub fn FilterEditor() -> Element {
    let ctx = use_context::<SearchContext>();
    let mut expanded_group = use_signal(|| 0_usize);
    let visible_filters = filter_catalog::groups()
        .get(expanded_group())
        .map(filter_catalog::filters_in_group)
        .unwrap_or_default();

    rsx! {
        div {
            id: "x-filter-editor",
            style: "
                background: white;
                border: 1px solid rgba(0,0,0,0.2);
                border-radius: 10px;
                padding: 10px;
                margin-bottom: 16px;
                box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.1);
            ",
            div {
                style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 8px; margin-bottom: 10px;",
                for (i, group) in filter_catalog::groups().iter().enumerate() {
                    button {
                        key: "{group.key}",
                        style: if expanded_group() == i {
                            "border: 2px solid rgba(0,0,255,0.9); border-radius: 1000px; background: white; padding: 4px 10px; cursor: pointer;"
                        } else {
                            "border: 1px solid rgba(0,0,0,0.5); border-radius: 1000px; background: white; padding: 4px 10px; cursor: pointer;"
                        },
                        onclick: move |_| expanded_group.set(i),
                        "{group.label}"
                    }
                }
            }
            for definition in visible_filters {
                FilterInputRow { key: "{definition.id}", filter_id: definition.id.to_string() }
            }
            div {
                style: "display: flex; flex-direction: row; justify-content: flex-end; gap: 8px; margin-top: 10px;",
                button {
                    style: "padding: 6px 14px; cursor: pointer;",
                    onclick: {
                        let ctx = ctx.clone();
                        move |_| ctx.engine.set_filter_editor_open(false)
                    },
                    "Fechar"
                }
                button {
                    style: "padding: 6px 14px; cursor: pointer; background: rgb(28, 33, 45); color: white; border-radius: 4px;",
                    onclick: move |_| ctx.submit_search(),
                    "Buscar"
                }
            }
        }
    }
}

/// Label, helper text and the type-specific input for one filter.
#[component]
fn FilterInputRow(filter_id: String) -> Element {
    let Some(definition) = filter_catalog::lookup(&filter_id) else {
        return rsx! {};
    };
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px; padding: 6px 0; border-bottom: 1px solid rgba(0,0,0,0.05);",
            label { style: "font-size: 15px; font-weight: 500;", "{definition.label}" }
            {match definition.value_type {
                FilterValueType::Text => rsx! { TextFilterInput { filter_id } },
                FilterValueType::MultiSelectText => rsx! { ListFilterInput { filter_id } },
                FilterValueType::DateRange => rsx! { DateRangeFilterInput { filter_id } },
                FilterValueType::NumberRange => rsx! { NumberRangeFilterInput { filter_id } },
            }}
            if let Some(helper) = definition.helper_text {
                span { style: "font-size: 12px; color: rgba(0,0,0,0.5);", "{helper}" }
            }
        }
    }
}

fn definition_of(filter_id: &str) -> Option<&'static FilterDefinition> {
    filter_catalog::lookup(filter_id)
}

/// Adds through the orchestrator, which refuses incomplete values.
fn apply(ctx: &SearchContext, filter_id: &str, value: FilterValue) -> bool {
    let Some(definition) = definition_of(filter_id) else {
        return false;
    };
    match AppliedFilter::from_definition(definition, value) {
        Ok(filter) => ctx.engine.add_filter(filter),
        Err(e) => {
            dioxus::logger::tracing::warn!("cannot build filter: {e}");
            false
        }
    }
}

#[component]
fn TextFilterInput(filter_id: String) -> Element {
    let ctx = use_context::<SearchContext>();
    let mut text = use_signal(String::new);
    let placeholder = definition_of(&filter_id).and_then(|d| d.placeholder).unwrap_or_default();

    let submit = use_callback(move |_: ()| {
        if apply(&ctx, &filter_id, FilterValue::Text(text.peek().trim().to_string())) {
            text.set(String::new());
        }
    });

    rsx! {
        div {
            style: "display: flex; flex-direction: row; gap: 6px;",
            input {
                r#type: "text",
                style: "flex: 1; padding: 4px;",
                placeholder,
                value: "{text}",
                oninput: move |e| text.set(e.value()),
                onkeydown: move |e| {
                    if e.key() == Key::Enter {
                        submit(());
                    }
                },
            }
            AddButton { onclick: submit }
        }
    }
}

#[component]
fn ListFilterInput(filter_id: String) -> Element {
    let ctx = use_context::<SearchContext>();
    let mut draft = use_signal(String::new);
    let mut items = use_signal(Vec::<String>::new);
    let placeholder = definition_of(&filter_id).and_then(|d| d.placeholder).unwrap_or_default();

    let mut push_item = move |_: ()| {
        let item = draft.peek().trim().to_string();
        if !item.is_empty() && !items.peek().contains(&item) {
            items.write().push(item);
        }
        draft.set(String::new());
    };
    // a typed but not yet pushed item counts too
    let submit = use_callback(move |_: ()| {
        let mut values = items.peek().clone();
        let pending = draft.peek().trim().to_string();
        if !pending.is_empty() && !values.contains(&pending) {
            values.push(pending);
        }
        if apply(&ctx, &filter_id, FilterValue::List(values)) {
            items.set(Vec::new());
            draft.set(String::new());
        }
    });

    rsx! {
        div {
            style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 6px; align-items: center;",
            for (i, item) in items.read().iter().cloned().enumerate() {
                span {
                    key: "{i}-{item}",
                    style: "background: #ECEEF2; border-radius: 1000px; padding: 2px 8px; cursor: pointer;",
                    onclick: move |_| {
                        items.write().remove(i);
                    },
                    "{item} ×"
                }
            }
            input {
                r#type: "text",
                style: "flex: 1; padding: 4px; min-width: 120px;",
                placeholder,
                value: "{draft}",
                oninput: move |e| draft.set(e.value()),
                onkeydown: move |e| {
                    if e.key() == Key::Enter {
                        push_item(());
                    }
                },
            }
            AddButton { onclick: submit }
        }
    }
}

#[component]
fn DateRangeFilterInput(filter_id: String) -> Element {
    let ctx = use_context::<SearchContext>();
    let mut from = use_signal(String::new);
    let mut to = use_signal(String::new);

    let submit = use_callback(move |_: ()| {
        let range = DateRange::new(from.peek().clone(), to.peek().clone());
        if apply(&ctx, &filter_id, FilterValue::DateRange(range)) {
            from.set(String::new());
            to.set(String::new());
        }
    });

    rsx! {
        div {
            style: "display: flex; flex-direction: row; gap: 6px; align-items: center;",
            input { r#type: "date", value: "{from}", oninput: move |e| from.set(e.value()) }
            span { "até" }
            input { r#type: "date", value: "{to}", oninput: move |e| to.set(e.value()) }
            AddButton { onclick: submit }
        }
    }
}

#[component]
fn NumberRangeFilterInput(filter_id: String) -> Element {
    let ctx = use_context::<SearchContext>();
    let mut from = use_signal(String::new);
    let mut to = use_signal(String::new);

    let submit = use_callback(move |_: ()| {
        let range = NumberRange { from: parse_amount(&from.peek()), to: parse_amount(&to.peek()) };
        if apply(&ctx, &filter_id, FilterValue::NumberRange(range)) {
            from.set(String::new());
            to.set(String::new());
        }
    });

    rsx! {
        div {
            style: "display: flex; flex-direction: row; gap: 6px; align-items: center;",
            input { r#type: "text", inputmode: "decimal", placeholder: "Mínimo", value: "{from}", oninput: move |e| from.set(e.value()) }
            span { "até" }
            input { r#type: "text", inputmode: "decimal", placeholder: "Máximo", value: "{to}", oninput: move |e| to.set(e.value()) }
            AddButton { onclick: submit }
        }
    }
}

/// Accepts `1234.5` as well as `1.234,50`.
/// Reads an amount typed in pt-BR ("1.234,50", "1.234") or plain ("1234.5") notation.
fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replacen(',', ".", 1)
    } else if is_thousands_grouped(raw) {
        raw.replace('.', "")
    } else {
        raw.to_string()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// "1.234" or "-12.345.678": a 1-3 digit head followed by dot-separated groups of three.
fn is_thousands_grouped(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let mut groups = digits.split('.');
    let head_ok = groups
        .next()
        .is_some_and(|head| (1..=3).contains(&head.len()) && !head.starts_with('0') && head.bytes().all(|b| b.is_ascii_digit()));
    let mut rest = groups.peekable();
    head_ok && rest.peek().is_some() && rest.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}

#[component]
fn AddButton(onclick: Callback<()>) -> Element {
    rsx! {
        button {
            style: "border: none; background: none; cursor: pointer;",
            title: "Adicionar filtro",
            onclick: move |_| onclick(()),
            Icon { icon: MdAdd, style: "width: 22px; height: 22px; color: rgb(28, 33, 45);" }
        }
    }
}
