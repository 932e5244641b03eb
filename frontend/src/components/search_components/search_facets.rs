use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank}};

use common::{
    applied_filter::{AppliedFilter, FilterValue},
    search_result::FacetCount,
};
use crate::pages::search_page::SearchContext;


/// Sidebar with the facet counts of the last search.
#[component]
pub fn SearchFacetsSidebar() -> Element {
    let ctx = use_context::<SearchContext>();
    let state = ctx.state;
    let group_counts = use_memo(move || state.read().group_counts.clone());
    if !state.read().has_searched {
        return rsx! {};
    }

    rsx! {
        div {
            id: "x-search-facets-sidebar",
            style: "padding: 10px;",
            FacetGroup {
                facet_display_name: "Grupo do Processo".to_string(),
                filter_id: "grupo_processo".to_string(),
                counts: group_counts.read().grupo_processo.clone(),
            }
            FacetGroup {
                facet_display_name: "Tipo do Processo".to_string(),
                filter_id: "tipo_processo".to_string(),
                counts: group_counts.read().tipo_processo.clone(),
            }
        }
    }
}

#[component]
fn FacetGroup(facet_display_name: String, filter_id: String, counts: Vec<FacetCount>) -> Element {
    rsx! {
        h2 {
            style: "font-size: 16px; font-weight: 500; color: rgb(75, 87, 112); margin: 10px 4px 4px 4px;",
            "{facet_display_name}"
        }
        if counts.is_empty() {
            div { style: "color: rgba(0,0,0,0.5); padding: 4px;", "Sem valores" }
        }
        ul {
            for count in counts {
                li {
                    key: "{count.name}-{count.count}",
                    FacetCheckbox { filter_id: filter_id.clone(), facet: count }
                }
            }
        }
    }
}

/// Toggles a single-value list filter for this facet value and searches again.
#[component]
fn FacetCheckbox(filter_id: String, facet: FacetCount) -> Element {
    let ctx = use_context::<SearchContext>();
    let value = FilterValue::List(vec![facet.name.clone()]);
    let is_checked = ctx.state.read().is_filter_applied(&filter_id, Some(&value));

    rsx! {
        div {
            class: "x-facet-list-item",
            style: "
                display: flex;
                flex-direction: row;
                gap: 10px;
                cursor: pointer;
                padding: 4px;
                margin: 4px;
                align-items: center;
            ",
            onclick: move |_e| {
                if is_checked {
                    ctx.engine.remove_filter(&filter_id, Some(&value));
                } else {
                    match AppliedFilter::new(&filter_id, value.clone()) {
                        Ok(filter) => {
                            ctx.engine.add_filter(filter);
                        }
                        Err(e) => {
                            dioxus::logger::tracing::warn!("facet filter {filter_id}: {e}");
                            return;
                        }
                    }
                }
                ctx.submit_search();
            },

            if is_checked {
                Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: black; flex-shrink: 0;" }
            }
            div {
                style: "
                    font-size: 15px;
                    line-height: 22px;
                    color: rgb(0, 0, 0);
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                    min-width: 0;
                ",
                title: "{facet.name}",
                "{facet.name}"
            }

            div { style: "flex: 1 1 auto;", }

            div {
                style: "
                    font-size: 15px;
                    line-height: 22px;
                    color: rgba(28, 33, 45, 0.7);
                    flex-shrink: 0;
                ",
                "{facet.count}"
            }
        }
    }
}
