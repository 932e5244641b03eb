use std::rc::Rc;

use dioxus::prelude::*;

use common::{search_state::SearchState, url_state::ParamMap};
use crate::{
    components::{
        error_boundary::ComponentErrorDisplay,
        search_components::{
            filter_editor::FilterEditor, search_facets::SearchFacetsSidebar, search_history::SearchHistoryList,
            search_input_top_bar::SearchInputTopBar, search_result_list_controls::SearchResultListControls,
            search_results_table::SearchResultsTable, selected_filters::SelectedFilters,
        },
        suspend_boundary::LoadingIndicator,
    },
    data_definitions::url_param::SearchUrlParams,
    search_engine::{
        SearchOrchestrator,
        browser::{BrowserClock, RouterLocation, ServerSearchBackend},
    },
};

pub type BrowserSearchEngine = SearchOrchestrator<ServerSearchBackend, RouterLocation, BrowserClock>;

/// Shared by every component on the search page: a signal mirroring the orchestrator's
/// state for rendering, and the orchestrator itself for intents.
#[derive(Clone)]
pub struct SearchContext {
    pub state: Signal<SearchState>,
    pub engine: Rc<BrowserSearchEngine>,
}

impl SearchContext {
    pub fn submit_search(&self) {
        let engine = self.engine.clone();
        spawn(async move {
            engine.submit_search().await;
        });
    }

    pub fn debounced_search(&self) {
        let engine = self.engine.clone();
        spawn(async move {
            engine.debounced_search().await;
        });
    }

    pub fn go_to_page(&self, page: u64) {
        let engine = self.engine.clone();
        spawn(async move {
            engine.go_to_page(page).await;
        });
    }
}

#[component]
pub fn SearchPage(params: SearchUrlParams) -> Element {
    let query = params.0.get(common::url_state::QUERY_PARAM).unwrap_or_default().to_string();
    rsx! {
        Title { "Busca de Processos {query}" }
        SearchPageRootComponent { params: params.0.clone() }
    }
}

#[component]
fn SearchPageRootComponent(params: ReadSignal<ParamMap>) -> Element {
    let navigator = use_navigator();
    let state = use_signal(SearchState::default);

    let engine = use_hook(move || {
        let location = RouterLocation::new(navigator, params.peek().clone());
        let engine = Rc::new(SearchOrchestrator::new(ServerSearchBackend, location, BrowserClock));
        engine.subscribe(move |snapshot| {
            let mut state = state;
            state.set(snapshot.clone());
        });
        engine
    });

    // the router does not remount us on back/forward, so keep the location in step
    let observer = engine.clone();
    use_effect(move || {
        observer.location().observe(params.read().clone());
    });

    let restorer = engine.clone();
    use_effect(move || {
        let engine = restorer.clone();
        spawn(async move {
            engine.restore_from_url().await;
        });
    });

    use_context_provider(move || SearchContext { state, engine });

    rsx! {
        div {
            id: "x-search-page-root-component",
            style: r#"
                height: 100%;
                width: 100%;
                display: flex;
                flex-direction: column;
            "#,
            div {
                id: "x-search-input-top-bar",
                style: "
                    border-bottom: 1px solid rgb(164, 164, 164);
                    background-color: #F8FCFF;
                    flex-shrink: 0;
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    height: 76px;
                    width: 100%;
                ",
                SearchInputTopBar {}
            }

            div {
                id: "x-search-results-bottom-space",
                style: r#"
                    width: 100%;
                    display: flex;
                    flex-direction: row;
                    flex-grow: 1;
                    max-height: calc(100% - 76px);
                "#,
                div {
                    id: "x-search-results-left-panel",
                    style: "
                        height: 100%;
                        background-color: #ECEEF2;
                        flex-shrink: 0;
                        width: 320px;
                        overflow-y: auto;
                    ",
                    SearchFacetsSidebar {}
                    SearchHistoryList {}
                }
                div {
                    id: "x-search-results-main-panel",
                    style: "
                        height: 100%;
                        flex-grow: 1;
                        min-width: 400px;
                        overflow-y: auto;
                        padding: 16px;
                    ",
                    if state.read().filter_editor_open {
                        FilterEditor {}
                    }
                    SelectedFilters {}
                    SearchResultsPanel {}
                }
            }
        }
    }
}

#[component]
fn SearchResultsPanel() -> Element {
    let ctx = use_context::<SearchContext>();
    let state_signal = ctx.state;
    let state = state_signal.read();

    if let Some(error) = state.error.clone() {
        return rsx! {
            ComponentErrorDisplay {
                error_txt: error,
                button {
                    class: "x-error-action",
                    onclick: move |_| ctx.submit_search(),
                    "Tentar novamente"
                }
            }
        };
    }
    if state.is_searching && state.documents.is_empty() {
        return rsx! { LoadingIndicator {} };
    }
    if !state.has_searched {
        return rsx! {
            div {
                style: "color: rgba(0,0,0,0.6); font-size: 18px; padding: 20px;",
                "Digite um termo ou aplique filtros para buscar."
            }
        };
    }
    if state.documents.is_empty() {
        return rsx! {
            div {
                style: "color: rgba(0,0,0,0.6); font-size: 18px; padding: 20px;",
                "Nenhum documento encontrado."
            }
        };
    }

    rsx! {
        SearchResultListControls {}
        SearchResultsTable {}
    }
}
