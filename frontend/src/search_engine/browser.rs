//! Browser implementations of the orchestrator seams.

use std::{cell::RefCell, future::Future, time::Duration};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use common::{search_query::SearchRequest, search_result::SearchResultDocuments, url_state::ParamMap};
use dioxus::router::Navigator;

use super::{SearchBackend, SearchClock, UrlLocation};
use crate::{api::search_api::search_documents, data_definitions::url_param::SearchUrlParams, routes::Route};


/// Runs searches through the `search_documents` server function.
pub struct ServerSearchBackend;

impl SearchBackend for ServerSearchBackend {
    fn search(&self, request: SearchRequest) -> impl Future<Output = anyhow::Result<SearchResultDocuments>> {
        async move { search_documents(request).await.map_err(|e| anyhow!("{e}")) }
    }
}

/// The router's view of the query string.
///
/// The router owns the real URL; the page feeds every change into [`RouterLocation::observe`]
/// so reads stay in sync with back/forward navigation.
pub struct RouterLocation {
    navigator: Navigator,
    params: RefCell<ParamMap>,
}

impl RouterLocation {
    pub fn new(navigator: Navigator, params: ParamMap) -> Self {
        Self { navigator, params: RefCell::new(params) }
    }

    pub fn observe(&self, params: ParamMap) {
        *self.params.borrow_mut() = params;
    }
}

impl UrlLocation for RouterLocation {
    fn current_params(&self) -> ParamMap {
        self.params.borrow().clone()
    }

    fn push_params(&self, params: ParamMap) {
        *self.params.borrow_mut() = params.clone();
        self.navigator.push(Route::SearchPage { params: SearchUrlParams(params) });
    }
}

pub struct BrowserClock;

impl SearchClock for BrowserClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        gloo_timers::future::sleep(duration)
    }
}
